//! # Button layout
//!
//! A `ButtonNode` owns five visual parts and computes where each one goes:
//!
//! - a background image and a highlighted background image, stretched over
//!   the whole control;
//! - a title and a highlighted title, measured through a `TextMeasurer`;
//! - a foreground image, shared by every state.
//!
//! Hosts drive it in two passes. `measure` shapes both titles under a
//! constraint and caches their sizes; `layout` places every part inside the
//! final bounds from those cached sizes without measuring again. Setters that
//! change geometry return `true` and raise `needs_layout()`, which `measure`
//! clears:
//!
//! ```rust
//! use latch_core::*;
//! use latch_text::MonospaceMeasurer;
//! use latch_ui::*;
//!
//! let mut button = ButtonNode::new(MonospaceMeasurer::default());
//! button.set_title("Send", ControlState::empty());
//! assert!(button.needs_layout());
//!
//! let size = button.measure(Size::new(200.0, 44.0));
//! button.layout(Rect::from_size(size));
//! assert!(!button.needs_layout());
//! assert!(button.is_visible(ButtonPart::Title));
//! ```
//!
//! Only one title and one background are visible at a time; which ones is
//! decided by `set_highlighted`.

use latch_core::{
    Color, ControlState, EdgeInsets, Rect, Size, StateSlot, Vec2, VisualState, centered_offset,
};
use latch_text::{CosmicMeasurer, StyledText, TextMeasurer};

use crate::bitmap::{Image, ImageProvider};
use crate::pair::StatePair;
use crate::style::{ButtonStyle, HorizontalAlignment, Orientation};

/// The visual parts of a button, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonPart {
    Background,
    HighlightedBackground,
    Title,
    HighlightedTitle,
    Image,
}

impl ButtonPart {
    pub const ALL: [ButtonPart; 5] = [
        ButtonPart::Background,
        ButtonPart::HighlightedBackground,
        ButtonPart::Title,
        ButtonPart::HighlightedTitle,
        ButtonPart::Image,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Placement {
    frame: Rect,
    hidden: bool,
}

#[derive(Debug)]
pub struct ButtonNode<M = CosmicMeasurer> {
    measurer: M,
    style: ButtonStyle,
    titles: StatePair<StyledText>,
    image: Option<Image>,
    backgrounds: StatePair<Image>,
    // Sizes from the last measure pass.
    title_size: Size,
    highlighted_title_size: Size,
    placements: [Placement; 5],
    highlighted: bool,
    needs_layout: bool,
}

impl<M: TextMeasurer> ButtonNode<M> {
    pub fn new(measurer: M) -> Self {
        Self::with_style(measurer, ButtonStyle::default())
    }

    pub fn with_style(measurer: M, style: ButtonStyle) -> Self {
        let mut placements = [Placement::default(); 5];
        placements[ButtonPart::HighlightedBackground.index()].hidden = true;
        placements[ButtonPart::HighlightedTitle.index()].hidden = true;
        Self {
            measurer,
            style: ButtonStyle {
                content_insets: style.content_insets.clamped(),
                spacing: style.spacing.max(0.0),
                ..style
            },
            titles: StatePair::default(),
            image: None,
            backgrounds: StatePair::default(),
            title_size: Size::ZERO,
            highlighted_title_size: Size::ZERO,
            placements,
            highlighted: false,
            needs_layout: true,
        }
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    fn invalidate(&mut self, what: &str) -> bool {
        log::trace!("button layout invalidated by {what}");
        self.needs_layout = true;
        true
    }

    /// True once content or layout parameters changed since the last
    /// `measure`.
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    // Layout parameters

    pub fn style(&self) -> ButtonStyle {
        self.style
    }

    /// Applies every layout parameter at once.
    pub fn apply_style(&mut self, style: ButtonStyle) -> bool {
        let a = self.set_content_insets(style.content_insets);
        let b = self.set_horizontal_alignment(style.horizontal_alignment);
        let c = self.set_orientation(style.orientation);
        let d = self.set_spacing(style.spacing);
        a || b || c || d
    }

    pub fn content_insets(&self) -> EdgeInsets {
        self.style.content_insets
    }

    /// Negative margins are clamped to zero.
    pub fn set_content_insets(&mut self, insets: EdgeInsets) -> bool {
        let insets = insets.clamped();
        if self.style.content_insets == insets {
            return false;
        }
        self.style.content_insets = insets;
        self.invalidate("content insets")
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.style.horizontal_alignment
    }

    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) -> bool {
        if self.style.horizontal_alignment == alignment {
            return false;
        }
        self.style.horizontal_alignment = alignment;
        self.invalidate("horizontal alignment")
    }

    pub fn orientation(&self) -> Orientation {
        self.style.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        if self.style.orientation == orientation {
            return false;
        }
        self.style.orientation = orientation;
        self.invalidate("orientation")
    }

    pub fn spacing(&self) -> f32 {
        self.style.spacing
    }

    /// Negative spacing is clamped to zero.
    pub fn set_spacing(&mut self, spacing: f32) -> bool {
        let spacing = spacing.max(0.0);
        if self.style.spacing == spacing {
            return false;
        }
        self.style.spacing = spacing;
        self.invalidate("spacing")
    }

    // Content

    /// Title shown for `state`. Highlighted and selected read the highlighted
    /// title, everything else the normal one.
    pub fn title(&self, state: ControlState) -> Option<&StyledText> {
        self.titles.get(state.slot())
    }

    /// Sets the title for `state`. The empty state sets both the normal and
    /// the highlighted title, so the latter follows until overridden.
    ///
    /// Returns true when a stored title was absent or differs from `title`.
    pub fn set_title(&mut self, title: impl Into<StyledText>, state: ControlState) -> bool {
        let changed = self.titles.write(state.slot(), Some(title.into()), |old, new| {
            old.is_none() || old != new
        });
        if changed {
            self.invalidate("title")
        } else {
            false
        }
    }

    pub fn set_title_str(
        &mut self,
        text: impl Into<String>,
        font_size: f32,
        color: Color,
        state: ControlState,
    ) -> bool {
        self.set_title(StyledText::styled(text, font_size, color), state)
    }

    /// The foreground image. It is shared by all states, so `_state` is
    /// ignored.
    pub fn image(&self, _state: ControlState) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Replaces the foreground image. Layout is only invalidated when the
    /// intrinsic size changes.
    pub fn set_image(&mut self, image: Option<Image>, _state: ControlState) -> bool {
        let old = self.image.as_ref().map(|i| i.size());
        let new = image.as_ref().map(|i| i.size());
        self.image = image;
        if old != new {
            self.invalidate("image size")
        } else {
            false
        }
    }

    pub fn background_image(&self, state: ControlState) -> Option<&Image> {
        self.backgrounds.get(state.slot())
    }

    /// Backgrounds always fill the bounds, so this never invalidates layout.
    pub fn set_background_image(&mut self, image: Option<Image>, state: ControlState) -> bool {
        self.backgrounds.write(state.slot(), image, |_, _| false)
    }

    // Visual state

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn visual_state(&self) -> VisualState {
        VisualState::from_highlighted(self.highlighted)
    }

    /// Switches between the normal and highlighted parts. Does nothing when
    /// the state is unchanged.
    ///
    /// Entering the highlighted state shows a highlighted title or background
    /// only if one is set; otherwise the normal one stays visible.
    pub fn set_highlighted(&mut self, highlighted: bool) {
        if self.highlighted == highlighted {
            return;
        }
        self.highlighted = highlighted;

        let (title_hl, background_hl) = if highlighted {
            (
                self.titles.highlighted.is_some(),
                self.backgrounds.highlighted.is_some(),
            )
        } else {
            (false, false)
        };
        log::debug!(
            "button highlighted={highlighted} (title variant: {}, background variant: {})",
            if title_hl { "highlighted" } else { "normal" },
            if background_hl { "highlighted" } else { "normal" },
        );
        self.show(ButtonPart::Title, ButtonPart::HighlightedTitle, title_hl);
        self.show(
            ButtonPart::Background,
            ButtonPart::HighlightedBackground,
            background_hl,
        );
    }

    fn show(&mut self, normal: ButtonPart, highlighted: ButtonPart, use_highlighted: bool) {
        self.placements[normal.index()].hidden = use_highlighted;
        self.placements[highlighted.index()].hidden = !use_highlighted;
    }

    // Layout

    fn image_size(&self) -> Size {
        self.image.as_ref().map_or(Size::ZERO, |i| i.size())
    }

    fn measure_title(&self, slot: StateSlot, bound: Size) -> Size {
        self.titles
            .get(slot)
            .map_or(Size::ZERO, |t| self.measurer.measure(t, bound))
    }

    /// Size that fits the content under `constraint`, never larger than it.
    ///
    /// Both titles are measured and cached for the next `layout`; the space
    /// reserved for the title fits the larger of the two.
    pub fn measure(&mut self, constraint: Size) -> Size {
        let insets = self.style.content_insets;
        let spacing = self.style.spacing;
        let usable = constraint.deflate(insets, 1.0);
        let image = self.image_size();

        let text_width = match self.style.orientation {
            Orientation::Horizontal => {
                let gap = if image.width != 0.0 { spacing } else { 0.0 };
                (usable.width - image.width - gap).max(1.0)
            }
            Orientation::Vertical => usable.width,
        };
        let bound = Size::new(text_width, usable.height);

        self.title_size = self.measure_title(StateSlot::Normal, bound);
        self.highlighted_title_size = self.measure_title(StateSlot::Highlighted, bound);
        let title = self.title_size.max(self.highlighted_title_size);

        let gap = if title.width != 0.0 && image.width != 0.0 {
            spacing
        } else {
            0.0
        };
        let content = match self.style.orientation {
            Orientation::Horizontal => Size::new(
                title.width + image.width + gap,
                title.height.max(image.height),
            ),
            Orientation::Vertical => Size::new(
                title.width.max(image.width),
                title.height + image.height + gap,
            ),
        };

        self.needs_layout = false;
        let size = content.inflate(insets).min(constraint);
        log::trace!("button measured {size:?} under {constraint:?}");
        size
    }

    /// Places every part inside `bounds` using the sizes cached by the last
    /// `measure`. Stale sizes are used as they are.
    pub fn layout(&mut self, bounds: Rect) {
        let content = bounds.inset_by(self.style.content_insets);
        let spacing = self.style.spacing;
        let image = self.image_size();
        let title = self.title_size;
        let hl_title = self.highlighted_title_size;

        let center_x = |w: f32| content.min_x() + centered_offset(content.w, w);
        let center_y = |h: f32| content.min_y() + centered_offset(content.h, h);

        let (title_at, hl_title_at, image_at) = match self.style.orientation {
            Orientation::Horizontal => match self.style.horizontal_alignment {
                HorizontalAlignment::Left => {
                    let x = content.min_x();
                    (
                        Vec2 {
                            x,
                            y: center_y(title.height),
                        },
                        Vec2 {
                            x,
                            y: center_y(hl_title.height),
                        },
                        Vec2 {
                            x: x + title.width + spacing,
                            y: center_y(image.height),
                        },
                    )
                }
                HorizontalAlignment::Right => {
                    let x = content.max_x() - title.width;
                    (
                        Vec2 {
                            x,
                            y: center_y(title.height),
                        },
                        Vec2 {
                            x: content.max_x() - hl_title.width,
                            y: center_y(hl_title.height),
                        },
                        Vec2 {
                            x: x - spacing - image.width,
                            y: center_y(image.height),
                        },
                    )
                }
                // Title and image are centred independently and may overlap.
                HorizontalAlignment::Center => (
                    Vec2 {
                        x: center_x(title.width),
                        y: center_y(title.height),
                    },
                    Vec2 {
                        x: center_x(hl_title.width),
                        y: center_y(hl_title.height),
                    },
                    Vec2 {
                        x: center_x(image.width),
                        y: center_y(image.height),
                    },
                ),
            },
            Orientation::Vertical => {
                let mut block = title.height;
                if image.height != 0.0 {
                    block += spacing + image.height;
                }
                let top = center_y(block);
                (
                    Vec2 {
                        x: center_x(title.width),
                        y: top + block - title.height,
                    },
                    Vec2 {
                        x: center_x(hl_title.width),
                        y: top + block - hl_title.height,
                    },
                    Vec2 {
                        x: center_x(image.width),
                        y: top,
                    },
                )
            }
        };

        self.place(ButtonPart::Title, Rect::new(title_at, title));
        self.place(ButtonPart::HighlightedTitle, Rect::new(hl_title_at, hl_title));
        self.place(ButtonPart::Image, Rect::new(image_at, image));
        self.place(ButtonPart::Background, bounds);
        self.place(ButtonPart::HighlightedBackground, bounds);
        log::trace!("button laid out in {bounds:?}");
    }

    fn place(&mut self, part: ButtonPart, frame: Rect) {
        self.placements[part.index()].frame = frame;
    }

    // Readout

    /// Frame of `part` from the last `layout`.
    pub fn frame(&self, part: ButtonPart) -> Rect {
        self.placements[part.index()].frame
    }

    pub fn is_visible(&self, part: ButtonPart) -> bool {
        !self.placements[part.index()].hidden
    }

    /// Title size cached by the last `measure`, for the normal or
    /// highlighted variant.
    pub fn measured_title_size(&self, state: VisualState) -> Size {
        match state {
            VisualState::Normal => self.title_size,
            VisualState::Highlighted => self.highlighted_title_size,
        }
    }

    /// Every part with its frame and visibility, back to front.
    pub fn parts(&self) -> impl Iterator<Item = (ButtonPart, Rect, bool)> + '_ {
        ButtonPart::ALL
            .into_iter()
            .map(|p| (p, self.frame(p), self.is_visible(p)))
    }
}

impl Default for ButtonNode<CosmicMeasurer> {
    fn default() -> Self {
        ButtonNode::new(CosmicMeasurer::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latch_text::MonospaceMeasurer;
    use std::cell::RefCell;

    fn mono() -> MonospaceMeasurer {
        MonospaceMeasurer::new(0.5)
    }

    // 0.5 advance at `size` with unit line height: each grapheme is size/2 wide
    fn text(s: &str, size: f32) -> StyledText {
        StyledText::new(s).size(size).line_height(1.0)
    }

    fn square(side: f32) -> Image {
        Image::placeholder(Size::new(side, side))
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect { x, y, w, h }
    }

    /// Returns a fixed size clipped to the bound and records every bound.
    struct Recorder {
        size: Size,
        bounds: RefCell<Vec<Size>>,
    }

    impl TextMeasurer for Recorder {
        fn measure(&self, _text: &StyledText, max: Size) -> Size {
            self.bounds.borrow_mut().push(max);
            self.size.min(max)
        }
    }

    fn recorder(w: f32, h: f32) -> Recorder {
        Recorder {
            size: Size::new(w, h),
            bounds: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_horizontal_left() {
        let mut b = ButtonNode::new(mono());
        b.set_spacing(8.0);
        b.set_horizontal_alignment(HorizontalAlignment::Left);
        b.set_title(text("abcd", 20.0), ControlState::empty());
        b.set_image(Some(square(20.0)), ControlState::empty());

        let size = b.measure(Size::new(200.0, 40.0));
        assert_eq!(size, Size::new(68.0, 20.0));

        b.layout(rect(0.0, 0.0, 68.0, 40.0));
        assert_eq!(b.frame(ButtonPart::Title), rect(0.0, 10.0, 40.0, 20.0));
        assert_eq!(b.frame(ButtonPart::Image), rect(48.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn test_horizontal_right() {
        let mut b = ButtonNode::new(mono());
        b.set_spacing(8.0);
        b.set_horizontal_alignment(HorizontalAlignment::Right);
        b.set_title(text("abcd", 20.0), ControlState::empty());
        b.set_image(Some(square(20.0)), ControlState::empty());

        b.measure(Size::new(200.0, 20.0));
        b.layout(rect(0.0, 0.0, 100.0, 20.0));
        assert_eq!(b.frame(ButtonPart::Title), rect(60.0, 0.0, 40.0, 20.0));
        assert_eq!(b.frame(ButtonPart::Image), rect(32.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_horizontal_center_does_not_offset_image() {
        let mut b = ButtonNode::new(mono());
        b.set_spacing(8.0);
        b.set_title(text("abcd", 20.0), ControlState::empty());
        b.set_image(Some(square(20.0)), ControlState::empty());

        b.measure(Size::new(200.0, 20.0));
        b.layout(rect(0.0, 0.0, 100.0, 20.0));
        assert_eq!(b.frame(ButtonPart::Title).x, 30.0);
        assert_eq!(b.frame(ButtonPart::Image).x, 40.0);
    }

    #[test]
    fn test_vertical_stacks_image_above_title() {
        let mut b = ButtonNode::new(mono());
        b.set_orientation(Orientation::Vertical);
        b.set_spacing(4.0);
        b.set_title(text("abcdef", 10.0), ControlState::empty());
        b.set_image(Some(square(20.0)), ControlState::empty());

        let size = b.measure(Size::new(60.0, 40.0));
        assert_eq!(size, Size::new(30.0, 34.0));

        b.layout(rect(0.0, 0.0, 60.0, 40.0));
        assert_eq!(b.frame(ButtonPart::Image), rect(20.0, 3.0, 20.0, 20.0));
        assert_eq!(b.frame(ButtonPart::Title), rect(15.0, 27.0, 30.0, 10.0));
    }

    #[test]
    fn test_vertical_without_image_skips_spacing() {
        let mut b = ButtonNode::new(mono());
        b.set_orientation(Orientation::Vertical);
        b.set_spacing(4.0);
        b.set_title(text("abcdef", 10.0), ControlState::empty());

        assert_eq!(b.measure(Size::new(60.0, 40.0)), Size::new(30.0, 10.0));
        b.layout(rect(0.0, 0.0, 60.0, 40.0));
        assert_eq!(b.frame(ButtonPart::Title).y, 15.0);
    }

    #[test]
    fn test_insets_offset_content_but_not_backgrounds() {
        let mut b = ButtonNode::new(mono());
        b.set_horizontal_alignment(HorizontalAlignment::Left);
        b.set_content_insets(EdgeInsets::new(4.0, 10.0, 6.0, 2.0));
        b.set_title(text("abcd", 20.0), ControlState::empty());

        let size = b.measure(Size::new(200.0, 200.0));
        assert_eq!(size, Size::new(52.0, 30.0));

        let bounds = rect(0.0, 0.0, 52.0, 30.0);
        b.layout(bounds);
        assert_eq!(b.frame(ButtonPart::Title), rect(10.0, 4.0, 40.0, 20.0));
        assert_eq!(b.frame(ButtonPart::Background), bounds);
        assert_eq!(b.frame(ButtonPart::HighlightedBackground), bounds);
    }

    #[test]
    fn test_backgrounds_fill_bounds_for_every_alignment() {
        let alignments = [
            HorizontalAlignment::Left,
            HorizontalAlignment::Center,
            HorizontalAlignment::Right,
        ];
        for alignment in alignments {
            let mut b = ButtonNode::new(mono());
            b.set_horizontal_alignment(alignment);
            b.set_content_insets(EdgeInsets::uniform(7.0));
            b.set_title(text("ab", 10.0), ControlState::empty());
            b.measure(Size::new(80.0, 30.0));
            let bounds = rect(5.0, 5.0, 80.0, 30.0);
            b.layout(bounds);
            assert_eq!(b.frame(ButtonPart::Background), bounds);
            assert_eq!(b.frame(ButtonPart::HighlightedBackground), bounds);
        }
    }

    #[test]
    fn test_measure_never_exceeds_constraint() {
        let mut b = ButtonNode::new(mono());
        b.set_content_insets(EdgeInsets::uniform(8.0));
        b.set_spacing(6.0);
        b.set_title(text("a fairly long title", 20.0), ControlState::empty());
        b.set_image(Some(square(32.0)), ControlState::empty());

        for c in [
            Size::new(0.0, 0.0),
            Size::new(10.0, 5.0),
            Size::new(50.0, 200.0),
            Size::new(1000.0, 1000.0),
        ] {
            let s = b.measure(c);
            assert!(s.width <= c.width && s.height <= c.height, "{s:?} > {c:?}");
        }
    }

    #[test]
    fn test_measure_is_idempotent() {
        let mut b = ButtonNode::new(mono());
        b.set_title(text("hello", 12.0), ControlState::empty());
        b.set_title(text("hello!!", 12.0), ControlState::HIGHLIGHTED);
        b.set_image(Some(square(16.0)), ControlState::empty());
        let c = Size::new(120.0, 40.0);
        assert_eq!(b.measure(c), b.measure(c));
    }

    #[test]
    fn test_title_reservation_fits_larger_variant() {
        let mut b = ButtonNode::new(mono());
        b.set_title(text("ab", 10.0), ControlState::empty());
        b.set_title(text("abcdef", 20.0), ControlState::HIGHLIGHTED);

        let size = b.measure(Size::new(500.0, 500.0));
        assert_eq!(size, Size::new(60.0, 20.0));
        assert_eq!(b.measured_title_size(VisualState::Normal), Size::new(10.0, 10.0));
        assert_eq!(
            b.measured_title_size(VisualState::Highlighted),
            Size::new(60.0, 20.0)
        );

        // each variant is placed with its own size
        b.layout(rect(0.0, 0.0, 60.0, 20.0));
        assert_eq!(b.frame(ButtonPart::Title), rect(25.0, 5.0, 10.0, 10.0));
        assert_eq!(b.frame(ButtonPart::HighlightedTitle), rect(0.0, 0.0, 60.0, 20.0));
    }

    #[test]
    fn test_text_budget_excludes_image_and_insets() {
        let mut b = ButtonNode::new(recorder(40.0, 20.0));
        b.set_content_insets(EdgeInsets::uniform(5.0));
        b.set_spacing(8.0);
        b.set_title("x", ControlState::empty());
        b.set_image(Some(square(20.0)), ControlState::empty());

        b.measure(Size::new(100.0, 50.0));
        let bounds = b.measurer().bounds.borrow().clone();
        assert_eq!(bounds, vec![Size::new(62.0, 40.0); 2]);
    }

    #[test]
    fn test_text_budget_vertical_gets_full_width() {
        let mut b = ButtonNode::new(recorder(40.0, 20.0));
        b.set_orientation(Orientation::Vertical);
        b.set_spacing(8.0);
        b.set_title("x", ControlState::empty());
        b.set_image(Some(square(20.0)), ControlState::empty());

        b.measure(Size::new(100.0, 50.0));
        assert_eq!(b.measurer().bounds.borrow()[0], Size::new(100.0, 50.0));
    }

    #[test]
    fn test_text_budget_floors_at_one() {
        let mut b = ButtonNode::new(recorder(40.0, 20.0));
        b.set_content_insets(EdgeInsets::uniform(10.0));
        b.set_title("x", ControlState::empty());
        b.set_image(Some(square(20.0)), ControlState::empty());

        b.measure(Size::new(0.0, 0.0));
        assert_eq!(b.measurer().bounds.borrow()[0], Size::new(1.0, 1.0));
    }

    #[test]
    fn test_absent_titles_are_not_measured() {
        let mut b = ButtonNode::new(recorder(40.0, 20.0));
        b.set_image(Some(square(20.0)), ControlState::empty());
        b.set_spacing(8.0);
        assert_eq!(b.measure(Size::new(100.0, 100.0)), Size::new(20.0, 20.0));
        assert!(b.measurer().bounds.borrow().is_empty());
    }

    #[test]
    fn test_title_mirrors_to_highlighted() {
        let mut b = ButtonNode::new(mono());
        b.set_title("Save", ControlState::empty());
        assert_eq!(b.title(ControlState::HIGHLIGHTED).map(|t| t.text.as_str()), Some("Save"));
        assert_eq!(b.title(ControlState::SELECTED).map(|t| t.text.as_str()), Some("Save"));

        b.set_title("Saving", ControlState::SELECTED);
        assert_eq!(b.title(ControlState::HIGHLIGHTED).map(|t| t.text.as_str()), Some("Saving"));
        assert_eq!(b.title(ControlState::empty()).map(|t| t.text.as_str()), Some("Save"));
        // other combinations address the normal title
        assert_eq!(
            b.title(ControlState::HIGHLIGHTED | ControlState::DISABLED)
                .map(|t| t.text.as_str()),
            Some("Save")
        );
    }

    #[test]
    fn test_title_invalidates_only_on_change() {
        let mut b = ButtonNode::new(mono());
        assert!(b.set_title("Go", ControlState::empty()));
        b.measure(Size::new(100.0, 100.0));
        assert!(!b.needs_layout());

        assert!(!b.set_title("Go", ControlState::empty()));
        assert!(!b.needs_layout());

        assert!(b.set_title(StyledText::new("Go").size(30.0), ControlState::HIGHLIGHTED));
        assert!(b.needs_layout());
    }

    #[test]
    fn test_set_title_str_builds_styled_text() {
        let mut b = ButtonNode::new(mono());
        b.set_title_str("Ok", 14.0, Color::BLACK, ControlState::empty());
        let t = b.title(ControlState::empty()).unwrap();
        assert_eq!(t.font_size, 14.0);
        assert_eq!(t.color, Color::BLACK);
    }

    #[test]
    fn test_image_invalidates_only_on_size_change() {
        let mut b = ButtonNode::new(mono());
        assert!(b.set_image(Some(square(20.0)), ControlState::empty()));
        b.measure(Size::new(100.0, 100.0));

        assert!(!b.set_image(Some(square(20.0)), ControlState::HIGHLIGHTED));
        assert!(!b.needs_layout());

        assert!(b.set_image(Some(square(24.0)), ControlState::empty()));
        assert!(b.needs_layout());

        b.measure(Size::new(100.0, 100.0));
        assert!(b.set_image(None, ControlState::empty()));
        assert!(b.image(ControlState::empty()).is_none());
    }

    #[test]
    fn test_image_is_shared_across_states() {
        let mut b = ButtonNode::new(mono());
        let img = square(10.0);
        b.set_image(Some(img.clone()), ControlState::HIGHLIGHTED);
        assert!(b.image(ControlState::empty()).is_some_and(|i| i.ptr_eq(&img)));
    }

    #[test]
    fn test_background_mirroring_does_not_invalidate() {
        let mut b = ButtonNode::new(mono());
        b.measure(Size::new(10.0, 10.0));

        let normal = square(4.0);
        let pressed = square(8.0);
        assert!(!b.set_background_image(Some(normal.clone()), ControlState::empty()));
        assert!(b
            .background_image(ControlState::HIGHLIGHTED)
            .is_some_and(|i| i.ptr_eq(&normal)));

        b.set_background_image(Some(pressed.clone()), ControlState::HIGHLIGHTED);
        assert!(b
            .background_image(ControlState::empty())
            .is_some_and(|i| i.ptr_eq(&normal)));
        assert!(b
            .background_image(ControlState::SELECTED)
            .is_some_and(|i| i.ptr_eq(&pressed)));
        assert!(!b.needs_layout());
    }

    #[test]
    fn test_initial_visibility() {
        let b = ButtonNode::new(mono());
        assert!(b.is_visible(ButtonPart::Title));
        assert!(!b.is_visible(ButtonPart::HighlightedTitle));
        assert!(b.is_visible(ButtonPart::Background));
        assert!(!b.is_visible(ButtonPart::HighlightedBackground));
        assert!(b.is_visible(ButtonPart::Image));
    }

    #[test]
    fn test_highlight_falls_back_per_pair() {
        let mut b = ButtonNode::new(mono());
        b.set_title("Tap", ControlState::empty());
        b.set_title("Tapped", ControlState::HIGHLIGHTED);
        b.set_background_image(Some(square(4.0)), ControlState::empty());
        b.set_background_image(None, ControlState::HIGHLIGHTED);

        b.set_highlighted(true);
        assert_eq!(b.visual_state(), VisualState::Highlighted);
        assert!(b.is_visible(ButtonPart::HighlightedTitle));
        assert!(!b.is_visible(ButtonPart::Title));
        assert!(b.is_visible(ButtonPart::Background));
        assert!(!b.is_visible(ButtonPart::HighlightedBackground));
        assert!(b.is_visible(ButtonPart::Image));
    }

    #[test]
    fn test_unhighlight_restores_normal_parts() {
        let mut b = ButtonNode::new(mono());
        b.set_title("Tap", ControlState::empty());
        b.set_background_image(Some(square(4.0)), ControlState::empty());

        b.set_highlighted(true);
        assert!(b.is_visible(ButtonPart::HighlightedTitle));
        assert!(b.is_visible(ButtonPart::HighlightedBackground));

        b.set_highlighted(false);
        assert!(b.is_visible(ButtonPart::Title));
        assert!(!b.is_visible(ButtonPart::HighlightedTitle));
        assert!(b.is_visible(ButtonPart::Background));
        assert!(!b.is_visible(ButtonPart::HighlightedBackground));
    }

    #[test]
    fn test_highlight_is_edge_triggered() {
        let mut b = ButtonNode::new(mono());
        b.set_highlighted(true);
        assert!(b.is_visible(ButtonPart::Title));

        // a highlighted title arriving later is not picked up until the
        // state actually changes again
        b.set_title("Late", ControlState::HIGHLIGHTED);
        b.set_highlighted(true);
        assert!(b.is_visible(ButtonPart::Title));
        assert!(!b.is_visible(ButtonPart::HighlightedTitle));

        b.set_highlighted(false);
        b.set_highlighted(true);
        assert!(b.is_visible(ButtonPart::HighlightedTitle));
    }

    #[test]
    fn test_property_setters_invalidate_on_change() {
        let mut b = ButtonNode::new(mono());
        b.measure(Size::new(10.0, 10.0));

        assert!(!b.set_spacing(0.0));
        assert!(!b.set_spacing(-3.0));
        assert!(!b.set_orientation(Orientation::Horizontal));
        assert!(!b.set_horizontal_alignment(HorizontalAlignment::Center));
        assert!(!b.set_content_insets(EdgeInsets::ZERO));
        assert!(!b.needs_layout());

        assert!(b.set_orientation(Orientation::Vertical));
        assert!(b.needs_layout());
    }

    #[test]
    fn test_negative_insets_from_config_are_clamped() {
        let style: ButtonStyle = serde_json::from_str(
            r#"{ "horizontal_alignment": "left", "content_insets": { "left": -10.0, "top": -5.0 } }"#,
        )
        .unwrap();
        let mut b = ButtonNode::with_style(mono(), style);
        assert_eq!(b.content_insets(), EdgeInsets::ZERO);

        b.set_title(text("abcd", 20.0), ControlState::empty());
        assert_eq!(b.measure(Size::new(200.0, 40.0)), Size::new(40.0, 20.0));
        b.layout(rect(0.0, 0.0, 40.0, 20.0));
        assert_eq!(b.frame(ButtonPart::Title), rect(0.0, 0.0, 40.0, 20.0));
    }

    #[test]
    fn test_set_content_insets_clamps_negative_fields() {
        let mut b = ButtonNode::new(mono());
        b.measure(Size::new(10.0, 10.0));
        let raw = EdgeInsets {
            left: -10.0,
            ..EdgeInsets::ZERO
        };
        assert!(!b.set_content_insets(raw));
        assert_eq!(b.content_insets().left, 0.0);
        assert!(!b.needs_layout());

        assert!(b.set_content_insets(EdgeInsets {
            right: 3.0,
            bottom: -2.0,
            ..EdgeInsets::ZERO
        }));
        assert_eq!(b.content_insets(), EdgeInsets::new(0.0, 0.0, 0.0, 3.0));
    }

    #[test]
    fn test_apply_style() {
        let style = ButtonStyle {
            content_insets: EdgeInsets::symmetric(12.0, 6.0),
            horizontal_alignment: HorizontalAlignment::Left,
            orientation: Orientation::Horizontal,
            spacing: 4.0,
        };
        let mut b = ButtonNode::new(mono());
        assert!(b.apply_style(style));
        assert_eq!(b.style(), style);
        b.measure(Size::new(10.0, 10.0));
        assert!(!b.apply_style(style));

        let b = ButtonNode::with_style(mono(), style);
        assert_eq!(b.content_insets(), style.content_insets);
        assert_eq!(b.spacing(), 4.0);
    }

    #[test]
    fn test_layout_uses_cached_sizes_until_remeasured() {
        let mut b = ButtonNode::new(mono());
        b.set_horizontal_alignment(HorizontalAlignment::Left);
        b.set_title(text("ab", 10.0), ControlState::empty());
        b.measure(Size::new(100.0, 10.0));

        b.set_title(text("abcd", 10.0), ControlState::empty());
        b.layout(rect(0.0, 0.0, 100.0, 10.0));
        assert_eq!(b.frame(ButtonPart::Title).w, 10.0);

        b.measure(Size::new(100.0, 10.0));
        b.layout(rect(0.0, 0.0, 100.0, 10.0));
        assert_eq!(b.frame(ButtonPart::Title).w, 20.0);
    }

    #[test]
    fn test_parts_back_to_front() {
        let b = ButtonNode::new(mono());
        let order: Vec<_> = b.parts().map(|(p, _, _)| p).collect();
        assert_eq!(order, ButtonPart::ALL.to_vec());
    }
}
