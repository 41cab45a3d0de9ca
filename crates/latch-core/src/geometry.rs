#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Component-wise minimum.
    pub fn min(self, other: Size) -> Size {
        Size {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }

    /// Shrinks by `insets`, never going below `floor` on either axis.
    pub fn deflate(self, insets: EdgeInsets, floor: f32) -> Size {
        Size {
            width: (self.width - insets.horizontal()).max(floor),
            height: (self.height - insets.vertical()).max(floor),
        }
    }

    pub fn inflate(self, insets: EdgeInsets) -> Size {
        Size {
            width: self.width + insets.horizontal(),
            height: self.height + insets.vertical(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(origin: Vec2, size: Size) -> Self {
        Rect {
            x: origin.x,
            y: origin.y,
            w: size.width,
            h: size.height,
        }
    }

    /// Rect of `size` anchored at the origin.
    pub fn from_size(size: Size) -> Self {
        Rect::new(Vec2::default(), size)
    }

    pub fn origin(&self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.w,
            height: self.h,
        }
    }

    pub fn min_x(&self) -> f32 {
        self.x
    }
    pub fn max_x(&self) -> f32 {
        self.x + self.w
    }
    pub fn min_y(&self) -> f32 {
        self.y
    }
    pub fn max_y(&self) -> f32 {
        self.y + self.h
    }

    /// Moves every edge inward by the matching inset. The result may have a
    /// negative extent when the insets exceed the rect.
    pub fn inset_by(&self, insets: EdgeInsets) -> Rect {
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            w: self.w - insets.horizontal(),
            h: self.h - insets.vertical(),
        }
    }
}

/// Margins applied on each edge of a rect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// Negative margins are clamped to zero.
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        EdgeInsets {
            top,
            left,
            bottom,
            right,
        }
        .clamped()
    }

    /// Same margins with every negative one raised to zero.
    pub fn clamped(self) -> Self {
        EdgeInsets {
            top: self.top.max(0.0),
            left: self.left.max(0.0),
            bottom: self.bottom.max(0.0),
            right: self.right.max(0.0),
        }
    }

    pub fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Offset that centres `inner` within `outer`, rounded down to a whole unit.
pub fn centered_offset(outer: f32, inner: f32) -> f32 {
    ((outer - inner) / 2.0).floor()
}
