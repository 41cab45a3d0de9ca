//! Control states and how state-keyed properties resolve them.

bitflags::bitflags! {
    /// Interaction state of a control, as a bit set.
    ///
    /// The empty set means "unspecified": a property set for it applies to
    /// every state that has no explicit value of its own.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ControlState: u8 {
        const HIGHLIGHTED = 1 << 0;
        const SELECTED = 1 << 1;
        const DISABLED = 1 << 2;
        const FOCUSED = 1 << 3;
    }
}

/// Which stored slot a `ControlState` addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateSlot {
    /// Writes go to both the normal and highlighted slots.
    Unspecified,
    Normal,
    Highlighted,
}

impl ControlState {
    /// Classifies the bit set. Exactly `HIGHLIGHTED` or exactly `SELECTED`
    /// address the highlighted slot; every other non-empty combination
    /// addresses the normal one.
    pub fn slot(self) -> StateSlot {
        if self.is_empty() {
            StateSlot::Unspecified
        } else if self == ControlState::HIGHLIGHTED || self == ControlState::SELECTED {
            StateSlot::Highlighted
        } else {
            StateSlot::Normal
        }
    }
}

/// The two visual variants a control can display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualState {
    #[default]
    Normal,
    Highlighted,
}

impl VisualState {
    pub fn from_highlighted(highlighted: bool) -> Self {
        if highlighted {
            VisualState::Highlighted
        } else {
            VisualState::Normal
        }
    }
}
