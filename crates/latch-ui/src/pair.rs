use latch_core::StateSlot;

/// A normal and a highlighted value for one state-keyed property.
#[derive(Clone, Debug)]
pub struct StatePair<T> {
    pub normal: Option<T>,
    pub highlighted: Option<T>,
}

impl<T> Default for StatePair<T> {
    fn default() -> Self {
        Self {
            normal: None,
            highlighted: None,
        }
    }
}

impl<T> StatePair<T> {
    /// Value for a slot; `Unspecified` reads the normal side.
    pub fn get(&self, slot: StateSlot) -> Option<&T> {
        match slot {
            StateSlot::Highlighted => self.highlighted.as_ref(),
            StateSlot::Normal | StateSlot::Unspecified => self.normal.as_ref(),
        }
    }
}

impl<T: Clone> StatePair<T> {
    /// Stores `value` in the addressed slot, or in both for `Unspecified`.
    /// `changed` sees the previous and new value of every side written and
    /// the call returns true if it said yes for any of them.
    pub fn write(
        &mut self,
        slot: StateSlot,
        value: Option<T>,
        changed: impl Fn(Option<&T>, Option<&T>) -> bool,
    ) -> bool {
        let put = |side: &mut Option<T>, value: Option<T>| {
            let differs = changed(side.as_ref(), value.as_ref());
            *side = value;
            differs
        };
        match slot {
            StateSlot::Normal => put(&mut self.normal, value),
            StateSlot::Highlighted => put(&mut self.highlighted, value),
            StateSlot::Unspecified => {
                let a = put(&mut self.normal, value.clone());
                let b = put(&mut self.highlighted, value);
                a || b
            }
        }
    }
}
