//! # Composition locals
//!
//! Thread‑local parameters that measurement reads instead of threading them
//! through every call:
//!
//! - `TextScale` — user text scaling applied to every font size.
//!
//! Override it for a block of work with `with_text_scale`:
//!
//! ```rust
//! use latch_core::*;
//!
//! let scale = with_text_scale(TextScale(1.5), || text_scale().0);
//! assert_eq!(scale, 1.5);
//! assert_eq!(text_scale().0, 1.0);
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextScale(pub f32);
impl Default for TextScale {
    fn default() -> Self {
        Self(1.0)
    }
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Pops the frame even if `f` unwinds
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        }
    });
}

fn local<T: Copy + Default + 'static>() -> T {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return *t;
            }
        }
        T::default()
    })
}

pub fn with_text_scale<R>(ts: TextScale, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<TextScale>(), Box::new(ts));
        f()
    })
}

/// Current text scale, `1.0` outside any `with_text_scale` block.
pub fn text_scale() -> TextScale {
    local::<TextScale>()
}
