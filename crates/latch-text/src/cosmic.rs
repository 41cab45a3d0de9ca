use ahash::AHasher;
use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping};
use latch_core::{Size, text_scale};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
};

use crate::{StyledText, TextMeasurer};

// Results are dropped wholesale past this many entries.
const MAX_CACHED: usize = 4096;

struct Engine {
    fs: FontSystem,
    measured: HashMap<u64, Size>,
}

static ENGINE: OnceCell<Mutex<Engine>> = OnceCell::new();

fn engine() -> &'static Mutex<Engine> {
    ENGINE.get_or_init(|| {
        log::debug!("loading system fonts for text measurement");
        Mutex::new(Engine {
            fs: FontSystem::new(),
            measured: HashMap::new(),
        })
    })
}

// Stable u64 key for a (text, scaled size, bound) triple
fn measure_key(text: &StyledText, px: f32, max: Size) -> u64 {
    let mut h = AHasher::default();
    text.text.hash(&mut h);
    px.to_bits().hash(&mut h);
    text.line_height.to_bits().hash(&mut h);
    text.max_lines.hash(&mut h);
    max.width.to_bits().hash(&mut h);
    max.height.to_bits().hash(&mut h);
    h.finish()
}

/// Shapes text with cosmic-text against the system font set.
///
/// The font system is process-wide and loaded on first use. Lines wrap at
/// the bound's width; the height is the number of laid out lines times the
/// line height, capped by `max_lines`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CosmicMeasurer;

impl CosmicMeasurer {
    pub fn new() -> Self {
        Self
    }

    /// Drops every cached measurement, e.g. after fonts change.
    pub fn clear_cache(&self) {
        engine().lock().measured.clear();
    }
}

impl TextMeasurer for CosmicMeasurer {
    fn measure(&self, text: &StyledText, max: Size) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let px = text.font_size * text_scale().0;
        let key = measure_key(text, px, max);

        let mut eng = engine().lock();
        if let Some(&size) = eng.measured.get(&key) {
            return size;
        }

        let Engine { fs, measured } = &mut *eng;
        let line_h = px * text.line_height;
        let mut buf = Buffer::new(fs, Metrics::new(px, line_h));
        {
            let mut b = buf.borrow_with(fs);
            b.set_size(Some(max.width), None);
            b.set_text(&text.text, &Attrs::new(), Shaping::Advanced, None);
            b.shape_until_scroll(true);
        }

        let mut width = 0.0f32;
        let mut lines = 0usize;
        for run in buf.layout_runs() {
            if text.max_lines.is_some_and(|n| lines >= n) {
                break;
            }
            width = width.max(run.line_w);
            lines += 1;
        }

        let size = Size::new(width.ceil(), (lines as f32 * line_h).ceil()).min(max);
        log::trace!("shaped {:?} into {lines} line(s): {size:?}", text.text);

        if measured.len() >= MAX_CACHED {
            measured.clear();
        }
        measured.insert(key, size);
        size
    }
}
