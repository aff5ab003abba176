use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::assets::palette::Palette;

/// Process-wide memoized mapping from background-image identifier to its
/// extracted palette.
///
/// An explicitly constructed, cheaply clonable handle rather than a hidden
/// singleton, so tests and hosts can scope it. There is no eviction and no
/// capacity bound: the key space is the catalog of background assets, which
/// is small and fixed. Writers (extraction completions) and readers (preview
/// renders) only need eventual visibility; a racing miss just means the
/// palette goes unused for one frame.
#[derive(Clone, Debug, Default)]
pub struct ColorCache {
    inner: Arc<RwLock<HashMap<String, Palette>>>,
}

impl ColorCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the palette for a background identifier.
    pub fn get(&self, key: &str) -> Option<Palette> {
        self.inner.read().ok()?.get(key).cloned()
    }

    /// Store a palette, unconditionally overwriting any previous entry.
    pub fn set(&self, key: impl Into<String>, palette: Palette) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.into(), palette);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/colors.rs"]
mod tests;
