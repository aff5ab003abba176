use crate::{
    assets::fonts::FontLibrary,
    assets::palette::extract_palette,
    assets::store::{BackgroundStore, PreparedImage},
    cache::colors::ColorCache,
    foundation::error::CoverResult,
    layout::engine::place_lines,
    model::props::CoverProperties,
    render::compositor::Compositor,
    render::frame::FrameRGBA,
};

/// Interactive, resolution-independent renderer for live cover editing.
///
/// Holds a parameter snapshot and reproduces the compositor's output at
/// whatever square size the host viewport dictates: both go through the same
/// line-placement path, so preview geometry equals export geometry divided by
/// the scale factor. Shaped layout is cached across redraws and only
/// invalidated by a stale snapshot or a viewport change, keeping per-frame
/// recompute cheap enough for the host's refresh notifications.
pub struct PreviewRenderer {
    snapshot: CoverProperties,
    canvas_pixels: u32,
    compositor: Compositor,
    placed: Option<Vec<crate::layout::engine::PlacedLine>>,
}

impl PreviewRenderer {
    /// Create a preview of `snapshot` inside a `view_width` x `view_height`
    /// region; the effective canvas is the region's smaller side.
    pub fn new(snapshot: CoverProperties, view_width: u32, view_height: u32) -> Self {
        Self {
            snapshot,
            canvas_pixels: view_width.min(view_height),
            compositor: Compositor::new(),
            placed: None,
        }
    }

    /// Effective square canvas size in pixels.
    pub fn canvas_pixels(&self) -> u32 {
        self.canvas_pixels
    }

    /// Currently loaded parameter snapshot.
    pub fn properties(&self) -> &CoverProperties {
        &self.snapshot
    }

    /// Adopt a new viewport; a changed effective size invalidates the cached
    /// layout.
    pub fn set_viewport(&mut self, view_width: u32, view_height: u32) {
        let next = view_width.min(view_height);
        if next != self.canvas_pixels {
            self.canvas_pixels = next;
            self.placed = None;
        }
    }

    /// React to a change notification for the underlying cover.
    ///
    /// The snapshot is reloaded only when both edit timestamps are present
    /// and differ; otherwise the cached layout keeps serving redraws. Returns
    /// whether a reload happened. Two edits landing on the same millisecond
    /// are indistinguishable here; that missed-refresh window is a known
    /// limitation of timestamp-inequality staleness.
    pub fn notify_changed(&mut self, latest: &CoverProperties) -> bool {
        let stale = match (self.snapshot.date_edited, latest.date_edited) {
            (Some(current), Some(incoming)) => current != incoming,
            _ => false,
        };
        if stale {
            self.snapshot = latest.clone();
            self.placed = None;
        }
        stale
    }

    /// First-display hook: make sure the current background's palette is in
    /// the cache so palette-aware editing surfaces find it ready.
    ///
    /// On a cache miss this loads and extracts synchronously; hosts dispatch
    /// it to a worker and never await it from the drawing path. Load or
    /// extraction failures are swallowed: the palette is opportunistic.
    pub fn on_appear(&self, cache: &ColorCache, store: &BackgroundStore) {
        let key = &self.snapshot.background_img_url;
        if cache.get(key).is_some() {
            return;
        }
        let Ok(image) = store.load(key, &self.snapshot.background_img_type) else {
            return;
        };
        if let Some(palette) = extract_palette(&image) {
            cache.set(key.clone(), palette);
        }
    }

    /// Render the snapshot over `background` at the current canvas size,
    /// reusing cached layout when nothing changed.
    pub fn render(
        &mut self,
        background: &PreparedImage,
        fonts: &FontLibrary,
    ) -> CoverResult<FrameRGBA> {
        if self.placed.is_none() {
            let placed = place_lines(
                &self.snapshot,
                f64::from(self.canvas_pixels),
                fonts,
                &mut self.compositor.shaper,
            )?;
            self.placed = Some(placed);
        }

        let lines = self.placed.as_deref().unwrap_or_default();
        self.compositor.draw(self.canvas_pixels, background, lines)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
