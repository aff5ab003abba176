use image::imageops;

use crate::{assets::store::PreparedImage, foundation::core::Rgba8};

/// Ordered set of representative colors extracted from a background image.
///
/// The first entry is the most dominant color. Semantics beyond the ordering
/// are opaque to the rendering core; the palette exists so palette-aware
/// styling collaborators can consume it from the [`crate::ColorCache`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba8>,
}

impl Palette {
    /// Wrap an already-ordered color list.
    pub fn new(colors: Vec<Rgba8>) -> Self {
        Self { colors }
    }

    /// Representative colors, most dominant first.
    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }
}

const SAMPLE_TARGET: u32 = 48;
const MAX_COLORS: usize = 4;

/// Extract a dominant-color palette from a decoded background.
///
/// Downsamples, then builds a weighted 5-bit-per-channel histogram that
/// favors saturated mid-tones over near-black/near-white pixels (which are
/// usually borders or empty sky), and returns up to four well-separated
/// bucket colors ordered by weight. Deterministic for identical inputs.
/// Returns `None` when no pixel qualifies.
pub fn extract_palette(image: &PreparedImage) -> Option<Palette> {
    let mut rgba = image::RgbaImage::from_raw(
        image.width,
        image.height,
        image.rgba8_premul.as_ref().clone(),
    )?;

    let (w, h) = rgba.dimensions();
    if w > SAMPLE_TARGET || h > SAMPLE_TARGET {
        let scale_w = SAMPLE_TARGET as f32 / w as f32;
        let scale_h = SAMPLE_TARGET as f32 / h as f32;
        let scale = scale_w.min(scale_h).min(1.0);
        let new_w = ((w as f32) * scale).round().max(8.0) as u32;
        let new_h = ((h as f32) * scale).round().max(8.0) as u32;
        rgba = imageops::resize(&rgba, new_w, new_h, imageops::FilterType::Triangle);
    }

    // 5-bit buckets per channel (32^3 = 32768). Weighted counts prefer
    // saturated colors; extreme blacks/whites are skipped entirely.
    let mut buckets = vec![0u32; 32 * 32 * 32];
    for p in rgba.pixels() {
        let [r, g, b, a] = p.0;
        if a < 16 {
            continue;
        }

        let max = r.max(g).max(b) as i32;
        let min = r.min(g).min(b) as i32;
        let sum = (r as i32) + (g as i32) + (b as i32);
        if sum <= 24 || sum >= 750 {
            continue;
        }

        let sat = (max - min).max(0) as u32;
        let weight = 1u32 + (sat / 24);

        let ri = (r >> 3) as usize;
        let gi = (g >> 3) as usize;
        let bi = (b >> 3) as usize;
        let idx = (ri << 10) | (gi << 5) | bi;
        buckets[idx] = buckets[idx].saturating_add(weight);
    }

    let mut ranked: Vec<(usize, u32)> = buckets
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, c)| c > 0)
        .collect();
    if ranked.is_empty() {
        return None;
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut colors = Vec::<Rgba8>::new();
    for &(idx, _) in &ranked {
        let candidate = bucket_color(idx);
        if colors.iter().all(|c| channel_distance(*c, candidate) >= 48) {
            colors.push(candidate);
            if colors.len() == MAX_COLORS {
                break;
            }
        }
    }

    Some(Palette::new(colors))
}

fn bucket_color(idx: usize) -> Rgba8 {
    let ri = ((idx >> 10) & 31) as u8;
    let gi = ((idx >> 5) & 31) as u8;
    let bi = (idx & 31) as u8;

    // Bucket center back to 8-bit.
    let to_8 = |v5: u8| (v5 << 3) | (v5 >> 2);
    Rgba8::opaque(to_8(ri), to_8(gi), to_8(bi))
}

fn channel_distance(a: Rgba8, b: Rgba8) -> u32 {
    let d = |x: u8, y: u8| u32::from(x.abs_diff(y));
    d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/palette.rs"]
mod tests;
