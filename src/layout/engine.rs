use std::sync::Arc;

use crate::{
    assets::fonts::{FontLibrary, TextBrushRgba8, TextShaper},
    foundation::core::{CANVAS_UNITS, Rect},
    foundation::error::CoverResult,
    model::props::CoverProperties,
};

/// Uniform scale factor from canonical canvas units to a render target that
/// is `canvas_pixels` on a side.
pub fn scale_factor(canvas_pixels: f64) -> f64 {
    canvas_pixels / CANVAS_UNITS
}

/// Compute one line's text box for a `canvas_pixels`-wide render target.
///
/// `pos` and the paddings are canvas units; `line_height` is already in
/// output pixels (it comes from the resolved font, the single source of truth
/// for vertical box sizing). The box is vertically centered on the scaled
/// position. Width may come out non-positive when the paddings leave no room;
/// callers treat that as "render nothing".
pub fn text_box(
    canvas_pixels: f64,
    pos: f64,
    left_padding: f64,
    right_padding: f64,
    line_height: f64,
) -> Rect {
    let s = scale_factor(canvas_pixels);
    let x0 = s * left_padding;
    let width = canvas_pixels - s * (left_padding + right_padding);
    let y0 = s * pos - line_height / 2.0;
    Rect::new(x0, y0, x0 + width, y0 + line_height)
}

/// A laid-out text line, ready to draw: its text box in output pixels plus
/// the shaped Parley layout and the font it was shaped with.
#[derive(Clone)]
pub struct PlacedLine {
    /// Text box in output pixels; glyphs are drawn relative to its origin.
    pub rect: Rect,
    pub(crate) layout: Arc<parley::Layout<TextBrushRgba8>>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

impl PlacedLine {
    /// Line height in output pixels (the box height).
    pub fn line_height(&self) -> f64 {
        self.rect.height()
    }
}

impl std::fmt::Debug for PlacedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacedLine")
            .field("rect", &self.rect)
            .field("layout_ptr", &Arc::as_ptr(&self.layout))
            .finish()
    }
}

/// Lay out both caption lines of `props` for a square render target of
/// `canvas_pixels` pixels.
///
/// Empty lines, lines whose paddings leave a non-positive box width, and
/// lines with a degenerate font size are omitted from the result entirely, so
/// rendering the returned list produces zero visual artifact for them. The
/// same placement path serves the fixed 1500 px export and arbitrarily sized
/// interactive previews, which keeps the two geometrically equivalent up to
/// the scale factor.
pub fn place_lines(
    props: &CoverProperties,
    canvas_pixels: f64,
    fonts: &FontLibrary,
    shaper: &mut TextShaper,
) -> CoverResult<Vec<PlacedLine>> {
    let s = scale_factor(canvas_pixels);
    let mut placed = Vec::with_capacity(2);

    for line in props.lines() {
        if line.text.is_empty() {
            continue;
        }

        let box_width = canvas_pixels - s * (line.left_padding + line.right_padding);
        if box_width <= 0.0 {
            continue;
        }

        let size_px = (line.font_size * s) as f32;
        if !size_px.is_finite() || size_px <= 0.0 {
            continue;
        }

        let font = fonts.resolve(line.font_name);
        let brush = TextBrushRgba8 {
            r: line.color.r,
            g: line.color.g,
            b: line.color.b,
            a: line.color.a,
        };
        let layout = shaper.shape_line(
            line.text,
            &font,
            size_px,
            brush,
            box_width as f32,
            line.alignment,
        )?;

        let Some(line_height) = natural_line_height(&layout) else {
            continue;
        };

        let rect = text_box(
            canvas_pixels,
            line.pos,
            line.left_padding,
            line.right_padding,
            line_height,
        );
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.data().as_ref().clone()),
            0,
        );
        placed.push(PlacedLine {
            rect,
            layout: Arc::new(layout),
            font: font_data,
        });
    }

    Ok(placed)
}

fn natural_line_height(layout: &parley::Layout<TextBrushRgba8>) -> Option<f64> {
    let line = layout.lines().next()?;
    let m = line.metrics();
    Some(f64::from(m.ascent + m.descent + m.leading))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
