use std::sync::Arc;

use crate::{
    assets::fonts::{FontLibrary, TextShaper},
    assets::store::{BackgroundStore, PreparedImage},
    foundation::error::{CoverError, CoverResult},
    layout::engine::{PlacedLine, place_lines},
    model::props::CoverProperties,
    render::frame::FrameRGBA,
};

/// Side length of the canonical export canvas, in pixels.
///
/// The final render always happens at this size, where one canvas unit equals
/// exactly one pixel.
pub const COVER_SIZE_PX: u32 = 1500;

/// Rasterizes a background photo and the two laid-out caption lines into one
/// finished cover image.
///
/// Rendering is synchronous, single-threaded CPU work; callers that need it
/// off the interactive path offload the whole call to a worker. The render
/// context is pooled across calls of the same size.
pub struct Compositor {
    pub(crate) shaper: TextShaper,
    ctx: Option<vello_cpu::RenderContext>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// Construct a compositor with a fresh text shaper.
    pub fn new() -> Self {
        Self {
            shaper: TextShaper::new(),
            ctx: None,
        }
    }

    /// Render `props` over an already-decoded background at the canonical
    /// 1500x1500 export size.
    ///
    /// The background is stretched to fill the full canvas (background assets
    /// are expected pre-cropped square); each caption line is drawn only when
    /// non-empty. Compositing over a decoded image is total: font fallback
    /// makes text drawing infallible, so the returned error covers only
    /// internal raster failures.
    #[tracing::instrument(skip(self, background, props, fonts))]
    pub fn render(
        &mut self,
        background: &PreparedImage,
        props: &CoverProperties,
        fonts: &FontLibrary,
    ) -> CoverResult<FrameRGBA> {
        self.compose_at(COVER_SIZE_PX, background, props, fonts)
    }

    /// Load the background named by `props` from `store`, then render.
    ///
    /// This is the export entry point; a missing or undecodable background
    /// surfaces as [`CoverError::Asset`], the pipeline's one user-visible
    /// failure. Callers must not retry automatically.
    pub fn render_cover(
        &mut self,
        store: &BackgroundStore,
        props: &CoverProperties,
        fonts: &FontLibrary,
    ) -> CoverResult<FrameRGBA> {
        let background = store.load(&props.background_img_url, &props.background_img_type)?;
        self.render(&background, props, fonts)
    }

    pub(crate) fn compose_at(
        &mut self,
        canvas_pixels: u32,
        background: &PreparedImage,
        props: &CoverProperties,
        fonts: &FontLibrary,
    ) -> CoverResult<FrameRGBA> {
        let placed = place_lines(props, f64::from(canvas_pixels), fonts, &mut self.shaper)?;
        self.draw(canvas_pixels, background, &placed)
    }

    /// Draw an already-placed cover: opaque base, stretched background, then
    /// each line's glyph runs.
    pub(crate) fn draw(
        &mut self,
        canvas_pixels: u32,
        background: &PreparedImage,
        lines: &[PlacedLine],
    ) -> CoverResult<FrameRGBA> {
        let side: u16 = canvas_pixels
            .try_into()
            .map_err(|_| CoverError::validation("render size exceeds u16"))?;
        if side == 0 {
            return Err(CoverError::validation("render size must be > 0"));
        }

        let bg_paint = image_paint(background)?;
        let bg_w = f64::from(background.width);
        let bg_h = f64::from(background.height);
        let canvas = f64::from(canvas_pixels);

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == side && ctx.height() == side => ctx,
            _ => vello_cpu::RenderContext::new(side, side),
        };
        ctx.reset();

        // Opaque base; the stretched background normally covers all of it.
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, canvas, canvas));

        // Background stretched to fill, aspect ignored.
        ctx.set_transform(vello_cpu::kurbo::Affine::scale_non_uniform(
            canvas / bg_w,
            canvas / bg_h,
        ));
        ctx.set_paint(bg_paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, bg_w, bg_h));

        for line in lines {
            draw_line(&mut ctx, line);
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(side, side);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: canvas_pixels,
            height: canvas_pixels,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn draw_line(ctx: &mut vello_cpu::RenderContext, line: &PlacedLine) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        line.rect.x0,
        line.rect.y0,
    )));

    // The text box is one line tall; only the first shaped line is drawn.
    let Some(shaped) = line.layout.lines().next() else {
        return;
    };
    for item in shaped.items() {
        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
            continue;
        };
        let brush = run.style().brush;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            brush.r, brush.g, brush.b, brush.a,
        ));
        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        });
        ctx.glyph_run(&line.font)
            .font_size(run.run().font_size())
            .fill_glyphs(glyphs);
    }
}

fn image_paint(image: &PreparedImage) -> CoverResult<vello_cpu::Image> {
    let w: u16 = image
        .width
        .try_into()
        .map_err(|_| CoverError::render("background width exceeds u16"))?;
    let h: u16 = image
        .height
        .try_into()
        .map_err(|_| CoverError::render("background height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(CoverError::render("background has zero dimension"));
    }
    let expected = (image.width as usize)
        .saturating_mul(image.height as usize)
        .saturating_mul(4);
    if image.rgba8_premul.len() != expected {
        return Err(CoverError::render("background byte length mismatch"));
    }

    // Pixmap stores PremulRgba8; prepared backgrounds are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (image.width as usize) * (image.height as usize),
    );
    for px in image.rgba8_premul.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);

    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
