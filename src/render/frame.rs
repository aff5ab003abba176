use crate::foundation::error::{CoverError, CoverResult};

/// A rendered cover as premultiplied RGBA8 bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Convert to a straight-alpha [`image::RgbaImage`] suitable for lossless
    /// PNG encoding by the export collaborator.
    ///
    /// Covers are composited over an opaque base, so this conversion is
    /// lossless for them (alpha is 255 everywhere and unpremultiplication is
    /// the identity).
    pub fn to_image(&self) -> CoverResult<image::RgbaImage> {
        let expected = (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4);
        if self.data.len() != expected {
            return Err(CoverError::render("frame byte length mismatch"));
        }

        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| CoverError::render("frame dimensions out of range"))
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in px.iter_mut().take(3) {
            let v = (u16::from(*c) * 255 + a / 2) / a;
            *c = v.min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
