use image::imageops;

use crate::render::frame::FrameRGBA;

/// Derive a scaled-down copy of a rendered cover.
///
/// `None` in, `None` out. Scaling is uniform scale-to-fit: the result's
/// dimensions are `source * min(target_w/source_w, target_h/source_h)`, so
/// both stay within the target and aspect is preserved (a square cover with a
/// square target yields exactly the target square). The target is the final
/// pixel size; display-metric policy (screen fraction, pixel density) belongs
/// to callers.
pub fn thumbnail(source: Option<&FrameRGBA>, target_w: u32, target_h: u32) -> Option<FrameRGBA> {
    let src = source?;
    if target_w == 0 || target_h == 0 {
        return None;
    }

    let width_ratio = f64::from(target_w) / f64::from(src.width);
    let height_ratio = f64::from(target_h) / f64::from(src.height);
    let ratio = if width_ratio > height_ratio {
        height_ratio
    } else {
        width_ratio
    };

    let new_w = ((f64::from(src.width) * ratio).round() as u32).max(1);
    let new_h = ((f64::from(src.height) * ratio).round() as u32).max(1);

    let rgba = image::RgbaImage::from_raw(src.width, src.height, src.data.clone())?;
    let resized = imageops::resize(&rgba, new_w, new_h, imageops::FilterType::Triangle);

    Some(FrameRGBA {
        width: new_w,
        height: new_h,
        data: resized.into_raw(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/thumbnail.rs"]
mod tests;
