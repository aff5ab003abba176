use std::sync::Arc;

use super::*;

fn quadrant_background() -> PreparedImage {
    // 2x2: red, green / blue, yellow. Stretched, each covers one quadrant.
    let data = vec![
        255, 0, 0, 255, 0, 255, 0, 255, //
        0, 0, 255, 255, 255, 255, 0, 255,
    ];
    PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new(data),
    }
}

fn solid_background(rgb: [u8; 3], side: u32) -> PreparedImage {
    let mut data = Vec::with_capacity((side * side * 4) as usize);
    for _ in 0..side * side {
        data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    PreparedImage {
        width: side,
        height: side,
        rgba8_premul: Arc::new(data),
    }
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn close(actual: [u8; 4], expected: [u8; 4]) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= 2)
}

#[test]
fn background_fills_canvas_stretched() {
    let fonts = FontLibrary::new(Vec::new());
    let props = CoverProperties {
        top_text: String::new(),
        bot_text: String::new(),
        ..CoverProperties::default()
    };

    let mut compositor = Compositor::new();
    let frame = compositor
        .render(&quadrant_background(), &props, &fonts)
        .unwrap();

    assert_eq!((frame.width, frame.height), (1500, 1500));
    assert_eq!(frame.data.len(), 1500 * 1500 * 4);
    assert!(close(pixel(&frame, 10, 10), [255, 0, 0, 255]));
    assert!(close(pixel(&frame, 1490, 10), [0, 255, 0, 255]));
    assert!(close(pixel(&frame, 10, 1490), [0, 0, 255, 255]));
    assert!(close(pixel(&frame, 1490, 1490), [255, 255, 0, 255]));
}

#[test]
fn erased_text_leaves_no_artifact() {
    let fonts = FontLibrary::new(Vec::new());
    let never_set = CoverProperties {
        top_text: String::new(),
        bot_text: String::new(),
        ..CoverProperties::default()
    };
    let mut erased = CoverProperties::default();
    erased.top_text.clear();
    erased.bot_text.clear();

    let bg = quadrant_background();
    let a = Compositor::new().render(&bg, &never_set, &fonts).unwrap();
    let b = Compositor::new().render(&bg, &erased, &fonts).unwrap();
    assert_eq!(a, b);
}

#[test]
fn identical_inputs_render_identical_pixels() {
    let fonts = FontLibrary::new(Vec::new());
    let props = CoverProperties {
        top_text: String::new(),
        bot_text: String::new(),
        ..CoverProperties::default()
    };
    let bg = quadrant_background();

    let mut compositor = Compositor::new();
    let first = compositor.render(&bg, &props, &fonts).unwrap();
    let second = compositor.render(&bg, &props, &fonts).unwrap();
    assert_eq!(first, second);
}

#[test]
fn oversized_and_zero_canvases_are_rejected() {
    let bg = quadrant_background();
    let mut compositor = Compositor::new();
    assert!(matches!(
        compositor.draw(70_000, &bg, &[]),
        Err(CoverError::Validation(_))
    ));
    assert!(matches!(
        compositor.draw(0, &bg, &[]),
        Err(CoverError::Validation(_))
    ));
}

#[test]
fn non_empty_text_changes_pixels_even_with_unresolvable_font_names() {
    // Needs a real font; skipped when the host has none installed.
    let Ok(fonts) = FontLibrary::with_system_default() else {
        return;
    };

    let bg = solid_background([10, 10, 40], 4);
    let with_text = CoverProperties::default(); // "Helvetica Bold" resolves to the fallback
    let without_text = CoverProperties {
        top_text: String::new(),
        bot_text: String::new(),
        ..CoverProperties::default()
    };

    let mut compositor = Compositor::new();
    let lettered = compositor.render(&bg, &with_text, &fonts).unwrap();
    let plain = compositor.render(&bg, &without_text, &fonts).unwrap();
    assert_ne!(lettered.data, plain.data);
}
