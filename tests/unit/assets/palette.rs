use std::sync::Arc;

use super::*;

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> PreparedImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(data),
    }
}

#[test]
fn solid_color_dominates() {
    let palette = extract_palette(&solid(16, 16, [180, 40, 40])).unwrap();
    let first = palette.colors()[0];
    // Bucket quantization loses the low 3 bits.
    assert!(first.r.abs_diff(180) <= 8);
    assert!(first.g.abs_diff(40) <= 8);
    assert!(first.b.abs_diff(40) <= 8);
}

#[test]
fn extreme_blacks_and_whites_yield_nothing() {
    assert_eq!(extract_palette(&solid(8, 8, [0, 0, 0])), None);
    assert_eq!(extract_palette(&solid(8, 8, [255, 255, 255])), None);
}

#[test]
fn palette_is_ordered_by_dominance() {
    // Two-thirds red, one-third blue.
    let mut data = Vec::new();
    for i in 0..(48 * 16) {
        if i % 3 == 2 {
            data.extend_from_slice(&[30, 30, 200, 255]);
        } else {
            data.extend_from_slice(&[200, 30, 30, 255]);
        }
    }
    let img = PreparedImage {
        width: 48,
        height: 16,
        rgba8_premul: Arc::new(data),
    };

    let palette = extract_palette(&img).unwrap();
    assert!(palette.colors().len() >= 2);
    let first = palette.colors()[0];
    let second = palette.colors()[1];
    assert!(first.r > first.b, "most dominant color should be red");
    assert!(second.b > second.r, "runner-up should be blue");
}

#[test]
fn extraction_is_deterministic() {
    let img = solid(32, 32, [90, 140, 60]);
    assert_eq!(extract_palette(&img), extract_palette(&img));
}
