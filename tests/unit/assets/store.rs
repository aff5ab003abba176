use std::io::Cursor;
use std::path::PathBuf;

use super::*;

fn temp_root(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "coverart-store-{tag}-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &std::path::Path, color: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(color));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, buf).unwrap();
}

#[test]
fn normalize_rejects_absolute_empty_and_traversal() {
    assert!(normalize_rel_path("/abs/p.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("a/../b.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn normalize_cleans_separators_and_dot_segments() {
    assert_eq!(normalize_rel_path("a\\b\\c.png").unwrap(), "a/b/c.png");
    assert_eq!(normalize_rel_path("./a//b/./c.png").unwrap(), "a/b/c.png");
}

#[test]
fn load_reads_and_decodes_relative_to_root() {
    let root = temp_root("load");
    write_png(&root.join("bg.png"), [10, 20, 30, 255]);

    let store = BackgroundStore::new(&root);
    let img = store.load("bg", "png").unwrap();
    assert_eq!((img.width, img.height), (2, 2));
    assert_eq!(&img.rgba8_premul[0..4], &[10, 20, 30, 255]);
}

#[test]
fn missing_background_is_an_asset_error() {
    let root = temp_root("missing");
    let store = BackgroundStore::new(&root);
    let err = store.load("nope", "png").unwrap_err();
    assert!(matches!(err, CoverError::Asset(_)));
}

#[test]
fn empty_type_loads_bare_file_name() {
    let root = temp_root("bare");
    write_png(&root.join("plain"), [1, 2, 3, 255]);

    let store = BackgroundStore::new(&root);
    assert!(store.load("plain", "").is_ok());
}
