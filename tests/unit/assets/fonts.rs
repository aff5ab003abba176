use super::*;

#[test]
fn resolve_prefers_registered_name_and_falls_back_to_default() {
    let mut lib = FontLibrary::new(vec![1, 2, 3]);
    lib.register("Headline", vec![9, 9]);

    assert_eq!(lib.resolve("Headline").data().as_slice(), &[9, 9]);
    assert_eq!(lib.resolve("No Such Font").data().as_slice(), &[1, 2, 3]);
}

#[test]
fn load_dir_registers_font_files_by_stem() {
    let dir = std::env::temp_dir().join(format!("coverart-fonts-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("Cool Font.ttf"), [7u8, 7]).unwrap();
    std::fs::write(dir.join("notes.txt"), b"skip me").unwrap();

    let mut lib = FontLibrary::new(vec![0]);
    lib.load_dir(&dir);

    assert_eq!(lib.resolve("Cool Font").data().as_slice(), &[7, 7]);
    // Non-font files stay unregistered.
    assert_eq!(lib.resolve("notes").data().as_slice(), &[0]);
}

#[test]
fn shape_line_rejects_non_positive_sizes() {
    let lib = FontLibrary::new(vec![0]);
    let mut shaper = TextShaper::new();
    let err = match shaper.shape_line(
        "hi",
        &lib.resolve("x"),
        0.0,
        TextBrushRgba8::default(),
        100.0,
        TextAlignment::Left,
    ) {
        Ok(_) => panic!("expected shape_line to reject non-positive size"),
        Err(e) => e,
    };
    assert!(matches!(err, CoverError::Validation(_)));
}

#[test]
fn shape_line_aligns_within_container() {
    // Needs a real font; skipped when the host has none installed.
    let Ok(lib) = FontLibrary::with_system_default() else {
        return;
    };
    let font = lib.resolve("anything");
    let mut shaper = TextShaper::new();

    let mut first_glyph_x = |alignment: TextAlignment| -> f32 {
        let layout = shaper
            .shape_line(
                "Hi",
                &font,
                32.0,
                TextBrushRgba8::default(),
                600.0,
                alignment,
            )
            .unwrap();
        let line = layout.lines().next().unwrap();
        for item in line.items() {
            if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                if let Some(g) = run.positioned_glyphs().next() {
                    return g.x;
                }
            }
        }
        panic!("no glyphs shaped");
    };

    let left = first_glyph_x(TextAlignment::Left);
    let center = first_glyph_x(TextAlignment::Center);
    let right = first_glyph_x(TextAlignment::Right);
    assert!(left < center, "left {left} should precede center {center}");
    assert!(center < right, "center {center} should precede right {right}");
}
