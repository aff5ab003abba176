use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    foundation::core::TextAlignment,
    foundation::error::{CoverError, CoverResult},
};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// A renderable font: raw font bytes resolved from a logical font name.
#[derive(Clone)]
pub struct ResolvedFont {
    bytes: Arc<Vec<u8>>,
}

impl ResolvedFont {
    /// Backing font-file bytes.
    pub fn data(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Registry mapping logical font names to font-file bytes.
///
/// Resolution is total: an unregistered name falls back to the library's
/// default font at the same size, so text drawing never fails on a bad font
/// name. The miss is logged at debug level only.
#[derive(Clone, Debug)]
pub struct FontLibrary {
    default_font: Arc<Vec<u8>>,
    by_name: HashMap<String, Arc<Vec<u8>>>,
}

impl FontLibrary {
    /// Create a library whose fallback font is `default_font_data`.
    pub fn new(default_font_data: Vec<u8>) -> Self {
        Self {
            default_font: Arc::new(default_font_data),
            by_name: HashMap::new(),
        }
    }

    /// Create a library using the first font file found in the platform's
    /// well-known font directories as the fallback.
    ///
    /// Fails with a validation error when no font file can be located; hosts
    /// that bundle their own fonts should prefer [`FontLibrary::new`].
    pub fn with_system_default() -> CoverResult<Self> {
        let bytes = find_system_font_file()
            .and_then(|p| std::fs::read(p).ok())
            .ok_or_else(|| CoverError::validation("no system font files found"))?;
        Ok(Self::new(bytes))
    }

    /// Register font bytes under a logical name, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.by_name.insert(name.into(), Arc::new(data));
    }

    /// Register every font file (`ttf`, `otf`, `ttc`) in `dir`, keyed by file
    /// stem. Unreadable entries are skipped.
    pub fn load_dir(&mut self, dir: &Path) {
        let Ok(rd) = std::fs::read_dir(dir) else {
            return;
        };

        for entry in rd.flatten() {
            let path = entry.path();
            if !path.is_file() || !is_font_file(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(bytes) = std::fs::read(&path) {
                self.register(stem.to_string(), bytes);
            }
        }
    }

    /// Resolve a logical font name to renderable font bytes.
    ///
    /// Total: unknown names resolve to the default font.
    pub fn resolve(&self, name: &str) -> ResolvedFont {
        match self.by_name.get(name) {
            Some(bytes) => ResolvedFont {
                bytes: bytes.clone(),
            },
            None => {
                tracing::debug!(name, "font name unresolved, using default font");
                ResolvedFont {
                    bytes: self.default_font.clone(),
                }
            }
        }
    }
}

fn is_font_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    ext == "ttf" || ext == "otf" || ext == "ttc"
}

fn find_system_font_file() -> Option<PathBuf> {
    let mut roots = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("C:\\Windows\\Fonts"),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        roots.push(PathBuf::from(home).join(".fonts"));
    }

    for root in roots {
        if let Some(found) = find_font_under(&root, 0) {
            return Some(found);
        }
    }
    None
}

fn find_font_under(dir: &Path, depth: usize) -> Option<PathBuf> {
    if depth > 4 {
        return None;
    }
    let rd = std::fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in rd.flatten() {
        let path = entry.path();
        if path.is_file() && is_font_file(&path) {
            return Some(path);
        }
        if path.is_dir() {
            subdirs.push(path);
        }
    }
    subdirs
        .into_iter()
        .find_map(|d| find_font_under(&d, depth + 1))
}

/// Stateful helper for shaping single text lines with Parley.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    /// Construct a shaper with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape one line of text at `size_px` and align it within a container of
    /// `container_width` pixels.
    ///
    /// The line is never wrapped: the text box is one line tall and overlong
    /// content overflows it, as the interactive editor shows it.
    pub fn shape_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        size_px: f32,
        brush: TextBrushRgba8,
        container_width: f32,
        alignment: TextAlignment,
    ) -> CoverResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CoverError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.data().as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CoverError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CoverError::validation("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            Some(container_width),
            parley_alignment(alignment),
            parley::AlignmentOptions::default(),
        );

        Ok(layout)
    }
}

fn parley_alignment(alignment: TextAlignment) -> parley::Alignment {
    match alignment {
        TextAlignment::Left => parley::Alignment::Left,
        TextAlignment::Center => parley::Alignment::Center,
        TextAlignment::Right => parley::Alignment::Right,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
