use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::decode::decode_background,
    foundation::error::{CoverError, CoverResult},
};

/// Prepared raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Filesystem-backed loader for background photos.
///
/// Backgrounds are identified by a logical name plus a file extension (the
/// model's `background_img_url` / `background_img_type` pair) and resolved
/// relative to a single root directory. A missing or undecodable file is the
/// compositor's sole failure trigger; everything else in the pipeline
/// degrades to defaults.
#[derive(Clone, Debug)]
pub struct BackgroundStore {
    root: PathBuf,
}

impl BackgroundStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Return the root directory used when resolving background identifiers.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load and decode the background identified by `url` and `img_type`.
    ///
    /// Resolves `<root>/<url>.<img_type>` (or `<root>/<url>` when the type is
    /// empty). Failure is reported as [`CoverError::Asset`].
    pub fn load(&self, url: &str, img_type: &str) -> CoverResult<PreparedImage> {
        let file = if img_type.is_empty() {
            url.to_string()
        } else {
            format!("{url}.{img_type}")
        };
        let norm = normalize_rel_path(&file)?;
        let path = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&path)
            .map_err(|e| CoverError::asset(format!("read background '{}': {e}", path.display())))?;
        decode_background(&bytes)
    }
}

/// Normalize and validate store-relative background paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> CoverResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(CoverError::validation("background paths must be relative"));
    }
    if s.is_empty() {
        return Err(CoverError::validation("background path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CoverError::validation(
                "background paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(CoverError::validation(
            "background path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
