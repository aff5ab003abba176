use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    foundation::core::{Rgba8, align_to_int, int_to_align},
    model::props::CoverProperties,
};

/// Persisted representation of a cover's parameters.
///
/// Mirrors the storage row one-to-one: every field is nullable, alignments
/// are small integer codes, colors are opaque archived blobs, and numeric
/// fields carry the storage layer's `f32` width. Schema and migrations belong
/// to the storage collaborator; this crate only constructs and reads records.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CoverRecord {
    /// Top caption content.
    pub top_text: Option<String>,
    /// Bottom caption content.
    pub bot_text: Option<String>,
    /// Vertical center of the top line, canvas units.
    pub top_pos: Option<f32>,
    /// Vertical center of the bottom line, canvas units.
    pub bot_pos: Option<f32>,
    /// Alignment code for the top line (0 left, 1 center, else right).
    pub top_text_alignment: Option<i16>,
    /// Alignment code for the bottom line (0 left, 1 center, else right).
    pub bot_text_alignment: Option<i16>,
    /// Logical font identifier for the top line.
    pub top_font_name: Option<String>,
    /// Logical font identifier for the bottom line.
    pub bot_font_name: Option<String>,
    /// Top line font size, canvas units.
    pub top_font_size: Option<f32>,
    /// Bottom line font size, canvas units.
    pub bot_font_size: Option<f32>,
    /// Archived color blob for the top line.
    pub top_font_color: Option<Vec<u8>>,
    /// Archived color blob for the bottom line.
    pub bot_font_color: Option<Vec<u8>>,
    /// Left inset of the top line's text box.
    pub top_left_side_padding: Option<f32>,
    /// Right inset of the top line's text box.
    pub top_right_side_padding: Option<f32>,
    /// Left inset of the bottom line's text box.
    pub bot_left_side_padding: Option<f32>,
    /// Right inset of the bottom line's text box.
    pub bot_right_side_padding: Option<f32>,
    /// Background asset identifier.
    pub background_img_url: Option<String>,
    /// Background asset file extension.
    pub background_img_type: Option<String>,
    /// Last-edit timestamp, epoch milliseconds.
    pub date_edited: Option<u64>,
}

/// Archive a color into its persisted blob form.
///
/// The encoding is a fixed-width 4-byte straight RGBA sequence. Encoding is
/// total; the `Option` return mirrors the storage column's nullability.
pub fn archive_color(color: Rgba8) -> Option<Vec<u8>> {
    Some(vec![color.r, color.g, color.b, color.a])
}

/// Unarchive a persisted color blob.
///
/// Any failure (absent blob, wrong length) yields opaque white rather than an
/// error; corrupt persisted color data must never prevent a cover from
/// loading.
pub fn unarchive_color(blob: Option<&[u8]>) -> Rgba8 {
    match blob {
        Some(&[r, g, b, a]) => Rgba8 { r, g, b, a },
        Some(other) => {
            tracing::debug!(len = other.len(), "corrupt archived color, using white");
            Rgba8::WHITE
        }
        None => Rgba8::WHITE,
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

impl CoverProperties {
    /// Build a parameter set from a persisted record.
    ///
    /// Total: every absent or malformed field falls back to a documented
    /// default (text to empty, font names to `"Helvetica"`, the background to
    /// the stock `"adrien-converse"` photo, numeric fields to the model
    /// defaults, colors to white).
    pub fn from_record(record: &CoverRecord) -> Self {
        let d = Self::default();

        Self {
            top_text: record.top_text.clone().unwrap_or_default(),
            bot_text: record.bot_text.clone().unwrap_or_default(),
            top_pos: record.top_pos.map(f64::from).unwrap_or(d.top_pos),
            bot_pos: record.bot_pos.map(f64::from).unwrap_or(d.bot_pos),
            top_text_alignment: int_to_align(record.top_text_alignment.unwrap_or(0)),
            bot_text_alignment: int_to_align(record.bot_text_alignment.unwrap_or(0)),
            top_font_name: record
                .top_font_name
                .clone()
                .unwrap_or_else(|| "Helvetica".to_string()),
            bot_font_name: record
                .bot_font_name
                .clone()
                .unwrap_or_else(|| "Helvetica".to_string()),
            top_font_size: record.top_font_size.map(f64::from).unwrap_or(d.top_font_size),
            bot_font_size: record.bot_font_size.map(f64::from).unwrap_or(d.bot_font_size),
            top_font_color: unarchive_color(record.top_font_color.as_deref()),
            bot_font_color: unarchive_color(record.bot_font_color.as_deref()),
            top_left_side_padding: record
                .top_left_side_padding
                .map(f64::from)
                .unwrap_or(d.top_left_side_padding),
            top_right_side_padding: record
                .top_right_side_padding
                .map(f64::from)
                .unwrap_or(d.top_right_side_padding),
            bot_left_side_padding: record
                .bot_left_side_padding
                .map(f64::from)
                .unwrap_or(d.bot_left_side_padding),
            bot_right_side_padding: record
                .bot_right_side_padding
                .map(f64::from)
                .unwrap_or(d.bot_right_side_padding),
            background_img_url: record
                .background_img_url
                .clone()
                .unwrap_or_else(|| "adrien-converse".to_string()),
            background_img_type: record
                .background_img_type
                .clone()
                .unwrap_or_else(|| "png".to_string()),
            date_edited: record.date_edited,
        }
    }

    /// Convert this parameter set into a persisted record.
    ///
    /// The record's `date_edited` is always stamped with the current time,
    /// never copied from the model: producing a record IS the edit event.
    pub fn to_record(&self) -> CoverRecord {
        CoverRecord {
            top_text: Some(self.top_text.clone()),
            bot_text: Some(self.bot_text.clone()),
            top_pos: Some(self.top_pos as f32),
            bot_pos: Some(self.bot_pos as f32),
            top_text_alignment: Some(align_to_int(self.top_text_alignment)),
            bot_text_alignment: Some(align_to_int(self.bot_text_alignment)),
            top_font_name: Some(self.top_font_name.clone()),
            bot_font_name: Some(self.bot_font_name.clone()),
            top_font_size: Some(self.top_font_size as f32),
            bot_font_size: Some(self.bot_font_size as f32),
            top_font_color: archive_color(self.top_font_color),
            bot_font_color: archive_color(self.bot_font_color),
            top_left_side_padding: Some(self.top_left_side_padding as f32),
            top_right_side_padding: Some(self.top_right_side_padding as f32),
            bot_left_side_padding: Some(self.bot_left_side_padding as f32),
            bot_right_side_padding: Some(self.bot_right_side_padding as f32),
            background_img_url: Some(self.background_img_url.clone()),
            background_img_type: Some(self.background_img_type.clone()),
            date_edited: Some(now_millis()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/record.rs"]
mod tests;
