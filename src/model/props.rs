use crate::foundation::core::{Rgba8, TextAlignment};

/// Default horizontal inset (in canvas units) applied by editing surfaces
/// when they reset a line's side paddings.
pub const DEFAULT_ALIGNMENT_PADDING: f64 = 100.0;

/// A complete cover parameter set.
///
/// This is a pure data model: a freely clonable snapshot of everything the
/// rendering pipeline needs to turn one background photo and two text lines
/// into pixels. All spatial fields are expressed in canvas units against the
/// canonical 1500x1500 grid (see [`crate::CANVAS_UNITS`]); rendering at any
/// other size applies one uniform scale factor.
///
/// Converting to and from the persisted representation is handled by
/// [`CoverProperties::from_record`] / [`CoverProperties::to_record`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoverProperties {
    /// Top caption content; empty means the top line is omitted entirely.
    pub top_text: String,
    /// Bottom caption content; empty means the bottom line is omitted entirely.
    pub bot_text: String,
    /// Vertical center of the top line's glyph box, in canvas units.
    pub top_pos: f64,
    /// Vertical center of the bottom line's glyph box, in canvas units.
    pub bot_pos: f64,
    /// Horizontal placement of the top line within its text box.
    pub top_text_alignment: TextAlignment,
    /// Horizontal placement of the bottom line within its text box.
    pub bot_text_alignment: TextAlignment,
    /// Logical font identifier for the top line.
    pub top_font_name: String,
    /// Logical font identifier for the bottom line.
    pub bot_font_name: String,
    /// Top line font size in canvas units.
    pub top_font_size: f64,
    /// Bottom line font size in canvas units.
    pub bot_font_size: f64,
    /// Top line fill color.
    pub top_font_color: Rgba8,
    /// Bottom line fill color.
    pub bot_font_color: Rgba8,
    /// Inset from the left canvas edge to the top line's text box.
    pub top_left_side_padding: f64,
    /// Inset from the right canvas edge to the top line's text box.
    pub top_right_side_padding: f64,
    /// Inset from the left canvas edge to the bottom line's text box.
    pub bot_left_side_padding: f64,
    /// Inset from the right canvas edge to the bottom line's text box.
    pub bot_right_side_padding: f64,
    /// Identifier of the background asset (resolved by the asset store).
    pub background_img_url: String,
    /// File extension of the background asset.
    pub background_img_type: String,
    /// Last-modification timestamp in epoch milliseconds, if ever persisted.
    ///
    /// Consumed only by the preview staleness check, which compares by
    /// inequality, never by ordering.
    pub date_edited: Option<u64>,
}

impl Default for CoverProperties {
    fn default() -> Self {
        Self {
            top_text: "My Dope".to_string(),
            bot_text: "Playlist".to_string(),
            top_pos: 150.0,
            bot_pos: 374.0,
            top_text_alignment: TextAlignment::Left,
            bot_text_alignment: TextAlignment::Left,
            top_font_name: "Helvetica Bold".to_string(),
            bot_font_name: "Helvetica".to_string(),
            top_font_size: 216.0,
            bot_font_size: 216.0,
            top_font_color: Rgba8::WHITE,
            bot_font_color: Rgba8::WHITE,
            top_left_side_padding: DEFAULT_ALIGNMENT_PADDING,
            top_right_side_padding: 0.0,
            bot_left_side_padding: DEFAULT_ALIGNMENT_PADDING,
            bot_right_side_padding: 0.0,
            background_img_url: "alexandru-acea".to_string(),
            background_img_type: "png".to_string(),
            date_edited: None,
        }
    }
}

/// Per-line view over [`CoverProperties`], used by the layout engine so the
/// top and bottom lines flow through one placement path.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LineParams<'a> {
    pub(crate) text: &'a str,
    pub(crate) pos: f64,
    pub(crate) alignment: TextAlignment,
    pub(crate) font_name: &'a str,
    pub(crate) font_size: f64,
    pub(crate) color: Rgba8,
    pub(crate) left_padding: f64,
    pub(crate) right_padding: f64,
}

impl CoverProperties {
    pub(crate) fn top_line(&self) -> LineParams<'_> {
        LineParams {
            text: &self.top_text,
            pos: self.top_pos,
            alignment: self.top_text_alignment,
            font_name: &self.top_font_name,
            font_size: self.top_font_size,
            color: self.top_font_color,
            left_padding: self.top_left_side_padding,
            right_padding: self.top_right_side_padding,
        }
    }

    pub(crate) fn bot_line(&self) -> LineParams<'_> {
        LineParams {
            text: &self.bot_text,
            pos: self.bot_pos,
            alignment: self.bot_text_alignment,
            font_name: &self.bot_font_name,
            font_size: self.bot_font_size,
            color: self.bot_font_color,
            left_padding: self.bot_left_side_padding,
            right_padding: self.bot_right_side_padding,
        }
    }

    /// Lines in draw order: top first, then bottom.
    pub(crate) fn lines(&self) -> [LineParams<'_>; 2] {
        [self.top_line(), self.bot_line()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/props.rs"]
mod tests;
