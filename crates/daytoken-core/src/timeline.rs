//! Status history timeline entries
//!
//! Plain data for the operation status feed plus the row-connector geometry
//! the renderer needs. The feed itself is fetched elsewhere; nothing here
//! performs I/O.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the operation status history feed.
///
/// Field names follow the feed's camelCase JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub id: Uuid,
    pub title: String,

    /// Pre-formatted display date, e.g. "12/10/25"
    pub date_string: String,

    /// Dot color tag, e.g. "#007AFF"
    pub color_hex: String,

    /// Title color tag
    pub title_color_hex: String,

    /// Whether this entry is the current status
    pub is_current: bool,
}

/// Which side(s) of a timeline row the connecting line is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDirection {
    Top,
    Bottom,
    Both,
    None,
}

/// Connector direction for the row at `index` in a feed of `total` rows.
///
/// The first row connects downward, the last upward, middle rows both ways;
/// a single-row feed has no connector.
pub fn line_direction(index: usize, total: usize) -> LineDirection {
    if total <= 1 {
        return LineDirection::None;
    }
    if index == 0 {
        LineDirection::Bottom
    } else if index == total - 1 {
        LineDirection::Top
    } else {
        LineDirection::Both
    }
}

/// Parse a `#RRGGBB` or `#AARRGGBB` color tag into `[a, r, g, b]` bytes.
///
/// Six-digit tags get full alpha. Returns `None` for any other shape.
pub fn parse_color_tag(tag: &str) -> Option<[u8; 4]> {
    let digits = tag.trim().strip_prefix('#').unwrap_or(tag.trim());
    let value = u32::from_str_radix(digits, 16).ok()?;

    match digits.len() {
        6 => Some([
            0xFF,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ]),
        8 => Some([
            (value >> 24) as u8,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_direction_small_feeds() {
        assert_eq!(line_direction(0, 0), LineDirection::None);
        assert_eq!(line_direction(0, 1), LineDirection::None);
        assert_eq!(line_direction(0, 2), LineDirection::Bottom);
        assert_eq!(line_direction(1, 2), LineDirection::Top);
    }

    #[test]
    fn test_line_direction_middle_rows() {
        assert_eq!(line_direction(0, 4), LineDirection::Bottom);
        assert_eq!(line_direction(1, 4), LineDirection::Both);
        assert_eq!(line_direction(2, 4), LineDirection::Both);
        assert_eq!(line_direction(3, 4), LineDirection::Top);
    }

    #[test]
    fn test_parse_rgb_tag() {
        assert_eq!(parse_color_tag("#007AFF"), Some([0xFF, 0x00, 0x7A, 0xFF]));
        assert_eq!(parse_color_tag("ADD8E6"), Some([0xFF, 0xAD, 0xD8, 0xE6]));
    }

    #[test]
    fn test_parse_argb_tag() {
        assert_eq!(
            parse_color_tag("#80FF0000"),
            Some([0x80, 0xFF, 0x00, 0x00])
        );
    }

    #[test]
    fn test_parse_rejects_malformed_tags() {
        assert_eq!(parse_color_tag(""), None);
        assert_eq!(parse_color_tag("#FFF"), None);
        assert_eq!(parse_color_tag("#GGGGGG"), None);
        assert_eq!(parse_color_tag("#0011223344"), None);
    }

    #[test]
    fn test_status_entry_json_shape() {
        let json = r##"{
            "id": "6f0f3a2e-1bb0-4a87-9f6b-8a2f3f9a1c11",
            "title": "Request received",
            "dateString": "12/10/25",
            "colorHex": "#007AFF",
            "titleColorHex": "#007AFF",
            "isCurrent": false
        }"##;
        let entry: StatusEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.title, "Request received");
        assert_eq!(entry.date_string, "12/10/25");
        assert!(!entry.is_current);
    }
}
