//! Status history feed
//!
//! Loads the ordered status timeline for an operation from a local JSON
//! file. The production feed comes from the backend; the sample feed mirrors
//! the shape the renderer expects.

use std::path::Path;

use uuid::Uuid;

use daytoken_core::StatusEntry;

use crate::error::Result;

/// Load a status feed from a JSON array file
pub fn load_from_file(path: &Path) -> Result<Vec<StatusEntry>> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<StatusEntry> = serde_json::from_str(&content)?;
    Ok(entries)
}

/// Built-in three-step feed used when no history file is configured
pub fn sample_feed() -> Vec<StatusEntry> {
    [
        ("Request received", "12/10/25", false),
        ("Processing", "13/10/25", false),
        ("Completed", "14/10/25", true),
    ]
    .into_iter()
    .map(|(title, date, is_current)| StatusEntry {
        id: Uuid::new_v4(),
        title: title.to_string(),
        date_string: date.to_string(),
        color_hex: "#007AFF".to_string(),
        title_color_hex: "#007AFF".to_string(),
        is_current,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_sample_feed_shape() {
        let feed = sample_feed();
        assert_eq!(feed.len(), 3);
        assert!(feed.last().unwrap().is_current);
        assert_eq!(feed.iter().filter(|e| e.is_current).count(), 1);
    }

    #[test]
    fn test_load_from_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&sample_feed()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_from_file(file.path()).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].title, "Request received");
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not a feed }").unwrap();

        assert!(load_from_file(file.path()).is_err());
    }
}
