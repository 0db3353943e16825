//! Parsing for catalog files and user-typed input.
//!
//! - videos.json: a JSON array of video records
//! - category keys typed on the command line or stored in preference files
//! - comma-separated tag lists and video URLs from the upload form

use crate::error::{CatalogError, Result};
use crate::types::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tempfile::NamedTempFile;

impl FromStr for Category {
    type Err = CatalogError;

    /// Accepts the snake_case key, case-insensitively.
    /// Dashes and spaces are read as underscores so "art-creativity" works too.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Category::ALL
            .into_iter()
            .find(|c| c.key() == normalized)
            .ok_or_else(|| CatalogError::InvalidValue {
                field: "category".to_string(),
                value: s.to_string(),
            })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse a catalog file
///
/// Format: `[{"id": "1", "title": ..., "category": "sports", ...}, ...]`
///
/// Each record is decoded separately so an error names the offending record.
pub fn parse_videos(path: &Path) -> Result<Vec<VideoRecord>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let raw: Vec<serde_json::Value> = serde_json::from_str(&content)?;
    let file = file_name(path);

    raw.into_iter()
        .enumerate()
        .map(|(idx, value)| {
            serde_json::from_value::<VideoRecord>(value).map_err(|e| CatalogError::ParseError {
                file: file.clone(),
                record: idx + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Write records back out in the same format `parse_videos` reads
pub fn write_videos(path: &Path, videos: &[VideoRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // Staged beside the target, then renamed over it
    let mut staged = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut staged, videos)?;
    staged.flush()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Split comma-separated tags
///
/// Example: "react, hooks,, " -> vec!["react", "hooks"]
pub fn parse_tags(s: &str) -> Vec<String> {
    s.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Whether a URL points directly at an .mp4 file
///
/// Example: "https://cdn/x.MP4?token=1" -> true
///          "https://youtube.com/watch?v=1" -> false
pub fn is_mp4_url(url: &str) -> bool {
    let url = url.trim().to_lowercase();
    let path = url.split('?').next().unwrap_or("");
    path.ends_with(".mp4")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!("sports".parse::<Category>().unwrap(), Category::Sports);
        assert_eq!("Art-Creativity".parse::<Category>().unwrap(), Category::ArtCreativity);
        assert!("cats".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_key_round_trips_through_serde() {
        let json = serde_json::to_string(&Category::ArtCreativity).unwrap();
        assert_eq!(json, "\"art_creativity\"");
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("react, hooks,, "), vec!["react", "hooks"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_is_mp4_url() {
        assert!(is_mp4_url("https://cdn.example.com/clip.mp4"));
        assert!(is_mp4_url("https://cdn.example.com/clip.MP4?token=abc"));
        assert!(!is_mp4_url("https://youtube.com/watch?v=mp4"));
        assert!(!is_mp4_url("https://cdn.example.com/clip.mp4.html"));
    }

    #[test]
    fn test_parse_videos_reports_bad_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videos.json");
        fs::write(
            &path,
            r#"[
                {"id": "1", "title": "ok", "video_url": "a.mp4", "category": "sports",
                 "created_at": "2024-07-01T10:00:00Z"},
                {"id": "2", "title": "bad", "video_url": "b.mp4", "category": "cats",
                 "created_at": "2024-07-01T10:00:00Z"}
            ]"#,
        )
        .unwrap();

        match parse_videos(&path) {
            Err(CatalogError::ParseError { record, .. }) => assert_eq!(record, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_videos_missing_file() {
        let result = parse_videos(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(CatalogError::FileNotFound { .. })));
    }
}
