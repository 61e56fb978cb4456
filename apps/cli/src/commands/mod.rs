pub mod check;
pub mod collections;
pub mod deck;
pub mod parse;
pub mod quiz;

use crate::config::AppConfig;
use crate::db::SqliteRepository;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Open the collection database, creating its directory if needed.
pub fn open_repository(config: &AppConfig) -> Result<SqliteRepository> {
    if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    SqliteRepository::open(&config.db_path)
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))
}

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Drop markup tags and decode entities for terminal display.
///
/// Only `<name` or `</name` opens a tag, so a bare `<` in prose is kept.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let name = after.strip_prefix('/').unwrap_or(after);
        let is_tag = name.starts_with(|c: char| c.is_ascii_alphabetic());

        match after.find('>') {
            Some(close) if is_tag => rest = &after[close + 1..],
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    html_escape::decode_html_entities(out.trim()).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_paragraph_tags() {
        assert_eq!(
            strip_tags("<p>The capital city of Japan is _____.</p>"),
            "The capital city of Japan is _____."
        );
        assert_eq!(strip_tags("plain 3 > 2"), "plain 3 > 2");
    }

    #[test]
    fn keeps_bare_less_than() {
        assert_eq!(
            strip_tags("<p>Since 3 < 5 the answer is _____.</p>"),
            "Since 3 < 5 the answer is _____."
        );
        assert_eq!(strip_tags("x <5 and <p unclosed"), "x <5 and <p unclosed");
    }

    #[test]
    fn decodes_entities_after_stripping() {
        assert_eq!(
            strip_tags("<p>Tom &amp; Jerry wrote &lt;b&gt; _____</p>"),
            "Tom & Jerry wrote <b> _____"
        );
    }

    #[test]
    fn creates_missing_database_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::from_lookup(|_| None).unwrap();
        config.db_path = dir.path().join("nested").join("quiz.db");

        open_repository(&config).unwrap();
        assert!(config.db_path.exists());
    }
}
