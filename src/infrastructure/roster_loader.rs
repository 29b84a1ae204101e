//! Roster loading - Built-in mobs with an optional JSON override file

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::{CreatureEntry, EmptyRoster, Roster};

#[derive(Debug, thiserror::Error)]
pub enum RosterLoadError {
    #[error("Failed to read roster override {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid roster override JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Roster override contains no mobs")]
    Empty(#[from] EmptyRoster),
    #[error("Roster override entry {index} has a blank id or name")]
    MalformedEntry { index: usize },
}

/// Load the roster once at startup
///
/// Any problem with the override degrades to the built-in mobs.
pub fn load_roster(override_path: Option<&Path>) -> Roster {
    let Some(path) = override_path else {
        return Roster::builtin();
    };

    match read_override(path) {
        Ok(roster) => {
            tracing::info!("Loaded {} mobs from {}", roster.len(), path.display());
            roster
        }
        Err(e) => {
            tracing::warn!("{}; using built-in mobs", e);
            Roster::builtin()
        }
    }
}

/// Read and validate a roster override file (a JSON array of mobs)
pub fn read_override(path: &Path) -> Result<Roster, RosterLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| RosterLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<CreatureEntry> = serde_json::from_str(&raw)?;
    if let Some(index) = entries.iter().position(|entry| !entry.is_well_formed()) {
        return Err(RosterLoadError::MalformedEntry { index });
    }

    Ok(Roster::new(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn override_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_override_replaces_defaults() {
        let file = override_file(r#"[{"id":"x","name":"X","desc":"d"}]"#);

        let roster = load_roster(Some(file.path()));

        assert_eq!(roster.entries(), &[CreatureEntry::new("x", "X", "d")]);
    }

    #[test]
    fn test_override_keeps_file_order() {
        let file = override_file(
            r#"[
                {"id":"b","name":"Bee","desc":"buzz"},
                {"id":"a","name":"Ant","desc":"march"}
            ]"#,
        );

        let roster = load_roster(Some(file.path()));
        let ids: Vec<&str> = roster.entries().iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_malformed_override_falls_back() {
        for contents in [
            "{not json",
            "[]",
            r#"{"id":"x","name":"X","desc":"d"}"#,
            r#"[{"id":"x","name":"X"}]"#,
            r#"[{"id":"","name":"X","desc":"d"}]"#,
            r#"[{"id":"x","name":"X","desc":42}]"#,
        ] {
            let file = override_file(contents);
            assert_eq!(
                load_roster(Some(file.path())),
                Roster::builtin(),
                "override {:?} should fall back",
                contents
            );
        }
    }

    #[test]
    fn test_missing_override_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mobs.json");

        assert_eq!(load_roster(Some(&path)), Roster::builtin());
        assert!(matches!(
            read_override(&path),
            Err(RosterLoadError::Io { .. })
        ));
    }

    #[test]
    fn test_no_override_uses_builtin() {
        assert_eq!(load_roster(None), Roster::builtin());
    }

    #[test]
    fn test_read_override_reports_error_kind() {
        let empty = override_file("[]");
        assert!(matches!(read_override(empty.path()), Err(RosterLoadError::Empty(EmptyRoster))));

        let blank = override_file(r#"[{"id":"ok","name":"Ok","desc":""},{"id":"x","name":" ","desc":"d"}]"#);
        assert!(matches!(
            read_override(blank.path()),
            Err(RosterLoadError::MalformedEntry { index: 1 })
        ));
    }
}
