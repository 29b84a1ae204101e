//! Creature entity - A selectable mob featured on a poster

use serde::{Deserialize, Serialize};

/// A creature (mob) that can be featured on a poster
///
/// The serialized field names match the roster override file format:
/// `{"id": "rugrat", "name": "RugRat", "desc": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureEntry {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "desc")]
    pub description: String,
}

impl CreatureEntry {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: description.into(),
        }
    }

    /// Case-insensitive exact match against the id or the display name
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        self.id.to_lowercase() == query || self.display_name.to_lowercase() == query
    }

    /// An entry is well-formed when both its id and its name carry text
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.display_name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_id_and_name_case_insensitively() {
        let entry = CreatureEntry::new("hopslime", "Hop Slime", "goo-based frog-slime");

        assert!(entry.matches("hopslime"));
        assert!(entry.matches("HOPSLIME"));
        assert!(entry.matches("hop slime"));
        assert!(entry.matches("  Hop Slime "));
        assert!(!entry.matches("hop"));
        assert!(!entry.matches("slime"));
    }

    #[test]
    fn test_deserializes_override_field_names() {
        let entry: CreatureEntry =
            serde_json::from_str(r#"{"id":"x","name":"X","desc":"d"}"#).unwrap();

        assert_eq!(entry, CreatureEntry::new("x", "X", "d"));
    }

    #[test]
    fn test_blank_id_is_not_well_formed() {
        assert!(!CreatureEntry::new("  ", "Name", "desc").is_well_formed());
        assert!(!CreatureEntry::new("id", "", "desc").is_well_formed());
        assert!(CreatureEntry::new("id", "Name", "").is_well_formed());
    }
}
