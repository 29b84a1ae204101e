//! Roster entity - The ordered set of selectable mobs

use super::CreatureEntry;

/// Error returned when a roster would be constructed without entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("roster must contain at least one entry")]
pub struct EmptyRoster;

/// An immutable, never-empty, ordered list of creature entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<CreatureEntry>,
}

impl Roster {
    pub fn new(entries: Vec<CreatureEntry>) -> Result<Self, EmptyRoster> {
        if entries.is_empty() {
            return Err(EmptyRoster);
        }
        Ok(Self { entries })
    }

    /// The built-in MegaGrok mobs
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                CreatureEntry::new(
                    "rugrat",
                    "RugRat",
                    "tiny rodent-like liquidity gremlin holding a miniature rug, neon red accents, glowing eyes, cosmic glitch effects",
                ),
                CreatureEntry::new(
                    "hopslime",
                    "Hop Slime",
                    "goo-based frog-slime with translucent green body and floating bubbles",
                ),
                CreatureEntry::new(
                    "fudling",
                    "FUDling",
                    "small furry creature with glowing purple eyes and faint shadow aura",
                ),
                CreatureEntry::new(
                    "hopgoblin",
                    "HopGoblin",
                    "small goblin with spiked club and mischievous grin",
                ),
                CreatureEntry::new(
                    "croakling",
                    "Croakling",
                    "frog-like fighter with a fierce expression and muscular cartoon proportions",
                ),
            ],
        }
    }

    /// Look up an entry by id or display name
    ///
    /// Case-insensitive exact match; the first matching entry wins.
    pub fn find_by_name_or_id(&self, query: &str) -> Option<&CreatureEntry> {
        self.entries.iter().find(|entry| entry.matches(query))
    }

    pub fn entries(&self) -> &[CreatureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::builtin()
    }
}
