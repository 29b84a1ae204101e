//! Selection result - The mob chosen for one posting occasion

use crate::domain::entities::CreatureEntry;

/// The outcome of selecting a mob for an occasion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub entry: CreatureEntry,
    /// When set, the prompt asks for a minor cosmetic deviation
    pub is_variant: bool,
}

impl SelectionResult {
    pub fn new(entry: CreatureEntry, is_variant: bool) -> Self {
        Self { entry, is_variant }
    }
}
