/// Result of one produce-and-post occasion
///
/// On success `detail` is the posted mob's display name; on failure it is a
/// human-readable reason suitable for relaying to a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    pub success: bool,
    pub detail: String,
}

impl PostOutcome {
    pub fn posted(display_name: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: display_name.into(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}
