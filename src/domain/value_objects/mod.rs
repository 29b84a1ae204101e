//! Value objects - Immutable objects defined by their attributes

mod generated_image;
mod prompt;
mod selection;

pub use generated_image::GeneratedImage;
pub use prompt::PromptText;
pub use selection::SelectionResult;
