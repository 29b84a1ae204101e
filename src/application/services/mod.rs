//! Application services - Use case implementations
//!
//! The poster service is the single use case; the prompt builder holds the
//! pure text rendering it relies on.

pub mod poster_service;
pub mod prompt_builder;

pub use poster_service::PosterService;
pub use prompt_builder::PosterStyle;
