//! Data transfer objects returned by application services

mod post_outcome;

pub use post_outcome::PostOutcome;
