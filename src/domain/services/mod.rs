//! Domain services - Pure business logic operations

mod selector;

pub use selector::{SelectionNotFound, Selector, DEFAULT_VARIANT_PROBABILITY};
