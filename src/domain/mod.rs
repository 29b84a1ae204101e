//! Domain layer - Core poster logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Creature entries (mobs) and the roster they live in
//! - Value Objects: Selection results, prompt text, generated images
//! - Domain Services: Pure selection policy

pub mod entities;
pub mod services;
pub mod value_objects;
