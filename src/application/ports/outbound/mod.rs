//! Outbound ports - Interfaces that the application requires from external systems

mod delivery_port;
mod image_generation_port;

pub use delivery_port::DeliveryPort;
pub use image_generation_port::{GenerationError, ImageGenerationPort};
