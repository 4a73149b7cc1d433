//! Overlay resources
//!
//! Handle materials live here; geometry is owned by the overlay scene.

pub mod material;

// Re-export main types
pub use material::{EmissiveMaterial, MaterialId, MaterialManager};
