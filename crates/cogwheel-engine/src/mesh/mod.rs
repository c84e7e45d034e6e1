//! Procedural gear geometry.
//!
//! Meshes are plain CPU data (vertices + triangle-strip ranges). Uploading
//! them to the GPU happens separately in `render::gears`.

mod builder;
mod error;
mod gear;

pub use builder::{GearVertex, Strip, StripBuilder};
pub use error::GearError;
pub use gear::{create_gear, GearMesh, GearParams, STRIPS_PER_TOOTH, VERTICES_PER_TOOTH};
