//! Cogwheel engine crate.
//!
//! Procedural gear meshes and the 4x4 matrix math they are drawn with, plus
//! the platform and GPU runtime the demo binaries are built on.

pub mod math;
pub mod mesh;

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
pub mod paint;
