//! Transform math.
//!
//! A single 4x4 matrix type used to position and project geometry.
//! Layout and multiplication order follow the GLES2 convention so matrices
//! can be uploaded to shaders verbatim.

mod mat4;

pub use mat4::Mat4;
