//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers, bind groups),
//! builds them lazily on first use and rebuilds the pipeline when the target
//! formats change.
//!
//! Convention:
//! - matrices are [`Mat4`](crate::math::Mat4) uploaded as-is
//! - attachments arrive already cleared; renderers load and store them

mod ctx;
pub mod gears;
pub mod shader_quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use gears::{Gear, GearDraw, GearRenderer, GearUniforms, DEFAULT_LIGHT};
pub use shader_quad::{
    shader_capabilities, ShaderError, ShaderQuadProgram, ShaderQuadRenderer, ShaderQuadTexture, ShaderSource,
    TextureError,
};
