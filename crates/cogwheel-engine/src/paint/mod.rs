//! Color model shared between hosts and renderers.

pub mod color;

pub use color::Color;
