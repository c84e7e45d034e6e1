use std::collections::TryReserveError;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

/// Interleaved gear vertex (24 bytes).
///
///  offset  0  position  [f32; 3]   loc 0
///  offset 12  normal    [f32; 3]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GearVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// A run of consecutive vertices drawn as one triangle strip.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Strip {
    /// Index of the first vertex in the strip.
    pub first: u32,
    /// Number of consecutive vertices in the strip.
    pub count: u32,
}

impl Strip {
    #[inline]
    pub fn range(&self) -> Range<u32> {
        self.first..self.first + self.count
    }
}

/// Accumulates vertices and records strip boundaries as they are emitted.
///
/// Every `begin_strip` must be paired with an `end_strip`; vertices emitted
/// outside a strip still land in the vertex buffer but belong to no strip.
#[derive(Debug, Default)]
pub struct StripBuilder {
    vertices: Vec<GearVertex>,
    strips: Vec<Strip>,
    open: Option<u32>,
}

impl StripBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with storage reserved up front.
    pub fn with_capacity(vertices: usize, strips: usize) -> Result<Self, TryReserveError> {
        let mut b = Self::new();
        b.vertices.try_reserve_exact(vertices)?;
        b.strips.try_reserve_exact(strips)?;
        Ok(b)
    }

    pub fn begin_strip(&mut self) {
        debug_assert!(self.open.is_none(), "begin_strip called inside an open strip");
        self.open = Some(self.vertices.len() as u32);
    }

    pub fn emit_vertex(&mut self, position: [f32; 3], normal: [f32; 3]) {
        self.vertices.push(GearVertex { position, normal });
    }

    pub fn end_strip(&mut self) {
        let Some(first) = self.open.take() else {
            debug_assert!(false, "end_strip called without begin_strip");
            return;
        };
        let count = self.vertices.len() as u32 - first;
        self.strips.push(Strip { first, count });
    }

    /// Emits a side quad between 2D points `a` and `b`, spanning `z = ±half_width`.
    ///
    /// The normal is perpendicular to the `a → b` edge in the XY plane and left
    /// unnormalised. Emission order: `a` back, `a` front, `b` back, `b` front.
    pub fn quad_with_normal(&mut self, a: [f32; 2], b: [f32; 2], half_width: f32) {
        let normal = [a[1] - b[1], -(a[0] - b[0]), 0.0];
        self.emit_vertex([a[0], a[1], -half_width], normal);
        self.emit_vertex([a[0], a[1], half_width], normal);
        self.emit_vertex([b[0], b[1], -half_width], normal);
        self.emit_vertex([b[0], b[1], half_width], normal);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn strip_count(&self) -> usize {
        self.strips.len()
    }

    pub fn finish(self) -> (Vec<GearVertex>, Vec<Strip>) {
        debug_assert!(self.open.is_none(), "finish called with an open strip");
        (self.vertices, self.strips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_six_floats() {
        assert_eq!(std::mem::size_of::<GearVertex>(), 6 * std::mem::size_of::<f32>());
    }

    #[test]
    fn strips_record_first_and_count() {
        let mut b = StripBuilder::new();
        b.begin_strip();
        for i in 0..3 {
            b.emit_vertex([i as f32, 0.0, 0.0], [0.0, 0.0, 1.0]);
        }
        b.end_strip();
        b.begin_strip();
        b.quad_with_normal([0.0, 0.0], [1.0, 0.0], 0.5);
        b.end_strip();

        let (vertices, strips) = b.finish();
        assert_eq!(vertices.len(), 7);
        assert_eq!(strips, vec![Strip { first: 0, count: 3 }, Strip { first: 3, count: 4 }]);
        assert_eq!(strips[1].range(), 3..7);
    }

    #[test]
    fn quad_emission_order_and_normal() {
        let mut b = StripBuilder::new();
        b.begin_strip();
        b.quad_with_normal([1.0, 2.0], [3.0, 5.0], 0.25);
        b.end_strip();

        let (v, _) = b.finish();
        let z: Vec<f32> = v.iter().map(|v| v.position[2]).collect();
        assert_eq!(z, vec![-0.25, 0.25, -0.25, 0.25]);
        assert_eq!(v[0].position[..2], [1.0, 2.0]);
        assert_eq!(v[3].position[..2], [3.0, 5.0]);
        // (a.y - b.y, -(a.x - b.x), 0)
        assert!(v.iter().all(|v| v.normal == [-3.0, 2.0, 0.0]));
    }

    #[test]
    fn empty_strip_has_zero_count() {
        let mut b = StripBuilder::new();
        b.begin_strip();
        b.end_strip();
        assert_eq!(b.strip_count(), 1);
        let (_, strips) = b.finish();
        assert_eq!(strips[0].count, 0);
    }
}
