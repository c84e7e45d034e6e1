use std::f32::consts::PI;

use super::builder::{GearVertex, Strip, StripBuilder};
use super::error::GearError;

/// Strips per tooth: front face, inner face, back face, four outer quads.
pub const STRIPS_PER_TOOTH: usize = 7;

/// Vertices per tooth: `7 + 4 + 7 + 4 * 4`.
pub const VERTICES_PER_TOOTH: usize = 34;

/// Geometric description of a gear wheel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GearParams {
    /// Radius of the hole at the center.
    pub inner_radius: f32,
    /// Radius at the center of the teeth.
    pub outer_radius: f32,
    /// Thickness along Z.
    pub width: f32,
    /// Number of teeth.
    pub teeth: u32,
    /// Radial depth of a tooth.
    pub tooth_depth: f32,
}

impl GearParams {
    pub const fn new(
        inner_radius: f32,
        outer_radius: f32,
        width: f32,
        teeth: u32,
        tooth_depth: f32,
    ) -> Self {
        Self { inner_radius, outer_radius, width, teeth, tooth_depth }
    }

    /// Checks the generator preconditions.
    pub fn validate(&self) -> Result<(), GearError> {
        let invalid = |name, reason| Err(GearError::InvalidParameter { name, reason });

        for (name, v) in [
            ("inner_radius", self.inner_radius),
            ("outer_radius", self.outer_radius),
            ("width", self.width),
            ("tooth_depth", self.tooth_depth),
        ] {
            if !v.is_finite() {
                return invalid(name, "must be finite");
            }
        }

        if self.teeth == 0 {
            return invalid("teeth", "must be at least 1");
        }
        if self.inner_radius <= 0.0 {
            return invalid("inner_radius", "must be positive");
        }
        if self.outer_radius <= self.inner_radius {
            return invalid("outer_radius", "must exceed inner_radius");
        }
        if self.width <= 0.0 {
            return invalid("width", "must be positive");
        }
        if self.tooth_depth < 0.0 {
            return invalid("tooth_depth", "must not be negative");
        }
        Ok(())
    }
}

/// CPU-side gear geometry.
#[derive(Debug, Clone)]
pub struct GearMesh {
    params: GearParams,
    vertices: Vec<GearVertex>,
    strips: Vec<Strip>,
}

/// Shorthand for [`GearMesh::generate`].
pub fn create_gear(
    inner_radius: f32,
    outer_radius: f32,
    width: f32,
    teeth: u32,
    tooth_depth: f32,
) -> Result<GearMesh, GearError> {
    GearMesh::generate(&GearParams::new(inner_radius, outer_radius, width, teeth, tooth_depth))
}

impl GearMesh {
    /// Generates the triangle strips of a gear wheel.
    pub fn generate(params: &GearParams) -> Result<Self, GearError> {
        params.validate()?;

        let teeth = params.teeth as usize;
        let mut b = StripBuilder::with_capacity(
            VERTICES_PER_TOOTH * teeth,
            STRIPS_PER_TOOTH * teeth,
        )?;

        let r0 = params.inner_radius;
        let r1 = params.outer_radius - params.tooth_depth / 2.0;
        let r2 = params.outer_radius + params.tooth_depth / 2.0;
        let hw = params.width * 0.5;

        let step = 2.0 * PI / params.teeth as f32;
        let da = step / 4.0;

        for i in 0..teeth {
            let base = i as f32 * step;
            let sc: [(f32, f32); 5] = std::array::from_fn(|k| (base + da * k as f32).sin_cos());
            let point = |r: f32, k: usize| [r * sc[k].1, r * sc[k].0];

            // Tip corners at r2, shoulders at r1, bore points at r0.
            let p = [
                point(r2, 1),
                point(r2, 2),
                point(r1, 0),
                point(r1, 3),
                point(r0, 0),
                point(r1, 4),
                point(r0, 4),
            ];

            // front
            b.begin_strip();
            for q in &p {
                b.emit_vertex([q[0], q[1], hw], [0.0, 0.0, 1.0]);
            }
            b.end_strip();

            // inner
            b.begin_strip();
            b.quad_with_normal(p[4], p[6], hw);
            b.end_strip();

            // back
            b.begin_strip();
            for q in p.iter().rev() {
                b.emit_vertex([q[0], q[1], -hw], [0.0, 0.0, -1.0]);
            }
            b.end_strip();

            // outer
            for (a, c) in [(0, 2), (1, 0), (3, 1), (5, 3)] {
                b.begin_strip();
                b.quad_with_normal(p[a], p[c], hw);
                b.end_strip();
            }
        }

        debug_assert_eq!(b.vertex_count(), VERTICES_PER_TOOTH * teeth);
        debug_assert_eq!(b.strip_count(), STRIPS_PER_TOOTH * teeth);

        let (vertices, strips) = b.finish();
        log::debug!(
            "generated gear: {} teeth, {} vertices, {} strips",
            params.teeth,
            vertices.len(),
            strips.len()
        );

        Ok(Self { params: *params, vertices, strips })
    }

    pub fn params(&self) -> &GearParams {
        &self.params
    }

    pub fn vertices(&self) -> &[GearVertex] {
        &self.vertices
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn strip_count(&self) -> usize {
        self.strips.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn gear1() -> GearMesh {
        create_gear(1.0, 4.0, 1.0, 20, 0.7).unwrap()
    }

    fn radius(v: &GearVertex) -> f32 {
        (v.position[0] * v.position[0] + v.position[1] * v.position[1]).sqrt()
    }

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn reference_gear_counts() {
        let g = gear1();
        assert_eq!(g.vertex_count(), 680);
        assert_eq!(g.strip_count(), 140);
    }

    #[test]
    fn counts_scale_with_teeth() {
        for teeth in [1u32, 2, 3, 7, 10, 64] {
            let g = create_gear(0.5, 2.0, 2.0, teeth, 0.7).unwrap();
            assert_eq!(g.vertex_count(), 34 * teeth as usize);
            assert_eq!(g.strip_count(), 7 * teeth as usize);
        }
    }

    #[test]
    fn strips_are_contiguous_and_cover_all_vertices() {
        let g = gear1();
        let mut next = 0u32;
        for s in g.strips() {
            assert_eq!(s.first, next);
            assert!(s.count > 0);
            next += s.count;
        }
        assert_eq!(next as usize, g.vertex_count());
    }

    #[test]
    fn strip_sizes_per_tooth() {
        let g = create_gear(1.3, 2.0, 0.5, 10, 0.7).unwrap();
        for tooth in g.strips().chunks(STRIPS_PER_TOOTH) {
            let counts: Vec<u32> = tooth.iter().map(|s| s.count).collect();
            assert_eq!(counts, vec![7, 4, 7, 4, 4, 4, 4]);
        }
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn face_normals_and_depth() {
        let g = gear1();
        let v = g.vertices();
        for tooth in g.strips().chunks(STRIPS_PER_TOOTH) {
            for vert in &v[tooth[0].range().start as usize..tooth[0].range().end as usize] {
                assert_eq!(vert.normal, [0.0, 0.0, 1.0]);
                assert_eq!(vert.position[2], 0.5);
            }
            for vert in &v[tooth[2].range().start as usize..tooth[2].range().end as usize] {
                assert_eq!(vert.normal, [0.0, 0.0, -1.0]);
                assert_eq!(vert.position[2], -0.5);
            }
        }
    }

    #[test]
    fn back_face_reverses_front_face() {
        let g = gear1();
        let v = g.vertices();
        let front = &v[0..7];
        let back = &v[11..18];
        for (f, b) in front.iter().zip(back.iter().rev()) {
            assert_eq!(f.position[..2], b.position[..2]);
        }
    }

    #[test]
    fn radii_stay_within_tooth_profile() {
        let g = gear1();
        let (r_min, r_max) = (1.0, 4.0 + 0.35);
        for v in g.vertices() {
            let r = radius(v);
            assert!(r >= r_min - 1e-4 && r <= r_max + 1e-4, "radius {r} out of range");
        }
        // Tooth tips reach r2.
        assert_abs_diff_eq!(radius(&g.vertices()[0]), r_max, epsilon = 1e-5);
    }

    #[test]
    fn quad_normals_are_perpendicular_to_edges() {
        let g = gear1();
        let v = g.vertices();
        for s in g.strips().iter().filter(|s| s.count == 4) {
            let a = &v[s.first as usize];
            let b = &v[s.first as usize + 2];
            let edge = [b.position[0] - a.position[0], b.position[1] - a.position[1]];
            let dot = edge[0] * a.normal[0] + edge[1] * a.normal[1];
            assert_abs_diff_eq!(dot, 0.0, epsilon = 1e-5);
            assert_eq!(a.normal[2], 0.0);
        }
    }

    #[test]
    fn outer_quads_face_outward() {
        let g = gear1();
        let v = g.vertices();
        for tooth in g.strips().chunks(STRIPS_PER_TOOTH) {
            for s in &tooth[3..] {
                let a = &v[s.first as usize];
                let b = &v[s.first as usize + 2];
                let mid = [
                    (a.position[0] + b.position[0]) * 0.5,
                    (a.position[1] + b.position[1]) * 0.5,
                ];
                let dot = mid[0] * a.normal[0] + mid[1] * a.normal[1];
                assert!(dot > 0.0);
            }
        }
    }

    #[test]
    fn first_tooth_starts_on_positive_x_axis() {
        let g = gear1();
        // p2 = (r1, angle 0) is the third front-face vertex.
        let p2 = g.vertices()[2].position;
        assert_abs_diff_eq!(p2[0], 4.0 - 0.35, epsilon = 1e-6);
        assert_abs_diff_eq!(p2[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_tooth_depth_is_allowed() {
        let g = create_gear(1.0, 2.0, 1.0, 4, 0.0).unwrap();
        assert_eq!(g.vertex_count(), 34 * 4);
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn rejects_invalid_parameters() {
        let bad = [
            GearParams::new(1.0, 4.0, 1.0, 0, 0.7),
            GearParams::new(0.0, 4.0, 1.0, 20, 0.7),
            GearParams::new(4.0, 4.0, 1.0, 20, 0.7),
            GearParams::new(1.0, 4.0, 0.0, 20, 0.7),
            GearParams::new(1.0, 4.0, 1.0, 20, -0.1),
            GearParams::new(1.0, f32::NAN, 1.0, 20, 0.7),
            GearParams::new(1.0, f32::INFINITY, 1.0, 20, 0.7),
        ];
        for p in bad {
            let err = GearMesh::generate(&p).unwrap_err();
            assert!(matches!(err, GearError::InvalidParameter { .. }), "{p:?}");
        }
    }

    #[test]
    fn error_names_the_parameter() {
        let err = create_gear(1.0, 4.0, 1.0, 0, 0.7).unwrap_err();
        assert_eq!(err.to_string(), "invalid gear parameter `teeth`: must be at least 1");
    }
}
