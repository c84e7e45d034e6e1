use cogwheel_engine::math::Mat4;
use cogwheel_engine::mesh::GearParams;
use cogwheel_engine::paint::Color;

/// Degrees per second.
const GEAR_SPEED: f32 = 70.0;
/// Degrees per frame about Y.
const ORBIT_STEP: f32 = 0.2;
const ANGLE_WRAP: f32 = 3600.0;

const FOV_Y: f32 = 60.0;
const Z_NEAR: f32 = 1.0;
const Z_FAR: f32 = 1024.0;

/// A gear wheel of the demo and how it is placed each frame.
#[derive(Debug, Copy, Clone)]
pub struct GearSpec {
    pub params: GearParams,
    pub color: Color,
    pub x: f32,
    pub y: f32,
    /// Rotation is `angle * angle_scale + angle_offset` degrees.
    pub angle_scale: f32,
    pub angle_offset: f32,
}

pub const GEARS: [GearSpec; 3] = [
    GearSpec {
        params: GearParams::new(1.0, 4.0, 1.0, 20, 0.7),
        color: Color::new(0.8, 0.1, 0.0, 1.0),
        x: -3.0,
        y: -2.0,
        angle_scale: 1.0,
        angle_offset: 0.0,
    },
    GearSpec {
        params: GearParams::new(0.5, 2.0, 2.0, 10, 0.7),
        color: Color::new(0.0, 0.8, 0.2, 1.0),
        x: 3.1,
        y: -2.0,
        angle_scale: -2.0,
        angle_offset: -9.0,
    },
    GearSpec {
        params: GearParams::new(1.3, 2.0, 0.5, 10, 0.7),
        color: Color::new(0.2, 0.2, 1.0, 1.0),
        x: -3.1,
        y: 4.2,
        angle_scale: -2.0,
        angle_offset: -25.0,
    },
];

/// Animation and camera state of the gears demo.
#[derive(Debug, Clone)]
pub struct GearsScene {
    /// View rotation about X, Y, Z in degrees.
    pub view_rot: [f32; 3],
    /// Base gear angle in degrees.
    pub angle: f32,
    projection: Mat4,
}

impl GearsScene {
    pub fn new() -> Self {
        Self {
            view_rot: [20.0, 30.0, 0.0],
            angle: 0.0,
            projection: Mat4::perspective(FOV_Y, 1.0, Z_NEAR, Z_FAR).unwrap_or_default(),
        }
    }

    /// Advances one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.angle += GEAR_SPEED * dt;
        if self.angle > ANGLE_WRAP {
            self.angle -= ANGLE_WRAP;
        }
        self.view_rot[1] -= ORBIT_STEP;
    }

    /// Recomputes the projection for a `width` x `height` drawable.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.set_projection(FOV_Y, width as f32 / height as f32, Z_NEAR, Z_FAR)
    }

    /// Keeps the previous projection when the parameters are degenerate.
    pub fn set_projection(&mut self, fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> bool {
        let projection = Mat4::perspective(fov_y, aspect, z_near, z_far)
            .filter(|m| aspect.is_finite() && m.as_slice().iter().all(|v| v.is_finite()));
        match projection {
            Some(m) => {
                self.projection = m;
                true
            }
            None => {
                log::warn!(
                    "degenerate projection (fov {fov_y}, aspect {aspect}, near {z_near}, far {z_far}); keeping previous"
                );
                false
            }
        }
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Camera transform: back 20 units, then rotated by `view_rot`.
    pub fn view_transform(&self) -> Mat4 {
        let mut t = Mat4::IDENTITY;
        t.translate(0.0, 0.0, -20.0);
        t.rotate(self.view_rot[0].to_radians(), 1.0, 0.0, 0.0);
        t.rotate(self.view_rot[1].to_radians(), 0.0, 1.0, 0.0);
        t.rotate(self.view_rot[2].to_radians(), 0.0, 0.0, 1.0);
        t
    }

    pub fn gear_angle(&self, spec: &GearSpec) -> f32 {
        spec.angle_scale * self.angle + spec.angle_offset
    }
}

impl Default for GearsScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ── animation ─────────────────────────────────────────────────────────

    #[test]
    fn initial_state() {
        let s = GearsScene::new();
        assert_eq!(s.view_rot, [20.0, 30.0, 0.0]);
        assert_eq!(s.angle, 0.0);
        let p = s.projection();
        assert_eq!(p[0], p[5]);
    }

    #[test]
    fn angle_advances_at_70_degrees_per_second() {
        let mut s = GearsScene::new();
        s.advance(0.5);
        assert_relative_eq!(s.angle, 35.0);
        assert_relative_eq!(s.view_rot[1], 29.8, epsilon = 1e-5);
    }

    #[test]
    fn angle_wraps_above_3600() {
        let mut s = GearsScene::new();
        s.angle = 3599.0;
        s.advance(0.1);
        assert_relative_eq!(s.angle, 6.0, epsilon = 1e-3);

        // Exactly 3600 is not wrapped.
        s.angle = 3565.0;
        s.advance(0.5);
        assert_eq!(s.angle, 3600.0);
    }

    #[test]
    fn gear_angles_follow_mesh_ratio() {
        let mut s = GearsScene::new();
        s.angle = 10.0;
        let angles: Vec<f32> = GEARS.iter().map(|g| s.gear_angle(g)).collect();
        assert_eq!(angles, vec![10.0, -29.0, -45.0]);
    }

    // ── camera ────────────────────────────────────────────────────────────

    #[test]
    fn view_with_zero_rotation_is_pure_translation() {
        let mut s = GearsScene::new();
        s.view_rot = [0.0; 3];
        let mut expect = Mat4::IDENTITY;
        expect.translate(0.0, 0.0, -20.0);
        assert!(s.view_transform().approx_eq(&expect, 1e-6));
    }

    #[test]
    fn view_keeps_origin_twenty_units_away() {
        let s = GearsScene::new();
        let p = s.view_transform().transform([0.0, 0.0, 0.0, 1.0]);
        assert_relative_eq!(p[2], -20.0, epsilon = 1e-5);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut s = GearsScene::new();
        assert!(s.resize(500, 250));
        let p = s.projection();
        assert_relative_eq!(p[5] / p[0], 2.0, epsilon = 1e-5);
    }

    #[test]
    fn degenerate_projection_keeps_previous() {
        let mut s = GearsScene::new();
        s.resize(400, 300);
        let before = *s.projection();

        assert!(!s.set_projection(60.0, 1.0, 5.0, 5.0));
        assert_eq!(*s.projection(), before);

        assert!(!s.resize(400, 0));
        assert_eq!(*s.projection(), before);
    }
}
