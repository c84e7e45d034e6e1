//! 4x4 transformation matrix.
//!
//! # Convention
//! - Storage is 16 floats, row-major, with **row vectors** on the left: `v' = v * M`
//! - Translation lives in elements `m[12]`, `m[13]`, `m[14]`
//! - [`Mat4::multiply`] pre-multiplies: `M := N * M`, so `N` is applied first
//!
//! Read as column-major, the same 16 floats are the matrix a GLSL/WGSL shader
//! multiplies as `M * v`, which is why no transpose happens on upload.
//!
//! # Example
//! ```ignore
//! let mut m = Mat4::IDENTITY;
//! m.translate(0.0, 0.0, -20.0);
//! m.rotate(angle, 0.0, 0.0, 1.0); // rotate in object space, then translate
//! ```

use std::ops::Mul;

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    #[inline]
    pub const fn from_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    #[inline]
    pub const fn to_array(&self) -> [f32; 16] {
        self.m
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.m
    }

    /// Resets the matrix to the identity.
    pub fn identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Replaces `self` with `n * self`.
    ///
    /// The product is built in a temporary, so passing a copy of `self` as `n`
    /// is fine.
    pub fn multiply(&mut self, n: &Mat4) {
        *self = *n * *self;
    }

    /// Composes a translation by `(x, y, z)`.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        let t = Mat4::from_array([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            x,   y,   z,   1.0,
        ]);
        self.multiply(&t);
    }

    /// Composes a rotation of `angle` radians about the axis `(x, y, z)`.
    ///
    /// The axis must be unit length; it is used as given.
    pub fn rotate(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        let (s, c) = angle.sin_cos();
        let k = 1.0 - c;
        let r = Mat4::from_array([
            x * x * k + c,     y * x * k + z * s, x * z * k - y * s, 0.0,
            x * y * k - z * s, y * y * k + c,     y * z * k + x * s, 0.0,
            x * z * k + y * s, y * z * k - x * s, z * z * k + c,     0.0,
            0.0,               0.0,               0.0,               1.0,
        ]);
        self.multiply(&r);
    }

    pub fn transpose(&mut self) {
        let m = &self.m;
        *self = Mat4::from_array([
            m[0], m[4], m[8],  m[12],
            m[1], m[5], m[9],  m[13],
            m[2], m[6], m[10], m[14],
            m[3], m[7], m[11], m[15],
        ]);
    }

    /// Inverts a matrix composed only of rotation and translation.
    ///
    /// The inverse of the rotation block is its transpose and the inverse of the
    /// translation is its negation, so `inv(M) = inv(R) * inv(T)`. Matrices
    /// carrying scale, shear or projective terms produce a wrong result; this is
    /// not checked.
    pub fn invert_rigid(&mut self) {
        let mut t = Mat4::IDENTITY;
        t.m[12] = -self.m[12];
        t.m[13] = -self.m[13];
        t.m[14] = -self.m[14];

        self.m[12] = 0.0;
        self.m[13] = 0.0;
        self.m[14] = 0.0;
        self.transpose();

        self.multiply(&t);
    }

    /// Builds a symmetric perspective projection.
    ///
    /// `fov_y` is the vertical field of view in **degrees**. Returns `None` for
    /// degenerate input (`z_far == z_near`, zero half-angle sine, or zero
    /// aspect ratio).
    pub fn perspective(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Option<Mat4> {
        let radians = fov_y / 2.0 * std::f32::consts::PI / 180.0;
        let delta_z = z_far - z_near;
        let (sine, cosine) = radians.sin_cos();

        if delta_z == 0.0 || sine == 0.0 || aspect == 0.0 {
            return None;
        }

        let cotangent = cosine / sine;

        let mut m = Mat4::IDENTITY;
        m.m[0] = cotangent / aspect;
        m.m[5] = cotangent;
        m.m[10] = -(z_far + z_near) / delta_z;
        m.m[11] = -1.0;
        m.m[14] = -2.0 * z_near * z_far / delta_z;
        m.m[15] = 0.0;
        Some(m)
    }

    /// Transforms a homogeneous row vector: `v * self`.
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let m = &self.m;
        let mut out = [0.0f32; 4];
        for (col, o) in out.iter_mut().enumerate() {
            *o = v[0] * m[col] + v[1] * m[4 + col] + v[2] * m[8 + col] + v[3] * m[12 + col];
        }
        out
    }

    /// Element-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Index<usize> for Mat4 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.m[i]
    }
}

/// Row-major product `self * rhs`.
///
/// With row vectors, `v * (A * B)` applies `A` first, then `B`.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut out = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = self.m[row * 4] * rhs.m[col]
                    + self.m[row * 4 + 1] * rhs.m[4 + col]
                    + self.m[row * 4 + 2] * rhs.m[8 + col]
                    + self.m[row * 4 + 3] * rhs.m[12 + col];
            }
        }

        Mat4 { m: out }
    }
}
