//! Unit quaternion for 3D orientation
//!
//! Composition follows the Hamilton convention: `a.compose(&b)` applies `b`
//! first, then `a`. Left-multiplying rotates in world space, right-multiplying
//! rotates in the object's local space.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::Vec3;

/// Quaternion `w + xi + yj + zk`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity rotation
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Rotation of `angle` radians around `axis` (right-hand rule)
    ///
    /// A zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    /// Rotation around the world Y axis
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::Y, angle)
    }

    /// Rotation around the X axis
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::X, angle)
    }

    /// Rotation from orthonormal basis vectors (the rotated X, Y and Z axes)
    pub fn from_basis(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        let trace = x_axis.x + y_axis.y + z_axis.z;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self {
                w: 0.25 * s,
                x: (y_axis.z - z_axis.y) / s,
                y: (z_axis.x - x_axis.z) / s,
                z: (x_axis.y - y_axis.x) / s,
            }
        } else if x_axis.x > y_axis.y && x_axis.x > z_axis.z {
            let s = (1.0 + x_axis.x - y_axis.y - z_axis.z).sqrt() * 2.0;
            Self {
                w: (y_axis.z - z_axis.y) / s,
                x: 0.25 * s,
                y: (y_axis.x + x_axis.y) / s,
                z: (z_axis.x + x_axis.z) / s,
            }
        } else if y_axis.y > z_axis.z {
            let s = (1.0 + y_axis.y - x_axis.x - z_axis.z).sqrt() * 2.0;
            Self {
                w: (z_axis.x - x_axis.z) / s,
                x: (y_axis.x + x_axis.y) / s,
                y: 0.25 * s,
                z: (z_axis.y + y_axis.z) / s,
            }
        } else {
            let s = (1.0 + z_axis.z - x_axis.x - y_axis.y).sqrt() * 2.0;
            Self {
                w: (x_axis.y - y_axis.x) / s,
                x: (z_axis.x + x_axis.z) / s,
                y: (z_axis.y + y_axis.z) / s,
                z: 0.25 * s,
            }
        };
        q.normalize()
    }

    /// Orientation whose -Z axis points along `forward`, with +Y as close to `up` as possible
    ///
    /// `forward` must not be parallel to `up`.
    pub fn look_rotation(forward: Vec3, up: Vec3) -> Self {
        let f = forward.normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(f);
        Self::from_basis(s, u, -f)
    }

    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize to unit magnitude
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv = 1.0 / mag;
            Self {
                x: self.x * inv,
                y: self.y * inv,
                z: self.z * inv,
                w: self.w * inv,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Conjugate; the inverse rotation for unit quaternions
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Hamilton product `self * other`
    pub fn compose(&self, other: &Self) -> Self {
        let (a, b) = (self, other);
        Self {
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        }
    }

    /// Rotate a vector
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Column-major 4x4 rotation matrix
    pub fn to_matrix(&self) -> [[f32; 4]; 4] {
        let Self { x, y, z, w } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        [
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy), 0.0],
            [2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx), 0.0],
            [2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.compose(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(Quat::IDENTITY.rotate(v), v));
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        // Right-hand rule around +Y takes +Z to +X
        let q = Quat::from_rotation_y(FRAC_PI_2);
        let r = q.rotate(Vec3::Z);
        assert!(vec_approx_eq(r, Vec3::X), "got {:?}", r);
    }

    #[test]
    fn test_rotation_x_quarter_turn() {
        // Around +X takes +Y to +Z
        let q = Quat::from_rotation_x(FRAC_PI_2);
        let r = q.rotate(Vec3::Y);
        assert!(vec_approx_eq(r, Vec3::Z), "got {:?}", r);
    }

    #[test]
    fn test_compose_applies_right_first() {
        let yaw = Quat::from_rotation_y(FRAC_PI_2);
        let pitch = Quat::from_rotation_x(FRAC_PI_2);
        // pitch first: Y -> Z, then yaw: Z -> X
        let r = (yaw * pitch).rotate(Vec3::Y);
        assert!(vec_approx_eq(r, Vec3::X), "got {:?}", r);
        // The other order differs
        let r2 = (pitch * yaw).rotate(Vec3::Y);
        assert!(!vec_approx_eq(r2, Vec3::X));
    }

    #[test]
    fn test_conjugate_inverts() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7);
        let v = Vec3::new(0.3, -1.0, 2.0);
        let back = q.conjugate().rotate(q.rotate(v));
        assert!(vec_approx_eq(back, v));
    }

    #[test]
    fn test_normalize() {
        let q = Quat { x: 0.0, y: 2.0, z: 0.0, w: 0.0 }.normalize();
        assert!((q.magnitude() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(Quat::from_axis_angle(Vec3::ZERO, 1.0), Quat::IDENTITY);
    }

    #[test]
    fn test_look_rotation_default_forward_is_identity() {
        let q = Quat::look_rotation(-Vec3::Z, Vec3::Y);
        assert!((q.w.abs() - 1.0).abs() < EPSILON, "got {:?}", q);
    }

    #[test]
    fn test_look_rotation_points_forward() {
        let dirs = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-0.3, -0.8, 0.5),
            Vec3::new(0.6, 0.7, -0.2),
        ];
        for dir in dirs {
            let q = Quat::look_rotation(dir, Vec3::Y);
            let fwd = q.rotate(-Vec3::Z);
            assert!(vec_approx_eq(fwd, dir.normalized()), "{:?} -> {:?}", dir, fwd);
            // Camera right stays horizontal
            assert!(q.rotate(Vec3::X).y.abs() < EPSILON);
        }
    }

    #[test]
    fn test_matrix_matches_rotate() {
        let q = Quat::from_axis_angle(Vec3::new(0.2, 1.0, -0.4), 1.1);
        let m = q.to_matrix();
        let v = Vec3::new(0.5, -0.25, 2.0);
        let r = q.rotate(v);
        let mv = Vec3::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
        );
        assert!(vec_approx_eq(r, mv), "{:?} vs {:?}", r, mv);
    }
}
