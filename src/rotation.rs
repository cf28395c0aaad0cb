//! Body orientations used to move velocities between world and local frames.

use crate::float::Float;
use crate::vec::{Vec, Vec2, Vec3};

/// An orientation that can carry vectors of type `V` into and out of a body's frame.
pub trait Rotation<V: Vec>: Copy + core::fmt::Debug {
    /// The identity orientation.
    fn identity() -> Self;

    /// Rotate a local-space vector into world space.
    fn rotate(&self, v: V) -> V;

    /// Rotate a world-space vector into local space.
    fn inverse_rotate(&self, v: V) -> V;
}

/// Planar rotation by an angle in radians (counter-clockwise).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rot2<F: Float> {
    cos: F,
    sin: F,
}

impl<F: Float> Rot2<F> {
    pub fn from_angle(radians: F) -> Self {
        Rot2 { cos: radians.cos(), sin: radians.sin() }
    }

    pub fn from_degrees(degrees: F) -> Self {
        Self::from_angle(degrees * F::pi() / F::from_f32(180.0))
    }
}

impl<F: Float> Rotation<Vec2<F>> for Rot2<F> {
    fn identity() -> Self {
        Rot2 { cos: F::one(), sin: F::zero() }
    }

    fn rotate(&self, v: Vec2<F>) -> Vec2<F> {
        Vec2::new(
            v.x * self.cos - v.y * self.sin,
            v.x * self.sin + v.y * self.cos,
        )
    }

    fn inverse_rotate(&self, v: Vec2<F>) -> Vec2<F> {
        Vec2::new(
            v.x * self.cos + v.y * self.sin,
            -v.x * self.sin + v.y * self.cos,
        )
    }
}

/// Unit quaternion for 3D orientations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quat<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
    pub w: F,
}

impl<F: Float> Quat<F> {
    /// Rotation of `radians` around `axis`. A zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3<F>, radians: F) -> Self {
        let axis = axis.normalize();
        let half = radians * F::half();
        let s = half.sin();
        if axis == Vec3::zero() {
            return <Self as Rotation<Vec3<F>>>::identity();
        }
        Quat { x: axis.x * s, y: axis.y * s, z: axis.z * s, w: half.cos() }
    }

    pub fn conjugate(self) -> Self {
        Quat { x: -self.x, y: -self.y, z: -self.z, w: self.w }
    }

    fn vector(self) -> Vec3<F> {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl<F: Float> Rotation<Vec3<F>> for Quat<F> {
    fn identity() -> Self {
        Quat { x: F::zero(), y: F::zero(), z: F::zero(), w: F::one() }
    }

    // v' = v + 2w(q x v) + 2(q x (q x v))
    fn rotate(&self, v: Vec3<F>) -> Vec3<F> {
        let two = F::one() + F::one();
        let q = self.vector();
        let t = q.cross(v).scale(two);
        v + t.scale(self.w) + q.cross(t)
    }

    fn inverse_rotate(&self, v: Vec3<F>) -> Vec3<F> {
        self.conjugate().rotate(v)
    }
}
