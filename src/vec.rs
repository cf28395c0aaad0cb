//! Vector types and traits for velocity calculations.

use crate::error::LimitError;
use crate::float::Float;
use core::ops::{Add, Sub, Neg};

/// Trait for vector types used in velocity calculations.
///
/// Abstracts over dimensionality (2D, 3D) so all limit code
/// is generic over the vector type.
pub trait Vec:
    Copy
    + Clone
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + PartialEq
    + Default
    + core::fmt::Debug
{
    /// The scalar (float) type for this vector.
    type Scalar: Float;

    /// Zero vector.
    fn zero() -> Self;

    /// Vector with all components set to the same value.
    fn splat(value: Self::Scalar) -> Self;

    /// Dot product.
    fn dot(self, other: Self) -> Self::Scalar;

    /// Squared length (avoids sqrt).
    fn length_sq(self) -> Self::Scalar {
        self.dot(self)
    }

    /// Length (magnitude).
    fn length(self) -> Self::Scalar {
        self.length_sq().sqrt()
    }

    /// Normalize to unit length. Returns zero vector if length is near zero.
    fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(Self::Scalar::from_f32(1e-10)) {
            Self::zero()
        } else {
            self.scale(Self::Scalar::one() / len)
        }
    }

    /// Scale all components by a scalar.
    fn scale(self, s: Self::Scalar) -> Self;
}

/// Per-component access for vectors with a fixed number of axes.
///
/// Axis indices past `DIM` are rejected rather than wrapped.
pub trait Axes: Vec {
    /// Number of axes (2 or 3).
    const DIM: usize;

    /// Component along `axis`, or `None` if the axis does not exist.
    fn component(&self, axis: usize) -> Option<Self::Scalar>;

    /// Copy of self with `axis` replaced. Out-of-range axes leave the vector untouched.
    fn with_component(self, axis: usize, value: Self::Scalar) -> Self;
}

/// Clamp the magnitude of `v` to at most `max`, preserving direction.
pub fn clamp_magnitude<V: Vec>(v: V, max: V::Scalar) -> V {
    let len_sq = v.length_sq();
    if len_sq > max * max {
        v.normalize().scale(max)
    } else {
        v
    }
}

// --------------------------------------------------------------------------
// AxisMask — which axes a limit applies to
// --------------------------------------------------------------------------

/// Small bitset of limited axes. Bit `i` set means axis `i` is limited.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AxisMask(u8);

impl AxisMask {
    /// Highest axis count a mask can describe.
    pub const MAX_AXES: usize = 3;
    /// No axis limited.
    pub const NONE: AxisMask = AxisMask(0);
    /// Every axis limited.
    pub const ALL: AxisMask = AxisMask(0b111);

    /// Mask for a 2D body.
    pub fn xy(x: bool, y: bool) -> Self {
        AxisMask(x as u8 | (y as u8) << 1)
    }

    /// Mask for a 3D body.
    pub fn xyz(x: bool, y: bool, z: bool) -> Self {
        AxisMask(x as u8 | (y as u8) << 1 | (z as u8) << 2)
    }

    /// Whether `axis` is limited. Axes outside the mask are never limited.
    pub fn is_limited(self, axis: usize) -> bool {
        axis < Self::MAX_AXES && self.0 & (1 << axis) != 0
    }

    /// Set or clear the flag for `axis`.
    pub fn set(&mut self, axis: usize, limited: bool) -> Result<(), LimitError> {
        if axis >= Self::MAX_AXES {
            return Err(LimitError::AxisOutOfRange { axis, dim: Self::MAX_AXES });
        }
        if limited {
            self.0 |= 1 << axis;
        } else {
            self.0 &= !(1 << axis);
        }
        Ok(())
    }

    /// True if no axis is limited.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

// --------------------------------------------------------------------------
// Vec2<F> — 2D vector
// --------------------------------------------------------------------------

/// 2D vector for planar bodies.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> Vec for Vec2<F> {
    type Scalar = F;
    fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }
    fn splat(value: F) -> Self { Vec2 { x: value, y: value } }
    fn dot(self, other: Self) -> F { self.x * other.x + self.y * other.y }
    fn scale(self, s: F) -> Self { Vec2 { x: self.x * s, y: self.y * s } }
}

impl<F: Float> Axes for Vec2<F> {
    const DIM: usize = 2;

    fn component(&self, axis: usize) -> Option<F> {
        match axis {
            0 => Some(self.x),
            1 => Some(self.y),
            _ => None,
        }
    }

    fn with_component(mut self, axis: usize, value: F) -> Self {
        match axis {
            0 => self.x = value,
            1 => self.y = value,
            _ => {}
        }
        self
    }
}

// --------------------------------------------------------------------------
// Vec3<F> — 3D vector
// --------------------------------------------------------------------------

/// 3D vector for spatial bodies.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    /// Create a new 3D vector.
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    /// 3D cross product.
    pub fn cross(self, other: Self) -> Self {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}

impl<F: Float> Vec for Vec3<F> {
    type Scalar = F;
    fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }
    fn splat(value: F) -> Self { Vec3 { x: value, y: value, z: value } }
    fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }
}

impl<F: Float> Axes for Vec3<F> {
    const DIM: usize = 3;

    fn component(&self, axis: usize) -> Option<F> {
        match axis {
            0 => Some(self.x),
            1 => Some(self.y),
            2 => Some(self.z),
            _ => None,
        }
    }

    fn with_component(mut self, axis: usize, value: F) -> Self {
        match axis {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec2_length() {
        let v = Vec2::new(3.0f32, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn vec3_cross() {
        let i = Vec3::new(1.0f32, 0.0, 0.0);
        let j = Vec3::new(0.0f32, 1.0, 0.0);
        let k = i.cross(j);
        assert!((k.x - 0.0).abs() < 1e-6);
        assert!((k.y - 0.0).abs() < 1e-6);
        assert!((k.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector() {
        let v = Vec2::<f32>::zero();
        let n = v.normalize();
        assert_eq!(n, Vec2::zero());
    }

    #[test]
    fn clamp_magnitude_shortens_long_vectors() {
        let v = clamp_magnitude(Vec2::new(6.0f32, 8.0), 5.0);
        assert!((v.length() - 5.0).abs() < 1e-5);
        assert!((v.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn clamp_magnitude_keeps_short_vectors() {
        let v = Vec3::new(1.0f32, 1.0, 1.0);
        assert_eq!(clamp_magnitude(v, 5.0), v);
    }

    #[test]
    fn component_access_is_bounds_checked() {
        let v = Vec2::new(1.0f32, 2.0);
        assert_eq!(v.component(1), Some(2.0));
        assert_eq!(v.component(2), None);
        assert_eq!(v.with_component(5, 9.0), v);
        assert_eq!(Vec3::new(1.0f32, 2.0, 3.0).with_component(2, 9.0).z, 9.0);
    }

    #[test]
    fn axis_mask_flags() {
        let mut mask = AxisMask::xyz(true, false, true);
        assert!(mask.is_limited(0));
        assert!(!mask.is_limited(1));
        assert!(mask.is_limited(2));
        assert!(!mask.is_limited(7));
        mask.set(1, true).unwrap();
        assert_eq!(mask, AxisMask::ALL);
        assert!(mask.set(3, true).is_err());
        assert!(AxisMask::NONE.is_empty());
    }
}
