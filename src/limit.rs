//! Speed limit descriptions: what to bound, in which frame, and how strictly.

use alloc::string::ToString;

use crate::error::LimitError;
use crate::float::Float;
use crate::vec::{Axes, AxisMask};

/// How strictly a limit is enforced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum LimitType {
    /// Shapes only this step's programmatic force, as a corrective velocity change.
    Soft,
    /// Clamps the full resulting velocity and cancels this step's accumulated force.
    Hard,
}

/// Frame and shape a limit is expressed in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Directionality {
    Omnidirectional,
    WorldAxes,
    LocalAxes,
}

impl LimitType {
    pub fn from_tag(tag: u8) -> Result<Self, LimitError> {
        match tag {
            0 => Ok(LimitType::Soft),
            1 => Ok(LimitType::Hard),
            other => Err(LimitError::UnsupportedMode { kind: "limit type", tag: other.to_string() }),
        }
    }
}

impl Directionality {
    pub fn from_tag(tag: u8) -> Result<Self, LimitError> {
        match tag {
            0 => Ok(Directionality::Omnidirectional),
            1 => Ok(Directionality::WorldAxes),
            2 => Ok(Directionality::LocalAxes),
            other => Err(LimitError::UnsupportedMode { kind: "directionality", tag: other.to_string() }),
        }
    }
}

/// Per-axis bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AxisRange<V: Axes> {
    /// `[-max, max]` on every axis; `max` must be non-negative.
    Symmetric { max: V },
    /// Independent bounds. `min > max` on an axis is treated as the interval between them.
    Asymmetric { min: V, max: V },
}

impl<V: Axes> AxisRange<V> {
    /// Lower and upper bound vectors.
    pub fn bounds(&self) -> (V, V) {
        match *self {
            AxisRange::Symmetric { max } => (-max, max),
            AxisRange::Asymmetric { min, max } => (min, max),
        }
    }

    fn validate(&self) -> Result<(), LimitError> {
        let AxisRange::Symmetric { max } = self else {
            return Ok(());
        };
        for axis in 0..V::DIM {
            if let Some(value) = max.component(axis) {
                if value < V::Scalar::zero() || value.is_nan() {
                    return Err(LimitError::NegativeAxisLimit { axis, value: value.to_f64() });
                }
            }
        }
        Ok(())
    }
}

/// Bounds applied to the axes flagged in `limited`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisLimit<V: Axes> {
    limited: AxisMask,
    range: AxisRange<V>,
}

impl<V: Axes> AxisLimit<V> {
    pub fn symmetric(limited: AxisMask, max: V) -> Result<Self, LimitError> {
        let range = AxisRange::Symmetric { max };
        range.validate()?;
        Ok(AxisLimit { limited, range })
    }

    pub fn asymmetric(limited: AxisMask, min: V, max: V) -> Self {
        AxisLimit { limited, range: AxisRange::Asymmetric { min, max } }
    }

    pub fn limited(&self) -> AxisMask { self.limited }
    pub fn range(&self) -> &AxisRange<V> { &self.range }

    pub fn set_limited(&mut self, limited: AxisMask) {
        self.limited = limited;
    }

    /// Replace the bounds, rejecting a negative symmetric max.
    pub fn set_range(&mut self, range: AxisRange<V>) -> Result<(), LimitError> {
        range.validate()?;
        self.range = range;
        Ok(())
    }
}

/// The shape of a limit; each variant carries only the fields it uses.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LimitShape<V: Axes> {
    /// Bound on velocity length. NaN or +inf mean "no limit".
    Omnidirectional { max_speed: V::Scalar },
    /// Per-axis bounds in world space.
    WorldAxes(AxisLimit<V>),
    /// Per-axis bounds in the body's rotated frame.
    LocalAxes(AxisLimit<V>),
}

/// One velocity constraint attached to a body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpeedLimit<V: Axes> {
    kind: LimitType,
    shape: LimitShape<V>,
}

fn validate_speed<F: Float>(max_speed: F) -> Result<(), LimitError> {
    if max_speed < F::zero() {
        return Err(LimitError::NegativeSpeedLimit { value: max_speed.to_f64() });
    }
    Ok(())
}

impl<V: Axes> SpeedLimit<V> {
    /// Limit on velocity length. Negative values (including -inf) are rejected.
    pub fn omnidirectional(kind: LimitType, max_speed: V::Scalar) -> Result<Self, LimitError> {
        validate_speed(max_speed)?;
        Ok(SpeedLimit { kind, shape: LimitShape::Omnidirectional { max_speed } })
    }

    pub fn world_axes(kind: LimitType, limit: AxisLimit<V>) -> Self {
        SpeedLimit { kind, shape: LimitShape::WorldAxes(limit) }
    }

    pub fn local_axes(kind: LimitType, limit: AxisLimit<V>) -> Self {
        SpeedLimit { kind, shape: LimitShape::LocalAxes(limit) }
    }

    pub fn soft(max_speed: V::Scalar) -> Result<Self, LimitError> {
        Self::omnidirectional(LimitType::Soft, max_speed)
    }

    pub fn hard(max_speed: V::Scalar) -> Result<Self, LimitError> {
        Self::omnidirectional(LimitType::Hard, max_speed)
    }

    pub fn kind(&self) -> LimitType { self.kind }
    pub fn shape(&self) -> &LimitShape<V> { &self.shape }

    pub fn directionality(&self) -> Directionality {
        match self.shape {
            LimitShape::Omnidirectional { .. } => Directionality::Omnidirectional,
            LimitShape::WorldAxes(_) => Directionality::WorldAxes,
            LimitShape::LocalAxes(_) => Directionality::LocalAxes,
        }
    }

    pub fn set_kind(&mut self, kind: LimitType) {
        self.kind = kind;
    }

    /// Change the speed of an omnidirectional limit, or turn any limit into one.
    pub fn set_max_speed(&mut self, max_speed: V::Scalar) -> Result<(), LimitError> {
        validate_speed(max_speed)?;
        self.shape = LimitShape::Omnidirectional { max_speed };
        Ok(())
    }

    /// Replace the shape, validating it first.
    pub fn set_shape(&mut self, shape: LimitShape<V>) -> Result<(), LimitError> {
        match &shape {
            LimitShape::Omnidirectional { max_speed } => validate_speed(*max_speed)?,
            LimitShape::WorldAxes(limit) | LimitShape::LocalAxes(limit) => limit.range.validate()?,
        }
        self.shape = shape;
        Ok(())
    }
}
