//! Directional clamping primitives shared by soft and hard limits.
//!
//! The per-axis clamp is state dependent: a velocity that already sits outside
//! `[min, max]` may recover toward the legal range, but a pending change can
//! never push it further out, and it is never snapped back by a change that
//! points the other way.

use crate::float::Float;
use crate::vec::{clamp_magnitude, Axes, AxisMask, Vec};

/// Clamp `value` into the interval spanned by `a` and `b`, whichever is smaller.
pub fn directional_clamp<F: Float>(value: F, a: F, b: F) -> F {
    value.clamp(a.min(b), a.max(b))
}

/// Resulting velocity on one axis after applying `delta` to `current` under `[min, max]`.
///
/// A `delta` of exactly zero passes through, even when `current` is out of range.
/// Inverted bounds (`min > max`) are treated as the interval between them.
pub fn soft_clamp_axis<F: Float>(current: F, delta: F, min: F, max: F) -> F {
    let target = current + delta;
    if delta == F::zero() {
        return target;
    }
    let (min, max) = (min.min(max), min.max(max));
    let (low, high) = if current < min {
        (current, max)
    } else if current > max {
        (min, current)
    } else {
        (min, max)
    };
    directional_clamp(target, low, high)
}

/// Apply [`soft_clamp_axis`] to every limited axis; unlimited axes get `current + delta`.
pub fn soft_clamp<V: Axes>(current: V, delta: V, limited: AxisMask, min: V, max: V) -> V {
    let mut result = current + delta;
    for axis in 0..V::DIM {
        if !limited.is_limited(axis) {
            continue;
        }
        let (Some(c), Some(d), Some(lo), Some(hi)) = (
            current.component(axis),
            delta.component(axis),
            min.component(axis),
            max.component(axis),
        ) else {
            continue;
        };
        result = result.with_component(axis, soft_clamp_axis(c, d, lo, hi));
    }
    result
}

/// True if `limit` means "no limit" (NaN or +inf).
pub fn is_unbounded<F: Float>(limit: F) -> bool {
    limit.is_nan() || limit == F::infinity()
}

/// Shape `delta` so that `current + delta` does not overshoot the speed `limit`.
///
/// Only the part of `delta` that pushes along the resulting velocity past the
/// limit is removed. A body already over the limit may slow down freely, and
/// components of `delta` orthogonal to the overshoot direction are kept.
pub fn soft_limit_omnidirectional<V: Vec>(current: V, delta: V, limit: V::Scalar) -> V {
    let zero = V::Scalar::zero();
    if is_unbounded(limit) || limit < zero || delta == V::zero() {
        return delta;
    }
    let result = current + delta;
    let excess = result - clamp_magnitude(result, limit);
    let excess_len = excess.length();
    if excess_len == zero {
        return delta;
    }
    let direction = result.normalize();
    let along = delta.dot(direction);
    if along <= zero {
        return delta;
    }
    delta - direction.scale(excess_len.min(along))
}
