//! Applying a body's speed limits to the host integrator's state.
//!
//! Each pass runs in a fixed order:
//!
//! 1. soft limits, in list order, each shaping this step's accumulated force
//!    with a corrective velocity change;
//! 2. the exempt velocity change, which no soft limit sees;
//! 3. hard limits, in list order, each clamping the full expected velocity,
//!    writing it back and cancelling the accumulated force.
//!
//! Limits compose sequentially: every limit sees the host state left by the
//! previous one.

use alloc::vec::Vec as AllocVec;
use tracing::trace;

use crate::clamp::{is_unbounded, soft_clamp, soft_limit_omnidirectional};
use crate::float::Float;
use crate::force::{velocity_change, ForceMode};
use crate::host::RigidBodyHost;
use crate::limit::{AxisLimit, LimitShape, LimitType, SpeedLimit};
use crate::observer::StepObserver;
use crate::rotation::Rotation;
use crate::vec::{clamp_magnitude, Axes, Vec};

/// Velocity the host would reach if it integrated its accumulated force now.
pub fn expected_velocity<V: Vec, H: RigidBodyHost<V>>(host: &H, dt: V::Scalar) -> V {
    host.linear_velocity() + pending_change(host, dt)
}

fn pending_change<V: Vec, H: RigidBodyHost<V>>(host: &H, dt: V::Scalar) -> V {
    velocity_change(host.accumulated_force(), host.mass(), ForceMode::Force, dt)
}

fn clamp_in_frame<V: Axes>(current: V, delta: V, limit: &AxisLimit<V>) -> V {
    let (min, max) = limit.range().bounds();
    soft_clamp(current, delta, limit.limited(), min, max)
}

/// Shape this step's accumulated force on `host` with a soft limit.
///
/// The correction is handed back to the host as a velocity change, so the
/// host's own velocity is not touched. Returns the correction.
pub fn apply_soft_limit<V, H>(shape: &LimitShape<V>, host: &mut H, dt: V::Scalar) -> V
where
    V: Axes,
    H: RigidBodyHost<V>,
{
    let current = host.linear_velocity();
    let delta = pending_change(host, dt);
    let correction = match shape {
        LimitShape::Omnidirectional { max_speed } => {
            soft_limit_omnidirectional(current, delta, *max_speed) - delta
        }
        LimitShape::WorldAxes(limit) => clamp_in_frame(current, delta, limit) - (current + delta),
        LimitShape::LocalAxes(limit) => {
            let rotation = host.rotation();
            let local_current = rotation.inverse_rotate(current);
            let local_delta = rotation.inverse_rotate(delta);
            let clamped = clamp_in_frame(local_current, local_delta, limit);
            rotation.rotate(clamped - (local_current + local_delta))
        }
    };
    if correction != V::zero() {
        host.add_force(correction, ForceMode::VelocityChange);
    }
    correction
}

/// Clamp the full expected velocity of `host` with a hard limit.
///
/// The accumulated force is cancelled and the clamped velocity written back
/// directly. Returns the new velocity.
pub fn apply_hard_limit<V, H>(shape: &LimitShape<V>, host: &mut H, dt: V::Scalar) -> V
where
    V: Axes,
    H: RigidBodyHost<V>,
{
    let current = host.linear_velocity();
    let delta = pending_change(host, dt);
    let velocity = match shape {
        LimitShape::Omnidirectional { max_speed } => {
            let expected = current + delta;
            if is_unbounded(*max_speed) || *max_speed < V::Scalar::zero() {
                expected
            } else {
                clamp_magnitude(expected, *max_speed)
            }
        }
        LimitShape::WorldAxes(limit) => clamp_in_frame(current, delta, limit),
        LimitShape::LocalAxes(limit) => {
            let rotation = host.rotation();
            let local = clamp_in_frame(
                rotation.inverse_rotate(current),
                rotation.inverse_rotate(delta),
                limit,
            );
            rotation.rotate(local)
        }
    };
    host.clear_accumulated_force();
    host.set_linear_velocity(velocity);
    velocity
}

/// An ordered list of speed limits belonging to one body.
#[derive(Clone, Debug)]
pub struct LimitStack<V: Axes> {
    limits: AllocVec<SpeedLimit<V>>,
}

impl<V: Axes> Default for LimitStack<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Axes> LimitStack<V> {
    pub fn new() -> Self {
        LimitStack { limits: AllocVec::new() }
    }

    /// Append a limit; returns its index.
    pub fn push(&mut self, limit: SpeedLimit<V>) -> usize {
        self.limits.push(limit);
        self.limits.len() - 1
    }

    /// Remove the limit at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<SpeedLimit<V>> {
        if index < self.limits.len() {
            Some(self.limits.remove(index))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SpeedLimit<V>> {
        self.limits.get_mut(index)
    }

    pub fn as_slice(&self) -> &[SpeedLimit<V>] { &self.limits }
    pub fn len(&self) -> usize { self.limits.len() }
    pub fn is_empty(&self) -> bool { self.limits.is_empty() }
    pub fn clear(&mut self) { self.limits.clear(); }

    /// Run the full pass on `host`: soft limits, then `exempt`, then hard limits.
    pub fn apply<H, O>(&self, host: &mut H, exempt: V, dt: V::Scalar, observer: &mut O)
    where
        H: RigidBodyHost<V>,
        O: StepObserver,
    {
        for (index, limit) in self.limits.iter().enumerate() {
            if limit.kind() != LimitType::Soft {
                continue;
            }
            let correction = apply_soft_limit(limit.shape(), host, dt);
            trace!(index, ?correction, "soft limit applied");
            observer.on_soft_limit(index);
        }

        if exempt != V::zero() {
            host.add_force(exempt, ForceMode::VelocityChange);
        }
        observer.on_exempt_applied();

        for (index, limit) in self.limits.iter().enumerate() {
            if limit.kind() != LimitType::Hard {
                continue;
            }
            let velocity = apply_hard_limit(limit.shape(), host, dt);
            trace!(index, ?velocity, "hard limit applied");
            observer.on_hard_limit(index);
        }

        observer.on_step_complete();
    }
}
