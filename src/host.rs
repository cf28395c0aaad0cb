//! Interface to the external rigid-body integrator, plus a minimal reference body.

use crate::error::LimitError;
use crate::float::Float;
use crate::force::{to_newtons, velocity_change, ForceMode};
use crate::rotation::Rotation;
use crate::vec::Vec;

/// What the limit engine needs from the host's rigid body each step.
///
/// `accumulated_force` is the sum, in newtons, of everything added through
/// [`add_force`](RigidBodyHost::add_force) since the last integration.
pub trait RigidBodyHost<V: Vec> {
    type Rotation: Rotation<V>;

    fn mass(&self) -> V::Scalar;
    fn rotation(&self) -> Self::Rotation;
    fn linear_velocity(&self) -> V;
    fn set_linear_velocity(&mut self, velocity: V);
    fn accumulated_force(&self) -> V;
    fn clear_accumulated_force(&mut self);
    fn add_force(&mut self, force: V, mode: ForceMode);
}

/// A bare velocity-integrating body.
///
/// Forces accumulate in newtons and are folded into the velocity by
/// [`integrate`](SimBody::integrate). Positions, collisions and angular motion
/// belong to the host engine and are not modelled.
#[derive(Clone, Debug)]
pub struct SimBody<V: Vec, R: Rotation<V>> {
    pub velocity: V,
    pub rotation: R,
    mass: V::Scalar,
    dt: V::Scalar,
    accumulated: V,
}

impl<V: Vec, R: Rotation<V>> SimBody<V, R> {
    /// A body at rest with the given mass and fixed timestep.
    pub fn new(mass: V::Scalar, dt: V::Scalar) -> Result<Self, LimitError> {
        if !(mass > V::Scalar::zero()) || !mass.is_finite() {
            return Err(LimitError::InvalidMass);
        }
        Ok(SimBody {
            velocity: V::zero(),
            rotation: R::identity(),
            mass,
            dt,
            accumulated: V::zero(),
        })
    }

    pub fn with_velocity(mut self, velocity: V) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_rotation(mut self, rotation: R) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn dt(&self) -> V::Scalar {
        self.dt
    }

    /// Fold this step's accumulated force into the velocity and clear it.
    pub fn integrate(&mut self) {
        self.velocity = self.velocity + velocity_change(self.accumulated, self.mass, ForceMode::Force, self.dt);
        self.accumulated = V::zero();
    }
}

impl<V: Vec, R: Rotation<V>> RigidBodyHost<V> for SimBody<V, R> {
    type Rotation = R;

    fn mass(&self) -> V::Scalar { self.mass }
    fn rotation(&self) -> R { self.rotation }
    fn linear_velocity(&self) -> V { self.velocity }
    fn set_linear_velocity(&mut self, velocity: V) { self.velocity = velocity; }
    fn accumulated_force(&self) -> V { self.accumulated }
    fn clear_accumulated_force(&mut self) { self.accumulated = V::zero(); }

    fn add_force(&mut self, force: V, mode: ForceMode) {
        self.accumulated = self.accumulated + to_newtons(force, self.mass, mode, self.dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::Rot2;
    use crate::vec::Vec2;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_bad_mass() {
        assert_eq!(SimBody::<Vec2<f32>, Rot2<f32>>::new(0.0, 0.02).unwrap_err(), LimitError::InvalidMass);
        assert!(SimBody::<Vec2<f32>, Rot2<f32>>::new(f32::NAN, 0.02).is_err());
        assert!(SimBody::<Vec2<f32>, Rot2<f32>>::new(f32::INFINITY, 0.02).is_err());
    }

    #[test]
    fn velocity_change_force_integrates_exactly() {
        let mut body = SimBody::<Vec2<f64>, Rot2<f64>>::new(3.0, 0.02).unwrap();
        body.add_force(Vec2::new(4.0, -1.0), ForceMode::VelocityChange);
        body.integrate();
        assert_relative_eq!(body.velocity.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(body.velocity.y, -1.0, epsilon = 1e-12);
        assert_eq!(body.accumulated_force(), Vec2::zero());
    }
}
