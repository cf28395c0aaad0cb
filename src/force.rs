//! Conversions between force modes and velocity changes.

use alloc::string::ToString;
use core::str::FromStr;

use crate::error::LimitError;
use crate::float::Float;
use crate::vec::Vec;

/// How a force value is interpreted when applied to a body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum ForceMode {
    /// Continuous force in newtons, scaled by dt and mass.
    Force,
    /// Continuous acceleration, scaled by dt, mass ignored.
    Acceleration,
    /// Instant impulse, scaled by mass.
    Impulse,
    /// Instant velocity change, used as-is.
    VelocityChange,
}

impl ForceMode {
    /// Decode a wire tag (0..=3 in declaration order).
    pub fn from_tag(tag: u8) -> Result<Self, LimitError> {
        match tag {
            0 => Ok(ForceMode::Force),
            1 => Ok(ForceMode::Acceleration),
            2 => Ok(ForceMode::Impulse),
            3 => Ok(ForceMode::VelocityChange),
            other => Err(LimitError::UnsupportedMode {
                kind: "force mode",
                tag: other.to_string(),
            }),
        }
    }
}

impl FromStr for ForceMode {
    type Err = LimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Force" => Ok(ForceMode::Force),
            "Acceleration" => Ok(ForceMode::Acceleration),
            "Impulse" => Ok(ForceMode::Impulse),
            "VelocityChange" => Ok(ForceMode::VelocityChange),
            other => Err(LimitError::UnsupportedMode {
                kind: "force mode",
                tag: other.to_string(),
            }),
        }
    }
}

/// Velocity change produced by applying `force` in `mode` to a body of `mass` over `dt`.
pub fn velocity_change<V: Vec>(force: V, mass: V::Scalar, mode: ForceMode, dt: V::Scalar) -> V {
    match mode {
        ForceMode::Force => force.scale(dt / mass),
        ForceMode::Acceleration => force.scale(dt),
        ForceMode::Impulse => force.scale(V::Scalar::one() / mass),
        ForceMode::VelocityChange => force,
    }
}

/// The force (in newtons) equivalent to `value` applied in `mode`.
///
/// `velocity_change(to_newtons(v, m, mode, dt), m, Force, dt)` equals
/// `velocity_change(v, m, mode, dt)`.
pub fn to_newtons<V: Vec>(value: V, mass: V::Scalar, mode: ForceMode, dt: V::Scalar) -> V {
    match mode {
        ForceMode::Force => value,
        ForceMode::Acceleration => value.scale(mass),
        ForceMode::Impulse => value.scale(V::Scalar::one() / dt),
        ForceMode::VelocityChange => value.scale(mass / dt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;
    use approx::assert_relative_eq;

    const MODES: [ForceMode; 4] = [
        ForceMode::Force,
        ForceMode::Acceleration,
        ForceMode::Impulse,
        ForceMode::VelocityChange,
    ];

    #[test]
    fn velocity_change_per_mode() {
        let f = Vec3::new(10.0f64, -4.0, 2.0);
        let (m, dt) = (2.0, 0.02);
        assert_relative_eq!(velocity_change(f, m, ForceMode::Force, dt).x, 0.1, epsilon = 1e-12);
        assert_relative_eq!(velocity_change(f, m, ForceMode::Acceleration, dt).x, 0.2, epsilon = 1e-12);
        assert_relative_eq!(velocity_change(f, m, ForceMode::Impulse, dt).x, 5.0, epsilon = 1e-12);
        assert_eq!(velocity_change(f, m, ForceMode::VelocityChange, dt), f);
    }

    #[test]
    fn newtons_matches_velocity_change() {
        let value = Vec3::new(3.0f64, 0.5, -7.0);
        let (m, dt) = (4.0, 1.0 / 60.0);
        for mode in MODES {
            let direct = velocity_change(value, m, mode, dt);
            let via_newtons = velocity_change(to_newtons(value, m, mode, dt), m, ForceMode::Force, dt);
            assert_relative_eq!(direct.x, via_newtons.x, epsilon = 1e-9);
            assert_relative_eq!(direct.y, via_newtons.y, epsilon = 1e-9);
            assert_relative_eq!(direct.z, via_newtons.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn tags_decode_in_order() {
        for (tag, mode) in MODES.iter().enumerate() {
            assert_eq!(ForceMode::from_tag(tag as u8), Ok(*mode));
        }
        assert!(matches!(
            ForceMode::from_tag(9),
            Err(LimitError::UnsupportedMode { .. })
        ));
    }

    #[test]
    fn names_parse() {
        assert_eq!("Impulse".parse::<ForceMode>(), Ok(ForceMode::Impulse));
        assert!("Torque".parse::<ForceMode>().is_err());
    }
}
