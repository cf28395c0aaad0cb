//! Configuration for the per-step limit pass.

use crate::float::Float;

/// Timing configuration shared by every body's limit pass.
///
/// # Builder Pattern
/// ```
/// use clampy::config::StepConfig;
///
/// let config: StepConfig<f32> = StepConfig::new().with_fixed_dt(1.0 / 60.0);
/// assert!((config.fixed_dt - 1.0 / 60.0).abs() < 1e-9);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepConfig<F: Float> {
    /// Fixed timestep of the host simulation, in seconds. Default: 0.02.
    ///
    /// Must match the step the host integrates with, since accumulated
    /// force is turned into velocity change with it.
    pub fixed_dt: F,
}

impl<F: Float> StepConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        StepConfig {
            fixed_dt: F::from_f32(0.02),
        }
    }

    /// Set the fixed timestep. Non-positive values are ignored.
    pub fn with_fixed_dt(mut self, fixed_dt: F) -> Self {
        if fixed_dt > F::zero() {
            self.fixed_dt = fixed_dt;
        }
        self
    }
}

impl<F: Float> Default for StepConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
