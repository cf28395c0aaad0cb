//! Hooks for watching limit application and layer changes.

use alloc::boxed::Box;

use crate::layer::LayerId;
use crate::world::BodyId;

/// Trait for observing one body's limit pass.
///
/// Implement this trait to monitor limit application (e.g., for debugging,
/// visualization, or tuning). All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after the soft limit at `index` in the body's list has been applied.
    fn on_soft_limit(&mut self, _index: usize) {}

    /// Called after the exempt velocity change has been handed to the host.
    fn on_exempt_applied(&mut self) {}

    /// Called after the hard limit at `index` in the body's list has been applied.
    fn on_hard_limit(&mut self, _index: usize) {}

    /// Called when the pass is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// A body moved from one layer to another.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayerChange {
    pub body: BodyId,
    pub old: LayerId,
    pub new: LayerId,
}

/// Callback invoked synchronously after a body's layer field changes.
pub type LayerListener = Box<dyn FnMut(&LayerChange)>;
