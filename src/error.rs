//! Error types for limit and layer operations.

use alloc::string::String;
use thiserror::Error;

use crate::layer::LayerId;

/// Errors that can occur while configuring limits, layers, or interactions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LimitError {
    /// Omnidirectional speed limits must be non-negative (NaN and +inf mean "no limit").
    #[error("speed limit must be >= 0, got {value}")]
    NegativeSpeedLimit { value: f64 },
    /// Symmetric axis limits need a non-negative max on every axis.
    #[error("symmetric axis limit needs max >= 0 on axis {axis}, got {value}")]
    NegativeAxisLimit { axis: usize, value: f64 },
    /// Axis index past the vector's dimension.
    #[error("axis {axis} out of range (dimension: {dim})")]
    AxisOutOfRange { axis: usize, dim: usize },
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Reserved layers have fixed behavior and cannot be configured or removed.
    #[error("layer {0} is reserved")]
    ReservedLayer(LayerId),
    /// Layer index is not registered.
    #[error("layer {0} is not defined")]
    UndefinedLayer(LayerId),
    /// Layer name is not registered.
    #[error("no layer named {0:?}")]
    UnknownLayerName(String),
    /// No free layer index left.
    #[error("all {max} layer slots are in use")]
    LayerCapacity { max: usize },
    /// A mode tag that no dispatch point understands.
    #[error("unsupported {kind} tag {tag:?}")]
    UnsupportedMode { kind: &'static str, tag: String },
    /// Persisted settings could not be rebuilt.
    #[error("invalid settings data: {0}")]
    InvalidSettings(String),
}
