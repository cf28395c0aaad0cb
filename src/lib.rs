//! Speed limits and one-way layer interactions for rigid-body simulations.
//!
//! `clampy` post-processes an external rigid-body integrator. It does not
//! integrate anything itself; it reads and writes the host body's velocity and
//! accumulated force through the [`RigidBodyHost`] trait.
//!
//! # Features
//!
//! - **Soft limits**: shape only this step's programmatic force, as a corrective velocity change
//! - **Hard limits**: clamp the full velocity and cancel the step's accumulated force
//! - **Omnidirectional, world-axis and local-axis limits**, symmetric or asymmetric
//! - **Directional clamping**: out-of-range bodies recover freely but never gain excess
//! - **Layer interactions**: Feather/Kinematic one-way contacts via a canonical layer matrix
//! - **Per-body overrides**: one body can treat a layer differently from the global table
//! - **Observable**: monitor limit passes via `StepObserver`, layer changes via listeners
//! - **`no_std` compatible**: needs only `alloc`

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod rotation;
pub mod force;
pub mod clamp;
pub mod limit;
pub mod host;
pub mod engine;
pub mod layer;
pub mod interaction;
pub mod settings;
pub mod overrides;
pub mod contact;
pub mod body;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Axes, AxisMask, Vec2, Vec3};
pub use rotation::{Rotation, Rot2, Quat};
pub use force::ForceMode;
pub use limit::{SpeedLimit, LimitType, LimitShape, Directionality, AxisLimit, AxisRange};
pub use host::{RigidBodyHost, SimBody};
pub use engine::LimitStack;
pub use layer::{LayerId, LayerRegistry, MAX_LAYERS};
pub use interaction::{InteractionType, InteractionConfiguration, InteractionTable};
pub use settings::{PhysicsSettings, SettingsData, LayerRecord};
pub use overrides::{OneWayLayerInteraction, OverrideStore};
pub use contact::{ContactPair, ContactPolicy, ContactScales, ContactSide, MassProperties};
pub use body::Body;
pub use world::{BodyId, BodyRegistry};
pub use config::StepConfig;
pub use observer::{StepObserver, NoOpStepObserver, LayerChange, LayerListener};
pub use error::LimitError;
