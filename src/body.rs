//! The per-body component: speed limits, layer membership, and one-way overrides.

use alloc::boxed::Box;
use alloc::vec::Vec as AllocVec;
use core::fmt;
use tracing::debug;

use crate::config::StepConfig;
use crate::engine::LimitStack;
use crate::error::LimitError;
use crate::force::{velocity_change, ForceMode};
use crate::host::RigidBodyHost;
use crate::interaction::InteractionType;
use crate::layer::LayerId;
use crate::limit::SpeedLimit;
use crate::observer::{LayerChange, LayerListener, StepObserver};
use crate::overrides::OverrideStore;
use crate::rotation::Rotation;
use crate::settings::PhysicsSettings;
use crate::vec::Axes;
use crate::world::BodyId;

/// State this crate keeps for one host body.
///
/// The host owns mass, velocity and forces; `Body` only holds what the limit
/// and contact passes need, and acts on the host through [`RigidBodyHost`].
pub struct Body<V: Axes> {
    id: BodyId,
    layer: LayerId,
    limits: LimitStack<V>,
    overrides: OverrideStore,
    exempt: AllocVec<(V, ForceMode)>,
    listeners: AllocVec<LayerListener>,
}

impl<V: Axes> fmt::Debug for Body<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("id", &self.id)
            .field("layer", &self.layer)
            .field("limits", &self.limits)
            .field("overrides", &self.overrides)
            .field("exempt", &self.exempt)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<V: Axes> Body<V> {
    /// A body on the `Default` layer with no limits.
    pub fn new(id: BodyId) -> Self {
        Body {
            id,
            layer: LayerId::DEFAULT,
            limits: LimitStack::new(),
            overrides: OverrideStore::new(),
            exempt: AllocVec::new(),
            listeners: AllocVec::new(),
        }
    }

    pub fn id(&self) -> BodyId { self.id }
    pub fn layer(&self) -> LayerId { self.layer }

    // ---- speed limits ----

    /// Append a limit; returns its index in the list.
    pub fn add_speed_limit(&mut self, limit: SpeedLimit<V>) -> usize {
        self.limits.push(limit)
    }

    pub fn remove_speed_limit(&mut self, index: usize) -> Option<SpeedLimit<V>> {
        self.limits.remove(index)
    }

    pub fn speed_limits(&self) -> &[SpeedLimit<V>] {
        self.limits.as_slice()
    }

    pub fn speed_limit_mut(&mut self, index: usize) -> Option<&mut SpeedLimit<V>> {
        self.limits.get_mut(index)
    }

    pub fn clear_speed_limits(&mut self) {
        self.limits.clear();
    }

    // ---- velocity ----

    pub fn velocity<H: RigidBodyHost<V>>(&self, host: &H) -> V {
        host.linear_velocity()
    }

    pub fn set_velocity<H: RigidBodyHost<V>>(&self, host: &mut H, velocity: V) {
        host.set_linear_velocity(velocity);
    }

    /// Velocity expressed in the body's own frame.
    pub fn local_velocity<H: RigidBodyHost<V>>(&self, host: &H) -> V {
        host.rotation().inverse_rotate(host.linear_velocity())
    }

    pub fn set_local_velocity<H: RigidBodyHost<V>>(&self, host: &mut H, local: V) {
        let world = host.rotation().rotate(local);
        host.set_linear_velocity(world);
    }

    // ---- forces ----

    /// Add a force that this body's soft limits will shape.
    pub fn add_force<H: RigidBodyHost<V>>(&self, host: &mut H, force: V, mode: ForceMode) {
        host.add_force(force, mode);
    }

    /// Like [`add_force`](Self::add_force), with `force` given in the body's frame.
    pub fn add_local_force<H: RigidBodyHost<V>>(&self, host: &mut H, force: V, mode: ForceMode) {
        let world = host.rotation().rotate(force);
        host.add_force(world, mode);
    }

    /// Add a force that bypasses soft limits. It is converted with the step's
    /// `fixed_dt` and handed to the host during [`step`](Self::step), before
    /// hard limits run.
    pub fn add_exempt_force(&mut self, force: V, mode: ForceMode) {
        self.exempt.push((force, mode));
    }

    /// Exempt forces waiting for the next step.
    pub fn pending_exempt(&self) -> &[(V, ForceMode)] {
        &self.exempt
    }

    /// Apply this body's limits to `host` for the current step.
    pub fn step<H, O>(&mut self, host: &mut H, config: &StepConfig<V::Scalar>, observer: &mut O)
    where
        H: RigidBodyHost<V>,
        O: StepObserver,
    {
        let mass = host.mass();
        let exempt = self.exempt.drain(..).fold(V::zero(), |sum, (force, mode)| {
            sum + velocity_change(force, mass, mode, config.fixed_dt)
        });
        self.limits.apply(host, exempt, config.fixed_dt, observer);
    }

    // ---- layers ----

    /// Register a callback fired after every layer change.
    pub fn on_layer_change(&mut self, listener: impl FnMut(&LayerChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Move the body to `layer`. Returns the previous layer.
    pub fn set_layer(&mut self, settings: &PhysicsSettings, layer: LayerId) -> Result<LayerId, LimitError> {
        settings.layers().check(layer)?;
        let old = self.layer;
        if old == layer {
            return Ok(old);
        }
        self.layer = layer;
        debug!(body = self.id.0, %old, new = %layer, "body layer changed");
        let change = LayerChange { body: self.id, old, new: layer };
        for listener in self.listeners.iter_mut() {
            listener(&change);
        }
        Ok(old)
    }

    // ---- one-way overrides ----

    /// Override how this body, as actor, treats `receiver`.
    pub fn add_layer_override(
        &mut self,
        settings: &PhysicsSettings,
        receiver: LayerId,
        interaction: InteractionType,
    ) -> Result<Option<InteractionType>, LimitError> {
        settings.layers().check(receiver)?;
        self.overrides.insert(receiver, interaction)
    }

    pub fn remove_layer_override(&mut self, receiver: LayerId) -> Option<InteractionType> {
        self.overrides.remove(receiver)
    }

    pub fn layer_overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    /// Drop everything tied to the body's lifetime in a simulation.
    pub(crate) fn detach(&mut self) {
        self.overrides.clear();
        self.listeners.clear();
        self.exempt.clear();
    }
}
