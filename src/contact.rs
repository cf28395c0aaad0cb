//! Turning layer interactions into per-contact mass and inertia scales.

use crate::error::LimitError;
use crate::interaction::InteractionType;
use crate::layer::LayerId;
use crate::overrides::OverrideStore;
use crate::settings::PhysicsSettings;
use crate::world::BodyId;

/// One body's view of a contact.
#[derive(Copy, Clone, Debug)]
pub struct ContactSide<'a> {
    pub layer: LayerId,
    pub overrides: &'a OverrideStore,
}

/// Inverse mass/inertia multipliers for the two bodies of a contact.
///
/// `a_to_b` scales body A's inverse mass and inertia: 0 leaves A unmoved by B.
/// `b_to_a` does the same for B.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactScales {
    pub a_to_b: f32,
    pub b_to_a: f32,
}

impl ContactScales {
    pub const UNCHANGED: ContactScales = ContactScales { a_to_b: 1.0, b_to_a: 1.0 };
}

/// Mass-properties record the host exposes per contact pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MassProperties {
    pub inverse_mass_scale_a: f32,
    pub inverse_inertia_scale_a: f32,
    pub inverse_mass_scale_b: f32,
    pub inverse_inertia_scale_b: f32,
}

impl Default for MassProperties {
    fn default() -> Self {
        MassProperties {
            inverse_mass_scale_a: 1.0,
            inverse_inertia_scale_a: 1.0,
            inverse_mass_scale_b: 1.0,
            inverse_inertia_scale_b: 1.0,
        }
    }
}

impl MassProperties {
    /// Overwrite all four scales from `scales`.
    pub fn apply(&mut self, scales: ContactScales) {
        self.inverse_mass_scale_a = scales.a_to_b;
        self.inverse_inertia_scale_a = scales.a_to_b;
        self.inverse_mass_scale_b = scales.b_to_a;
        self.inverse_inertia_scale_b = scales.b_to_a;
    }
}

/// A contact between two bodies, as handed over by the host each step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactPair {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub mass_properties: MassProperties,
}

impl ContactPair {
    pub fn new(body_a: BodyId, body_b: BodyId) -> Self {
        ContactPair { body_a, body_b, mass_properties: MassProperties::default() }
    }
}

/// Decides contact scales from the global settings and per-body overrides.
///
/// Resolution has no side effects, so it is safe to skip or repeat.
#[derive(Copy, Clone, Debug)]
pub struct ContactPolicy<'a> {
    settings: &'a PhysicsSettings,
}

impl<'a> ContactPolicy<'a> {
    pub fn new(settings: &'a PhysicsSettings) -> Self {
        ContactPolicy { settings }
    }

    /// Interaction of `actor` toward `receiver`: the actor's override if it has
    /// one for that layer, otherwise the global rule.
    pub fn interaction(&self, actor: ContactSide<'_>, receiver: LayerId) -> Result<InteractionType, LimitError> {
        if actor.layer.is_reserved() {
            return self.settings.resolve(actor.layer, receiver);
        }
        match actor.overrides.get(receiver) {
            Some(interaction) => Ok(interaction),
            None => self.settings.resolve(actor.layer, receiver),
        }
    }

    /// Scales for a contact, or `None` when both sides keep their full effect.
    pub fn resolve(&self, a: ContactSide<'_>, b: ContactSide<'_>) -> Result<Option<ContactScales>, LimitError> {
        let mut scales = ContactScales::UNCHANGED;
        match self.interaction(a, b.layer)? {
            InteractionType::Kinematic => scales.a_to_b = 0.0,
            InteractionType::Feather => scales.b_to_a = 0.0,
            InteractionType::Default => {}
        }
        match self.interaction(b, a.layer)? {
            InteractionType::Kinematic => scales.b_to_a = 0.0,
            InteractionType::Feather => scales.a_to_b = 0.0,
            InteractionType::Default => {}
        }
        if scales == ContactScales::UNCHANGED {
            Ok(None)
        } else {
            Ok(Some(scales))
        }
    }
}
