//! Registry of bodies taking part in layer-aware contact modification.

use alloc::vec::Vec as AllocVec;
use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::body::Body;
use crate::contact::{ContactPair, ContactPolicy, ContactScales, ContactSide};
use crate::error::LimitError;
use crate::settings::PhysicsSettings;
use crate::vec::Axes;

/// The host's instance id for a rigid body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct BodyId(pub u64);

/// Bodies known to the contact pass, keyed by host instance id.
#[derive(Debug)]
pub struct BodyRegistry<V: Axes> {
    bodies: HashMap<BodyId, Body<V>>,
}

impl<V: Axes> Default for BodyRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Axes> BodyRegistry<V> {
    pub fn new() -> Self {
        BodyRegistry { bodies: HashMap::new() }
    }

    /// Register `id`, or return the existing body.
    pub fn register(&mut self, id: BodyId) -> &mut Body<V> {
        self.bodies.entry(id).or_insert_with(|| {
            debug!(body = id.0, "body registered");
            Body::new(id)
        })
    }

    /// Forget `id`. Its overrides and layer listeners are dropped.
    pub fn unregister(&mut self, id: BodyId) -> Option<Body<V>> {
        let mut body = self.bodies.remove(&id)?;
        body.detach();
        debug!(body = id.0, "body unregistered");
        Some(body)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body<V>> {
        self.bodies.get(&id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body<V>> {
        self.bodies.get_mut(&id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut Body<V>)> + '_ {
        self.bodies.iter_mut().map(|(id, body)| (*id, body))
    }

    fn side(&self, id: BodyId) -> Option<ContactSide<'_>> {
        self.bodies.get(&id).map(|body| ContactSide {
            layer: body.layer(),
            overrides: body.layer_overrides(),
        })
    }

    /// Rewrite the mass-property scales of every contact between registered
    /// bodies that needs it. Pairs with an unregistered body, and pairs with no
    /// special interaction, are left untouched. Returns how many were modified.
    ///
    /// Every pair is resolved before any is written, so an error leaves the
    /// whole batch unchanged.
    pub fn modify_contacts(
        &self,
        settings: &PhysicsSettings,
        pairs: &mut [ContactPair],
    ) -> Result<usize, LimitError> {
        let policy = ContactPolicy::new(settings);
        let mut resolved: AllocVec<Option<ContactScales>> = AllocVec::with_capacity(pairs.len());
        for pair in pairs.iter() {
            let scales = match (self.side(pair.body_a), self.side(pair.body_b)) {
                (Some(a), Some(b)) => policy.resolve(a, b)?,
                _ => None,
            };
            resolved.push(scales);
        }
        let mut modified = 0;
        for (pair, scales) in pairs.iter_mut().zip(resolved) {
            if let Some(scales) = scales {
                pair.mass_properties.apply(scales);
                modified += 1;
            }
        }
        trace!(pairs = pairs.len(), modified, "contacts modified");
        Ok(modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionType;
    use crate::vec::Vec3;

    #[test]
    fn register_is_idempotent() {
        let mut reg = BodyRegistry::<Vec3<f32>>::new();
        reg.register(BodyId(1));
        reg.register(BodyId(1));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unregister_clears_overrides() {
        let settings = PhysicsSettings::new();
        let mut reg = BodyRegistry::<Vec3<f32>>::new();
        reg.register(BodyId(1))
            .add_layer_override(&settings, crate::layer::LayerId::DEFAULT, InteractionType::Kinematic)
            .unwrap();
        let body = reg.unregister(BodyId(1)).unwrap();
        assert!(body.layer_overrides().is_empty());
        assert!(reg.unregister(BodyId(1)).is_none());
    }

    #[test]
    fn unknown_bodies_are_skipped() {
        let settings = PhysicsSettings::new();
        let mut reg = BodyRegistry::<Vec3<f32>>::new();
        reg.register(BodyId(1));
        let mut pairs = [ContactPair::new(BodyId(1), BodyId(2))];
        assert_eq!(reg.modify_contacts(&settings, &mut pairs), Ok(0));
        assert_eq!(pairs[0], ContactPair::new(BodyId(1), BodyId(2)));
    }

    #[test]
    fn failing_pair_leaves_batch_untouched() {
        let mut settings = PhysicsSettings::new();
        let a = settings.add_layer("A").unwrap();
        let b = settings.add_layer("B").unwrap();
        let c = settings.add_layer("C").unwrap();
        settings.set_interaction(a, b, InteractionType::Kinematic).unwrap();

        let mut reg = BodyRegistry::<Vec3<f32>>::new();
        reg.register(BodyId(1)).set_layer(&settings, a).unwrap();
        reg.register(BodyId(2)).set_layer(&settings, b).unwrap();
        reg.register(BodyId(3)).set_layer(&settings, c).unwrap();
        settings.remove_layer(c).unwrap();

        let mut pairs = [
            ContactPair::new(BodyId(1), BodyId(2)),
            ContactPair::new(BodyId(1), BodyId(3)),
        ];
        assert_eq!(
            reg.modify_contacts(&settings, &mut pairs),
            Err(LimitError::UndefinedLayer(c))
        );
        assert_eq!(pairs[0], ContactPair::new(BodyId(1), BodyId(2)));
        assert_eq!(pairs[1], ContactPair::new(BodyId(1), BodyId(3)));
    }
}
