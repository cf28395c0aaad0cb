//! Pairwise layer interaction rules with canonical (ascending) storage.

use hashbrown::HashMap;

use crate::layer::LayerId;

/// How an actor layer affects a receiver layer in a contact.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum InteractionType {
    /// Normal two-way dynamics.
    #[default]
    Default,
    /// The receiver ignores the actor's mass: the actor pushes nothing.
    Feather,
    /// The actor ignores the receiver's mass: the receiver cannot move it.
    Kinematic,
}

impl InteractionType {
    /// The same interaction seen from the other side of the pair.
    pub fn inverse(self) -> Self {
        match self {
            InteractionType::Default => InteractionType::Default,
            InteractionType::Feather => InteractionType::Kinematic,
            InteractionType::Kinematic => InteractionType::Feather,
        }
    }
}

/// Built-in behavior of the reserved layers, or `None` when the table decides.
pub fn reserved_interaction(actor: LayerId, receiver: LayerId) -> Option<InteractionType> {
    if actor == receiver && actor.is_reserved() {
        return Some(InteractionType::Default);
    }
    match (actor, receiver) {
        (LayerId::UNSTOPPABLE, _) => Some(InteractionType::Kinematic),
        (LayerId::FEATHER, _) => Some(InteractionType::Feather),
        (_, LayerId::UNSTOPPABLE) => Some(InteractionType::Feather),
        (_, LayerId::FEATHER) => Some(InteractionType::Kinematic),
        _ => None,
    }
}

/// One stored rule, in canonical order (`layer_a <= layer_b`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct InteractionConfiguration {
    pub layer_a: LayerId,
    pub layer_b: LayerId,
    pub interaction: InteractionType,
}

impl InteractionConfiguration {
    /// Canonicalize `(actor, receiver, interaction)`, inverting the type if the pair is swapped.
    pub fn canonical(actor: LayerId, receiver: LayerId, interaction: InteractionType) -> Self {
        if actor <= receiver {
            InteractionConfiguration { layer_a: actor, layer_b: receiver, interaction }
        } else {
            InteractionConfiguration {
                layer_a: receiver,
                layer_b: actor,
                interaction: interaction.inverse(),
            }
        }
    }
}

/// The global layer-to-layer matrix. Only non-default entries are stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionTable {
    entries: HashMap<(LayerId, LayerId), InteractionType>,
}

impl InteractionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored interaction of `actor` toward `receiver`, `Default` if absent.
    ///
    /// Reserved-layer rules are not applied here.
    pub fn get(&self, actor: LayerId, receiver: LayerId) -> InteractionType {
        let key = InteractionConfiguration::canonical(actor, receiver, InteractionType::Default);
        let stored = self
            .entries
            .get(&(key.layer_a, key.layer_b))
            .copied()
            .unwrap_or_default();
        if actor <= receiver { stored } else { stored.inverse() }
    }

    /// Store a rule; `Default` removes the entry. Returns the previous value in the caller's order.
    pub fn set(&mut self, actor: LayerId, receiver: LayerId, interaction: InteractionType) -> InteractionType {
        let previous = self.get(actor, receiver);
        let config = InteractionConfiguration::canonical(actor, receiver, interaction);
        let key = (config.layer_a, config.layer_b);
        if config.interaction == InteractionType::Default {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, config.interaction);
        }
        previous
    }

    /// Drop every rule touching `layer`.
    pub fn remove_layer(&mut self, layer: LayerId) {
        self.entries.retain(|&(a, b), _| a != layer && b != layer);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored rules, sorted by pair for stable output.
    pub fn configurations(&self) -> alloc::vec::Vec<InteractionConfiguration> {
        let mut out: alloc::vec::Vec<_> = self
            .entries
            .iter()
            .map(|(&(layer_a, layer_b), &interaction)| InteractionConfiguration { layer_a, layer_b, interaction })
            .collect();
        out.sort_by_key(|c| (c.layer_a, c.layer_b));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [InteractionType; 3] = [
        InteractionType::Default,
        InteractionType::Feather,
        InteractionType::Kinematic,
    ];

    #[test]
    fn inverse_round_trips() {
        for t in ALL {
            assert_eq!(t.inverse().inverse(), t);
        }
        assert_eq!(InteractionType::Feather.inverse(), InteractionType::Kinematic);
        assert_eq!(InteractionType::Default.inverse(), InteractionType::Default);
    }

    #[test]
    fn reversed_lookup_inverts() {
        let (a, b) = (LayerId(3), LayerId(5));
        for t in ALL {
            let mut table = InteractionTable::new();
            table.set(b, a, t);
            assert_eq!(table.get(b, a), t);
            assert_eq!(table.get(a, b), t.inverse());
        }
    }

    #[test]
    fn default_removes_entry() {
        let mut table = InteractionTable::new();
        table.set(LayerId(4), LayerId(3), InteractionType::Kinematic);
        assert_eq!(table.len(), 1);
        assert_eq!(table.configurations()[0], InteractionConfiguration {
            layer_a: LayerId(3),
            layer_b: LayerId(4),
            interaction: InteractionType::Feather,
        });
        let previous = table.set(LayerId(3), LayerId(4), InteractionType::Default);
        assert_eq!(previous, InteractionType::Feather);
        assert!(table.is_empty());
    }

    #[test]
    fn same_layer_pair_is_stored_once() {
        let mut table = InteractionTable::new();
        table.set(LayerId(6), LayerId(6), InteractionType::Feather);
        assert_eq!(table.get(LayerId(6), LayerId(6)), InteractionType::Feather);
    }

    #[test]
    fn reserved_rules() {
        let x = LayerId(3);
        assert_eq!(reserved_interaction(LayerId::UNSTOPPABLE, x), Some(InteractionType::Kinematic));
        assert_eq!(reserved_interaction(x, LayerId::UNSTOPPABLE), Some(InteractionType::Feather));
        assert_eq!(reserved_interaction(LayerId::FEATHER, x), Some(InteractionType::Feather));
        assert_eq!(reserved_interaction(x, LayerId::FEATHER), Some(InteractionType::Kinematic));
        assert_eq!(reserved_interaction(LayerId::DEFAULT, x), None);
        assert_eq!(
            reserved_interaction(LayerId::FEATHER, LayerId::FEATHER),
            Some(InteractionType::Default)
        );
    }

    #[test]
    fn removing_a_layer_purges_its_rules() {
        let mut table = InteractionTable::new();
        table.set(LayerId(3), LayerId(4), InteractionType::Kinematic);
        table.set(LayerId(5), LayerId(4), InteractionType::Feather);
        table.set(LayerId(5), LayerId(6), InteractionType::Feather);
        table.remove_layer(LayerId(4));
        assert_eq!(table.len(), 1);
    }
}
