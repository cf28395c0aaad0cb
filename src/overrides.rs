//! Per-body one-way interaction overrides.

use alloc::vec::Vec as AllocVec;

use crate::error::LimitError;
use crate::interaction::InteractionType;
use crate::layer::LayerId;

/// "This body, as actor, treats `receiver` like so", ahead of the global table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct OneWayLayerInteraction {
    pub receiver: LayerId,
    pub interaction: InteractionType,
}

/// Overrides owned by a single body, at most one per receiver layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverrideStore {
    entries: AllocVec<OneWayLayerInteraction>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the override for `receiver`. Reserved receivers are rejected.
    pub fn insert(
        &mut self,
        receiver: LayerId,
        interaction: InteractionType,
    ) -> Result<Option<InteractionType>, LimitError> {
        if receiver.is_reserved() {
            return Err(LimitError::ReservedLayer(receiver));
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.receiver == receiver) {
            let previous = entry.interaction;
            entry.interaction = interaction;
            return Ok(Some(previous));
        }
        self.entries.push(OneWayLayerInteraction { receiver, interaction });
        Ok(None)
    }

    pub fn remove(&mut self, receiver: LayerId) -> Option<InteractionType> {
        let index = self.entries.iter().position(|e| e.receiver == receiver)?;
        Some(self.entries.remove(index).interaction)
    }

    pub fn get(&self, receiver: LayerId) -> Option<InteractionType> {
        self.entries
            .iter()
            .find(|e| e.receiver == receiver)
            .map(|e| e.interaction)
    }

    pub fn as_slice(&self) -> &[OneWayLayerInteraction] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces() {
        let mut store = OverrideStore::new();
        assert_eq!(store.insert(LayerId(4), InteractionType::Feather), Ok(None));
        assert_eq!(
            store.insert(LayerId(4), InteractionType::Kinematic),
            Ok(Some(InteractionType::Feather))
        );
        assert_eq!(store.as_slice().len(), 1);
        assert_eq!(store.get(LayerId(4)), Some(InteractionType::Kinematic));
    }

    #[test]
    fn reserved_receivers_rejected() {
        let mut store = OverrideStore::new();
        assert_eq!(
            store.insert(LayerId::UNSTOPPABLE, InteractionType::Feather),
            Err(LimitError::ReservedLayer(LayerId::UNSTOPPABLE))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn remove_returns_old_value() {
        let mut store = OverrideStore::new();
        store.insert(LayerId::DEFAULT, InteractionType::Default).unwrap();
        assert_eq!(store.remove(LayerId::DEFAULT), Some(InteractionType::Default));
        assert_eq!(store.remove(LayerId::DEFAULT), None);
    }
}
