//! Named layers and the index space they occupy.

use alloc::string::{String, ToString};
use alloc::vec::Vec as AllocVec;
use core::fmt;
use tracing::debug;

use crate::error::LimitError;

/// Maximum number of layer indices, reserved ones included.
pub const MAX_LAYERS: usize = 32;

/// A small integer layer index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u8);

impl LayerId {
    /// Ordinary two-way dynamics.
    pub const DEFAULT: LayerId = LayerId(0);
    /// Never affected by anything it touches.
    pub const UNSTOPPABLE: LayerId = LayerId(1);
    /// Never affects anything it touches.
    pub const FEATHER: LayerId = LayerId(2);

    /// True for the layers with built-in behavior that cannot be configured.
    pub fn is_reserved(self) -> bool {
        self == Self::UNSTOPPABLE || self == Self::FEATHER
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const RESERVED_NAMES: [&str; 3] = ["Default", "Unstoppable", "Feather"];

/// Layer names by index. Removed user layers leave a vacant slot so the
/// indices of the remaining layers never shift.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerRegistry {
    slots: AllocVec<Option<String>>,
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerRegistry {
    /// A registry holding only the three reserved layers.
    pub fn new() -> Self {
        LayerRegistry {
            slots: RESERVED_NAMES.iter().map(|name| Some(name.to_string())).collect(),
        }
    }

    /// Register `name`, or return its index if it already exists.
    ///
    /// New layers are appended; vacant slots are reused only once the index
    /// space is exhausted.
    pub fn add_layer(&mut self, name: &str) -> Result<LayerId, LimitError> {
        if let Some(id) = self.layer_by_name(name) {
            return Ok(id);
        }
        let index = if self.slots.len() < MAX_LAYERS {
            self.slots.push(None);
            self.slots.len() - 1
        } else {
            self.slots
                .iter()
                .position(Option::is_none)
                .ok_or(LimitError::LayerCapacity { max: MAX_LAYERS })?
        };
        self.slots[index] = Some(name.to_string());
        let id = LayerId(index as u8);
        debug!(%id, name, "layer registered");
        Ok(id)
    }

    /// Insert `name` at a specific index. Used when rebuilding persisted settings.
    pub(crate) fn insert_at(&mut self, id: LayerId, name: &str) -> Result<(), LimitError> {
        if id.index() >= MAX_LAYERS {
            return Err(LimitError::LayerCapacity { max: MAX_LAYERS });
        }
        if self.layer_by_name(name).is_some_and(|existing| existing != id) {
            return Err(LimitError::InvalidSettings(alloc::format!("duplicate layer name {name:?}")));
        }
        self.extend_to(id.index() + 1);
        if let Some(existing) = self.slots[id.index()].as_deref() {
            if existing != name {
                return Err(LimitError::InvalidSettings(alloc::format!(
                    "layer {id} defined twice, as {existing:?} and {name:?}"
                )));
            }
        }
        self.slots[id.index()] = Some(name.to_string());
        Ok(())
    }

    /// Number of indices handed out so far, vacant ones included.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Grow the index space to `count` slots, leaving new ones vacant.
    pub(crate) fn extend_to(&mut self, count: usize) {
        let count = count.min(MAX_LAYERS);
        if self.slots.len() < count {
            self.slots.resize(count, None);
        }
    }

    /// Remove a user layer. Reserved layers (and `Default`) stay.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<String, LimitError> {
        if id.is_reserved() || id == LayerId::DEFAULT {
            return Err(LimitError::ReservedLayer(id));
        }
        let name = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(LimitError::UndefinedLayer(id))?;
        debug!(%id, name = name.as_str(), "layer removed");
        Ok(name)
    }

    pub fn layer_by_name(&self, name: &str) -> Option<LayerId> {
        self.slots
            .iter()
            .position(|slot| slot.as_deref() == Some(name))
            .map(|index| LayerId(index as u8))
    }

    /// Like [`layer_by_name`](Self::layer_by_name) but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<LayerId, LimitError> {
        self.layer_by_name(name)
            .ok_or_else(|| LimitError::UnknownLayerName(name.to_string()))
    }

    pub fn name_of(&self, id: LayerId) -> Result<&str, LimitError> {
        self.slots
            .get(id.index())
            .and_then(|slot| slot.as_deref())
            .ok_or(LimitError::UndefinedLayer(id))
    }

    pub fn is_defined(&self, id: LayerId) -> bool {
        self.name_of(id).is_ok()
    }

    /// Fail with `UndefinedLayer` unless `id` is registered.
    pub fn check(&self, id: LayerId) -> Result<(), LimitError> {
        self.name_of(id).map(|_| ())
    }

    /// Defined layers in index order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &str)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|name| (LayerId(index as u8), name)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every user layer.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_layers_exist_up_front() {
        let reg = LayerRegistry::new();
        assert_eq!(reg.layer_by_name("Default"), Some(LayerId::DEFAULT));
        assert_eq!(reg.layer_by_name("Unstoppable"), Some(LayerId::UNSTOPPABLE));
        assert_eq!(reg.layer_by_name("Feather"), Some(LayerId::FEATHER));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn add_layer_is_idempotent() {
        let mut reg = LayerRegistry::new();
        let a = reg.add_layer("Player").unwrap();
        let again = reg.add_layer("Player").unwrap();
        assert_eq!(a, LayerId(3));
        assert_eq!(a, again);
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn reserved_layers_cannot_be_removed() {
        let mut reg = LayerRegistry::new();
        assert_eq!(reg.remove_layer(LayerId::FEATHER), Err(LimitError::ReservedLayer(LayerId::FEATHER)));
        assert!(reg.remove_layer(LayerId::UNSTOPPABLE).is_err());
        assert!(reg.remove_layer(LayerId::DEFAULT).is_err());
    }

    #[test]
    fn removal_keeps_other_indices() {
        let mut reg = LayerRegistry::new();
        let a = reg.add_layer("A").unwrap();
        let b = reg.add_layer("B").unwrap();
        reg.remove_layer(a).unwrap();
        assert!(!reg.is_defined(a));
        assert_eq!(reg.name_of(b), Ok("B"));
        assert_eq!(reg.add_layer("C").unwrap(), LayerId(5));
    }

    #[test]
    fn removed_last_layer_is_not_reissued() {
        let mut reg = LayerRegistry::new();
        reg.add_layer("A").unwrap();
        let b = reg.add_layer("B").unwrap();
        reg.remove_layer(b).unwrap();
        let fresh = reg.add_layer("New").unwrap();
        assert_ne!(fresh, b);
        assert_eq!(fresh, LayerId(5));
        assert_eq!(reg.name_of(b), Err(LimitError::UndefinedLayer(b)));
        assert_eq!(reg.slot_count(), 6);
    }

    #[test]
    fn insert_at_rejects_occupied_slot() {
        let mut reg = LayerRegistry::new();
        reg.insert_at(LayerId(4), "A").unwrap();
        reg.insert_at(LayerId(4), "A").unwrap();
        assert!(matches!(reg.insert_at(LayerId(4), "B"), Err(LimitError::InvalidSettings(_))));
        assert_eq!(reg.name_of(LayerId(4)), Ok("A"));
        assert!(!reg.is_defined(LayerId(3)));
    }

    #[test]
    fn vacant_slots_reused_when_full() {
        let mut reg = LayerRegistry::new();
        for i in 3..MAX_LAYERS {
            reg.add_layer(&alloc::format!("L{i}")).unwrap();
        }
        assert_eq!(
            reg.add_layer("overflow"),
            Err(LimitError::LayerCapacity { max: MAX_LAYERS })
        );
        reg.remove_layer(LayerId(7)).unwrap();
        assert_eq!(reg.add_layer("overflow").unwrap(), LayerId(7));
    }

    #[test]
    fn unknown_lookups_fail() {
        let reg = LayerRegistry::new();
        assert_eq!(reg.name_of(LayerId(9)), Err(LimitError::UndefinedLayer(LayerId(9))));
        assert_eq!(reg.require("Ghost"), Err(LimitError::UnknownLayerName("Ghost".to_string())));
    }
}
