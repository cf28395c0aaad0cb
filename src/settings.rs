//! The layer configuration shared by every body in a simulation.
//!
//! `PhysicsSettings` is created once by the host and passed by reference to
//! whatever needs to resolve or edit layer interactions.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec as AllocVec;
use tracing::{debug, warn};

use crate::error::LimitError;
use crate::interaction::{reserved_interaction, InteractionConfiguration, InteractionTable, InteractionType};
use crate::layer::{LayerId, LayerRegistry};

/// Layer names plus the interaction matrix between them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhysicsSettings {
    layers: LayerRegistry,
    interactions: InteractionTable,
}

/// One persisted layer name.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerRecord {
    pub index: LayerId,
    pub name: String,
}

/// Persisted form of [`PhysicsSettings`]: ordered lists of records.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SettingsData {
    pub layers: AllocVec<LayerRecord>,
    pub interactions: AllocVec<InteractionConfiguration>,
    /// Indices handed out so far, so removed layers stay retired after a reload.
    #[serde(default)]
    pub slot_count: usize,
}

impl PhysicsSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    pub fn interactions(&self) -> &InteractionTable {
        &self.interactions
    }

    pub fn add_layer(&mut self, name: &str) -> Result<LayerId, LimitError> {
        self.layers.add_layer(name)
    }

    /// Remove a user layer and every interaction that mentions it.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<String, LimitError> {
        let name = self.layers.remove_layer(id)?;
        self.interactions.remove_layer(id);
        Ok(name)
    }

    pub fn layer_by_name(&self, name: &str) -> Result<LayerId, LimitError> {
        self.layers.require(name)
    }

    pub fn layer_name(&self, id: LayerId) -> Result<&str, LimitError> {
        self.layers.name_of(id)
    }

    /// How `actor` affects `receiver` in a contact.
    ///
    /// Reserved layers short-circuit with their built-in rules; everything
    /// else comes from the table, inverted when asked in descending order.
    pub fn resolve(&self, actor: LayerId, receiver: LayerId) -> Result<InteractionType, LimitError> {
        self.layers.check(actor)?;
        self.layers.check(receiver)?;
        if let Some(builtin) = reserved_interaction(actor, receiver) {
            return Ok(builtin);
        }
        Ok(self.interactions.get(actor, receiver))
    }

    /// Set the interaction of `actor` toward `receiver`. `Default` clears it.
    pub fn set_interaction(
        &mut self,
        actor: LayerId,
        receiver: LayerId,
        interaction: InteractionType,
    ) -> Result<(), LimitError> {
        for layer in [actor, receiver] {
            if layer.is_reserved() {
                return Err(LimitError::ReservedLayer(layer));
            }
            self.layers.check(layer)?;
        }
        let previous = self.interactions.set(actor, receiver, interaction);
        debug!(%actor, %receiver, ?previous, ?interaction, "layer interaction changed");
        Ok(())
    }

    /// Name-based convenience for [`set_interaction`](Self::set_interaction).
    pub fn set_interaction_by_name(
        &mut self,
        actor: &str,
        receiver: &str,
        interaction: InteractionType,
    ) -> Result<(), LimitError> {
        let actor = self.layer_by_name(actor)?;
        let receiver = self.layer_by_name(receiver)?;
        self.set_interaction(actor, receiver, interaction)
    }

    pub fn reset_interactions(&mut self) {
        self.interactions.clear();
        debug!("layer interactions reset");
    }

    /// Back to the three reserved layers and an empty table.
    pub fn reset(&mut self) {
        self.layers.reset();
        self.interactions.clear();
        debug!("layers and interactions reset");
    }

    pub fn to_data(&self) -> SettingsData {
        SettingsData {
            layers: self
                .layers
                .iter()
                .map(|(index, name)| LayerRecord { index, name: name.into() })
                .collect(),
            interactions: self.interactions.configurations(),
            slot_count: self.layers.slot_count(),
        }
    }

    /// Rebuild settings from persisted records.
    ///
    /// Reserved layers are always present regardless of the data. Records that
    /// would redefine a reserved index, duplicate a name, reference an unknown
    /// layer or configure a reserved one are rejected.
    pub fn from_data(data: &SettingsData) -> Result<Self, LimitError> {
        let mut settings = PhysicsSettings::new();
        for record in &data.layers {
            if record.index.is_reserved() || record.index == LayerId::DEFAULT {
                if settings.layers.name_of(record.index)? != record.name {
                    warn!(index = %record.index, name = record.name.as_str(), "reserved layer renamed in data");
                    return Err(LimitError::InvalidSettings(format!(
                        "reserved layer {} cannot be renamed to {:?}",
                        record.index, record.name
                    )));
                }
                continue;
            }
            settings.layers.insert_at(record.index, &record.name)?;
        }
        settings.layers.extend_to(data.slot_count);
        for config in &data.interactions {
            if config.layer_a > config.layer_b {
                warn!(a = %config.layer_a, b = %config.layer_b, "non-canonical interaction record");
                return Err(LimitError::InvalidSettings(format!(
                    "interaction ({}, {}) is not in ascending order",
                    config.layer_a, config.layer_b
                )));
            }
            settings.set_interaction(config.layer_a, config.layer_b, config.interaction)?;
        }
        debug!(
            layers = settings.layers.len(),
            interactions = settings.interactions.len(),
            "settings loaded"
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn settings_with(names: &[&str]) -> (PhysicsSettings, AllocVec<LayerId>) {
        let mut s = PhysicsSettings::new();
        let ids = names.iter().map(|n| s.add_layer(n).unwrap()).collect();
        (s, ids)
    }

    #[test]
    fn reserved_layers_cannot_be_configured() {
        let (mut s, ids) = settings_with(&["A"]);
        assert_eq!(
            s.set_interaction(LayerId::UNSTOPPABLE, ids[0], InteractionType::Feather),
            Err(LimitError::ReservedLayer(LayerId::UNSTOPPABLE))
        );
        assert_eq!(
            s.set_interaction(ids[0], LayerId::FEATHER, InteractionType::Default),
            Err(LimitError::ReservedLayer(LayerId::FEATHER))
        );
    }

    #[test]
    fn undefined_layers_rejected() {
        let (mut s, _) = settings_with(&[]);
        assert_eq!(
            s.resolve(LayerId(12), LayerId::DEFAULT),
            Err(LimitError::UndefinedLayer(LayerId(12)))
        );
        assert!(s.set_interaction(LayerId(12), LayerId::DEFAULT, InteractionType::Kinematic).is_err());
    }

    #[test]
    fn reserved_rules_win_over_table() {
        let (s, ids) = settings_with(&["A"]);
        assert_eq!(s.resolve(LayerId::UNSTOPPABLE, ids[0]), Ok(InteractionType::Kinematic));
        assert_eq!(s.resolve(ids[0], LayerId::UNSTOPPABLE), Ok(InteractionType::Feather));
        assert_eq!(s.resolve(LayerId::FEATHER, ids[0]), Ok(InteractionType::Feather));
        assert_eq!(s.resolve(ids[0], LayerId::FEATHER), Ok(InteractionType::Kinematic));
    }

    #[test]
    fn remove_layer_purges_interactions() {
        let (mut s, ids) = settings_with(&["A", "B"]);
        s.set_interaction(ids[0], ids[1], InteractionType::Kinematic).unwrap();
        s.remove_layer(ids[1]).unwrap();
        assert!(s.interactions().is_empty());
    }

    #[test]
    fn reset_restores_reserved_only() {
        let (mut s, ids) = settings_with(&["A", "B"]);
        s.set_interaction(ids[0], ids[1], InteractionType::Feather).unwrap();
        s.reset();
        assert_eq!(s, PhysicsSettings::new());
    }

    #[test]
    fn reset_interactions_keeps_layers() {
        let (mut s, ids) = settings_with(&["A", "B"]);
        s.set_interaction_by_name("A", "B", InteractionType::Feather).unwrap();
        s.reset_interactions();
        assert_eq!(s.resolve(ids[0], ids[1]), Ok(InteractionType::Default));
        assert_eq!(s.layer_by_name("B"), Ok(ids[1]));
    }

    #[test]
    fn from_data_rejects_renamed_reserved_layer() {
        let data = SettingsData {
            layers: vec![LayerRecord { index: LayerId::FEATHER, name: "Light".to_string() }],
            interactions: vec![],
            slot_count: 0,
        };
        assert!(matches!(PhysicsSettings::from_data(&data), Err(LimitError::InvalidSettings(_))));
    }

    #[test]
    fn from_data_rejects_descending_pairs() {
        let data = SettingsData {
            layers: vec![
                LayerRecord { index: LayerId(3), name: "A".to_string() },
                LayerRecord { index: LayerId(4), name: "B".to_string() },
            ],
            interactions: vec![InteractionConfiguration {
                layer_a: LayerId(4),
                layer_b: LayerId(3),
                interaction: InteractionType::Kinematic,
            }],
            slot_count: 5,
        };
        assert!(PhysicsSettings::from_data(&data).is_err());
    }

    #[test]
    fn from_data_rejects_two_names_for_one_index() {
        let data = SettingsData {
            layers: vec![
                LayerRecord { index: LayerId(3), name: "A".to_string() },
                LayerRecord { index: LayerId(3), name: "B".to_string() },
            ],
            interactions: vec![],
            slot_count: 4,
        };
        assert!(matches!(PhysicsSettings::from_data(&data), Err(LimitError::InvalidSettings(_))));
    }

    #[test]
    fn retired_indices_survive_reload() {
        let (mut s, ids) = settings_with(&["A", "B"]);
        s.remove_layer(ids[1]).unwrap();
        let mut restored = PhysicsSettings::from_data(&s.to_data()).unwrap();
        assert_eq!(restored.layers().slot_count(), 5);
        assert_ne!(restored.add_layer("C").unwrap(), ids[1]);
    }
}
