//! Scene save/load.
//!
//! Captures entity locations and the built-in components (hitboxes, movement,
//! sprites). Game-defined components are not part of a snapshot.

use std::path::Path;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::entity::{Entity, EntityId};
use crate::hitbox::Hitbox;
use crate::math::Vec2;
use crate::movement::Movement;
use crate::scene::Scene;
use crate::sprite::Sprite;

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable entity with its built-in components.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub location: Vec2,
    #[serde(default)]
    pub hitboxes: Vec<Hitbox>,
    #[serde(default)]
    pub movement: Option<Movement>,
    #[serde(default)]
    pub sprites: Vec<Sprite>,
}

impl EntitySnapshot {
    fn capture(id: EntityId, entity: &Entity) -> Self {
        Self {
            id,
            location: entity.location(),
            hitboxes: entity.hitboxes().into_iter().copied().collect(),
            movement: entity.component::<Movement>().cloned(),
            sprites: entity.components::<Sprite>().into_iter().cloned().collect(),
        }
    }

    fn restore(&self) -> Result<Entity> {
        let mut entity = Entity::new(self.location);
        for hitbox in &self.hitboxes {
            entity.add_component(*hitbox)?;
        }
        if let Some(movement) = &self.movement {
            entity.add_component(movement.clone())?;
        }
        for sprite in &self.sprites {
            entity.add_component(sprite.clone())?;
        }
        Ok(entity)
    }
}

/// Complete scene representation that can be serialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Format version for migration support.
    pub version: u32,
    pub entities: Vec<EntitySnapshot>,
}

impl SceneSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Scene {
    /// Capture the current state of every entity.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            version: SNAPSHOT_VERSION,
            entities: self
                .entities()
                .map(|(id, entity)| EntitySnapshot::capture(id, entity))
                .collect(),
        }
    }

    /// Rebuild a scene from `snapshot`, keeping entity ids.
    ///
    /// The new scene has no collision handler; installing one afterwards
    /// seeds it from the restored entities.
    pub fn from_snapshot(snapshot: &SceneSnapshot, config: SimulationConfig) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            bail!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version,
                SNAPSHOT_VERSION
            );
        }

        let mut scene = Scene::with_config(config);
        for entry in &snapshot.entities {
            if scene.contains(entry.id) {
                bail!("duplicate entity id {:?} in snapshot", entry.id);
            }
            if entry.id.to_u32().checked_add(1).is_none() {
                bail!("entity id {:?} leaves no room for new entities", entry.id);
            }
            scene.insert_with_id(entry.id, entry.restore()?);
        }
        Ok(scene)
    }
}
