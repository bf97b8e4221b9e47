//! The scene: entity storage, tick driver and collision bookkeeping.
//!
//! Entities report component attachments over a channel instead of touching
//! collision state directly. The scene drains that channel at every boundary
//! (adding or removing entities, releasing an [`EntityMut`], ticking, or an
//! explicit [`Scene::flush_events`]) and keeps its [`CollisionHandler`] in sync.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use crate::collision::CollisionHandler;
use crate::component::{Component, ComponentKind};
use crate::config::SimulationConfig;
use crate::entity::{Entity, EntityId, EventSink};
use crate::error::SceneError;
use crate::math::Vec2;
use crate::sprite::SpriteBatch;

/// Notification sent from an entity to its owning scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SceneEvent {
    ComponentAttached { entity: EntityId, kind: ComponentKind },
}

pub struct Scene {
    config: SimulationConfig,
    next_id: u32,
    entities: BTreeMap<EntityId, Entity>,
    collision: Option<CollisionHandler>,
    events_tx: Sender<SceneEvent>,
    events_rx: Receiver<SceneEvent>,
}

impl Scene {
    /// An empty scene with default settings and no collision handler.
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        Self {
            config,
            next_id: 1,
            entities: BTreeMap::new(),
            collision: None,
            events_tx,
            events_rx,
        }
    }

    #[must_use]
    pub fn with_collision_handler(mut self, handler: CollisionHandler) -> Self {
        self.set_collision_handler(handler);
        self
    }

    /// Install `handler`, seeding it from every entity already in the scene.
    /// Returns the handler it replaces, if any.
    pub fn set_collision_handler(
        &mut self,
        mut handler: CollisionHandler,
    ) -> Option<CollisionHandler> {
        self.flush_events();
        for (id, entity) in &self.entities {
            handler.track(*id, entity);
        }
        self.collision.replace(handler)
    }

    pub fn collision(&self) -> Option<&CollisionHandler> {
        self.collision.as_ref()
    }

    pub fn collision_mut(&mut self) -> Option<&mut CollisionHandler> {
        self.collision.as_mut()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Mutable access to an entity.
    ///
    /// Components attached through the returned guard are registered with the
    /// collision handler when the guard is dropped.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<EntityMut<'_>> {
        self.flush_events();
        let entity = self.entities.get_mut(&id)?;
        Some(EntityMut {
            id,
            entity,
            collision: self.collision.as_mut(),
            events: &self.events_rx,
        })
    }

    /// All entities in id order, which is also insertion order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Create an empty entity at `location`.
    pub fn spawn(&mut self, location: Vec2) -> EntityId {
        self.add_entity(Entity::new(location))
    }

    /// Take ownership of `entity` and track whatever components it already carries.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.insert_with_id(id, entity);
        id
    }

    /// Attach `component` to entity `id` and register it with the collision
    /// handler before returning.
    pub fn add_component<T: Component>(
        &mut self,
        id: EntityId,
        component: T,
    ) -> Result<(), SceneError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(SceneError::UnknownEntity(id))?;
        entity.add_component(component)?;
        self.flush_events();
        Ok(())
    }

    /// Remove an entity along with its hitboxes and movable membership.
    ///
    /// The returned entity is detached from the scene; components added to it
    /// afterwards are not tracked.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.flush_events();
        let mut entity = self.entities.remove(&id)?;
        entity.detach_sink();
        if let Some(collision) = &mut self.collision {
            collision.forget(id);
        }
        log::debug!("despawned entity {:?}", id);
        Some(entity)
    }

    /// Apply pending registration events.
    pub fn flush_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Entities update in id order, then the collision handler runs.
    pub fn update(&mut self, elapsed: Duration) {
        self.flush_events();

        let step = self.config.time_step.step(elapsed);
        log::trace!(
            "tick: {} entities, step {}",
            self.entities.len(),
            step
        );
        for entity in self.entities.values_mut() {
            entity.update(step, elapsed);
        }

        if let Some(collision) = &mut self.collision {
            collision.update(&self.entities);
        }
    }

    /// Hand every visible sprite to `batch`, entity by entity.
    pub fn draw(&self, batch: &mut dyn SpriteBatch) {
        for entity in self.entities.values() {
            entity.draw(batch);
        }
    }

    /// Insert under a fixed id. Later ids continue past it.
    pub(crate) fn insert_with_id(&mut self, id: EntityId, mut entity: Entity) {
        self.flush_events();
        entity.attach_sink(EventSink {
            entity: id,
            sender: self.events_tx.clone(),
        });
        if let Some(collision) = &mut self.collision {
            collision.track(id, &entity);
        }
        log::debug!(
            "added entity {:?} with {} components",
            id,
            entity.component_count()
        );
        self.next_id = self.next_id.max(id.to_u32().saturating_add(1));
        if let Some(replaced) = self.entities.insert(id, entity) {
            log::warn!("entity {:?} replaced an existing entity ({:?})", id, replaced);
        }
    }

    fn apply(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::ComponentAttached { entity, kind } => {
                let Some(target) = self.entities.get(&entity) else {
                    log::warn!("dropping {:?} attach event for missing entity {:?}", kind, entity);
                    return;
                };
                register(self.collision.as_mut(), entity, target, kind);
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("config", &self.config)
            .field("entities", &self.entities)
            .field("collision", &self.collision.is_some())
            .finish()
    }
}

fn register(
    collision: Option<&mut CollisionHandler>,
    id: EntityId,
    entity: &Entity,
    kind: ComponentKind,
) {
    log::debug!("entity {:?} attached {:?}", id, kind);
    if matches!(kind, ComponentKind::Hitbox | ComponentKind::Movement) {
        if let Some(collision) = collision {
            collision.track(id, entity);
        }
    }
}

/// Mutable borrow of one entity in a [`Scene`].
///
/// Dereferences to [`Entity`]. On drop, components attached through it are
/// registered with the scene's collision handler.
pub struct EntityMut<'a> {
    id: EntityId,
    entity: &'a mut Entity,
    collision: Option<&'a mut CollisionHandler>,
    events: &'a Receiver<SceneEvent>,
}

impl EntityMut<'_> {
    pub fn id(&self) -> EntityId {
        self.id
    }
}

impl Deref for EntityMut<'_> {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        &*self.entity
    }
}

impl DerefMut for EntityMut<'_> {
    fn deref_mut(&mut self) -> &mut Entity {
        &mut *self.entity
    }
}

impl Drop for EntityMut<'_> {
    fn drop(&mut self) {
        // Only the borrowed entity can have sent anything since `entity_mut` flushed.
        while let Ok(SceneEvent::ComponentAttached { entity, kind }) = self.events.try_recv() {
            if entity != self.id {
                log::warn!("dropping {:?} attach event for entity {:?}", kind, entity);
                continue;
            }
            register(self.collision.as_deref_mut(), self.id, self.entity, kind);
        }
    }
}
