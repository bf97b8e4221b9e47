//! Two-phase collision detection over hitboxes.
//!
//! Each tick the handler:
//! 1. recomputes the set of *moving* entities (movable entities whose location
//!    changed during the tick), then
//! 2. tests every hitbox of every moving entity against every tracked hitbox
//!    and reports intersecting pairs that belong to different entities.
//!
//! There is no spatial index; cost is `moving × hitboxes-per-entity × hitboxes`.
//!
//! When two moving entities overlap, the pair is reported once from each side.
//! Listeners must tolerate that.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::hitbox::Hitbox;
use crate::shape::Shape;

/// Stable address of one hitbox: the owning entity plus its position among
/// that entity's hitboxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HitboxId {
    pub entity: EntityId,
    pub slot: usize,
}

/// A detected intersection, passed to collision callbacks.
#[derive(Clone, Copy, Debug)]
pub struct Collision<'a> {
    pub moving: HitboxId,
    pub collided: HitboxId,
    pub moving_hitbox: &'a Hitbox,
    pub collided_hitbox: &'a Hitbox,
    /// World-space shape of the moving hitbox.
    pub moving_shape: Shape,
    /// World-space shape of the collided hitbox.
    pub collided_shape: Shape,
}

/// Owned record of a detected intersection. Uses ids only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CollisionEvent {
    pub moving: HitboxId,
    pub collided: HitboxId,
}

/// Callback invoked for every detected intersection.
pub type CollisionCallback = Box<dyn FnMut(&Collision<'_>)>;

/// Tracks hitboxes and movable entities of a scene and detects collisions.
#[derive(Default)]
pub struct CollisionHandler {
    hitboxes: BTreeSet<HitboxId>,
    movable_objects: BTreeSet<EntityId>,
    moving_objects: Vec<EntityId>,

    // Collected events for the tick
    pending_events: Vec<CollisionEvent>,
    callbacks: Vec<CollisionCallback>,
}

impl CollisionHandler {
    /// A handler without callbacks. Detected pairs are only queued as events.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that reports every detected pair to `callback`.
    pub fn with_callback<F>(callback: F) -> Self
    where
        F: FnMut(&Collision<'_>) + 'static,
    {
        let mut handler = Self::new();
        handler.on_collision(callback);
        handler
    }

    pub fn on_collision<F>(&mut self, callback: F)
    where
        F: FnMut(&Collision<'_>) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Every hitbox in the scene.
    pub fn hitboxes(&self) -> &BTreeSet<HitboxId> {
        &self.hitboxes
    }

    /// Every entity carrying both a hitbox and a movement component.
    pub fn movable_objects(&self) -> &BTreeSet<EntityId> {
        &self.movable_objects
    }

    /// Movable entities whose location changed during the last tick.
    pub fn moving_objects(&self) -> &[EntityId] {
        &self.moving_objects
    }

    /// Drain collision events collected since the last call.
    pub fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Bring the tracked sets in line with the components `entity` carries.
    ///
    /// Safe to call repeatedly; set membership is never duplicated.
    pub(crate) fn track(&mut self, id: EntityId, entity: &Entity) {
        for slot in 0..entity.hitboxes().len() {
            self.hitboxes.insert(HitboxId { entity: id, slot });
        }
        if entity.is_movable() {
            self.movable_objects.insert(id);
        }
    }

    /// Drop everything tracked for `id`.
    pub(crate) fn forget(&mut self, id: EntityId) {
        self.hitboxes.retain(|hitbox| hitbox.entity != id);
        self.movable_objects.remove(&id);
        self.moving_objects.retain(|&moving| moving != id);
    }

    /// Run both phases against the scene's entities.
    pub(crate) fn update(&mut self, entities: &BTreeMap<EntityId, Entity>) {
        self.identify_moving_objects(entities);
        self.detect_collisions(entities);
    }

    fn identify_moving_objects(&mut self, entities: &BTreeMap<EntityId, Entity>) {
        self.moving_objects.clear();
        for id in &self.movable_objects {
            if entities.get(id).is_some_and(Entity::has_moved) {
                self.moving_objects.push(*id);
            }
        }
    }

    fn detect_collisions(&mut self, entities: &BTreeMap<EntityId, Entity>) {
        let Self {
            hitboxes,
            moving_objects,
            pending_events,
            callbacks,
            ..
        } = self;

        for &moving_id in moving_objects.iter() {
            let Some(entity) = entities.get(&moving_id) else {
                continue;
            };

            for (slot, moving_hitbox) in entity.hitboxes().into_iter().enumerate() {
                let moving = HitboxId {
                    entity: moving_id,
                    slot,
                };
                let moving_shape = moving_hitbox.absolute_shape(entity.location());

                for &collided in hitboxes.iter() {
                    if collided.entity == moving_id {
                        continue;
                    }
                    let Some(other) = entities.get(&collided.entity) else {
                        continue;
                    };
                    let Some(collided_hitbox) = other.hitbox(collided.slot) else {
                        continue;
                    };
                    let collided_shape = collided_hitbox.absolute_shape(other.location());
                    if !moving_shape.intersects(&collided_shape) {
                        continue;
                    }

                    log::trace!("collision {:?} -> {:?}", moving, collided);
                    let collision = Collision {
                        moving,
                        collided,
                        moving_hitbox,
                        collided_hitbox,
                        moving_shape,
                        collided_shape,
                    };
                    for cb in callbacks.iter_mut() {
                        cb(&collision);
                    }
                    pending_events.push(CollisionEvent { moving, collided });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::movement::Movement;
    use std::time::Duration;

    fn entity_with_hitbox(location: Vec2, movement: Option<Movement>) -> Entity {
        let mut entity = Entity::new(location);
        entity
            .add_component(Hitbox::rectangle(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        if let Some(movement) = movement {
            entity.add_component(movement).unwrap();
        }
        entity
    }

    fn moving_right() -> Movement {
        Movement::new()
            .with_direction(Vec2::new(1.0, 0.0))
            .with_speed(5.0)
            .with_target_speed(5.0)
    }

    #[test]
    fn test_track_is_idempotent() {
        let entity = entity_with_hitbox(Vec2::ZERO, Some(Movement::new()));
        let id = EntityId(1);
        let mut handler = CollisionHandler::new();
        handler.track(id, &entity);
        handler.track(id, &entity);
        assert_eq!(handler.hitboxes().len(), 1);
        assert_eq!(handler.movable_objects().len(), 1);
    }

    #[test]
    fn test_stationary_entities_are_not_moving() {
        let mut entities = BTreeMap::new();
        let mut entity = entity_with_hitbox(Vec2::ZERO, Some(Movement::new()));
        entity.update(1.0, Duration::ZERO);
        entities.insert(EntityId(1), entity);

        let mut handler = CollisionHandler::new();
        handler.track(EntityId(1), &entities[&EntityId(1)]);
        handler.update(&entities);
        assert!(handler.moving_objects().is_empty());
    }

    #[test]
    fn test_moving_into_stationary_reports_once() {
        let mut entities = BTreeMap::new();
        let mut mover = entity_with_hitbox(Vec2::new(-10.0, 0.0), Some(moving_right()));
        mover.update(1.0, Duration::ZERO);
        entities.insert(EntityId(1), mover);
        entities.insert(EntityId(2), entity_with_hitbox(Vec2::ZERO, None));

        let mut handler = CollisionHandler::new();
        for (id, entity) in &entities {
            handler.track(*id, entity);
        }
        handler.update(&entities);

        assert_eq!(handler.moving_objects(), &[EntityId(1)]);
        let events = handler.drain_events();
        assert_eq!(
            events,
            vec![CollisionEvent {
                moving: HitboxId {
                    entity: EntityId(1),
                    slot: 0
                },
                collided: HitboxId {
                    entity: EntityId(2),
                    slot: 0
                },
            }]
        );
        assert!(handler.drain_events().is_empty());
    }

    #[test]
    fn test_forget_drops_entity() {
        let entity = entity_with_hitbox(Vec2::ZERO, Some(Movement::new()));
        let mut handler = CollisionHandler::new();
        handler.track(EntityId(4), &entity);
        handler.forget(EntityId(4));
        assert!(handler.hitboxes().is_empty());
        assert!(handler.movable_objects().is_empty());
    }
}
