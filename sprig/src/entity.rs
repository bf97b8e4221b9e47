//! Entities: a location plus the components attached to it.

use std::any::TypeId;
use std::collections::HashMap;
use std::time::Duration;

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind, ErasedComponent, TickContext};
use crate::error::ComponentError;
use crate::hitbox::Hitbox;
use crate::math::Vec2;
use crate::movement::Movement;
use crate::scene::SceneEvent;
use crate::sprite::{Sprite, SpriteBatch};

/// Unique identifier for an entity in a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    /// Get the underlying integer ID (useful for debugging or serialization).
    pub fn to_u32(self) -> u32 {
        self.0
    }
}

/// Channel back to the owning scene, installed when the entity joins one.
pub(crate) struct EventSink {
    pub(crate) entity: EntityId,
    pub(crate) sender: Sender<SceneEvent>,
}

/// A located object composed of components.
///
/// Components are kept in two structures:
/// - a flat list in registration order, used for updates
/// - an index from [`ComponentKind`] to positions in that list, used for lookups
pub struct Entity {
    location: Vec2,
    components: Vec<Box<dyn ErasedComponent>>,
    index: HashMap<ComponentKind, Vec<usize>>,
    sink: Option<EventSink>,
}

impl Entity {
    pub fn new(location: Vec2) -> Self {
        Self {
            location,
            components: Vec::new(),
            index: HashMap::new(),
            sink: None,
        }
    }

    /// Builder form of [`Entity::add_component`].
    pub fn with_component<T: Component>(mut self, component: T) -> Result<Self, ComponentError> {
        self.add_component(component)?;
        Ok(self)
    }

    pub fn location(&self) -> Vec2 {
        self.location
    }

    pub fn set_location(&mut self, location: Vec2) {
        self.location = location;
    }

    /// Attach a component and file it under its kind.
    ///
    /// If the entity belongs to a scene, the scene is notified so hitboxes and
    /// movable entities are tracked for collision detection.
    ///
    /// Fails if `T` claims a built-in kind it does not own, or if a different
    /// type already occupies the same kind.
    pub fn add_component<T: Component>(&mut self, component: T) -> Result<(), ComponentError> {
        if T::KIND
            .reserved_type()
            .is_some_and(|owner| owner != TypeId::of::<T>())
        {
            return Err(ComponentError::ReservedKind {
                kind: T::KIND,
                incoming: std::any::type_name::<T>(),
            });
        }
        if let Some(&first) = self.index.get(&T::KIND).and_then(|slots| slots.first()) {
            let existing = &self.components[first];
            if !existing.is::<T>() {
                return Err(ComponentError::KindConflict {
                    kind: T::KIND,
                    existing: existing.type_name(),
                    incoming: std::any::type_name::<T>(),
                });
            }
        }

        self.index
            .entry(T::KIND)
            .or_default()
            .push(self.components.len());
        self.components.push(Box::new(component));

        if let Some(sink) = &self.sink {
            let event = SceneEvent::ComponentAttached {
                entity: sink.entity,
                kind: T::KIND,
            };
            if sink.sender.send(event).is_err() {
                log::warn!("scene for entity {:?} is gone, dropping attach event", sink.entity);
            }
        }
        Ok(())
    }

    /// All components of `T`'s kind, in registration order. Empty if none.
    pub fn components<T: Component>(&self) -> Vec<&T> {
        self.index
            .get(&T::KIND)
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(|&i| self.components.get(i)?.downcast_ref::<T>())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn components_mut<T: Component>(&mut self) -> Vec<&mut T> {
        self.components
            .iter_mut()
            .filter(|c| c.kind() == T::KIND)
            .filter_map(|c| c.downcast_mut::<T>())
            .collect()
    }

    /// First-registered component of `T`'s kind.
    pub fn component<T: Component>(&self) -> Option<&T> {
        let &first = self.index.get(&T::KIND)?.first()?;
        self.components.get(first)?.downcast_ref::<T>()
    }

    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        let &first = self.index.get(&T::KIND)?.first()?;
        self.components.get_mut(first)?.downcast_mut::<T>()
    }

    pub fn has_component<T: Component>(&self) -> bool {
        self.has_kind(T::KIND)
    }

    pub fn has_kind(&self, kind: ComponentKind) -> bool {
        self.index.contains_key(&kind)
    }

    /// Number of components of the given kind.
    pub fn count_of(&self, kind: ComponentKind) -> usize {
        self.index.get(&kind).map_or(0, Vec::len)
    }

    /// Total number of attached components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// The `slot`-th hitbox in registration order.
    pub fn hitbox(&self, slot: usize) -> Option<&Hitbox> {
        let &i = self.index.get(&ComponentKind::Hitbox)?.get(slot)?;
        self.components.get(i)?.downcast_ref::<Hitbox>()
    }

    pub fn hitboxes(&self) -> Vec<&Hitbox> {
        self.components::<Hitbox>()
    }

    /// True when a movement component exists and the last tick changed the location.
    pub fn has_moved(&self) -> bool {
        self.component::<Movement>()
            .is_some_and(|movement| movement.has_moved(self.location))
    }

    /// True when the entity takes part in motion filtering (hitbox + movement).
    pub fn is_movable(&self) -> bool {
        self.has_component::<Hitbox>() && self.has_component::<Movement>()
    }

    /// Update every component in registration order.
    pub fn update(&mut self, step: f32, elapsed: Duration) {
        let Self {
            location,
            components,
            ..
        } = self;

        for component in components.iter_mut() {
            let mut ctx = TickContext {
                location: &mut *location,
                step,
                elapsed,
            };
            component.update(&mut ctx);
        }
    }

    /// Draw every visible sprite.
    pub fn draw(&self, batch: &mut dyn SpriteBatch) {
        for sprite in self.components::<Sprite>() {
            sprite.draw(batch);
        }
    }

    pub(crate) fn attach_sink(&mut self, sink: EventSink) {
        self.sink = Some(sink);
    }

    pub(crate) fn detach_sink(&mut self) {
        self.sink = None;
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<_> = self.components.iter().map(|c| c.kind()).collect();
        f.debug_struct("Entity")
            .field("location", &self.location)
            .field("components", &kinds)
            .finish()
    }
}
