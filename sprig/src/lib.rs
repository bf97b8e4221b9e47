//! Sprig - the simulation core of a small 2D game engine.
//!
//! Entities are locations with attached components. Components are filed by
//! family ([`ComponentKind`]) so a game can ask for "all hitboxes" without
//! caring whether each one is a circle or a rectangle. A [`Scene`] owns the
//! entities, ticks them, and runs two-phase collision detection through an
//! optional [`CollisionHandler`].
//!
//! ```
//! use std::time::Duration;
//! use sprig::{CollisionHandler, Hitbox, Movement, Scene, Vec2};
//!
//! let mut scene = Scene::new().with_collision_handler(CollisionHandler::new());
//!
//! let ball = scene.spawn(Vec2::new(0.0, 0.0));
//! scene.add_component(ball, Hitbox::circle(0.0, 0.0, 4.0))?;
//! scene.add_component(
//!     ball,
//!     Movement::new()
//!         .with_direction(Vec2::new(1.0, 0.0))
//!         .with_speed(3.0)
//!         .with_target_speed(3.0),
//! )?;
//!
//! let wall = scene.spawn(Vec2::new(10.0, -10.0));
//! scene.add_component(wall, Hitbox::rectangle(0.0, 0.0, 2.0, 20.0))?;
//!
//! scene.update(Duration::from_millis(16));
//! let events = scene.collision_mut().map(|c| c.drain_events()).unwrap_or_default();
//! assert_eq!(events.len(), 1);
//! # Ok::<(), sprig::SceneError>(())
//! ```

pub mod collision;
pub mod component;
pub mod config;
pub mod direction;
pub mod entity;
pub mod error;
pub mod hitbox;
pub mod map;
pub mod math;
pub mod movement;
pub mod scene;
pub mod shape;
pub mod snapshot;
pub mod sprite;

pub use crate::collision::{Collision, CollisionCallback, CollisionEvent, CollisionHandler, HitboxId};
pub use crate::component::{Component, ComponentKind, TickContext};
pub use crate::config::{SimulationConfig, TimeStep};
pub use crate::direction::Direction8;
pub use crate::entity::{Entity, EntityId};
pub use crate::error::{ComponentError, DirectionError, MapError, SceneError, ShapeError};
pub use crate::hitbox::Hitbox;
pub use crate::map::{CellType, Map};
pub use crate::math::Vec2;
pub use crate::movement::Movement;
pub use crate::scene::{EntityMut, Scene};
pub use crate::shape::{Circle, Rectangle, Shape};
pub use crate::snapshot::{EntitySnapshot, SceneSnapshot};
pub use crate::sprite::{Sprite, SpriteBatch, TextureHandle};
