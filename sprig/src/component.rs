//! Components are units of per-tick behavior attached to exactly one entity.
//!
//! Each component type declares the [`ComponentKind`] it is filed under. The
//! kind plays the role of a "base type": every concrete component lands in
//! exactly one family, and lookups go through the family key in O(1).
//! Variants inside a family (a circular vs. rectangular hitbox) are data on
//! the component, not separate types.

use std::any::{Any, TypeId};
use std::time::Duration;

use crate::hitbox::Hitbox;
use crate::math::Vec2;
use crate::movement::Movement;
use crate::sprite::Sprite;

/// Family key under which a component is indexed on its entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Sprite,
    Hitbox,
    Movement,
    /// Game-defined family, keyed by a stable name.
    Custom(&'static str),
}

impl ComponentKind {
    /// The only type allowed to file under a built-in family. `None` for custom kinds.
    pub(crate) fn reserved_type(self) -> Option<TypeId> {
        match self {
            ComponentKind::Sprite => Some(TypeId::of::<Sprite>()),
            ComponentKind::Hitbox => Some(TypeId::of::<Hitbox>()),
            ComponentKind::Movement => Some(TypeId::of::<Movement>()),
            ComponentKind::Custom(_) => None,
        }
    }
}

/// Per-tick view handed to each component's `update`.
///
/// Components only see their own entity's location; they cannot reach other
/// entities or the scene.
pub struct TickContext<'a> {
    /// Location of the owning entity. Writable so movement can advance it.
    pub location: &'a mut Vec2,
    /// Step multiplier: `1.0` for fixed stepping, milliseconds for real-time stepping.
    pub step: f32,
    /// Wall-clock time since the previous tick.
    pub elapsed: Duration,
}

/// Attachable behavior.
///
/// ```
/// use sprig::component::{Component, ComponentKind};
///
/// struct Health(u32);
///
/// impl Component for Health {
///     const KIND: ComponentKind = ComponentKind::Custom("health");
/// }
/// ```
pub trait Component: Any {
    const KIND: ComponentKind;

    /// Advance this component by one tick. Default is a no-op.
    fn update(&mut self, _ctx: &mut TickContext<'_>) {}
}

/// Object-safe form of [`Component`] used for storage on an entity.
pub(crate) trait ErasedComponent: Any {
    fn kind(&self) -> ComponentKind;
    fn type_name(&self) -> &'static str;
    fn update(&mut self, ctx: &mut TickContext<'_>);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedComponent for T {
    fn kind(&self) -> ComponentKind {
        T::KIND
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        Component::update(self, ctx);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl dyn ErasedComponent {
    pub(crate) fn is<T: Component>(&self) -> bool {
        self.as_any().type_id() == TypeId::of::<T>()
    }

    pub(crate) fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub(crate) fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
