//! Collision volumes attached to entities.

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind};
use crate::math::Vec2;
use crate::shape::{Circle, Rectangle, Shape};

/// A shape positioned relative to its entity.
///
/// The absolute (world space) shape is always derived from the entity's
/// current location on request and never stored, so it cannot go stale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    shape: Shape,
}

impl Hitbox {
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
        }
    }

    /// Rectangular hitbox with its top-left corner at `(x, y)` relative to the entity.
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Rectangle::new(x, y, width, height))
    }

    /// Circular hitbox whose bounding square starts at `(x, y)` relative to the entity.
    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self::new(Circle::new(x, y, radius))
    }

    /// Shape in entity-local coordinates.
    pub fn relative_shape(&self) -> Shape {
        self.shape
    }

    pub fn relative_location(&self) -> Vec2 {
        self.shape.location()
    }

    /// World-space location for an entity standing at `entity_location`.
    pub fn location(&self, entity_location: Vec2) -> Vec2 {
        entity_location + self.shape.location()
    }

    /// World-space shape for an entity standing at `entity_location`.
    pub fn absolute_shape(&self, entity_location: Vec2) -> Shape {
        self.shape.offset(entity_location)
    }

    pub fn is_circle(&self) -> bool {
        matches!(self.shape, Shape::Circle(_))
    }

    pub fn is_rectangle(&self) -> bool {
        matches!(self.shape, Shape::Rectangle(_))
    }
}

impl Component for Hitbox {
    const KIND: ComponentKind = ComponentKind::Hitbox;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_shape_follows_entity() {
        let hitbox = Hitbox::rectangle(2.0, 3.0, 4.0, 5.0);
        assert_eq!(
            hitbox.absolute_shape(Vec2::new(10.0, 20.0)),
            Shape::Rectangle(Rectangle::new(12.0, 23.0, 4.0, 5.0))
        );
        assert_eq!(
            hitbox.absolute_shape(Vec2::new(-2.0, 0.0)),
            Shape::Rectangle(Rectangle::new(0.0, 3.0, 4.0, 5.0))
        );
        assert_eq!(hitbox.relative_location(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_circle_location() {
        let hitbox = Hitbox::circle(1.0, 1.0, 2.0);
        assert!(hitbox.is_circle());
        assert!(!hitbox.is_rectangle());
        assert_eq!(hitbox.location(Vec2::new(5.0, 5.0)), Vec2::new(6.0, 6.0));
    }
}
