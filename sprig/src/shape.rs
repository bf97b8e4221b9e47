//! Geometric regions used by hitboxes.
//!
//! Both shapes are plain values located by the top-left corner of their
//! bounding box. For a [`Circle`] that means `x`/`y` is *not* the center; the
//! center sits at `(x + radius, y + radius)`.
//!
//! Intersection rules differ on the boundary: rectangles that only share an
//! edge do not intersect, circles that only touch do.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::math::Vec2;

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const EMPTY: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_location_size(location: Vec2, size: Vec2) -> Self {
        Self::new(location.x, location.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn location(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Point containment. The left and top edges are inside, the right and
    /// bottom edges are not.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.x <= point.x && point.x < self.right() && self.y <= point.y && point.y < self.bottom()
    }

    /// True if `other` lies entirely inside this rectangle (shared edges allowed).
    pub fn contains_rectangle(&self, other: &Rectangle) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    pub fn intersects_rectangle(&self, other: &Rectangle) -> bool {
        rectangles_intersect(self, other)
    }

    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        rectangle_circle_intersect(self, circle)
    }

    /// Translated copy.
    #[must_use]
    pub fn offset(mut self, amount: Vec2) -> Self {
        self.x += amount.x;
        self.y += amount.y;
        self
    }

    /// Grows the rectangle outward by the given amounts on every side.
    #[must_use]
    pub fn inflate(mut self, horizontal: f32, vertical: f32) -> Self {
        self.x -= horizontal;
        self.y -= vertical;
        self.width += horizontal * 2.0;
        self.height += vertical * 2.0;
        self
    }

    /// The overlapping region of two rectangles, or [`Rectangle::EMPTY`] when
    /// they do not intersect.
    pub fn overlap(&self, other: &Rectangle) -> Rectangle {
        if !self.intersects_rectangle(other) {
            return Rectangle::EMPTY;
        }
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rectangle::new(left, top, right - left, bottom - top)
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rectangle::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// Circle located by the top-left corner of its bounding square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub const EMPTY: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn from_location(location: Vec2, radius: f32) -> Self {
        Self::new(location.x, location.y, radius)
    }

    /// Circle with the given center point.
    pub fn from_center(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.diameter()
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.diameter()
    }

    pub fn location(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.radius, self.y + self.radius)
    }

    pub fn diameter(&self) -> f32 {
        2.0 * self.radius
    }

    pub fn area(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }

    pub fn circumference(&self) -> f32 {
        2.0 * std::f32::consts::PI * self.radius
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Point containment, boundary inclusive.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.center().distance_squared(point) <= self.radius * self.radius
    }

    /// True if `other` lies entirely inside this circle.
    pub fn contains_circle(&self, other: &Circle) -> bool {
        let slack = self.radius - other.radius;
        slack >= 0.0 && self.center().distance_squared(other.center()) <= slack * slack
    }

    pub fn intersects_circle(&self, other: &Circle) -> bool {
        circles_intersect(self, other)
    }

    pub fn intersects_rectangle(&self, rectangle: &Rectangle) -> bool {
        rectangle_circle_intersect(rectangle, self)
    }

    #[must_use]
    pub fn offset(mut self, amount: Vec2) -> Self {
        self.x += amount.x;
        self.y += amount.y;
        self
    }

    /// Grows the radius by `amount` while keeping the center fixed.
    #[must_use]
    pub fn inflate(mut self, amount: f32) -> Self {
        self.x -= amount;
        self.y -= amount;
        self.radius += amount;
        self
    }

    /// Smallest circle enclosing both circles.
    pub fn union(&self, other: &Circle) -> Circle {
        if self.contains_circle(other) {
            return *self;
        }
        if other.contains_circle(self) {
            return *other;
        }
        let (c1, c2) = (self.center(), other.center());
        let distance = c1.distance(c2);
        let radius = (distance + self.radius + other.radius) / 2.0;
        // Walk from c1 towards c2 so the new circle touches both far sides.
        let direction = (c2 - c1).normalized();
        let center = c1 + direction * (radius - self.radius);
        Circle::from_center(center, radius)
    }

    /// Axis-aligned bounding square.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.diameter(), self.diameter())
    }
}

/// Strict overlap on both axes; touching edges do not count.
pub fn rectangles_intersect(a: &Rectangle, b: &Rectangle) -> bool {
    b.left() < a.right() && a.left() < b.right() && b.top() < a.bottom() && a.top() < b.bottom()
}

pub fn rectangle_circle_intersect(rectangle: &Rectangle, circle: &Circle) -> bool {
    let half_width = rectangle.width / 2.0;
    let half_height = rectangle.height / 2.0;
    let distance = (rectangle.center() - circle.center()).abs();

    if distance.x > circle.radius + half_width || distance.y > circle.radius + half_height {
        return false;
    }

    // Center projects inside the rectangle on one axis: the edge is the closest feature.
    if distance.x <= half_width || distance.y <= half_height {
        return true;
    }

    let corner_x = distance.x - half_width;
    let corner_y = distance.y - half_height;
    corner_x * corner_x + corner_y * corner_y <= circle.radius * circle.radius
}

/// Boundary inclusive: circles that touch at a single point intersect.
pub fn circles_intersect(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius + b.radius;
    a.center().distance_squared(b.center()) <= reach * reach
}

/// Any supported geometric region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
        }
    }

    /// Top-left corner of the bounding box.
    pub fn location(&self) -> Vec2 {
        match self {
            Shape::Rectangle(r) => r.location(),
            Shape::Circle(c) => c.location(),
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Rectangle(r) => r.center(),
            Shape::Circle(c) => c.center(),
        }
    }

    pub fn left(&self) -> f32 {
        self.bounds().left()
    }

    pub fn right(&self) -> f32 {
        self.bounds().right()
    }

    pub fn top(&self) -> f32 {
        self.bounds().top()
    }

    pub fn bottom(&self) -> f32 {
        self.bounds().bottom()
    }

    pub fn bounds(&self) -> Rectangle {
        match self {
            Shape::Rectangle(r) => *r,
            Shape::Circle(c) => c.bounds(),
        }
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Shape::Rectangle(r) => r.contains_point(point),
            Shape::Circle(c) => c.contains_point(point),
        }
    }

    /// Whether `other` lies entirely inside this shape.
    ///
    /// Only same-variant containment is implemented; mixed pairs return
    /// [`ShapeError::Unsupported`] rather than a guess.
    pub fn contains_shape(&self, other: &Shape) -> Result<bool, ShapeError> {
        match (self, other) {
            (Shape::Rectangle(a), Shape::Rectangle(b)) => Ok(a.contains_rectangle(b)),
            (Shape::Circle(a), Shape::Circle(b)) => Ok(a.contains_circle(b)),
            _ => Err(ShapeError::Unsupported {
                operation: "containment",
                lhs: self.name(),
                rhs: other.name(),
            }),
        }
    }

    pub fn intersects(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Rectangle(a), Shape::Rectangle(b)) => rectangles_intersect(a, b),
            (Shape::Rectangle(r), Shape::Circle(c)) | (Shape::Circle(c), Shape::Rectangle(r)) => {
                rectangle_circle_intersect(r, c)
            }
            (Shape::Circle(a), Shape::Circle(b)) => circles_intersect(a, b),
        }
    }

    #[must_use]
    pub fn offset(&self, amount: Vec2) -> Shape {
        match self {
            Shape::Rectangle(r) => Shape::Rectangle(r.offset(amount)),
            Shape::Circle(c) => Shape::Circle(c.offset(amount)),
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(value: Rectangle) -> Self {
        Shape::Rectangle(value)
    }
}

impl From<Circle> for Shape {
    fn from(value: Circle) -> Self {
        Shape::Circle(value)
    }
}
