use glam::Vec2 as GlamVec2;
use serde::{Deserialize, Serialize};

/// 2D vector type used throughout Sprig for locations, directions and sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        self.to_glam().length()
    }

    pub fn length_squared(&self) -> f32 {
        self.to_glam().length_squared()
    }

    /// Unit vector in the same direction, or `ZERO` for the zero vector.
    pub fn normalized(&self) -> Self {
        self.to_glam().normalize_or_zero().into()
    }

    pub fn distance(self, rhs: Self) -> f32 {
        self.to_glam().distance(rhs.to_glam())
    }

    pub fn distance_squared(self, rhs: Self) -> f32 {
        self.to_glam().distance_squared(rhs.to_glam())
    }

    /// Component-wise absolute value. Used for axis distances in overlap tests.
    pub fn abs(self) -> Self {
        self.to_glam().abs().into()
    }

    /// True when neither component is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.to_glam().is_finite()
    }

    pub fn to_glam(self) -> GlamVec2 {
        GlamVec2::new(self.x, self.y)
    }
}

impl From<GlamVec2> for Vec2 {
    fn from(value: GlamVec2) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Vec2> for GlamVec2 {
    fn from(value: Vec2) -> Self {
        value.to_glam()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        let unit = Vec2::new(3.0, 4.0).normalized();
        assert!((unit.x - 0.6).abs() < 1e-6);
        assert!((unit.y - 0.8).abs() < 1e-6);
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_squared() {
        let a = Vec2::new(5.0, 5.0);
        let b = Vec2::new(15.0, 5.0);
        assert_eq!(a.distance_squared(b), 100.0);
        assert_eq!(a.distance(b), 10.0);
    }

    #[test]
    fn test_glam_round_trip() {
        let v = Vec2::new(1.5, -2.0);
        let g: GlamVec2 = v.into();
        assert_eq!(Vec2::from(g), v);
    }
}
