//! Eight-way direction classification for analog input.

use std::f32::consts::{FRAC_PI_4, FRAC_PI_8, TAU};

use serde::{Deserialize, Serialize};

use crate::error::DirectionError;
use crate::math::Vec2;

/// Compass direction of a 2D vector, or `None` inside the dead zone.
///
/// The y axis points up: `(0, 1)` is [`Direction8::Up`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction8 {
    #[default]
    None,
    Up,
    Right,
    Down,
    Left,
    RightUp,
    RightDown,
    LeftDown,
    LeftUp,
}

// Counter-clockwise from +x, one entry per 45° sector.
const SECTORS: [Direction8; 8] = [
    Direction8::Right,
    Direction8::RightUp,
    Direction8::Up,
    Direction8::LeftUp,
    Direction8::Left,
    Direction8::LeftDown,
    Direction8::Down,
    Direction8::RightDown,
];

impl Direction8 {
    /// Classify `v`. Vectors shorter than `dead_zone` map to [`Direction8::None`].
    ///
    /// Sector boundaries lie at 22.5° + k·45°; a vector exactly on a boundary
    /// goes to the sector counter-clockwise of it.
    pub fn classify(v: Vec2, dead_zone: f32) -> Result<Self, DirectionError> {
        if !v.is_finite() {
            return Err(DirectionError::Unclassifiable { x: v.x, y: v.y });
        }
        if v.length() < dead_zone {
            return Ok(Direction8::None);
        }

        let angle = v.y.atan2(v.x).rem_euclid(TAU);
        let sector = ((angle + FRAC_PI_8) / FRAC_PI_4) as usize % SECTORS.len();
        Ok(SECTORS[sector])
    }

    /// Unit vector pointing this way. Zero for [`Direction8::None`].
    pub fn to_vector(self) -> Vec2 {
        let d = std::f32::consts::FRAC_1_SQRT_2;
        match self {
            Direction8::None => Vec2::ZERO,
            Direction8::Up => Vec2::new(0.0, 1.0),
            Direction8::Right => Vec2::new(1.0, 0.0),
            Direction8::Down => Vec2::new(0.0, -1.0),
            Direction8::Left => Vec2::new(-1.0, 0.0),
            Direction8::RightUp => Vec2::new(d, d),
            Direction8::RightDown => Vec2::new(d, -d),
            Direction8::LeftDown => Vec2::new(-d, -d),
            Direction8::LeftUp => Vec2::new(-d, d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(x: f32, y: f32) -> Direction8 {
        Direction8::classify(Vec2::new(x, y), 0.3).unwrap()
    }

    #[test]
    fn test_axes_and_diagonals() {
        assert_eq!(classify(1.0, 0.0), Direction8::Right);
        assert_eq!(classify(0.0, 1.0), Direction8::Up);
        assert_eq!(classify(-1.0, 0.0), Direction8::Left);
        assert_eq!(classify(0.0, -1.0), Direction8::Down);
        assert_eq!(classify(1.0, 1.0), Direction8::RightUp);
        assert_eq!(classify(-1.0, 1.0), Direction8::LeftUp);
        assert_eq!(classify(-1.0, -1.0), Direction8::LeftDown);
        assert_eq!(classify(1.0, -1.0), Direction8::RightDown);
    }

    #[test]
    fn test_near_axis_stays_on_axis() {
        // 10° below +x is still Right.
        let a = (-10f32).to_radians();
        assert_eq!(classify(a.cos(), a.sin()), Direction8::Right);
        let a = 100f32.to_radians();
        assert_eq!(classify(a.cos(), a.sin()), Direction8::Up);
    }

    #[test]
    fn test_dead_zone() {
        assert_eq!(classify(0.1, 0.1), Direction8::None);
        assert_eq!(classify(0.0, 0.0), Direction8::None);
        assert_eq!(
            Direction8::classify(Vec2::new(0.0, 0.0), 0.0).unwrap(),
            Direction8::Right
        );
    }

    #[test]
    fn test_non_finite_is_an_error() {
        let err = Direction8::classify(Vec2::new(f32::NAN, 1.0), 0.3).unwrap_err();
        assert!(matches!(err, DirectionError::Unclassifiable { .. }));
        assert!(Direction8::classify(Vec2::new(f32::INFINITY, 0.0), 0.3).is_err());
    }

    #[test]
    fn test_to_vector_classifies_back() {
        for direction in SECTORS {
            assert_eq!(classify(direction.to_vector().x, direction.to_vector().y), direction);
        }
        assert_eq!(Direction8::None.to_vector(), Vec2::ZERO);
    }
}
