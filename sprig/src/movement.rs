//! Kinematic integrator that moves its entity every tick.

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind, TickContext};
use crate::math::Vec2;

/// Movement component.
///
/// Each tick the speed approaches `target_speed` by `|acceleration_rate| * step`
/// without overshooting, then the entity advances by
/// `direction * speed * step`. Independently of that, every axis of
/// `direction` decays towards zero by `acceleration_rate` and stops at zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    direction: Vec2,
    speed: f32,
    target_speed: f32,
    acceleration_rate: f32,
    previous_location: Option<Vec2>,
}

impl Movement {
    pub fn new() -> Self {
        Self {
            direction: Vec2::ZERO,
            speed: 0.0,
            target_speed: 0.0,
            acceleration_rate: 0.0,
            previous_location: None,
        }
    }

    /// Sets the heading. The vector is normalized.
    #[must_use]
    pub fn with_direction(mut self, direction: Vec2) -> Self {
        self.set_direction(direction);
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_target_speed(mut self, target_speed: f32) -> Self {
        self.target_speed = target_speed;
        self
    }

    #[must_use]
    pub fn with_acceleration_rate(mut self, rate: f32) -> Self {
        self.acceleration_rate = rate;
        self
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.normalized();
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    pub fn set_target_speed(&mut self, target_speed: f32) {
        self.target_speed = target_speed;
    }

    pub fn acceleration_rate(&self) -> f32 {
        self.acceleration_rate
    }

    pub fn set_acceleration_rate(&mut self, rate: f32) {
        self.acceleration_rate = rate;
    }

    /// Entity location as of the start of the most recent tick.
    /// `None` until the component has been updated once.
    pub fn previous_location(&self) -> Option<Vec2> {
        self.previous_location
    }

    /// True if the last tick changed the entity's location.
    pub fn has_moved(&self, current: Vec2) -> bool {
        self.previous_location.is_some_and(|prev| prev != current)
    }

    fn update_speed(&mut self, step: f32) {
        if self.speed == self.target_speed {
            return;
        }

        let delta = (self.acceleration_rate * step).abs();
        self.speed = if self.target_speed < self.speed {
            self.target_speed.max(self.speed - delta)
        } else {
            self.target_speed.min(self.speed + delta)
        };
    }

    fn update_location(&mut self, location: &mut Vec2, step: f32) {
        self.previous_location = Some(*location);
        *location += self.direction * (self.speed * step);

        let rate = self.acceleration_rate;
        self.direction = Vec2::new(
            decay_towards_zero(self.direction.x, rate),
            decay_towards_zero(self.direction.y, rate),
        );
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Movement {
    const KIND: ComponentKind = ComponentKind::Movement;

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.update_speed(ctx.step);
        self.update_location(ctx.location, ctx.step);
    }
}

fn decay_towards_zero(value: f32, rate: f32) -> f32 {
    if value > 0.0 {
        (value - rate).max(0.0)
    } else if value < 0.0 {
        (value + rate).min(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tick(movement: &mut Movement, location: &mut Vec2, step: f32) {
        let mut ctx = TickContext {
            location,
            step,
            elapsed: Duration::from_millis(16),
        };
        Component::update(movement, &mut ctx);
    }

    #[test]
    fn test_speed_accelerates_without_overshoot() {
        let mut movement = Movement::new()
            .with_target_speed(10.0)
            .with_acceleration_rate(2.0);
        let mut location = Vec2::ZERO;

        for expected in [2.0, 4.0, 6.0, 8.0, 10.0, 10.0, 10.0] {
            tick(&mut movement, &mut location, 1.0);
            assert_eq!(movement.speed(), expected);
        }
    }

    #[test]
    fn test_speed_clamps_with_large_step() {
        let mut movement = Movement::new()
            .with_target_speed(10.0)
            .with_acceleration_rate(2.0);
        let mut location = Vec2::ZERO;

        tick(&mut movement, &mut location, 16.0);
        assert_eq!(movement.speed(), 10.0);
    }

    #[test]
    fn test_speed_decelerates_with_negative_rate() {
        let mut movement = Movement::new()
            .with_speed(5.0)
            .with_target_speed(0.0)
            .with_acceleration_rate(-2.0);
        let mut location = Vec2::ZERO;

        tick(&mut movement, &mut location, 1.0);
        assert_eq!(movement.speed(), 3.0);
        tick(&mut movement, &mut location, 1.0);
        tick(&mut movement, &mut location, 1.0);
        assert_eq!(movement.speed(), 0.0);
    }

    #[test]
    fn test_location_advances_and_records_previous() {
        let mut movement = Movement::new()
            .with_direction(Vec2::new(1.0, 0.0))
            .with_speed(3.0)
            .with_target_speed(3.0);
        let mut location = Vec2::new(1.0, 1.0);
        assert_eq!(movement.previous_location(), None);
        assert!(!movement.has_moved(location));

        tick(&mut movement, &mut location, 2.0);
        assert_eq!(location, Vec2::new(7.0, 1.0));
        assert_eq!(movement.previous_location(), Some(Vec2::new(1.0, 1.0)));
        assert!(movement.has_moved(location));
    }

    #[test]
    fn test_direction_decays_to_zero_per_axis() {
        let mut movement = Movement::new().with_acceleration_rate(0.5);
        movement.direction = Vec2::new(0.6, -0.8);
        let mut location = Vec2::ZERO;

        tick(&mut movement, &mut location, 1.0);
        assert!((movement.direction().x - 0.1).abs() < 1e-6);
        assert!((movement.direction().y + 0.3).abs() < 1e-6);

        tick(&mut movement, &mut location, 1.0);
        assert_eq!(movement.direction(), Vec2::ZERO);
    }

    #[test]
    fn test_stationary_movement_does_not_move() {
        let mut movement = Movement::new();
        let mut location = Vec2::new(4.0, 4.0);
        tick(&mut movement, &mut location, 1.0);
        assert_eq!(location, Vec2::new(4.0, 4.0));
        assert!(!movement.has_moved(location));
    }
}
