use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use sprig::{
    Circle, CollisionHandler, Component, ComponentKind, Entity, EntityId, Hitbox, HitboxId,
    Movement, Rectangle, Scene, Shape, Vec2,
};

type Reported = Rc<RefCell<Vec<(HitboxId, HitboxId)>>>;

fn recording_scene() -> (Scene, Reported) {
    let reported: Reported = Rc::default();
    let sink = Rc::clone(&reported);
    let handler = CollisionHandler::with_callback(move |collision| {
        sink.borrow_mut().push((collision.moving, collision.collided));
    });
    (Scene::new().with_collision_handler(handler), reported)
}

fn mover(direction: Vec2, speed: f32) -> Movement {
    Movement::new()
        .with_direction(direction)
        .with_speed(speed)
        .with_target_speed(speed)
}

fn spawn_box(scene: &mut Scene, location: Vec2, movement: Option<Movement>) -> EntityId {
    let id = scene.spawn(location);
    scene
        .add_component(id, Hitbox::rectangle(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    if let Some(movement) = movement {
        scene.add_component(id, movement).unwrap();
    }
    id
}

#[test]
fn test_mixed_hitbox_variants_are_one_family() {
    let entity = Entity::new(Vec2::ZERO)
        .with_component(Hitbox::circle(0.0, 0.0, 2.0))
        .unwrap()
        .with_component(Hitbox::rectangle(1.0, 1.0, 3.0, 3.0))
        .unwrap();

    assert!(entity.has_component::<Hitbox>());
    let hitboxes = entity.components::<Hitbox>();
    assert_eq!(hitboxes.len(), 2);
    assert!(hitboxes[0].is_circle());
    assert!(hitboxes[1].is_rectangle());
}

#[test]
fn test_movable_membership_is_order_independent() {
    let mut scene = Scene::new().with_collision_handler(CollisionHandler::new());

    let a = scene.spawn(Vec2::ZERO);
    scene.add_component(a, Hitbox::circle(0.0, 0.0, 1.0)).unwrap();
    scene.add_component(a, Movement::new()).unwrap();

    let b = scene.spawn(Vec2::ZERO);
    scene.add_component(b, Movement::new()).unwrap();
    scene.add_component(b, Hitbox::circle(0.0, 0.0, 1.0)).unwrap();

    let movable: Vec<EntityId> = scene
        .collision()
        .unwrap()
        .movable_objects()
        .iter()
        .copied()
        .collect();
    assert_eq!(movable, vec![a, b]);
}

#[test]
fn test_rectangle_edges_are_exclusive() {
    let a = Shape::from(Rectangle::new(0.0, 0.0, 10.0, 10.0));
    assert!(!a.intersects(&Rectangle::new(10.0, 0.0, 10.0, 10.0).into()));
    assert!(a.intersects(&Rectangle::new(9.0, 0.0, 10.0, 10.0).into()));
}

#[test]
fn test_touching_circles_intersect() {
    let a = Shape::from(Circle::new(0.0, 0.0, 5.0));
    assert!(a.intersects(&Circle::new(10.0, 0.0, 5.0).into()));
    assert!(!a.intersects(&Circle::new(10.5, 0.0, 5.0).into()));
}

#[test]
fn test_mover_hits_stationary_body() {
    let (mut scene, reported) = recording_scene();
    let a = spawn_box(&mut scene, Vec2::new(-12.0, 0.0), Some(mover(Vec2::new(1.0, 0.0), 4.0)));
    // A second, overlapping hitbox on the mover must never be reported against the first.
    scene
        .add_component(a, Hitbox::rectangle(2.0, 2.0, 4.0, 4.0))
        .unwrap();
    let b = spawn_box(&mut scene, Vec2::ZERO, None);

    scene.update(Duration::from_millis(16));

    let reported = reported.borrow();
    assert!(!reported.is_empty());
    assert!(reported
        .iter()
        .any(|(moving, collided)| moving.entity == a && collided.entity == b));
    assert!(reported
        .iter()
        .all(|(moving, collided)| moving.entity != collided.entity));
}

#[test]
fn test_two_movers_are_reported_from_both_sides() {
    let (mut scene, reported) = recording_scene();
    let a = spawn_box(&mut scene, Vec2::new(0.0, 0.0), Some(mover(Vec2::new(1.0, 0.0), 1.0)));
    let b = spawn_box(&mut scene, Vec2::new(5.0, 0.0), Some(mover(Vec2::new(-1.0, 0.0), 1.0)));

    scene.update(Duration::from_millis(16));

    let reported = reported.borrow();
    assert_eq!(reported.len(), 2);
    assert!(reported.contains(&(HitboxId { entity: a, slot: 0 }, HitboxId { entity: b, slot: 0 })));
    assert!(reported.contains(&(HitboxId { entity: b, slot: 0 }, HitboxId { entity: a, slot: 0 })));

    let events = scene.collision_mut().unwrap().drain_events();
    assert_eq!(events.len(), 2);
}

#[test]
fn test_overlapping_stationary_bodies_are_silent() {
    let (mut scene, reported) = recording_scene();
    spawn_box(&mut scene, Vec2::ZERO, Some(Movement::new()));
    spawn_box(&mut scene, Vec2::new(2.0, 2.0), Some(Movement::new()));

    scene.update(Duration::from_millis(16));

    assert!(scene.collision().unwrap().moving_objects().is_empty());
    assert!(reported.borrow().is_empty());
}

#[test]
fn test_acceleration_never_exceeds_target() {
    let mut scene = Scene::new();
    let id = scene.spawn(Vec2::ZERO);
    scene
        .add_component(
            id,
            Movement::new()
                .with_target_speed(10.0)
                .with_acceleration_rate(2.0),
        )
        .unwrap();

    let mut previous = 0.0;
    for _ in 0..10 {
        scene.update(Duration::from_millis(16));
        let speed = scene.entity(id).unwrap().component::<Movement>().unwrap().speed();
        assert_eq!(speed, f32::min(10.0, previous + 2.0));
        previous = speed;
    }
    assert_eq!(previous, 10.0);
}

#[test]
fn test_missing_family_is_absent() {
    struct Score;
    impl Component for Score {
        const KIND: ComponentKind = ComponentKind::Custom("score");
    }

    let entity = Entity::new(Vec2::ZERO)
        .with_component(Hitbox::circle(0.0, 0.0, 1.0))
        .unwrap();
    assert!(entity.component::<Movement>().is_none());
    assert!(entity.component::<Score>().is_none());
    assert!(entity.components::<Score>().is_empty());
}

#[test]
fn test_despawned_body_stops_colliding() {
    let (mut scene, reported) = recording_scene();
    spawn_box(&mut scene, Vec2::new(-12.0, 0.0), Some(mover(Vec2::new(1.0, 0.0), 4.0)));
    let wall = spawn_box(&mut scene, Vec2::ZERO, None);

    assert!(scene.despawn(wall).is_some());
    scene.update(Duration::from_millis(16));
    assert!(reported.borrow().is_empty());
}
