use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use sprig::{
    CellType, CollisionHandler, Direction8, EntityId, Hitbox, Map, Movement, Rectangle, Scene,
    SimulationConfig, Sprite, SpriteBatch, TextureHandle, Vec2,
};

/// Headless collision demo:
/// - builds an arena whose walls come from an impassable map border
/// - scatters moving balls with random headings
/// - runs a fixed number of ticks and logs every reported collision
const TILE: f32 = 16.0;
const COLUMNS: usize = 24;
const ROWS: usize = 16;
const BALLS: usize = 12;
const TICKS: u32 = 240;

/// Counts draw calls instead of rendering.
#[derive(Default)]
struct NullBatch {
    sprites: usize,
}

impl SpriteBatch for NullBatch {
    fn draw_sprite(&mut self, _sprite: &Sprite, _source: Rectangle) {
        self.sprites += 1;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let hits: Rc<RefCell<BTreeMap<(EntityId, EntityId), u32>>> = Rc::default();
    let handler = {
        let hits = Rc::clone(&hits);
        CollisionHandler::with_callback(move |collision| {
            *hits
                .borrow_mut()
                .entry((collision.moving.entity, collision.collided.entity))
                .or_default() += 1;
        })
    };

    let mut scene = Scene::with_config(SimulationConfig::default()).with_collision_handler(handler);
    let walls = build_walls(&mut scene)?;
    let balls = spawn_balls(&mut scene, fastrand::Rng::with_seed(7))?;
    log::info!("arena: {} wall tiles, {} balls", walls, balls.len());

    let mut batch = NullBatch::default();
    let frame = Duration::from_millis(16);
    for tick in 0..TICKS {
        scene.update(frame);
        scene.draw(&mut batch);

        let Some(collision) = scene.collision_mut() else {
            continue;
        };
        for event in collision.drain_events() {
            log::debug!(
                "tick {tick}: {:?} hit {:?}",
                event.moving.entity,
                event.collided.entity
            );
        }
    }

    for &id in &balls {
        if let Some(movement) = scene.entity(id).and_then(|e| e.component::<Movement>()) {
            let heading = Direction8::classify(movement.direction(), scene.config().stick_dead_zone)?;
            log::info!("{:?} ends heading {:?} at speed {:.2}", id, heading, movement.speed());
        }
    }

    let hits = hits.borrow();
    let total: u32 = hits.values().sum();
    log::info!(
        "{} ticks, {} collisions across {} pairs, {} sprites drawn",
        TICKS,
        total,
        hits.len(),
        batch.sprites
    );
    Ok(())
}

/// One static hitbox per impassable border tile.
fn build_walls(scene: &mut Scene) -> Result<usize> {
    let mut map = Map::new(COLUMNS, ROWS);
    map.set_borders(1, CellType::Impassable)?;

    let mut count = 0;
    for row in 0..map.rows() {
        for column in 0..map.columns() {
            if map.is_passable(column, row) {
                continue;
            }
            let id = scene.spawn(Vec2::new(column as f32 * TILE, row as f32 * TILE));
            scene.add_component(id, Hitbox::rectangle(0.0, 0.0, TILE, TILE))?;
            scene.add_component(id, Sprite::new(TextureHandle(0), (16, 16)))?;
            count += 1;
        }
    }
    Ok(count)
}

fn spawn_balls(scene: &mut Scene, mut rng: fastrand::Rng) -> Result<Vec<EntityId>> {
    let mut balls = Vec::with_capacity(BALLS);
    for _ in 0..BALLS {
        let x = TILE * 2.0 + rng.f32() * TILE * (COLUMNS as f32 - 5.0);
        let y = TILE * 2.0 + rng.f32() * TILE * (ROWS as f32 - 5.0);
        let heading = Vec2::new(rng.f32() * 2.0 - 1.0, rng.f32() * 2.0 - 1.0);
        let speed = 1.5 + rng.f32() * 2.0;

        let id = scene.spawn(Vec2::new(x, y));
        scene.add_component(id, Hitbox::circle(0.0, 0.0, 6.0))?;
        scene.add_component(
            id,
            Movement::new()
                .with_direction(heading)
                .with_speed(speed)
                .with_target_speed(speed)
                .with_acceleration_rate(0.004),
        )?;
        scene.add_component(id, Sprite::new(TextureHandle(1), (12, 12)))?;
        balls.push(id);
    }
    Ok(balls)
}
