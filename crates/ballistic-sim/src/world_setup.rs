//! Entity spawn factories for setting up the simulation world.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ballistic_core::components::{Enemy, EnemyId, Turret};
use ballistic_core::constants::*;
use ballistic_core::enums::EnemyKind;
use ballistic_core::types::{Position, Viewport};

/// Spawn the turret singleton at the defended center.
pub fn spawn_turret(world: &mut World, viewport: Viewport) -> hecs::Entity {
    world.spawn((
        Turret {
            rotation: 0.0,
            last_fire_tick: None,
        },
        viewport.center(),
    ))
}

/// Spawn a single enemy at a random viewport edge, heading for the center.
///
/// Kind selection and edge placement both draw from the run RNG, so the
/// whole spawn is reproducible from the seed.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_enemy_id: &mut u32,
    wave: u32,
    viewport: Viewport,
) -> (EnemyId, EnemyKind, Position) {
    let kind = roll_enemy_kind(rng, wave);
    let position = roll_edge_position(rng, viewport);

    let id = EnemyId(*next_enemy_id);
    *next_enemy_id += 1;

    let (max_health, speed, points) = enemy_kind_params(kind);
    let facing = position.angle_to(&viewport.center()) + std::f64::consts::FRAC_PI_2;

    world.spawn((
        id,
        Enemy {
            kind,
            health: max_health,
            max_health,
            speed,
            points,
            facing,
        },
        position,
    ));

    (id, kind, position)
}

/// Pick an enemy kind for the wave.
///
/// Single uniform draw against a cascade evaluated elite -> tank -> fast;
/// the precedence order shifts the effective probabilities at wave
/// boundaries and is preserved from the original balance.
fn roll_enemy_kind(rng: &mut ChaCha8Rng, wave: u32) -> EnemyKind {
    let draw: f64 = rng.gen();

    if wave >= ELITE_MIN_WAVE && draw < ELITE_THRESHOLD {
        EnemyKind::Elite
    } else if wave >= TANK_MIN_WAVE && draw < TANK_THRESHOLD {
        EnemyKind::Tank
    } else if wave >= FAST_MIN_WAVE && draw < FAST_THRESHOLD {
        EnemyKind::Fast
    } else {
        EnemyKind::Basic
    }
}

/// Uniform position just outside one of the four viewport edges.
fn roll_edge_position(rng: &mut ChaCha8Rng, viewport: Viewport) -> Position {
    let side: u32 = rng.gen_range(0..4);
    match side {
        // Top
        0 => Position::new(rng.gen_range(0.0..=viewport.width), -SPAWN_EDGE_MARGIN),
        // Right
        1 => Position::new(
            viewport.width + SPAWN_EDGE_MARGIN,
            rng.gen_range(0.0..=viewport.height),
        ),
        // Bottom
        2 => Position::new(
            rng.gen_range(0.0..=viewport.width),
            viewport.height + SPAWN_EDGE_MARGIN,
        ),
        // Left
        _ => Position::new(-SPAWN_EDGE_MARGIN, rng.gen_range(0.0..=viewport.height)),
    }
}

/// Combat parameters per enemy kind: (max health, speed units/tick, points).
pub fn enemy_kind_params(kind: EnemyKind) -> (i32, f64, u32) {
    match kind {
        EnemyKind::Basic => (1, 1.2, 100),
        EnemyKind::Fast => (1, 2.5, 150),
        EnemyKind::Tank => (3, 0.8, 200),
        EnemyKind::Elite => (4, 1.5, 500),
    }
}
