//! Collision and combat resolution.
//!
//! Two passes per tick over post-move positions: bullet vs enemy, then
//! enemy vs turret. Plain distance-threshold tests; entity counts are tens,
//! so there is no broad phase.

use hecs::{Entity, World};

use ballistic_core::components::{Bullet, Enemy, EnemyId};
use ballistic_core::constants::{
    ms_to_ticks, BULLET_HIT_RADIUS, INVULNERABILITY_MS, TURRET_HIT_RADIUS,
};
use ballistic_core::enums::RunPhase;
use ballistic_core::events::SimEvent;
use ballistic_core::types::Position;

use crate::run_state::RunState;
use crate::timers::{TimerKind, TimerQueue};

/// Resolve all collisions for this tick.
///
/// Mutates the world (despawns), the run state (score, kill counters,
/// health, invulnerability), the phase (game over), and the timer queue
/// (invulnerability expiry; full cancellation on game over).
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    center: Position,
    phase: &mut RunPhase,
    run: &mut RunState,
    timers: &mut TimerQueue,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
    current_tick: u64,
) {
    resolve_bullet_hits(world, run, events, despawn_buffer);
    resolve_turret_collisions(world, center, phase, run, timers, events, despawn_buffer, current_tick);
}

/// Bullet vs enemy pass.
///
/// Bullets are evaluated in fire order and enemies in spawn order, so the
/// tie-break when several enemies are in range is deterministic. A bullet is
/// consumed by its first hit and damages at most one enemy.
fn resolve_bullet_hits(
    world: &mut World,
    run: &mut RunState,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut bullets: Vec<(Entity, u32, Position)> = world
        .query_mut::<(&Bullet, &Position)>()
        .into_iter()
        .map(|(entity, (bullet, pos))| (entity, bullet.0, *pos))
        .collect();
    bullets.sort_by_key(|&(_, order, _)| order);

    let mut enemies: Vec<(Entity, EnemyId)> = world
        .query_mut::<(&EnemyId, &Enemy)>()
        .into_iter()
        .map(|(entity, (id, _))| (entity, *id))
        .collect();
    enemies.sort_by_key(|&(_, id)| id);

    for (bullet_entity, _, bullet_pos) in bullets {
        for &(enemy_entity, enemy_id) in &enemies {
            // Skip enemies already destroyed earlier in this pass.
            let Ok(enemy_pos) = world.get::<&Position>(enemy_entity).map(|p| *p) else {
                continue;
            };
            if bullet_pos.distance_to(&enemy_pos) >= BULLET_HIT_RADIUS {
                continue;
            }

            let (kind, health, points) = {
                let Ok(mut enemy) = world.get::<&mut Enemy>(enemy_entity) else {
                    continue;
                };
                enemy.health -= 1;
                (enemy.kind, enemy.health, enemy.points)
            };

            if health <= 0 {
                let _ = world.despawn(enemy_entity);
                run.enemies_killed += 1;
                run.score += points;
                events.push(SimEvent::EnemyKilled {
                    enemy_id,
                    position: enemy_pos,
                    kind,
                    points,
                });
            } else {
                events.push(SimEvent::EnemyHit {
                    enemy_id,
                    position: enemy_pos,
                    kind,
                });
            }

            // First hit consumes the bullet.
            despawn_buffer.push(bullet_entity);
            break;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Enemy vs turret pass.
///
/// A reaching enemy counts toward wave resolution but never toward score.
/// Damage is applied only outside the invulnerability window; reaching zero
/// health ends the run, cancels all pending timers, and clears the field.
#[allow(clippy::too_many_arguments)]
fn resolve_turret_collisions(
    world: &mut World,
    center: Position,
    phase: &mut RunPhase,
    run: &mut RunState,
    timers: &mut TimerQueue,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
    current_tick: u64,
) {
    despawn_buffer.clear();

    let mut reached: Vec<(Entity, EnemyId)> = Vec::new();
    for (entity, (id, _enemy, pos)) in world.query_mut::<(&EnemyId, &Enemy, &Position)>() {
        if pos.distance_to(&center) < TURRET_HIT_RADIUS {
            reached.push((entity, *id));
        }
    }
    reached.sort_by_key(|&(_, id)| id);

    for (entity, _) in reached {
        let (kind, position) = {
            let Ok(enemy) = world.get::<&Enemy>(entity) else {
                continue;
            };
            let Ok(pos) = world.get::<&Position>(entity) else {
                continue;
            };
            (enemy.kind, *pos)
        };

        let _ = world.despawn(entity);
        run.enemies_killed += 1;
        events.push(SimEvent::EnemyReachedTurret { position, kind });

        if run.invulnerable {
            continue;
        }

        run.health -= 1;
        events.push(SimEvent::TurretDamaged { health: run.health });

        if run.health <= 0 {
            game_over(world, phase, run, timers, events, despawn_buffer);
            return;
        }

        run.invulnerable = true;
        timers.schedule(
            current_tick,
            ms_to_ticks(INVULNERABILITY_MS),
            TimerKind::EndInvulnerability,
        );
    }
}

/// Terminal transition: cancel timers, clear the field, emit the final
/// event. Remaining enemies are removed without damage or per-enemy events.
fn game_over(
    world: &mut World,
    phase: &mut RunPhase,
    run: &mut RunState,
    timers: &mut TimerQueue,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    *phase = RunPhase::GameOver;
    run.invulnerable = false;
    timers.clear();

    despawn_buffer.clear();
    for (entity, _) in world.query_mut::<&Enemy>() {
        despawn_buffer.push(entity);
    }
    for (entity, _) in world.query_mut::<&Bullet>() {
        despawn_buffer.push(entity);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    log::info!(
        "game over: score {} wave {} after {} kills",
        run.score,
        run.wave,
        run.enemies_killed
    );
    events.push(SimEvent::GameOver {
        final_score: run.score,
        wave_reached: run.wave,
    });
}
