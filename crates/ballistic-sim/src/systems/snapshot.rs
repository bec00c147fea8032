//! Snapshot builder — flattens the world and run state into the view
//! structs handed to the presentation layer.

use hecs::World;

use ballistic_core::components::{Bullet, Enemy, EnemyId, Turret};
use ballistic_core::enums::RunPhase;
use ballistic_core::events::SimEvent;
use ballistic_core::state::{BulletView, EnemyView, RunSnapshot, TurretView, WaveProgressView};
use ballistic_core::types::{Position, SimTime, Velocity, Viewport};

use crate::run_state::RunState;

/// Build the complete snapshot for this tick. Enemies and bullets are
/// ordered by their stable ids so identical runs serialize identically.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: RunPhase,
    run: &RunState,
    viewport: Viewport,
    events: Vec<SimEvent>,
) -> RunSnapshot {
    let mut turret = TurretView::default();
    for (_entity, (t, pos)) in world.query::<(&Turret, &Position)>().iter() {
        turret = TurretView {
            position: *pos,
            rotation: t.rotation,
        };
    }

    let mut enemies: Vec<EnemyView> = world
        .query::<(&EnemyId, &Enemy, &Position)>()
        .iter()
        .map(|(_entity, (id, enemy, pos))| EnemyView {
            id: *id,
            kind: enemy.kind,
            position: *pos,
            health: enemy.health,
            max_health: enemy.max_health,
            facing: enemy.facing,
        })
        .collect();
    enemies.sort_by_key(|view| view.id);

    let mut bullets: Vec<(u32, BulletView)> = world
        .query::<(&Bullet, &Position, &Velocity)>()
        .iter()
        .map(|(_entity, (bullet, pos, vel))| {
            (
                bullet.0,
                BulletView {
                    position: *pos,
                    velocity: *vel,
                },
            )
        })
        .collect();
    bullets.sort_by_key(|&(order, _)| order);

    RunSnapshot {
        time: *time,
        phase,
        score: run.score,
        wave: run.wave,
        health: run.health,
        max_health: run.max_health,
        invulnerable: run.invulnerable,
        viewport,
        wave_progress: WaveProgressView {
            enemies_spawned: run.enemies_spawned,
            enemies_killed: run.enemies_killed,
            total_wave_enemies: run.total_wave_enemies,
        },
        turret,
        enemies,
        bullets: bullets.into_iter().map(|(_, view)| view).collect(),
        events,
    }
}
