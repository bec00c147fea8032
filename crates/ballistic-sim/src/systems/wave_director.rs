//! Wave direction: sizing, spawn cadence, and completion.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use ballistic_core::constants::{
    ms_to_ticks, SPAWN_INTERVAL_BASE_MS, SPAWN_INTERVAL_MIN_MS, SPAWN_INTERVAL_STEP_MS,
    WAVE_BASE_ENEMIES, WAVE_CLEAR_BONUS, WAVE_CLEAR_PAUSE_MS, WAVE_ENEMIES_PER_WAVE,
};
use ballistic_core::enums::RunPhase;
use ballistic_core::events::SimEvent;
use ballistic_core::types::Viewport;

use crate::run_state::RunState;
use crate::timers::{TimerKind, TimerQueue};
use crate::world_setup;

/// Enemies in the given wave.
pub fn wave_size(wave: u32) -> u32 {
    WAVE_BASE_ENEMIES + wave * WAVE_ENEMIES_PER_WAVE
}

/// Spawn interval for the given wave, in ticks. Shrinks 100 ms per wave
/// down to a 500 ms floor.
pub fn spawn_interval_ticks(wave: u32) -> u64 {
    let ms = SPAWN_INTERVAL_BASE_MS
        .saturating_sub(wave as u64 * SPAWN_INTERVAL_STEP_MS)
        .max(SPAWN_INTERVAL_MIN_MS);
    ms_to_ticks(ms)
}

/// Begin `run.wave`: reset the wave counters and schedule every spawn up
/// front, the first one interval from now.
pub fn start_wave(run: &mut RunState, timers: &mut TimerQueue, now: u64) {
    run.enemies_spawned = 0;
    run.enemies_killed = 0;
    run.total_wave_enemies = wave_size(run.wave);

    let interval = spawn_interval_ticks(run.wave);
    for k in 1..=run.total_wave_enemies as u64 {
        timers.schedule(now, k * interval, TimerKind::SpawnEnemy { wave: run.wave });
    }

    log::debug!(
        "wave {} started: {} enemies every {} ticks",
        run.wave,
        run.total_wave_enemies,
        interval
    );
}

/// Handle one due spawn timer: place an enemy at an edge and announce it.
pub fn spawn_wave_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_enemy_id: &mut u32,
    run: &mut RunState,
    viewport: Viewport,
    events: &mut Vec<SimEvent>,
) {
    let (enemy_id, kind, position) =
        world_setup::spawn_enemy(world, rng, next_enemy_id, run.wave, viewport);
    run.enemies_spawned += 1;

    events.push(SimEvent::EnemySpawned {
        enemy_id,
        kind,
        position,
    });
}

/// Whether the active wave has resolved every enemy it will ever spawn.
pub fn wave_complete(run: &RunState) -> bool {
    run.total_wave_enemies > 0 && run.enemies_killed >= run.total_wave_enemies
}

/// Award the completion bonus, enter the wave-clear pause, and schedule the
/// next wave's start.
pub fn complete_wave(
    phase: &mut RunPhase,
    run: &mut RunState,
    timers: &mut TimerQueue,
    events: &mut Vec<SimEvent>,
    now: u64,
) {
    let bonus = run.wave * WAVE_CLEAR_BONUS;
    run.score += bonus;
    events.push(SimEvent::WaveCompleted {
        wave: run.wave,
        bonus,
    });
    log::debug!("wave {} complete, bonus {bonus}", run.wave);

    *phase = RunPhase::WaveClear;
    timers.schedule(
        now,
        ms_to_ticks(WAVE_CLEAR_PAUSE_MS),
        TimerKind::StartWave { wave: run.wave + 1 },
    );
}
