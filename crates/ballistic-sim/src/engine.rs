//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! fires due timers, runs all systems in a fixed order, and produces
//! `RunSnapshot`s. The host calls `tick()` once per rendered frame.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ballistic_core::commands::PlayerCommand;
use ballistic_core::constants::{ms_to_ticks, INTRO_DELAY_MS};
use ballistic_core::enums::RunPhase;
use ballistic_core::events::SimEvent;
use ballistic_core::state::RunSnapshot;
use ballistic_core::types::{Position, SimTime, Viewport};

use crate::run_state::RunState;
use crate::systems;
use crate::timers::{TimerKind, TimerQueue};
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial viewport; the defended center is its midpoint.
    pub viewport: Viewport,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            viewport: Viewport::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all run state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: RunPhase,
    run: RunState,
    viewport: Viewport,
    rng: ChaCha8Rng,
    aim_target: Position,
    firing: bool,
    timers: TimerQueue,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
    next_enemy_id: u32,
    next_bullet_id: u32,
}

impl SimulationEngine {
    /// Create a new engine and begin a run: the turret goes live
    /// immediately and the first wave starts after the intro delay.
    pub fn new(config: SimConfig) -> Self {
        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            phase: RunPhase::Intro,
            run: RunState::new_run(),
            viewport: config.viewport,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            aim_target: config.viewport.center(),
            firing: false,
            timers: TimerQueue::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            next_enemy_id: 0,
            next_bullet_id: 0,
        };
        engine.begin_run();
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// In GameOver the world is frozen: commands other than restart are
    /// dropped, no systems run, and time stops.
    pub fn tick(&mut self) -> RunSnapshot {
        self.process_commands();

        if self.phase != RunPhase::GameOver {
            self.process_timers();
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.run,
            self.viewport,
            events,
        )
    }

    /// Get the current run phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the run state.
    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    /// Reset everything for a fresh run and schedule the first wave.
    fn begin_run(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.phase = RunPhase::Intro;
        self.run = RunState::new_run();
        self.timers.clear();
        self.events.clear();
        self.firing = false;
        self.aim_target = self.viewport.center();
        self.next_enemy_id = 0;
        self.next_bullet_id = 0;

        world_setup::spawn_turret(&mut self.world, self.viewport);
        self.timers
            .schedule(0, ms_to_ticks(INTRO_DELAY_MS), TimerKind::StartWave { wave: 1 });

        log::info!("run started: viewport {:?}", self.viewport);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Everything but restart is dropped
    /// while the run is over.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Restart => {
                if self.phase == RunPhase::GameOver {
                    log::info!("restarting after game over");
                    self.begin_run();
                }
            }
            _ if self.phase == RunPhase::GameOver => {}
            PlayerCommand::SetAimTarget { x, y } => {
                // Out-of-viewport aim is fine (the angle math tolerates any
                // finite point); non-finite input is dropped.
                if x.is_finite() && y.is_finite() {
                    self.aim_target = Position::new(x, y);
                }
            }
            PlayerCommand::SetFiring { firing } => {
                self.firing = firing;
            }
            PlayerCommand::ResizeViewport { width, height } => {
                if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
                    self.viewport = Viewport::new(width, height);
                    // The turret sits at the defended center; move it along.
                    let center = self.viewport.center();
                    for (_entity, (_turret, pos)) in self
                        .world
                        .query_mut::<(&ballistic_core::components::Turret, &mut Position)>()
                    {
                        *pos = center;
                    }
                }
            }
        }
    }

    /// Fire every due timer. Each handler re-checks the state it is about
    /// to mutate, so a timer that raced a transition becomes a no-op.
    fn process_timers(&mut self) {
        for kind in self.timers.drain_due(self.time.tick) {
            match kind {
                TimerKind::StartWave { wave } => {
                    self.run.wave = wave;
                    self.phase = RunPhase::WaveActive;
                    systems::wave_director::start_wave(
                        &mut self.run,
                        &mut self.timers,
                        self.time.tick,
                    );
                }
                TimerKind::SpawnEnemy { wave } => {
                    // Stale spawn timers from a superseded wave are dropped.
                    if self.phase == RunPhase::WaveActive && wave == self.run.wave {
                        systems::wave_director::spawn_wave_enemy(
                            &mut self.world,
                            &mut self.rng,
                            &mut self.next_enemy_id,
                            &mut self.run,
                            self.viewport,
                            &mut self.events,
                        );
                    }
                }
                TimerKind::EndInvulnerability => {
                    self.run.invulnerable = false;
                }
            }
        }
    }

    /// Run all systems in order. Collision must see post-move positions and
    /// the completion check must see this tick's kills.
    fn run_systems(&mut self) {
        // 1. Turret rotation toward the aim target
        systems::aiming::rotate_turret(&mut self.world, self.aim_target);
        // 2. Fire evaluation (cooldown-gated)
        if self.firing {
            systems::aiming::try_fire(
                &mut self.world,
                self.time.tick,
                &mut self.next_bullet_id,
                &mut self.events,
            );
        }
        // 3. Bullet integration + out-of-bounds culling
        systems::movement::run_bullets(&mut self.world, self.viewport, &mut self.despawn_buffer);
        // 4. Enemy homing toward the center
        systems::movement::run_enemies(&mut self.world, self.viewport.center());
        // 5. Collision resolution (bullet-enemy, then enemy-turret)
        systems::collision::run(
            &mut self.world,
            self.viewport.center(),
            &mut self.phase,
            &mut self.run,
            &mut self.timers,
            &mut self.events,
            &mut self.despawn_buffer,
            self.time.tick,
        );
        // 6. Wave completion on this tick's kills
        if self.phase == RunPhase::WaveActive && systems::wave_director::wave_complete(&self.run) {
            systems::wave_director::complete_wave(
                &mut self.phase,
                &mut self.run,
                &mut self.timers,
                &mut self.events,
                self.time.tick,
            );
        }
    }

    /// Pending timer count (for tests asserting cancellation).
    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Spawn an enemy of `kind` at `position` (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        kind: ballistic_core::enums::EnemyKind,
        position: Position,
    ) -> ballistic_core::components::EnemyId {
        use ballistic_core::components::{Enemy, EnemyId};

        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        let (max_health, speed, points) = world_setup::enemy_kind_params(kind);
        self.world.spawn((
            id,
            Enemy {
                kind,
                health: max_health,
                max_health,
                speed,
                points,
                facing: 0.0,
            },
            position,
        ));
        id
    }

    /// Spawn a bullet at `position` with the given velocity (for tests that
    /// need exact collision geometry without aiming).
    #[cfg(test)]
    pub fn spawn_test_bullet(
        &mut self,
        position: Position,
        velocity: ballistic_core::types::Velocity,
    ) {
        use ballistic_core::components::Bullet;

        let id = self.next_bullet_id;
        self.next_bullet_id += 1;
        self.world.spawn((Bullet(id), position, velocity));
    }
}
