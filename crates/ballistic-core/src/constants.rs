//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz) — one tick per rendered frame.
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick.
pub const MS_PER_TICK: f64 = 1000.0 / TICK_RATE as f64;

/// Convert a millisecond duration to a whole number of ticks (rounded).
pub const fn ms_to_ticks(ms: u64) -> u64 {
    (ms * TICK_RATE as u64 + 500) / 1000
}

// --- Viewport ---

/// Default viewport width in units.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

/// Default viewport height in units.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 720.0;

/// How far outside the viewport edge enemies spawn.
pub const SPAWN_EDGE_MARGIN: f64 = 30.0;

/// Margin beyond the viewport at which bullets are culled.
pub const BULLET_CULL_MARGIN: f64 = 20.0;

// --- Turret ---

/// Smoothing factor applied to the angular difference each tick.
pub const TURRET_TURN_SMOOTHING: f64 = 0.15;

/// Minimum elapsed time between two bullet spawns (milliseconds).
pub const FIRE_COOLDOWN_MS: u64 = 150;

/// Bullet spawn offset from the center along the aim direction.
pub const MUZZLE_OFFSET: f64 = 55.0;

/// Bullet speed (units per tick).
pub const BULLET_SPEED: f64 = 12.0;

// --- Collision ---

/// Bullet-enemy collision threshold (units).
pub const BULLET_HIT_RADIUS: f64 = 20.0;

/// Enemy-turret collision threshold (units from the defended center).
pub const TURRET_HIT_RADIUS: f64 = 40.0;

// --- Health ---

/// Starting (and maximum) player health.
pub const STARTING_HEALTH: i32 = 3;

/// Invulnerability window after taking damage (milliseconds).
pub const INVULNERABILITY_MS: u64 = 1500;

// --- Waves ---

/// Delay before the first wave of a run starts (milliseconds).
pub const INTRO_DELAY_MS: u64 = 1000;

/// Pause between wave completion and the next wave start (milliseconds).
pub const WAVE_CLEAR_PAUSE_MS: u64 = 2500;

/// Enemies in wave n: WAVE_BASE_ENEMIES + n * WAVE_ENEMIES_PER_WAVE.
pub const WAVE_BASE_ENEMIES: u32 = 5;
pub const WAVE_ENEMIES_PER_WAVE: u32 = 3;

/// Spawn interval for wave n: max(MIN, BASE - n * STEP) milliseconds.
pub const SPAWN_INTERVAL_BASE_MS: u64 = 2000;
pub const SPAWN_INTERVAL_STEP_MS: u64 = 100;
pub const SPAWN_INTERVAL_MIN_MS: u64 = 500;

/// Score bonus for completing wave n: n * WAVE_CLEAR_BONUS.
pub const WAVE_CLEAR_BONUS: u32 = 500;

// --- Enemy kind selection ---
// Cascade evaluated elite -> tank -> fast against a single uniform draw;
// the precedence order is load-bearing for the effective probabilities.

/// First wave on which elites may appear, and their draw threshold.
pub const ELITE_MIN_WAVE: u32 = 5;
pub const ELITE_THRESHOLD: f64 = 0.10;

/// First wave on which tanks may appear, and their draw threshold.
pub const TANK_MIN_WAVE: u32 = 3;
pub const TANK_THRESHOLD: f64 = 0.25;

/// First wave on which fast enemies may appear, and their draw threshold.
pub const FAST_MIN_WAVE: u32 = 2;
pub const FAST_THRESHOLD: f64 = 0.40;
