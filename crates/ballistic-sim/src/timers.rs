//! Scheduled timer records — the tick-loop replacement for delayed
//! callbacks.
//!
//! The original presentation-coupled implementation used engine timers with
//! closures over mutable scene state. Here every delayed continuation is an
//! explicit `{fire_at_tick, kind}` record processed at the tick boundary,
//! and cancellation removes pending records instead of relying on captured
//! guards.

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Begin spawning the given wave (Intro or WaveClear -> WaveActive).
    StartWave { wave: u32 },
    /// Spawn one enemy of the given wave.
    SpawnEnemy { wave: u32 },
    /// Clear the post-damage invulnerability flag.
    EndInvulnerability,
}

/// A pending timer.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    pub fire_at_tick: u64,
    pub kind: TimerKind,
}

/// Pending timers for the run. Not ordered; `drain_due` preserves schedule
/// order for timers firing on the same tick.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<Timer>,
}

impl TimerQueue {
    /// Schedule `kind` to fire `delay_ticks` after `now`.
    pub fn schedule(&mut self, now: u64, delay_ticks: u64, kind: TimerKind) {
        self.pending.push(Timer {
            fire_at_tick: now + delay_ticks,
            kind,
        });
    }

    /// Remove and return every timer due at `now`, in schedule order.
    pub fn drain_due(&mut self, now: u64) -> Vec<TimerKind> {
        let mut due = Vec::new();
        self.pending.retain(|timer| {
            if timer.fire_at_tick <= now {
                due.push(timer.kind);
                false
            } else {
                true
            }
        });
        due
    }

    /// Cancel everything. Used on game over and restart so stale spawn
    /// timers cannot act on a reset or ended run.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
