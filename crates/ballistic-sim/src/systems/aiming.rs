//! Turret aiming and weapon release.

use std::f64::consts::FRAC_PI_2;

use hecs::World;

use ballistic_core::components::{Bullet, Turret};
use ballistic_core::constants::{
    ms_to_ticks, BULLET_SPEED, FIRE_COOLDOWN_MS, MUZZLE_OFFSET, TURRET_TURN_SMOOTHING,
};
use ballistic_core::events::SimEvent;
use ballistic_core::math::lerp_angle;
use ballistic_core::types::{Position, Velocity};

/// Rotate the turret toward the aim target.
///
/// The barrel sprite points up at rotation 0, so the target angle carries a
/// +90 degree offset from the geometric bearing. Smoothing never snaps; the
/// lag is a deliberate feel choice.
pub fn rotate_turret(world: &mut World, aim_target: Position) {
    for (_entity, (turret, pos)) in world.query_mut::<(&mut Turret, &Position)>() {
        let target = pos.angle_to(&aim_target) + FRAC_PI_2;
        turret.rotation = lerp_angle(turret.rotation, target, TURRET_TURN_SMOOTHING);
    }
}

/// Fire one bullet if the cooldown has elapsed; otherwise a silent no-op.
///
/// The bullet leaves from `MUZZLE_OFFSET` units along the current aim
/// direction with a fixed muzzle speed, and its velocity never changes
/// afterward.
pub fn try_fire(
    world: &mut World,
    current_tick: u64,
    next_bullet_id: &mut u32,
    events: &mut Vec<SimEvent>,
) {
    let cooldown_ticks = ms_to_ticks(FIRE_COOLDOWN_MS);

    let mut release: Option<(Position, f64)> = None;
    for (_entity, (turret, pos)) in world.query_mut::<(&mut Turret, &Position)>() {
        let ready = match turret.last_fire_tick {
            Some(last) => current_tick.saturating_sub(last) >= cooldown_ticks,
            None => true,
        };
        if ready {
            turret.last_fire_tick = Some(current_tick);
            // Barrel rotation is offset +90 degrees from the flight direction.
            release = Some((*pos, turret.rotation - FRAC_PI_2));
        }
    }

    if let Some((center, direction)) = release {
        let origin = center.stepped(direction, MUZZLE_OFFSET);
        let velocity = Velocity::along(direction, BULLET_SPEED);

        let id = *next_bullet_id;
        *next_bullet_id += 1;
        world.spawn((Bullet(id), origin, velocity));

        events.push(SimEvent::Fired { origin, direction });
    }
}
