//! Motion integration: bullet ballistics and enemy homing.

use std::f64::consts::FRAC_PI_2;

use hecs::{Entity, World};

use ballistic_core::components::{Bullet, Enemy};
use ballistic_core::constants::BULLET_CULL_MARGIN;
use ballistic_core::types::{Position, Velocity, Viewport};

/// Advance all bullets by their fixed velocity and cull any that leave the
/// viewport (plus margin). Culling happens before collision resolution, so
/// an off-screen bullet can never damage a just-spawned edge enemy.
pub fn run_bullets(world: &mut World, viewport: Viewport, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_bullet, pos, vel)) in world.query_mut::<(&Bullet, &mut Position, &Velocity)>() {
        pos.x += vel.x;
        pos.y += vel.y;

        if !viewport.contains_with_margin(pos, BULLET_CULL_MARGIN) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Move each enemy `speed` units along the bearing to the defended center
/// and face it that way.
///
/// The bearing is recomputed from the current center every tick, so enemies
/// track a center moved by a viewport resize without any special casing.
pub fn run_enemies(world: &mut World, center: Position) {
    for (_entity, (enemy, pos)) in world.query_mut::<(&mut Enemy, &mut Position)>() {
        let bearing = pos.angle_to(&center);
        *pos = pos.stepped(bearing, enemy.speed);
        enemy.facing = bearing + FRAC_PI_2;
    }
}
