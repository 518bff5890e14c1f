/// Pursuer AI: horizontal chase only.
///
/// No pathfinding, no gravity, no platform awareness: the pursuer walks
/// toward the player's x at a constant speed. When both x coordinates are
/// equal the previous velocity is kept.

use super::entity::Actor;
use super::physics;

/// Pick the pursuer's horizontal velocity for this frame.
pub fn chase_velocity(pursuer: &Actor, target_x: f32, speed: f32) -> f32 {
    if target_x < pursuer.body.x {
        -speed
    } else if target_x > pursuer.body.x {
        speed
    } else {
        pursuer.vx
    }
}

/// One pursuer frame: steer, move, clamp.
pub fn pursue(pursuer: &mut Actor, target_x: f32, speed: f32, field_width: f32) {
    pursuer.vx = chase_velocity(pursuer, target_x, speed);
    physics::integrate(pursuer);
    physics::clamp_x(pursuer, field_width);
}
