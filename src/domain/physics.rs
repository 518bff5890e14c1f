/// Chase-game physics: pure functions over `Actor`.
///
/// ## Per-frame order (player)
///
///   1. `apply_gravity`      vy += gravity (no terminal velocity)
///   2. `integrate`          x += vx, y += vy
///   3. `land_on_platforms`  snap to platform top while falling
///   4. `clamp_x`            keep inside [0, field_width - width]
///
/// ## Landing
///
/// A falling actor (vy > 0) overlapping a platform is snapped so its
/// bottom sits on the platform top and vy becomes 0. Platforms are
/// checked in list order. The snap zeroes vy, so when several overlap
/// in one frame the first one in the list wins.
///
/// ## Jumping
///
/// Allowed only when vy == 0 exactly. Resting actors have vy == 0
/// between frames because every frame ends with a landing snap.

use super::entity::{Actor, Platform};

pub fn apply_gravity(actor: &mut Actor, gravity: f32) {
    actor.vy += gravity;
}

pub fn integrate(actor: &mut Actor) {
    actor.body.x += actor.vx;
    actor.body.y += actor.vy;
}

/// Returns true if the actor landed on any platform this frame.
pub fn land_on_platforms(actor: &mut Actor, platforms: &[Platform]) -> bool {
    let mut landed = false;
    for platform in platforms {
        if actor.vy > 0.0 && actor.body.overlaps(&platform.body) {
            actor.body.y = platform.body.y - actor.body.height;
            actor.vy = 0.0;
            landed = true;
        }
    }
    landed
}

pub fn clamp_x(actor: &mut Actor, field_width: f32) {
    if actor.body.x < 0.0 {
        actor.body.x = 0.0;
    }
    if actor.body.right() > field_width {
        actor.body.x = field_width - actor.body.width;
    }
}

/// Apply an upward impulse if the actor is at rest. Returns whether it fired.
pub fn try_jump(actor: &mut Actor, impulse: f32) -> bool {
    if actor.vy == 0.0 {
        actor.vy = -impulse;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Platform {
        Platform::new(0.0, 380.0, 800.0, 20.0)
    }

    #[test]
    fn gravity_accumulates_without_cap() {
        let mut a = Actor::new(0.0, 0.0, 10.0, 10.0);
        for _ in 0..100 {
            apply_gravity(&mut a, 0.5);
        }
        assert_eq!(a.vy, 50.0);
    }

    #[test]
    fn falling_actor_snaps_to_platform_top() {
        let mut a = Actor::new(50.0, 345.0, 30.0, 30.0).with_velocity(0.0, 6.0);
        integrate(&mut a); // bottom at 381
        assert!(land_on_platforms(&mut a, &[floor()]));
        assert_eq!(a.body.y, 350.0);
        assert_eq!(a.vy, 0.0);
    }

    #[test]
    fn rising_actor_passes_through() {
        let mut a = Actor::new(50.0, 370.0, 30.0, 30.0).with_velocity(0.0, -4.0);
        assert!(!land_on_platforms(&mut a, &[floor()]));
        assert_eq!(a.body.y, 370.0);
        assert_eq!(a.vy, -4.0);
    }

    #[test]
    fn resting_actor_keeps_zero_velocity_each_frame() {
        let mut a = Actor::new(50.0, 350.0, 30.0, 30.0);
        for _ in 0..10 {
            apply_gravity(&mut a, 0.5);
            integrate(&mut a);
            land_on_platforms(&mut a, &[floor()]);
            assert_eq!(a.vy, 0.0);
            assert_eq!(a.body.y, 350.0);
        }
    }

    #[test]
    fn first_overlapping_platform_snaps_the_fall() {
        // Two overlapping platforms: once snapped on the first, vy == 0,
        // so the second no longer counts as a landing.
        let lower = Platform::new(0.0, 300.0, 100.0, 20.0);
        let upper = Platform::new(0.0, 295.0, 100.0, 20.0);
        let mut a = Actor::new(10.0, 272.0, 30.0, 30.0).with_velocity(0.0, 2.0);
        assert!(land_on_platforms(&mut a, &[lower, upper]));
        assert_eq!(a.body.y, 270.0);
    }

    #[test]
    fn clamp_keeps_actor_in_field() {
        let mut a = Actor::new(-5.0, 0.0, 30.0, 30.0);
        clamp_x(&mut a, 800.0);
        assert_eq!(a.body.x, 0.0);
        a.body.x = 790.0;
        clamp_x(&mut a, 800.0);
        assert_eq!(a.body.x, 770.0);
    }

    #[test]
    fn jump_only_from_rest() {
        let mut a = Actor::new(0.0, 0.0, 10.0, 10.0);
        assert!(try_jump(&mut a, 12.0));
        assert_eq!(a.vy, -12.0);
        assert!(!try_jump(&mut a, 12.0));
        assert_eq!(a.vy, -12.0);
    }
}
