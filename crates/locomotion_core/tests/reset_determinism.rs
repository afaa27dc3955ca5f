use glam::{Vec2, Vec3};
use locomotion_core::{
    AnimState, Character, GroundHit, GroundQuery, LocomotionParams, TickInput, reset, tick,
};

struct FlatPlane;
impl GroundQuery for FlatPlane {
    fn raycast_down(&self, origin: Vec3, max_dist: f32) -> Option<GroundHit> {
        (origin.y > 0.0 && origin.y <= max_dist).then(|| GroundHit {
            point: Vec3::new(origin.x, 0.0, origin.z),
            distance: origin.y,
        })
    }
}

#[test]
fn reset_is_deterministic_from_any_state() {
    let p = LocomotionParams::default();
    let spawn = Vec3::new(0.0, 2.0, 0.0);
    let mut a = Character::new(spawn, 2.0);
    let mut b = Character::new(spawn, 2.0);

    // Drive `a` into an arbitrary mid-air, mid-action state.
    let input = TickInput {
        move_vec: Vec2::new(0.7, 0.7),
        action_triggered: true,
    };
    for _ in 0..37 {
        tick(&mut a, input, Vec3::X, Some(&FlatPlane), &p, 0.03);
    }

    reset(&mut a, spawn, Some(&FlatPlane), &p);
    reset(&mut b, spawn, Some(&FlatPlane), &p);

    assert_eq!(a.pos, b.pos);
    assert_eq!(a.vertical_vel, 0.0);
    assert_eq!(a.anim, AnimState::Idle);
    assert!(!a.action.active());
    // Spawn is 2.0 up; ground snap settles to the clamp height.
    assert!((a.pos.y - 1.1).abs() < 1e-5, "y={}", a.pos.y);
    assert!((a.pos.x - spawn.x).abs() < 1e-6 && (a.pos.z - spawn.z).abs() < 1e-6);
}

#[test]
fn reset_without_terrain_keeps_spawn_height() {
    let p = LocomotionParams::default();
    let spawn = Vec3::new(3.0, 8.0, -2.0);
    let mut ch = Character::new(spawn, 2.0);
    ch.vertical_vel = -12.0;
    reset(&mut ch, spawn, None::<&FlatPlane>, &p);
    assert_eq!(ch.pos, spawn);
    assert!(!ch.grounded);
    assert_eq!(ch.vertical_vel, 0.0);
    assert_eq!(ch.anim, AnimState::Idle);
}
