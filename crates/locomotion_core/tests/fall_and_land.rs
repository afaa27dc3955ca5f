use glam::{Vec2, Vec3};
use locomotion_core::{Character, GroundHit, GroundQuery, LocomotionParams, TickInput, tick};

struct FlatPlane {
    y: f32,
}
impl GroundQuery for FlatPlane {
    fn raycast_down(&self, origin: Vec3, max_dist: f32) -> Option<GroundHit> {
        let dist = origin.y - self.y;
        (dist > 0.0 && dist <= max_dist).then(|| GroundHit {
            point: Vec3::new(origin.x, self.y, origin.z),
            distance: dist,
        })
    }
}

#[test]
fn falls_from_height_and_converges_without_oscillation() {
    let p = LocomotionParams::default();
    let plane = FlatPlane { y: 0.0 };
    let mut ch = Character::new(Vec3::new(0.0, 50.0, 0.0), 2.0);
    let dt = 0.1;

    let mut landed_at = None;
    for i in 0..100 {
        tick(&mut ch, TickInput::default(), Vec3::Z, Some(&plane), &p, dt);
        if ch.grounded && landed_at.is_none() {
            landed_at = Some(i);
        }
    }
    assert!(landed_at.is_some(), "never landed, y={}", ch.pos.y);

    // Clamp height: ground + half height + clearance.
    let expected = 0.0 + 1.0 + p.ground_offset;
    assert!(
        (ch.pos.y - expected).abs() < 1e-4,
        "resting height {} != {expected}",
        ch.pos.y
    );

    // Further idle ticks must not oscillate.
    for _ in 0..50 {
        tick(&mut ch, TickInput::default(), Vec3::Z, Some(&plane), &p, dt);
        assert!(
            (ch.pos.y - expected).abs() < 1e-4,
            "oscillated to {}",
            ch.pos.y
        );
        assert!(ch.grounded);
        assert_eq!(ch.vertical_vel, 0.0);
    }
}

#[test]
fn grounded_character_never_sinks_while_walking() {
    let p = LocomotionParams::default();
    let plane = FlatPlane { y: 0.0 };
    let mut ch = Character::new(Vec3::new(0.0, 1.1, 0.0), 2.0);
    let clamp = 0.0 + 1.0 + p.ground_offset;
    let input = TickInput {
        move_vec: Vec2::new(0.3, 0.9),
        action_triggered: false,
    };
    for _ in 0..200 {
        tick(&mut ch, input, Vec3::Z, Some(&plane), &p, 0.016);
        assert!(
            ch.pos.y >= clamp - 1e-4,
            "sank below clamp: {} < {clamp}",
            ch.pos.y
        );
    }
}
