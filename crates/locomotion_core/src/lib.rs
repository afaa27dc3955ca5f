//! Character locomotion: grounding, movement reconciliation and
//! animation-state gating.
//!
//! Everything here is pure logic over `glam` types so the renderer host can
//! delegate transform math and only upload GPU buffers. The terrain is an
//! opaque collaborator behind [`GroundQuery`]; it may be absent (still
//! loading), in which case every query misses and the character free-falls.

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod anim;
pub mod camera;
pub mod character;
pub mod ground;
pub mod motion;

pub use anim::{ActionPulse, AnimState, derive_anim_state};
pub use camera::{CameraRig, CameraRigCfg};
pub use character::Character;
pub use ground::{GroundHit, GroundQuery, GroundResult, resolve_ground};
pub use motion::{MoveBasis, commit_movement, integrate_horizontal, integrate_vertical};

/// Tunables for one locomotion step. Defaults match the shipped config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionParams {
    /// Downward acceleration in units/s^2 (negative).
    pub gravity: f32,
    /// Horizontal speed at full stick deflection, units/s.
    pub move_speed: f32,
    /// Stick magnitude below which input is treated as rest.
    pub deadzone: f32,
    /// Clearance kept between the capsule bottom and the surface.
    pub ground_offset: f32,
    /// Lateral offset of the four cardinal ground probes.
    pub probe_radius: f32,
    /// Search distance for the per-frame ground rays.
    pub ground_ray_range: f32,
    /// Below this vertical velocity a missed ground query triggers the
    /// long-range recovery snap.
    pub fall_snap_threshold: f32,
    /// Search distance for the recovery snap ray.
    pub recovery_ray_range: f32,
    /// How long an action pulse holds [`AnimState::Acting`].
    pub action_duration_s: f32,
}

impl Default for LocomotionParams {
    fn default() -> Self {
        Self {
            gravity: -15.0,
            move_speed: 8.0,
            deadzone: 0.3,
            ground_offset: 0.1,
            probe_radius: 0.3,
            ground_ray_range: 10.0,
            fall_snap_threshold: -5.0,
            recovery_ray_range: 100.0,
            action_duration_s: 0.8,
        }
    }
}

/// Per-frame input to [`tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Stick vector in `[-1, 1]^2`; `x` is camera-right, `y` camera-forward.
    pub move_vec: glam::Vec2,
    /// One-shot action trigger (gesture recognized, button pressed).
    pub action_triggered: bool,
}

/// Advance the character by one simulation frame.
///
/// Order per frame: sanitize input, propose and commit camera-relative
/// horizontal movement, resolve the ground under the (possibly moved)
/// character, integrate vertical motion against it, then derive the
/// animation state. A `None` terrain makes every ground query miss, which
/// is the expected bootstrap state while assets stream in.
pub fn tick<Q: GroundQuery + ?Sized>(
    ch: &mut Character,
    input: TickInput,
    cam_forward: glam::Vec3,
    terrain: Option<&Q>,
    p: &LocomotionParams,
    dt: f32,
) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }
    let stick = motion::apply_deadzone(motion::sanitize_input(input.move_vec), p.deadzone);

    let basis = MoveBasis::from_camera_forward(cam_forward, ch.yaw);
    let proposed = integrate_horizontal(ch.pos, stick, basis, p.move_speed, dt);
    commit_movement(ch, proposed, stick, terrain, p);

    let ground = resolve_ground(ch, terrain, p);
    integrate_vertical(ch, &ground, terrain, p, dt);

    if input.action_triggered {
        ch.action.trigger(p.action_duration_s);
    }
    ch.action.advance(dt);
    ch.anim = derive_anim_state(ch.action, stick, p.deadzone);
}

/// Return the character to `spawn_pos` in a deterministic rest state.
///
/// Ground is re-resolved immediately so a spawn point floating above the
/// surface settles onto it on the next frames rather than popping.
pub fn reset<Q: GroundQuery + ?Sized>(
    ch: &mut Character,
    spawn_pos: glam::Vec3,
    terrain: Option<&Q>,
    p: &LocomotionParams,
) {
    ch.pos = spawn_pos;
    ch.set_spawn(spawn_pos);
    ch.vertical_vel = 0.0;
    ch.action.clear();
    ch.anim = AnimState::Idle;
    let ground = resolve_ground(ch, terrain, p);
    ch.grounded = ground.grounded;
    if let Some(gy) = ground.ground_y {
        ch.pos.y = gy + ch.height * 0.5 + p.ground_offset;
    }
    log::debug!(
        "reset: pos=({:.2},{:.2},{:.2}) grounded={}",
        ch.pos.x,
        ch.pos.y,
        ch.pos.z,
        ch.grounded
    );
}
