//! Movement integration: camera-relative horizontal motion and
//! gravity-driven vertical reconciliation against the ground.

use crate::LocomotionParams;
use crate::character::Character;
use crate::ground::{GroundQuery, GroundResult};
use glam::{Vec2, Vec3};

/// Movement basis in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveBasis {
    pub fwd: Vec2,
    pub right: Vec2,
}

impl MoveBasis {
    /// Basis from a yaw angle (CCW-positive, 0 faces +Z).
    #[must_use]
    pub fn from_yaw(yaw: f32) -> Self {
        let (s, c) = yaw.sin_cos();
        Self {
            fwd: Vec2::new(s, c),
            right: Vec2::new(c, -s),
        }
    }

    /// Basis from the camera's forward vector, flattened to XZ and
    /// normalized. Pushing the stick away from self moves along `fwd`.
    /// Falls back to `fallback_yaw` when the camera looks straight up or
    /// down and the flattened forward degenerates.
    #[must_use]
    pub fn from_camera_forward(cam_forward: Vec3, fallback_yaw: f32) -> Self {
        let flat = Vec2::new(cam_forward.x, cam_forward.z);
        if flat.length_squared() < 1e-8 {
            return Self::from_yaw(fallback_yaw);
        }
        let fwd = flat.normalize();
        Self {
            fwd,
            right: Vec2::new(fwd.y, -fwd.x),
        }
    }
}

/// Replace degenerate (non-finite) stick vectors with rest and clamp
/// components to the documented `[-1, 1]` box.
#[must_use]
pub fn sanitize_input(v: Vec2) -> Vec2 {
    if !v.is_finite() {
        return Vec2::ZERO;
    }
    v.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
}

/// Treat stick magnitudes at or below the deadzone as rest.
#[must_use]
pub fn apply_deadzone(v: Vec2, deadzone: f32) -> Vec2 {
    if v.length() <= deadzone { Vec2::ZERO } else { v }
}

/// Candidate position after applying the stick in the camera basis. The
/// combined deflection is clamped to unit length so diagonals are not
/// faster. Nothing is committed here.
#[must_use]
pub fn integrate_horizontal(
    pos: Vec3,
    stick: Vec2,
    basis: MoveBasis,
    move_speed: f32,
    dt: f32,
) -> Vec3 {
    let mut planar = basis.right * stick.x + basis.fwd * stick.y;
    if planar.length_squared() > 1.0 {
        planar = planar.normalize();
    }
    pos + Vec3::new(planar.x, 0.0, planar.y) * (move_speed * dt)
}

/// Commit a proposed horizontal position if ground exists there.
///
/// The destination is probed with a downward ray before the move lands; no
/// surface within range means a void ahead, and the horizontal delta is
/// dropped for this frame (vertical integration still runs). Facing follows
/// the movement direction, gated on the deadzone so stick drift cannot
/// twitch the character.
pub fn commit_movement<Q: GroundQuery + ?Sized>(
    ch: &mut Character,
    proposed: Vec3,
    stick: Vec2,
    terrain: Option<&Q>,
    p: &LocomotionParams,
) {
    let planar = Vec2::new(proposed.x - ch.pos.x, proposed.z - ch.pos.z);
    if planar.length_squared() <= f32::EPSILON {
        return;
    }
    let probe = Vec3::new(proposed.x, ch.pos.y + ch.height * 0.5, proposed.z);
    if terrain
        .and_then(|t| t.raycast_down(probe, p.ground_ray_range))
        .is_none()
    {
        return;
    }
    ch.pos.x = proposed.x;
    ch.pos.z = proposed.z;
    if stick.length() > p.deadzone {
        ch.yaw = planar.x.atan2(planar.y);
    }
}

/// Reconcile vertical motion against the resolved ground.
///
/// Grounded with non-positive velocity snaps the capsule to the clamp
/// height `ground_y + height/2 + ground_offset` and zeroes the velocity.
/// Airborne accumulates gravity. Past `fall_snap_threshold` with no ground
/// in normal range, a long recovery ray snaps to the nearest surface below;
/// that path recovers falls that tunneled through thin geometry and is not
/// physically exact.
pub fn integrate_vertical<Q: GroundQuery + ?Sized>(
    ch: &mut Character,
    ground: &GroundResult,
    terrain: Option<&Q>,
    p: &LocomotionParams,
    dt: f32,
) {
    if ground.grounded && ch.vertical_vel <= 0.0 {
        if let Some(gy) = ground.ground_y {
            ch.pos.y = gy + ch.height * 0.5 + p.ground_offset;
        }
        ch.vertical_vel = 0.0;
        ch.grounded = true;
        return;
    }
    ch.grounded = false;
    ch.vertical_vel += p.gravity * dt;
    ch.pos.y += ch.vertical_vel * dt;
    if ch.vertical_vel < p.fall_snap_threshold
        && let Some(hit) =
            terrain.and_then(|t| t.raycast_down(ch.probe_origin(), p.recovery_ray_range))
    {
        log::debug!(
            "steep-fall recovery snap at ({:.2}, {:.2}, {:.2}) -> y={:.2}",
            ch.pos.x,
            ch.pos.y,
            ch.pos.z,
            hit.point.y
        );
        ch.pos.y = hit.point.y + ch.height * 0.5 + p.ground_offset;
        ch.vertical_vel = 0.0;
        ch.grounded = true;
    }
}
