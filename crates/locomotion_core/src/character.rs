//! Controllable character state.

use crate::anim::{ActionPulse, AnimState};
use glam::Vec3;

/// The one controllable entity. Created once at scene init with a fixed
/// spawn position and mutated every frame by [`crate::tick`]; nothing else
/// writes to it.
#[derive(Debug, Clone)]
pub struct Character {
    /// Capsule center, world space.
    pub pos: Vec3,
    /// Facing yaw in radians; 0 faces +Z, CCW-positive.
    pub yaw: f32,
    /// Vertical velocity, units/s. Never positive: there is no jump input,
    /// only gravity and ground snap.
    pub vertical_vel: f32,
    /// Result of the most recent ground resolution.
    pub grounded: bool,
    /// Fixed capsule height; ray origins and clearance derive from it.
    pub height: f32,
    /// Animation state derived at the end of the last tick.
    pub anim: AnimState,
    /// In-flight action pulse, if any.
    pub action: ActionPulse,
    spawn: Vec3,
}

impl Character {
    #[must_use]
    pub fn new(spawn: Vec3, height: f32) -> Self {
        Self {
            pos: spawn,
            yaw: 0.0,
            vertical_vel: 0.0,
            grounded: false,
            height,
            anim: AnimState::Idle,
            action: ActionPulse::default(),
            spawn,
        }
    }

    /// Spawn position used by [`crate::reset`].
    #[must_use]
    pub fn spawn(&self) -> Vec3 {
        self.spawn
    }

    pub(crate) fn set_spawn(&mut self, spawn: Vec3) {
        self.spawn = spawn;
    }

    /// World-space origin for downward ground probes (half a height above
    /// the capsule center keeps the ray start out of the surface).
    #[must_use]
    pub fn probe_origin(&self) -> Vec3 {
        self.pos + Vec3::new(0.0, self.height * 0.5, 0.0)
    }

    /// Capsule bottom.
    #[must_use]
    pub fn feet_y(&self) -> f32 {
        self.pos.y - self.height * 0.5
    }
}
