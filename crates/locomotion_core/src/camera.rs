//! Third-person camera rig: look-stick yaw/pitch and the boom pose.
//!
//! The rig only supplies the orbit angles and the flattened forward vector
//! the movement basis needs; projection and rendering live elsewhere.

use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRigCfg {
    /// Orbit speed at full look-stick deflection, rad/s.
    pub look_speed_rad_per_s: f32,
    pub min_pitch_rad: f32,
    pub max_pitch_rad: f32,
    pub boom_len: f32,
    pub boom_height: f32,
}

impl Default for CameraRigCfg {
    fn default() -> Self {
        Self {
            look_speed_rad_per_s: 1.2,
            min_pitch_rad: -std::f32::consts::FRAC_PI_3,
            max_pitch_rad: std::f32::consts::FRAC_PI_3,
            boom_len: 5.0,
            boom_height: 1.6,
        }
    }
}

/// Orbit state around the character.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraRig {
    /// CCW-positive yaw; 0 looks along +Z.
    pub yaw: f32,
    /// Clamped to the cfg pitch range.
    pub pitch: f32,
}

impl CameraRig {
    /// Apply one frame of look input. Stick `x` orbits, stick `y` tilts;
    /// pushing the look stick left turns the view left. Non-finite input
    /// is ignored.
    pub fn apply_look(&mut self, cfg: &CameraRigCfg, look: Vec2, dt: f32) {
        if !look.is_finite() || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let step = cfg.look_speed_rad_per_s * dt;
        self.yaw = wrap_angle(self.yaw - look.x * step);
        self.pitch = (self.pitch + look.y * step).clamp(cfg.min_pitch_rad, cfg.max_pitch_rad);
    }

    /// Unit look direction from yaw/pitch.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * sy, sp, cp * cy).normalize()
    }

    /// Boom eye position: above the target, pulled back along the look
    /// direction.
    #[must_use]
    pub fn eye(&self, cfg: &CameraRigCfg, target: Vec3) -> Vec3 {
        target + Vec3::Y * cfg.boom_height - self.forward() * cfg.boom_len
    }
}

pub(crate) fn wrap_angle(a: f32) -> f32 {
    let mut x = a;
    while x > std::f32::consts::PI {
        x -= std::f32::consts::TAU;
    }
    while x < -std::f32::consts::PI {
        x += std::f32::consts::TAU;
    }
    x
}
