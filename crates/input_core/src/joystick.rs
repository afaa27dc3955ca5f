//! Virtual joystick: pointer displacement to a normalized stick vector.

use glam::Vec2;

/// One on-screen stick. Screen coordinates grow right/down; the emitted
/// vector is `x` right, `y` forward (screen-up), both in `[-1, 1]`,
/// clamped to the unit disc at the widget radius.
///
/// A drag without a preceding engage is ignored, as is any non-finite
/// coordinate pair; release always returns the stick to rest.
#[derive(Debug, Clone, Copy)]
pub struct VirtualJoystick {
    radius: f32,
    center: Option<Vec2>,
    value: Vec2,
}

impl VirtualJoystick {
    #[must_use]
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.abs().max(1.0),
            center: None,
            value: Vec2::ZERO,
        }
    }

    /// Touch-down: anchor the stick at the contact point.
    pub fn engage(&mut self, at: Vec2) {
        if !at.is_finite() {
            return;
        }
        self.center = Some(at);
        self.value = Vec2::ZERO;
    }

    /// Touch-move: update deflection from the anchor.
    pub fn drag(&mut self, to: Vec2) {
        let Some(center) = self.center else {
            return;
        };
        if !to.is_finite() {
            return;
        }
        let mut d = (to - center) / self.radius;
        if d.length_squared() > 1.0 {
            d = d.normalize();
        }
        self.value = d;
    }

    /// Touch-up: back to rest.
    pub fn release(&mut self) {
        self.center = None;
        self.value = Vec2::ZERO;
    }

    #[must_use]
    pub fn engaged(&self) -> bool {
        self.center.is_some()
    }

    /// Current stick vector, `x` right and `y` forward.
    #[must_use]
    pub fn vector(&self) -> Vec2 {
        // Screen y grows downward; forward is a push away from self.
        Vec2::new(self.value.x, -self.value.y)
    }
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new(50.0)
    }
}
