//! Animation-state gating. Clip selection and blending belong to the
//! animation driver; this module only decides which discrete state it
//! should be playing.

use glam::Vec2;

/// Discrete animation state observed by the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Moving,
    Acting,
}

/// Bounded-duration action override (attack/special).
///
/// Triggered by an external event, holds [`AnimState::Acting`] for its
/// duration, then the state falls back to `Moving`/`Idle` from current
/// input. Never left dangling: a zero or negative remaining time is
/// inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionPulse {
    remaining_s: f32,
}

impl ActionPulse {
    /// Start (or restart) the pulse for `duration_s` seconds.
    pub fn trigger(&mut self, duration_s: f32) {
        if duration_s.is_finite() && duration_s > 0.0 {
            self.remaining_s = duration_s;
        }
    }

    /// Advance the pulse clock by one frame.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.remaining_s = (self.remaining_s - dt).max(0.0);
        }
    }

    pub fn clear(&mut self) {
        self.remaining_s = 0.0;
    }

    #[must_use]
    pub fn active(&self) -> bool {
        self.remaining_s > 0.0
    }
}

/// Pure state selection: an active pulse wins; otherwise stick magnitude
/// against the deadzone decides `Moving` vs `Idle`.
#[must_use]
pub fn derive_anim_state(pulse: ActionPulse, stick: Vec2, deadzone: f32) -> AnimState {
    if pulse.active() {
        AnimState::Acting
    } else if stick.length() > deadzone {
        AnimState::Moving
    } else {
        AnimState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEADZONE: f32 = 0.3;

    #[test]
    fn idle_below_deadzone_moving_above() {
        let rest = ActionPulse::default();
        assert_eq!(
            derive_anim_state(rest, Vec2::new(0.2, 0.1), DEADZONE),
            AnimState::Idle
        );
        assert_eq!(
            derive_anim_state(rest, Vec2::new(0.8, 0.0), DEADZONE),
            AnimState::Moving
        );
    }

    #[test]
    fn pulse_overrides_movement() {
        let mut pulse = ActionPulse::default();
        pulse.trigger(0.8);
        assert_eq!(
            derive_anim_state(pulse, Vec2::new(1.0, 0.0), DEADZONE),
            AnimState::Acting
        );
    }

    #[test]
    fn pulse_expires_to_input_state() {
        let mut pulse = ActionPulse::default();
        pulse.trigger(0.1);
        pulse.advance(0.2);
        assert!(!pulse.active());
        assert_eq!(
            derive_anim_state(pulse, Vec2::ZERO, DEADZONE),
            AnimState::Idle
        );
        assert_eq!(
            derive_anim_state(pulse, Vec2::new(0.0, 1.0), DEADZONE),
            AnimState::Moving
        );
    }

    #[test]
    fn degenerate_durations_do_not_arm() {
        let mut pulse = ActionPulse::default();
        pulse.trigger(f32::NAN);
        assert!(!pulse.active());
        pulse.trigger(-1.0);
        assert!(!pulse.active());
    }
}
