//! Input state for the on-screen controls.
//!
//! The platform layer feeds raw pointer/touch coordinates and trigger
//! events in here; game code reads a clean per-frame snapshot. Nothing in
//! this crate touches the DOM/windowing layer.

pub mod action;
pub mod joystick;

pub use action::{ActionEvent, ActionQueue};
pub use joystick::VirtualJoystick;
