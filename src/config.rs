//! Locomotion tuning loaded from `data/config/locomotion.toml` with env
//! overrides. Missing file or fields fall back to the built-in defaults.

use anyhow::{Context, Result};
use glam::Vec3;
use locomotion_core::LocomotionParams;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocomotionCfg {
    pub gravity: Option<f32>,
    pub move_speed: Option<f32>,
    pub deadzone: Option<f32>,
    pub ground_offset: Option<f32>,
    pub probe_radius: Option<f32>,
    pub ground_ray_range: Option<f32>,
    pub fall_snap_threshold: Option<f32>,
    pub recovery_ray_range: Option<f32>,
    pub action_duration_s: Option<f32>,
    pub character_height: Option<f32>,
    pub spawn: Option<[f32; 3]>,
}

fn data_root() -> PathBuf {
    // Workspace-level data/ so tools and tests resolve the same files.
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    here.join("data")
}

/// Load `data/config/locomotion.toml` when present, then apply env
/// overrides (`GRAVITY`, `MOVE_SPEED`, `DEADZONE`, `ACTION_DURATION_S`).
pub fn load_default() -> Result<LocomotionCfg> {
    let path = data_root().join("config/locomotion.toml");
    let mut cfg = if path.is_file() {
        let txt = std::fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()))?;
        toml::from_str::<LocomotionCfg>(&txt).context("parse locomotion TOML")?
    } else {
        LocomotionCfg::default()
    };
    if let Some(v) = std::env::var("GRAVITY").ok().and_then(|v| v.parse().ok()) {
        cfg.gravity = Some(v);
    }
    if let Some(v) = std::env::var("MOVE_SPEED").ok().and_then(|v| v.parse().ok()) {
        cfg.move_speed = Some(v);
    }
    if let Some(v) = std::env::var("DEADZONE").ok().and_then(|v| v.parse().ok()) {
        cfg.deadzone = Some(v);
    }
    if let Some(v) = std::env::var("ACTION_DURATION_S")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        cfg.action_duration_s = Some(v);
    }
    Ok(cfg)
}

impl LocomotionCfg {
    /// Collapse into concrete params, defaulting every unset field.
    #[must_use]
    pub fn params(&self) -> LocomotionParams {
        let d = LocomotionParams::default();
        LocomotionParams {
            gravity: self.gravity.unwrap_or(d.gravity),
            move_speed: self.move_speed.unwrap_or(d.move_speed),
            deadzone: self.deadzone.unwrap_or(d.deadzone),
            ground_offset: self.ground_offset.unwrap_or(d.ground_offset),
            probe_radius: self.probe_radius.unwrap_or(d.probe_radius),
            ground_ray_range: self.ground_ray_range.unwrap_or(d.ground_ray_range),
            fall_snap_threshold: self.fall_snap_threshold.unwrap_or(d.fall_snap_threshold),
            recovery_ray_range: self.recovery_ray_range.unwrap_or(d.recovery_ray_range),
            action_duration_s: self.action_duration_s.unwrap_or(d.action_duration_s),
        }
    }

    #[must_use]
    pub fn character_height(&self) -> f32 {
        self.character_height.unwrap_or(2.0)
    }

    #[must_use]
    pub fn spawn_pos(&self) -> Vec3 {
        self.spawn
            .map_or(Vec3::new(0.0, 10.0, 0.0), Vec3::from_array)
    }
}
