//! Frame-driven session: one `tick(dt)` per rendered frame.
//!
//! Owns the only mutable copies of character and camera state; the terrain
//! slot stays `None` until an asset load completes, and every subsystem
//! tolerates that.

use anyhow::Result;
use glam::Vec3;
use input_core::{ActionQueue, VirtualJoystick};
use locomotion_core::{
    CameraRig, CameraRigCfg, Character, LocomotionParams, TickInput, reset, tick,
};
use std::path::Path;
use terrain_query::TerrainMesh;

pub struct Session {
    pub character: Character,
    pub camera: CameraRig,
    pub camera_cfg: CameraRigCfg,
    pub move_stick: VirtualJoystick,
    pub look_stick: VirtualJoystick,
    pub actions: ActionQueue,
    params: LocomotionParams,
    terrain: Option<TerrainMesh>,
}

impl Session {
    #[must_use]
    pub fn new(spawn: Vec3, character_height: f32, params: LocomotionParams) -> Self {
        Self {
            character: Character::new(spawn, character_height),
            camera: CameraRig::default(),
            camera_cfg: CameraRigCfg::default(),
            move_stick: VirtualJoystick::default(),
            look_stick: VirtualJoystick::default(),
            actions: ActionQueue::default(),
            params,
            terrain: None,
        }
    }

    #[must_use]
    pub fn params(&self) -> &LocomotionParams {
        &self.params
    }

    #[must_use]
    pub fn terrain(&self) -> Option<&TerrainMesh> {
        self.terrain.as_ref()
    }

    /// Swap in a loaded terrain. The character settles onto it over the
    /// next ticks; a spawn above the surface simply falls until caught.
    pub fn attach_terrain(&mut self, mesh: TerrainMesh) {
        log::info!("terrain attached: {} triangles", mesh.triangle_count());
        self.terrain = Some(mesh);
    }

    /// Load a glTF/GLB terrain from disk, degrading to the fallback ground
    /// plane on any failure. Never fatal.
    pub fn load_terrain_or_fallback(&mut self, path: Option<&Path>, fallback_half_extent: f32) {
        if let Some(path) = path {
            match Self::build_terrain(path) {
                Ok(mesh) => {
                    self.attach_terrain(mesh);
                    return;
                }
                Err(e) => {
                    log::warn!("terrain load failed ({e:#}); using fallback ground");
                }
            }
        }
        self.attach_terrain(TerrainMesh::fallback_ground(fallback_half_extent));
    }

    fn build_terrain(path: &Path) -> Result<TerrainMesh> {
        let cpu = scene_assets::load_gltf_mesh(path)?;
        let mesh = TerrainMesh::from_mesh(&cpu.positions, &cpu.indices)?;
        Ok(mesh)
    }

    /// Place the spawn on the terrain surface at the configured XZ, if the
    /// terrain covers it; otherwise leave the configured height.
    pub fn settle_spawn(&mut self) {
        let Some(terrain) = self.terrain.as_ref() else {
            return;
        };
        let s = self.character.spawn();
        if let Some(h) = terrain.height_at(s.x, s.z) {
            let snapped = Vec3::new(
                s.x,
                h + self.character.height * 0.5 + self.params.ground_offset,
                s.z,
            );
            reset(&mut self.character, snapped, Some(terrain), &self.params);
        }
    }

    /// Advance one frame. Camera first so movement uses this frame's look.
    pub fn tick(&mut self, dt: f32) {
        self.camera
            .apply_look(&self.camera_cfg, self.look_stick.vector(), dt);
        let input = TickInput {
            move_vec: self.move_stick.vector(),
            action_triggered: self.actions.take_attack(),
        };
        tick(
            &mut self.character,
            input,
            self.camera.forward(),
            self.terrain.as_ref(),
            &self.params,
            dt,
        );
    }

    /// Return to spawn in a rest state, dropping any in-flight input.
    pub fn reset(&mut self) {
        self.move_stick.release();
        self.look_stick.release();
        let _ = self.actions.take_attack();
        let spawn = self.character.spawn();
        reset(
            &mut self.character,
            spawn,
            self.terrain.as_ref(),
            &self.params,
        );
    }
}
