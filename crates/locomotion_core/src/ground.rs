//! Ground resolution: multi-ray downward sampling against the terrain.

use crate::LocomotionParams;
use crate::character::Character;
use glam::Vec3;

/// Nearest surface point strictly below a ray origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    pub point: Vec3,
    pub distance: f32,
}

/// Read-only terrain capability consumed by the locomotion step.
///
/// Implementations return the nearest surface strictly below `origin`
/// within `max_dist`, or `None`. Queries must never panic on positions off
/// the mesh; "no hit" is an ordinary answer.
pub trait GroundQuery {
    fn raycast_down(&self, origin: Vec3, max_dist: f32) -> Option<GroundHit>;
}

/// Aggregated result of one ground resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundResult {
    pub grounded: bool,
    /// Highest qualifying hit, present only when `grounded`.
    pub ground_y: Option<f32>,
}

impl GroundResult {
    pub const AIRBORNE: Self = Self {
        grounded: false,
        ground_y: None,
    };
}

/// Probe pattern: capsule axis plus the four cardinal offsets. A single
/// center ray false-negatives at mesh seams and gaps; the highest hit of
/// the five keeps the character resting on the highest nearby surface.
const PROBE_OFFSETS: [(f32, f32); 5] = [(0.0, 0.0), (1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)];

/// Cast the probe fan below the character and aggregate.
///
/// A hit counts as ground while it lies within one capsule height of the
/// capsule center (1.5 heights from the probe origin). A standing character
/// rests `height/2 + ground_offset` above the surface, comfortably inside
/// that window, and step-downs of up to half a height snap instead of
/// briefly going airborne.
#[must_use]
pub fn resolve_ground<Q: GroundQuery + ?Sized>(
    ch: &Character,
    terrain: Option<&Q>,
    p: &LocomotionParams,
) -> GroundResult {
    let Some(terrain) = terrain else {
        return GroundResult::AIRBORNE;
    };
    let origin = ch.probe_origin();
    let mut ground_y: Option<f32> = None;
    for (ox, oz) in PROBE_OFFSETS {
        let probe = origin + Vec3::new(ox * p.probe_radius, 0.0, oz * p.probe_radius);
        let Some(hit) = terrain.raycast_down(probe, p.ground_ray_range) else {
            continue;
        };
        if hit.distance <= ch.height * 1.5 {
            ground_y = Some(ground_y.map_or(hit.point.y, |y: f32| y.max(hit.point.y)));
        }
    }
    GroundResult {
        grounded: ground_y.is_some(),
        ground_y,
    }
}
