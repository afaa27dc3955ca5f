//! terrain_query: walkable-surface queries over a triangle soup.
//!
//! Builds a read-only [`TerrainMesh`] from loaded geometry (or a generated
//! fallback plane) and answers the one question locomotion asks: what is
//! the nearest surface strictly below a point? Triangles are bucketed into
//! an XZ grid so each vertical ray only tests the triangles whose footprint
//! overlaps its cell.

use glam::{Vec2, Vec3};
use locomotion_core::{GroundHit, GroundQuery};
use smallvec::SmallVec;
use thiserror::Error;

/// Rays shorter than this are considered degenerate and never hit; it also
/// keeps a ray started exactly on a surface from hitting it.
const RAY_EPS: f32 = 1e-4;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("terrain mesh has no triangles")]
    Empty,
    #[error("triangle index {index} out of bounds ({vertices} vertices)")]
    IndexOutOfBounds { index: u32, vertices: usize },
    #[error("non-finite vertex data")]
    NonFinite,
}

#[derive(Clone, Copy, Debug)]
struct Tri {
    a: Vec3,
    b: Vec3,
    c: Vec3,
    min_xz: Vec2,
    max_xz: Vec2,
}

impl Tri {
    fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let min_xz = Vec2::new(a.x.min(b.x).min(c.x), a.z.min(b.z).min(c.z));
        let max_xz = Vec2::new(a.x.max(b.x).max(c.x), a.z.max(b.z).max(c.z));
        Self {
            a,
            b,
            c,
            min_xz,
            max_xz,
        }
    }

    /// Distance along a straight-down ray from `origin` to this triangle.
    fn hit_below(&self, origin: Vec3) -> Option<f32> {
        // Moller-Trumbore with dir = -Y.
        let dir = Vec3::NEG_Y;
        let e1 = self.b - self.a;
        let e2 = self.c - self.a;
        let p = dir.cross(e2);
        let det = e1.dot(p);
        if det.abs() < 1e-9 {
            return None;
        }
        let inv = 1.0 / det;
        let s = origin - self.a;
        let u = s.dot(p) * inv;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(e1);
        let v = dir.dot(q) * inv;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = e2.dot(q) * inv;
        (t > RAY_EPS).then_some(t)
    }
}

/// XZ bucket grid over triangle indices.
#[derive(Debug)]
struct Grid {
    min: Vec2,
    cell: f32,
    nx: usize,
    nz: usize,
    cells: Vec<Vec<u32>>,
}

impl Grid {
    /// Aim for at most this many cells along the longer axis.
    const MAX_AXIS_CELLS: f32 = 64.0;
    /// Never shrink cells below this edge length.
    const MIN_CELL: f32 = 1.0;

    fn build(tris: &[Tri]) -> Self {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for t in tris {
            min = min.min(t.min_xz);
            max = max.max(t.max_xz);
        }
        let extent = (max - min).max(Vec2::splat(Self::MIN_CELL));
        let cell = (extent.max_element() / Self::MAX_AXIS_CELLS).max(Self::MIN_CELL);
        let nx = (extent.x / cell).ceil() as usize + 1;
        let nz = (extent.y / cell).ceil() as usize + 1;
        let mut cells = vec![Vec::new(); nx * nz];
        for (i, t) in tris.iter().enumerate() {
            let (x0, z0) = Self::clamp_cell(min, cell, nx, nz, t.min_xz);
            let (x1, z1) = Self::clamp_cell(min, cell, nx, nz, t.max_xz);
            for cz in z0..=z1 {
                for cx in x0..=x1 {
                    cells[cz * nx + cx].push(i as u32);
                }
            }
        }
        Self {
            min,
            cell,
            nx,
            nz,
            cells,
        }
    }

    fn clamp_cell(min: Vec2, cell: f32, nx: usize, nz: usize, p: Vec2) -> (usize, usize) {
        let cx = ((p.x - min.x) / cell).floor().max(0.0) as usize;
        let cz = ((p.y - min.y) / cell).floor().max(0.0) as usize;
        (cx.min(nx - 1), cz.min(nz - 1))
    }

    fn candidates(&self, p: Vec2) -> Option<&[u32]> {
        if p.x < self.min.x || p.y < self.min.y {
            return None;
        }
        let cx = ((p.x - self.min.x) / self.cell).floor() as usize;
        let cz = ((p.y - self.min.y) / self.cell).floor() as usize;
        if cx >= self.nx || cz >= self.nz {
            return None;
        }
        Some(&self.cells[cz * self.nx + cx])
    }
}

/// Static walkable terrain. Read-only once built; the simulation tick only
/// ever queries it.
#[derive(Debug)]
pub struct TerrainMesh {
    tris: Vec<Tri>,
    grid: Grid,
    max_y: f32,
}

impl TerrainMesh {
    /// Build from indexed triangle geometry (`indices` in groups of three).
    pub fn from_mesh(positions: &[[f32; 3]], indices: &[u32]) -> Result<Self, TerrainError> {
        if indices.len() < 3 {
            return Err(TerrainError::Empty);
        }
        let verts: Vec<Vec3> = positions.iter().map(|p| Vec3::from_array(*p)).collect();
        if verts.iter().any(|v| !v.is_finite()) {
            return Err(TerrainError::NonFinite);
        }
        let mut tris = Vec::with_capacity(indices.len() / 3);
        let mut max_y = f32::NEG_INFINITY;
        for chunk in indices.chunks_exact(3) {
            let mut corner = [Vec3::ZERO; 3];
            for (slot, &index) in corner.iter_mut().zip(chunk) {
                *slot = *verts
                    .get(index as usize)
                    .ok_or(TerrainError::IndexOutOfBounds {
                        index,
                        vertices: verts.len(),
                    })?;
            }
            max_y = max_y.max(corner[0].y).max(corner[1].y).max(corner[2].y);
            tris.push(Tri::new(corner[0], corner[1], corner[2]));
        }
        let grid = Grid::build(&tris);
        log::info!(
            "terrain mesh: {} triangles, grid {}x{} (cell {:.1})",
            tris.len(),
            grid.nx,
            grid.nz,
            grid.cell
        );
        Ok(Self { tris, grid, max_y })
    }

    /// Flat square ground at y = 0 spanning `[-half_extent, half_extent]^2`,
    /// used when the real terrain fails to load.
    #[must_use]
    pub fn fallback_ground(half_extent: f32) -> Self {
        let e = half_extent.abs().max(1.0);
        let corners = [
            [-e, 0.0, -e],
            [e, 0.0, -e],
            [e, 0.0, e],
            [-e, 0.0, e],
        ];
        let indices = [0u32, 1, 2, 0, 2, 3];
        // Two finite triangles cannot fail validation.
        match Self::from_mesh(&corners, &indices) {
            Ok(m) => m,
            Err(_) => unreachable!("fallback plane is always valid"),
        }
    }

    /// Number of triangles in the soup.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.tris.len()
    }

    /// Highest vertex in the mesh; handy for spawn placement rays.
    #[must_use]
    pub fn max_height(&self) -> f32 {
        self.max_y
    }

    /// Surface height at a world XZ, sampled with a ray from above the
    /// whole mesh. `None` off the mesh footprint.
    #[must_use]
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let origin = Vec3::new(x, self.max_y + 1.0, z);
        self.cast_down(origin, f32::INFINITY).map(|h| h.point.y)
    }

    fn cast_down(&self, origin: Vec3, max_dist: f32) -> Option<GroundHit> {
        if !origin.is_finite() {
            return None;
        }
        let foot = Vec2::new(origin.x, origin.z);
        let candidates = self.grid.candidates(foot)?;
        let mut hits: SmallVec<[f32; 8]> = SmallVec::new();
        for &i in candidates {
            let tri = &self.tris[i as usize];
            if foot.x < tri.min_xz.x
                || foot.x > tri.max_xz.x
                || foot.y < tri.min_xz.y
                || foot.y > tri.max_xz.y
            {
                continue;
            }
            if let Some(t) = tri.hit_below(origin)
                && t <= max_dist
            {
                hits.push(t);
            }
        }
        let nearest = hits.iter().copied().fold(f32::INFINITY, f32::min);
        nearest.is_finite().then(|| GroundHit {
            point: origin + Vec3::NEG_Y * nearest,
            distance: nearest,
        })
    }
}

impl GroundQuery for TerrainMesh {
    fn raycast_down(&self, origin: Vec3, max_dist: f32) -> Option<GroundHit> {
        self.cast_down(origin, max_dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Unit slab: 2x2 square at a given height, centered on the origin.
    fn slab(y: f32, half: f32) -> (Vec<[f32; 3]>, Vec<u32>) {
        let positions = vec![
            [-half, y, -half],
            [half, y, -half],
            [half, y, half],
            [-half, y, half],
        ];
        (positions, vec![0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn ray_hits_slab_below() {
        let (pos, idx) = slab(2.0, 10.0);
        let mesh = TerrainMesh::from_mesh(&pos, &idx).expect("valid mesh");
        let hit = mesh
            .raycast_down(Vec3::new(0.5, 7.0, -0.5), 10.0)
            .expect("hit");
        assert_abs_diff_eq!(hit.point.y, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(hit.distance, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn nearest_surface_wins_with_stacked_floors() {
        // Two stacked floors; the ray must report the upper one first.
        let (mut pos, mut idx) = slab(0.0, 10.0);
        let (upper_pos, upper_idx) = slab(3.0, 10.0);
        let base = pos.len() as u32;
        pos.extend(upper_pos);
        idx.extend(upper_idx.iter().map(|i| i + base));
        let mesh = TerrainMesh::from_mesh(&pos, &idx).expect("valid mesh");
        let hit = mesh.raycast_down(Vec3::new(0.0, 8.0, 0.0), 20.0).expect("hit");
        assert_abs_diff_eq!(hit.point.y, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn surfaces_above_origin_are_ignored() {
        let (mut pos, mut idx) = slab(0.0, 10.0);
        let (upper_pos, upper_idx) = slab(5.0, 10.0);
        let base = pos.len() as u32;
        pos.extend(upper_pos);
        idx.extend(upper_idx.iter().map(|i| i + base));
        let mesh = TerrainMesh::from_mesh(&pos, &idx).expect("valid mesh");
        // Origin between the floors: only the lower one is below.
        let hit = mesh.raycast_down(Vec3::new(0.0, 2.0, 0.0), 20.0).expect("hit");
        assert_abs_diff_eq!(hit.point.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn off_mesh_misses() {
        let (pos, idx) = slab(0.0, 5.0);
        let mesh = TerrainMesh::from_mesh(&pos, &idx).expect("valid mesh");
        assert!(mesh.raycast_down(Vec3::new(50.0, 4.0, 0.0), 10.0).is_none());
        assert!(mesh.raycast_down(Vec3::new(-50.0, 4.0, -50.0), 10.0).is_none());
    }

    #[test]
    fn range_limits_the_search() {
        let (pos, idx) = slab(0.0, 5.0);
        let mesh = TerrainMesh::from_mesh(&pos, &idx).expect("valid mesh");
        assert!(mesh.raycast_down(Vec3::new(0.0, 30.0, 0.0), 10.0).is_none());
        assert!(mesh.raycast_down(Vec3::new(0.0, 30.0, 0.0), 40.0).is_some());
    }

    #[test]
    fn nonfinite_origin_misses() {
        let (pos, idx) = slab(0.0, 5.0);
        let mesh = TerrainMesh::from_mesh(&pos, &idx).expect("valid mesh");
        assert!(
            mesh.raycast_down(Vec3::new(f32::NAN, 4.0, 0.0), 10.0)
                .is_none()
        );
    }

    #[test]
    fn fallback_ground_covers_its_extent() {
        let mesh = TerrainMesh::fallback_ground(50.0);
        assert_eq!(mesh.triangle_count(), 2);
        for &(x, z) in &[(0.0f32, 0.0f32), (49.0, -49.0), (-25.0, 33.0)] {
            let h = mesh.height_at(x, z).expect("inside the plane");
            assert_abs_diff_eq!(h, 0.0, epsilon = 1e-5);
        }
        assert!(mesh.height_at(60.0, 0.0).is_none());
    }

    #[test]
    fn height_at_samples_the_top_surface() {
        let (pos, idx) = slab(4.0, 8.0);
        let mesh = TerrainMesh::from_mesh(&pos, &idx).expect("valid mesh");
        assert_abs_diff_eq!(mesh.height_at(1.0, 1.0).expect("hit"), 4.0, epsilon = 1e-5);
    }

    #[test]
    fn empty_and_bad_meshes_are_rejected() {
        assert!(matches!(
            TerrainMesh::from_mesh(&[], &[]),
            Err(TerrainError::Empty)
        ));
        let pos = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(matches!(
            TerrainMesh::from_mesh(&pos, &[0, 1, 9]),
            Err(TerrainError::IndexOutOfBounds { index: 9, .. })
        ));
        let nan_pos = vec![[f32::NAN, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(matches!(
            TerrainMesh::from_mesh(&nan_pos, &[0, 1, 2]),
            Err(TerrainError::NonFinite)
        ));
    }

    #[test]
    fn grid_pruning_agrees_with_brute_force_on_a_large_plane() {
        // Many cells: triangles spanning multiple buckets must still be hit
        // anywhere on the footprint.
        let (pos, idx) = slab(1.0, 200.0);
        let mesh = TerrainMesh::from_mesh(&pos, &idx).expect("valid mesh");
        for &(x, z) in &[
            (0.0f32, 0.0f32),
            (-199.0, -199.0),
            (199.0, 199.0),
            (-57.3, 120.4),
        ] {
            let hit = mesh.raycast_down(Vec3::new(x, 10.0, z), 20.0);
            assert!(hit.is_some(), "missed at ({x}, {z})");
        }
    }
}
