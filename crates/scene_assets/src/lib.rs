//! CPU-side glTF/GLB loading for terrain and props.
//!
//! Merges every primitive reachable from the default scene into one
//! unskinned mesh, applying node transforms, so the terrain collision
//! builder sees world-space geometry. Load failures are ordinary errors;
//! hosts degrade to a fallback ground rather than crashing the sim.

use anyhow::{Context, Result, bail};
use glam::{Mat4, Vec3};
use std::path::Path;

/// Unskinned CPU mesh: world-space positions and u32 triangle indices.
#[derive(Debug, Clone, Default)]
pub struct CpuMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl CpuMesh {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Load a `.gltf`/`.glb` file from disk and flatten it into one mesh.
pub fn load_gltf_mesh(path: &Path) -> Result<CpuMesh> {
    let (doc, buffers, _images) =
        gltf::import(path).with_context(|| format!("import glTF: {}", path.display()))?;
    let mesh = flatten(&doc, &buffers);
    if mesh.is_empty() {
        bail!("no geometry found in {}", path.display());
    }
    log::info!(
        "loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.positions.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Same as [`load_gltf_mesh`] but from an in-memory byte slice.
pub fn load_gltf_mesh_slice(bytes: &[u8]) -> Result<CpuMesh> {
    let (doc, buffers, _images) = gltf::import_slice(bytes).context("import glTF from slice")?;
    let mesh = flatten(&doc, &buffers);
    if mesh.is_empty() {
        bail!("no geometry found in glTF slice");
    }
    Ok(mesh)
}

fn flatten(doc: &gltf::Document, buffers: &[gltf::buffer::Data]) -> CpuMesh {
    let mut out = CpuMesh::default();
    if let Some(scene) = doc.default_scene().or_else(|| doc.scenes().next()) {
        for node in scene.nodes() {
            append_node(&node, Mat4::IDENTITY, buffers, &mut out);
        }
    } else {
        // No scene graph: take the meshes as-is.
        for mesh in doc.meshes() {
            append_mesh(&mesh, Mat4::IDENTITY, buffers, &mut out);
        }
    }
    out
}

fn append_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut CpuMesh,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        append_mesh(&mesh, world, buffers, out);
    }
    for child in node.children() {
        append_node(&child, world, buffers, out);
    }
}

fn append_mesh(
    mesh: &gltf::Mesh<'_>,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut CpuMesh,
) {
    for prim in mesh.primitives() {
        let reader = prim.reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let start = out.positions.len() as u32;
        for p in positions {
            let wp = world.transform_point3(Vec3::from_array(p));
            out.positions.push(wp.to_array());
        }
        let added = out.positions.len() as u32 - start;
        match reader.read_indices() {
            Some(read) => out.indices.extend(read.into_u32().map(|v| start + v)),
            None => out.indices.extend(start..start + added),
        }
    }
}
