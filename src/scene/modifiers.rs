use glam::Vec3;

use crate::{
    foundation::error::{DepthwireError, DepthwireResult},
    scene::{
        asset::{SceneAsset, TextureId},
        mesh::{Face, MeshData},
    },
};

/// Highest accepted subdivision level; level `n` yields `4^n` faces per input quad.
pub const MAX_SUBDIVISION_LEVELS: u32 = 8;

/// One mesh operator in a [`ModifierStack`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Modifier {
    /// Uniform refinement; `levels` in the viewport, `render_levels` for final renders.
    Subdivision { levels: u32, render_levels: u32 },
    /// Offset vertices along their normals by `(intensity - mid_level) * strength`.
    Displacement {
        texture: TextureId,
        strength: f32,
        mid_level: f32,
    },
    /// Turn every edge into a ribbon of width `thickness`.
    ///
    /// Ribbons use the source face's slot plus `material_offset`, clamped to the last slot.
    Wireframe {
        thickness: f32,
        replace_original: bool,
        material_offset: u16,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ModifierKind {
    Subdivision,
    Displacement,
    Wireframe,
}

impl Modifier {
    pub fn kind(&self) -> ModifierKind {
        match self {
            Self::Subdivision { .. } => ModifierKind::Subdivision,
            Self::Displacement { .. } => ModifierKind::Displacement,
            Self::Wireframe { .. } => ModifierKind::Wireframe,
        }
    }
}

/// Which subdivision level set applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalMode {
    Viewport,
    Render,
}

/// Ordered operator list of a mesh.
///
/// The only non-empty stack is the surface stack `[Subdivision, Displacement, Wireframe]`: the
/// wireframe has to trace the refined, displaced topology, not the flat base quad.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ModifierStack {
    ops: Vec<Modifier>,
}

impl ModifierStack {
    /// Build the surface stack from its three parameters.
    pub fn surface(
        subdivision_levels: u32,
        depth_texture: TextureId,
        displacement_strength: f32,
        wire_thickness: f32,
    ) -> DepthwireResult<Self> {
        validate_surface_params(subdivision_levels, displacement_strength, wire_thickness)?;

        Ok(Self {
            ops: vec![
                Modifier::Subdivision {
                    levels: subdivision_levels,
                    render_levels: subdivision_levels,
                },
                Modifier::Displacement {
                    texture: depth_texture,
                    strength: displacement_strength,
                    mid_level: 0.5,
                },
                Modifier::Wireframe {
                    thickness: wire_thickness,
                    replace_original: false,
                    material_offset: 1,
                },
            ],
        })
    }

    pub fn ops(&self) -> &[Modifier] {
        &self.ops
    }

    pub fn kinds(&self) -> Vec<ModifierKind> {
        self.ops.iter().map(Modifier::kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply every operator in stack order to `base`.
    #[tracing::instrument(skip(self, base, scene), fields(base_verts = base.vertex_count()))]
    pub fn evaluate(
        &self,
        base: &MeshData,
        slot_count: usize,
        scene: &SceneAsset,
        mode: EvalMode,
    ) -> DepthwireResult<MeshData> {
        let mut mesh = base.clone();
        for op in &self.ops {
            mesh = match *op {
                Modifier::Subdivision {
                    levels,
                    render_levels,
                } => {
                    let n = match mode {
                        EvalMode::Viewport => levels,
                        EvalMode::Render => render_levels,
                    };
                    (0..n).fold(mesh, |m, _| m.subdivide())
                }
                Modifier::Displacement {
                    texture,
                    strength,
                    mid_level,
                } => displace(mesh, scene, texture, strength, mid_level)?,
                Modifier::Wireframe {
                    thickness,
                    replace_original,
                    material_offset,
                } => wireframe(mesh, thickness, replace_original, material_offset, slot_count),
            };
        }
        tracing::debug!(
            verts = mesh.vertex_count(),
            faces = mesh.faces.len(),
            "modifier stack evaluated"
        );
        Ok(mesh)
    }
}

pub(crate) fn validate_surface_params(
    subdivision_levels: u32,
    displacement_strength: f32,
    wire_thickness: f32,
) -> DepthwireResult<()> {
    if subdivision_levels > MAX_SUBDIVISION_LEVELS {
        return Err(DepthwireError::validation(format!(
            "subdivision levels must be <= {MAX_SUBDIVISION_LEVELS}, got {subdivision_levels}"
        )));
    }
    if !displacement_strength.is_finite() {
        return Err(DepthwireError::validation(
            "displacement strength must be finite",
        ));
    }
    if !(wire_thickness.is_finite() && wire_thickness > 0.0) {
        return Err(DepthwireError::validation(format!(
            "wireframe thickness must be > 0, got {wire_thickness}"
        )));
    }
    Ok(())
}

fn displace(
    mut mesh: MeshData,
    scene: &SceneAsset,
    texture: TextureId,
    strength: f32,
    mid_level: f32,
) -> DepthwireResult<MeshData> {
    let image = scene.image(scene.texture(texture)?.image)?;
    let normals = mesh.vertex_normals();

    for (p, n) in mesh.positions.iter_mut().zip(normals) {
        // local coordinates: [-1, 1] maps onto the whole texture
        let u = (p.x + 1.0) * 0.5;
        let v = (p.y + 1.0) * 0.5;
        let h = (image.sample_intensity(u, v) - mid_level) * strength;
        *p += n * h;
    }
    Ok(mesh)
}

fn wireframe(
    mesh: MeshData,
    thickness: f32,
    replace_original: bool,
    material_offset: u16,
    slot_count: usize,
) -> MeshData {
    let normals = mesh.vertex_normals();
    let max_slot = slot_count.saturating_sub(1).min(usize::from(u16::MAX)) as u16;

    // slot of the first face using each edge
    let mut edge_slot = std::collections::HashMap::new();
    for face in &mesh.faces {
        for i in 0..4 {
            let p = face.verts[i];
            let q = face.verts[(i + 1) % 4];
            edge_slot
                .entry((p.min(q), p.max(q)))
                .or_insert(face.material_slot);
        }
    }

    let mut out = MeshData {
        positions: mesh.positions.clone(),
        uvs: mesh.uvs.clone(),
        faces: if replace_original {
            Vec::new()
        } else {
            mesh.faces.clone()
        },
    };

    let half = thickness * 0.5;
    for (p, q) in mesh.edges() {
        let (pi, qi) = (p as usize, q as usize);
        let a = mesh.positions[pi];
        let b = mesh.positions[qi];
        let dir = b - a;
        if dir.length_squared() < 1e-16 {
            continue;
        }

        let n = (normals[pi] + normals[qi]).try_normalize().unwrap_or(Vec3::Z);
        let Some(side) = dir.cross(n).try_normalize() else {
            continue;
        };
        let side = side * half;
        let lift = n * half;

        let (uv_a, uv_b) = (mesh.uvs[pi], mesh.uvs[qi]);
        let v0 = out.push_vertex(a + side + lift, uv_a);
        let v1 = out.push_vertex(b + side + lift, uv_b);
        let v2 = out.push_vertex(b - side + lift, uv_b);
        let v3 = out.push_vertex(a - side + lift, uv_a);

        let source_slot = edge_slot.get(&(p.min(q), p.max(q))).copied().unwrap_or(0);
        out.faces.push(Face {
            verts: [v0, v1, v2, v3],
            material_slot: source_slot.saturating_add(material_offset).min(max_slot),
        });
    }

    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/modifiers.rs"]
mod tests;
