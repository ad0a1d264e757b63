use std::collections::HashMap;

use glam::{Vec2, Vec3};

use crate::scene::{asset::MaterialId, modifiers::ModifierStack};

/// Quad face. Vertices are counter-clockwise seen from the front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Face {
    pub verts: [u32; 4],
    pub material_slot: u16,
}

/// Plain quad-mesh geometry.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub faces: Vec<Face>,
}

impl MeshData {
    /// Square in the XY plane, centered on the origin, facing +Z, with side length `size`.
    pub fn plane(size: f32) -> Self {
        let h = size * 0.5;
        Self {
            positions: vec![
                Vec3::new(-h, -h, 0.0),
                Vec3::new(h, -h, 0.0),
                Vec3::new(h, h, 0.0),
                Vec3::new(-h, h, 0.0),
            ],
            uvs: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            faces: vec![Face {
                verts: [0, 1, 2, 3],
                material_slot: 0,
            }],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Split every quad into four through its edge midpoints and center.
    ///
    /// For planar input this is exactly what Catmull-Clark produces inside the plane, so a
    /// single quad refined `n` times becomes a regular `2^n x 2^n` grid.
    pub fn subdivide(&self) -> Self {
        let mut out = Self {
            positions: self.positions.clone(),
            uvs: self.uvs.clone(),
            faces: Vec::with_capacity(self.faces.len() * 4),
        };
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();

        for face in &self.faces {
            let [a, b, c, d] = face.verts;
            let mut mid = |p: u32, q: u32, out: &mut Self| -> u32 {
                let key = (p.min(q), p.max(q));
                *midpoints.entry(key).or_insert_with(|| {
                    out.push_vertex(
                        (self.positions[p as usize] + self.positions[q as usize]) * 0.5,
                        (self.uvs[p as usize] + self.uvs[q as usize]) * 0.5,
                    )
                })
            };

            let ab = mid(a, b, &mut out);
            let bc = mid(b, c, &mut out);
            let cd = mid(c, d, &mut out);
            let da = mid(d, a, &mut out);

            let center = out.push_vertex(
                face.verts
                    .iter()
                    .map(|&v| self.positions[v as usize])
                    .sum::<Vec3>()
                    * 0.25,
                face.verts
                    .iter()
                    .map(|&v| self.uvs[v as usize])
                    .sum::<Vec2>()
                    * 0.25,
            );

            let slot = face.material_slot;
            for verts in [
                [a, ab, center, da],
                [ab, b, bc, center],
                [center, bc, c, cd],
                [da, center, cd, d],
            ] {
                out.faces.push(Face {
                    verts,
                    material_slot: slot,
                });
            }
        }

        out
    }

    /// Area-weighted vertex normals; vertices without faces get +Z.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for face in &self.faces {
            let n = self.face_normal_unnormalized(face);
            for &v in &face.verts {
                acc[v as usize] += n;
            }
        }
        acc.into_iter()
            .map(|n| {
                let n = n.normalize_or_zero();
                if n == Vec3::ZERO { Vec3::Z } else { n }
            })
            .collect()
    }

    /// Twice the area times the unit normal, from the cross product of the diagonals.
    pub fn face_normal_unnormalized(&self, face: &Face) -> Vec3 {
        let [a, b, c, d] = face.verts.map(|v| self.positions[v as usize]);
        (c - a).cross(d - b)
    }

    /// Unique undirected edges, in first-seen order.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for face in &self.faces {
            for i in 0..4 {
                let p = face.verts[i];
                let q = face.verts[(i + 1) % 4];
                if seen.insert((p.min(q), p.max(q))) {
                    out.push((p, q));
                }
            }
        }
        out
    }

    pub(crate) fn push_vertex(&mut self, position: Vec3, uv: Vec2) -> u32 {
        self.positions.push(position);
        self.uvs.push(uv);
        (self.positions.len() - 1) as u32
    }
}

/// Mesh datablock: base geometry, its modifier stack and material slots.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Mesh {
    pub name: String,
    pub base: MeshData,
    pub modifiers: ModifierStack,
    /// Slot index -> material; faces refer to slots, never to materials directly.
    pub material_slots: Vec<MaterialId>,
}

impl Mesh {
    pub fn material_for_slot(&self, slot: u16) -> Option<MaterialId> {
        self.material_slots.get(usize::from(slot)).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mesh.rs"]
mod tests;
