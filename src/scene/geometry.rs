use glam::Vec3;

use crate::{
    foundation::error::DepthwireResult,
    scene::{
        asset::{
            ImageId, MeshId, ObjectData, ObjectId, SceneAsset, SceneObject, Texture, TextureId,
            Transform,
        },
        material::{MaterialPair, build_materials},
        mesh::{Mesh, MeshData},
        modifiers::{ModifierStack, validate_surface_params},
    },
};

/// Side length of the base plane; its local coordinates span `[-1, 1]`.
pub const PLANE_SIZE: f32 = 2.0;

/// Shape parameters of the displaced surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    /// Subdivision levels applied before displacement.
    pub subdivision_levels: u32,
    /// Depth-to-height multiplier.
    pub displacement_strength: f32,
    /// Width of the wireframe ribbons.
    pub wire_thickness: f32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            subdivision_levels: 4,
            displacement_strength: 0.25,
            wire_thickness: 0.0025,
        }
    }
}

impl SurfaceParams {
    pub fn validate(&self) -> DepthwireResult<()> {
        validate_surface_params(
            self.subdivision_levels,
            self.displacement_strength,
            self.wire_thickness,
        )
    }
}

/// Handles created by [`build_surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceHandles {
    pub object: ObjectId,
    pub mesh: MeshId,
    pub depth_texture: TextureId,
    pub materials: MaterialPair,
}

/// Build the displaced wireframe surface.
///
/// The plane is scaled along x by the color image's aspect ratio (1.0 for zero-height images),
/// carries the surface modifier stack driven by `depth_image`, and has the textured material in
/// slot 0 and the wireframe material in slot 1.
#[tracing::instrument(skip(scene))]
pub fn build_surface(
    scene: &mut SceneAsset,
    color_image: ImageId,
    depth_image: ImageId,
    params: SurfaceParams,
) -> DepthwireResult<SurfaceHandles> {
    params.validate()?;

    let aspect = scene.image(color_image)?.info().aspect_ratio();
    let depth = scene.image(depth_image)?;
    if !depth.layout.is_single_channel() {
        tracing::warn!(
            image = %depth.name,
            layout = ?depth.layout,
            "depth map is not single-channel; displacing by mean RGB intensity"
        );
    }

    let depth_texture = scene.add_texture(Texture {
        name: "DepthTex".to_string(),
        image: depth_image,
    });
    let modifiers = ModifierStack::surface(
        params.subdivision_levels,
        depth_texture,
        params.displacement_strength,
        params.wire_thickness,
    )?;

    let materials = build_materials(scene, color_image);
    let mesh = scene.add_mesh(Mesh {
        name: "Plane".to_string(),
        base: MeshData::plane(PLANE_SIZE),
        modifiers,
        material_slots: vec![materials.textured, materials.wire],
    });

    let transform = Transform {
        scale: Vec3::new(aspect, 1.0, 1.0),
        ..Transform::default()
    };
    let object = scene.add_object(SceneObject::new(
        "Plane",
        ObjectData::Mesh(mesh),
        transform,
    ));

    tracing::info!(aspect, "surface built");
    Ok(SurfaceHandles {
        object,
        mesh,
        depth_texture,
        materials,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/geometry.rs"]
mod tests;
