use crate::scene::asset::{ImageId, MaterialId, SceneAsset};

/// Emission color of the wireframe overlay.
pub const WIRE_COLOR: [f32; 4] = [0.1, 0.8, 1.0, 1.0];
/// Emission multiplier; keeps the overlay legible over the lit textured surface.
pub const WIRE_STRENGTH: f32 = 2.0;

/// Where a shader input takes its value from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum ColorSource {
    /// Sampled from an image at the surface's texture coordinates.
    Image(ImageId),
}

/// Physically based surface parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PrincipledSurface {
    pub base_color: ColorSource,
    pub metallic: f32,
    pub roughness: f32,
    pub specular: f32,
}

/// Shading model of a material.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum MaterialSpec {
    /// Image-textured principled surface.
    Textured(PrincipledSurface),
    /// Unlit emission.
    WireEmissive { color: [f32; 4], strength: f32 },
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct Material {
    pub name: String,
    pub spec: MaterialSpec,
}

/// Handles returned by [`build_materials`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialPair {
    pub textured: MaterialId,
    pub wire: MaterialId,
}

/// Textured surface bound to `color_image`.
pub fn textured_material(color_image: ImageId) -> Material {
    Material {
        name: "BaseImage".to_string(),
        spec: MaterialSpec::Textured(PrincipledSurface {
            base_color: ColorSource::Image(color_image),
            metallic: 0.0,
            roughness: 0.5,
            specular: 0.5,
        }),
    }
}

/// Flat emissive material for wireframe edges.
pub fn wire_material() -> Material {
    Material {
        name: "WireframeMat".to_string(),
        spec: MaterialSpec::WireEmissive {
            color: WIRE_COLOR,
            strength: WIRE_STRENGTH,
        },
    }
}

/// Register the textured and wireframe materials.
pub fn build_materials(scene: &mut SceneAsset, color_image: ImageId) -> MaterialPair {
    let textured = scene.add_material(textured_material(color_image));
    let wire = scene.add_material(wire_material());
    MaterialPair { textured, wire }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/material.rs"]
mod tests;
