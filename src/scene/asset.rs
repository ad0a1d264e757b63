use glam::{Affine3A, Vec3};

use crate::{
    animation::fcurve::AnimationTrack,
    assets::image::ImageResource,
    foundation::core::{FrameIndex, FrameRange, LinearRgb},
    foundation::error::{DepthwireError, DepthwireResult},
    foundation::math::euler_xyz_to_quat,
    render::settings::RenderSettings,
    scene::{
        material::Material,
        mesh::Mesh,
        rig::{CameraData, LightData},
    },
};

macro_rules! scene_handles {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
            pub struct $name(pub(crate) usize);

            impl $name {
                /// Position of the datablock in its scene collection.
                pub fn index(self) -> usize {
                    self.0
                }
            }
        )*
    };
}

scene_handles!(
    /// Handle to a [`SceneObject`].
    ObjectId,
    /// Handle to a [`Mesh`].
    MeshId,
    /// Handle to a [`Material`].
    MaterialId,
    /// Handle to a [`Texture`].
    TextureId,
    /// Handle to an [`ImageResource`].
    ImageId,
    /// Handle to [`CameraData`].
    CameraId,
    /// Handle to [`LightData`].
    LightId,
    /// Handle to an [`AnimationTrack`].
    AnimationId,
);

/// Location, XYZ Euler rotation (radians) and scale of an object relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Transform {
    pub location: Vec3,
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(location: Vec3) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.scale,
            euler_xyz_to_quat(self.rotation_euler),
            self.location,
        )
    }
}

/// What an object instantiates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ObjectData {
    /// No geometry; used for pivots.
    Empty,
    Mesh(MeshId),
    Camera(CameraId),
    Light(LightId),
}

/// A placed instance in the scene.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SceneObject {
    pub name: String,
    pub data: ObjectData,
    pub transform: Transform,
    pub parent: Option<ObjectId>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, data: ObjectData, transform: Transform) -> Self {
        Self {
            name: name.into(),
            data,
            transform,
            parent: None,
        }
    }
}

/// Image texture wrapping an image datablock, sampled by modifiers.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Texture {
    pub name: String,
    pub image: ImageId,
}

/// Scene background.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct World {
    pub color: LinearRgb,
}

impl Default for World {
    fn default() -> Self {
        Self {
            color: LinearRgb::new(0.05, 0.05, 0.05),
        }
    }
}

/// The one mutable scene of a run.
///
/// Owns every datablock created while building: objects, meshes, materials, textures, images,
/// cameras, lights and animation tracks. Builders receive it by `&mut` and hand back typed
/// handles; renderers read it by `&`. [`SceneAsset::clear`] returns it to the empty state.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct SceneAsset {
    objects: Vec<SceneObject>,
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    textures: Vec<Texture>,
    images: Vec<ImageResource>,
    cameras: Vec<CameraData>,
    lights: Vec<LightData>,
    animations: Vec<AnimationTrack>,
    active_camera: Option<ObjectId>,
    frame_range: Option<FrameRange>,
    /// Background settings.
    pub world: World,
    /// Output settings used by the render entry points.
    pub render: RenderSettings,
}

fn lookup<'a, T>(items: &'a [T], index: usize, kind: &str) -> DepthwireResult<&'a T> {
    items
        .get(index)
        .ok_or_else(|| DepthwireError::validation(format!("unknown {kind} {index}")))
}

fn lookup_mut<'a, T>(items: &'a mut [T], index: usize, kind: &str) -> DepthwireResult<&'a mut T> {
    items
        .get_mut(index)
        .ok_or_else(|| DepthwireError::validation(format!("unknown {kind} {index}")))
}

impl SceneAsset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every datablock and reset world and render settings.
    pub fn clear(&mut self) {
        let before = self.objects.len();
        *self = Self::default();
        tracing::debug!(objects_removed = before, "scene cleared");
    }

    /// True when no datablock of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
            && self.meshes.is_empty()
            && self.materials.is_empty()
            && self.textures.is_empty()
            && self.images.is_empty()
            && self.cameras.is_empty()
            && self.lights.is_empty()
            && self.animations.is_empty()
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureId {
        self.textures.push(texture);
        TextureId(self.textures.len() - 1)
    }

    pub fn add_image(&mut self, image: ImageResource) -> ImageId {
        self.images.push(image);
        ImageId(self.images.len() - 1)
    }

    pub fn add_camera(&mut self, camera: CameraData) -> CameraId {
        self.cameras.push(camera);
        CameraId(self.cameras.len() - 1)
    }

    pub fn add_light(&mut self, light: LightData) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    pub fn add_animation(&mut self, track: AnimationTrack) -> AnimationId {
        self.animations.push(track);
        AnimationId(self.animations.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> DepthwireResult<&SceneObject> {
        lookup(&self.objects, id.0, "ObjectId")
    }

    pub fn object_mut(&mut self, id: ObjectId) -> DepthwireResult<&mut SceneObject> {
        lookup_mut(&mut self.objects, id.0, "ObjectId")
    }

    pub fn mesh(&self, id: MeshId) -> DepthwireResult<&Mesh> {
        lookup(&self.meshes, id.0, "MeshId")
    }

    pub fn material(&self, id: MaterialId) -> DepthwireResult<&Material> {
        lookup(&self.materials, id.0, "MaterialId")
    }

    pub fn texture(&self, id: TextureId) -> DepthwireResult<&Texture> {
        lookup(&self.textures, id.0, "TextureId")
    }

    pub fn image(&self, id: ImageId) -> DepthwireResult<&ImageResource> {
        lookup(&self.images, id.0, "ImageId")
    }

    pub fn image_mut(&mut self, id: ImageId) -> DepthwireResult<&mut ImageResource> {
        lookup_mut(&mut self.images, id.0, "ImageId")
    }

    pub fn camera(&self, id: CameraId) -> DepthwireResult<&CameraData> {
        lookup(&self.cameras, id.0, "CameraId")
    }

    pub fn light(&self, id: LightId) -> DepthwireResult<&LightData> {
        lookup(&self.lights, id.0, "LightId")
    }

    pub fn animation(&self, id: AnimationId) -> DepthwireResult<&AnimationTrack> {
        lookup(&self.animations, id.0, "AnimationId")
    }

    pub fn animation_mut(&mut self, id: AnimationId) -> DepthwireResult<&mut AnimationTrack> {
        lookup_mut(&mut self.animations, id.0, "AnimationId")
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    pub fn materials(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialId(i), m))
    }

    pub fn images(&self) -> impl Iterator<Item = (ImageId, &ImageResource)> {
        self.images.iter().enumerate().map(|(i, m)| (ImageId(i), m))
    }

    pub fn lights(&self) -> impl Iterator<Item = (ObjectId, &SceneObject, &LightData)> {
        self.objects.iter().enumerate().filter_map(|(i, o)| match o.data {
            ObjectData::Light(l) => self.lights.get(l.0).map(|data| (ObjectId(i), o, data)),
            _ => None,
        })
    }

    pub fn animations(&self) -> impl Iterator<Item = (AnimationId, &AnimationTrack)> {
        self.animations
            .iter()
            .enumerate()
            .map(|(i, a)| (AnimationId(i), a))
    }

    /// Animation track driving `object`, if any.
    pub fn animation_for(&self, object: ObjectId) -> Option<(AnimationId, &AnimationTrack)> {
        self.animations().find(|(_, track)| track.target == object)
    }

    /// Object whose camera renders the scene.
    pub fn active_camera(&self) -> Option<ObjectId> {
        self.active_camera
    }

    pub fn set_active_camera(&mut self, object: ObjectId) -> DepthwireResult<()> {
        let obj = self.object(object)?;
        if !matches!(obj.data, ObjectData::Camera(_)) {
            return Err(DepthwireError::validation(format!(
                "object '{}' is not a camera",
                obj.name
            )));
        }
        self.active_camera = Some(object);
        Ok(())
    }

    /// Animated frame range, set by the turntable builder.
    pub fn frame_range(&self) -> Option<FrameRange> {
        self.frame_range
    }

    pub fn set_frame_range(&mut self, range: FrameRange) {
        self.frame_range = Some(range);
    }

    /// Parent `child` to `parent`, keeping the child's local transform as-is.
    pub fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> DepthwireResult<()> {
        self.object(parent)?;
        if child == parent {
            return Err(DepthwireError::validation("an object cannot parent itself"));
        }

        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(DepthwireError::validation("parenting would create a cycle"));
            }
            cursor = self.object(id)?.parent;
        }

        self.object_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Local transform of `id` at `frame`, with animated channels applied.
    pub fn local_transform_at(&self, id: ObjectId, frame: FrameIndex) -> DepthwireResult<Transform> {
        let mut transform = self.object(id)?.transform;
        if let Some((_, track)) = self.animation_for(id) {
            track.apply(&mut transform, frame);
        }
        Ok(transform)
    }

    /// Object-to-world matrix of `id` at `frame`, composed through the parent chain.
    pub fn world_transform_at(&self, id: ObjectId, frame: FrameIndex) -> DepthwireResult<Affine3A> {
        let mut world = self.local_transform_at(id, frame)?.to_affine();
        let mut cursor = self.object(id)?.parent;
        while let Some(parent) = cursor {
            world = self.local_transform_at(parent, frame)?.to_affine() * world;
            cursor = self.object(parent)?.parent;
        }
        Ok(world)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/asset.rs"]
mod tests;
