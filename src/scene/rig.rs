use glam::Vec3;

use crate::{
    foundation::{error::DepthwireResult, math::track_to_euler},
    scene::asset::{ObjectData, ObjectId, SceneAsset, SceneObject, Transform},
};

/// Camera placement relative to the subject at the origin.
pub const CAMERA_LOCATION: Vec3 = Vec3::new(0.0, -3.0, 1.2);
pub const KEY_LIGHT_LOCATION: Vec3 = Vec3::new(2.5, -2.5, 3.0);
pub const FILL_LIGHT_LOCATION: Vec3 = Vec3::new(-2.0, 2.0, 2.5);

/// Which sensor dimension the sensor width applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SensorFit {
    /// The larger image dimension.
    Auto,
}

/// Perspective camera parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CameraData {
    pub lens_mm: f32,
    pub sensor_width_mm: f32,
    pub sensor_fit: SensorFit,
    pub clip_start: f32,
    pub clip_end: f32,
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            lens_mm: 35.0,
            sensor_width_mm: 36.0,
            sensor_fit: SensorFit::Auto,
            clip_start: 0.1,
            clip_end: 100.0,
        }
    }
}

impl CameraData {
    /// `tan` of half the field of view along the fitted (larger) image dimension.
    pub fn half_fov_tan(&self) -> f32 {
        self.sensor_width_mm * 0.5 / self.lens_mm
    }
}

/// Outline of an area light.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum AreaShape {
    Square { size: f32 },
    Rectangle { size_x: f32, size_y: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum LightKind {
    Area { shape: AreaShape },
}

/// Light datablock. `energy` is radiant power in watts.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LightData {
    pub name: String,
    pub kind: LightKind,
    pub energy: f32,
}

/// Handles created by [`build_rig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RigHandles {
    pub camera: ObjectId,
    /// Empty at the origin that the camera is parented to; the turntable rotates it.
    pub pivot: ObjectId,
    pub key_light: ObjectId,
    pub fill_light: ObjectId,
}

fn facing_origin(location: Vec3) -> Transform {
    Transform {
        location,
        rotation_euler: track_to_euler(location, Vec3::ZERO),
        ..Transform::default()
    }
}

fn add_area_light(
    scene: &mut SceneAsset,
    name: &str,
    location: Vec3,
    shape: AreaShape,
    energy: f32,
) -> ObjectId {
    let light = scene.add_light(LightData {
        name: name.to_string(),
        kind: LightKind::Area { shape },
        energy,
    });
    scene.add_object(SceneObject::new(
        name,
        ObjectData::Light(light),
        facing_origin(location),
    ))
}

/// Place the camera, its pivot and the two area lights.
///
/// Every rig object looks at the origin. Only the camera hangs off the pivot, so a turntable
/// orbits the camera while the lights stay fixed relative to the subject.
#[tracing::instrument(skip(scene))]
pub fn build_rig(scene: &mut SceneAsset) -> DepthwireResult<RigHandles> {
    let camera_data = scene.add_camera(CameraData::default());
    let camera = scene.add_object(SceneObject::new(
        "Camera",
        ObjectData::Camera(camera_data),
        facing_origin(CAMERA_LOCATION),
    ));
    let pivot = scene.add_object(SceneObject::new(
        "Pivot",
        ObjectData::Empty,
        Transform::default(),
    ));
    scene.set_parent(camera, pivot)?;
    scene.set_active_camera(camera)?;

    let key_light = add_area_light(
        scene,
        "KeyLight",
        KEY_LIGHT_LOCATION,
        AreaShape::Rectangle {
            size_x: 2.5,
            size_y: 1.5,
        },
        1500.0,
    );
    let fill_light = add_area_light(
        scene,
        "FillLight",
        FILL_LIGHT_LOCATION,
        AreaShape::Square { size: 0.25 },
        800.0,
    );

    tracing::debug!("camera rig and lights placed");
    Ok(RigHandles {
        camera,
        pivot,
        key_light,
        fill_light,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rig.rs"]
mod tests;
