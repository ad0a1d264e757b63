use super::*;
use crate::scene::{
    asset::{ObjectData, SceneObject, Transform},
    rig::build_rig,
};

fn scene_with_pivot() -> (SceneAsset, ObjectId) {
    let mut scene = SceneAsset::new();
    let pivot = scene.add_object(SceneObject::new(
        "Pivot",
        ObjectData::Empty,
        Transform::default(),
    ));
    (scene, pivot)
}

#[test]
fn full_turn_with_linear_keys() {
    let (mut scene, pivot) = scene_with_pivot();
    let id = animate_turntable(&mut scene, pivot, 24).unwrap();
    let track = scene.animation(id).unwrap();

    assert_eq!(track.target, pivot);
    let z = track.channel(ChannelPath::RotationEuler, 2).unwrap();
    let keys: Vec<(u64, f32)> = z.keys().iter().map(|k| (k.frame.0, k.value)).collect();
    assert_eq!(keys, vec![(1, 0.0), (24, TAU)]);

    for channel in &track.channels {
        assert_eq!(channel.path, ChannelPath::RotationEuler);
        assert!(
            channel
                .keys()
                .iter()
                .all(|k| k.interpolation == Interpolation::Linear)
        );
    }
    assert_eq!(track.keyframe_count(), 6);
    assert_eq!(
        scene.frame_range(),
        Some(FrameRange::new(FrameIndex(1), FrameIndex(24)).unwrap())
    );
}

#[test]
fn rotation_is_linear_between_keys() {
    let (mut scene, pivot) = scene_with_pivot();
    animate_turntable(&mut scene, pivot, 5).unwrap();

    let mid = scene.local_transform_at(pivot, FrameIndex(3)).unwrap();
    assert!((mid.rotation_euler.z - std::f32::consts::PI).abs() < 1e-5);
    assert_eq!(mid.rotation_euler.x, 0.0);
}

#[test]
fn single_frame_keeps_one_key_per_channel() {
    let (mut scene, pivot) = scene_with_pivot();
    let id = animate_turntable(&mut scene, pivot, 1).unwrap();
    let track = scene.animation(id).unwrap();

    assert_eq!(track.channels.len(), 3);
    assert!(track.channels.iter().all(|c| c.keys().len() == 1));
    let z = track.channel(ChannelPath::RotationEuler, 2).unwrap();
    assert_eq!(z.keys()[0].value, TAU);
    assert_eq!(scene.frame_range().unwrap().len_frames(), 1);
}

#[test]
fn zero_frames_is_rejected() {
    let (mut scene, pivot) = scene_with_pivot();
    let err = animate_turntable(&mut scene, pivot, 0).unwrap_err();
    assert!(matches!(err, DepthwireError::Validation(_)));
    assert_eq!(scene.animations().count(), 0);
    assert_eq!(scene.frame_range(), None);
}

#[test]
fn repeated_call_reuses_track() {
    let (mut scene, pivot) = scene_with_pivot();
    let a = animate_turntable(&mut scene, pivot, 24).unwrap();
    let b = animate_turntable(&mut scene, pivot, 24).unwrap();
    assert_eq!(a, b);
    assert_eq!(scene.animations().count(), 1);
    assert_eq!(scene.animation(a).unwrap().keyframe_count(), 6);
}

#[test]
fn camera_orbits_with_pivot() {
    let mut scene = SceneAsset::new();
    let rig = build_rig(&mut scene).unwrap();
    animate_turntable(&mut scene, rig.pivot, 5).unwrap();

    let start = scene.world_transform_at(rig.camera, FrameIndex(1)).unwrap();
    let half = scene.world_transform_at(rig.camera, FrameIndex(3)).unwrap();
    assert!((start.translation.y + 3.0).abs() < 1e-5);
    assert!((half.translation.y - 3.0).abs() < 1e-4);
    assert!((half.translation.z - 1.2).abs() < 1e-5);
}
