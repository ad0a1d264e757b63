use std::f32::consts::TAU;

use glam::Vec3;

use crate::{
    animation::fcurve::{AnimationTrack, ChannelPath, Interpolation},
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{DepthwireError, DepthwireResult},
    },
    scene::asset::{AnimationId, ObjectId, SceneAsset},
};

/// First frame of every turntable.
pub const TURNTABLE_START: FrameIndex = FrameIndex(1);

/// Keyframe one full revolution of `pivot` about world Z over frames `1..=frame_count`.
///
/// Keys land on all three rotation channels at both ends and are forced to linear, so the
/// rotation speed is constant. The scene's frame range becomes `1..=frame_count`. If `pivot`
/// already carries a track, it is updated in place.
#[tracing::instrument(skip(scene))]
pub fn animate_turntable(
    scene: &mut SceneAsset,
    pivot: ObjectId,
    frame_count: u64,
) -> DepthwireResult<AnimationId> {
    if frame_count == 0 {
        return Err(DepthwireError::validation(
            "turntable frame count must be >= 1",
        ));
    }
    if frame_count == 1 {
        tracing::warn!("single-frame turntable: end key replaces start key");
    }
    let end = FrameIndex(frame_count);
    let range = FrameRange::new(TURNTABLE_START, end)?;

    let mut transform = scene.object(pivot)?.transform;
    let existing = scene.animation_for(pivot).map(|(id, _)| id);
    let id = match existing {
        Some(id) => id,
        None => scene.add_animation(AnimationTrack::new(pivot)),
    };
    let track = scene.animation_mut(id)?;

    transform.rotation_euler = Vec3::ZERO;
    track.insert_vector_keys(
        ChannelPath::RotationEuler,
        &transform,
        TURNTABLE_START,
        Interpolation::Bezier,
    );
    transform.rotation_euler.z = TAU;
    track.insert_vector_keys(
        ChannelPath::RotationEuler,
        &transform,
        end,
        Interpolation::Bezier,
    );
    track.set_interpolation(Interpolation::Linear);
    let keys = track.keyframe_count();

    scene.object_mut(pivot)?.transform.rotation_euler = Vec3::ZERO;
    scene.set_frame_range(range);

    tracing::info!(frames = frame_count, keys, "turntable keyed");
    Ok(id)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/turntable.rs"]
mod tests;
