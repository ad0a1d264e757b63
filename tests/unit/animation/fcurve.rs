use super::*;

fn key(frame: u64, value: f32, interpolation: Interpolation) -> Keyframe {
    Keyframe {
        frame: FrameIndex(frame),
        value,
        interpolation,
    }
}

#[test]
fn constant_holds_until_next_key() {
    let mut c = FCurve::new(ChannelPath::Location, 0);
    c.insert(key(1, 1.0, Interpolation::Constant));
    c.insert(key(11, 3.0, Interpolation::Constant));
    assert_eq!(c.evaluate(FrameIndex(6)), Some(1.0));
    assert_eq!(c.evaluate(FrameIndex(11)), Some(3.0));
}

#[test]
fn linear_interpolates_and_holds_outside_span() {
    let mut c = FCurve::new(ChannelPath::RotationEuler, 2);
    c.insert(key(1, 0.0, Interpolation::Linear));
    c.insert(key(11, 10.0, Interpolation::Linear));
    assert_eq!(c.evaluate(FrameIndex(0)), Some(0.0));
    assert_eq!(c.evaluate(FrameIndex(6)), Some(5.0));
    assert_eq!(c.evaluate(FrameIndex(40)), Some(10.0));
}

#[test]
fn bezier_eases_but_keeps_endpoints_and_midpoint() {
    let mut c = FCurve::new(ChannelPath::Location, 0);
    c.insert(key(1, 0.0, Interpolation::Bezier));
    c.insert(key(11, 10.0, Interpolation::Bezier));
    assert_eq!(c.evaluate(FrameIndex(6)), Some(5.0));
    assert!(c.evaluate(FrameIndex(3)).unwrap() < 2.0);
}

#[test]
fn empty_curve_has_no_value() {
    assert_eq!(FCurve::new(ChannelPath::Scale, 0).evaluate(FrameIndex(1)), None);
}

#[test]
fn insert_keeps_order_and_replaces_same_frame() {
    let mut c = FCurve::new(ChannelPath::Location, 0);
    c.insert(key(10, 1.0, Interpolation::Bezier));
    c.insert(key(1, 0.0, Interpolation::Bezier));
    c.insert(key(10, 2.0, Interpolation::Bezier));
    let frames: Vec<u64> = c.keys().iter().map(|k| k.frame.0).collect();
    assert_eq!(frames, vec![1, 10]);
    assert_eq!(c.keys()[1].value, 2.0);
}

#[test]
fn track_keys_every_component_and_applies_them() {
    let mut track = AnimationTrack::new(crate::scene::asset::ObjectId(0));
    let mut t = Transform::default();
    track.insert_vector_keys(
        ChannelPath::RotationEuler,
        &t,
        FrameIndex(1),
        Interpolation::Bezier,
    );
    t.rotation_euler.z = 4.0;
    track.insert_vector_keys(
        ChannelPath::RotationEuler,
        &t,
        FrameIndex(5),
        Interpolation::Bezier,
    );
    track.set_interpolation(Interpolation::Linear);

    assert_eq!(track.channels.len(), 3);
    assert_eq!(track.keyframe_count(), 6);
    assert!(
        track
            .channels
            .iter()
            .flat_map(|c| c.keys())
            .all(|k| k.interpolation == Interpolation::Linear)
    );

    let mut sampled = Transform::default();
    track.apply(&mut sampled, FrameIndex(3));
    assert_eq!(sampled.rotation_euler.z, 2.0);
    assert_eq!(sampled.rotation_euler.x, 0.0);
    assert_eq!(sampled.location, glam::Vec3::ZERO);
}
