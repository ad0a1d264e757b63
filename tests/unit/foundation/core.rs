use super::*;

#[test]
fn frame_range_is_inclusive() {
    let r = FrameRange::new(FrameIndex(1), FrameIndex(24)).unwrap();
    assert_eq!(r.len_frames(), 24);
    let frames: Vec<_> = r.frames().collect();
    assert_eq!(frames.first(), Some(&FrameIndex(1)));
    assert_eq!(frames.last(), Some(&FrameIndex(24)));
    assert_eq!(frames.len(), 24);
}

#[test]
fn frame_range_single_frame() {
    let r = FrameRange::new(FrameIndex(1), FrameIndex(1)).unwrap();
    assert_eq!(r.len_frames(), 1);
    assert_eq!(r.frames().collect::<Vec<_>>(), vec![FrameIndex(1)]);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn srgb_encoding_hits_endpoints() {
    assert_eq!(LinearRgb::new(0.0, 0.0, 0.0).to_srgb8(), [0, 0, 0, 255]);
    assert_eq!(LinearRgb::new(1.0, 1.0, 1.0).to_srgb8(), [255, 255, 255, 255]);
    assert_eq!(LinearRgb::new(4.0, -1.0, 0.0).to_srgb8(), [255, 0, 0, 255]);
}

#[test]
fn srgb8_decode_then_encode_is_stable() {
    for v in [0u8, 12, 64, 128, 200, 255] {
        let l = srgb_to_linear(f32::from(v) / 255.0);
        let c = LinearRgb::new(l, l, l);
        assert_eq!(c.to_srgb8()[0], v);
    }
}
