use super::*;
use crate::{
    assets::image::{ImageInfo, ImageResource},
    render::settings::configure_render,
    scene::{
        geometry::{SurfaceParams, build_surface},
        rig::build_rig,
    },
};

fn built_scene(width: u32, height: u32) -> SceneAsset {
    let mut scene = SceneAsset::new();
    let color = scene.add_image(
        ImageResource::from_rgba8("color", 8, 6, [220, 180, 140, 255].repeat(48)).unwrap(),
    );
    let depth = scene.add_image(
        ImageResource::from_rgba8("depth", 8, 6, [128, 128, 128, 255].repeat(48)).unwrap(),
    );
    let params = SurfaceParams {
        subdivision_levels: 2,
        ..SurfaceParams::default()
    };
    build_surface(&mut scene, color, depth, params).unwrap();
    build_rig(&mut scene).unwrap();
    configure_render(
        &mut scene,
        std::path::Path::new("unused.png"),
        ImageInfo { width, height },
    );
    scene
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn frame_matches_render_resolution() {
    let scene = built_scene(64, 48);
    let frame = PreviewBackend::new()
        .render_frame(&scene, FrameIndex(1))
        .unwrap();
    assert_eq!((frame.width, frame.height), (64, 48));
    assert_eq!(frame.data.len(), 64 * 48 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn surface_covers_center_and_background_fills_corner() {
    let scene = built_scene(64, 48);
    let frame = PreviewBackend::new()
        .render_frame(&scene, FrameIndex(1))
        .unwrap();

    let background = scene.world.color.to_srgb8();
    assert_eq!(pixel(&frame, 0, 0), background);
    assert_ne!(pixel(&frame, 32, 24), background);
}

#[test]
fn missing_camera_is_a_precursor_error() {
    let mut scene = SceneAsset::new();
    configure_render(
        &mut scene,
        std::path::Path::new("unused.png"),
        ImageInfo {
            width: 4,
            height: 4,
        },
    );
    let err = PreviewBackend::new()
        .render_frame(&scene, FrameIndex(1))
        .unwrap_err();
    assert!(matches!(err, DepthwireError::PrecursorMissing(_)));
}

#[test]
fn oversized_and_empty_resolutions_are_rejected() {
    for (w, h) in [(70_000, 10), (10, 70_000), (800, 0)] {
        let scene = built_scene(w, h);
        let err = PreviewBackend::new()
            .render_frame(&scene, FrameIndex(1))
            .unwrap_err();
        assert!(matches!(err, DepthwireError::Validation(_)), "{w}x{h}");
    }
}

#[test]
fn portrait_frames_keep_full_vertical_fov() {
    let camera = CameraData::default();
    let p = Projection::new(&camera, Affine3A::IDENTITY, 30, 60);
    assert!((p.tan_y - camera.half_fov_tan()).abs() < 1e-6);
    assert!((p.tan_x - camera.half_fov_tan() * 0.5).abs() < 1e-6);
    assert!(p.project(Vec3::new(0.0, 0.0, 1.0)).is_none());
    let (x, y, d) = p.project(Vec3::new(0.0, 0.0, -2.0)).unwrap();
    assert_eq!((x, y, d), (15.0, 30.0, 2.0));
}
