use super::*;
use crate::{
    assets::image::ImageResource,
    scene::{
        material::MaterialSpec,
        modifiers::{EvalMode, ModifierKind},
    },
};

fn scene_with_images(width: u32, height: u32) -> (SceneAsset, ImageId, ImageId) {
    let mut scene = SceneAsset::new();
    let color = scene.add_image(
        ImageResource::from_rgba8(
            "color",
            width,
            height,
            vec![200; width as usize * height as usize * 4],
        )
        .unwrap(),
    );
    let depth = scene.add_image(
        ImageResource::from_rgba8("depth", 4, 3, [128, 128, 128, 255].repeat(12)).unwrap(),
    );
    (scene, color, depth)
}

#[test]
fn x_scale_is_aspect_ratio() {
    for (w, h) in [(800, 600), (600, 800), (1920, 1080), (5, 5)] {
        let (mut scene, color, depth) = scene_with_images(w, h);
        let handles = build_surface(&mut scene, color, depth, SurfaceParams::default()).unwrap();
        let obj = scene.object(handles.object).unwrap();
        assert_eq!(obj.transform.scale.x, w as f32 / h as f32);
        assert_eq!(obj.transform.scale.y, 1.0);
    }
}

#[test]
fn zero_height_defaults_aspect_to_one() {
    let (mut scene, color, depth) = scene_with_images(800, 0);
    let handles = build_surface(&mut scene, color, depth, SurfaceParams::default()).unwrap();
    assert_eq!(scene.object(handles.object).unwrap().transform.scale.x, 1.0);
}

#[test]
fn slots_and_stack_order_are_invariant() {
    for params in [
        SurfaceParams::default(),
        SurfaceParams {
            subdivision_levels: 0,
            displacement_strength: -2.0,
            wire_thickness: 0.5,
        },
        SurfaceParams {
            subdivision_levels: 6,
            displacement_strength: 0.0,
            wire_thickness: 1e-4,
        },
    ] {
        let (mut scene, color, depth) = scene_with_images(8, 6);
        let handles = build_surface(&mut scene, color, depth, params).unwrap();
        let mesh = scene.mesh(handles.mesh).unwrap();

        assert_eq!(
            mesh.modifiers.kinds(),
            vec![
                ModifierKind::Subdivision,
                ModifierKind::Displacement,
                ModifierKind::Wireframe
            ]
        );
        assert_eq!(mesh.material_for_slot(0), Some(handles.materials.textured));
        assert_eq!(mesh.material_for_slot(1), Some(handles.materials.wire));
        assert!(matches!(
            scene.material(handles.materials.textured).unwrap().spec,
            MaterialSpec::Textured(_)
        ));
        assert!(matches!(
            scene.material(handles.materials.wire).unwrap().spec,
            MaterialSpec::WireEmissive { .. }
        ));
    }
}

#[test]
fn depth_texture_wraps_depth_image() {
    let (mut scene, color, depth) = scene_with_images(8, 6);
    let handles = build_surface(&mut scene, color, depth, SurfaceParams::default()).unwrap();
    assert_eq!(scene.texture(handles.depth_texture).unwrap().image, depth);
}

#[test]
fn evaluated_surface_has_grid_and_wire() {
    let (mut scene, color, depth) = scene_with_images(8, 6);
    let params = SurfaceParams {
        subdivision_levels: 2,
        ..SurfaceParams::default()
    };
    let handles = build_surface(&mut scene, color, depth, params).unwrap();
    let mesh = scene.mesh(handles.mesh).unwrap();
    let evaluated = mesh
        .modifiers
        .evaluate(&mesh.base, mesh.material_slots.len(), &scene, EvalMode::Render)
        .unwrap();
    assert_eq!(evaluated.faces.iter().filter(|f| f.material_slot == 0).count(), 16);
    assert_eq!(evaluated.faces.iter().filter(|f| f.material_slot == 1).count(), 40);
}

#[test]
fn invalid_params_leave_scene_untouched() {
    let (mut scene, color, depth) = scene_with_images(8, 6);
    let params = SurfaceParams {
        wire_thickness: 0.0,
        ..SurfaceParams::default()
    };
    assert!(build_surface(&mut scene, color, depth, params).is_err());
    assert_eq!(scene.objects().count(), 0);
    assert_eq!(scene.materials().count(), 0);
}
