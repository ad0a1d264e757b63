use super::*;
use crate::assets::image::ImageResource;

#[test]
fn build_materials_registers_two_independent_materials() {
    let mut scene = SceneAsset::new();
    let image = scene.add_image(ImageResource::from_rgba8("color", 1, 1, vec![0; 4]).unwrap());
    let pair = build_materials(&mut scene, image);
    assert_ne!(pair.textured, pair.wire);
    assert_eq!(scene.materials().count(), 2);

    let textured = scene.material(pair.textured).unwrap();
    let MaterialSpec::Textured(surface) = textured.spec else {
        panic!("textured material has wrong spec: {:?}", textured.spec);
    };
    assert_eq!(surface.base_color, ColorSource::Image(image));
    assert_eq!(surface.metallic, 0.0);

    let wire = scene.material(pair.wire).unwrap();
    assert_eq!(
        wire.spec,
        MaterialSpec::WireEmissive {
            color: WIRE_COLOR,
            strength: WIRE_STRENGTH
        }
    );
}

#[test]
fn wire_material_has_no_texture() {
    assert!(matches!(
        wire_material().spec,
        MaterialSpec::WireEmissive { .. }
    ));
}
