use super::*;

#[test]
fn plane_is_one_quad_facing_up() {
    let plane = MeshData::plane(2.0);
    assert_eq!(plane.vertex_count(), 4);
    assert_eq!(plane.faces.len(), 1);
    assert_eq!(plane.positions[2], Vec3::new(1.0, 1.0, 0.0));
    assert!(plane.vertex_normals().iter().all(|&n| n == Vec3::Z));
}

#[test]
fn subdivision_builds_regular_grid() {
    let mut mesh = MeshData::plane(2.0);
    for level in 1..=4u32 {
        mesh = mesh.subdivide();
        let side = 1usize << level;
        assert_eq!(mesh.faces.len(), side * side);
        assert_eq!(mesh.vertex_count(), (side + 1) * (side + 1));
    }
    assert!(mesh.positions.iter().all(|p| p.z == 0.0));
    assert!(mesh.vertex_normals().iter().all(|&n| n == Vec3::Z));
}

#[test]
fn subdivision_interpolates_uvs_and_keeps_slots() {
    let mut base = MeshData::plane(2.0);
    base.faces[0].material_slot = 3;
    let mesh = base.subdivide();
    assert!(mesh.faces.iter().all(|f| f.material_slot == 3));
    let center = mesh
        .positions
        .iter()
        .position(|&p| p == Vec3::ZERO)
        .unwrap();
    assert_eq!(mesh.uvs[center], Vec2::new(0.5, 0.5));
}

#[test]
fn subdivision_keeps_faces_front_facing() {
    let mesh = MeshData::plane(2.0).subdivide().subdivide();
    for face in &mesh.faces {
        assert!(mesh.face_normal_unnormalized(face).z > 0.0);
    }
}

#[test]
fn edges_are_unique() {
    let plane = MeshData::plane(2.0);
    assert_eq!(plane.edges().len(), 4);
    // 2x2 grid: 12 edges
    assert_eq!(plane.subdivide().edges().len(), 12);
}

#[test]
fn material_for_slot_bounds() {
    let mesh = Mesh {
        name: "m".to_string(),
        base: MeshData::plane(2.0),
        modifiers: ModifierStack::default(),
        material_slots: vec![MaterialId(4)],
    };
    assert_eq!(mesh.material_for_slot(0), Some(MaterialId(4)));
    assert_eq!(mesh.material_for_slot(1), None);
}
