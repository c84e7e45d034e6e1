use approx::assert_relative_eq;
use cogwheel_engine::math::Mat4;
use cogwheel_engine::mesh::{create_gear, GearError, GearMesh, GearParams};

const DEMO_GEARS: [(f32, f32, f32, u32, f32); 3] = [
    (1.0, 4.0, 1.0, 20, 0.7),
    (0.5, 2.0, 2.0, 10, 0.7),
    (1.3, 2.0, 0.5, 10, 0.7),
];

#[test]
fn demo_gears_have_expected_sizes() {
    let sizes: Vec<(usize, usize)> = DEMO_GEARS
        .iter()
        .map(|&(r0, r1, w, n, d)| {
            let g = create_gear(r0, r1, w, n, d).unwrap();
            (g.vertex_count(), g.strip_count())
        })
        .collect();
    assert_eq!(sizes, vec![(680, 140), (340, 70), (340, 70)]);
}

#[test]
fn every_strip_range_indexes_the_vertex_buffer() {
    for &(r0, r1, w, n, d) in &DEMO_GEARS {
        let g = GearMesh::generate(&GearParams::new(r0, r1, w, n, d)).unwrap();
        let total = g.vertex_count() as u32;
        let mut covered = 0;
        for s in g.strips() {
            assert!(s.range().end <= total);
            covered += s.count;
        }
        assert_eq!(covered, total);
    }
}

#[test]
fn gear_vertices_are_bytemuck_castable() {
    let g = create_gear(1.0, 4.0, 1.0, 20, 0.7).unwrap();
    let bytes: &[u8] = bytemuck::cast_slice(g.vertices());
    assert_eq!(bytes.len(), 680 * 24);
}

#[test]
fn widths_are_symmetric_about_z0() {
    let g = create_gear(0.5, 2.0, 2.0, 10, 0.7).unwrap();
    for v in g.vertices() {
        assert!(v.position[2] == 1.0 || v.position[2] == -1.0);
    }
}

#[test]
fn invalid_teeth_is_an_error() {
    assert!(matches!(
        create_gear(1.0, 4.0, 1.0, 0, 0.7),
        Err(GearError::InvalidParameter { name: "teeth", .. })
    ));
}

#[test]
fn view_and_projection_place_gear_in_front_of_camera() {
    let projection = Mat4::perspective(60.0, 1.0, 1.0, 1024.0).unwrap();
    let mut view = Mat4::IDENTITY;
    view.translate(0.0, 0.0, -20.0);

    let mut mvp = projection;
    mvp.multiply(&view);

    // Gear centre lands on the view axis, inside the depth range.
    let clip = mvp.transform([0.0, 0.0, 0.0, 1.0]);
    assert_relative_eq!(clip[3], 20.0);
    let ndc_z = clip[2] / clip[3];
    assert!(ndc_z > -1.0 && ndc_z < 1.0);
    assert_relative_eq!(clip[0], 0.0);
    assert_relative_eq!(clip[1], 0.0);
}

#[test]
fn rigid_inverse_undoes_view_transform() {
    let mut view = Mat4::IDENTITY;
    view.translate(0.0, 0.0, -20.0);
    view.rotate(20f32.to_radians(), 1.0, 0.0, 0.0);
    view.rotate(30f32.to_radians(), 0.0, 1.0, 0.0);

    let mut inv = view;
    inv.invert_rigid();
    assert!((view * inv).approx_eq(&Mat4::IDENTITY, 1e-5));
}
