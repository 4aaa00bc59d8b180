//! Test to verify error message quality

use autoorient::{Error, Mesh, OrientItem, OrientParams, evaluate_direction, mesh_ops, orient_meshes};
use nalgebra::Vector3;

#[test]
fn test_error_message_for_negative_layer_height() {
    let params = OrientParams::default().with_first_layer_height(-0.2);
    let err = evaluate_direction(&Mesh::new(), &params, &Vector3::z()).unwrap_err();
    println!("Error message: {}", err);

    assert!(matches!(err, Error::InvalidParameter(_)));
    assert_eq!(
        err.to_string(),
        "[E1001] Invalid orientation parameter: 'first_layer_height' is -0.2, expected a finite value >= 0"
    );
}

#[test]
fn test_error_message_names_overhang_angle() {
    let mesh = Mesh::new();
    let mut items = vec![OrientItem::new("bracket", &mesh).with_overhang_angle(0.0)];
    let err = orient_meshes(&mut items, &OrientParams::default(), |_, _| {}, || false).unwrap_err();
    println!("Error message: {}", err);

    assert!(err.to_string().contains("'overhang_angle' is 0"));
    assert!(err.to_string().contains("(0, 90]"));
}

#[test]
fn test_error_message_for_empty_mesh_bounds() {
    let err = mesh_ops::compute_mesh_aabb(&Mesh::new()).unwrap_err();
    println!("Error message: {}", err);

    assert!(matches!(err, Error::InvalidMesh(_)));
    assert!(err.to_string().starts_with("[E2001]"));
    assert!(err.to_string().contains("bounding box"));
}
