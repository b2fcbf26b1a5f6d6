use super::*;
use crate::shared::SharedBuf;
use glam::DVec3;

#[test]
fn skeleton_triangulates_a_square_with_full_area() {
  let proj = vec![
    DVec2::new(0.0, 0.0),
    DVec2::new(2.0, 0.0),
    DVec2::new(2.0, 2.0),
    DVec2::new(0.0, 2.0),
  ];
  let (faces, positions) = skeleton(&proj);
  assert!(!faces.is_empty());

  let vertex_pos = |local: usize| -> DVec2 {
    if local < proj.len() {
      proj[local]
    } else {
      positions[local - proj.len()]
    }
  };
  let area: f64 = faces
    .iter()
    .map(|f| {
      let a = vertex_pos(f[0]);
      let b = vertex_pos(f[1]);
      let c = vertex_pos(f[2]);
      ((b - a).perp_dot(c - a)).abs() * 0.5
    })
    .sum();
  assert!((area - 4.0).abs() < 1e-6);
}

#[test]
fn triangulation_skeleton_covers_a_concave_l_shape() {
  let points = SharedBuf::new(vec![
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(2.0, 0.0, 0.0),
    DVec3::new(2.0, 1.0, 0.0),
    DVec3::new(1.0, 1.0, 0.0),
    DVec3::new(1.0, 2.0, 0.0),
    DVec3::new(0.0, 2.0, 0.0),
  ]);
  let mesh =
    triangulation_skeleton::<()>(points, &[0, 1, 2, 3, 4, 5], Some(DVec3::Z), SharedBuf::new(vec![()])).unwrap();
  assert!(!mesh.faces().is_empty());
  assert!((mesh.surface() - 3.0).abs() < 1e-6);
}

#[test]
fn rejects_a_loop_with_fewer_than_three_points() {
  let points = SharedBuf::new(vec![DVec3::ZERO, DVec3::X]);
  assert!(triangulation_skeleton::<()>(points, &[0, 1], None, SharedBuf::new(vec![()])).is_err());
}
