use super::*;
use glam::DVec3;

fn flat_triangle() -> Mesh<()> {
  let points = vec![
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(2.0, 0.0, 0.0),
    DVec3::new(0.0, 2.0, 0.0),
  ];
  Mesh::from_faces(points, vec![[0, 1, 2]])
}

#[test]
fn distance_to_point_directly_above_face_is_the_height() {
  let m = flat_triangle();
  let (d2, prim) = distance2_pm(DVec3::new(0.5, 0.5, 3.0), &m);
  assert!((d2 - 9.0).abs() < 1e-9);
  assert!(matches!(prim, Primitive::Face(0, 1, 2)));
}

#[test]
fn distance_to_point_past_a_vertex_is_point_distance() {
  let m = flat_triangle();
  let (d2, prim) = distance2_pm(DVec3::new(-3.0, -4.0, 0.0), &m);
  assert!((d2 - 25.0).abs() < 1e-9);
  assert_eq!(prim, Primitive::Point(0));
}

#[test]
fn distance_to_point_past_an_edge_is_edge_distance() {
  let m = flat_triangle();
  // directly "below" the hypotenuse's outside, closest feature is the edge (1,2)
  let (d2, prim) = distance2_pm(DVec3::new(2.0, 2.0, 0.0), &m);
  assert!(d2 > 0.0);
  assert!(matches!(prim, Primitive::Edge(1, 2) | Primitive::Edge(2, 1)));
}

#[test]
fn mesh_distance_between_disjoint_meshes_is_symmetric() {
  let a = flat_triangle();
  let mut b_points = vec![
    DVec3::new(0.0, 0.0, 5.0),
    DVec3::new(2.0, 0.0, 5.0),
    DVec3::new(0.0, 2.0, 5.0),
  ];
  b_points.iter_mut().for_each(|p| *p += DVec3::new(10.0, 0.0, 0.0));
  let b = Mesh::<()>::from_faces(b_points, vec![[0, 1, 2]]);
  let d = mesh_distance(&a, &b);
  assert!(d > 0.0);
  assert!((mesh_distance(&a, &b) - mesh_distance(&b, &a)).abs() < 1e-9);
}
