use super::*;
use crate::shared::SharedBuf;
use glam::DVec3;

fn cube() -> Mesh<()> {
  let points = vec![
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(1.0, 1.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
    DVec3::new(0.0, 0.0, 1.0),
    DVec3::new(1.0, 0.0, 1.0),
    DVec3::new(1.0, 1.0, 1.0),
    DVec3::new(0.0, 1.0, 1.0),
  ];
  // outward-wound faces, two triangles per cube face
  let faces = vec![
    [0, 2, 1], [0, 3, 2], // bottom z=0 (normal -Z)
    [4, 5, 6], [4, 6, 7], // top z=1 (normal +Z)
    [0, 1, 5], [0, 5, 4], // front y=0
    [3, 7, 6], [3, 6, 2], // back y=1
    [0, 4, 7], [0, 7, 3], // left x=0
    [1, 2, 6], [1, 6, 5], // right x=1
  ];
  Mesh::from_faces(points, faces)
}

#[test]
fn unit_cube_is_a_closed_envelope() {
  let m = cube();
  assert!(m.issurface());
  assert!(m.isenvelope());
  assert!(m.outlines_oriented().is_empty());
}

#[test]
fn mergeclose_on_a_clean_cube_is_a_fixpoint() {
  let mut m = cube();
  let before = m.faces().len();
  m.mergeclose(1e-9);
  assert_eq!(m.faces().len(), before);
}

#[test]
fn orient_from_default_seed_keeps_an_already_outward_cube() {
  let mut m = cube();
  let before = m.faces().to_vec();
  m.orient(None);
  assert_eq!(m.faces(), before.as_slice());
}

#[test]
fn orient_flips_every_face_of_an_inverted_cube() {
  let mut m = cube();
  m.flip();
  m.orient(None);
  assert!(m.isenvelope());
  // every face should now point outward again: surface area unaffected
  let original = cube();
  assert!((m.surface() - original.surface()).abs() < 1e-9);
}

#[test]
fn two_disjoint_tetrahedra_form_two_islands() {
  let points = vec![
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
    DVec3::new(0.0, 0.0, 1.0),
    DVec3::new(10.0, 0.0, 0.0),
    DVec3::new(11.0, 0.0, 0.0),
    DVec3::new(10.0, 1.0, 0.0),
    DVec3::new(10.0, 0.0, 1.0),
  ];
  let faces = vec![
    [0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2],
    [4, 5, 6], [4, 6, 7], [4, 7, 5], [5, 7, 6],
  ];
  let m = Mesh::<()>::from_faces(points, faces);
  let islands = m.islands();
  assert_eq!(islands.len(), 2);
  assert_eq!(islands[0].faces().len(), 4);
  assert_eq!(islands[1].faces().len(), 4);
}

#[test]
fn check_rejects_out_of_range_index() {
  let points = SharedBuf::new(vec![DVec3::ZERO, DVec3::X]);
  let groups = SharedBuf::new(vec![()]);
  let m = Mesh::new(points, vec![[0, 1, 5]], vec![0], groups);
  assert!(m.check().is_err());
}

#[test]
fn check_rejects_degenerate_face() {
  let points = SharedBuf::new(vec![DVec3::ZERO, DVec3::X, DVec3::Y]);
  let groups = SharedBuf::new(vec![()]);
  let m = Mesh::new(points, vec![[0, 0, 1]], vec![0], groups);
  assert!(m.check().is_err());
}

#[test]
fn groupnear_returns_nearest_faces_track_not_the_last_scanned() {
  // Two coplanar-but-separated triangles in different groups; the query
  // point sits right on top of the second one.
  let points = vec![
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
    DVec3::new(10.0, 0.0, 0.0),
    DVec3::new(11.0, 0.0, 0.0),
    DVec3::new(10.0, 1.0, 0.0),
  ];
  let faces = vec![[0u32, 1, 2], [3, 4, 5]];
  let points_buf = SharedBuf::new(points);
  let groups = SharedBuf::new(vec![(), ()]);
  let m = Mesh::new(points_buf, faces, vec![0, 1], groups);
  let (_, track) = m.groupnear(DVec3::new(10.2, 0.2, 0.0)).unwrap();
  assert_eq!(track, 1);
}

#[test]
fn splitgroups_duplicates_only_conflicted_points() {
  let mut m = cube();
  let before_points = m.points().len();
  m.splitgroups();
  // a cube with a single group has no conflicted points to duplicate
  assert_eq!(m.points().len(), before_points);
}

#[test]
fn frontiers_emits_only_the_shared_edge_between_two_groups() {
  // a unit square split into two triangles, each in its own group
  let points = SharedBuf::new(vec![
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(1.0, 1.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
  ]);
  let faces = vec![[0u32, 1, 2], [0, 2, 3]];
  let groups = SharedBuf::new(vec![(), ()]);
  let m = Mesh::new(points, faces, vec![0, 1], groups);

  let frontier = m.frontiers(None);
  assert_eq!(frontier.edges().len(), 1);
  assert_eq!(frontier.edges()[0], [0, 2]);
  assert_eq!(frontier.groups().len(), 1);
  assert_eq!(frontier.groups().get(0), (0, 1));
}

#[test]
fn frontiers_ignores_faces_outside_the_requested_group_subset() {
  let points = SharedBuf::new(vec![
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(1.0, 1.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
    DVec3::new(2.0, 0.0, 0.0),
  ]);
  // three faces, three groups: 0-1 share an edge, 1-2 share another
  let faces = vec![[0u32, 1, 2], [0, 2, 3], [1, 4, 2]];
  let groups = SharedBuf::new(vec![(), (), ()]);
  let m = Mesh::new(points, faces, vec![0, 1, 2], groups);

  // restricting to groups {0, 1} should hide the 1-2 frontier entirely
  let frontier = m.frontiers(Some(&[0, 1]));
  assert_eq!(frontier.edges().len(), 1);
  assert_eq!(frontier.groups().get(0), (0, 1));
}
