use super::*;
use glam::DVec3;

#[test]
fn strip_remap_compacts_and_marks_unused_as_none() {
  let remap = strip_remap(5, &[0, 2, 2, 4]);
  assert_eq!(remap[0], 0);
  assert_eq!(remap[2], 1);
  assert_eq!(remap[4], 2);
  assert_eq!(remap[1], NONE);
  assert_eq!(remap[3], NONE);
}

#[test]
fn mergeclose_remap_collapses_coincident_points() {
  let points = vec![DVec3::ZERO, DVec3::new(1e-14, 0.0, 0.0), DVec3::new(5.0, 0.0, 0.0)];
  let (remap, compacted) = mergeclose_remap(&points, 1e-9);
  assert_eq!(remap[0], remap[1]);
  assert_ne!(remap[0], remap[2]);
  assert_eq!(compacted.len(), 2);
}

#[test]
fn check_index_reports_out_of_range() {
  assert!(check_index(3, 3, "test").is_err());
  assert!(check_index(2, 3, "test").is_ok());
}

#[test]
fn precision_and_bbox_on_a_simple_mesh() {
  let m = Mesh::<()>::from_faces(
    vec![DVec3::new(0.0, 0.0, 0.0), DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 2.0, 0.0)],
    vec![[0, 1, 2]],
  );
  assert!(m.precision() > 0.0);
  let b = m.bbox();
  assert_eq!(b.min, DVec3::ZERO);
  assert_eq!(b.max, DVec3::new(2.0, 2.0, 0.0));
}
