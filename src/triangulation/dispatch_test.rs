use super::*;
use crate::shared::SharedBuf;
use glam::DVec3;

#[test]
fn dispatcher_ear_clips_a_well_formed_square() {
  let points = SharedBuf::new(vec![
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(1.0, 1.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
  ]);
  let wire = Wire::<()>::from_indices(points, vec![0, 1, 2, 3]);
  let mesh = triangulation(&wire, Some(DVec3::Z)).unwrap();
  assert_eq!(mesh.faces().len(), 2);
}

#[test]
fn dispatcher_handles_an_already_closed_wire() {
  let points = SharedBuf::new(vec![
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
  ]);
  let mut wire = Wire::<()>::from_indices(points, vec![0, 1, 2]);
  wire.close();
  let mesh = triangulation(&wire, Some(DVec3::Z)).unwrap();
  assert_eq!(mesh.faces().len(), 1);
}
