use super::*;
use glam::DVec3;

#[test]
fn point_set_dedups_within_a_cell() {
  let mut set = PointSet::new(1.0);
  let i = set.add(DVec3::new(0.1, 0.1, 0.1));
  let j = set.add(DVec3::new(0.2, 0.2, 0.2));
  assert_eq!(i, j);
  assert_eq!(set.points().len(), 1);
}

#[test]
fn point_set_keeps_points_in_different_cells() {
  let mut set = PointSet::new(1.0);
  let i = set.add(DVec3::new(0.1, 0.0, 0.0));
  let j = set.add(DVec3::new(1.5, 0.0, 0.0));
  assert_ne!(i, j);
  assert_eq!(set.points().len(), 2);
}

#[test]
fn point_set_remove_and_discard_mirror_add_keying() {
  let mut set = PointSet::new(1.0);
  let p = DVec3::new(0.4, 0.4, 0.4);
  set.add(p);
  assert!(set.contains(p));
  set.remove(p).unwrap();
  assert!(!set.contains(p));
  // discard on an absent point must not error
  set.discard(p);
  assert!(set.remove(p).is_err());
}

#[test]
fn position_map_point_roundtrip() {
  let mut map: PositionMap<&'static str> = PositionMap::new(1.0);
  map.add(Space::Point(DVec3::new(0.5, 0.5, 0.5)), "a");
  let got = map.get(Space::Point(DVec3::new(0.6, 0.6, 0.6)));
  assert_eq!(got, vec!["a"]);
}

#[test]
fn position_map_segment_spans_every_crossed_cell() {
  let keys = keysfor(
    Space::Segment(DVec3::new(0.0, 0.0, 0.0), DVec3::new(2.5, 0.0, 0.0)),
    1.0,
  );
  let xs: std::collections::HashSet<i64> = keys.iter().map(|k| k.0).collect();
  assert!(xs.contains(&0));
  assert!(xs.contains(&1));
  assert!(xs.contains(&2));
  assert!(keys.iter().all(|k| k.1 == 0 && k.2 == 0));
}

#[test]
fn position_map_triangle_keys_stay_within_bbox() {
  let a = DVec3::new(0.0, 0.0, 0.0);
  let b = DVec3::new(3.0, 0.0, 0.0);
  let c = DVec3::new(0.0, 3.0, 0.0);
  let keys = keysfor(Space::Triangle(a, b, c), 1.0);
  assert!(!keys.is_empty());
  for (x, y, z) in &keys {
    assert!(*x >= 0 && *x <= 2);
    assert!(*y >= 0 && *y <= 2);
    assert_eq!(*z, 0);
  }
  // The cell covering the right-angle corner must be present.
  assert!(keys.contains(&(0, 0, 0)));
}

#[test]
fn position_map_update_rejects_cellsize_mismatch() {
  let mut a: PositionMap<i32> = PositionMap::new(1.0);
  let b: PositionMap<i32> = PositionMap::new(2.0);
  assert!(a.update_from(&b).is_err());
}

#[test]
fn position_map_update_merges_matching_cellsize() {
  let mut a: PositionMap<i32> = PositionMap::new(1.0);
  let mut b: PositionMap<i32> = PositionMap::new(1.0);
  a.add(Space::Point(DVec3::new(0.1, 0.1, 0.1)), 1);
  b.add(Space::Point(DVec3::new(0.1, 0.1, 0.1)), 2);
  a.update_from(&b).unwrap();
  let mut got = a.get(Space::Point(DVec3::new(0.1, 0.1, 0.1)));
  got.sort();
  assert_eq!(got, vec![1, 2]);
}
