use super::*;
use glam::DVec3;

#[test]
fn guessbase_finds_the_normal_of_a_flat_triangle() {
  let pts = vec![DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 1.0, 0.0)];
  let n = guessbase(&pts, 1e-9).unwrap();
  assert!((n.dot(DVec3::Z).abs() - 1.0).abs() < 1e-9);
}

#[test]
fn guessbase_rejects_collinear_points() {
  let pts = vec![DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0), DVec3::new(2.0, 0.0, 0.0)];
  assert!(guessbase(&pts, 1e-9).is_err());
}

#[test]
fn planeproject_roundtrips_through_planeunproject() {
  let pts = vec![
    DVec3::new(1.0, 0.0, 5.0),
    DVec3::new(0.0, 1.0, 5.0),
    DVec3::new(-1.0, 0.0, 5.0),
    DVec3::new(0.0, -1.0, 5.0),
  ];
  let (proj, basis) = planeproject(&pts, Some(DVec3::Z)).unwrap();
  for (i, &p) in pts.iter().enumerate() {
    let back = planeunproject(proj[i], basis, 5.0);
    assert!((back - p).length() < 1e-9);
  }
}

#[test]
fn planeproject_produces_a_counter_clockwise_loop() {
  // deliberately wound clockwise as given
  let pts = vec![
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
    DVec3::new(1.0, 1.0, 0.0),
    DVec3::new(1.0, 0.0, 0.0),
  ];
  let (proj, _) = planeproject(&pts, Some(DVec3::Z)).unwrap();
  let n = proj.len();
  let mut area2 = 0.0;
  for i in 0..n {
    let a = proj[i];
    let b = proj[(i + 1) % n];
    area2 += a.x * b.y - b.x * a.y;
  }
  assert!(area2 > 0.0);
}
