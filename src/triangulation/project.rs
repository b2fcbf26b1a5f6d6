//! Flattening a near-planar loop of 3D points into a 2D working plane.

use glam::{DVec2, DVec3};

use crate::error::{KernelError, Result};
use crate::numeric::{self, dirbase, DEFAULT_ALIGN};

/// Find a normal for `pts` by scanning for the first triple spanning a
/// parallelogram bigger than `thres`, rather than trusting the first three
/// points (which may be collinear on a loop with a long straight run).
pub fn guessbase(pts: &[DVec3], thres: f64) -> Result<DVec3> {
  if pts.len() < 3 {
    return Err(KernelError::precondition("need at least 3 points to guess a plane normal"));
  }
  let a = pts[0];
  for i in 1..pts.len() {
    for j in (i + 1)..pts.len() {
      let n = (pts[i] - a).cross(pts[j] - a);
      if n.length() > thres {
        return Ok(n.normalize());
      }
    }
  }
  Err(KernelError::topology("no three points of the loop span a plane"))
}

/// Project `pts` onto the plane orthogonal to `normal` (or a guessed one),
/// returning the 2D coordinates and the basis `(x, y, z)` used to produce
/// them (`z` is the plane normal). The projection is flipped about `x` if
/// needed so the loop reads counter-clockwise, matching the orientation
/// `triangulation_outline` assumes.
pub fn planeproject(pts: &[DVec3], normal: Option<DVec3>) -> Result<(Vec<DVec2>, (DVec3, DVec3, DVec3))> {
  let n = match normal {
    Some(n) if n.length() > numeric::NUMPREC => n.normalize(),
    _ => guessbase(pts, numeric::NUMPREC)?,
  };
  let (mut x, y, z) = dirbase(n, DEFAULT_ALIGN);
  let mut proj: Vec<DVec2> = pts.iter().map(|&p| DVec2::new(p.dot(x), p.dot(y))).collect();

  let count = proj.len();
  if count >= 3 {
    let leftmost = (0..count)
      .min_by(|&a, &b| {
        proj[a]
          .x
          .partial_cmp(&proj[b].x)
          .unwrap()
          .then(proj[a].y.partial_cmp(&proj[b].y).unwrap())
      })
      .unwrap();
    let prev = proj[(leftmost + count - 1) % count];
    let cur = proj[leftmost];
    let next = proj[(leftmost + 1) % count];
    if numeric::perpdot(cur - prev, next - cur) < 0.0 {
      // Flip both the projected coordinates and the basis vector they came
      // from, so `planeunproject` stays consistent with what's returned here.
      for p in proj.iter_mut() {
        p.x = -p.x;
      }
      x = -x;
    }
  }

  Ok((proj, (x, y, z)))
}

/// Lift a 2D point on the working plane back into 3D, given the basis
/// `planeproject` produced and the signed distance of the loop along `z`
/// (constant for a planar loop).
pub fn planeunproject(p: DVec2, basis: (DVec3, DVec3, DVec3), depth: f64) -> DVec3 {
  basis.0 * p.x + basis.1 * p.y + basis.2 * depth
}

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;
