//! Ear-clipping triangulation of a simple, closed, near-planar loop.

use glam::DVec2;

use crate::error::{KernelError, Result};
use crate::mesh::Mesh;
use crate::numeric::{self, perpdot};
use crate::shared::SharedBuf;

use super::project::planeproject;

/// Score of the ear candidate spanning `u = next - apex`, `v = prev - apex`:
/// `perpdot(u, v) / (|u| + |v| + |u - v|)^2`. Positive for a convex,
/// well-shaped ear; degrades toward zero for slivers; negative for a
/// reflex (concave) vertex.
pub fn aesthetic(u: DVec2, v: DVec2) -> f64 {
  let denom = u.length() + v.length() + (u - v).length();
  if denom <= numeric::NUMPREC {
    return f64::NEG_INFINITY;
  }
  perpdot(u, v) / (denom * denom)
}

/// Barycentric-ish coordinates of `w` in the basis `(u, v)`: `w = a*u + b*v`.
/// `None` if `u` and `v` are (numerically) collinear.
fn solve2(u: DVec2, v: DVec2, w: DVec2) -> Option<(f64, f64)> {
  let det = u.x * v.y - u.y * v.x;
  if det.abs() <= numeric::NUMPREC {
    return None;
  }
  let a = (w.x * v.y - w.y * v.x) / det;
  let b = (u.x * w.y - u.y * w.x) / det;
  Some((a, b))
}

/// Ear-clip a simple, closed, near-planar loop of point indices into a
/// triangle fan over the same point buffer the loop's indices reference.
///
/// At each step the remaining vertex maximizing [`aesthetic`] is clipped,
/// after rejecting any candidate whose triangle contains another live
/// vertex of the loop. If the best remaining candidate still scores
/// negative (a self-intersecting or degenerate loop slipped through), a
/// warning is emitted and clipping proceeds anyway rather than failing —
/// callers wanting a hard failure on ill-formed loops should validate with
/// [`Wire::check`](crate::mesh::Wire::check) first.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "triangulation_outline"))]
pub fn triangulation_outline<G: Clone>(
  points: SharedBuf<glam::DVec3>,
  loop_indices: &[u32],
  normal: Option<glam::DVec3>,
  groups: SharedBuf<G>,
) -> Result<Mesh<G>> {
  let n = loop_indices.len();
  if n < 3 {
    return Err(KernelError::precondition("a loop needs at least 3 points to triangulate"));
  }

  let pts3d: Vec<glam::DVec3> = points.with(|buf| loop_indices.iter().map(|&i| buf[i as usize]).collect());
  let (proj, _basis) = planeproject(&pts3d, normal)?;

  if n == 3 {
    return Ok(Mesh::new(points, vec![[loop_indices[0], loop_indices[1], loop_indices[2]]], vec![0], groups));
  }

  let mut prev: Vec<usize> = (0..n).map(|i| (i + n - 1) % n).collect();
  let mut next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
  let mut alive = vec![true; n];

  let score = |i: usize, prev: &[usize], next: &[usize], alive: &[bool]| -> f64 {
    let apex = proj[i];
    let u = proj[next[i]] - apex;
    let v = proj[prev[i]] - apex;
    let base = aesthetic(u, v);
    if base == f64::NEG_INFINITY {
      return base;
    }
    let mut j = next[next[i]];
    while j != prev[i] {
      if alive[j] {
        let w = proj[j] - apex;
        if let Some((a, b)) = solve2(u, v, w) {
          if a > numeric::NUMPREC && b > numeric::NUMPREC && a + b < 1.0 - numeric::NUMPREC {
            return f64::NEG_INFINITY;
          }
        }
      }
      j = next[j];
    }
    base
  };

  let mut scores: Vec<f64> = (0..n).map(|i| score(i, &prev, &next, &alive)).collect();
  let mut remaining = n;
  let mut faces = Vec::with_capacity(n - 2);

  while remaining > 3 {
    let best = (0..n)
      .filter(|&i| alive[i])
      .max_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap())
      .unwrap();

    if scores[best] == f64::NEG_INFINITY {
      // every live candidate is either degenerate or contains another live
      // vertex: no ear can be clipped without producing a bogus triangle.
      return Err(KernelError::topology(
        "ear-clipping stalled: no remaining vertex can be clipped without crossing the loop",
      ));
    }
    if scores[best] < -numeric::NUMPREC {
      #[cfg(feature = "tracing")]
      tracing::warn!(score = scores[best], "ear-clip: best candidate has a negative aesthetic score; loop may self-intersect");
    }

    let p = prev[best];
    let nx = next[best];
    faces.push([loop_indices[p], loop_indices[best], loop_indices[nx]]);
    alive[best] = false;
    next[p] = nx;
    prev[nx] = p;
    remaining -= 1;

    scores[p] = score(p, &prev, &next, &alive);
    scores[nx] = score(nx, &prev, &next, &alive);
  }

  let last: Vec<usize> = (0..n).filter(|&i| alive[i]).collect();
  faces.push([loop_indices[last[0]], loop_indices[last[1]], loop_indices[last[2]]]);

  let ntracks = faces.len();
  Ok(Mesh::new(points, faces, vec![0; ntracks], groups))
}

#[cfg(test)]
#[path = "earclip_test.rs"]
mod earclip_test;
