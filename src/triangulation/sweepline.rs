//! Loop extraction and triangulation for outlines made of possibly several
//! closed loops: an outer boundary, its holes, and independent islands
//! nested inside those holes.
//!
//! This performs the outer/hole decomposition a full sweep-line monotone
//! partition would (classify each loop by nesting depth, pair every hole
//! with its immediate containing boundary) but skips the incremental
//! left-to-right sweep itself: loops are extracted first (via [`suites`]),
//! then classified by point-in-polygon containment against each other
//! rather than by tracking active edge clusters as a sweep line crosses
//! them. A hole is stitched into its containing boundary with a
//! nearest-vertex-pair bridge (a zero-width slit connecting the two loops
//! into one simple polygon) so the existing single-loop triangulators never
//! need to know about holes at all.

use std::collections::HashMap;

use glam::{DVec2, DVec3};

use crate::error::{KernelError, Result};
use crate::mesh::{suites, Mesh, Wire};
use crate::numeric;
use crate::shared::SharedBuf;

use super::dispatch::triangulation;
use super::project::guessbase;

/// Group `edges` into closed loops. Built on [`suites`] (oriented, no
/// cutting, loops only): when more than one unconsumed edge could close a
/// loop back to its start, the first one found in scan order wins, the
/// same policy every other consumer of `suites` in this crate uses.
///
/// Fails with [`KernelError::Topology`] if any chain never closes back to
/// its start (a dangling end or a branch point `suites` had to stop at) —
/// an edge set a sweep can't resolve into loops at all.
pub fn sweepline_loops(edges: &[(u32, u32)]) -> Result<Vec<Vec<u32>>> {
  let chains = suites(edges, true, false, true);
  let mut loops = Vec::with_capacity(chains.len());
  for mut chain in chains {
    if chain.len() < 2 || chain.first() != chain.last() {
      return Err(KernelError::topology(
        "sweep-line loop extraction found an edge that never closes into a loop (dangling end or branch point)",
      ));
    }
    chain.pop();
    if chain.len() < 3 {
      return Err(KernelError::topology(
        "sweep-line loop extraction found a degenerate loop with fewer than 3 points",
      ));
    }
    loops.push(chain);
  }
  Ok(loops)
}

fn signed_area2(proj: &[DVec2]) -> f64 {
  let n = proj.len();
  let mut a = 0.0;
  for i in 0..n {
    let p = proj[i];
    let q = proj[(i + 1) % n];
    a += p.x * q.y - q.x * p.y;
  }
  a
}

fn polygon_centroid(proj: &[DVec2]) -> DVec2 {
  proj.iter().fold(DVec2::ZERO, |acc, &p| acc + p) / proj.len() as f64
}

/// Even-odd point-in-polygon test (ray cast along +x from `pt`).
fn point_in_polygon(pt: DVec2, proj: &[DVec2]) -> bool {
  let n = proj.len();
  let mut inside = false;
  let mut j = n - 1;
  for i in 0..n {
    let (xi, yi) = (proj[i].x, proj[i].y);
    let (xj, yj) = (proj[j].x, proj[j].y);
    if (yi > pt.y) != (yj > pt.y) && pt.x < (xj - xi) * (pt.y - yi) / (yj - yi) + xi {
      inside = !inside;
    }
    j = i;
  }
  inside
}

/// A basis shared by every loop of one outline, so their projected
/// coordinates are directly comparable for nesting/containment tests
/// (unlike [`planeproject`], which may flip `x` per call to normalize a
/// single loop's winding — flipping it once per loop here would scramble
/// the relative orientation between loops).
fn shared_basis(points: &SharedBuf<DVec3>, loops: &[Vec<u32>], normal: Option<DVec3>) -> Result<(DVec3, DVec3, DVec3)> {
  match normal {
    Some(n) if n.length() > numeric::NUMPREC => Ok(numeric::dirbase(n.normalize(), numeric::DEFAULT_ALIGN)),
    _ => {
      let all: Vec<DVec3> = loops.iter().flatten().map(|&i| points.get(i as usize)).collect();
      let n = guessbase(&all, numeric::NUMPREC)?;
      Ok(numeric::dirbase(n, numeric::DEFAULT_ALIGN))
    }
  }
}

/// Bridge `hole` into `outer` via the nearest pair of vertices between
/// them, producing a single simple polygon that retraces the bridge edge
/// in both directions (a zero-width slit) rather than two independent
/// loops.
fn bridge(points: &SharedBuf<DVec3>, outer: &[u32], hole: &[u32]) -> Vec<u32> {
  let no = outer.len();
  let nh = hole.len();
  let mut best = (f64::INFINITY, 0usize, 0usize);
  for oi in 0..no {
    let op = points.get(outer[oi] as usize);
    for hi in 0..nh {
      let hp = points.get(hole[hi] as usize);
      let d2 = (op - hp).length_squared();
      if d2 < best.0 {
        best = (d2, oi, hi);
      }
    }
  }
  let (_, oi, hi) = best;
  let mut merged = Vec::with_capacity(no + nh + 2);
  merged.extend_from_slice(&outer[0..=oi]);
  for k in 0..=nh {
    merged.push(hole[(hi + k) % nh]);
  }
  merged.extend_from_slice(&outer[oi..]);
  merged
}

/// Classify `loops` by nesting depth (how many other loops' projections
/// contain its centroid), pair every odd-depth loop (a hole) with its
/// tightest even-depth container, and bridge each hole into its container.
/// Even-depth loops with no hole children (including islands nested two
/// levels deep inside another boundary's hole) come back unchanged.
fn organize_and_bridge(points: &SharedBuf<DVec3>, loops: &[Vec<u32>], proj: &[Vec<DVec2>]) -> Result<Vec<Vec<u32>>> {
  let n = loops.len();
  let areas: Vec<f64> = proj.iter().map(|p| signed_area2(p).abs()).collect();
  let centroids: Vec<DVec2> = proj.iter().map(|p| polygon_centroid(p)).collect();

  let mut depth = vec![0usize; n];
  for i in 0..n {
    for j in 0..n {
      if i != j && point_in_polygon(centroids[i], &proj[j]) {
        depth[i] += 1;
      }
    }
  }

  let mut parent: Vec<Option<usize>> = vec![None; n];
  for i in 0..n {
    if depth[i] == 0 {
      continue;
    }
    let mut best: Option<(f64, usize)> = None;
    for j in 0..n {
      if i != j && depth[j] + 1 == depth[i] && point_in_polygon(centroids[i], &proj[j]) {
        if best.map(|(a, _)| areas[j] < a).unwrap_or(true) {
          best = Some((areas[j], j));
        }
      }
    }
    parent[i] = best.map(|(_, j)| j);
    if parent[i].is_none() {
      return Err(KernelError::topology(
        "sweep-line: a nested loop has no single consistent container (self-intersecting or ambiguous outline)",
      ));
    }
  }

  let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
  for i in 0..n {
    if depth[i] % 2 == 1 {
      children.entry(parent[i].unwrap()).or_default().push(i);
    }
  }

  let mut out = Vec::new();
  for i in 0..n {
    if depth[i] % 2 == 0 {
      let mut merged = loops[i].clone();
      if let Some(holes) = children.get(&i) {
        for &h in holes {
          merged = bridge(points, &merged, &loops[h]);
        }
      }
      out.push(merged);
    }
  }
  Ok(out)
}

/// Triangulate an outline that may decompose into an outer boundary, its
/// holes, and islands nested inside those holes, merging every piece into
/// one mesh sharing `points`'s buffer.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "triangulation_sweepline"))]
pub fn triangulation_sweepline<G: Clone>(
  points: SharedBuf<DVec3>,
  edges: &[(u32, u32)],
  normal: Option<DVec3>,
  groups: SharedBuf<G>,
) -> Result<Mesh<G>> {
  let loops = sweepline_loops(edges)?;
  let basis = shared_basis(&points, &loops, normal)?;
  let proj: Vec<Vec<DVec2>> = loops
    .iter()
    .map(|indices| {
      indices
        .iter()
        .map(|&i| {
          let p = points.get(i as usize);
          DVec2::new(p.dot(basis.0), p.dot(basis.1))
        })
        .collect()
    })
    .collect();
  let pieces = organize_and_bridge(&points, &loops, &proj)?;

  let mut faces = Vec::new();
  for indices in &pieces {
    let wire = Wire::<G>::new(points.clone(), indices.clone(), vec![0; indices.len()], groups.clone());
    let mesh = triangulation(&wire, normal)?;
    faces.extend(mesh.faces().iter().copied());
  }

  let ntracks = faces.len();
  Ok(Mesh::new(points, faces, vec![0; ntracks], groups))
}

#[cfg(test)]
#[path = "sweepline_test.rs"]
mod sweepline_test;
