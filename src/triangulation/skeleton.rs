//! Straight-skeleton triangulation, used as the `triangulation_outline`
//! fallback when ear-clipping can't make progress (e.g. a loop whose best
//! remaining ear always contains another vertex).
//!
//! This computes a simplified straight skeleton: at each step the nearest
//! pair of adjacent angle-bisector rays is collapsed into one new interior
//! vertex, emitting the three triangles fanned from it over its former
//! neighbors. Collapsing continues until the loop has shrunk to a single
//! triangle. A post-pass then merges interior "bones" shorter than half the
//! shortest bone rooted at an original vertex, folding slivers the collapse
//! order leaves behind back into their parent vertex.

use std::collections::HashMap;

use glam::DVec2;

use crate::error::{KernelError, Result};
use crate::mesh::Mesh;
use crate::numeric;
use crate::shared::SharedBuf;

use super::project::{planeproject, planeunproject};

struct Node {
  pos: DVec2,
  dir: DVec2,
  prev: usize,
  next: usize,
  alive: bool,
  /// `Some(point_index)` for a vertex of the original loop.
  original: Option<u32>,
}

fn inward_normal(edge: DVec2) -> DVec2 {
  let n = numeric::perp(edge);
  if n.length() > numeric::NUMPREC {
    n.normalize()
  } else {
    DVec2::ZERO
  }
}

fn bisector(nodes: &[Node], i: usize) -> DVec2 {
  let p = nodes[i].prev;
  let nx = nodes[i].next;
  let e_in = inward_normal(nodes[i].pos - nodes[p].pos);
  let e_out = inward_normal(nodes[nx].pos - nodes[i].pos);
  let sum = e_in + e_out;
  if sum.length() > numeric::NUMPREC {
    sum.normalize()
  } else {
    e_in
  }
}

/// Intersection parameters `(t, s)` of ray `a.pos + t*a.dir` with ray
/// `b.pos + s*b.dir`; `None` if the rays are parallel or either parameter
/// would be negative (the rays diverge rather than meet ahead).
fn ray_intersection(a: &Node, b: &Node) -> Option<(f64, DVec2)> {
  let det = a.dir.x * (-b.dir.y) - a.dir.y * (-b.dir.x);
  if det.abs() <= numeric::NUMPREC {
    return None;
  }
  let rhs = b.pos - a.pos;
  let t = (rhs.x * (-b.dir.y) - rhs.y * (-b.dir.x)) / det;
  let s = (a.dir.x * rhs.y - a.dir.y * rhs.x) / det;
  if t >= -numeric::NUMPREC && s >= -numeric::NUMPREC {
    Some((t, a.pos + a.dir * t))
  } else {
    None
  }
}

/// Compute the skeleton's collapse sequence for a loop already living in the
/// 2D working plane, returning the emitted triangles (as local node indices,
/// original vertices identified, interior ones by a synthetic index offset
/// by `n`) and each interior vertex's creation position plus the length of
/// the shorter of its two parent bones.
fn skeleting(proj: &[DVec2]) -> (Vec<[usize; 3]>, Vec<(DVec2, f64, [usize; 2])>) {
  let n = proj.len();
  let mut nodes: Vec<Node> = (0..n)
    .map(|i| Node {
      pos: proj[i],
      dir: DVec2::ZERO,
      prev: (i + n - 1) % n,
      next: (i + 1) % n,
      alive: true,
      original: Some(i as u32),
    })
    .collect();
  for i in 0..n {
    nodes[i].dir = bisector(&nodes, i);
  }

  let mut faces: Vec<[usize; 3]> = Vec::new();
  let mut interior: Vec<(DVec2, f64, [usize; 2])> = Vec::new();
  let mut remaining = n;

  while remaining > 3 {
    let mut best: Option<(f64, usize, DVec2)> = None;
    for i in 0..nodes.len() {
      if !nodes[i].alive {
        continue;
      }
      let j = nodes[i].next;
      if let Some((t, point)) = ray_intersection(&nodes[i], &nodes[j]) {
        if best.map(|(bt, _, _)| t < bt).unwrap_or(true) {
          best = Some((t, i, point));
        }
      }
    }
    let Some((_, i, point)) = best else {
      break;
    };
    let j = nodes[i].next;
    let p = nodes[i].prev;
    let nx = nodes[j].next;

    let bone_i = (point - nodes[i].pos).length();
    let bone_j = (point - nodes[j].pos).length();

    let new_index = nodes.len();
    nodes.push(Node {
      pos: point,
      dir: DVec2::ZERO,
      prev: p,
      next: nx,
      alive: true,
      original: None,
    });
    nodes[i].alive = false;
    nodes[j].alive = false;
    nodes[p].next = new_index;
    nodes[nx].prev = new_index;
    nodes[new_index].dir = bisector(&nodes, new_index);

    faces.push([p, i, new_index]);
    faces.push([i, j, new_index]);
    faces.push([j, nx, new_index]);

    interior.push((point, bone_i.min(bone_j), [i, j]));
    remaining -= 1;
  }

  // close out whatever is left (3 or fewer survivors, or a stalled collapse)
  let survivors: Vec<usize> = (0..nodes.len()).filter(|&i| nodes[i].alive).collect();
  if survivors.len() == 3 {
    faces.push([survivors[0], survivors[1], survivors[2]]);
  }

  (faces, interior)
}

/// Resolve `node` through `remap` to its final representative, with path
/// compression.
fn resolve(remap: &mut HashMap<usize, usize>, node: usize) -> usize {
  let mut root = node;
  while let Some(&next) = remap.get(&root) {
    if next == root {
      break;
    }
    root = next;
  }
  remap.insert(node, root);
  root
}

/// Run [`skeleting`] on `proj` and return the triangle list with local node
/// indices already resolved through the "merge bones shorter than half the
/// shortest original-rooted bone" post-process, plus each surviving
/// interior vertex's final 2D position (in the order they must be appended
/// to the output point buffer).
fn skeleton(proj: &[DVec2]) -> (Vec<[usize; 3]>, Vec<DVec2>) {
  let n = proj.len();
  let (faces, interior) = skeleting(proj);

  let minbone = interior
    .iter()
    .filter(|&&(_, _, [a, b])| a < n || b < n)
    .map(|&(_, len, _)| len)
    .fold(f64::INFINITY, f64::min);

  let mut remap: HashMap<usize, usize> = HashMap::new();
  if minbone.is_finite() {
    let threshold = minbone * 0.5;
    for (k, &(_, len, parents)) in interior.iter().enumerate() {
      let idx = n + k;
      if len < threshold {
        // fold into whichever parent is closer to an original vertex.
        let target = parents.into_iter().min().unwrap();
        remap.insert(idx, target);
      }
    }
  }

  let mut positions: HashMap<usize, DVec2> = HashMap::new();
  for (k, &(pos, _, _)) in interior.iter().enumerate() {
    positions.insert(n + k, pos);
  }

  let mut kept_order: Vec<usize> = Vec::new();
  let mut final_index: HashMap<usize, usize> = HashMap::new();
  let mut remapped_faces = Vec::with_capacity(faces.len());
  for f in &faces {
    let mut out = [0usize; 3];
    for (slot, &v) in f.iter().enumerate() {
      let root = resolve(&mut remap, v);
      let resolved = if root < n {
        root
      } else {
        *final_index.entry(root).or_insert_with(|| {
          kept_order.push(root);
          n + kept_order.len() - 1
        })
      };
      out[slot] = resolved;
    }
    remapped_faces.push(out);
  }
  remapped_faces.retain(|f| f[0] != f[1] && f[1] != f[2] && f[2] != f[0]);

  let kept_positions: Vec<DVec2> = kept_order.iter().map(|idx| positions[idx]).collect();
  (remapped_faces, kept_positions)
}

/// Triangulate a simple, closed, near-planar loop with the straight-skeleton
/// fallback. Unlike [`triangulation_outline`](super::earclip::triangulation_outline),
/// this always succeeds on a non-self-intersecting loop (it never rejects a
/// candidate for "containing" another vertex), at the cost of slimmer,
/// less aesthetic triangles near reflex corners.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "triangulation_skeleton"))]
pub fn triangulation_skeleton<G: Clone>(
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
  let (proj, basis) = planeproject(&pts3d, normal)?;
  let depth = pts3d[0].dot(basis.2);

  let (faces, interior_positions) = skeleton(&proj);
  if faces.is_empty() {
    return Err(KernelError::algorithm_failure("straight-skeleton collapse produced no triangles"));
  }

  let base = points.len();
  points.extend(interior_positions.iter().map(|&p| planeunproject(p, basis, depth)));

  let resolve_vertex = |local: usize| -> u32 {
    if local < n {
      loop_indices[local]
    } else {
      (base + (local - n)) as u32
    }
  };

  let out_faces: Vec<[u32; 3]> = faces
    .iter()
    .map(|f| [resolve_vertex(f[0]), resolve_vertex(f[1]), resolve_vertex(f[2])])
    .collect();
  let ntracks = out_faces.len();
  Ok(Mesh::new(points, out_faces, vec![0; ntracks], groups))
}

#[cfg(test)]
#[path = "skeleton_test.rs"]
mod skeleton_test;
