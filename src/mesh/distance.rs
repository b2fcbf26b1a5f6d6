//! Point-to-mesh distance and the nearest-primitive classification it
//! reports, plus the symmetric mesh-to-mesh distance built on top of it.

use glam::DVec3;

use super::{Mesh, NONE};

/// The mesh feature nearest a query point: a vertex, an edge, or the
/// interior of a face, each carrying the global point indices involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
  Point(u32),
  Edge(u32, u32),
  Face(u32, u32, u32),
}

#[derive(Clone, Copy)]
enum TriFeature {
  A,
  B,
  C,
  Ab,
  Bc,
  Ac,
  Face,
}

impl TriFeature {
  fn to_primitive(self, face: [u32; 3]) -> Primitive {
    let [a, b, c] = face;
    match self {
      TriFeature::A => Primitive::Point(a),
      TriFeature::B => Primitive::Point(b),
      TriFeature::C => Primitive::Point(c),
      TriFeature::Ab => Primitive::Edge(a, b),
      TriFeature::Bc => Primitive::Edge(b, c),
      TriFeature::Ac => Primitive::Edge(a, c),
      TriFeature::Face => Primitive::Face(a, b, c),
    }
  }
}

/// Closest point on triangle `(a, b, c)` to `p`, and which feature of the
/// triangle it lies on. Standard region-based closest-point-on-triangle
/// construction (Ericson, *Real-Time Collision Detection*).
fn closest_on_triangle(p: DVec3, a: DVec3, b: DVec3, c: DVec3) -> (DVec3, TriFeature) {
  let ab = b - a;
  let ac = c - a;
  let ap = p - a;
  let d1 = ab.dot(ap);
  let d2 = ac.dot(ap);
  if d1 <= 0.0 && d2 <= 0.0 {
    return (a, TriFeature::A);
  }

  let bp = p - b;
  let d3 = ab.dot(bp);
  let d4 = ac.dot(bp);
  if d3 >= 0.0 && d4 <= d3 {
    return (b, TriFeature::B);
  }

  let vc = d1 * d4 - d3 * d2;
  if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
    let v = d1 / (d1 - d3);
    return (a + ab * v, TriFeature::Ab);
  }

  let cp = p - c;
  let d5 = ab.dot(cp);
  let d6 = ac.dot(cp);
  if d6 >= 0.0 && d5 <= d6 {
    return (c, TriFeature::C);
  }

  let vb = d5 * d2 - d1 * d6;
  if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
    let w = d2 / (d2 - d6);
    return (a + ac * w, TriFeature::Ac);
  }

  let va = d3 * d6 - d5 * d4;
  if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
    let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
    return (b + (c - b) * w, TriFeature::Bc);
  }

  let denom = 1.0 / (va + vb + vc);
  let v = vb * denom;
  let w = vc * denom;
  (a + ab * v + ac * w, TriFeature::Face)
}

/// Squared distance from `p` to triangle `(a, b, c)`, without reporting
/// which feature it landed on. Used where only the distance is needed
/// (e.g. `Mesh::groupnear`'s per-face scan).
pub(crate) fn point_triangle_dist2(p: DVec3, a: DVec3, b: DVec3, c: DVec3) -> f64 {
  let (closest, _) = closest_on_triangle(p, a, b, c);
  (closest - p).length_squared()
}

/// Squared distance from `point` to `mesh`, and the nearest primitive.
///
/// Implemented as a single accumulator pass over the faces, tracking only
/// the running best distance and primitive, per the accumulator form of
/// this computation (the alternative of collecting every per-face distance
/// before reducing needlessly holds the whole mesh's distances in memory).
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn distance2_pm<G>(point: DVec3, mesh: &Mesh<G>) -> (f64, Primitive) {
  let mut best_d2 = f64::INFINITY;
  let mut best = Primitive::Point(NONE);
  for face in mesh.faces() {
    let a = mesh.pointat(face[0]);
    let b = mesh.pointat(face[1]);
    let c = mesh.pointat(face[2]);
    let (closest, feature) = closest_on_triangle(point, a, b, c);
    let d2 = (closest - point).length_squared();
    if d2 < best_d2 {
      best_d2 = d2;
      best = feature.to_primitive(*face);
    }
  }
  (best_d2, best)
}

/// Symmetric distance between two meshes: the minimum, over every used
/// point of either mesh, of its distance to the other mesh.
pub fn mesh_distance<G, H>(a: &Mesh<G>, b: &Mesh<H>) -> f64 {
  let mut best = f64::INFINITY;
  for p in a.used_point_coords() {
    let (d2, _) = distance2_pm(p, b);
    if d2 < best {
      best = d2;
    }
  }
  for p in b.used_point_coords() {
    let (d2, _) = distance2_pm(p, a);
    if d2 < best {
      best = d2;
    }
  }
  best.sqrt()
}

#[cfg(test)]
#[path = "distance_test.rs"]
mod distance_test;
