//! Piecewise-linear geometry containers (`Mesh`, `Web`, `Wire`) and the
//! topology algorithms that operate on them.

mod connectivity;
mod distance;
mod mesh_type;
mod web;
mod wire;

pub use connectivity::{connef, connexity, connpe, connpp, edgekey, lineedges, suites, Suite};
pub use distance::{distance2_pm, mesh_distance, Primitive};
pub(crate) use distance::point_triangle_dist2;
pub use mesh_type::Mesh;
pub use web::Web;
pub use wire::Wire;

use glam::DVec3;

use crate::error::{KernelError, Result};
use crate::hashing::PointSet;
use crate::numeric::{self, Aabb};
use crate::shared::SharedBuf;

/// Sentinel marking "no point"/"not yet visited" wherever an index would
/// otherwise be expected; mirrors the source's use of an out-of-range index
/// as a cheap optional without widening every index field to `Option<u32>`.
pub const NONE: u32 = u32::MAX;

/// Operations common to `Mesh`, `Web` and `Wire`: ownership of a shared
/// point buffer, coordinate transforms, precision, and bounding box.
pub trait PointContainer {
  fn points(&self) -> &SharedBuf<DVec3>;
  fn points_mut(&mut self) -> &mut SharedBuf<DVec3>;

  /// Every point index this container's topology actually references, in
  /// no particular order (used by `strippoints`/`precision`/`box_`).
  fn used_points(&self) -> Vec<u32>;

  /// Largest absolute coordinate over every used point; 0 for an empty
  /// container. Used to scale a relative merge/compare precision.
  fn maxabs(&self) -> f64 {
    let used = self.used_points();
    self.points().with(|pts| {
      used
        .iter()
        .map(|&i| numeric::norminf(pts[i as usize]))
        .fold(0.0_f64, f64::max)
    })
  }

  /// Absolute merge distance suggested for this container's scale:
  /// `maxabs * NUMPREC`, floored at a tiny epsilon so a container with all
  /// points near the origin doesn't get a zero tolerance.
  fn precision(&self) -> f64 {
    (self.maxabs() * numeric::NUMPREC).max(numeric::NUMPREC)
  }

  fn bbox(&self) -> Aabb {
    let used = self.used_points();
    self.points().with(|pts| {
      let mut b = Aabb::empty();
      for &i in &used {
        b.encapsulate(pts[i as usize]);
      }
      b
    })
  }

  /// Apply an affine transform to every point this container's topology
  /// references. If the point buffer is shared with another container
  /// that must not move, the caller is expected to `strippoints` or clone
  /// first — this method mutates in place.
  fn transform(&mut self, f: impl Fn(DVec3) -> DVec3) {
    let used = self.used_points();
    let mut snapshot = self.points().snapshot();
    for &i in &used {
      snapshot[i as usize] = f(snapshot[i as usize]);
    }
    self.points().replace(snapshot);
  }

  /// Look up the index of `pt` in the shared buffer, returning the
  /// existing index if one matches within `limit`, else appending it.
  /// Shared among containers that want to deduplicate while constructing
  /// (callers needing a full `mergeclose` pass should use that instead).
  fn usepointat(&mut self, pt: DVec3, limit: f64) -> u32 {
    let found = self.points().with(|pts| {
      pts
        .iter()
        .position(|&p| (p - pt).length() <= limit)
        .map(|i| i as u32)
    });
    match found {
      Some(i) => i,
      None => self.points().push(pt) as u32,
    }
  }

  fn pointat(&self, i: u32) -> DVec3 {
    self.points().get(i as usize)
  }
}

/// Build a `PointSet`-based remap for a point buffer, merging any two
/// points closer than `limit`. Returns the remap (old index -> new index)
/// and the compacted point buffer.
pub(crate) fn mergeclose_remap(points: &[DVec3], limit: f64) -> (Vec<u32>, Vec<DVec3>) {
  let cellsize = limit.max(numeric::NUMPREC);
  let mut set = PointSet::new(cellsize);
  let mut remap = Vec::with_capacity(points.len());
  for &p in points {
    remap.push(set.add(p) as u32);
  }
  (remap, set.points().to_vec())
}

/// Compact a point buffer down to only the entries `used` references,
/// returning a remap from old index to new index (entries not in `used`
/// map to [`NONE`]).
pub(crate) fn strip_remap(len: usize, used: &[u32]) -> Vec<u32> {
  let mut remap = vec![NONE; len];
  let mut sorted = used.to_vec();
  sorted.sort_unstable();
  sorted.dedup();
  for (new_i, &old_i) in sorted.iter().enumerate() {
    remap[old_i as usize] = new_i as u32;
  }
  remap
}

pub(crate) fn check_index(i: u32, len: usize, what: &str) -> Result<()> {
  if (i as usize) < len {
    Ok(())
  } else {
    Err(KernelError::topology(format!(
      "{what} index {i} out of range (buffer has {len} points)"
    )))
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
