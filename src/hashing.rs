//! Spatial hashing: [`PositionMap`] associates arbitrary objects with the
//! region of space their geometry occupies; [`PointSet`] deduplicates
//! coincident points by snapping them onto the same voxel cell.
//!
//! Both are grids of cubic cells of side `cellsize`; cell `k` (an integer
//! triple) owns the half-open box `[k * cellsize, (k + 1) * cellsize)`.

use std::collections::HashMap;

use glam::DVec3;

use crate::error::{KernelError, Result};

/// Integer coordinate of a grid cell.
pub type CellKey = (i64, i64, i64);

/// A primitive that can be rasterized into grid cells.
#[derive(Clone, Copy, Debug)]
pub enum Space {
  Point(DVec3),
  Segment(DVec3, DVec3),
  Triangle(DVec3, DVec3, DVec3),
}

#[inline]
fn cell_of(p: DVec3, cellsize: f64) -> CellKey {
  (
    (p.x / cellsize).floor() as i64,
    (p.y / cellsize).floor() as i64,
    (p.z / cellsize).floor() as i64,
  )
}

/// Python-style floored modulo (`a - floor(a/b)*b`), used to mirror the
/// source rasterizer's `x % cellsize` which always returns a non-negative
/// result, unlike Rust's `%`.
#[inline]
fn floor_mod(a: f64, b: f64) -> f64 {
  a - (a / b).floor() * b
}

/// Rasterize `space` into the sequence of cell keys it occupies.
///
/// Point: the single containing cell.
///
/// Segment: DDA walk along the normalized direction, stepping to whichever
/// axis reaches its next cell boundary first and emitting the cell of the
/// midpoint of each step (this, rather than the step's start or end point,
/// is what keeps the walk from missing cells the segment only clips a
/// corner of).
///
/// Triangle: permute axes so the face normal's dominant component lands on
/// Z, then sweep cell-sized slices in X, find the Y-interval the triangle's
/// edges carve out of each slice, and for each (x, y) cell evaluate the
/// triangle's plane at all four corners to get the Z-interval, finally
/// dropping any cell whose center falls outside the triangle's bounding
/// box.
pub fn keysfor(space: Space, cellsize: f64) -> Vec<CellKey> {
  match space {
    Space::Point(p) => vec![cell_of(p, cellsize)],
    Space::Segment(a, b) => segment_keys(a, b, cellsize),
    Space::Triangle(a, b, c) => triangle_keys(a, b, c, cellsize),
  }
}

fn segment_keys(a: DVec3, b: DVec3, cellsize: f64) -> Vec<CellKey> {
  let mut keys = Vec::new();
  let dir = b - a;
  let len = dir.length();
  if len < crate::numeric::NUMPREC {
    keys.push(cell_of(a, cellsize));
    return keys;
  }
  let v = dir / len;
  let mut p = a;
  keys.push(cell_of(p, cellsize));

  // Guard against pathological infinite loops from numeric noise: a segment
  // can cross at most this many cells.
  let max_steps = (len / cellsize).ceil() as usize * 3 + 8;
  let mut steps = 0;
  while (b - p).dot(v) >= 0.0 {
    let prox = DVec3::new(
      proximity(p.x, v.x, cellsize),
      proximity(p.y, v.y, cellsize),
      proximity(p.z, v.z, cellsize),
    );
    let mut i = 0;
    if prox.y < prox[i] {
      i = 1;
    }
    if prox.z < prox[i] {
      i = 2;
    }
    let step = v * prox[i];
    keys.push(cell_of(p + step * 0.5, cellsize));
    p += step;
    steps += 1;
    if steps > max_steps {
      break;
    }
  }
  keys
}

#[inline]
fn proximity(p: f64, v: f64, cellsize: f64) -> f64 {
  if v == 0.0 {
    f64::INFINITY
  } else {
    ((cellsize - floor_mod(p, cellsize)) / v).abs()
  }
}

fn triangle_keys(a: DVec3, b: DVec3, c: DVec3, cellsize: f64) -> Vec<CellKey> {
  let raw = [a, b, c];
  let normal_abs = (b - a).cross(c - a).abs();
  // Permutation sending the dominant normal axis to Z.
  let order: [usize; 3] = if normal_abs.y >= normal_abs.x && normal_abs.y >= normal_abs.z {
    [2, 0, 1]
  } else if normal_abs.x >= normal_abs.y && normal_abs.x >= normal_abs.z {
    [1, 2, 0]
  } else {
    [0, 1, 2]
  };
  let permute = |p: DVec3| DVec3::new(p[order[0]], p[order[1]], p[order[2]]);
  let pts = [permute(raw[0]), permute(raw[1]), permute(raw[2])];

  let v = [pts[2] - pts[1], pts[0] - pts[2], pts[1] - pts[0]];
  let n = v[0].cross(v[1]);
  if n.z.abs() < crate::numeric::NUMPREC {
    // Degenerate after permutation (near-zero-area triangle): fall back to
    // rasterizing its edges only.
    let mut keys = segment_keys(raw[0], raw[1], cellsize);
    keys.extend(segment_keys(raw[1], raw[2], cellsize));
    keys.extend(segment_keys(raw[2], raw[0], cellsize));
    return keys;
  }
  let dx = -n.x / n.z;
  let dy = -n.y / n.z;
  let o = pts[0];
  let cell2 = cellsize * 0.5;

  let pmin = pts[0].min(pts[1]).min(pts[2]);
  let pmax = pts[0].max(pts[1]).max(pts[2]);

  let xmin = pmin.x - floor_mod(pmin.x, cellsize);
  let xcount = (((pmax.x - xmin) / cellsize).ceil() as i64).max(1);
  let xpts: Vec<f64> = (0..xcount).map(|i| xmin + cellsize * i as f64 + cell2).collect();

  let mut ypts: Vec<(f64, f64)> = Vec::new();
  for &x in &xpts {
    let mut cand = Vec::new();
    for i in 0..3 {
      let prev = (i + 2) % 3;
      let p_prev = pts[prev];
      let p_cur = pts[i];
      let edge = v[prev];
      let in_range = (p_prev.x - x + cell2) * (p_cur.x - x - cell2) <= 0.0
        || (p_prev.x - x - cell2) * (p_cur.x - x + cell2) <= 0.0;
      if in_range {
        let slope = if edge.x != 0.0 { edge.y / edge.x } else { f64::INFINITY };
        cand.push(p_cur.y + slope * (x - cell2 - p_cur.x));
        cand.push(p_cur.y + slope * (x + cell2 - p_cur.x));
      }
    }
    if cand.is_empty() {
      continue;
    }
    let ymin_raw = cand.iter().cloned().fold(f64::INFINITY, f64::min);
    let ymax_raw = cand.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let ymin = ymin_raw - floor_mod(ymin_raw, cellsize);
    let ycount = (((ymax_raw - ymin) / cellsize).ceil() as i64).max(1);
    for i in 0..ycount {
      ypts.push((x, ymin + cellsize * i as f64 + cell2));
    }
  }

  let mut zpts: Vec<DVec3> = Vec::new();
  for &(x, y) in &ypts {
    let f = |x: f64, y: f64| o.z + dx * (x - o.x) + dy * (y - o.y);
    let cand = [
      f(x - cell2, y - cell2),
      f(x + cell2, y - cell2),
      f(x - cell2, y + cell2),
      f(x + cell2, y + cell2),
    ];
    let zmin_raw = cand.iter().cloned().fold(f64::INFINITY, f64::min);
    let zmax_raw = cand.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let zmin = zmin_raw - floor_mod(zmin_raw, cellsize);
    let zcount = (((zmax_raw - zmin) / cellsize).ceil() as i64).max(1);
    for i in 0..zcount {
      zpts.push(DVec3::new(x, y, zmin + cellsize * i as f64 + cell2));
    }
  }

  let bound_min = DVec3::new(
    pmin.x - floor_mod(pmin.x, cellsize),
    pmin.y - floor_mod(pmin.y, cellsize),
    pmin.z - floor_mod(pmin.z, cellsize),
  );
  let bound_max = DVec3::new(
    pmax.x + (cellsize - floor_mod(pmax.x, cellsize)),
    pmax.y + (cellsize - floor_mod(pmax.y, cellsize)),
    pmax.z + (cellsize - floor_mod(pmax.z, cellsize)),
  );

  let mut keys = Vec::new();
  let unpermute = |p: DVec3| {
    let mut out = [0.0; 3];
    out[order[0]] = p.x;
    out[order[1]] = p.y;
    out[order[2]] = p.z;
    DVec3::from(out)
  };
  for &p in &zpts {
    if bound_min.x < p.x
      && bound_min.y < p.y
      && bound_min.z < p.z
      && p.x < bound_max.x
      && p.y < bound_max.y
      && p.z < bound_max.z
    {
      let unp = unpermute(p);
      keys.push((
        (unp.x / cellsize).floor() as i64,
        (unp.y / cellsize).floor() as i64,
        (unp.z / cellsize).floor() as i64,
      ));
    }
  }
  keys
}

/// Holds objects associated with the region of space they occupy.
///
/// An object can be bound under multiple cells (if its primitive spans
/// several), and each cell can hold multiple objects. `cellsize` controls
/// the granularity of the hash: smaller cells cost more memory for non-point
/// primitives but give a finer-grained query.
pub struct PositionMap<T> {
  cellsize: f64,
  dict: HashMap<CellKey, Vec<T>>,
}

impl<T: Clone> PositionMap<T> {
  pub fn new(cellsize: f64) -> Self {
    Self {
      cellsize,
      dict: HashMap::new(),
    }
  }

  pub fn cellsize(&self) -> f64 {
    self.cellsize
  }

  /// Bind `obj` under every cell `space` rasterizes to.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "PositionMap::add"))]
  pub fn add(&mut self, space: Space, obj: T) {
    for key in keysfor(space, self.cellsize) {
      self.dict.entry(key).or_default().push(obj.clone());
    }
  }

  /// All objects bound under any cell `space` rasterizes to. Duplicates
  /// across cells are preserved; callers that need a set should dedup.
  pub fn get(&self, space: Space) -> Vec<T> {
    let mut out = Vec::new();
    for key in keysfor(space, self.cellsize) {
      if let Some(v) = self.dict.get(&key) {
        out.extend(v.iter().cloned());
      }
    }
    out
  }

  /// Merge another map of matching cellsize into this one.
  pub fn update_from(&mut self, other: &PositionMap<T>) -> Result<()> {
    if (self.cellsize - other.cellsize).abs() > crate::numeric::NUMPREC {
      return Err(KernelError::precondition(format!(
        "cellsize mismatch: {} != {}",
        self.cellsize, other.cellsize
      )));
    }
    for (k, v) in &other.dict {
      self.dict.entry(*k).or_default().extend(v.iter().cloned());
    }
    Ok(())
  }

  /// Insert every `(space, obj)` pair.
  pub fn extend(&mut self, pairs: impl IntoIterator<Item = (Space, T)>) {
    for (space, obj) in pairs {
      self.add(space, obj);
    }
  }

  pub fn len(&self) -> usize {
    self.dict.len()
  }

  pub fn is_empty(&self) -> bool {
    self.dict.is_empty()
  }
}

/// A deduplicating set of points, hashed by grid cell.
///
/// Points are stored by index into an internal buffer, so the buffer can be
/// retrieved at any time, or a point can be resolved to just its index.
/// `cellsize` is the distance below which two points are considered the
/// same point; it must not change once the set holds any points.
pub struct PointSet {
  points: Vec<DVec3>,
  cellsize: f64,
  dict: HashMap<CellKey, usize>,
}

impl PointSet {
  pub fn new(cellsize: f64) -> Self {
    Self {
      points: Vec::new(),
      cellsize,
      dict: HashMap::new(),
    }
  }

  pub fn cellsize(&self) -> f64 {
    self.cellsize
  }

  pub fn points(&self) -> &[DVec3] {
    &self.points
  }

  fn keyfor(&self, pt: DVec3) -> CellKey {
    cell_of(pt, self.cellsize)
  }

  /// Insert `pt` if its cell is unoccupied, returning the index it now (or
  /// already) owns.
  pub fn add(&mut self, pt: DVec3) -> usize {
    let key = self.keyfor(pt);
    if let Some(&idx) = self.dict.get(&key) {
      idx
    } else {
      let idx = self.points.len();
      self.points.push(pt);
      self.dict.insert(key, idx);
      idx
    }
  }

  pub fn extend(&mut self, pts: impl IntoIterator<Item = DVec3>) {
    for pt in pts {
      self.add(pt);
    }
  }

  pub fn contains(&self, pt: DVec3) -> bool {
    self.dict.contains_key(&self.keyfor(pt))
  }

  pub fn get(&self, pt: DVec3) -> Option<usize> {
    self.dict.get(&self.keyfor(pt)).copied()
  }

  /// Remove `pt`'s cell from the set, failing if it was never present.
  ///
  /// Mirrors `add`'s own key derivation (`key = keyfor(pt)`) rather than a
  /// stray outer-scope variable, unlike the method this was ported from.
  pub fn remove(&mut self, pt: DVec3) -> Result<()> {
    let key = self.keyfor(pt);
    if self.dict.remove(&key).is_some() {
      Ok(())
    } else {
      Err(KernelError::precondition("position doesn't exist in set"))
    }
  }

  /// Like [`PointSet::remove`] but a no-op when `pt` is absent.
  pub fn discard(&mut self, pt: DVec3) {
    let key = self.keyfor(pt);
    self.dict.remove(&key);
  }
}

#[cfg(test)]
#[path = "hashing_test.rs"]
mod hashing_test;
