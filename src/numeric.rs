//! Numeric primitives shared across the kernel: precision constants, small
//! vector helpers not provided by `glam`, and an axis-aligned bounding box.

use glam::{DVec2, DVec3};

/// Default relative precision for double-precision geometry.
///
/// Comparisons against zero (coincidence, degeneracy, orientation sign) use
/// this as their tolerance unless a caller supplies a tighter or looser one.
pub const NUMPREC: f64 = 1e-13;

/// `1.0 - NUMPREC`, handy for "almost certainly" comparisons (e.g.
/// `dot(a, b) < COMPREC` to detect near-parallel unit vectors).
pub const COMPREC: f64 = 1.0 - NUMPREC;

/// Largest absolute component of `v`.
#[inline]
pub fn norminf(v: DVec3) -> f64 {
  v.x.abs().max(v.y.abs()).max(v.z.abs())
}

/// Sum of absolute components of `v`.
#[inline]
pub fn norm1(v: DVec3) -> f64 {
  v.x.abs() + v.y.abs() + v.z.abs()
}

/// Unsigned angle between two vectors, in radians. Returns 0 if either vector
/// is (numerically) zero-length rather than dividing by zero.
#[inline]
pub fn anglebt(x: DVec3, y: DVec3) -> f64 {
  let n = x.length() * y.length();
  if n <= NUMPREC {
    return 0.0;
  }
  (x.dot(y) / n).clamp(-1.0, 1.0).acos()
}

/// Component of `vec` along the (assumed unit) direction `dir`.
#[inline]
pub fn project(vec: DVec3, dir: DVec3) -> DVec3 {
  dir * vec.dot(dir)
}

/// Component of `vec` orthogonal to the (assumed unit) direction `dir`.
#[inline]
pub fn noproject(vec: DVec3, dir: DVec3) -> DVec3 {
  vec - project(vec, dir)
}

/// 2D cross product (a scalar): positive when `b` is counter-clockwise of `a`.
#[inline]
pub fn perpdot(a: DVec2, b: DVec2) -> f64 {
  -a.y * b.x + a.x * b.y
}

/// Rotate a 2D vector by +90 degrees.
#[inline]
pub fn perp(v: DVec2) -> DVec2 {
  DVec2::new(-v.y, v.x)
}

/// Build an orthonormal basis `(x, y, z)` with `z = dir` and `x` the
/// normalized rejection of `align` from `dir`. Falls back to a rotated
/// `align` when the initial choice is (numerically) parallel to `dir`.
pub fn dirbase(dir: DVec3, align: DVec3) -> (DVec3, DVec3, DVec3) {
  let mut align = align;
  let mut x = align - project(align, dir);
  if x.length() < NUMPREC {
    align = DVec3::new(align.z, -align.x, align.y);
    x = align - project(align, dir);
  }
  let x = x.normalize();
  let y = dir.cross(x);
  (x, y, dir)
}

/// Default alignment hint used by callers of [`dirbase`] that don't have a
/// preferred in-plane axis.
pub const DEFAULT_ALIGN: DVec3 = DVec3::new(1.0, 0.0, 0.0);

/// Axis-aligned bounding box in double precision.
///
/// Adapted from the teacher crate's `MinMaxAABB` (switched `f32` -> `f64`,
/// `glam::DVec3` in place of raw arrays) and from `Box` in the original
/// geometry kernel this crate generalizes, which adds `center`/`width`
/// accessors and set-style union/intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  pub min: DVec3,
  pub max: DVec3,
}

impl Aabb {
  /// Inverted-extent box ready for encapsulation.
  pub fn empty() -> Self {
    Self {
      min: DVec3::splat(f64::INFINITY),
      max: DVec3::splat(f64::NEG_INFINITY),
    }
  }

  pub fn new(min: DVec3, max: DVec3) -> Self {
    Self { min, max }
  }

  pub fn from_center_width(center: DVec3, width: DVec3) -> Self {
    Self {
      min: center - width,
      max: center + width,
    }
  }

  pub fn center(&self) -> DVec3 {
    (self.min + self.max) * 0.5
  }

  pub fn width(&self) -> DVec3 {
    self.max - self.min
  }

  /// True when every axis has `min <= max` (a degenerate box where a single
  /// axis has collapsed counts as valid; [`is_empty`](Self::is_empty) is the
  /// strict "never encapsulated anything" check).
  pub fn is_valid(&self) -> bool {
    self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
  }

  /// True for a box that has never encapsulated a point (every axis
  /// strictly `min < max` fails, as produced by [`Aabb::empty`]).
  pub fn is_empty(&self) -> bool {
    self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
  }

  #[inline]
  pub fn encapsulate(&mut self, point: DVec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  pub fn union(&self, other: &Aabb) -> Aabb {
    Aabb {
      min: self.min.min(other.min),
      max: self.max.max(other.max),
    }
  }

  /// Intersection of two boxes. If the result is degenerate on some axis the
  /// box is collapsed to a single point on that axis, matching the source's
  /// "meet in the middle" tie-break rather than producing `min > max`.
  pub fn intersection(&self, other: &Aabb) -> Aabb {
    let mut min = self.min.max(other.min);
    let mut max = self.max.min(other.max);
    for i in 0..3 {
      if min[i] > max[i] {
        let mid = (min[i] + max[i]) * 0.5;
        min[i] = mid;
        max[i] = mid;
        break;
      }
    }
    Aabb { min, max }
  }
}

impl Default for Aabb {
  fn default() -> Self {
    Self::empty()
  }
}

#[cfg(test)]
#[path = "numeric_test.rs"]
mod numeric_test;
