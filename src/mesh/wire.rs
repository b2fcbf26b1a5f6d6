//! A single ordered polyline referencing an external point buffer.

use glam::DVec3;

use crate::error::{KernelError, Result};
use crate::numeric;
use crate::shared::SharedBuf;

use super::{check_index, lineedges, PointContainer};

pub struct Wire<G = ()> {
  points: SharedBuf<DVec3>,
  indices: Vec<u32>,
  tracks: Vec<u32>,
  groups: SharedBuf<G>,
}

impl<G: Clone> Wire<G> {
  pub fn new(points: SharedBuf<DVec3>, indices: Vec<u32>, tracks: Vec<u32>, groups: SharedBuf<G>) -> Self {
    Self {
      points,
      indices,
      tracks,
      groups,
    }
  }

  pub fn from_indices(points: SharedBuf<DVec3>, indices: Vec<u32>) -> Self
  where
    G: Default,
  {
    let n = indices.len();
    Self {
      points,
      indices,
      tracks: vec![0; n],
      groups: SharedBuf::new(vec![G::default()]),
    }
  }

  pub fn indices(&self) -> &[u32] {
    &self.indices
  }

  pub fn tracks(&self) -> &[u32] {
    &self.tracks
  }

  pub fn groups(&self) -> &SharedBuf<G> {
    &self.groups
  }

  pub fn len(&self) -> usize {
    self.indices.len()
  }

  pub fn is_empty(&self) -> bool {
    self.indices.is_empty()
  }

  pub fn get(&self, i: usize) -> DVec3 {
    self.pointat(self.indices[i])
  }

  pub fn flip(&mut self) {
    self.indices.reverse();
    self.tracks.reverse();
  }

  /// Append the first index to the end, turning the open path into a
  /// closed loop (a no-op if it's already closed).
  pub fn close(&mut self) {
    if self.indices.first() != self.indices.last() {
      if let Some(&first) = self.indices.first() {
        self.indices.push(first);
        if let Some(&t) = self.tracks.last() {
          self.tracks.push(t);
        }
      }
    }
  }

  /// Whether the last index repeats the first (the loop is explicitly
  /// closed in the index list, as opposed to merely forming a cycle once
  /// coincident endpoints are merged).
  pub fn is_closed(&self) -> bool {
    self.indices.len() > 1 && self.indices.first() == self.indices.last()
  }

  pub fn edge(&self, i: usize) -> (u32, u32) {
    (self.indices[i], self.indices[i + 1])
  }

  /// Edges between consecutive indices (`len() - 1` of them; does not
  /// close the loop even if [`is_closed`](Self::is_closed) is true and the
  /// last index already repeats the first).
  pub fn edges(&self) -> Vec<(u32, u32)> {
    lineedges(&self.indices)
  }

  pub fn length(&self) -> f64 {
    self
      .edges()
      .iter()
      .map(|&(a, b)| (self.pointat(b) - self.pointat(a)).length())
      .sum()
  }

  pub fn barycenter(&self) -> DVec3 {
    if self.indices.is_empty() {
      return DVec3::ZERO;
    }
    let sum: DVec3 = self.indices.iter().map(|&i| self.pointat(i)).sum();
    sum / self.indices.len() as f64
  }

  /// Merge consecutive points closer than `limit` along the path itself
  /// (unlike `Mesh`/`Web`'s spatial-hash `mergeclose`, this only looks at
  /// points already adjacent in the path, since a wire's order is
  /// semantic and two far-apart-in-index but spatially close points must
  /// not be merged).
  pub fn mergeclose(&mut self, limit: f64) {
    if self.indices.len() < 2 {
      return;
    }
    let mut out = vec![self.indices[0]];
    let mut out_tracks = vec![self.tracks[0]];
    for i in 1..self.indices.len() {
      let prev = *out.last().unwrap();
      let cur = self.indices[i];
      if (self.pointat(cur) - self.pointat(prev)).length() > limit {
        out.push(cur);
        out_tracks.push(self.tracks[i]);
      }
    }
    self.indices = out;
    self.tracks = out_tracks;
  }

  pub fn check(&self) -> Result<()> {
    let len = self.points.len();
    for &i in &self.indices {
      check_index(i, len, "wire")?;
    }
    if self.tracks.len() != self.indices.len() {
      return Err(KernelError::topology("tracks length does not match indices length"));
    }
    Ok(())
  }

  pub fn isvalid(&self) -> bool {
    self.check().is_ok()
  }

  /// Best-fit normal of the path, taken as the average of successive edge
  /// cross products around the loop (zero, and therefore meaningless, for
  /// an open or degenerate path).
  pub fn normal(&self) -> DVec3 {
    if self.indices.len() < 3 {
      return DVec3::ZERO;
    }
    let n = self.indices.len();
    let mut acc = DVec3::ZERO;
    for i in 0..n {
      let a = self.get(i);
      let b = self.get((i + 1) % n);
      let c = self.get((i + 2) % n);
      acc += (b - a).cross(c - b);
    }
    if acc.length() > numeric::NUMPREC {
      acc.normalize()
    } else {
      DVec3::ZERO
    }
  }

  /// Append `other`'s indices (offsetting into this wire's own point
  /// buffer isn't needed since both refer to the same external buffer by
  /// convention; callers joining wires over different buffers should
  /// `strippoints`/remap first).
  pub fn join(&mut self, other: &Wire<G>) {
    self.indices.extend_from_slice(&other.indices);
    self.tracks.extend_from_slice(&other.tracks);
  }
}

impl<G> PointContainer for Wire<G> {
  fn points(&self) -> &SharedBuf<DVec3> {
    &self.points
  }
  fn points_mut(&mut self) -> &mut SharedBuf<DVec3> {
    &mut self.points
  }
  fn used_points(&self) -> Vec<u32> {
    let mut set = self.indices.clone();
    set.sort_unstable();
    set.dedup();
    set
  }
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;
