//! A container of edges sharing a point buffer: the 1-dimensional analog
//! of [`Mesh`](super::Mesh).

use std::collections::HashSet;

use glam::DVec3;

use crate::error::{KernelError, Result};
use crate::shared::SharedBuf;

use super::{check_index, connpe, mergeclose_remap, strip_remap, suites, PointContainer, NONE};

pub struct Web<G = ()> {
  points: SharedBuf<DVec3>,
  edges: Vec<[u32; 2]>,
  tracks: Vec<u32>,
  groups: SharedBuf<G>,
}

impl<G: Clone> Web<G> {
  pub fn new(points: SharedBuf<DVec3>, edges: Vec<[u32; 2]>, tracks: Vec<u32>, groups: SharedBuf<G>) -> Self {
    Self {
      points,
      edges,
      tracks,
      groups,
    }
  }

  pub fn from_edges(points: Vec<DVec3>, edges: Vec<[u32; 2]>) -> Self
  where
    G: Default,
  {
    let n = edges.len();
    Self {
      points: SharedBuf::new(points),
      edges,
      tracks: vec![0; n],
      groups: SharedBuf::new(vec![G::default()]),
    }
  }

  pub fn edges(&self) -> &[[u32; 2]] {
    &self.edges
  }

  pub fn tracks(&self) -> &[u32] {
    &self.tracks
  }

  pub fn groups(&self) -> &SharedBuf<G> {
    &self.groups
  }

  pub fn edgepoints(&self, i: usize) -> [DVec3; 2] {
    let e = self.edges[i];
    [self.pointat(e[0]), self.pointat(e[1])]
  }

  pub fn edgedirection(&self, i: usize) -> DVec3 {
    let [a, b] = self.edgepoints(i);
    (b - a).normalize()
  }

  pub fn length(&self) -> f64 {
    (0..self.edges.len())
      .map(|i| {
        let [a, b] = self.edgepoints(i);
        (b - a).length()
      })
      .sum()
  }

  pub fn barycenter(&self) -> DVec3 {
    let used = self.used_points();
    if used.is_empty() {
      return DVec3::ZERO;
    }
    let sum: DVec3 = used.iter().map(|&i| self.pointat(i)).sum();
    sum / used.len() as f64
  }

  pub fn flip(&mut self) {
    for e in &mut self.edges {
      e.swap(0, 1);
    }
  }

  /// Points used by exactly one edge: the ends of the open strands this
  /// web is made of.
  pub fn extremities(&self) -> Vec<u32> {
    let pairs: Vec<(u32, u32)> = self.edges.iter().map(|e| (e[0], e[1])).collect();
    let degree = super::connexity(&pairs);
    let mut out: Vec<u32> = degree.into_iter().filter(|&(_, d)| d == 1).map(|(p, _)| p).collect();
    out.sort_unstable();
    out
  }

  /// True if every point has degree exactly 2 (the web is one or more
  /// closed loops, with no branch point and no loose end).
  pub fn isloop(&self) -> bool {
    self.extremities().is_empty() && !self.edges.is_empty()
  }

  /// True if the web has no branch points (every point has degree <= 2).
  pub fn isline(&self) -> bool {
    let pairs: Vec<(u32, u32)> = self.edges.iter().map(|e| (e[0], e[1])).collect();
    super::connexity(&pairs).values().all(|&d| d <= 2)
  }

  pub fn check(&self) -> Result<()> {
    let len = self.points.len();
    for e in &self.edges {
      check_index(e[0], len, "edge")?;
      check_index(e[1], len, "edge")?;
      if e[0] == e[1] {
        return Err(KernelError::topology("degenerate edge (repeated point)"));
      }
    }
    if self.tracks.len() != self.edges.len() {
      return Err(KernelError::topology("tracks length does not match edges length"));
    }
    Ok(())
  }

  pub fn isvalid(&self) -> bool {
    self.check().is_ok()
  }

  pub fn mergeclose(&mut self, limit: f64) -> Vec<u32> {
    let snapshot = self.points.snapshot();
    let (remap, compacted) = mergeclose_remap(&snapshot, limit);
    self.points.make_unique();
    self.points.replace(compacted);
    let mut new_edges = Vec::with_capacity(self.edges.len());
    let mut new_tracks = Vec::with_capacity(self.tracks.len());
    for (e, &t) in self.edges.iter().zip(&self.tracks) {
      let ne = [remap[e[0] as usize], remap[e[1] as usize]];
      if ne[0] != ne[1] {
        new_edges.push(ne);
        new_tracks.push(t);
      }
    }
    self.edges = new_edges;
    self.tracks = new_tracks;
    remap
  }

  pub fn strippoints(&mut self) -> Vec<u32> {
    let used = self.used_points();
    let remap = strip_remap(self.points.len(), &used);
    let snapshot = self.points.snapshot();
    let mut compacted = vec![DVec3::ZERO; used.len()];
    for (old, &new) in remap.iter().enumerate() {
      if new != NONE {
        compacted[new as usize] = snapshot[old];
      }
    }
    self.points.make_unique();
    self.points.replace(compacted);
    for e in &mut self.edges {
      for i in e.iter_mut() {
        *i = remap[*i as usize];
      }
    }
    remap
  }

  pub fn finish(&mut self, limit: Option<f64>) -> Result<()> {
    let limit = limit.unwrap_or_else(|| self.precision());
    self.mergeclose(limit);
    self.check()
  }

  /// Connected components, by shared point, each sharing the original
  /// point buffer.
  pub fn islands(&self) -> Vec<Web<G>> {
    let pairs: Vec<(u32, u32)> = self.edges.iter().map(|e| (e[0], e[1])).collect();
    let adjacency = connpe(&pairs);
    let n = self.edges.len();
    let mut reached = vec![false; n];
    let mut out = Vec::new();
    for seed in 0..n {
      if reached[seed] {
        continue;
      }
      let mut stack = vec![seed];
      let mut members = Vec::new();
      while let Some(ei) = stack.pop() {
        if reached[ei] {
          continue;
        }
        reached[ei] = true;
        members.push(ei);
        let e = self.edges[ei];
        for &p in &e {
          if let Some(incident) = adjacency.get(&p) {
            for &other in incident {
              if !reached[other] {
                stack.push(other);
              }
            }
          }
        }
      }
      out.push(Web {
        points: self.points.clone(),
        edges: members.iter().map(|&i| self.edges[i]).collect(),
        tracks: members.iter().map(|&i| self.tracks[i]).collect(),
        groups: self.groups.clone(),
      });
    }
    out
  }

  /// Points used by more than one group's edges (the web equivalent of
  /// [`Mesh::groupoutlines`](super::Mesh::groupoutlines)).
  pub fn groupextremities(&self) -> Vec<u32> {
    let mut by_point: std::collections::HashMap<u32, HashSet<u32>> = std::collections::HashMap::new();
    for (e, &t) in self.edges.iter().zip(&self.tracks) {
      for &p in e {
        by_point.entry(p).or_default().insert(t);
      }
    }
    let mut out: Vec<u32> = by_point
      .into_iter()
      .filter(|(_, tracks)| tracks.len() > 1)
      .map(|(p, _)| p)
      .collect();
    out.sort_unstable();
    out
  }

  /// Same edges regrouped into maximal connected suites (see
  /// [`suites`](super::suites)); `cut` stops a suite at a branch point
  /// rather than picking one continuation arbitrarily.
  pub fn arcs(&self, cut: bool) -> Vec<Vec<u32>> {
    let pairs: Vec<(u32, u32)> = self.edges.iter().map(|e| (e[0], e[1])).collect();
    suites(&pairs, false, cut, false)
  }
}

impl<G> PointContainer for Web<G> {
  fn points(&self) -> &SharedBuf<DVec3> {
    &self.points
  }
  fn points_mut(&mut self) -> &mut SharedBuf<DVec3> {
    &mut self.points
  }
  fn used_points(&self) -> Vec<u32> {
    let mut set: Vec<u32> = self.edges.iter().flatten().copied().collect();
    set.sort_unstable();
    set.dedup();
    set
  }
}

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;
