//! Free functions for building adjacency/connectivity structures out of
//! plain index buffers, shared by `Mesh`, `Web` and `Wire`.

use std::collections::HashMap;

use smallvec::SmallVec;

/// Canonical (unordered) key for an edge: `(min, max)`.
#[inline]
pub fn edgekey(a: u32, b: u32) -> (u32, u32) {
  if a <= b {
    (a, b)
  } else {
    (b, a)
  }
}

/// Map from an *oriented* edge `(u, v)` to the face that uses it that way.
/// Assumes a manifold input (each oriented edge used by at most one face);
/// on a non-manifold input the last face claiming an edge wins, so callers
/// that need to detect non-manifoldness should check [`super::Mesh::issurface`]
/// first.
pub fn connef(faces: &[[u32; 3]]) -> HashMap<(u32, u32), usize> {
  let mut map = HashMap::with_capacity(faces.len() * 3);
  for (fi, f) in faces.iter().enumerate() {
    for e in 0..3 {
      map.insert((f[e], f[(e + 1) % 3]), fi);
    }
  }
  map
}

/// Map from a point to every edge index touching it, given a flat list of
/// unordered edges.
pub fn connpe(edges: &[(u32, u32)]) -> HashMap<u32, SmallVec<[usize; 4]>> {
  let mut map: HashMap<u32, SmallVec<[usize; 4]>> = HashMap::new();
  for (ei, &(a, b)) in edges.iter().enumerate() {
    map.entry(a).or_default().push(ei);
    map.entry(b).or_default().push(ei);
  }
  map
}

/// Point-to-point adjacency built from any n-gon connectivity (face index
/// triples, edge pairs, ...): every consecutive pair of indices in `ngons`
/// becomes a bidirectional adjacency entry.
pub fn connpp<'a>(ngons: impl IntoIterator<Item = &'a [u32]>) -> HashMap<u32, SmallVec<[u32; 6]>> {
  let mut map: HashMap<u32, SmallVec<[u32; 6]>> = HashMap::new();
  for ngon in ngons {
    let n = ngon.len();
    for i in 0..n {
      let a = ngon[i];
      let b = ngon[(i + 1) % n];
      if !map.get(&a).map(|v| v.contains(&b)).unwrap_or(false) {
        map.entry(a).or_default().push(b);
      }
      if !map.get(&b).map(|v| v.contains(&a)).unwrap_or(false) {
        map.entry(b).or_default().push(a);
      }
    }
  }
  map
}

/// Degree (number of incident edge endpoints) of every point appearing in
/// `edges`. A manifold closed loop has every point at degree 2; a branch
/// point has degree > 2.
pub fn connexity(edges: &[(u32, u32)]) -> HashMap<u32, u32> {
  let mut map = HashMap::new();
  for &(a, b) in edges {
    *map.entry(a).or_insert(0) += 1;
    *map.entry(b).or_insert(0) += 1;
  }
  map
}

/// Consecutive edges of an open polyline `indices`, without closing it
/// back to the start (that's the difference from `Wire::close`'d edges).
pub fn lineedges(indices: &[u32]) -> Vec<(u32, u32)> {
  indices.windows(2).map(|w| (w[0], w[1])).collect()
}

/// A maximal chain of connected points produced by [`suites`].
pub type Suite = Vec<u32>;

/// Chain a flat edge set into maximal paths ("suites").
///
/// - `oriented`: when true, edges are directed and a suite only continues
///   through an edge whose start matches the suite's current end; when
///   false, either endpoint of an unconsumed edge can continue the chain.
/// - `cut`: when the current point has more than one unconsumed
///   continuation, stop the suite there (leaving the rest for later suites)
///   instead of greedily picking one and risking an inconsistent split
///   elsewhere.
/// - `want_loop`: when true, a suite whose far end reconnects to its start
///   is closed into a loop (the returned suite repeats the start index at
///   the end). If, while chaining, more than one unconsumed edge could
///   close the current suite back to its start, the first such edge found
///   in scan order is used — **first closure wins** is this function's
///   policy for that ambiguity, rather than rejecting the input.
pub fn suites(edges: &[(u32, u32)], oriented: bool, cut: bool, want_loop: bool) -> Vec<Suite> {
  let mut used = vec![false; edges.len()];
  let mut by_point: HashMap<u32, SmallVec<[usize; 4]>> = HashMap::new();
  for (ei, &(a, b)) in edges.iter().enumerate() {
    by_point.entry(a).or_default().push(ei);
    if !oriented {
      by_point.entry(b).or_default().push(ei);
    }
  }

  let mut suites = Vec::new();
  for start_idx in 0..edges.len() {
    if used[start_idx] {
      continue;
    }
    used[start_idx] = true;
    let (a, b) = edges[start_idx];
    let start = a;
    let mut chain = vec![a, b];
    let mut current = b;

    loop {
      let candidates: SmallVec<[usize; 4]> = by_point
        .get(&current)
        .map(|v| v.iter().copied().filter(|&ei| !used[ei]).collect())
        .unwrap_or_default();
      if candidates.is_empty() {
        break;
      }
      if cut && candidates.len() > 1 {
        break;
      }

      // First closure wins: among the available continuations, prefer one
      // that closes the loop back to `start`.
      let chosen = if want_loop {
        candidates
          .iter()
          .copied()
          .find(|&ei| other_end(edges[ei], current) == start)
          .unwrap_or(candidates[0])
      } else {
        candidates[0]
      };

      used[chosen] = true;
      let next = other_end(edges[chosen], current);
      chain.push(next);
      current = next;
      if want_loop && current == start {
        break;
      }
    }
    suites.push(chain);
  }
  suites
}

#[inline]
fn other_end(edge: (u32, u32), from: u32) -> u32 {
  if edge.0 == from {
    edge.1
  } else {
    edge.0
  }
}

#[cfg(test)]
#[path = "connectivity_test.rs"]
mod connectivity_test;
