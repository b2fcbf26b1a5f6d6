//! Triangle mesh container and its topology operations.

use std::collections::HashMap;

use glam::DVec3;

use crate::error::{KernelError, Result};
use crate::numeric;
use crate::shared::SharedBuf;

use super::{check_index, connef, edgekey, mergeclose_remap, strip_remap, PointContainer, NONE};
use super::web::Web;

/// A triangle mesh: an indexed triangle list over a shared point buffer,
/// with a group id per face for material/selection bookkeeping.
///
/// `G` is the per-group payload; callers with no use for group metadata
/// can instantiate `Mesh<()>`.
pub struct Mesh<G = ()> {
  points: SharedBuf<DVec3>,
  faces: Vec<[u32; 3]>,
  tracks: Vec<u32>,
  groups: SharedBuf<G>,
}

impl<G: Clone> Mesh<G> {
  pub fn new(points: SharedBuf<DVec3>, faces: Vec<[u32; 3]>, tracks: Vec<u32>, groups: SharedBuf<G>) -> Self {
    Self {
      points,
      faces,
      tracks,
      groups,
    }
  }

  /// Build a mesh with a single default group, all faces tagged 0.
  pub fn from_faces(points: Vec<DVec3>, faces: Vec<[u32; 3]>) -> Self
  where
    G: Default,
  {
    let n = faces.len();
    Self {
      points: SharedBuf::new(points),
      faces,
      tracks: vec![0; n],
      groups: SharedBuf::new(vec![G::default()]),
    }
  }

  pub fn faces(&self) -> &[[u32; 3]] {
    &self.faces
  }

  pub fn faces_mut(&mut self) -> &mut Vec<[u32; 3]> {
    &mut self.faces
  }

  pub fn tracks(&self) -> &[u32] {
    &self.tracks
  }

  pub fn groups(&self) -> &SharedBuf<G> {
    &self.groups
  }

  pub fn facepoints(&self, i: usize) -> [DVec3; 3] {
    let f = self.faces[i];
    [self.pointat(f[0]), self.pointat(f[1]), self.pointat(f[2])]
  }

  /// `normalize(cross(b - a, c - a))`; outward per the winding convention.
  pub fn facenormal(&self, i: usize) -> DVec3 {
    let [a, b, c] = self.facepoints(i);
    (b - a).cross(c - a).normalize()
  }

  pub fn facenormals(&self) -> Vec<DVec3> {
    (0..self.faces.len()).map(|i| self.facenormal(i)).collect()
  }

  /// Twice the signed area of face `i`'s projection (used by the ear-clip
  /// triangulator's aesthetic score and by `surface`).
  fn face_area2(&self, i: usize) -> f64 {
    let [a, b, c] = self.facepoints(i);
    (b - a).cross(c - a).length()
  }

  pub fn surface(&self) -> f64 {
    (0..self.faces.len()).map(|i| self.face_area2(i) * 0.5).sum()
  }

  pub fn barycenter(&self) -> DVec3 {
    let used = self.used_points();
    if used.is_empty() {
      return DVec3::ZERO;
    }
    let sum: DVec3 = used.iter().map(|&i| self.pointat(i)).sum();
    sum / used.len() as f64
  }

  /// Every oriented edge of every face (3 per face; duplicated across
  /// faces on a manifold mesh, once per direction).
  pub fn edges_oriented(&self) -> Vec<(u32, u32)> {
    let mut out = Vec::with_capacity(self.faces.len() * 3);
    for f in &self.faces {
      out.push((f[0], f[1]));
      out.push((f[1], f[2]));
      out.push((f[2], f[0]));
    }
    out
  }

  /// Every distinct unordered edge.
  pub fn edges(&self) -> Vec<(u32, u32)> {
    let mut set = std::collections::HashSet::new();
    for f in &self.faces {
      set.insert(edgekey(f[0], f[1]));
      set.insert(edgekey(f[1], f[2]));
      set.insert(edgekey(f[2], f[0]));
    }
    set.into_iter().collect()
  }

  /// Edge -> outward normal, averaged from the (up to two) incident faces.
  pub fn edgenormals(&self) -> HashMap<(u32, u32), DVec3> {
    let mut acc: HashMap<(u32, u32), DVec3> = HashMap::new();
    for (fi, f) in self.faces.iter().enumerate() {
      let n = self.facenormal(fi);
      for e in 0..3 {
        let key = edgekey(f[e], f[(e + 1) % 3]);
        *acc.entry(key).or_insert(DVec3::ZERO) += n;
      }
    }
    for n in acc.values_mut() {
      if n.length() > numeric::NUMPREC {
        *n = n.normalize();
      }
    }
    acc
  }

  /// Angle-weighted vertex normals; boundary vertices receive unweighted
  /// contributions from the faces that created the boundary edges they
  /// touch, matching the bulk of the mesh receiving an angle-weighted blend
  /// while the silhouette stays crisp.
  pub fn vertexnormals(&self) -> HashMap<u32, DVec3> {
    let boundary: std::collections::HashSet<(u32, u32)> =
      self.outlines_unoriented().into_iter().collect();
    let mut acc: HashMap<u32, DVec3> = HashMap::new();
    for (fi, f) in self.faces.iter().enumerate() {
      let n = self.facenormal(fi);
      let pts = self.facepoints(fi);
      for e in 0..3 {
        let v = f[e];
        let prev = pts[(e + 2) % 3];
        let cur = pts[e];
        let next = pts[(e + 1) % 3];
        let on_boundary = boundary.contains(&edgekey(f[e], f[(e + 1) % 3]))
          || boundary.contains(&edgekey(f[(e + 2) % 3], f[e]));
        let weight = if on_boundary {
          1.0
        } else {
          numeric::anglebt(prev - cur, next - cur)
        };
        *acc.entry(v).or_insert(DVec3::ZERO) += n * weight;
      }
    }
    for n in acc.values_mut() {
      if n.length() > numeric::NUMPREC {
        *n = n.normalize();
      }
    }
    acc
  }

  /// Boundary-loop tangents: at each boundary vertex, the cross product of
  /// the two adjacent boundary-face normals (the face that ends an
  /// incoming boundary edge there, and the face that starts the outgoing
  /// one).
  pub fn tangents(&self) -> HashMap<u32, DVec3> {
    let outline = self.outlines_oriented();
    let ef = connef(&self.faces);
    let mut incoming: HashMap<u32, (u32, u32)> = HashMap::new();
    for &(a, b) in &outline {
      incoming.insert(b, (a, b));
    }
    let mut out = HashMap::new();
    for &(a, b) in &outline {
      if let Some(&in_edge) = incoming.get(&a) {
        if let (Some(&f_in), Some(&f_out)) = (ef.get(&in_edge), ef.get(&(a, b))) {
          let n_in = self.facenormal(f_in);
          let n_out = self.facenormal(f_out);
          out.insert(a, n_in.cross(n_out));
        }
      }
    }
    out
  }

  /// Faces whose track is in `tracks`, as a fresh mesh sharing this mesh's
  /// point buffer.
  pub fn group(&self, tracks: &[u32]) -> Mesh<G> {
    let wanted: std::collections::HashSet<u32> = tracks.iter().copied().collect();
    let mut faces = Vec::new();
    let mut out_tracks = Vec::new();
    for (f, &t) in self.faces.iter().zip(&self.tracks) {
      if wanted.contains(&t) {
        faces.push(*f);
        out_tracks.push(t);
      }
    }
    Mesh {
      points: self.points.clone(),
      faces,
      tracks: out_tracks,
      groups: self.groups.clone(),
    }
  }

  /// Oriented boundary edges: an oriented-edge XOR over all faces. On a
  /// closed manifold surface this is empty.
  pub fn outlines_oriented(&self) -> Vec<(u32, u32)> {
    let mut set: std::collections::HashSet<(u32, u32)> = std::collections::HashSet::new();
    for &(a, b) in &self.edges_oriented() {
      if !set.remove(&(b, a)) {
        set.insert((a, b));
      }
    }
    set.into_iter().collect()
  }

  /// Unoriented boundary edges: robust to faces with inconsistent winding.
  pub fn outlines_unoriented(&self) -> Vec<(u32, u32)> {
    let mut count: HashMap<(u32, u32), u32> = HashMap::new();
    for &(a, b) in &self.edges_oriented() {
      *count.entry(edgekey(a, b)).or_insert(0) += 1;
    }
    count.into_iter().filter(|&(_, c)| c == 1).map(|(k, _)| k).collect()
  }

  /// Edges where the two faces sharing them carry different tracks; each
  /// emitted edge's track becomes the unordered pair of its source tracks,
  /// `groups` on the resulting `Web` left empty for the caller to fill in.
  pub fn groupoutlines(&self) -> Web<(u32, u32)> {
    let ef = connef(&self.faces);
    let mut edges = Vec::new();
    let mut tracks = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for (fi, f) in self.faces.iter().enumerate() {
      let t1 = self.tracks[fi];
      for e in 0..3 {
        let (a, b) = (f[e], f[(e + 1) % 3]);
        let key = edgekey(a, b);
        if seen.contains(&key) {
          continue;
        }
        if let Some(&gi) = ef.get(&(b, a)) {
          let t2 = self.tracks[gi];
          if t1 != t2 {
            seen.insert(key);
            edges.push([a, b]);
            tracks.push((t1.min(t2), t1.max(t2)));
          }
        }
      }
    }
    let group_values: Vec<(u32, u32)> = {
      let mut uniq: Vec<(u32, u32)> = tracks.clone();
      uniq.sort_unstable();
      uniq.dedup();
      uniq
    };
    let remapped: Vec<u32> = tracks
      .iter()
      .map(|t| group_values.iter().position(|g| g == t).unwrap() as u32)
      .collect();
    Web::new(self.points.clone(), edges, remapped, SharedBuf::new(group_values))
  }

  /// Unordered edges splitting distinct groups apart: where two faces on
  /// either side of an edge carry different tracks, the edge is emitted
  /// once, tagged with a new group that is the unordered pair of the two
  /// source tracks (the same pair-numbering `groupoutlines` produces per
  /// edge direction, collapsed onto a single unoriented edge here). If
  /// `groups` is given, faces whose track isn't in it are ignored
  /// entirely, so only frontiers touching the requested subset show up.
  pub fn frontiers(&self, groups: Option<&[u32]>) -> Web<(u32, u32)> {
    let wanted: Option<std::collections::HashSet<u32>> = groups.map(|g| g.iter().copied().collect());
    let mut edges = Vec::new();
    let mut tracks = Vec::new();
    let mut couples: Vec<(u32, u32)> = Vec::new();
    let mut belong: HashMap<(u32, u32), u32> = HashMap::new();

    for (fi, f) in self.faces.iter().enumerate() {
      let t = self.tracks[fi];
      if let Some(w) = &wanted {
        if !w.contains(&t) {
          continue;
        }
      }
      for e in 0..3 {
        let key = edgekey(f[e], f[(e + 1) % 3]);
        match belong.get(&key) {
          Some(&prev) if prev != t => {
            let pair = edgekey(prev, t);
            let gi = match couples.iter().position(|&c| c == pair) {
              Some(i) => i,
              None => {
                couples.push(pair);
                couples.len() - 1
              }
            };
            edges.push([key.0, key.1]);
            tracks.push(gi as u32);
            belong.remove(&key);
          }
          Some(_) => {
            belong.remove(&key);
          }
          None => {
            belong.insert(key, t);
          }
        }
      }
    }

    Web::new(self.points.clone(), edges, tracks, SharedBuf::new(couples))
  }

  pub fn issurface(&self) -> bool {
    let mut seen = std::collections::HashSet::new();
    for &e in &self.edges_oriented() {
      if !seen.insert(e) {
        return false;
      }
    }
    true
  }

  pub fn isenvelope(&self) -> bool {
    self.outlines_oriented().is_empty()
  }

  pub fn check(&self) -> Result<()> {
    let len = self.points.len();
    for f in &self.faces {
      for &i in f {
        check_index(i, len, "face")?;
      }
      if f[0] == f[1] || f[1] == f[2] || f[2] == f[0] {
        return Err(KernelError::topology(format!("degenerate face {:?}", f)));
      }
    }
    if self.tracks.len() != self.faces.len() {
      return Err(KernelError::topology("tracks length does not match faces length"));
    }
    let ngroups = self.groups.len();
    for &t in &self.tracks {
      if t as usize >= ngroups {
        return Err(KernelError::topology(format!("track {t} has no matching group")));
      }
    }
    Ok(())
  }

  pub fn isvalid(&self) -> bool {
    self.check().is_ok()
  }

  /// Flip every face's winding (swap the last two indices).
  pub fn flip(&mut self) {
    for f in &mut self.faces {
      f.swap(1, 2);
    }
  }

  /// Merge points closer than `limit`, rewrite faces through the remap,
  /// and drop faces that degenerate. Returns the remap.
  pub fn mergeclose(&mut self, limit: f64) -> Vec<u32> {
    let snapshot = self.points.snapshot();
    let (remap, compacted) = mergeclose_remap(&snapshot, limit);
    self.points.make_unique();
    self.points.replace(compacted);
    let mut new_faces = Vec::with_capacity(self.faces.len());
    let mut new_tracks = Vec::with_capacity(self.tracks.len());
    for (f, &t) in self.faces.iter().zip(&self.tracks) {
      let nf = [remap[f[0] as usize], remap[f[1] as usize], remap[f[2] as usize]];
      if nf[0] != nf[1] && nf[1] != nf[2] && nf[2] != nf[0] {
        new_faces.push(nf);
        new_tracks.push(t);
      }
    }
    self.faces = new_faces;
    self.tracks = new_tracks;
    remap
  }

  /// Compact the point buffer down to only points referenced by a face.
  pub fn strippoints(&mut self) -> Vec<u32> {
    let used = self.used_points();
    let remap = strip_remap(self.points.len(), &used);
    let snapshot = self.points.snapshot();
    let compacted: Vec<DVec3> = {
      let mut out = vec![DVec3::ZERO; used.len()];
      for (old, &new) in remap.iter().enumerate() {
        if new != NONE {
          out[new as usize] = snapshot[old];
        }
      }
      out
    };
    self.points.make_unique();
    self.points.replace(compacted);
    for f in &mut self.faces {
      for i in f.iter_mut() {
        *i = remap[*i as usize];
      }
    }
    remap
  }

  /// Compact the group buffer down to only groups referenced by a track.
  pub fn stripgroups(&mut self) -> Vec<u32>
  where
    G: Clone,
  {
    let used: Vec<u32> = {
      let mut u = self.tracks.clone();
      u.sort_unstable();
      u.dedup();
      u
    };
    let remap = strip_remap(self.groups.len(), &used);
    let snapshot = self.groups.snapshot();
    let compacted: Vec<G> = {
      let mut out: Vec<Option<G>> = vec![None; used.len()];
      for (old, &new) in remap.iter().enumerate() {
        if new != NONE {
          out[new as usize] = Some(snapshot[old].clone());
        }
      }
      out.into_iter().map(|o| o.expect("every new slot filled")).collect()
    };
    self.groups.make_unique();
    self.groups.replace(compacted);
    for t in &mut self.tracks {
      *t = remap[*t as usize];
    }
    remap
  }

  /// Normalize the mesh: merge coincident points, drop unused groups, and
  /// validate. `limit` defaults to [`PointContainer::precision`] when `None`.
  pub fn finish(&mut self, limit: Option<f64>) -> Result<()> {
    let limit = limit.unwrap_or_else(|| self.precision());
    self.mergeclose(limit);
    self.stripgroups();
    self.check()
  }

  /// Nearest face to `pt`: squared distance and that face's track.
  ///
  /// Tracks both the running best distance *and* the best track together,
  /// so the result is genuinely the nearest face's track rather than
  /// whichever face happened to be scanned last.
  pub fn groupnear(&self, pt: DVec3) -> Option<(f64, u32)> {
    let mut best: Option<(f64, u32)> = None;
    for fi in 0..self.faces.len() {
      let [a, b, c] = self.facepoints(fi);
      let d2 = super::point_triangle_dist2(pt, a, b, c);
      if best.map(|(b, _)| d2 < b).unwrap_or(true) {
        best = Some((d2, self.tracks[fi]));
      }
    }
    best
  }

  /// Index of the nearest point to `pt`, by plain linear scan with an
  /// explicit comparison key (not an unkeyed `min`, which would compare
  /// indices instead of distances).
  pub fn pointnear(&self, pt: DVec3) -> Option<u32> {
    let used = self.used_points();
    used
      .into_iter()
      .min_by(|&a, &b| {
        let da = (self.pointat(a) - pt).length_squared();
        let db = (self.pointat(b) - pt).length_squared();
        da.partial_cmp(&db).unwrap()
      })
  }

  pub fn used_point_coords(&self) -> Vec<DVec3> {
    self.used_points().into_iter().map(|i| self.pointat(i)).collect()
  }

  /// Split every point referenced by faces from more than one group into
  /// per-group copies, so group boundaries become hard edges for
  /// subsequent normal computation. Returns the new track-per-point vector
  /// (aligned with the possibly-extended point buffer).
  pub fn splitgroups(&mut self) -> Vec<u32> {
    let mut point_track: HashMap<u32, u32> = HashMap::new();
    let mut conflicted: std::collections::HashSet<u32> = std::collections::HashSet::new();
    for (f, &t) in self.faces.iter().zip(&self.tracks) {
      for &p in f {
        match point_track.get(&p) {
          None => {
            point_track.insert(p, t);
          }
          Some(&existing) if existing != t => {
            conflicted.insert(p);
          }
          _ => {}
        }
      }
    }

    let old_len = self.points.len();
    let mut point_tracks = vec![0u32; old_len];
    for (&p, &t) in &point_track {
      point_tracks[p as usize] = t;
    }

    let mut dup_of: HashMap<(u32, u32), u32> = HashMap::new();
    let snapshot = self.points.snapshot();
    let mut appended = Vec::new();
    let mut appended_tracks = Vec::new();

    for (f, &t) in self.faces.iter_mut().zip(self.tracks.iter()) {
      for i in f.iter_mut() {
        if conflicted.contains(i) {
          let key = (*i, t);
          let new_index = *dup_of.entry(key).or_insert_with(|| {
            let idx = old_len as u32 + appended.len() as u32;
            appended.push(snapshot[*i as usize]);
            appended_tracks.push(t);
            idx
          });
          *i = new_index;
        }
      }
    }

    self.points.extend(appended);
    point_tracks.extend(appended_tracks);
    point_tracks
  }

  /// Split the mesh into its connected components (by shared edges), each
  /// a fresh mesh sharing the original point buffer.
  pub fn islands(&self) -> Vec<Mesh<G>> {
    let n = self.faces.len();
    let mut reached = vec![false; n];
    let adjacency = face_adjacency(&self.faces);
    let mut islands = Vec::new();

    for seed in 0..n {
      if reached[seed] {
        continue;
      }
      let mut stack = vec![seed];
      let mut members = Vec::new();
      while let Some(f) = stack.pop() {
        if reached[f] {
          continue;
        }
        reached[f] = true;
        members.push(f);
        if let Some(neighbors) = adjacency.get(&f) {
          for &g in neighbors {
            if !reached[g] {
              stack.push(g);
            }
          }
        }
      }
      let faces: Vec<[u32; 3]> = members.iter().map(|&i| self.faces[i]).collect();
      let tracks: Vec<u32> = members.iter().map(|&i| self.tracks[i]).collect();
      islands.push(Mesh {
        points: self.points.clone(),
        faces,
        tracks,
        groups: self.groups.clone(),
      });
    }
    islands
  }

  /// Flip the minimum set of faces so every island's faces agree on a
  /// consistent outward winding.
  ///
  /// `direction` seeds each island's orientation: the face maximizing
  /// `(dot(facepoint, direction), |dot(normal, direction)|)` is flipped (if
  /// needed) so its normal agrees with `direction`, then that orientation
  /// propagates across the island through shared edges. With no direction,
  /// `point - barycenter` is used instead, pushing the seed face toward
  /// pointing away from the island's center.
  pub fn orient(&mut self, direction: Option<DVec3>) {
    let n = self.faces.len();
    if n == 0 {
      return;
    }
    let adjacency = face_adjacency(&self.faces);
    let normals = self.facenormals();
    let barycenter = self.barycenter();

    let mut reached = vec![false; n];
    for seed_root in 0..n {
      if reached[seed_root] {
        continue;
      }

      // find this island's members first (without mutating orientation).
      let mut island = Vec::new();
      let mut stack = vec![seed_root];
      let mut seen = vec![false; n];
      seen[seed_root] = true;
      while let Some(f) = stack.pop() {
        island.push(f);
        if let Some(neigh) = adjacency.get(&f) {
          for &g in neigh {
            if !seen[g] {
              seen[g] = true;
              stack.push(g);
            }
          }
        }
      }

      let dir_for = |fi: usize| direction.unwrap_or_else(|| self.facepoints(fi)[0] - barycenter);
      let seed = *island
        .iter()
        .max_by(|&&a, &&b| {
          let da = dir_for(a);
          let db = dir_for(b);
          let pa = self.facepoints(a)[0].dot(da);
          let pb = self.facepoints(b)[0].dot(db);
          let ka = (pa, normals[a].dot(da).abs());
          let kb = (pb, normals[b].dot(db).abs());
          ka.partial_cmp(&kb).unwrap()
        })
        .copied()
        .unwrap();

      if normals[seed].dot(dir_for(seed)) < 0.0 {
        self.faces[seed].swap(1, 2);
      }

      let mut flipped = vec![false; n];
      let mut visited = vec![false; n];
      let mut stack = vec![seed];
      visited[seed] = true;
      while let Some(f) = stack.pop() {
        reached[f] = true;
        let face = self.faces[f];
        for e in 0..3 {
          let (a, b) = (face[e], face[(e + 1) % 3]);
          if let Some(neigh) = adjacency.get(&f) {
            for &g in neigh {
              if visited[g] {
                continue;
              }
              let gf = self.faces[g];
              let shares_same_direction = (0..3).any(|ge| gf[ge] == a && gf[(ge + 1) % 3] == b);
              if gf.contains(&a) && gf.contains(&b) {
                visited[g] = true;
                if shares_same_direction {
                  self.faces[g].swap(1, 2);
                  flipped[g] = true;
                }
                stack.push(g);
              }
            }
          }
        }
      }
    }
  }
}

impl<G> PointContainer for Mesh<G> {
  fn points(&self) -> &SharedBuf<DVec3> {
    &self.points
  }
  fn points_mut(&mut self) -> &mut SharedBuf<DVec3> {
    &mut self.points
  }
  fn used_points(&self) -> Vec<u32> {
    let mut set: Vec<u32> = self.faces.iter().flatten().copied().collect();
    set.sort_unstable();
    set.dedup();
    set
  }
}

/// Face-to-adjacent-faces map across shared unordered edges.
fn face_adjacency(faces: &[[u32; 3]]) -> HashMap<usize, Vec<usize>> {
  let mut by_edge: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
  for (fi, f) in faces.iter().enumerate() {
    for e in 0..3 {
      by_edge
        .entry(edgekey(f[e], f[(e + 1) % 3]))
        .or_default()
        .push(fi);
    }
  }
  let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();
  for faces_sharing in by_edge.values() {
    if faces_sharing.len() < 2 {
      continue;
    }
    for &a in faces_sharing {
      for &b in faces_sharing {
        if a != b {
          adjacency.entry(a).or_default().push(b);
        }
      }
    }
  }
  adjacency
}

#[cfg(test)]
#[path = "mesh_type_test.rs"]
mod mesh_type_test;
