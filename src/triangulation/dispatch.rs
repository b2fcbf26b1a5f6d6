//! Single entry point choosing between the two outline triangulators.

use glam::DVec3;

use crate::error::{KernelError, Result};
use crate::mesh::{Mesh, Wire};

use super::earclip::triangulation_outline;
use super::skeleton::triangulation_skeleton;

/// Triangulate a closed [`Wire`]: try ear-clipping first, and fall back to
/// the straight skeleton if the loop defeats it (a topology error — e.g. no
/// ear ever scores non-negative). Any other error (too few points, a
/// degenerate plane) is returned as-is without falling back.
pub fn triangulation<G: Clone>(wire: &Wire<G>, normal: Option<DVec3>) -> Result<Mesh<G>> {
  let mut indices = wire.indices().to_vec();
  if wire.is_closed() && indices.len() > 1 {
    indices.pop();
  }
  match triangulation_outline(wire.points().clone(), &indices, normal, wire.groups().clone()) {
    Ok(mesh) => Ok(mesh),
    Err(KernelError::Topology(_)) => triangulation_skeleton(wire.points().clone(), &indices, normal, wire.groups().clone()),
    Err(other) => Err(other),
  }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;
