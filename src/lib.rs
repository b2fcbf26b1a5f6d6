//! geo_kernel - framework-independent piecewise-linear geometry kernel
//!
//! This crate provides the geometric core of a parametric CAD pipeline:
//! point/segment/triangle spatial hashing, triangle-mesh and wireframe
//! topology (`Mesh`, `Web`, `Wire`), the connectivity and distance queries
//! built on top of them, and outline triangulation. It does not touch
//! rendering, windowing, file I/O, or linear algebra itself (`glam` already
//! covers that); see each module for its exact scope.
//!
//! # Example
//!
//! ```
//! use geo_kernel::mesh::Mesh;
//! use glam::DVec3;
//!
//! let points = vec![
//!   DVec3::new(0.0, 0.0, 0.0),
//!   DVec3::new(1.0, 0.0, 0.0),
//!   DVec3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh = Mesh::<()>::from_faces(points, vec![[0, 1, 2]]);
//! assert!((mesh.surface() - 0.5).abs() < 1e-9);
//! ```

pub mod error;
pub mod hashing;
pub mod mesh;
pub mod numeric;
pub mod shared;
pub mod triangulation;

pub use error::{KernelError, Result};
pub use hashing::{PointSet, PositionMap};
pub use mesh::{Mesh, Web, Wire};
pub use numeric::Aabb;
pub use shared::SharedBuf;
pub use triangulation::{triangulation, triangulation_skeleton, triangulation_sweepline};
