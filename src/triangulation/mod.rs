//! Filling a closed outline with triangles.
//!
//! [`triangulation`] is the entry point most callers want: ear-clip the
//! loop, and fall back to the straight skeleton ([`triangulation_skeleton`])
//! if the loop stalls ear-clipping. [`triangulation_sweepline`] handles the
//! broader case of an outline made of several disjoint closed loops (an
//! outer boundary plus holes) by splitting them apart first.

mod dispatch;
mod earclip;
mod project;
mod skeleton;
mod sweepline;

pub use dispatch::triangulation;
pub use earclip::{aesthetic, triangulation_outline};
pub use project::{guessbase, planeproject, planeunproject};
pub use skeleton::triangulation_skeleton;
pub use sweepline::{sweepline_loops, triangulation_sweepline};
