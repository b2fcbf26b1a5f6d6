//! Error types surfaced by the geometry kernel.
//!
//! Every fallible entry point returns [`Result<T, KernelError>`]; helpers never
//! swallow an error, they propagate it with `?`. [`KernelError`] groups the four
//! kinds of failure the kernel can encounter: bad preconditions, broken topology
//! invariants, an algorithm that cannot make progress, and the ("informational
//! only") numeric warning path, which goes through `tracing` rather than this
//! enum since the caller can safely ignore it.

use thiserror::Error;

/// Errors produced by kernel operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
  /// A caller-supplied argument violates a requirement the operation cannot
  /// work around (mismatched cellsize, non-positive cellsize, empty input).
  #[error("precondition violation: {0}")]
  Precondition(String),

  /// A container invariant doesn't hold: an out-of-range index, a length
  /// mismatch between `faces`/`tracks`, or a degenerate/non-manifold element.
  #[error("topology error: {0}")]
  Topology(String),

  /// An algorithm ran out of options to make progress (e.g. the straight
  /// skeleton solver has no finite bisector intersection left).
  #[error("algorithm failure: {0}")]
  AlgorithmFailure(String),
}

/// Result alias used throughout the kernel.
pub type Result<T> = std::result::Result<T, KernelError>;

impl KernelError {
  pub fn precondition(msg: impl Into<String>) -> Self {
    KernelError::Precondition(msg.into())
  }

  pub fn topology(msg: impl Into<String>) -> Self {
    KernelError::Topology(msg.into())
  }

  pub fn algorithm_failure(msg: impl Into<String>) -> Self {
    KernelError::AlgorithmFailure(msg.into())
  }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
