use super::*;

#[test]
fn precondition_message_roundtrips() {
  let err = KernelError::precondition("cellsize mismatch");
  assert_eq!(format!("{err}"), "precondition violation: cellsize mismatch");
}

#[test]
fn topology_and_algorithm_failure_are_distinct_variants() {
  let a = KernelError::topology("dangling index");
  let b = KernelError::algorithm_failure("no intersection left");
  assert_ne!(a, b);
  assert!(matches!(a, KernelError::Topology(_)));
  assert!(matches!(b, KernelError::AlgorithmFailure(_)));
}
