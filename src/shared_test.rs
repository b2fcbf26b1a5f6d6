use super::*;

#[test]
fn clones_share_storage_until_made_unique() {
  let a = SharedBuf::new(vec![1, 2, 3]);
  let b = a.clone();
  assert!(a.ptr_eq(&b));
  a.push(4);
  assert_eq!(b.len(), 4);
}

#[test]
fn make_unique_isolates_future_writes() {
  let mut a = SharedBuf::new(vec![1, 2, 3]);
  let b = a.clone();
  a.make_unique();
  assert!(!a.ptr_eq(&b));
  a.push(9);
  assert_eq!(b.len(), 3);
  assert_eq!(a.len(), 4);
}

#[test]
fn make_unique_is_a_noop_for_sole_owner() {
  let mut a = SharedBuf::new(vec![1, 2, 3]);
  a.make_unique();
  assert_eq!(a.snapshot(), vec![1, 2, 3]);
}
