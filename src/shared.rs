//! Copy-on-write shared buffer used for the point/group storage that
//! [`Mesh`](crate::mesh::Mesh), [`Web`](crate::mesh::Web) and
//! [`Wire`](crate::mesh::Wire) may hold in common.
//!
//! Multiple containers can reference the same buffer as long as every
//! holder only appends. An operation that rewrites existing entries
//! (`mergepoints`, `strippoints`, `mergeclose`) must call
//! [`SharedBuf::make_unique`] first so other holders keep seeing the
//! buffer as it was.

use std::sync::{Arc, RwLock};

pub struct SharedBuf<T>(Arc<RwLock<Vec<T>>>);

impl<T> Clone for SharedBuf<T> {
  fn clone(&self) -> Self {
    Self(Arc::clone(&self.0))
  }
}

impl<T> SharedBuf<T> {
  pub fn new(items: Vec<T>) -> Self {
    Self(Arc::new(RwLock::new(items)))
  }

  pub fn len(&self) -> usize {
    self.0.read().unwrap().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Whether `self` and `other` point at the same underlying storage (used
  /// to decide whether indices need offsetting when joining containers).
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }

  pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
    f(&self.0.read().unwrap())
  }

  /// Force this handle to own a private copy of the data before a rewrite,
  /// so any other holder of the (now former) shared handle is unaffected.
  pub fn make_unique(&mut self)
  where
    T: Clone,
  {
    if Arc::strong_count(&self.0) > 1 {
      let data = self.0.read().unwrap().clone();
      self.0 = Arc::new(RwLock::new(data));
    }
  }

  /// Wholesale replacement of the buffer's contents. Callers that don't
  /// want to disturb other holders should call [`make_unique`](Self::make_unique) first.
  pub fn replace(&self, items: Vec<T>) {
    *self.0.write().unwrap() = items;
  }
}

impl<T: Clone> SharedBuf<T> {
  pub fn snapshot(&self) -> Vec<T> {
    self.0.read().unwrap().clone()
  }

  pub fn get(&self, i: usize) -> T {
    self.0.read().unwrap()[i].clone()
  }

  pub fn push(&self, v: T) -> usize {
    let mut guard = self.0.write().unwrap();
    guard.push(v);
    guard.len() - 1
  }

  pub fn extend(&self, items: impl IntoIterator<Item = T>) {
    self.0.write().unwrap().extend(items);
  }
}

impl<T> Default for SharedBuf<T> {
  fn default() -> Self {
    Self(Arc::new(RwLock::new(Vec::new())))
  }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SharedBuf<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("SharedBuf").field(&self.0.read().unwrap()).finish()
  }
}

#[cfg(test)]
#[path = "shared_test.rs"]
mod shared_test;
