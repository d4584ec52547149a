/*!

A `NatSet` is a set of small natural numbers backed by a bit vector. Sort sets are `NatSet`s of sort indices, so
membership tests during overload resolution are a single bit probe.

*/

use std::fmt::{Debug, Formatter};

use bit_set::BitSet;

use crate::abstractions::join_string;

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct NatSet(BitSet);

impl NatSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts `value`, returning `true` if it was not already present.
  #[inline(always)]
  pub fn insert(&mut self, value: usize) -> bool {
    self.0.insert(value)
  }

  #[inline(always)]
  pub fn remove(&mut self, value: usize) -> bool {
    self.0.remove(value)
  }

  #[inline(always)]
  pub fn contains(&self, value: usize) -> bool {
    self.0.contains(value)
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn union_in_place(&mut self, other: &NatSet) {
    self.0.union_with(&other.0);
  }

  pub fn is_subset(&self, other: &NatSet) -> bool {
    self.0.is_subset(&other.0)
  }

  /// Iterates over the members in increasing order.
  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.0.iter()
  }
}

impl FromIterator<usize> for NatSet {
  fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
    let mut set = NatSet::new();
    for value in iter {
      set.insert(value);
    }
    set
  }
}

impl Debug for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{{}}}", join_string(self.iter(), ", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_and_union() {
    let mut a: NatSet = [1, 3].into_iter().collect();
    let b: NatSet     = [3, 7].into_iter().collect();

    assert!(!a.insert(3));
    assert!(a.insert(4));
    a.union_in_place(&b);

    assert_eq!(a.iter().collect::<Vec<_>>(), vec![1, 3, 4, 7]);
    assert!(b.is_subset(&a));
    assert_eq!(format!("{:?}", b), "{3, 7}");
  }
}
