use std::fmt::{Debug, Formatter};

use crate::{
  abstractions::NatSet,
  core::sort::SortId,
};

/// The set of sorts an argument may have. Overload resolution tests each domain sort of a candidate signature for
/// membership in the set supplied for that position.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct SortSet(NatSet);

impl SortSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn singleton(sort: SortId) -> Self {
    let mut set = SortSet::new();
    set.insert(sort);
    set
  }

  /// Returns `true` if `sort` was not already a member.
  #[inline(always)]
  pub fn insert(&mut self, sort: SortId) -> bool {
    self.0.insert(sort.index())
  }

  #[inline(always)]
  pub fn contains(&self, sort: SortId) -> bool {
    self.0.contains(sort.index())
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn union_in_place(&mut self, other: &SortSet) {
    self.0.union_in_place(&other.0);
  }

  pub fn iter(&self) -> impl Iterator<Item = SortId> + '_ {
    self.0.iter().map(SortId::from_index)
  }
}

impl FromIterator<SortId> for SortSet {
  fn from_iter<I: IntoIterator<Item = SortId>>(iter: I) -> Self {
    SortSet(iter.into_iter().map(SortId::index).collect())
  }
}

impl Extend<SortId> for SortSet {
  fn extend<I: IntoIterator<Item = SortId>>(&mut self, iter: I) {
    for sort in iter {
      self.insert(sort);
    }
  }
}

impl Debug for SortSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Debug::fmt(&self.0, f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn membership() {
    let int    = SortId::from_index(2);
    let double = SortId::from_index(4);
    let mut set = SortSet::singleton(int);

    assert!(set.contains(int));
    assert!(!set.contains(double));
    set.extend([double, int]);
    assert_eq!(set.len(), 2);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![int, double]);
  }
}
