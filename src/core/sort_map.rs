use std::fmt::{Debug, Formatter};

use crate::abstractions::{HashMap, IString};

/// Maps surface type names to sort names. Unmapped names translate to themselves.
///
/// The table keeps one of these for its declared types (and the built-in `Bool → bool`), and an import carries another
/// that renames sorts read from the import file.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SortTranslationMap {
  map: HashMap<IString, IString>,
}

impl SortTranslationMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Binds `from → to`, returning the previous target of `from`.
  pub fn bind(&mut self, from: IString, to: IString) -> Option<IString> {
    self.map.insert(from, to)
  }

  pub fn find(&self, from: &IString) -> Option<&IString> {
    self.map.get(from)
  }

  pub fn translate(&self, name: &IString) -> IString {
    self.find(name).cloned().unwrap_or_else(|| name.clone())
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.map.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.map.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&IString, &IString)> {
    self.map.iter()
  }
}

impl<A: Into<IString>, B: Into<IString>> FromIterator<(A, B)> for SortTranslationMap {
  fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
    SortTranslationMap {
      map: iter.into_iter().map(|(from, to)| (from.into(), to.into())).collect(),
    }
  }
}

impl Debug for SortTranslationMap {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut pairs: Vec<_> = self.map.iter().map(|(from, to)| format!("{} -> {}", from, to)).collect();
    pairs.sort();
    write!(f, "{{{}}}", pairs.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn translate_falls_back_to_identity() {
    let map: SortTranslationMap = [("Bool", "bool"), ("elem", "int")].into_iter().collect();

    assert_eq!(&*map.translate(&IString::from("Bool")), "bool");
    assert_eq!(&*map.translate(&IString::from("char")), "char");
    assert_eq!(format!("{:?}", map), "{Bool -> bool, elem -> int}");
  }
}
