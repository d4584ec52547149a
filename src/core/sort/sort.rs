/*!

A `Sort` is a named abstract type. Sorts are interned in a [`SortCollection`](crate::core::sort::collection::SortCollection)
and referred to everywhere else by a copyable [`SortId`] handle, so binding records and sort sets never own sort data.

## Lifecycle and Ownership

Sorts are owned by the `SortCollection` of the `SymbolTable` that created them and live as long as that table. A
`SortId` is only meaningful relative to the collection that issued it.

## Derived Sorts

Besides primitive and declared sorts, the checker constructs sorts structurally from a base sort: the pointer sort
`T_Ptr`, the array sort `T_Arr`, and the object (location) sort `T_Obj`. A *synonym* stands for another sort under a
second name. The *value* sort of a sort strips the object layer and resolves synonyms.

*/

use std::fmt::Display;

use crate::abstractions::IString;

/// A handle to a sort within a `SortCollection`. Index 0 is the "no sort" sentinel.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SortId(u32);

impl SortId {
  /// The sentinel substituted wherever a sort cannot be resolved.
  pub const NONE: SortId = SortId(0);

  #[inline(always)]
  pub(crate) fn from_index(index: usize) -> SortId {
    SortId(index as u32)
  }

  #[inline(always)]
  pub fn index(self) -> usize {
    self.0 as usize
  }

  #[inline(always)]
  pub fn is_none(self) -> bool {
    self == SortId::NONE
  }
}

impl Default for SortId {
  fn default() -> Self {
    SortId::NONE
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SortKind {
  NoSort,
  /// Known only by name, from a signature or declaration. A later definition of the sort fixes its kind.
  Named,
  Primitive,
  Synonym(SortId),
  Pointer(SortId),
  Array(SortId),
  Object(SortId),
  Abstract { mutable: bool },
  Enum,
  Struct,
  Union,
}

impl SortKind {
  /// The sort this one is structurally derived from, if any.
  pub fn base(&self) -> Option<SortId> {
    match self {
      SortKind::Synonym(base)
      | SortKind::Pointer(base)
      | SortKind::Array(base)
      | SortKind::Object(base) => Some(*base),
      _ => None,
    }
  }
}

#[derive(Clone, Debug)]
pub struct Sort {
  pub name: IString,
  pub kind: SortKind,
  pub id  : SortId,
}

impl Sort {
  pub fn new(name: IString, kind: SortKind, id: SortId) -> Sort {
    Sort { name, kind, id }
  }

  #[inline(always)]
  pub fn is_pointer(&self) -> bool {
    matches!(self.kind, SortKind::Pointer(_))
  }
}

impl Display for Sort {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name)
  }
}
