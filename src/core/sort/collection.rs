use std::collections::hash_map::Entry;

use crate::{
  abstractions::{HashMap, IString},
  core::{
    names,
    sort::{Sort, SortId, SortKind, SortSet},
  },
};

/// Synonym chains longer than this are treated as cyclic.
const MAX_SYNONYM_DEPTH: usize = 64;

/// The registry of every sort known to a symbol table. Sorts are created on demand and never removed.
///
/// A fresh collection holds the "no sort" sentinel at index 0 followed by the built-in primitive sorts.
#[derive(Clone, Debug)]
pub struct SortCollection {
  sorts  : Vec<Sort>,
  by_name: HashMap<IString, SortId>,
}

impl Default for SortCollection {
  fn default() -> Self {
    let mut collection = SortCollection {
      sorts  : Vec::new(),
      by_name: HashMap::new(),
    };
    collection.get_or_create(names::NO_SORT.clone(), SortKind::NoSort);
    for name in names::builtin_primitive_sorts() {
      collection.get_or_create(name.clone(), SortKind::Primitive);
    }
    collection
  }
}

impl SortCollection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the sort named `name`, creating it with `kind` if it does not exist. An existing sort keeps its
  /// original kind unless it was only `Named`.
  pub fn get_or_create(&mut self, name: IString, kind: SortKind) -> SortId {
    match self.by_name.entry(name.clone()) {
      Entry::Occupied(existing) => {
        let id   = *existing.get();
        let sort = &mut self.sorts[id.index()];
        if sort.kind == SortKind::Named {
          sort.kind = kind;
        }
        id
      }
      Entry::Vacant(vacant) => {
        let id = SortId::from_index(self.sorts.len());
        self.sorts.push(Sort::new(name, kind, id));
        vacant.insert(id);
        id
      }
    }
  }

  pub fn get_or_create_primitive(&mut self, name: IString) -> SortId {
    self.get_or_create(name, SortKind::Primitive)
  }

  /// Registers a sort mentioned by name, leaving its kind open.
  pub fn intern(&mut self, name: &IString) -> SortId {
    self.get_or_create(name.clone(), SortKind::Named)
  }

  /// Looks up a sort by name, returning the `SortId::NONE` sentinel if there is no such sort.
  pub fn lookup_name(&self, name: &IString) -> SortId {
    self.find(name).unwrap_or(SortId::NONE)
  }

  pub fn find(&self, name: &IString) -> Option<SortId> {
    self.by_name.get(name).copied()
  }

  /// Ids handed out by another collection are out of range here and resolve to the sentinel.
  pub fn get(&self, id: SortId) -> &Sort {
    self.sorts.get(id.index()).unwrap_or(&self.sorts[SortId::NONE.index()])
  }

  pub fn name(&self, id: SortId) -> IString {
    self.get(id).name.clone()
  }

  pub fn kind(&self, id: SortId) -> SortKind {
    self.get(id).kind
  }

  pub fn make_pointer(&mut self, base: SortId) -> SortId {
    self.derive(base, names::POINTER_SUFFIX, SortKind::Pointer(base))
  }

  pub fn make_array(&mut self, base: SortId) -> SortId {
    self.derive(base, names::ARRAY_SUFFIX, SortKind::Array(base))
  }

  pub fn make_object(&mut self, base: SortId) -> SortId {
    if matches!(self.kind(base), SortKind::Object(_)) {
      return base;
    }
    self.derive(base, names::OBJECT_SUFFIX, SortKind::Object(base))
  }

  /// Registers `name` as another name for `base`.
  pub fn make_synonym(&mut self, name: IString, base: SortId) -> SortId {
    self.get_or_create(name, SortKind::Synonym(base))
  }

  /// The sort of the values held by `id`: object sorts yield their contents, synonyms are resolved.
  pub fn make_value(&self, id: SortId) -> SortId {
    let mut current = id;
    for _ in 0..MAX_SYNONYM_DEPTH {
      match self.kind(current) {
        SortKind::Object(base) | SortKind::Synonym(base) => current = base,
        _ => return current,
      }
    }
    current
  }

  /// Resolves synonyms only.
  pub fn underlying(&self, id: SortId) -> SortId {
    let mut current = id;
    for _ in 0..MAX_SYNONYM_DEPTH {
      match self.kind(current) {
        SortKind::Synonym(base) => current = base,
        _ => return current,
      }
    }
    current
  }

  pub fn is_mutable(&self, id: SortId) -> bool {
    match self.kind(self.underlying(id)) {
      SortKind::Object(_) | SortKind::Array(_)     => true,
      SortKind::Abstract { mutable }                  => mutable,
      _                                               => false,
    }
  }

  /// Every registered pointer sort, in creation order.
  pub fn pointer_sorts(&self) -> impl Iterator<Item = SortId> + '_ {
    self.sorts.iter().filter(|sort| sort.is_pointer()).map(|sort| sort.id)
  }

  /// Builds a sort set from names, skipping names that are not registered.
  pub fn set_of<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> SortSet {
    names
        .into_iter()
        .filter_map(|name| self.find(&IString::from(name)))
        .collect()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.sorts.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.sorts.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Sort> {
    self.sorts.iter()
  }

  // Derived sorts of the sentinel are the sentinel.
  fn derive(&mut self, base: SortId, suffix: &str, kind: SortKind) -> SortId {
    if base.is_none() {
      return SortId::NONE;
    }
    let name = IString::from(format!("{}{}", self.get(base).name, suffix));
    self.get_or_create(name, kind)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtins_and_sentinel() {
    let sorts = SortCollection::new();
    assert_eq!(sorts.lookup_name(&IString::from("_NoSort")), SortId::NONE);
    assert_eq!(sorts.lookup_name(&IString::from("nonesuch")), SortId::NONE);
    assert!(!sorts.lookup_name(&IString::from("int")).is_none());
    assert!(!sorts.lookup_name(&IString::from("double")).is_none());
  }

  #[test]
  fn derived_sorts_are_interned() {
    let mut sorts = SortCollection::new();
    let int       = sorts.lookup_name(&IString::from("int"));
    let ptr       = sorts.make_pointer(int);

    assert_eq!(&*sorts.name(ptr), "int_Ptr");
    assert_eq!(sorts.make_pointer(int), ptr);
    assert_eq!(sorts.kind(ptr), SortKind::Pointer(int));
    assert_eq!(sorts.pointer_sorts().collect::<Vec<_>>(), vec![ptr]);
    assert_eq!(sorts.make_pointer(SortId::NONE), SortId::NONE);
  }

  #[test]
  fn value_and_mutability() {
    let mut sorts = SortCollection::new();
    let int       = sorts.lookup_name(&IString::from("int"));
    let obj       = sorts.make_object(int);
    let alias     = sorts.make_synonym(IString::from("count"), obj);
    let set       = sorts.get_or_create(IString::from("set"), SortKind::Abstract { mutable: true });
    let name      = sorts.get_or_create(IString::from("name"), SortKind::Abstract { mutable: false });

    assert_eq!(sorts.make_object(obj), obj);
    assert_eq!(sorts.make_value(alias), int);
    assert_eq!(sorts.underlying(alias), obj);
    assert!(sorts.is_mutable(alias));
    assert!(sorts.is_mutable(set));
    assert!(!sorts.is_mutable(name));
    assert!(!sorts.is_mutable(int));
  }

  #[test]
  fn synonym_cycles_terminate() {
    let mut sorts = SortCollection::new();
    let a         = sorts.get_or_create(IString::from("a"), SortKind::Primitive);
    let b         = sorts.make_synonym(IString::from("b"), a);
    assert_eq!(sorts.underlying(b), a);

    // `c` names the id `d` is about to receive, closing the cycle c -> d -> c.
    let d_id = SortId::from_index(sorts.len() + 1);
    let c    = sorts.make_synonym(IString::from("c"), d_id);
    let d    = sorts.make_synonym(IString::from("d"), c);

    assert_eq!(d, d_id);
    assert_eq!(sorts.kind(c), SortKind::Synonym(d));
    assert_eq!(sorts.kind(d), SortKind::Synonym(c));

    let end = sorts.underlying(c);
    assert!(end == c || end == d);
    let end = sorts.make_value(d);
    assert!(end == c || end == d);
    assert!(!sorts.is_mutable(c));
  }

  #[test]
  fn named_sorts_take_their_definition() {
    let mut sorts = SortCollection::new();
    let list      = sorts.intern(&IString::from("list"));
    let int       = sorts.intern(&IString::from("int"));

    assert!(!list.is_none());
    assert_eq!(sorts.kind(list), SortKind::Named);
    assert_eq!(sorts.kind(int), SortKind::Primitive);
    assert_eq!(sorts.intern(&IString::from("_NoSort")), SortId::NONE);

    let defined = sorts.get_or_create(IString::from("list"), SortKind::Abstract { mutable: true });
    assert_eq!(defined, list);
    assert_eq!(sorts.kind(list), SortKind::Abstract { mutable: true });
    // A defined kind is not replaced again.
    sorts.get_or_create(IString::from("list"), SortKind::Primitive);
    assert_eq!(sorts.kind(list), SortKind::Abstract { mutable: true });
  }
}
