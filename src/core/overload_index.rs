/*!

The overload/tag index holds the two namespaces that ignore lexical scope: overloaded operators and tags.

An operator is indexed once per [`OperatorKey`]; all its signatures live in a single [`SignatureSet`] inside the entry,
so re-entering a signature already present changes nothing. Tags are indexed by their identifier.

*/

use std::collections::hash_map::Entry;

use crate::{
  abstractions::{HashMap, HashSet, IString},
  api::{
    operator::{OperatorKey, OperatorName, Signature},
    tag::TagInfo,
  },
};

#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct SignatureSet {
  signatures: HashSet<Signature>,
}

impl SignatureSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn singleton(signature: Signature) -> Self {
    let mut set = SignatureSet::new();
    set.insert(signature);
    set
  }

  /// Returns `true` if the signature was not already present.
  pub fn insert(&mut self, signature: Signature) -> bool {
    self.signatures.insert(signature)
  }

  pub fn contains(&self, signature: &Signature) -> bool {
    self.signatures.contains(signature)
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.signatures.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.signatures.is_empty()
  }

  /// Iteration order is unspecified. Use `sorted` where output must be stable.
  pub fn iter(&self) -> impl Iterator<Item = &Signature> {
    self.signatures.iter()
  }

  /// The signatures ordered by their printed form.
  pub fn sorted(&self) -> Vec<&Signature> {
    let mut signatures: Vec<&Signature> = self.signatures.iter().collect();
    signatures.sort_by_cached_key(|signature| signature.to_string());
    signatures
  }
}

#[derive(Clone, Debug)]
pub struct OperatorEntry {
  /// The name as first entered. Later names with the same key (`\eq` after `=`) do not replace it.
  pub name      : OperatorName,
  pub signatures: SignatureSet,
}

/// The result of entering a tag.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TagOutcome {
  Inserted,
  /// An entry of that name already existed and was kept.
  Ignored,
  /// The new entry replaced this one.
  Replaced(TagInfo),
}

#[derive(Clone, Default, Debug)]
pub struct OverloadIndex {
  operators      : HashMap<OperatorKey, OperatorEntry>,
  tags           : HashMap<IString, TagInfo>,
  signature_count: usize,
}

impl OverloadIndex {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds `signature` to the overloads of `name`. Returns `true` if the signature is new for this operator.
  pub fn enter_op(&mut self, name: OperatorName, signature: Signature) -> bool {
    let inserted = match self.operators.entry(name.key()) {
      Entry::Occupied(mut entry) => entry.get_mut().signatures.insert(signature),
      Entry::Vacant(vacant) => {
        vacant.insert(OperatorEntry {
          name,
          signatures: SignatureSet::singleton(signature),
        });
        true
      }
    };
    if inserted {
      self.signature_count += 1;
    }
    inserted
  }

  pub fn lookup_op(&self, name: &OperatorName) -> Option<&OperatorEntry> {
    self.operators.get(&name.key())
  }

  pub fn possible_ops(&self, name: &OperatorName) -> Option<&SignatureSet> {
    self.lookup_op(name).map(|entry| &entry.signatures)
  }

  pub fn op_exists_with_arity(&self, name: &OperatorName, arity: usize) -> bool {
    self.possible_ops(name)
        .is_some_and(|signatures| signatures.iter().any(|signature| signature.arity() == arity))
  }

  /// Enters `tag`. An existing entry is replaced when `force` is set or when the existing entry was imported;
  /// otherwise it is kept and the new tag dropped.
  pub fn enter_tag(&mut self, tag: TagInfo, force: bool) -> TagOutcome {
    match self.tags.entry(tag.name().clone()) {
      Entry::Vacant(vacant) => {
        vacant.insert(tag);
        TagOutcome::Inserted
      }
      Entry::Occupied(mut existing) => {
        if force || existing.get().imported {
          TagOutcome::Replaced(existing.insert(tag))
        } else {
          TagOutcome::Ignored
        }
      }
    }
  }

  pub fn lookup_tag(&self, name: &IString) -> Option<&TagInfo> {
    self.tags.get(name)
  }

  pub fn operators(&self) -> impl Iterator<Item = &OperatorEntry> {
    self.operators.values()
  }

  pub fn tags(&self) -> impl Iterator<Item = &TagInfo> {
    self.tags.values()
  }

  #[inline(always)]
  pub fn operator_count(&self) -> usize {
    self.operators.len()
  }

  #[inline(always)]
  pub fn signature_count(&self) -> usize {
    self.signature_count
  }

  #[inline(always)]
  pub fn tag_count(&self) -> usize {
    self.tags.len()
  }
}
