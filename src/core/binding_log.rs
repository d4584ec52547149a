/*!

The binding log is a single vector holding scope markers interleaved with bindings. Entering a scope pushes a marker;
exiting truncates back to and including the most recent marker, discarding every binding made in the scope. The
global marker is always the first entry and is never removed.

Two lookups are provided:

 - `lookup_any` scans the whole log from the top down. Since functions and types live only in the global scope, a
   full scan finds them wherever the caller is, and the most recent binding of a name shadows earlier ones.
 - `lookup_in_scope` scans from the top down but stops at the first marker that is not a quantifier scope. Nested
   quantifiers can see each other's variables, but a function, claim, or abstract type boundary cannot be crossed.

*/

use crate::{
  abstractions::IString,
  api::binding::{Binding, ScopeKind, VarInfo},
  core::contract_violation,
  trace,
};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LogEntry {
  Scope(ScopeKind),
  Binding(Binding),
}

#[derive(Clone, Debug)]
pub struct BindingLog {
  entries: Vec<LogEntry>,
}

impl Default for BindingLog {
  fn default() -> Self {
    BindingLog {
      entries: vec![LogEntry::Scope(ScopeKind::Global)],
    }
  }
}

impl BindingLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn enter_scope(&mut self, kind: ScopeKind) {
    if kind == ScopeKind::Global {
      contract_violation(format_args!("cannot enter a second global scope"));
    }
    trace!(5, "entering {}", kind);
    self.entries.push(LogEntry::Scope(kind));
  }

  /// Discards the innermost scope and every binding made in it.
  pub fn exit_scope(&mut self) {
    // The global marker sits at index 0, so only a marker at a positive index may be popped.
    let marker = self
        .entries
        .iter()
        .rposition(|entry| matches!(entry, LogEntry::Scope(_)))
        .filter(|&position| position > 0);

    match marker {
      Some(position) => {
        trace!(5, "exiting {}", self.scope_at(position));
        self.entries.truncate(position);
      }
      None => contract_violation(format_args!("no scope to exit")),
    }
  }

  /// Appends `binding` to the innermost scope. Functions and types may only be declared in the global scope.
  pub fn declare(&mut self, binding: Binding) {
    self.check_scope(&binding);
    trace!(4, "declaring {} {}", binding.description(), binding.name());
    self.entries.push(LogEntry::Binding(binding));
  }

  /// Panics if `binding` may not be declared in the current scope.
  pub fn check_scope(&self, binding: &Binding) {
    if binding.requires_global_scope() && self.current_scope() != ScopeKind::Global {
      contract_violation(format_args!(
        "{} `{}` declared in {}, expected global scope",
        binding.description(),
        binding.name(),
        self.current_scope()
      ));
    }
  }

  /// The most recent binding of `name` in any scope.
  pub fn lookup_any(&self, name: &IString) -> Option<&Binding> {
    self.entries.iter().rev().find_map(|entry| {
      match entry {
        LogEntry::Binding(binding) if binding.name() == name => Some(binding),
        _ => None,
      }
    })
  }

  /// The most recent binding of `name` visible without crossing a non-quantifier scope boundary.
  pub fn lookup_in_scope(&self, name: &IString) -> Option<&Binding> {
    for entry in self.entries.iter().rev() {
      match entry {
        LogEntry::Scope(kind) if !kind.is_transparent() => return None,
        LogEntry::Binding(binding) if binding.name() == name => return Some(binding),
        _ => {}
      }
    }
    None
  }

  /// Like `lookup_in_scope`, restricted to variables: a function or type of the same name does not stop the scan.
  pub fn var_info_in_scope(&self, name: &IString) -> Option<&VarInfo> {
    for entry in self.entries.iter().rev() {
      match entry {
        LogEntry::Scope(kind) if !kind.is_transparent() => return None,
        LogEntry::Binding(Binding::Variable(info)) if info.id.text == *name => return Some(info),
        _ => {}
      }
    }
    None
  }

  pub fn current_scope(&self) -> ScopeKind {
    self.entries
        .iter()
        .rev()
        .find_map(|entry| {
          match entry {
            LogEntry::Scope(kind) => Some(*kind),
            _ => None,
          }
        })
        .unwrap_or(ScopeKind::Global)
  }

  /// The number of open scopes, including the global scope.
  pub fn depth(&self) -> usize {
    self.entries.iter().filter(|entry| matches!(entry, LogEntry::Scope(_))).count()
  }

  /// The number of live bindings.
  pub fn binding_count(&self) -> usize {
    self.entries.len() - self.depth()
  }

  pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
    self.entries.iter()
  }

  pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
    self.entries.iter().filter_map(|entry| {
      match entry {
        LogEntry::Binding(binding) => Some(binding),
        _ => None,
      }
    })
  }

  fn scope_at(&self, position: usize) -> ScopeKind {
    match self.entries[position] {
      LogEntry::Scope(kind) => kind,
      _ => ScopeKind::Global,
    }
  }
}
