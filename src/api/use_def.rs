/*!

The interface to the checker's use/def table, which tracks C-level declarations. When an import introduces a name the
use/def table has never seen, a placeholder is created there so that later C code referring to the name resolves.

*/

use crate::{
  abstractions::IString,
  api::token::SourceLocation,
};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PlaceholderKind {
  /// `mutable` is `None` for exposed types, whose mutability is that of their representation.
  Datatype { abstract_: bool, mutable: Option<bool> },
  Variable,
  Constant,
  Function,
}

pub trait UseDefTable {
  /// Whether `name` is declared in the global scope, in either the ordinary or the tag namespace.
  fn exists_global(&self, name: &IString) -> bool;

  /// Whether `name` is declared in any scope.
  fn exists_any(&self, name: &IString) -> bool {
    self.exists_global(name)
  }

  fn add_placeholder(&mut self, name: IString, kind: PlaceholderKind, location: &SourceLocation);
}
