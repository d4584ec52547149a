/*!

The records held by the binding log: scope kinds and the three kinds of binding (function, type, variable).

Functions and types are only ever declared in the global scope. Variables come in several kinds. Only variables of the
kinds in [`VarKind::Exportable`] are ever exported; parameters, `let` bindings, quantified variables, and a function's
globals and privates are local to the declaration that introduced them.

*/

use std::fmt::{Display, Formatter};

use enumflags2::{bitflags, make_bitflags, BitFlags};

use crate::{
  abstractions::{join_string, IString},
  api::{
    operator::Signature,
    token::{SourceLocation, Token},
  },
};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ScopeKind {
  Global,
  AbstractType,
  Function,
  Quantifier,
  Claim,
}

impl ScopeKind {
  /// Quantifier scopes do not hide the variables of an enclosing quantifier scope.
  #[inline(always)]
  pub fn is_transparent(self) -> bool {
    self == ScopeKind::Quantifier
  }
}

impl Display for ScopeKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let text = match self {
      ScopeKind::Global       => "Global scope",
      ScopeKind::AbstractType => "Abstract type scope",
      ScopeKind::Function     => "Function scope",
      ScopeKind::Quantifier   => "Quantifier scope",
      ScopeKind::Claim        => "Claim scope",
    };
    write!(f, "{}", text)
  }
}

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum VarKind {
  Var,
  Const,
  Enum,
  Param,
  Let,
  Quant,
  Global,
  Private,
}

pub type VarKinds = BitFlags<VarKind, u8>;

impl VarKind {
  #![allow(non_upper_case_globals)]

  /// Kinds that may carry the export flag.
  pub const Exportable: VarKinds = make_bitflags!(VarKind::{Var | Const | Enum});

  #[inline(always)]
  pub fn is_exportable(self) -> bool {
    VarKind::Exportable.contains(self)
  }

  /// The record keyword used when dumping a variable of this kind.
  pub fn keyword(self) -> &'static str {
    match self {
      VarKind::Var     => "var",
      VarKind::Const   => "const",
      VarKind::Enum    => "enumConst",
      VarKind::Param   => "param",
      VarKind::Let     => "let",
      VarKind::Quant   => "quant",
      VarKind::Global  => "global",
      VarKind::Private => "local",
    }
  }
}

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeAttribute {
  Abstract,
  Mutable,
}

pub type TypeAttributes = BitFlags<TypeAttribute, u8>;

/// A global variable a function reads or writes, as listed in its `fcnGlobals` record.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct GlobalUse {
  pub sort: IString,
  pub name: IString,
}

impl GlobalUse {
  pub fn new(sort: impl Into<IString>, name: impl Into<IString>) -> Self {
    GlobalUse {
      sort: sort.into(),
      name: name.into(),
    }
  }
}

impl Display for GlobalUse {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {};", self.sort, self.name)
  }
}

/// Formats a globals list as it appears in an `fcnGlobals` record: `int count; char_Ptr buffer;`
pub fn format_globals(globals: &[GlobalUse]) -> String {
  join_string(globals.iter(), " ")
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FunctionInfo {
  pub id       : Token,
  pub signature: Signature,
  pub globals  : Vec<GlobalUse>,
  pub export   : bool,
}

impl FunctionInfo {
  pub fn new(id: Token, signature: Signature, globals: Vec<GlobalUse>) -> Self {
    FunctionInfo {
      id,
      signature,
      globals,
      export: false,
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeInfo {
  pub id        : Token,
  /// The sort of the type's representation.
  pub based_on  : IString,
  pub attributes: TypeAttributes,
  pub export    : bool,
}

impl TypeInfo {
  /// A concrete type, modifiable like any C object.
  pub fn exposed(id: Token, based_on: impl Into<IString>) -> Self {
    TypeInfo {
      id,
      based_on  : based_on.into(),
      attributes: TypeAttribute::Mutable.into(),
      export    : false,
    }
  }

  pub fn abstract_type(id: Token, based_on: impl Into<IString>, mutable: bool) -> Self {
    let mut attributes: TypeAttributes = TypeAttribute::Abstract.into();
    if mutable {
      attributes.insert(TypeAttribute::Mutable);
    }
    TypeInfo {
      id,
      based_on: based_on.into(),
      attributes,
      export: false,
    }
  }

  #[inline(always)]
  pub fn is_abstract(&self) -> bool {
    self.attributes.contains(TypeAttribute::Abstract)
  }

  #[inline(always)]
  pub fn is_mutable(&self) -> bool {
    self.attributes.contains(TypeAttribute::Mutable)
  }

  /// `exposed`, `mutable`, or `immutable`, as written in a `type` record.
  pub fn kind_keyword(&self) -> &'static str {
    match (self.is_abstract(), self.is_mutable()) {
      (false, _)    => "exposed",
      (true, true)  => "mutable",
      (true, false) => "immutable",
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VarInfo {
  pub id    : Token,
  pub sort  : IString,
  pub kind  : VarKind,
  pub export: bool,
}

impl VarInfo {
  pub fn new(id: Token, sort: impl Into<IString>, kind: VarKind) -> Self {
    VarInfo {
      id,
      sort: sort.into(),
      kind,
      export: false,
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Binding {
  Function(FunctionInfo),
  Type(TypeInfo),
  Variable(VarInfo),
}

impl Binding {
  pub fn id(&self) -> &Token {
    match self {
      Binding::Function(info) => &info.id,
      Binding::Type(info)     => &info.id,
      Binding::Variable(info) => &info.id,
    }
  }

  #[inline(always)]
  pub fn name(&self) -> &IString {
    &self.id().text
  }

  #[inline(always)]
  pub fn location(&self) -> &SourceLocation {
    &self.id().location
  }

  pub fn is_exported(&self) -> bool {
    match self {
      Binding::Function(info) => info.export,
      Binding::Type(info)     => info.export,
      Binding::Variable(info) => info.export,
    }
  }

  pub(crate) fn set_export(&mut self, exporting: bool) {
    match self {
      Binding::Function(info) => info.export = exporting,
      Binding::Type(info)     => info.export = exporting,
      Binding::Variable(info) => info.export = exporting && info.kind.is_exportable(),
    }
  }

  /// Functions and types may only be declared in the global scope.
  #[inline(always)]
  pub fn requires_global_scope(&self) -> bool {
    !matches!(self, Binding::Variable(_))
  }

  pub fn as_function(&self) -> Option<&FunctionInfo> {
    match self {
      Binding::Function(info) => Some(info),
      _ => None,
    }
  }

  pub fn as_type(&self) -> Option<&TypeInfo> {
    match self {
      Binding::Type(info) => Some(info),
      _ => None,
    }
  }

  pub fn as_variable(&self) -> Option<&VarInfo> {
    match self {
      Binding::Variable(info) => Some(info),
      _ => None,
    }
  }

  /// A short noun for messages.
  pub fn description(&self) -> &'static str {
    match self {
      Binding::Function(_) => "function",
      Binding::Type(_)     => "type",
      Binding::Variable(_) => "variable",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn export_only_for_exportable_kinds() {
    let mut param = Binding::Variable(VarInfo::new(Token::synthetic("n"), "int", VarKind::Param));
    let mut constant = Binding::Variable(VarInfo::new(Token::synthetic("MAX"), "int", VarKind::Const));

    param.set_export(true);
    constant.set_export(true);

    assert!(!param.is_exported());
    assert!(constant.is_exported());
  }

  #[test]
  fn type_keywords() {
    let id = Token::synthetic("set");
    assert_eq!(TypeInfo::exposed(id.clone(), "int").kind_keyword(), "exposed");
    assert_eq!(TypeInfo::abstract_type(id.clone(), "set", true).kind_keyword(), "mutable");
    assert_eq!(TypeInfo::abstract_type(id, "set", false).kind_keyword(), "immutable");
  }

  #[test]
  fn globals_format() {
    let globals = vec![GlobalUse::new("int", "count"), GlobalUse::new("char_Ptr", "buffer")];
    assert_eq!(format_globals(&globals), "int count; char_Ptr buffer;");
    assert_eq!(format_globals(&[]), "");
  }
}
