/*!

Operator names and signatures.

An LSL operator is named either by a plain identifier (`size`, `top`, `0`) or by an *operator form* that places
argument holes, written `__`, around one or more tokens: `__ + __`, `- __`, `if __ then __ else __`, `{ __, __ }`,
`__ \select first`. An operator may be overloaded with any number of [`Signature`]s.

Operators are indexed by their [`OperatorKey`], a structural digest of the name in which `=` and `\eq` coincide and
the closing token of a delimited form is ignored.

*/

use std::fmt::{Display, Formatter};

use crate::{
  abstractions::{join_string, IString},
  core::names,
};

/// The text of an argument hole in a printed operator form.
pub const HOLE: &str = "__";

/// A domain of sort names and a range sort name. Sorts are carried by name, as they appear in specifications and
/// import files.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Signature {
  pub domain: Vec<IString>,
  pub range : IString,
}

impl Signature {
  pub fn new(domain: Vec<IString>, range: IString) -> Self {
    Signature { domain, range }
  }

  /// A signature with an empty domain.
  pub fn constant(range: IString) -> Self {
    Signature::new(Vec::new(), range)
  }

  #[inline(always)]
  pub fn arity(&self) -> usize {
    self.domain.len()
  }

  /// Applies `rename` to every sort name in the signature.
  pub fn map_sorts(&self, mut rename: impl FnMut(&IString) -> IString) -> Signature {
    Signature {
      domain: self.domain.iter().map(&mut rename).collect(),
      range : rename(&self.range),
    }
  }
}

/// Printed as `:int, int -> int`, or `: -> int` for a constant.
impl Display for Signature {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if self.domain.is_empty() {
      write!(f, ": -> {}", self.range)
    } else {
      write!(f, ":{} -> {}", join_string(self.domain.iter(), ", "), self.range)
    }
  }
}

/// Where argument holes sit relative to the fixed tokens of an operator form.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Holes {
  None,
  Leading,
  Trailing,
  Both,
}

impl Holes {
  pub fn from_flags(leading: bool, trailing: bool) -> Holes {
    match (leading, trailing) {
      (false, false) => Holes::None,
      (true, false) => Holes::Leading,
      (false, true) => Holes::Trailing,
      (true, true) => Holes::Both,
    }
  }

  #[inline(always)]
  pub fn leading(self) -> bool {
    matches!(self, Holes::Leading | Holes::Both)
  }

  #[inline(always)]
  pub fn trailing(self) -> bool {
    matches!(self, Holes::Trailing | Holes::Both)
  }

  /// Number of holes outside the fixed tokens.
  pub fn count(self) -> usize {
    self.leading() as usize + self.trailing() as usize
  }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum OpForm {
  /// `if __ then __ else __`
  If,
  /// A single operator token with optional holes on either side: `__ + __`, `- __`, `__ !`, `\forall`.
  AnyOp { holes: Holes, op: IString },
  /// An opening token, `args` comma-separated holes, and a closing token, with optional outer holes:
  /// `{ __, __ }`, `__ [__]`.
  Delimited { holes: Holes, open: IString, close: IString, args: usize },
  /// `__ \select field`, or `\select field` without the leading hole.
  Select { leading: bool, field: IString },
  /// `__ \field_arrow field`, or `\field_arrow field` without the leading hole.
  FieldArrow { leading: bool, field: IString },
}

impl OpForm {
  /// The number of argument holes in the form.
  pub fn hole_count(&self) -> usize {
    match self {
      OpForm::If => 3,
      OpForm::AnyOp { holes, .. } => holes.count(),
      OpForm::Delimited { holes, args, .. } => holes.count() + args,
      OpForm::Select { leading, .. } | OpForm::FieldArrow { leading, .. } => *leading as usize,
    }
  }
}

impl Display for OpForm {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let before = |holes: &Holes| if holes.leading() { "__ " } else { "" };
    let after  = |holes: &Holes| if holes.trailing() { " __" } else { "" };

    match self {
      OpForm::If => write!(f, "if __ then __ else __"),

      OpForm::AnyOp { holes, op } => write!(f, "{}{}{}", before(holes), op, after(holes)),

      OpForm::Delimited { holes, open, close, args } => {
        let inner = join_string(std::iter::repeat(HOLE).take(*args), ", ");
        if &**open == "[" && &**close == "]" {
          write!(f, "{}[{}]{}", before(holes), inner, after(holes))
        } else if *args == 0 {
          write!(f, "{}{} {}{}", before(holes), open, close, after(holes))
        } else {
          write!(f, "{}{} {} {}{}", before(holes), open, inner, close, after(holes))
        }
      }

      OpForm::Select { leading, field } => {
        write!(f, "{}\\select {}", if *leading { "__ " } else { "" }, field)
      }

      OpForm::FieldArrow { leading, field } => {
        write!(f, "{}\\field_arrow {}", if *leading { "__ " } else { "" }, field)
      }
    }
  }
}

/// The name of an operator as written. Two names denote the same operator when their [`OperatorKey`]s agree.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum OperatorName {
  Id(IString),
  Form(OpForm),
}

impl OperatorName {
  pub fn id(name: impl Into<IString>) -> Self {
    OperatorName::Id(name.into())
  }

  /// An infix operator `__ op __`.
  pub fn infix(op: impl Into<IString>) -> Self {
    OperatorName::Form(OpForm::AnyOp { holes: Holes::Both, op: op.into() })
  }

  /// A prefix operator `op __`.
  pub fn prefix(op: impl Into<IString>) -> Self {
    OperatorName::Form(OpForm::AnyOp { holes: Holes::Trailing, op: op.into() })
  }

  pub fn key(&self) -> OperatorKey {
    match self {
      OperatorName::Id(name) => OperatorKey::Id(name.clone()),

      OperatorName::Form(form) => {
        match form {
          OpForm::If => OperatorKey::If,

          OpForm::AnyOp { holes, op } => {
            let op = if *op == *names::EQUALS { names::EQ_SYMBOL.clone() } else { op.clone() };
            OperatorKey::AnyOp(*holes, op)
          }

          OpForm::Delimited { holes, open, args, .. } => OperatorKey::Delimited(*holes, *args, open.clone()),

          OpForm::Select { leading, field } => OperatorKey::Select(*leading, field.clone()),

          OpForm::FieldArrow { leading, field } => OperatorKey::FieldArrow(*leading, field.clone()),
        }
      }
    }
  }

  #[inline(always)]
  pub fn is_id(&self) -> bool {
    matches!(self, OperatorName::Id(_))
  }
}

impl Display for OperatorName {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      OperatorName::Id(name) => write!(f, "{}", name),
      OperatorName::Form(form) => Display::fmt(form, f),
    }
  }
}

/// The structural key under which an operator is indexed.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum OperatorKey {
  Id(IString),
  If,
  AnyOp(Holes, IString),
  Delimited(Holes, usize, IString),
  Select(bool, IString),
  FieldArrow(bool, IString),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn equals_folds_to_eq() {
    assert_eq!(OperatorName::infix("=").key(), OperatorName::infix("\\eq").key());
    assert_ne!(OperatorName::infix("=").key(), OperatorName::prefix("=").key());
    assert_ne!(OperatorName::id("=").key(), OperatorName::infix("=").key());
  }

  #[test]
  fn delimited_key_ignores_close() {
    let braces = OperatorName::Form(OpForm::Delimited {
      holes: Holes::None,
      open : IString::from("{"),
      close: IString::from("}"),
      args : 2,
    });
    let odd = OperatorName::Form(OpForm::Delimited {
      holes: Holes::None,
      open : IString::from("{"),
      close: IString::from("|}"),
      args : 2,
    });
    assert_eq!(braces.key(), odd.key());
    assert_eq!(braces.to_string(), "{ __, __ }");
  }

  #[test]
  fn display_forms() {
    let index = OperatorName::Form(OpForm::Delimited {
      holes: Holes::Leading,
      open : IString::from("["),
      close: IString::from("]"),
      args : 2,
    });
    assert_eq!(index.to_string(), "__ [__, __]");
    assert_eq!(OperatorName::infix("+").to_string(), "__ + __");
    assert_eq!(OperatorName::prefix("-").to_string(), "- __");
    assert_eq!(OperatorName::Form(OpForm::If).to_string(), "if __ then __ else __");
    assert_eq!(
      OperatorName::Form(OpForm::Select { leading: true, field: IString::from("next") }).to_string(),
      "__ \\select next"
    );
  }

  #[test]
  fn signature_display() {
    let int = IString::from("int");
    assert_eq!(Signature::new(vec![int.clone(), int.clone()], int.clone()).to_string(), ":int, int -> int");
    assert_eq!(Signature::constant(int).to_string(), ": -> int");
  }
}
