/*!

Source positions and located identifiers. Every binding, tag, and diagnostic carries a [`SourceLocation`] so that the
caller can report against the declaration that introduced a name.

*/

use std::fmt::{Display, Formatter};

use crate::abstractions::IString;

#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct SourceLocation {
  pub file  : IString,
  /// 1-based. Zero means the position is unknown.
  pub line  : u32,
  /// 1-based. Zero means the position is unknown.
  pub column: u32,
}

impl SourceLocation {
  pub fn new(file: impl Into<IString>, line: u32, column: u32) -> Self {
    SourceLocation {
      file: file.into(),
      line,
      column,
    }
  }

  /// A location for names the table creates itself, such as built-in synonyms.
  pub fn builtin() -> Self {
    SourceLocation::new("<builtin>", 0, 0)
  }

  pub fn is_known(&self) -> bool {
    self.line != 0
  }
}

impl Display for SourceLocation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match (self.line, self.column) {
      (0, _) => write!(f, "{}", self.file),
      (line, 0) => write!(f, "{}:{}", self.file, line),
      (line, column) => write!(f, "{}:{}:{}", self.file, line, column),
    }
  }
}

/// An identifier together with the position it was read from.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Token {
  pub text    : IString,
  pub location: SourceLocation,
}

impl Token {
  pub fn new(text: impl Into<IString>, location: SourceLocation) -> Self {
    Token {
      text: text.into(),
      location,
    }
  }

  /// A token with no meaningful source position.
  pub fn synthetic(text: impl Into<IString>) -> Self {
    Token::new(text, SourceLocation::default())
  }
}

impl Display for Token {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn location_display() {
    assert_eq!(SourceLocation::new("stack.lcs", 4, 9).to_string(), "stack.lcs:4:9");
    assert_eq!(SourceLocation::new("stack.lcs", 4, 0).to_string(), "stack.lcs:4");
    assert_eq!(SourceLocation::builtin().to_string(), "<builtin>");
    assert!(!SourceLocation::default().is_known());
  }
}
