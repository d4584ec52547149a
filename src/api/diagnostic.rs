/*!

Diagnostics against user input. The table never aborts on a user error: it records a [`Diagnostic`] into a
[`DiagnosticSink`] supplied by the caller and continues in a consistent state. Every diagnostic is also logged when it
is recorded.

*/

use std::fmt::{Display, Formatter};

use crate::{
  api::token::SourceLocation,
  error,
  warning,
};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Severity {
  Warning,
  Error,
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Severity::Warning => write!(f, "warning"),
      Severity::Error   => write!(f, "error"),
    }
  }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum DiagnosticKind {
  Redeclaration,
  TagKindMismatch,
  MalformedImportLine,
  UnknownBaseSort,
  UnexpectedFunctionGlobals,
  IllegalFunctionDeclaration,
  UnknownRecord,
  UnresolvedOverload,
  UnrecognizedIdentifier,
}

impl DiagnosticKind {
  pub fn severity(self) -> Severity {
    match self {
      DiagnosticKind::UnknownBaseSort | DiagnosticKind::UnknownRecord => Severity::Warning,
      _ => Severity::Error,
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Diagnostic {
  pub severity: Severity,
  pub kind    : DiagnosticKind,
  pub message : String,
  pub location: SourceLocation,
}

impl Diagnostic {
  pub fn new(kind: DiagnosticKind, message: impl Into<String>, location: SourceLocation) -> Self {
    Diagnostic {
      severity: kind.severity(),
      kind,
      message: message.into(),
      location,
    }
  }

  /// Logs the diagnostic and records it into `sink`.
  pub(crate) fn emit(self, sink: &mut dyn DiagnosticSink) {
    match self.severity {
      Severity::Warning => warning!(1, "{}", self),
      Severity::Error   => error!(1, "{}", self),
    }
    sink.report(self);
  }
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}: {}", self.location, self.severity, self.message)
  }
}

/// Receives diagnostics. Implementations must not fail.
pub trait DiagnosticSink {
  fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
  fn report(&mut self, diagnostic: Diagnostic) {
    self.push(diagnostic);
  }
}

/// A collecting sink.
#[derive(Clone, Default, Debug)]
pub struct Diagnostics {
  entries: Vec<Diagnostic>,
}

impl Diagnostics {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
    self.entries.iter()
  }

  pub fn count(&self, kind: DiagnosticKind) -> usize {
    self.entries.iter().filter(|diagnostic| diagnostic.kind == kind).count()
  }

  pub fn error_count(&self) -> usize {
    self.entries.iter().filter(|diagnostic| diagnostic.severity == Severity::Error).count()
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn into_vec(self) -> Vec<Diagnostic> {
    self.entries
  }
}

impl DiagnosticSink for Diagnostics {
  fn report(&mut self, diagnostic: Diagnostic) {
    self.entries.push(diagnostic);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn collects_and_counts() {
    let mut diagnostics = Diagnostics::new();
    let location = SourceLocation::new("set.lcs", 3, 1);

    Diagnostic::new(DiagnosticKind::UnknownBaseSort, "unknown base sort `list`", location.clone())
        .emit(&mut diagnostics);
    Diagnostic::new(DiagnosticKind::MalformedImportLine, "illegal operator declaration", location)
        .emit(&mut diagnostics);

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.count(DiagnosticKind::UnknownBaseSort), 1);
    assert_eq!(
      diagnostics.iter().last().map(|d| d.to_string()),
      Some("set.lcs:3:1: error: illegal operator declaration".to_string())
    );
  }
}
