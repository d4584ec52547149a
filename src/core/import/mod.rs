/*!

Merging a serialized symbol table into a live one.

## Format

```txt
%LCLSymbolTable
%LCLop __ + __ :int, int -> int
%LCLtype set set mutable
%LCLfcn size :set -> int
%LCLfcnGlobals int count;
%LCLtag node struct
%LCLSymbolTableEnd
```

The header and trailer frame the stream. Every line between them carries the `%LCL` prefix followed by one record. The
record keywords are described in the `record` module. Blank lines are skipped.

## Recovery

A record that cannot be parsed is reported as a diagnostic and skipped; the import continues with the next line. A
sort name that does not resolve is replaced by the `_NoSort` sentinel. Only a missing header, prefix, or trailer (or
an I/O error) ends the import, and what was read before that point stays in the table.

A `fcn` record leaves its function *pending* until the following `fcnGlobals` record supplies its globals. A pending
function still waiting at the trailer, or when the import ends early, is declared with no globals.

*/

mod error;
mod record;
mod signature;
#[cfg(test)]
mod tests;

use std::io::BufRead;

use crate::{
  abstractions::IString,
  api::{
    binding::{Binding, FunctionInfo, TypeInfo, VarInfo, VarKind},
    diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink},
    operator::Signature,
    symbol_table::SymbolTable,
    tag::{TagContent, TagInfo},
    token::{SourceLocation, Token},
    use_def::{PlaceholderKind, UseDefTable},
  },
  core::{
    names,
    sort::{SortId, SortKind},
    sort_map::SortTranslationMap,
  },
  debug,
  info,
};

pub use error::{ImportError, RecordError};
pub use signature::{parse_operator_name, parse_signature};

use record::{parse_record, Field, Record, TypeRecordKind};

pub(crate) const HEADER : &str = "%LCLSymbolTable";
pub(crate) const TRAILER: &str = "%LCLSymbolTableEnd";
pub(crate) const PREFIX : &str = "%LCL";

/// Settings for one import.
#[derive(Clone, Debug)]
pub struct ImportOptions {
  /// Applied to every sort name read from the stream.
  pub renames: SortTranslationMap,
  /// The file name used in diagnostics.
  pub source : IString,
}

impl Default for ImportOptions {
  fn default() -> Self {
    ImportOptions {
      renames: SortTranslationMap::new(),
      source : IString::from("<import>"),
    }
  }
}

impl ImportOptions {
  pub fn new(source: impl Into<IString>) -> Self {
    ImportOptions {
      source: source.into(),
      ..Self::default()
    }
  }

  pub fn with_rename(mut self, from: impl Into<IString>, to: impl Into<IString>) -> Self {
    self.renames.bind(from.into(), to.into());
    self
  }
}

#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct ImportSummary {
  /// Lines read, including the header and trailer.
  pub lines  : u32,
  /// Records entered into the table.
  pub records: u32,
  /// Records skipped after a diagnostic.
  pub skipped: u32,
}

/// Runs an import with the table's importing flag set, restoring the previous value on every exit.
pub(crate) fn run<R: BufRead>(
  table  : &mut SymbolTable,
  reader : R,
  options: &ImportOptions,
  sink   : &mut dyn DiagnosticSink,
  use_def: Option<&mut dyn UseDefTable>,
) -> Result<ImportSummary, ImportError> {
  let was_importing = table.set_importing(true);

  let mut importer = Importer {
    table  : &mut *table,
    options,
    sink,
    use_def: use_def.map(|use_def| use_def as &mut dyn UseDefTable),
    pending: None,
    summary: ImportSummary::default(),
  };
  let result = importer.read(reader);
  importer.flush_pending();
  let summary = importer.summary;

  table.set_importing(was_importing);

  match &result {
    Ok(()) => {
      info!(
        2,
        "imported {}: {} records, {} skipped",
        options.source,
        summary.records,
        summary.skipped
      );
    }
    Err(error) => info!(2, "import of {} stopped: {}", options.source, error),
  }
  result.map(|()| summary)
}

struct Importer<'a> {
  table  : &'a mut SymbolTable,
  options: &'a ImportOptions,
  sink   : &'a mut dyn DiagnosticSink,
  use_def: Option<&'a mut dyn UseDefTable>,
  /// A function read from a `fcn` record, waiting for its `fcnGlobals` record.
  pending: Option<FunctionInfo>,
  summary: ImportSummary,
}

impl Importer<'_> {
  fn read<R: BufRead>(&mut self, reader: R) -> Result<(), ImportError> {
    let mut lines = reader.lines();

    let header = match lines.next() {
      Some(line) => line?,
      None => {
        return Err(ImportError::MissingHeader { source: self.options.source.clone(), found: None });
      }
    };
    self.summary.lines = 1;
    if header.split_whitespace().next() != Some(HEADER) {
      return Err(ImportError::MissingHeader {
        source: self.options.source.clone(),
        found : Some(header),
      });
    }

    for line in lines {
      let line = line?;
      self.summary.lines += 1;
      let line_number = self.summary.lines;

      let trimmed = line.trim_start();
      if trimmed.is_empty() {
        continue;
      }
      if trimmed.split_whitespace().next() == Some(TRAILER) {
        return Ok(());
      }

      let Some(payload) = trimmed.strip_prefix(PREFIX) else {
        return Err(ImportError::MissingPrefix {
          source: self.options.source.clone(),
          line  : line_number,
          text  : line.clone(),
        });
      };
      let column_offset = (line.len() - trimmed.len() + PREFIX.len()) as u32;

      match parse_record(payload, column_offset) {
        Ok(record) => {
          debug!(3, "{}:{}: {} record", self.options.source, line_number, record.keyword());
          if self.enter(record, line_number) {
            self.summary.records += 1;
          } else {
            self.summary.skipped += 1;
          }
        }
        Err(error) => {
          let kind = match error {
            RecordError::UnknownKeyword(_) => DiagnosticKind::UnknownRecord,
            _ => DiagnosticKind::MalformedImportLine,
          };
          self.report(kind, error.to_string(), line_number, column_offset + 1);
          self.summary.skipped += 1;
        }
      }
    }

    Err(ImportError::MissingTrailer { source: self.options.source.clone() })
  }

  /// Enters one parsed record. Returns `false` if the record was skipped.
  fn enter(&mut self, record: Record<'_>, line: u32) -> bool {
    match record {
      Record::Op { name, signature } => {
        let signature = self.rename(&signature);
        self.table.enter_op(name, signature);
        true
      }

      Record::Type { name, base, kind } => {
        self.enter_type(name, base, kind, line);
        true
      }

      Record::Variable { kind, name, sort } => {
        self.enter_variable(kind, name, sort, line);
        true
      }

      Record::Function { name, signature } => {
        if let Some(pending) = &self.pending {
          let message = format!(
            "function {} declared before the globals of function {}",
            name.text, pending.id.text
          );
          self.report(DiagnosticKind::IllegalFunctionDeclaration, message, line, name.column);
          return false;
        }

        let id        = self.token(name, line);
        let signature = self.rename(&signature);
        self.placeholder(&id, PlaceholderKind::Function, false);
        self.pending = Some(FunctionInfo::new(id, signature, Vec::new()));
        true
      }

      Record::FunctionGlobals { globals, error } => {
        let Some(mut function) = self.pending.take() else {
          self.report(
            DiagnosticKind::UnexpectedFunctionGlobals,
            "function globals without a preceding function".to_string(),
            line,
            1,
          );
          return false;
        };

        if let Some(error) = error {
          self.report(DiagnosticKind::MalformedImportLine, error.to_string(), line, 1);
        }
        function.globals = globals
            .into_iter()
            .map(|mut global| {
              global.sort = self.options.renames.translate(&global.sort);
              global
            })
            .collect();
        self.table.declare(Binding::Function(function), &mut *self.sink);
        true
      }

      Record::Tag { name, kind } => {
        let tag = TagInfo::new(self.token(name, line), kind, TagContent::None);
        self.table.enter_tag(tag, false, &mut *self.sink);
        true
      }
    }
  }

  fn enter_type(&mut self, name: Field<'_>, base: Field<'_>, kind: TypeRecordKind, line: u32) {
    let id       = self.token(name, line);
    let abstract_ = kind != TypeRecordKind::Exposed;
    let mutable  = kind != TypeRecordKind::Immutable;
    let based_on = self.options.renames.translate(&IString::from(base.text));

    // An abstract type is its own sort.
    let base_sort = if abstract_ && based_on == id.text {
      self.table.sorts_mut().get_or_create(based_on.clone(), SortKind::Abstract { mutable })
    } else {
      self.resolve_sort(&based_on, base, line)
    };

    let info = if abstract_ {
      TypeInfo::abstract_type(id.clone(), self.table.sorts().name(base_sort), mutable)
    } else {
      TypeInfo::exposed(id.clone(), self.table.sorts().name(base_sort))
    };

    let placeholder = PlaceholderKind::Datatype {
      abstract_,
      mutable: if abstract_ { Some(mutable) } else { None },
    };
    self.placeholder(&id, placeholder, false);
    self.table.declare(Binding::Type(info), &mut *self.sink);
  }

  fn enter_variable(&mut self, kind: VarKind, name: Field<'_>, sort: Field<'_>, line: u32) {
    let id        = self.token(name, line);
    let sort_name = self.options.renames.translate(&IString::from(sort.text));
    let sort_id   = self.resolve_sort(&sort_name, sort, line);

    match kind {
      VarKind::Var => self.placeholder(&id, PlaceholderKind::Variable, false),
      VarKind::Enum => self.placeholder(&id, PlaceholderKind::Constant, true),
      _ => self.placeholder(&id, PlaceholderKind::Constant, false),
    }

    let info = VarInfo::new(id, self.table.sorts().name(sort_id), kind);
    self.table.declare(Binding::Variable(info), &mut *self.sink);
  }

  /// Declares a function still waiting for its globals.
  fn flush_pending(&mut self) {
    if let Some(function) = self.pending.take() {
      debug!(3, "declaring function {} without globals", function.id.text);
      self.table.declare(Binding::Function(function), &mut *self.sink);
    }
  }

  /// Looks up a sort read from the stream, reporting an unknown sort and substituting the sentinel.
  fn resolve_sort(&mut self, name: &IString, field: Field<'_>, line: u32) -> SortId {
    match self.table.sorts().find(name) {
      Some(id) => id,
      None => {
        let message = format!("unknown sort {}, using {}", name, *names::NO_SORT);
        self.report(DiagnosticKind::UnknownBaseSort, message, line, field.column);
        SortId::NONE
      }
    }
  }

  fn rename(&self, signature: &Signature) -> Signature {
    signature.map_sorts(|sort| self.options.renames.translate(sort))
  }

  /// Creates a placeholder in the use/def table if the name is new there. Enumeration constants are checked against
  /// every scope, everything else against the global scope.
  fn placeholder(&mut self, id: &Token, kind: PlaceholderKind, any_scope: bool) {
    let Some(use_def) = self.use_def.as_deref_mut() else {
      return;
    };
    let exists = if any_scope { use_def.exists_any(&id.text) } else { use_def.exists_global(&id.text) };
    if !exists {
      use_def.add_placeholder(id.text.clone(), kind, &id.location);
    }
  }

  fn token(&self, field: Field<'_>, line: u32) -> Token {
    Token::new(field.text, self.location(line, field.column))
  }

  fn location(&self, line: u32, column: u32) -> SourceLocation {
    SourceLocation::new(self.options.source.clone(), line, column)
  }

  fn report(&mut self, kind: DiagnosticKind, message: String, line: u32, column: u32) {
    let location = self.location(line, column);
    Diagnostic::new(kind, message, location).emit(&mut *self.sink);
  }
}
