/*!

Errors raised while reading an import file.

An [`ImportError`] ends the import: the file is not a symbol table at all, or could not be read. Declarations read
before the error remain in the table.

A [`RecordError`] concerns a single record. The importer reports it as a diagnostic and continues with the next line.

*/

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::abstractions::IString;

pub enum ImportError {
  MissingHeader {
    source: IString,
    found : Option<String>,
  },
  MissingPrefix {
    source: IString,
    line  : u32,
    text  : String,
  },
  MissingTrailer {
    source: IString,
  },
  Io(std::io::Error),
}

impl Display for ImportError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      ImportError::MissingHeader { source, found: Some(text) } => {
        write!(f, "expecting '%LCLSymbolTable' line in import file {}: {}", source, text)
      }

      ImportError::MissingHeader { source, found: None } => {
        write!(f, "expecting '%LCLSymbolTable' line in import file {}, but the file is empty", source)
      }

      ImportError::MissingPrefix { source, line, text } => {
        write!(f, "expecting '%LCL' prefix in import file {} at line {}: {}", source, line, text)
      }

      ImportError::MissingTrailer { source } => {
        write!(f, "import file {} ended without a '%LCLSymbolTableEnd' line", source)
      }

      ImportError::Io(error) => write!(f, "could not read import file: {}", error),

    } // end match on `ImportError`
  }
}

impl Debug for ImportError {
  fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl Error for ImportError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      ImportError::Io(error) => Some(error),
      _ => None,
    }
  }
}

impl From<std::io::Error> for ImportError {
  fn from(error: std::io::Error) -> Self {
    ImportError::Io(error)
  }
}

#[derive(Clone, PartialEq, Eq)]
pub enum RecordError {
  UnknownKeyword(String),
  MissingField {
    record: &'static str,
    field : &'static str,
  },
  ExtraField {
    record: &'static str,
    text  : String,
  },
  BadSignature(String),
  BadOperatorName(String),
  NotAnIdentifier(String),
  BadTypeKind(String),
  BadTagKind(String),
  BadGlobal(String),
}

impl Display for RecordError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      RecordError::UnknownKeyword(keyword)     => write!(f, "unknown symbol declaration `{}`", keyword),
      RecordError::MissingField { record, field } => write!(f, "{} record is missing its {}", record, field),
      RecordError::ExtraField { record, text }    => write!(f, "unexpected `{}` after {} record", text, record),
      RecordError::BadSignature(text)          => write!(f, "illegal signature `{}`", text),
      RecordError::BadOperatorName(text)       => write!(f, "illegal operator name `{}`", text),
      RecordError::NotAnIdentifier(text)       => write!(f, "unexpected function name `{}`", text),
      RecordError::BadTypeKind(text)           => {
        write!(f, "type kind must be exposed, mutable, or immutable, not `{}`", text)
      }
      RecordError::BadTagKind(text)            => write!(f, "tag kind must be struct, union, or enum, not `{}`", text),
      RecordError::BadGlobal(text)             => write!(f, "illegal function global declaration `{}`", text),
    }
  }
}

impl Debug for RecordError {
  fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl Error for RecordError {}
