/*!

Parsing of a single import record, the text of a payload line after its `%LCL` prefix.

| keyword      | fields                                   |
|:-------------|:-----------------------------------------|
| `op`         | operator name, signature                 |
| `type`       | name, base sort, `exposed`/`mutable`/`immutable` |
| `var`        | name, sort                               |
| `const`      | name, sort                               |
| `enumConst`  | name, sort                               |
| `fcn`        | identifier, signature                    |
| `fcnGlobals` | `sort name;` pairs, possibly none        |
| `tag`        | name, `struct`/`union`/`enum`            |

*/

use crate::{
  api::{
    binding::{GlobalUse, VarKind},
    operator::{OperatorName, Signature},
    tag::TagKind,
  },
  core::import::{
    error::RecordError,
    signature::{parse_globals, parse_operator_name, parse_signature, split_op_line},
  },
};

/// A word of a record with its 1-based column in the import line.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Field<'a> {
  pub text  : &'a str,
  pub column: u32,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum TypeRecordKind {
  Exposed,
  Mutable,
  Immutable,
}

impl TypeRecordKind {
  fn from_keyword(keyword: &str) -> Option<TypeRecordKind> {
    match keyword {
      "exposed"   => Some(TypeRecordKind::Exposed),
      "mutable"   => Some(TypeRecordKind::Mutable),
      "immutable" => Some(TypeRecordKind::Immutable),
      _           => None,
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum Record<'a> {
  Op {
    name     : OperatorName,
    signature: Signature,
  },
  Type {
    name: Field<'a>,
    base: Field<'a>,
    kind: TypeRecordKind,
  },
  Variable {
    kind: VarKind,
    name: Field<'a>,
    sort: Field<'a>,
  },
  Function {
    name     : Field<'a>,
    signature: Signature,
  },
  /// A malformed globals list keeps the entries before the first malformed one.
  FunctionGlobals {
    globals: Vec<GlobalUse>,
    error  : Option<RecordError>,
  },
  Tag {
    name: Field<'a>,
    kind: TagKind,
  },
}

impl Record<'_> {
  pub fn keyword(&self) -> &'static str {
    match self {
      Record::Op { .. }              => "op",
      Record::Type { .. }            => "type",
      Record::Variable { kind, .. }  => kind.keyword(),
      Record::Function { .. }        => "fcn",
      Record::FunctionGlobals { .. } => "fcnGlobals",
      Record::Tag { .. }             => "tag",
    }
  }
}

/// Splits `text` into words with their columns. `column_offset` is the number of characters preceding `text` in its
/// line.
fn fields(text: &str, column_offset: u32) -> Vec<Field<'_>> {
  let mut fields = Vec::new();
  let mut start  = None;

  for (index, c) in text.char_indices() {
    match (c.is_whitespace(), start) {
      (false, None) => start = Some(index),
      (true, Some(begin)) => {
        fields.push(field(text, begin, index, column_offset));
        start = None;
      }
      _ => {}
    }
  }
  if let Some(begin) = start {
    fields.push(field(text, begin, text.len(), column_offset));
  }
  fields
}

fn field(text: &str, begin: usize, end: usize, column_offset: u32) -> Field<'_> {
  Field {
    text  : &text[begin..end],
    column: column_offset + text[..begin].chars().count() as u32 + 1,
  }
}

/// The text following the first word of `payload`.
fn after_keyword(payload: &str) -> &str {
  let trimmed = payload.trim_start();
  match trimmed.find(char::is_whitespace) {
    Some(index) => &trimmed[index..],
    None => "",
  }
}

/// Expects exactly `names.len()` fields after the keyword.
fn fixed_fields<'a>(
  record: &'static str,
  words : &[Field<'a>],
  names : &[&'static str],
) -> Result<Vec<Field<'a>>, RecordError> {
  let values = &words[1..];
  if values.len() < names.len() {
    return Err(RecordError::MissingField { record, field: names[values.len()] });
  }
  if values.len() > names.len() {
    return Err(RecordError::ExtraField { record, text: values[names.len()].text.to_string() });
  }
  Ok(values.to_vec())
}

pub(crate) fn parse_record(payload: &str, column_offset: u32) -> Result<Record<'_>, RecordError> {
  let words = fields(payload, column_offset);
  let Some(keyword) = words.first() else {
    return Err(RecordError::UnknownKeyword(String::new()));
  };

  match keyword.text {
    "op" => {
      let (name, signature) = split_op_line(after_keyword(payload))?;
      Ok(Record::Op {
        name     : parse_operator_name(name)?,
        signature: parse_signature(signature)?,
      })
    }

    "fcn" => {
      let (name_text, signature) = split_op_line(after_keyword(payload)).map_err(|error| {
        match error {
          RecordError::MissingField { field, .. } => RecordError::MissingField { record: "fcn", field },
          other => other,
        }
      })?;
      let name = match parse_operator_name(name_text)? {
        OperatorName::Id(_) => words[1],
        _ => return Err(RecordError::NotAnIdentifier(name_text.to_string())),
      };
      Ok(Record::Function {
        name,
        signature: parse_signature(signature)?,
      })
    }

    "fcnGlobals" => {
      let (globals, error) = parse_globals(after_keyword(payload));
      Ok(Record::FunctionGlobals { globals, error })
    }

    "type" => {
      let values = fixed_fields("type", &words, &["name", "base sort", "kind"])?;
      let kind   = TypeRecordKind::from_keyword(values[2].text)
          .ok_or_else(|| RecordError::BadTypeKind(values[2].text.to_string()))?;
      Ok(Record::Type { name: values[0], base: values[1], kind })
    }

    "var" | "const" | "enumConst" => {
      let kind = match keyword.text {
        "var"   => VarKind::Var,
        "const" => VarKind::Const,
        _       => VarKind::Enum,
      };
      let values = fixed_fields(kind.keyword(), &words, &["name", "sort"])?;
      Ok(Record::Variable { kind, name: values[0], sort: values[1] })
    }

    "tag" => {
      let values = fixed_fields("tag", &words, &["name", "kind"])?;
      let kind   = TagKind::from_keyword(values[1].text)
          .ok_or_else(|| RecordError::BadTagKind(values[1].text.to_string()))?;
      Ok(Record::Tag { name: values[0], kind })
    }

    other => Err(RecordError::UnknownKeyword(other.to_string())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::abstractions::IString;

  #[test]
  fn field_columns() {
    let words = fields("var  count int", 4);
    let columns: Vec<(&str, u32)> = words.iter().map(|f| (f.text, f.column)).collect();
    assert_eq!(columns, vec![("var", 5), ("count", 10), ("int", 16)]);
  }

  #[test]
  fn variable_records() {
    match parse_record("enumConst RED color", 4).unwrap() {
      Record::Variable { kind, name, sort } => {
        assert_eq!(kind, VarKind::Enum);
        assert_eq!(name.text, "RED");
        assert_eq!(sort.text, "color");
      }
      other => panic!("unexpected record {:?}", other),
    }

    assert_eq!(
      parse_record("var count", 4),
      Err(RecordError::MissingField { record: "var", field: "sort" })
    );
    assert_eq!(
      parse_record("const MAX int extra", 4),
      Err(RecordError::ExtraField { record: "const", text: "extra".to_string() })
    );
  }

  #[test]
  fn type_and_tag_records() {
    assert!(matches!(
      parse_record("type set set mutable", 4),
      Ok(Record::Type { kind: TypeRecordKind::Mutable, .. })
    ));
    assert_eq!(parse_record("type set set frozen", 4), Err(RecordError::BadTypeKind("frozen".to_string())));
    assert!(matches!(parse_record("tag node struct", 4), Ok(Record::Tag { kind: TagKind::Struct, .. })));
    assert!(parse_record("tag node class", 4).is_err());
  }

  #[test]
  fn function_records() {
    match parse_record("fcn size :set -> int", 4).unwrap() {
      Record::Function { name, signature } => {
        assert_eq!(name.text, "size");
        assert_eq!(signature.range, IString::from("int"));
      }
      other => panic!("unexpected record {:?}", other),
    }
    assert_eq!(
      parse_record("fcn __ + __ :int, int -> int", 4),
      Err(RecordError::NotAnIdentifier("__ + __".to_string()))
    );
    assert_eq!(
      parse_record("fcn size", 4),
      Err(RecordError::MissingField { record: "fcn", field: "signature" })
    );
    assert_eq!(
      parse_record("fcnGlobals", 4),
      Ok(Record::FunctionGlobals { globals: Vec::new(), error: None })
    );
  }

  #[test]
  fn op_records_and_unknown_keywords() {
    match parse_record("op __ [__] :list, int -> elem", 4).unwrap() {
      Record::Op { name, signature } => {
        assert_eq!(name.to_string(), "__ [__]");
        assert_eq!(signature.arity(), 2);
      }
      other => panic!("unexpected record {:?}", other),
    }
    assert_eq!(parse_record("sort list", 4), Err(RecordError::UnknownKeyword("sort".to_string())));
  }
}
