/*!

Parsers for the text forms of signatures, operator names, and function globals used in import files.

 - Signature: `:int, int -> int`, or `: -> int` for an empty domain. Whitespace after the colon is allowed.
 - Operator name: an identifier, or a form with `__` holes such as `__ + __`, `if __ then __ else __`, `__ [__, __]`,
   `{ __ }`, `__ \select next`.
 - Globals: `int count; char_Ptr buffer;`, possibly empty.

*/

use crate::{
  abstractions::IString,
  api::{
    binding::GlobalUse,
    operator::{Holes, OpForm, OperatorName, Signature, HOLE},
  },
  core::import::error::RecordError,
};

const IF_FORM: [&str; 6] = ["if", HOLE, "then", HOLE, "else", HOLE];

pub(crate) fn is_identifier(text: &str) -> bool {
  !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Parses signature text such as `:int, int -> bool`.
pub fn parse_signature(text: &str) -> Result<Signature, RecordError> {
  let bad = || RecordError::BadSignature(text.trim().to_string());

  let body                  = text.trim().strip_prefix(':').ok_or_else(bad)?;
  let (domain_text, range)  = body.split_once("->").ok_or_else(bad)?;

  let range = single_word(range).ok_or_else(bad)?;

  let domain = if domain_text.trim().is_empty() {
    Vec::new()
  } else {
    domain_text
        .split(',')
        .map(|sort| single_word(sort).map(IString::from))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(bad)?
  };

  Ok(Signature::new(domain, IString::from(range)))
}

/// Splits `name signature` at the last word beginning with a colon.
pub(crate) fn split_op_line(text: &str) -> Result<(&str, &str), RecordError> {
  let mut split_at = None;
  let mut previous_is_space = true;
  for (index, c) in text.char_indices() {
    if previous_is_space && c == ':' {
      split_at = Some(index);
    }
    previous_is_space = c.is_whitespace();
  }

  match split_at {
    Some(index) if !text[..index].trim().is_empty() => Ok((text[..index].trim(), &text[index..])),
    Some(_) => Err(RecordError::MissingField { record: "op", field: "name" }),
    None => Err(RecordError::MissingField { record: "op", field: "signature" }),
  }
}

/// Splits operator name text into tokens: separating commas are dropped and brackets are split from the holes they
/// enclose.
fn name_tokens(text: &str) -> Vec<&str> {
  let mut tokens = Vec::new();
  for word in text.split_whitespace() {
    let mut word = if word.len() > 1 { word.strip_suffix(',').unwrap_or(word) } else { word };
    if word.len() > 1 {
      if let Some(rest) = word.strip_prefix('[') {
        tokens.push("[");
        word = rest;
      }
    }
    let closes = word.len() > 1 && word.ends_with(']');
    if closes {
      word = &word[..word.len() - 1];
    }
    if !word.is_empty() {
      tokens.push(word);
    }
    if closes {
      tokens.push("]");
    }
  }
  tokens
}

/// Parses an operator name as written in an `op` record, such as `size`, `__ + __`, or `__ [__]`.
pub fn parse_operator_name(text: &str) -> Result<OperatorName, RecordError> {
  let bad    = || RecordError::BadOperatorName(text.trim().to_string());
  let tokens = name_tokens(text);

  if tokens.is_empty() || tokens == [HOLE] {
    return Err(bad());
  }
  if tokens == IF_FORM {
    return Ok(OperatorName::Form(OpForm::If));
  }

  let leading  = tokens[0] == HOLE;
  let trailing = tokens[tokens.len() - 1] == HOLE;
  let core     = &tokens[leading as usize..tokens.len() - trailing as usize];
  let holes    = Holes::from_flags(leading, trailing);

  match core {
    ["\\select", field] if !trailing && is_identifier(field) => {
      Ok(OperatorName::Form(OpForm::Select { leading, field: IString::from(*field) }))
    }

    ["\\field_arrow", field] if !trailing && is_identifier(field) => {
      Ok(OperatorName::Form(OpForm::FieldArrow { leading, field: IString::from(*field) }))
    }

    [single] if *single != HOLE && *single != "\\select" && *single != "\\field_arrow" => {
      if holes == Holes::None && is_identifier(single) {
        Ok(OperatorName::Id(IString::from(*single)))
      } else {
        Ok(OperatorName::Form(OpForm::AnyOp { holes, op: IString::from(*single) }))
      }
    }

    [open, inner @ .., close]
      if *open != HOLE && *close != HOLE && inner.iter().all(|token| *token == HOLE) =>
    {
      Ok(OperatorName::Form(OpForm::Delimited {
        holes,
        open : IString::from(*open),
        close: IString::from(*close),
        args : inner.len(),
      }))
    }

    _ => Err(bad()),
  }
}

/// Parses a globals list. A malformed entry ends the parse: the entries before it are returned along with the error.
pub(crate) fn parse_globals(text: &str) -> (Vec<GlobalUse>, Option<RecordError>) {
  let mut globals = Vec::new();
  let mut rest    = text.trim();

  while !rest.is_empty() {
    let Some((entry, tail)) = rest.split_once(';') else {
      return (globals, Some(RecordError::BadGlobal(rest.to_string())));
    };

    let words: Vec<&str> = entry.split_whitespace().collect();
    match words.as_slice() {
      [sort, name] => globals.push(GlobalUse::new(*sort, *name)),
      _ => return (globals, Some(RecordError::BadGlobal(entry.trim().to_string()))),
    }
    rest = tail.trim_start();
  }

  (globals, None)
}

fn single_word(text: &str) -> Option<&str> {
  let mut words = text.split_whitespace();
  match (words.next(), words.next()) {
    (Some(word), None) => Some(word),
    _ => None,
  }
}
