/*!

Writing a table in the import format.

Operators are written first, ordered by name and then by signature, followed by the tags ordered by name. The binding
log then follows in declaration order, so that a function's `fcnGlobals` record directly follows its `fcn` record.

In `lco` mode every payload line carries the `%LCL` prefix and bindings local to a declaration (parameters, `let`
bindings, quantified variables, globals, privates) are left out, so the output can be imported again. Otherwise the
output is a listing: scope markers are written and records that are not exported are marked `spec`.

*/

use std::io::{self, Write};

use crate::{
  api::{
    binding::{format_globals, Binding},
    symbol_table::SymbolTable,
    tag::TagInfo,
  },
  core::{
    binding_log::LogEntry,
    import::{HEADER, PREFIX, TRAILER},
    overload_index::OperatorEntry,
  },
};

pub(crate) fn write_table<W: Write>(table: &SymbolTable, writer: &mut W, lco: bool) -> io::Result<()> {
  let prefix = if lco { PREFIX } else { "" };
  writeln!(writer, "{}", HEADER)?;

  let mut operators: Vec<&OperatorEntry> = table.index.operators().collect();
  operators.sort_by_cached_key(|entry| entry.name.to_string());
  for entry in operators {
    for signature in entry.signatures.sorted() {
      writeln!(writer, "{}op {} {}", prefix, entry.name, signature)?;
    }
  }

  let mut tags: Vec<&TagInfo> = table.index.tags().collect();
  tags.sort_by_cached_key(|tag| tag.name().to_string());
  for tag in tags {
    writeln!(writer, "{}tag {} {}", prefix, tag.name(), tag.kind.keyword())?;
  }

  for entry in table.log.entries() {
    match entry {
      LogEntry::Scope(kind) if !lco => writeln!(writer, "{}", kind)?,
      LogEntry::Scope(_) => {}
      LogEntry::Binding(binding) => write_binding(writer, binding, lco)?,
    }
  }

  writeln!(writer, "{}", TRAILER)
}

fn write_binding<W: Write>(writer: &mut W, binding: &Binding, lco: bool) -> io::Result<()> {
  let prefix = match (lco, binding.is_exported()) {
    (true, _)      => PREFIX,
    (false, true)  => "",
    (false, false) => "spec ",
  };

  match binding {
    Binding::Function(info) => {
      writeln!(writer, "{}fcn {} {}", prefix, info.id.text, info.signature)?;
      // The globals line is always prefixed.
      if info.globals.is_empty() {
        writeln!(writer, "{}fcnGlobals", PREFIX)
      } else {
        writeln!(writer, "{}fcnGlobals {}", PREFIX, format_globals(&info.globals))
      }
    }

    Binding::Type(info) => {
      writeln!(writer, "{}type {} {} {}", prefix, info.id.text, info.based_on, info.kind_keyword())
    }

    Binding::Variable(info) if lco && !info.kind.is_exportable() => Ok(()),

    Binding::Variable(info) => {
      writeln!(writer, "{}{} {} {}", prefix, info.kind.keyword(), info.id.text, info.sort)
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::api::{
    binding::{FunctionInfo, GlobalUse, ScopeKind, TypeInfo, VarInfo, VarKind},
    diagnostic::Diagnostics,
    operator::{OperatorName, Signature},
    symbol_table::SymbolTable,
    tag::{TagInfo, TagKind},
    token::Token,
  };
  use crate::abstractions::IString;

  fn sig(domain: &[&str], range: &str) -> Signature {
    Signature::new(domain.iter().map(|s| IString::from(*s)).collect(), IString::from(range))
  }

  fn dumped(table: &SymbolTable, lco: bool) -> String {
    let mut out = Vec::new();
    table.dump(&mut out, lco).unwrap();
    String::from_utf8(out).unwrap()
  }

  fn sample_table() -> SymbolTable {
    let mut table       = SymbolTable::new();
    let mut diagnostics = Diagnostics::new();

    table.enter_op(OperatorName::infix("+"), sig(&["int", "int"], "int"));
    table.enter_op(OperatorName::infix("+"), sig(&["double", "double"], "double"));
    table.enter_op(OperatorName::id("empty"), sig(&[], "int"));
    table.enter_tag(TagInfo::forward(Token::synthetic("node"), TagKind::Struct), false, &mut diagnostics);

    table.declare_type(TypeInfo::exposed(Token::synthetic("count_t"), "int"), &mut diagnostics);
    table.declare_function(
      FunctionInfo::new(
        Token::synthetic("size"),
        sig(&["count_t"], "int"),
        vec![GlobalUse::new("int", "total")],
      ),
      &mut diagnostics,
    );
    table.set_exporting(false);
    table.declare_variable(VarInfo::new(Token::synthetic("hidden"), "int", VarKind::Var), &mut diagnostics);
    table.set_exporting(true);
    table.enter_scope(ScopeKind::Function);
    table.declare_variable(VarInfo::new(Token::synthetic("n"), "int", VarKind::Param), &mut diagnostics);

    assert!(diagnostics.is_empty());
    table
  }

  #[test]
  fn lco_dump() {
    let expected = "\
%LCLSymbolTable
%LCLop __ + __ :double, double -> double
%LCLop __ + __ :int, int -> int
%LCLop empty : -> int
%LCLtag node struct
%LCLtype count_t int exposed
%LCLfcn size :count_t -> int
%LCLfcnGlobals int total;
%LCLvar hidden int
%LCLSymbolTableEnd
";
    assert_eq!(dumped(&sample_table(), true), expected);
  }

  #[test]
  fn listing_dump() {
    let expected = "\
%LCLSymbolTable
op __ + __ :double, double -> double
op __ + __ :int, int -> int
op empty : -> int
tag node struct
Global scope
type count_t int exposed
fcn size :count_t -> int
%LCLfcnGlobals int total;
spec var hidden int
Function scope
spec param n int
%LCLSymbolTableEnd
";
    assert_eq!(dumped(&sample_table(), false), expected);
  }
}
