/*!

The `SymbolTable` owns every namespace of a checking session: the binding log of functions, types, and variables, the
overload/tag index, the sort registry, and the map from declared type names to sorts. One table is created per session
and passed to everything that needs it.

User errors never abort an operation. They are reported to the `DiagnosticSink` the caller supplies, and the table is
left in a consistent state. Contract violations by the caller, such as exiting the global scope or declaring a
function inside a function scope, panic.

*/

use std::fmt::{Debug, Display, Formatter};
use std::io::{BufRead, Write};

use once_cell::sync::Lazy;

use crate::{
  abstractions::{join_string, IString},
  api::{
    binding::{Binding, FunctionInfo, ScopeKind, TypeInfo, VarInfo, VarKind},
    diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink},
    operator::{OperatorName, Signature},
    tag::TagInfo,
    token::{SourceLocation, Token},
    use_def::UseDefTable,
  },
  core::{
    binding_log::{BindingLog, LogEntry},
    dump,
    import::{self, ImportError, ImportOptions, ImportSummary},
    names,
    overload_index::{OperatorEntry, OverloadIndex, SignatureSet, TagOutcome},
    resolution::{self, ResolvedOp},
    sort::{SortCollection, SortId, SortSet},
    sort_map::SortTranslationMap,
  },
  trace,
};

const DISPLAY_INDENT: usize = 2;

static NO_SIGNATURES: Lazy<SignatureSet> = Lazy::new(SignatureSet::new);

/// The result of `SymbolTable::declare`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum DeclareOutcome {
  /// No visible binding of the name existed.
  Inserted,
  /// A binding of the name was already visible. A diagnostic was recorded and the new binding shadows the old one.
  Redeclared,
  /// A built-in name (`Bool`, `bool`, `TRUE`, `FALSE`) was declared again. Nothing was recorded or inserted.
  Ignored,
}

impl DeclareOutcome {
  #[inline(always)]
  pub fn is_redeclaration(self) -> bool {
    self != DeclareOutcome::Inserted
  }
}

#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct TableStats {
  pub operators  : usize,
  pub signatures : usize,
  pub tags       : usize,
  pub bindings   : usize,
  pub scope_depth: usize,
  pub sorts      : usize,
}

impl Display for TableStats {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} operators ({} signatures), {} tags, {} bindings in {} scopes, {} sorts",
      self.operators, self.signatures, self.tags, self.bindings, self.scope_depth, self.sorts
    )
  }
}

pub struct SymbolTable {
  pub(crate) log  : BindingLog,
  pub(crate) index: OverloadIndex,
  pub(crate) sorts: SortCollection,
  type_to_sort    : SortTranslationMap,
  exporting       : bool,
  importing       : bool,
}

impl Default for SymbolTable {
  fn default() -> Self {
    let mut type_to_sort = SortTranslationMap::new();
    type_to_sort.bind(names::BOOL_TYPE.clone(), names::BOOL.clone());

    SymbolTable {
      log      : BindingLog::new(),
      index    : OverloadIndex::new(),
      sorts    : SortCollection::new(),
      type_to_sort,
      exporting: true,
      importing: false,
    }
  }
}

impl SymbolTable {
  pub fn new() -> Self {
    Self::default()
  }

  // region Scopes

  /// Opens a nested scope. Panics if `kind` is `ScopeKind::Global`.
  pub fn enter_scope(&mut self, kind: ScopeKind) {
    self.log.enter_scope(kind);
  }

  /// Closes the innermost scope, discarding its bindings. Panics if only the global scope is open.
  pub fn exit_scope(&mut self) {
    self.log.exit_scope();
  }

  pub fn current_scope(&self) -> ScopeKind {
    self.log.current_scope()
  }

  // endregion Scopes

  // region Declarations

  /// Declares `binding` in the current scope.
  ///
  /// Functions and types are checked against every binding in the log, variables only against the bindings of the
  /// current scope and any enclosing quantifier scopes. During an import no redeclaration check is made.
  pub fn declare(&mut self, mut binding: Binding, sink: &mut dyn DiagnosticSink) -> DeclareOutcome {
    self.log.check_scope(&binding);

    let previous = if self.importing {
      None
    } else {
      match &binding {
        Binding::Variable(_) => self.log.lookup_in_scope(binding.name()),
        _ => self.log.lookup_any(binding.name()),
      }
    };

    let outcome = match previous {
      None => DeclareOutcome::Inserted,

      Some(_) if is_builtin_name(&binding) => {
        trace!(4, "ignoring redeclaration of built-in {}", binding.name());
        return DeclareOutcome::Ignored;
      }

      Some(previous) => {
        let message = format!(
          "{} {} redeclared; previous declaration as {} at {}",
          binding.description(),
          binding.name(),
          previous.description(),
          previous.location()
        );
        Diagnostic::new(DiagnosticKind::Redeclaration, message, binding.location().clone()).emit(sink);
        DeclareOutcome::Redeclared
      }
    };

    binding.set_export(self.exporting);
    self.intern_sorts(&binding);
    if let Binding::Type(info) = &binding {
      self.bind_type_sort(info);
    }
    self.log.declare(binding);
    outcome
  }

  pub fn declare_function(&mut self, info: FunctionInfo, sink: &mut dyn DiagnosticSink) -> DeclareOutcome {
    self.declare(Binding::Function(info), sink)
  }

  pub fn declare_type(&mut self, info: TypeInfo, sink: &mut dyn DiagnosticSink) -> DeclareOutcome {
    self.declare(Binding::Type(info), sink)
  }

  pub fn declare_variable(&mut self, info: VarInfo, sink: &mut dyn DiagnosticSink) -> DeclareOutcome {
    self.declare(Binding::Variable(info), sink)
  }

  /// Registers the sorts a binding mentions, so that distinct sort names stay distinct during resolution.
  fn intern_sorts(&mut self, binding: &Binding) {
    match binding {
      Binding::Function(info) => self.intern_signature(&info.signature),
      Binding::Type(info)     => {
        self.sorts.intern(&info.based_on);
      }
      Binding::Variable(info) => {
        self.sorts.intern(&info.sort);
      }
    }
  }

  fn intern_signature(&mut self, signature: &Signature) {
    for sort in signature.domain.iter().chain(std::iter::once(&signature.range)) {
      self.sorts.intern(sort);
    }
  }

  fn bind_type_sort(&mut self, info: &TypeInfo) {
    let base  = self.sorts.lookup_name(&info.based_on);
    let value = self.sorts.make_value(self.sorts.underlying(base));
    let sort  = self.sorts.name(value);
    trace!(5, "type {} has sort {}", info.id.text, sort);
    self.type_to_sort.bind(info.id.text.clone(), sort);
  }

  // endregion Declarations

  // region Lookup

  /// The most recent binding of `name` in any open scope.
  pub fn lookup_any(&self, name: &IString) -> Option<&Binding> {
    self.log.lookup_any(name)
  }

  /// The most recent binding of `name` visible without crossing a function, claim, abstract type, or global scope
  /// boundary.
  pub fn lookup_in_scope(&self, name: &IString) -> Option<&Binding> {
    self.log.lookup_in_scope(name)
  }

  #[inline(always)]
  pub fn exists(&self, name: &IString) -> bool {
    self.lookup_any(name).is_some()
  }

  pub fn type_info(&self, name: &IString) -> Option<&TypeInfo> {
    self.lookup_any(name).and_then(Binding::as_type)
  }

  pub fn var_info(&self, name: &IString) -> Option<&VarInfo> {
    self.lookup_any(name).and_then(Binding::as_variable)
  }

  pub fn function_info(&self, name: &IString) -> Option<&FunctionInfo> {
    self.lookup_any(name).and_then(Binding::as_function)
  }

  pub fn var_info_in_scope(&self, name: &IString) -> Option<&VarInfo> {
    self.log.var_info_in_scope(name)
  }

  /// Translates a declared type name to the name of its sort. Names that are not declared types translate to
  /// themselves.
  pub fn sort_from_type(&self, name: &IString) -> IString {
    self.type_to_sort.translate(name)
  }

  /// Live bindings from the outermost scope inward.
  pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
    self.log.bindings()
  }

  pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
    self.log.entries()
  }

  // endregion Lookup

  // region Operators and Tags

  /// Adds an overload of `name`. Returns `false` if the signature was already present.
  pub fn enter_op(&mut self, name: OperatorName, signature: Signature) -> bool {
    trace!(5, "entering op {} {}", name, signature);
    self.intern_signature(&signature);
    self.index.enter_op(name, signature)
  }

  pub fn lookup_op(&self, name: &OperatorName) -> Option<&OperatorEntry> {
    self.index.lookup_op(name)
  }

  /// The overloads of `name`, empty if the operator is unknown.
  pub fn possible_ops(&self, name: &OperatorName) -> &SignatureSet {
    self.index.possible_ops(name).unwrap_or(&*NO_SIGNATURES)
  }

  pub fn op_exists_with_arity(&self, name: &OperatorName, arity: usize) -> bool {
    self.index.op_exists_with_arity(name, arity)
  }

  /// Enters a tag. When the entry replaces one of a different kind, a `TagKindMismatch` diagnostic is recorded; the
  /// replacement happens regardless.
  pub fn enter_tag(&mut self, mut tag: TagInfo, force: bool, sink: &mut dyn DiagnosticSink) -> TagOutcome {
    tag.imported = self.importing;
    let kind     = tag.kind;
    let id       = tag.id.clone();

    let outcome = self.index.enter_tag(tag, force);
    if let TagOutcome::Replaced(previous) = &outcome {
      if !previous.kind.compatible_with(kind) {
        let message = format!("tag {} redefined as {}, previously declared as {}", id.text, kind, previous.kind);
        Diagnostic::new(DiagnosticKind::TagKindMismatch, message, id.location.clone()).emit(sink);
      }
    }
    outcome
  }

  pub fn lookup_tag(&self, name: &IString) -> Option<&TagInfo> {
    self.index.lookup_tag(name)
  }

  // endregion Operators and Tags

  // region Resolution

  /// The overloads of `name` whose arity, range, and domain fit the arguments. An empty result means no overload
  /// applies.
  pub fn resolve_overloads(
    &self,
    name     : &OperatorName,
    arg_sorts: &[SortSet],
    expected : Option<SortId>,
  ) -> Vec<ResolvedOp> {
    resolution::ops_with_legal_domain(&self.index, &self.sorts, name, arg_sorts, expected)
  }

  /// Like `resolve_overloads`, recording an `UnresolvedOverload` diagnostic at `location` when nothing applies.
  pub fn resolve_application(
    &self,
    name     : &OperatorName,
    arg_sorts: &[SortSet],
    expected : Option<SortId>,
    location : &SourceLocation,
    sink     : &mut dyn DiagnosticSink,
  ) -> Vec<ResolvedOp> {
    let resolved = self.resolve_overloads(name, arg_sorts, expected);
    if resolved.is_empty() {
      let arguments = join_string(arg_sorts.iter().map(|set| self.describe_sorts(set)), ", ");
      let message = match expected {
        Some(range) => {
          format!("no signature of {} applies to ({}) -> {}", name, arguments, self.sorts.name(range))
        }
        None => format!("no signature of {} applies to ({})", name, arguments),
      };
      Diagnostic::new(DiagnosticKind::UnresolvedOverload, message, location.clone()).emit(sink);
    }
    resolved
  }

  /// The possible sorts of a literal of sort `sort`. An integer literal may also be a `double`, and a zero integer
  /// literal may be any pointer. Nullary overloads named by the literal's text contribute their ranges.
  pub fn literal_sorts(&mut self, literal: &Token, sort: SortId) -> SortSet {
    let mut possible = SortSet::singleton(sort);
    let name         = OperatorName::Id(literal.text.clone());

    if sort == self.sorts.lookup_name(&names::INT) {
      possible.insert(self.sorts.lookup_name(&names::DOUBLE));
      self.index.enter_op(name.clone(), Signature::constant(names::DOUBLE.clone()));
      if resolution::is_zero_literal(&literal.text) {
        possible.extend(self.sorts.pointer_sorts());
      }
    }

    possible.union_in_place(&resolution::nullary_ranges(&self.index, &self.sorts, &name));
    possible
  }

  /// The possible sorts of an identifier used as a term: the sort of a variable in scope, else of a global constant,
  /// else the ranges of nullary overloads of that name. Records `UnrecognizedIdentifier` when there are none.
  pub fn identifier_sorts(&self, identifier: &Token, sink: &mut dyn DiagnosticSink) -> SortSet {
    if let Some(info) = self.var_info_in_scope(&identifier.text) {
      return SortSet::singleton(self.sorts.lookup_name(&info.sort));
    }
    if let Some(info) = self.var_info(&identifier.text).filter(|info| info.kind == VarKind::Const) {
      return SortSet::singleton(self.sorts.lookup_name(&info.sort));
    }

    let name     = OperatorName::Id(identifier.text.clone());
    let possible = resolution::nullary_ranges(&self.index, &self.sorts, &name);
    if possible.is_empty() {
      Diagnostic::new(
        DiagnosticKind::UnrecognizedIdentifier,
        format!("unrecognized identifier {}", identifier.text),
        identifier.location.clone(),
      )
      .emit(sink);
    }
    possible
  }

  fn describe_sorts(&self, set: &SortSet) -> String {
    format!("{{{}}}", join_string(set.iter().map(|id| self.sorts.name(id)), ", "))
  }

  // endregion Resolution

  // region Sorts and Settings

  pub fn sorts(&self) -> &SortCollection {
    &self.sorts
  }

  pub fn sorts_mut(&mut self) -> &mut SortCollection {
    &mut self.sorts
  }

  /// Sets whether subsequent declarations are exported.
  pub fn set_exporting(&mut self, exporting: bool) {
    self.exporting = exporting;
  }

  #[inline(always)]
  pub fn is_exporting(&self) -> bool {
    self.exporting
  }

  #[inline(always)]
  pub fn is_importing(&self) -> bool {
    self.importing
  }

  /// Returns the previous value.
  pub(crate) fn set_importing(&mut self, importing: bool) -> bool {
    std::mem::replace(&mut self.importing, importing)
  }

  // endregion Sorts and Settings

  // region Import and Dump

  /// Merges a serialized table read from `reader` into this table. Malformed records are reported to `sink` and
  /// skipped. A missing header, prefix, or trailer ends the import with an error, leaving the records read so far in
  /// place.
  pub fn import<R: BufRead>(
    &mut self,
    reader : R,
    options: &ImportOptions,
    sink   : &mut dyn DiagnosticSink,
    use_def: Option<&mut dyn UseDefTable>,
  ) -> Result<ImportSummary, ImportError> {
    import::run(self, reader, options, sink, use_def)
  }

  /// Writes the table in the import format. With `lco` set, the output can be read back by `import`; otherwise it is
  /// a listing that includes scopes and local bindings.
  pub fn dump<W: Write>(&self, writer: &mut W, lco: bool) -> std::io::Result<()> {
    dump::write_table(self, writer, lco)
  }

  pub fn stats(&self) -> TableStats {
    TableStats {
      operators  : self.index.operator_count(),
      signatures : self.index.signature_count(),
      tags       : self.index.tag_count(),
      bindings   : self.log.binding_count(),
      scope_depth: self.log.depth(),
      sorts      : self.sorts.len(),
    }
  }

  // endregion Import and Dump

  /// Formats the table for display with `prefix` for each line. The `Debug` impl defers to this method.
  fn debug_fmt(&self, f: &mut Formatter<'_>, prefix: &str) -> std::fmt::Result {
    let inner_prefix = format!("{}{}", prefix, " ".repeat(DISPLAY_INDENT));
    writeln!(f, "{}SymbolTable {{", prefix)?;
    writeln!(f, "{}stats: {}", inner_prefix, self.stats())?;
    writeln!(f, "{}exporting: {}, importing: {}", inner_prefix, self.exporting, self.importing)?;

    let mut operators: Vec<String> = self
        .index
        .operators()
        .map(|entry| format!("{} [{}]", entry.name, join_string(entry.signatures.sorted().into_iter(), " | ")))
        .collect();
    operators.sort();
    if !operators.is_empty() {
      format_named_list(f, inner_prefix.as_str(), "operators", &operators)?;
    }

    let mut tags: Vec<String> = self.index.tags().map(|tag| format!("{} {}", tag.kind, tag.name())).collect();
    tags.sort();
    if !tags.is_empty() {
      format_named_list(f, inner_prefix.as_str(), "tags", &tags)?;
    }

    let entries: Vec<String> = self
        .log
        .entries()
        .map(|entry| {
          match entry {
            LogEntry::Scope(kind)      => format!("-- {} --", kind),
            LogEntry::Binding(binding) => format!("{} {}", binding.description(), binding.name()),
          }
        })
        .collect();
    format_named_list(f, inner_prefix.as_str(), "bindings", &entries)?;

    writeln!(f, "{}}}", prefix)
  }
}

impl Debug for SymbolTable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    self.debug_fmt(f, "")
  }
}

/// Built-in names whose redeclaration is silently dropped.
fn is_builtin_name(binding: &Binding) -> bool {
  let name = binding.name();
  match binding {
    Binding::Type(_)     => *name == *names::BOOL_TYPE || *name == *names::BOOL,
    Binding::Variable(_) => *name == *names::TRUE || *name == *names::FALSE,
    Binding::Function(_) => false,
  }
}

/// Helper function to format a named list of something:
/// ```txt
/// thing_name: [
///   thing1
///   thing2
/// ]
/// ```
fn format_named_list<T: Display>(f: &mut Formatter<'_>, prefix: &str, name: &str, list: &[T]) -> std::fmt::Result {
  let tab = " ".repeat(DISPLAY_INDENT);
  writeln!(f, "{}{}: [", prefix, name)?;
  for item in list.iter() {
    writeln!(f, "{}{}{}", prefix, tab, item)?;
  }
  writeln!(f, "{}]", prefix)
}
