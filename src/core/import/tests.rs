use crate::{
  abstractions::{HashSet, IString},
  api::{
    binding::{GlobalUse, ScopeKind, VarInfo, VarKind},
    diagnostic::{DiagnosticKind, Diagnostics, Severity},
    operator::OperatorName,
    symbol_table::{DeclareOutcome, SymbolTable},
    tag::{TagContent, TagInfo, TagKind},
    token::{SourceLocation, Token},
    use_def::{PlaceholderKind, UseDefTable},
  },
  core::{
    import::{ImportError, ImportOptions, ImportSummary},
    overload_index::TagOutcome,
    sort::SortKind,
  },
};

const WELL_FORMED: &str = "\
%LCLSymbolTable
%LCLop __ + __ :int, int -> int
%LCLop empty : -> set
%LCLop __ [__] :set, int -> bool
%LCLtype set set mutable
%LCLtype count_t int exposed
%LCLfcn size :set -> int
%LCLfcnGlobals int total;
%LCLvar total int
%LCLconst MAX int
%LCLenumConst RED int
%LCLtag node struct
%LCLSymbolTableEnd
";

fn name(text: &str) -> IString {
  IString::from(text)
}

fn import_text(
  table      : &mut SymbolTable,
  text       : &str,
  diagnostics: &mut Diagnostics,
) -> Result<ImportSummary, ImportError> {
  table.import(text.as_bytes(), &ImportOptions::new("test.lcs"), diagnostics, None)
}

fn dump_lco(table: &SymbolTable) -> String {
  let mut out = Vec::new();
  table.dump(&mut out, true).unwrap();
  String::from_utf8(out).unwrap()
}

/// Records the placeholders an import asks for.
#[derive(Default)]
struct RecordingUseDef {
  globals: HashSet<IString>,
  added  : Vec<(IString, PlaceholderKind)>,
}

impl UseDefTable for RecordingUseDef {
  fn exists_global(&self, name: &IString) -> bool {
    self.globals.contains(name)
  }

  fn add_placeholder(&mut self, name: IString, kind: PlaceholderKind, _location: &SourceLocation) {
    self.globals.insert(name.clone());
    self.added.push((name, kind));
  }
}

#[test]
fn well_formed_import() {
  let mut table       = SymbolTable::new();
  let mut diagnostics = Diagnostics::new();

  let summary = import_text(&mut table, WELL_FORMED, &mut diagnostics).unwrap();

  assert!(diagnostics.is_empty(), "{:?}", diagnostics);
  assert_eq!(summary, ImportSummary { lines: 13, records: 11, skipped: 0 });
  assert!(!table.is_importing());

  assert_eq!(table.possible_ops(&OperatorName::infix("+")).len(), 1);
  assert!(table.op_exists_with_arity(&OperatorName::id("empty"), 0));
  assert!(table.op_exists_with_arity(&crate::core::import::parse_operator_name("__ [__]").unwrap(), 2));

  let set = table.type_info(&name("set")).cloned().unwrap();
  assert!(set.is_abstract() && set.is_mutable());
  assert_eq!(set.based_on, name("set"));
  let set_sort = table.sorts().find(&name("set")).unwrap();
  assert_eq!(table.sorts().kind(set_sort), SortKind::Abstract { mutable: true });
  assert!(table.sorts().is_mutable(set_sort));
  assert_eq!(table.sort_from_type(&name("count_t")), name("int"));

  let size = table.function_info(&name("size")).cloned().unwrap();
  assert_eq!(size.globals, vec![GlobalUse::new("int", "total")]);
  assert_eq!(size.id.location, SourceLocation::new("test.lcs", 7, 9));
  assert!(size.export);

  assert!(table.var_info(&name("total")).is_some_and(|v| v.kind == VarKind::Var && v.export));
  assert!(table.var_info(&name("MAX")).is_some_and(|v| v.kind == VarKind::Const));
  assert!(table.var_info(&name("RED")).is_some_and(|v| v.kind == VarKind::Enum));

  let node = table.lookup_tag(&name("node")).unwrap();
  assert_eq!(node.kind, TagKind::Struct);
  assert!(node.imported);
}

#[test]
fn reimport_keeps_one_entry_per_name() {
  let mut table       = SymbolTable::new();
  let mut diagnostics = Diagnostics::new();

  import_text(&mut table, WELL_FORMED, &mut diagnostics).unwrap();
  let first = table.stats();
  import_text(&mut table, WELL_FORMED, &mut diagnostics).unwrap();
  let second = table.stats();

  assert!(diagnostics.is_empty(), "{:?}", diagnostics);
  assert_eq!(second.operators, first.operators);
  assert_eq!(second.signatures, first.signatures);
  assert_eq!(second.tags, first.tags);
  for text in ["set", "count_t", "size", "total", "MAX", "RED"] {
    assert!(table.exists(&name(text)), "{text}");
  }
}

#[test]
fn one_malformed_line_yields_one_diagnostic() {
  let mut table       = SymbolTable::new();
  let mut diagnostics = Diagnostics::new();
  let text = "\
%LCLSymbolTable
%LCLvar before int
%LCLop __ + __ int -> int
%LCLvar after int
%LCLSymbolTableEnd
";

  let summary = import_text(&mut table, text, &mut diagnostics).unwrap();

  assert_eq!(summary.records, 2);
  assert_eq!(summary.skipped, 1);
  assert!(table.var_info(&name("before")).is_some());
  assert!(table.var_info(&name("after")).is_some());
  assert_eq!(diagnostics.len(), 1);

  let diagnostic = diagnostics.iter().next().unwrap();
  assert_eq!(diagnostic.kind, DiagnosticKind::MalformedImportLine);
  assert_eq!(diagnostic.location, SourceLocation::new("test.lcs", 3, 5));
}

#[test]
fn framing_errors() {
  let mut diagnostics = Diagnostics::new();

  let mut table = SymbolTable::new();
  assert!(matches!(
    import_text(&mut table, "", &mut diagnostics),
    Err(ImportError::MissingHeader { found: None, .. })
  ));
  assert!(matches!(
    import_text(&mut table, "%LCLvar a int\n", &mut diagnostics),
    Err(ImportError::MissingHeader { found: Some(_), .. })
  ));
  assert!(!table.exists(&name("a")));

  let missing_prefix = "%LCLSymbolTable\n%LCLvar a int\nvar b int\n%LCLvar c int\n%LCLSymbolTableEnd\n";
  match import_text(&mut table, missing_prefix, &mut diagnostics) {
    Err(ImportError::MissingPrefix { line, text, .. }) => {
      assert_eq!(line, 3);
      assert_eq!(text, "var b int");
    }
    other => panic!("expected a missing prefix error, got {:?}", other),
  }
  // Records before the error stay.
  assert!(table.exists(&name("a")));
  assert!(!table.exists(&name("b")));
  assert!(!table.exists(&name("c")));
  assert!(!table.is_importing());

  let mut table = SymbolTable::new();
  let truncated = "%LCLSymbolTable\n%LCLfcn first : -> int\n";
  assert!(matches!(
    import_text(&mut table, truncated, &mut diagnostics),
    Err(ImportError::MissingTrailer { .. })
  ));
  assert!(table.function_info(&name("first")).is_some());

  assert!(diagnostics.is_empty());
}

#[test]
fn function_globals_state_machine() {
  let mut table       = SymbolTable::new();
  let mut diagnostics = Diagnostics::new();
  let text = "\
%LCLSymbolTable
%LCLfcnGlobals int stray;
%LCLfcn first : -> int
%LCLfcn second : -> int
%LCLfcnGlobals int count;
%LCLfcn last :int -> int
%LCLSymbolTableEnd
";

  let summary = import_text(&mut table, text, &mut diagnostics).unwrap();

  assert_eq!(summary.records, 3);
  assert_eq!(summary.skipped, 2);
  assert_eq!(diagnostics.count(DiagnosticKind::UnexpectedFunctionGlobals), 1);
  assert_eq!(diagnostics.count(DiagnosticKind::IllegalFunctionDeclaration), 1);

  let first = table.function_info(&name("first")).cloned().unwrap();
  assert_eq!(first.globals, vec![GlobalUse::new("int", "count")]);
  assert!(table.function_info(&name("second")).is_none());
  assert!(table.function_info(&name("last")).is_some_and(|f| f.globals.is_empty()));
}

#[test]
fn malformed_globals_keep_the_well_formed_prefix() {
  let mut table       = SymbolTable::new();
  let mut diagnostics = Diagnostics::new();
  let text = "%LCLSymbolTable\n%LCLfcn f : -> int\n%LCLfcnGlobals int count; junk;\n%LCLSymbolTableEnd\n";

  import_text(&mut table, text, &mut diagnostics).unwrap();

  assert_eq!(diagnostics.count(DiagnosticKind::MalformedImportLine), 1);
  let f = table.function_info(&name("f")).cloned().unwrap();
  assert_eq!(f.globals, vec![GlobalUse::new("int", "count")]);
}

#[test]
fn unknown_sorts_and_records_degrade() {
  let mut table       = SymbolTable::new();
  let mut diagnostics = Diagnostics::new();
  let text = "\
%LCLSymbolTable
%LCLtype stack list exposed
%LCLvar top list
%LCLsort list
%LCLSymbolTableEnd
";

  let summary = import_text(&mut table, text, &mut diagnostics).unwrap();

  assert_eq!(summary.records, 2);
  assert_eq!(diagnostics.count(DiagnosticKind::UnknownBaseSort), 2);
  assert_eq!(diagnostics.count(DiagnosticKind::UnknownRecord), 1);
  assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
  assert_eq!(diagnostics.iter().next().map(|d| d.location.clone()), Some(SourceLocation::new("test.lcs", 2, 16)));

  assert_eq!(table.type_info(&name("stack")).map(|t| t.based_on.clone()), Some(name("_NoSort")));
  assert_eq!(table.var_info(&name("top")).map(|v| v.sort.clone()), Some(name("_NoSort")));
}

#[test]
fn sort_renames_apply_to_every_sort() {
  let mut table       = SymbolTable::new();
  let mut diagnostics = Diagnostics::new();
  let options         = ImportOptions::new("renamed.lcs").with_rename("elem", "int");
  let text = "\
%LCLSymbolTable
%LCLop first :elem, elem -> elem
%LCLvar head elem
%LCLfcn peek : -> elem
%LCLfcnGlobals elem head;
%LCLSymbolTableEnd
";

  table.import(text.as_bytes(), &options, &mut diagnostics, None).unwrap();

  assert!(diagnostics.is_empty(), "{:?}", diagnostics);
  let ints = table.sorts().set_of(["int"]);
  assert_eq!(table.resolve_overloads(&OperatorName::id("first"), &[ints.clone(), ints], None).len(), 1);
  assert_eq!(table.var_info(&name("head")).map(|v| v.sort.clone()), Some(name("int")));
  let peek = table.function_info(&name("peek")).cloned().unwrap();
  assert_eq!(peek.signature.range, name("int"));
  assert_eq!(peek.globals, vec![GlobalUse::new("int", "head")]);
}

#[test]
fn placeholders_for_new_names() {
  let mut table       = SymbolTable::new();
  let mut diagnostics = Diagnostics::new();
  let mut use_def     = RecordingUseDef::default();
  use_def.globals.insert(name("size"));

  table
      .import(WELL_FORMED.as_bytes(), &ImportOptions::new("test.lcs"), &mut diagnostics, Some(&mut use_def))
      .unwrap();

  assert_eq!(
    use_def.added,
    vec![
      (name("set"), PlaceholderKind::Datatype { abstract_: true, mutable: Some(true) }),
      (name("count_t"), PlaceholderKind::Datatype { abstract_: false, mutable: None }),
      (name("total"), PlaceholderKind::Variable),
      (name("MAX"), PlaceholderKind::Constant),
      (name("RED"), PlaceholderKind::Constant),
    ]
  );
}

#[test]
fn imported_names_meet_user_declarations() {
  let mut table       = SymbolTable::new();
  let mut diagnostics = Diagnostics::new();
  import_text(&mut table, WELL_FORMED, &mut diagnostics).unwrap();

  // A user declaration of an imported name is an ordinary redeclaration.
  let outcome = table.declare_variable(
    VarInfo::new(Token::new("total", SourceLocation::new("user.lcl", 1, 1)), "int", VarKind::Var),
    &mut diagnostics,
  );
  assert_eq!(outcome, DeclareOutcome::Redeclared);

  // A user definition supersedes an imported tag without being forced.
  let definition = TagInfo::new(Token::synthetic("node"), TagKind::Struct, TagContent::Fields(Vec::new()));
  assert!(matches!(table.enter_tag(definition, false, &mut diagnostics), TagOutcome::Replaced(_)));
  assert!(table.lookup_tag(&name("node")).is_some_and(|tag| !tag.imported));

  // Imported variables are global, so the scoped lookup inside a function does not see them.
  table.enter_scope(ScopeKind::Function);
  assert!(table.var_info_in_scope(&name("total")).is_none());
  table.exit_scope();

  assert_eq!(diagnostics.count(DiagnosticKind::Redeclaration), 1);
}

#[test]
fn dump_then_import_round_trip() {
  let mut diagnostics = Diagnostics::new();

  let mut original = SymbolTable::new();
  import_text(&mut original, WELL_FORMED, &mut diagnostics).unwrap();
  let dumped = dump_lco(&original);

  let mut copy = SymbolTable::new();
  import_text(&mut copy, &dumped, &mut diagnostics).unwrap();

  assert!(diagnostics.is_empty(), "{:?}", diagnostics);
  assert_eq!(dump_lco(&copy), dumped);
  assert_eq!(copy.stats(), original.stats());
}

#[test]
fn imported_sorts_stay_distinct_in_resolution() {
  let mut table       = SymbolTable::new();
  let mut diagnostics = Diagnostics::new();
  let text = "\
%LCLSymbolTable
%LCLop first :list -> int
%LCLop first :queue -> bool
%LCLvar items list
%LCLSymbolTableEnd
";

  import_text(&mut table, text, &mut diagnostics).unwrap();
  assert!(diagnostics.is_empty(), "{:?}", diagnostics);

  let possible = table.identifier_sorts(&Token::synthetic("items"), &mut diagnostics);
  assert_eq!(table.sorts().kind(possible.iter().next().unwrap()), SortKind::Named);

  let resolved = table.resolve_overloads(&OperatorName::id("first"), &[possible], None);
  assert_eq!(resolved.len(), 1);
  assert_eq!(&*resolved[0].signature.range, "int");
}
