/*!

The symbol table of an LCL specification checker: scoped bindings of functions, types, and variables, overloaded
operators and their resolution, tags, and the import and export of whole tables.

```
use lclsymtab::{Diagnostics, OperatorName, Signature, SymbolTable, IString};

let mut table       = SymbolTable::new();
let mut diagnostics = Diagnostics::new();

let plus = OperatorName::infix("+");
table.enter_op(plus.clone(), Signature::new(vec![IString::from("int"), IString::from("int")], IString::from("int")));

let ints     = table.sorts().set_of(["int"]);
let resolved = table.resolve_overloads(&plus, &[ints.clone(), ints], None);
assert_eq!(resolved.len(), 1);
assert!(diagnostics.is_empty());
```

*/

pub mod api;
pub mod abstractions;
mod core;

// We re-export abstractions that are meant to be used publicly.
pub use abstractions::{
  log,
  IString
};

pub use api::{
  binding::{
    Binding,
    FunctionInfo,
    GlobalUse,
    ScopeKind,
    TypeAttribute,
    TypeAttributes,
    TypeInfo,
    VarInfo,
    VarKind,
    VarKinds,
  },
  diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics, Severity},
  operator::{Holes, OpForm, OperatorKey, OperatorName, Signature},
  symbol_table::{DeclareOutcome, SymbolTable, TableStats},
  tag::{TagContent, TagField, TagInfo, TagKind},
  token::{SourceLocation, Token},
  use_def::{PlaceholderKind, UseDefTable},
};

pub use crate::core::{
  binding_log::LogEntry,
  import::{parse_operator_name, parse_signature, ImportError, ImportOptions, ImportSummary, RecordError},
  overload_index::{OperatorEntry, SignatureSet, TagOutcome},
  resolution::ResolvedOp,
  sort::{Sort, SortCollection, SortId, SortKind, SortSet},
  sort_map::SortTranslationMap,
};

// Used by the logging macros.
#[doc(hidden)]
pub use tracing;
