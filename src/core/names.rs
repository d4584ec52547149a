/*!

Interned names the symbol table treats specially. Interning happens lazily on first use.

*/

use once_cell::sync::Lazy;

use crate::abstractions::IString;

// Built-in sorts
pub static NO_SORT: Lazy<IString> = Lazy::new(|| IString::from("_NoSort"));
pub static BOOL   : Lazy<IString> = Lazy::new(|| IString::from("bool"));
pub static INT    : Lazy<IString> = Lazy::new(|| IString::from("int"));
pub static CHAR   : Lazy<IString> = Lazy::new(|| IString::from("char"));
pub static DOUBLE : Lazy<IString> = Lazy::new(|| IString::from("double"));
pub static FLOAT  : Lazy<IString> = Lazy::new(|| IString::from("float"));

/// The LCL spelling of the boolean type, a built-in synonym for `bool`.
pub static BOOL_TYPE: Lazy<IString> = Lazy::new(|| IString::from("Bool"));

// Boolean constants may be re-entered without being flagged.
pub static TRUE : Lazy<IString> = Lazy::new(|| IString::from("TRUE"));
pub static FALSE: Lazy<IString> = Lazy::new(|| IString::from("FALSE"));

// `=` and `\eq` name the same operator.
pub static EQUALS  : Lazy<IString> = Lazy::new(|| IString::from("="));
pub static EQ_SYMBOL: Lazy<IString> = Lazy::new(|| IString::from("\\eq"));

// Suffixes of structurally derived sorts.
pub const POINTER_SUFFIX: &str = "_Ptr";
pub const ARRAY_SUFFIX  : &str = "_Arr";
pub const OBJECT_SUFFIX : &str = "_Obj";

/// The primitive sorts registered in every fresh `SortCollection`.
pub fn builtin_primitive_sorts() -> [&'static IString; 5] {
  [&*BOOL, &*INT, &*CHAR, &*DOUBLE, &*FLOAT]
}
