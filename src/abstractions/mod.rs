/*!

Types/type aliases that abstract over the implementing backing type.

A motivating example is `IString`, the interned string used for every identifier, sort name, and operator token in the
symbol table. Several crates provide interning. This module redirects to whatever chosen implementation we want, so
swapping the backing crate touches only this file.

*/

mod nat_set;
mod string_join;

// Logging
pub mod log;

// A set of natural numbers
pub use nat_set::NatSet;

// Interned string. Equality of two `IString`s is a pointer comparison for all but the shortest strings.
pub use string_cache::DefaultAtom as IString;

// Join sequences with a separator
pub use string_join::{join_iter, join_string};

// Hash containers used throughout. Redirected here so the hasher can be swapped in one place.
pub type HashMap<K, V> = std::collections::HashMap<K, V>;
pub type HashSet<T>    = std::collections::HashSet<T>;
