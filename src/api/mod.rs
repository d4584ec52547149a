/*!

The public API of the library: the `SymbolTable` facade and the values that flow through it.

*/

pub mod binding;
pub mod diagnostic;
pub mod operator;
pub mod symbol_table;
pub mod tag;
pub mod token;
pub mod use_def;
