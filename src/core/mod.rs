/*!

The engine behind the `SymbolTable` facade.

| module           | holds                                                              |
|:-----------------|:-------------------------------------------------------------------|
| `binding_log`    | scoped functions, types, and variables                             |
| `overload_index` | operators with their signature sets, and tags                      |
| `sort`           | the sort registry and possible-sort sets                           |
| `sort_map`       | name-to-sort translation                                           |
| `resolution`     | overload resolution over possible-sort sets                        |
| `import`         | merging a serialized table                                         |
| `dump`           | writing a table in the import format                               |

*/

pub mod binding_log;
pub mod overload_index;
pub mod sort;
pub mod sort_map;
pub mod resolution;
pub mod import;
pub(crate) mod dump;
pub(crate) mod names;

use crate::critical;

/// Reports a broken caller contract and panics. User errors are never reported this way.
pub(crate) fn contract_violation(message: std::fmt::Arguments) -> ! {
  critical!(0, "contract violation: {}", message);
  panic!("contract violation: {}", message)
}
