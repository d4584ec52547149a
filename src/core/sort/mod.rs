/*!

A sort (represented in code by the [`Sort`] struct) is the abstract type of a value, independent of its C
representation. Sorts are interned in a [`SortCollection`] and referred to by [`SortId`] handles.

## Lifecycle and Ownership

A `SortCollection` is owned by the `SymbolTable` it belongs to. Sorts are never removed, so a `SortId` stays valid for
the lifetime of its table. The sentinel `SortId::NONE`, named `_NoSort`, stands in for every sort that could not be
resolved; it is the only sort that is never a member of a meaningful possible-sort set.

## Sort Names Versus Sort Ids

Overload signatures and binding records carry sort *names*, exactly as they are written in an import file. Resolution
maps each name back to an id through `SortCollection::lookup_name` before testing membership in a [`SortSet`]. A name
that was never registered therefore maps to the sentinel and matches nothing.

*/

mod sort;
mod sort_set;
pub mod collection;

pub use sort::{Sort, SortId, SortKind};
pub use sort_set::SortSet;
pub use collection::SortCollection;
