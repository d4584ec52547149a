use std::iter::once;
use std::fmt::Display;

/**
Join an iterator of items with a separator computed from the preceding item, which doesn't exist in the stdlib.
(C.f. `Vec::join(…)`)

From: https://stackoverflow.com/a/66951473
Usage:

    # use lclsymtab::abstractions::join_iter;
    let iter = ["int", "double"].iter().cloned();
    println!("{:?}", join_iter(iter, |_| ", ").collect::<String>());
    // "int, double"
 */
pub fn join_iter<T>(mut iter: impl Iterator<Item = T>, sep: impl Fn(&T) -> T)
                    -> impl Iterator<Item = T>
{
  iter
      .next()
      .into_iter()
      .chain(iter.flat_map(move |s| once(sep(&s)).chain(once(s))))
}

/// Join a list of things that can be displayed as string with a given separator. Used to render signature domains
/// and sort sets.
pub fn join_string<T: Display>(iter: impl Iterator<Item = T>, sep: &str) -> String {
  join_iter(iter.map(|t| t.to_string()), |_| sep.to_string()).collect::<String>()
}
