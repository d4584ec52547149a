/*!

Overload resolution. Given an operator name, one set of possible sorts per argument, and optionally the sort the
result must have, select the signatures of the operator that could apply:

 1. the arity of the signature equals the number of arguments,
 2. if a result sort is expected, the range of the signature is that sort,
 3. each domain sort of the signature is a member of the possible-sort set of its argument.

An empty result is an ordinary answer meaning no overload applies. No inference beyond set membership is performed;
the only polymorphism is in the possible-sort sets the caller supplies, for example an integer literal that may also
be a `double` or, when it is zero, any pointer.

*/

use crate::{
  abstractions::IString,
  api::operator::{OperatorName, Signature},
  core::{
    overload_index::OverloadIndex,
    sort::{SortCollection, SortId, SortSet},
  },
};

/// A signature selected by resolution together with the name it was selected under.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ResolvedOp {
  pub name     : OperatorName,
  pub signature: Signature,
}

/// Whether each domain sort is a member of the corresponding argument's sort set. Assumes equal lengths. A domain
/// sort that does not resolve matches nothing, not even an argument of unknown sort.
pub fn domain_matches(sorts: &SortCollection, domain: &[IString], arg_sorts: &[SortSet]) -> bool {
  domain.iter().zip(arg_sorts).all(|(sort_name, possible)| {
    let sort = sorts.lookup_name(sort_name);
    !sort.is_none() && possible.contains(sort)
  })
}

/// The overloads of `name` applicable to arguments with the given possible sorts, ordered by printed signature.
pub fn ops_with_legal_domain(
  index    : &OverloadIndex,
  sorts    : &SortCollection,
  name     : &OperatorName,
  arg_sorts: &[SortSet],
  expected : Option<SortId>,
) -> Vec<ResolvedOp> {
  let Some(signatures) = index.possible_ops(name) else {
    return Vec::new();
  };

  signatures
      .sorted()
      .into_iter()
      .filter(|signature| signature.arity() == arg_sorts.len())
      .filter(|signature| expected.map_or(true, |q| sorts.lookup_name(&signature.range) == q))
      .filter(|signature| domain_matches(sorts, &signature.domain, arg_sorts))
      .map(|signature| {
        ResolvedOp {
          name     : name.clone(),
          signature: signature.clone(),
        }
      })
      .collect()
}

/// The range sorts of the nullary overloads of an identifier operator.
pub fn nullary_ranges(index: &OverloadIndex, sorts: &SortCollection, name: &OperatorName) -> SortSet {
  match index.lookup_op(name) {
    Some(entry) if entry.name.is_id() => {
      entry
          .signatures
          .iter()
          .filter(|signature| signature.arity() == 0)
          .map(|signature| sorts.lookup_name(&signature.range))
          .collect()
    }
    _ => SortSet::new(),
  }
}

/// Whether an integer literal denotes zero. Accepts decimal, octal, and hexadecimal spellings with C integer
/// suffixes, such as `0`, `00`, `0x0`, and `0UL`.
pub fn is_zero_literal(text: &str) -> bool {
  let digits = text.trim_end_matches(&['u', 'U', 'l', 'L'][..]);
  let digits = digits
      .strip_prefix("0x")
      .or_else(|| digits.strip_prefix("0X"))
      .unwrap_or(digits);
  !digits.is_empty() && digits.chars().all(|c| c == '0')
}
