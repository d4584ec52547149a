/*!

Tags are the names following `struct`, `union`, and `enum`. Tags live in their own namespace, independent of lexical
scope. A forward declaration (`struct node;`) enters a placeholder that a later definition replaces.

*/

use std::fmt::{Display, Formatter};

use crate::{
  abstractions::IString,
  api::token::Token,
};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TagKind {
  Struct,
  Union,
  Enum,
  ForwardStruct,
  ForwardUnion,
}

impl TagKind {
  /// The keyword that introduces the tag. Forward declarations share the keyword of their definition.
  pub fn keyword(self) -> &'static str {
    match self {
      TagKind::Struct | TagKind::ForwardStruct => "struct",
      TagKind::Union  | TagKind::ForwardUnion  => "union",
      TagKind::Enum                            => "enum",
    }
  }

  pub fn from_keyword(keyword: &str) -> Option<TagKind> {
    match keyword {
      "struct" => Some(TagKind::Struct),
      "union"  => Some(TagKind::Union),
      "enum"   => Some(TagKind::Enum),
      _        => None,
    }
  }

  #[inline(always)]
  pub fn is_forward(self) -> bool {
    matches!(self, TagKind::ForwardStruct | TagKind::ForwardUnion)
  }

  /// Whether a tag of kind `self` may be redefined as `other` without complaint.
  #[inline(always)]
  pub fn compatible_with(self, other: TagKind) -> bool {
    self.keyword() == other.keyword()
  }
}

impl Display for TagKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.keyword())
  }
}

/// A member of a struct or union.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TagField {
  pub name: IString,
  pub sort: IString,
}

#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub enum TagContent {
  /// Forward declarations and imported placeholders.
  #[default]
  None,
  Fields(Vec<TagField>),
  Members(Vec<IString>),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TagInfo {
  pub id      : Token,
  pub kind    : TagKind,
  pub content : TagContent,
  /// Set by the table when the tag is entered during an import. Imported entries may be replaced by a later
  /// non-forced entry.
  pub imported: bool,
}

impl TagInfo {
  pub fn new(id: Token, kind: TagKind, content: TagContent) -> Self {
    TagInfo {
      id,
      kind,
      content,
      imported: false,
    }
  }

  pub fn forward(id: Token, kind: TagKind) -> Self {
    let kind = match kind {
      TagKind::Struct => TagKind::ForwardStruct,
      TagKind::Union  => TagKind::ForwardUnion,
      other           => other,
    };
    TagInfo::new(id, kind, TagContent::None)
  }

  #[inline(always)]
  pub fn name(&self) -> &IString {
    &self.id.text
  }
}
