//! Conversion between flat type references and the nested wrapper encoding.
//!
//! GraphQL introspection expresses `[User!]!` as
//! `NON_NULL(LIST(NON_NULL(User)))`. [`TypeRef`] stores the same fact as a
//! named base type plus three modifier flags.

use crate::wire::TypeRefNode;
use crate::{Result, SchemaError, TypeKind};
use std::fmt;

/// Deepest wrapper chain the codec understands (`[T!]!`).
pub const MAX_WRAPPER_DEPTH: usize = 3;

/// A reference to a named type with its list and nullability modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: String,
    pub kind: TypeKind,
    pub is_list: bool,
    /// Only meaningful when `is_list` is set.
    pub is_list_item_nullable: bool,
    pub is_nullable: bool,
    /// Encodes under an `INPUT_OBJECT` wrapper node instead of list/null wrappers.
    pub is_input_object: bool,
}

impl TypeRef {
    /// `T`
    pub fn named(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_list: false,
            is_list_item_nullable: false,
            is_nullable: true,
            is_input_object: false,
        }
    }

    /// `T!`
    pub fn non_null(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            is_nullable: false,
            ..Self::named(name, kind)
        }
    }

    /// `[T]`
    pub fn list(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            is_list: true,
            is_list_item_nullable: true,
            ..Self::named(name, kind)
        }
    }

    /// `[T]!`
    pub fn non_null_list(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            is_nullable: false,
            ..Self::list(name, kind)
        }
    }

    /// `[T!]`
    pub fn list_of_non_null(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            is_list: true,
            ..Self::named(name, kind)
        }
    }

    /// `[T!]!`
    pub fn non_null_list_of_non_null(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            is_nullable: false,
            ..Self::list_of_non_null(name, kind)
        }
    }

    /// A reference that resolves to an input object type.
    pub fn input_object(name: impl Into<String>) -> Self {
        Self {
            is_input_object: true,
            ..Self::named(name, TypeKind::InputObject)
        }
    }

    /// Encodes the reference as a wrapper chain.
    ///
    /// Wrapping order is item nullability, then list, then outer nullability,
    /// which yields the canonical `NON_NULL(LIST(NON_NULL(T)))` nesting.
    #[must_use]
    pub fn to_wire(&self) -> TypeRefNode {
        let mut node = TypeRefNode::named(self.kind, self.name.clone());

        if self.is_list && !self.is_list_item_nullable {
            node = TypeRefNode::wrap(TypeKind::NonNull, node);
        }
        if self.is_list {
            node = TypeRefNode::wrap(TypeKind::List, node);
        }
        if !self.is_nullable {
            node = TypeRefNode::wrap(TypeKind::NonNull, node);
        }
        if self.is_input_object {
            node = TypeRefNode::wrap(TypeKind::InputObject, node);
        }

        node
    }

    /// Decodes a wrapper chain.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MalformedWireInput`] when the chain is deeper than
    /// [`MAX_WRAPPER_DEPTH`], uses a wrapper combination this model cannot
    /// express (such as nested lists), or ends without a named type.
    pub fn from_wire(node: &TypeRefNode) -> Result<Self> {
        let depth = node.depth();
        if depth > MAX_WRAPPER_DEPTH {
            return Err(SchemaError::MalformedWireInput(format!(
                "type reference nested {depth} levels deep, at most {MAX_WRAPPER_DEPTH} supported"
            )));
        }

        let mut wrappers = Vec::with_capacity(depth);
        let mut base = node;
        while let Some(inner) = base.of_type.as_deref() {
            wrappers.push(base.kind);
            base = inner;
        }

        if base.kind.is_wrapper() {
            return Err(SchemaError::MalformedWireInput(format!(
                "{} wrapper has no inner type",
                base.kind
            )));
        }
        let name = base.name.clone().ok_or_else(|| {
            SchemaError::MalformedWireInput(format!("{} type reference has no name", base.kind))
        })?;
        let kind = base.kind;

        let type_ref = match wrappers.as_slice() {
            [] => Self::named(name, kind),
            [TypeKind::NonNull] => Self::non_null(name, kind),
            [TypeKind::List] => Self::list(name, kind),
            [TypeKind::InputObject] => Self {
                is_input_object: true,
                ..Self::named(name, kind)
            },
            [TypeKind::List, TypeKind::NonNull] => Self::list_of_non_null(name, kind),
            [TypeKind::NonNull, TypeKind::List] => Self::non_null_list(name, kind),
            [TypeKind::NonNull, TypeKind::List, TypeKind::NonNull] => {
                Self::non_null_list_of_non_null(name, kind)
            }
            other => {
                let chain: Vec<&str> = other.iter().copied().map(TypeKind::as_str).collect();
                return Err(SchemaError::MalformedWireInput(format!(
                    "unsupported type wrapper nesting {} around '{name}'",
                    chain.join(" > ")
                )));
            }
        };

        Ok(type_ref)
    }
}

impl TryFrom<&TypeRefNode> for TypeRef {
    type Error = SchemaError;

    fn try_from(node: &TypeRefNode) -> Result<Self> {
        Self::from_wire(node)
    }
}

impl From<&TypeRef> for TypeRefNode {
    fn from(type_ref: &TypeRef) -> Self {
        type_ref.to_wire()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}
