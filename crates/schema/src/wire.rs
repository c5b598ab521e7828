//! Serde mirror of the GraphQL introspection result shape.
//!
//! Only the parts this crate models carry typed values. Descriptions,
//! deprecation data, interfaces, enum values and possible types are never
//! discovered by probing, so they are read leniently and written back as
//! `null`/`false`/`[]` placeholders. Struct fields are declared in key order
//! so serialized documents come out with sorted keys.

use crate::TypeKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Top-level `{"data": {"__schema": ...}}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    pub data: IntrospectionData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    /// Passed through untouched.
    #[serde(default)]
    pub directives: Vec<Value>,
    #[serde(default)]
    pub mutation_type: Option<NamedTypeRef>,
    #[serde(default)]
    pub query_type: Option<NamedTypeRef>,
    #[serde(default)]
    pub subscription_type: Option<NamedTypeRef>,
    pub types: Vec<IntrospectionType>,
}

/// Root operation binding, `{"name": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedTypeRef {
    pub name: String,
}

impl NamedTypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A `__Type` entry of the `types` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionType {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default)]
    pub fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    pub input_fields: Option<Vec<IntrospectionInputValue>>,
    #[serde(default)]
    pub interfaces: Option<Vec<Value>>,
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub possible_types: Option<Vec<Value>>,
}

/// A `__Field` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionField {
    pub args: Vec<IntrospectionInputValue>,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRefNode,
}

/// An `__InputValue` entry, used for arguments and input object members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInputValue {
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRefNode,
}

/// One link of a nested `{kind, name, ofType}` type reference chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRefNode {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRefNode>>,
}

impl TypeRefNode {
    /// A named, unwrapped node.
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    /// A nameless wrapper node around `inner`.
    #[must_use]
    pub fn wrap(kind: TypeKind, inner: Self) -> Self {
        Self {
            kind,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// Number of `ofType` links below this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self;
        while let Some(inner) = node.of_type.as_deref() {
            depth += 1;
            node = inner;
        }
        depth
    }

    /// Renders the reference in SDL notation, e.g. `[String!]!`.
    #[must_use]
    pub fn to_type_string(&self) -> String {
        match (self.kind, self.of_type.as_deref()) {
            (TypeKind::NonNull, Some(inner)) => format!("{}!", inner.to_type_string()),
            (TypeKind::List, Some(inner)) => format!("[{}]", inner.to_type_string()),
            (_, Some(inner)) if self.name.is_none() => inner.to_type_string(),
            _ => self.name.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for TypeRefNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_type_string())
    }
}
