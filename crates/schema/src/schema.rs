//! The schema graph assembled from discovery results.

use crate::wire::{IntrospectionData, IntrospectionResponse, IntrospectionSchema, NamedTypeRef};
use crate::{Result, SchemaError, Type, TypeKind};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};

/// Selection used at the innermost level of a synthesized document.
pub const SELECTION_PLACEHOLDER: &str = "FUZZ";

/// Scalars every freshly created schema starts with.
const SEED_SCALARS: &[&str] = &["String", "ID"];

/// Scalars built into every GraphQL server. They never have fields, so
/// discovery callers usually pass them to [`Schema::undiscovered_type`] as
/// the ignore set.
pub const BUILTIN_SCALARS: &[&str] = &["String", "ID", "Int", "Float", "Boolean"];

/// Which root a synthesized document is issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

/// A GraphQL schema that only ever grows.
///
/// Types are keyed by name and reference each other by name through their
/// fields' [`TypeRef`](crate::TypeRef)s. Root operation types are stored as
/// names as well. Adding a type whose name is already present leaves the
/// existing entry untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    types: IndexMap<String, Type>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
    directives: Vec<Value>,
}

impl Schema {
    /// Creates a schema seeded with the `String` and `ID` scalars and an empty
    /// OBJECT for every root operation type given.
    #[must_use]
    pub fn new(
        query_type: Option<&str>,
        mutation_type: Option<&str>,
        subscription_type: Option<&str>,
    ) -> Self {
        let mut schema = Self {
            query_type: query_type.map(str::to_string),
            mutation_type: mutation_type.map(str::to_string),
            subscription_type: subscription_type.map(str::to_string),
            ..Self::default()
        };

        for scalar in SEED_SCALARS {
            schema.add_type(*scalar, TypeKind::Scalar);
        }
        for root in [query_type, mutation_type, subscription_type]
            .into_iter()
            .flatten()
        {
            schema.add_type(root, TypeKind::Object);
        }

        schema
    }

    /// Rebuilds a schema from a full introspection result.
    ///
    /// Placeholder fields are dropped. When the payload lists a type name more
    /// than once the first entry is kept.
    #[tracing::instrument(skip(response), fields(types = response.data.schema.types.len()))]
    pub fn from_introspection(response: &IntrospectionResponse) -> Result<Self> {
        let wire = &response.data.schema;
        let mut types = IndexMap::with_capacity(wire.types.len());

        for wire_type in &wire.types {
            let ty = Type::from_wire(wire_type)?;
            if types.contains_key(&ty.name) {
                tracing::debug!(name = %ty.name, "Ignoring duplicate type entry");
                continue;
            }
            types.insert(ty.name.clone(), ty);
        }

        tracing::debug!(types = types.len(), "Schema decoded");

        Ok(Self {
            types,
            query_type: wire.query_type.as_ref().map(|t| t.name.clone()),
            mutation_type: wire.mutation_type.as_ref().map(|t| t.name.clone()),
            subscription_type: wire.subscription_type.as_ref().map(|t| t.name.clone()),
            directives: wire.directives.clone(),
        })
    }

    /// Parses and decodes an introspection JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let response: IntrospectionResponse = serde_json::from_str(json)?;
        Self::from_introspection(&response)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let response: IntrospectionResponse = serde_json::from_value(value)?;
        Self::from_introspection(&response)
    }

    /// Encodes the schema without modifying it.
    #[must_use]
    pub fn to_introspection(&self) -> IntrospectionResponse {
        IntrospectionResponse {
            data: IntrospectionData {
                schema: IntrospectionSchema {
                    directives: self.directives.clone(),
                    mutation_type: self.mutation_type.as_deref().map(NamedTypeRef::new),
                    query_type: self.query_type.as_deref().map(NamedTypeRef::new),
                    subscription_type: self.subscription_type.as_deref().map(NamedTypeRef::new),
                    types: self.types.values().map(Type::to_wire).collect(),
                },
            },
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_introspection())?)
    }

    /// Pretty-printed introspection JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_introspection())?)
    }

    /// Appends the placeholder field to every empty field-bearing type.
    ///
    /// Returns how many types were modified.
    pub fn finalize_for_output(&mut self) -> usize {
        self.types
            .values_mut()
            .map(Type::finalize_for_output)
            .filter(|modified| *modified)
            .count()
    }

    /// Adds an empty type unless one with this name already exists.
    ///
    /// `LIST` and `NON_NULL` only wrap references and cannot name a type, so
    /// such calls are ignored.
    pub fn add_type(&mut self, name: impl Into<String>, kind: TypeKind) {
        let name = name.into();
        if kind.is_wrapper() {
            tracing::warn!(%name, %kind, "Ignoring type declared with a wrapper kind");
            return;
        }
        if self.types.contains_key(&name) {
            return;
        }
        tracing::trace!(%name, %kind, "Adding type");
        self.types.insert(name.clone(), Type::new(name, kind));
    }

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    /// Mutable access for appending discovered fields.
    pub fn get_type_mut(&mut self, name: &str) -> Option<&mut Type> {
        self.types.get_mut(name)
    }

    #[must_use]
    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[must_use]
    pub fn query_type(&self) -> Option<&str> {
        self.query_type.as_deref()
    }

    #[must_use]
    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    #[must_use]
    pub fn subscription_type(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    #[must_use]
    pub fn directives(&self) -> &[Value] {
        &self.directives
    }

    /// Configured root type names, in query, mutation, subscription order.
    pub fn root_types(&self) -> impl Iterator<Item = &str> {
        [
            self.query_type.as_deref(),
            self.mutation_type.as_deref(),
            self.subscription_type.as_deref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Which operation a root type name belongs to.
    #[must_use]
    pub fn operation_for_root(&self, name: &str) -> Option<OperationKind> {
        if self.query_type.as_deref() == Some(name) {
            Some(OperationKind::Query)
        } else if self.mutation_type.as_deref() == Some(name) {
            Some(OperationKind::Mutation)
        } else if self.subscription_type.as_deref() == Some(name) {
            Some(OperationKind::Subscription)
        } else {
            None
        }
    }

    /// Finds a selection path from a root operation type down to a field of
    /// type `name`.
    ///
    /// The result starts with the root type name followed by the field names to
    /// select, e.g. `["Query", "user", "posts"]`. The search walks backwards
    /// breadth-first over the "field points to type" edges, so the shortest
    /// path wins and ties resolve in type and field insertion order. Fields of
    /// input objects are not selectable and are not followed.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownType`] if `name` is not in the schema,
    /// [`SchemaError::UnreachableTarget`] if no root leads to it.
    #[tracing::instrument(skip(self))]
    pub fn path_from_root(&self, name: &str) -> Result<Vec<String>> {
        if !self.types.contains_key(name) {
            return Err(SchemaError::UnknownType(name.to_string()));
        }

        // target type -> [(owner type, field name)]
        let mut producers: HashMap<&str, Vec<(&str, &str)>> = HashMap::new();
        for owner in self.types.values() {
            if owner.kind == TypeKind::InputObject {
                continue;
            }
            for field in owner.known_fields() {
                producers
                    .entry(field.type_ref.name.as_str())
                    .or_default()
                    .push((owner.name.as_str(), field.name.as_str()));
            }
        }

        // owner type -> (field name, type it leads to), one step closer to `name`
        let mut next_hop: HashMap<&str, (&str, &str)> = HashMap::new();
        let mut visited: HashSet<&str> = HashSet::from([name]);
        let mut queue: VecDeque<&str> = VecDeque::from([name]);

        while let Some(current) = queue.pop_front() {
            if self.operation_for_root(current).is_some() {
                let mut path = vec![current.to_string()];
                let mut cursor = current;
                while cursor != name {
                    let (field, target) = next_hop[cursor];
                    path.push(field.to_string());
                    cursor = target;
                }
                tracing::debug!(?path, "Found path from root");
                return Ok(path);
            }

            for &(owner, field) in producers.get(current).into_iter().flatten() {
                if visited.insert(owner) {
                    tracing::trace!(owner, field, current, "Following producing field");
                    next_hop.insert(owner, (field, current));
                    queue.push_back(owner);
                }
            }
        }

        tracing::debug!(visited = visited.len(), "No root reaches target");
        Err(SchemaError::UnreachableTarget(name.to_string()))
    }

    /// Turns a path from [`Self::path_from_root`] into an operation document.
    ///
    /// `["Query", "a", "b"]` becomes `query { a { b { FUZZ } } }`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnrecognizedOperationRoot`] if the path is empty or its
    /// first element is not a configured root type.
    pub fn path_to_document(&self, path: &[String]) -> Result<String> {
        let (root, fields) = path
            .split_first()
            .ok_or_else(|| SchemaError::UnrecognizedOperationRoot(String::new()))?;

        let operation = self
            .operation_for_root(root)
            .ok_or_else(|| SchemaError::UnrecognizedOperationRoot(root.clone()))?;

        let selection = fields
            .iter()
            .rev()
            .fold(SELECTION_PLACEHOLDER.to_string(), |inner, field| {
                format!("{field} {{ {inner} }}")
            });

        Ok(format!("{} {{ {selection} }}", operation.keyword()))
    }

    /// Path search followed by document synthesis.
    pub fn document_for_type(&self, name: &str) -> Result<String> {
        let path = self.path_from_root(name)?;
        self.path_to_document(&path)
    }

    /// Name of some type that still has no known fields.
    ///
    /// Every kind except INPUT_OBJECT is a candidate, so scalars, enums and
    /// unions are returned too unless named in `ignore` (see
    /// [`BUILTIN_SCALARS`]). A placeholder does not count as a field.
    /// Candidates are visited in insertion order.
    #[must_use]
    pub fn undiscovered_type(&self, ignore: &HashSet<String>) -> Option<&str> {
        self.types
            .values()
            .filter(|t| t.kind != TypeKind::InputObject)
            .filter(|t| !ignore.contains(&t.name))
            .find(|t| !t.has_known_fields())
            .map(|t| t.name.as_str())
    }
}
