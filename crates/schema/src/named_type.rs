use crate::wire::{IntrospectionField, IntrospectionInputValue, IntrospectionType};
use crate::{Field, Result, SchemaError, TypeKind};

/// A named schema type and the members discovered for it so far.
///
/// For OBJECT and INTERFACE types `fields` holds output fields, for
/// INPUT_OBJECT types it holds input fields, and for every other kind it
/// stays empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub name: String,
    pub kind: TypeKind,
    pub fields: Vec<Field>,
}

impl Type {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Discovered fields, skipping any placeholder.
    pub fn known_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_placeholder())
    }

    #[must_use]
    pub fn has_known_fields(&self) -> bool {
        self.known_fields().next().is_some()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.known_fields().find(|f| f.name == name)
    }

    /// Appends the placeholder field to an empty field-bearing type.
    ///
    /// Returns `true` if the type was modified. Calling this again on the
    /// same type is a no-op.
    pub fn finalize_for_output(&mut self) -> bool {
        if self.kind.has_fields() && self.fields.is_empty() {
            self.fields.push(Field::placeholder());
            true
        } else {
            false
        }
    }

    /// Builds the introspection entry for this type without modifying it.
    ///
    /// Empty field-bearing types get a placeholder in the emitted list only,
    /// since the introspection format requires a non-null member list for them.
    #[must_use]
    pub fn to_wire(&self) -> IntrospectionType {
        let placeholder;
        let fields: &[Field] = if self.fields.is_empty() && self.kind.has_fields() {
            placeholder = [Field::placeholder()];
            &placeholder
        } else {
            &self.fields
        };

        let (output_fields, input_fields): (
            Option<Vec<IntrospectionField>>,
            Option<Vec<IntrospectionInputValue>>,
        ) = match self.kind {
            TypeKind::Object | TypeKind::Interface => {
                (Some(fields.iter().map(Field::to_wire).collect()), None)
            }
            TypeKind::InputObject => (None, Some(fields.iter().map(Field::to_input_wire).collect())),
            _ => (None, None),
        };

        IntrospectionType {
            description: None,
            enum_values: None,
            fields: output_fields,
            input_fields,
            interfaces: Some(Vec::new()),
            kind: self.kind,
            name: self.name.clone(),
            possible_types: None,
        }
    }

    /// Rebuilds a type from its introspection entry, dropping placeholders.
    ///
    /// # Errors
    ///
    /// Fails with [`SchemaError::MalformedWireInput`] when a field-bearing
    /// kind lacks its member list or a member's type reference is malformed.
    pub fn from_wire(wire: &IntrospectionType) -> Result<Self> {
        let missing = |key: &str| {
            SchemaError::MalformedWireInput(format!(
                "{} type '{}' has no '{key}' list",
                wire.kind, wire.name
            ))
        };

        let fields = match wire.kind {
            TypeKind::Object | TypeKind::Interface => wire
                .fields
                .as_ref()
                .ok_or_else(|| missing("fields"))?
                .iter()
                .filter(|f| f.name != crate::PLACEHOLDER_FIELD)
                .map(Field::from_wire)
                .collect::<Result<Vec<_>>>()?,
            TypeKind::InputObject => wire
                .input_fields
                .as_ref()
                .ok_or_else(|| missing("inputFields"))?
                .iter()
                .filter(|f| f.name != crate::PLACEHOLDER_FIELD)
                .map(Field::from_input_wire)
                .collect::<Result<Vec<_>>>()?,
            TypeKind::Scalar | TypeKind::Union | TypeKind::Enum => Vec::new(),
            TypeKind::List | TypeKind::NonNull => {
                return Err(SchemaError::MalformedWireInput(format!(
                    "type '{}' declared with wrapper kind {}",
                    wire.name, wire.kind
                )));
            }
        };

        Ok(Self {
            name: wire.name.clone(),
            kind: wire.kind,
            fields,
        })
    }
}
