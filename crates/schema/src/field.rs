use crate::wire::{IntrospectionField, IntrospectionInputValue};
use crate::{Result, TypeKind, TypeRef};

/// Name of the placeholder member injected into otherwise empty types.
pub const PLACEHOLDER_FIELD: &str = "dummy";

/// A named, typed member of an OBJECT, INTERFACE or INPUT_OBJECT type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub type_ref: TypeRef,
    pub args: Vec<InputValue>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<InputValue>) -> Self {
        self.args = args;
        self
    }

    /// The `dummy: String` placeholder.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(
            PLACEHOLDER_FIELD,
            TypeRef::named("String", TypeKind::Scalar),
        )
    }

    /// Whether this is the placeholder rather than discovered schema data.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_FIELD
    }

    #[must_use]
    pub fn to_wire(&self) -> IntrospectionField {
        IntrospectionField {
            args: self.args.iter().map(InputValue::to_wire).collect(),
            deprecation_reason: None,
            description: None,
            is_deprecated: false,
            name: self.name.clone(),
            type_ref: self.type_ref.to_wire(),
        }
    }

    /// Input object members are written in the `__InputValue` shape.
    #[must_use]
    pub fn to_input_wire(&self) -> IntrospectionInputValue {
        IntrospectionInputValue {
            default_value: None,
            description: None,
            name: self.name.clone(),
            type_ref: self.type_ref.to_wire(),
        }
    }

    pub fn from_wire(wire: &IntrospectionField) -> Result<Self> {
        let args = wire
            .args
            .iter()
            .map(InputValue::from_wire)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: wire.name.clone(),
            type_ref: TypeRef::from_wire(&wire.type_ref)?,
            args,
        })
    }

    pub fn from_input_wire(wire: &IntrospectionInputValue) -> Result<Self> {
        Ok(Self::new(
            wire.name.clone(),
            TypeRef::from_wire(&wire.type_ref)?,
        ))
    }
}

/// A named, typed argument. Default values are not modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValue {
    pub name: String,
    pub type_ref: TypeRef,
}

impl InputValue {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }

    #[must_use]
    pub fn to_wire(&self) -> IntrospectionInputValue {
        IntrospectionInputValue {
            default_value: None,
            description: None,
            name: self.name.clone(),
            type_ref: self.type_ref.to_wire(),
        }
    }

    pub fn from_wire(wire: &IntrospectionInputValue) -> Result<Self> {
        Ok(Self::new(
            wire.name.clone(),
            TypeRef::from_wire(&wire.type_ref)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_wire_shape() {
        let field = Field::new("user", TypeRef::named("User", TypeKind::Object)).with_args(vec![
            InputValue::new("id", TypeRef::non_null("ID", TypeKind::Scalar)),
        ]);

        let value = serde_json::to_value(field.to_wire()).unwrap();
        assert_eq!(value["name"], "user");
        assert_eq!(value["isDeprecated"], false);
        assert_eq!(value["description"], json!(null));
        assert_eq!(value["deprecationReason"], json!(null));
        assert_eq!(value["args"][0]["name"], "id");
        assert_eq!(value["args"][0]["defaultValue"], json!(null));
        assert_eq!(value["args"][0]["type"]["kind"], "NON_NULL");
    }

    #[test]
    fn test_field_from_wire_decodes_args() {
        let wire: IntrospectionField = serde_json::from_value(json!({
            "name": "users",
            "args": [{
                "name": "first",
                "type": {"kind": "SCALAR", "name": "Int", "ofType": null}
            }],
            "type": {
                "kind": "LIST",
                "name": null,
                "ofType": {"kind": "OBJECT", "name": "User", "ofType": null}
            }
        }))
        .unwrap();

        let field = Field::from_wire(&wire).unwrap();
        assert_eq!(field.name, "users");
        assert_eq!(field.type_ref, TypeRef::list("User", TypeKind::Object));
        assert_eq!(
            field.args,
            vec![InputValue::new("first", TypeRef::named("Int", TypeKind::Scalar))]
        );
    }

    #[test]
    fn test_field_from_wire_propagates_bad_arg_type() {
        let wire: IntrospectionField = serde_json::from_value(json!({
            "name": "users",
            "args": [{
                "name": "ids",
                "type": {"kind": "LIST", "ofType": {"kind": "LIST", "ofType": {"kind": "SCALAR", "name": "ID"}}}
            }],
            "type": {"kind": "OBJECT", "name": "User"}
        }))
        .unwrap();

        assert!(Field::from_wire(&wire).is_err());
    }

    #[test]
    fn test_placeholder() {
        let dummy = Field::placeholder();
        assert!(dummy.is_placeholder());
        assert_eq!(dummy.type_ref.name, "String");
        assert!(!Field::new("name", dummy.type_ref).is_placeholder());
    }
}
