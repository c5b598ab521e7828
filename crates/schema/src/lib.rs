//! In-memory GraphQL schema graph for schemas reconstructed without
//! introspection.
//!
//! Discovery code grows a [`Schema`] one fact at a time: it adds [`Type`]s
//! with [`Schema::add_type`] and appends [`Field`]s to them as probing
//! reveals them. At any point the schema can synthesize a document that
//! reaches a given type, or be written out in the standard introspection
//! JSON format.
//!
//! # Examples
//!
//! ```
//! use graphql_recon_schema::{Field, Schema, TypeKind, TypeRef};
//!
//! let mut schema = Schema::new(Some("Query"), None, None);
//! schema.add_type("User", TypeKind::Object);
//! schema
//!     .get_type_mut("Query")
//!     .unwrap()
//!     .fields
//!     .push(Field::new("viewer", TypeRef::named("User", TypeKind::Object)));
//!
//! let path = schema.path_from_root("User")?;
//! assert_eq!(path, vec!["Query", "viewer"]);
//! assert_eq!(schema.path_to_document(&path)?, "query { viewer { FUZZ } }");
//! # Ok::<(), graphql_recon_schema::SchemaError>(())
//! ```

mod error;
mod field;
mod kind;
mod named_type;
mod schema;
mod type_ref;
pub mod wire;

pub use error::{Result, SchemaError};
pub use field::{Field, InputValue, PLACEHOLDER_FIELD};
pub use kind::TypeKind;
pub use named_type::Type;
pub use schema::{OperationKind, Schema, BUILTIN_SCALARS, SELECTION_PLACEHOLDER};
pub use type_ref::{TypeRef, MAX_WRAPPER_DEPTH};
pub use wire::{IntrospectionResponse, TypeRefNode};
