//! Schema file commands.

use super::{read_schema, write_output};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use graphql_recon_schema::{Field, Schema, SchemaError, TypeKind, TypeRef, BUILTIN_SCALARS};
use std::collections::HashSet;
use std::path::PathBuf;

/// Schema subcommands.
#[derive(Subcommand)]
pub enum SchemaCommands {
    /// Create a fresh schema seeded with the given root operation types
    Init {
        /// Name of the query root type
        #[arg(long, default_value = "Query")]
        query_type: String,

        /// Name of the mutation root type
        #[arg(long)]
        mutation_type: Option<String>,

        /// Name of the subscription root type
        #[arg(long)]
        subscription_type: Option<String>,

        /// Output file path (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the selection path from a root type to TYPE and the matching document
    Path {
        /// Target type name
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Schema file in introspection JSON format
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,
    },

    /// Print the next type that has no known fields yet
    Next {
        /// Schema file in introspection JSON format
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,

        /// Type names to skip besides the built-in scalars (comma-separated)
        #[arg(long, value_delimiter = ',')]
        ignore: Vec<String>,
    },

    /// Add a type to a schema file unless it already exists
    AddType {
        /// Type name
        name: String,

        /// Type kind, e.g. OBJECT or INPUT_OBJECT
        #[arg(long, default_value = "OBJECT", value_parser = parse_kind)]
        kind: TypeKind,

        /// Schema file in introspection JSON format (updated in place)
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,
    },

    /// Append a field to a type in a schema file
    AddField {
        /// Type that owns the field
        owner: String,

        /// Field name
        name: String,

        /// Field type in SDL notation, e.g. "[User!]!"
        #[arg(long = "type", value_name = "TYPE")]
        type_ref: String,

        /// Kind of the field's named type
        #[arg(long, default_value = "SCALAR", value_parser = parse_kind)]
        kind: TypeKind,

        /// Schema file in introspection JSON format (updated in place)
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,
    },

    /// Decode a schema file and write it back in canonical form
    Normalize {
        /// Schema file in introspection JSON format
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,

        /// Output file path (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run a schema subcommand.
pub fn run(command: SchemaCommands) -> Result<()> {
    match command {
        SchemaCommands::Init {
            query_type,
            mutation_type,
            subscription_type,
            output,
        } => {
            let mut schema = Schema::new(
                Some(&query_type),
                mutation_type.as_deref(),
                subscription_type.as_deref(),
            );
            schema.finalize_for_output();
            write_output(&schema.to_json_string()?, output.as_ref())
        }
        SchemaCommands::Path { type_name, schema } => run_path(&type_name, &read_schema(&schema)?),
        SchemaCommands::Next { schema, ignore } => {
            let schema = read_schema(&schema)?;
            let ignore: HashSet<String> = BUILTIN_SCALARS
                .iter()
                .map(|s| (*s).to_string())
                .chain(ignore)
                .collect();
            match schema.undiscovered_type(&ignore) {
                Some(name) => println!("{name}"),
                None => eprintln!("{} Every type has known fields", "✓".green()),
            }
            Ok(())
        }
        SchemaCommands::AddType { name, kind, schema } => {
            let mut doc = read_schema(&schema)?;
            if doc.contains_type(&name) {
                eprintln!("{} Type {} already present", "•".dimmed(), name.cyan());
            }
            doc.add_type(name, kind);
            write_output(&doc.to_json_string()?, Some(&schema))
        }
        SchemaCommands::AddField {
            owner,
            name,
            type_ref,
            kind,
            schema,
        } => {
            let mut doc = read_schema(&schema)?;
            let type_ref = parse_type_ref(&type_ref, kind)?;
            let ty = doc
                .get_type_mut(&owner)
                .ok_or_else(|| SchemaError::UnknownType(owner.clone()))?;
            if !ty.kind.has_fields() {
                anyhow::bail!("{} type '{owner}' cannot have fields", ty.kind);
            }
            if ty.field(&name).is_some() {
                anyhow::bail!("Type '{owner}' already has a field named '{name}'");
            }
            ty.fields.retain(|f| !f.is_placeholder());
            ty.fields.push(Field::new(name, type_ref));
            write_output(&doc.to_json_string()?, Some(&schema))
        }
        SchemaCommands::Normalize { schema, output } => {
            let mut doc = read_schema(&schema)?;
            doc.finalize_for_output();
            write_output(&doc.to_json_string()?, output.as_ref())
        }
    }
}

fn run_path(type_name: &str, schema: &Schema) -> Result<()> {
    let path = schema
        .path_from_root(type_name)
        .with_context(|| format!("Cannot reach type '{type_name}'"))?;
    let document = schema.path_to_document(&path)?;

    println!("{} {}", "Path:".bold(), path.join(" → ").cyan());
    println!("{} {document}", "Document:".bold());
    Ok(())
}

fn parse_kind(value: &str) -> std::result::Result<TypeKind, String> {
    let kind: TypeKind = value
        .to_ascii_uppercase()
        .parse()
        .map_err(|e: SchemaError| e.to_string())?;
    if kind.is_wrapper() {
        return Err(format!("{kind} wraps type references and cannot name a type"));
    }
    Ok(kind)
}

/// Parses SDL type notation such as `String`, `[ID!]` or `[User!]!`.
fn parse_type_ref(notation: &str, kind: TypeKind) -> Result<TypeRef> {
    let notation = notation.trim();
    let (inner, non_null) = match notation.strip_suffix('!') {
        Some(inner) => (inner, true),
        None => (notation, false),
    };

    let Some(item) = inner.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
        let name = valid_name(inner, notation)?;
        return Ok(if non_null {
            TypeRef::non_null(name, kind)
        } else {
            TypeRef::named(name, kind)
        });
    };

    let (item, item_non_null) = match item.trim().strip_suffix('!') {
        Some(item) => (item, true),
        None => (item.trim(), false),
    };
    let name = valid_name(item, notation)?;

    Ok(match (item_non_null, non_null) {
        (false, false) => TypeRef::list(name, kind),
        (false, true) => TypeRef::non_null_list(name, kind),
        (true, false) => TypeRef::list_of_non_null(name, kind),
        (true, true) => TypeRef::non_null_list_of_non_null(name, kind),
    })
}

fn valid_name<'a>(name: &'a str, notation: &str) -> Result<&'a str> {
    let name = name.trim();
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());
    if !valid {
        anyhow::bail!("Unsupported type notation '{notation}'");
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_ref_shapes() {
        let kind = TypeKind::Scalar;
        assert_eq!(
            parse_type_ref("String", kind).unwrap(),
            TypeRef::named("String", kind)
        );
        assert_eq!(
            parse_type_ref("ID!", kind).unwrap(),
            TypeRef::non_null("ID", kind)
        );
        assert_eq!(
            parse_type_ref("[Int]", kind).unwrap(),
            TypeRef::list("Int", kind)
        );
        assert_eq!(
            parse_type_ref("[Int]!", kind).unwrap(),
            TypeRef::non_null_list("Int", kind)
        );
        assert_eq!(
            parse_type_ref("[Int!]", kind).unwrap(),
            TypeRef::list_of_non_null("Int", kind)
        );
        assert_eq!(
            parse_type_ref(" [Int!]! ", kind).unwrap(),
            TypeRef::non_null_list_of_non_null("Int", kind)
        );
    }

    #[test]
    fn test_parse_type_ref_rejects_nested_lists() {
        assert!(parse_type_ref("[[Int]]", TypeKind::Scalar).is_err());
        assert!(parse_type_ref("", TypeKind::Scalar).is_err());
        assert!(parse_type_ref("Int!!", TypeKind::Scalar).is_err());
    }

    #[test]
    fn test_parse_kind_is_case_insensitive() {
        assert_eq!(parse_kind("input_object"), Ok(TypeKind::InputObject));
        assert!(parse_kind("tuple").is_err());
    }

    #[test]
    fn test_parse_kind_rejects_wrappers() {
        assert!(parse_kind("LIST").is_err());
        assert!(parse_kind("non_null").is_err());
    }

    #[test]
    fn test_add_commands_update_schema_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schema.json");

        run(SchemaCommands::Init {
            query_type: "Query".to_string(),
            mutation_type: None,
            subscription_type: None,
            output: Some(path.clone()),
        })
        .unwrap();
        run(SchemaCommands::AddType {
            name: "User".to_string(),
            kind: TypeKind::Object,
            schema: path.clone(),
        })
        .unwrap();
        run(SchemaCommands::AddField {
            owner: "Query".to_string(),
            name: "users".to_string(),
            type_ref: "[User!]!".to_string(),
            kind: TypeKind::Object,
            schema: path.clone(),
        })
        .unwrap();

        let schema = read_schema(&path).unwrap();
        assert_eq!(
            schema.get_type("Query").unwrap().fields,
            vec![Field::new(
                "users",
                TypeRef::non_null_list_of_non_null("User", TypeKind::Object)
            )]
        );
        assert_eq!(
            schema.document_for_type("User").unwrap(),
            "query { users { FUZZ } }"
        );
    }

    #[test]
    fn test_add_field_to_unknown_type_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schema.json");
        std::fs::write(
            &path,
            Schema::new(Some("Query"), None, None).to_json_string().unwrap(),
        )
        .unwrap();

        let result = run(SchemaCommands::AddField {
            owner: "Missing".to_string(),
            name: "id".to_string(),
            type_ref: "ID".to_string(),
            kind: TypeKind::Scalar,
            schema: path,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_add_field_to_scalar_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schema.json");
        let original = Schema::new(Some("Query"), None, None).to_json_string().unwrap();
        std::fs::write(&path, &original).unwrap();

        let result = run(SchemaCommands::AddField {
            owner: "String".to_string(),
            name: "length".to_string(),
            type_ref: "Int".to_string(),
            kind: TypeKind::Scalar,
            schema: path.clone(),
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}
