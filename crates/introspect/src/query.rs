//! Introspection query matching the modeled subset of the schema.

/// Introspection query for servers that still allow it.
///
/// Only the parts the schema model keeps are selected. Type references
/// are followed four levels deep, one past the deepest wrapper chain the
/// codec accepts, so over-deep references are reported instead of being
/// silently truncated.
pub const INTROSPECTION_QUERY: &str = r"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      kind
      name
      fields(includeDeprecated: true) {
        name
        args { ...InputValue }
        type { ...TypeRef }
      }
      inputFields { ...InputValue }
    }
    directives {
      name
      locations
      args { ...InputValue }
    }
  }
}

fragment InputValue on __InputValue {
  name
  type { ...TypeRef }
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
        }
      }
    }
  }
}
";
