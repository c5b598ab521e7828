//! HTTP transport for reconstructing GraphQL schemas.
//!
//! The discovery process sends probe documents to the target endpoint and
//! reads back the server's answers, including the error messages of
//! rejected queries. When the server still allows introspection, the whole
//! schema can be fetched in one request instead.
//!
//! # Examples
//!
//! ## Probing a synthesized document
//!
//! ```no_run
//! use graphql_recon_introspect::ProbeClient;
//! use graphql_recon_schema::Schema;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = Schema::new(Some("Query"), None, None);
//!     let document = schema.document_for_type("Query")?;
//!
//!     let client = ProbeClient::new().with_header("Authorization", "Bearer my-token");
//!     let response = client.probe("https://api.example.com/graphql", &document).await?;
//!     println!("{}", response.body);
//!     Ok(())
//! }
//! ```
//!
//! ## Fetching over introspection
//!
//! ```no_run
//! use graphql_recon_introspect::ProbeClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = ProbeClient::new()
//!         .fetch_schema("https://api.example.com/graphql")
//!         .await?;
//!     println!("{}", schema.to_json_string()?);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod query;
mod request;

pub use client::ProbeClient;
pub use error::{Result, TransportError};
pub use query::INTROSPECTION_QUERY;
pub use request::{ProbeResponse, RequestBody};
pub use reqwest::Method;
