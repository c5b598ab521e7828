//! Commands that talk to the target endpoint.

use super::{read_schema, write_output};
use crate::settings::client_for;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_recon_config::ReconConfig;
use std::path::PathBuf;

/// Sends one probe document and prints the status line and body.
///
/// The document is taken from `document` when given, otherwise it is
/// synthesized from `schema` so that its selection reaches `type_name`.
pub async fn run_probe(
    config: &ReconConfig,
    type_name: Option<String>,
    schema: Option<PathBuf>,
    document: Option<String>,
) -> Result<()> {
    let document = probe_document(type_name, schema, document)?;
    tracing::debug!(url = %config.url, %document, "Sending probe");

    let response = client_for(config)
        .probe(&config.url, &document)
        .await
        .with_context(|| format!("Probe to {} failed", config.url))?;

    let status = response.status.to_string();
    let status = if response.is_success() {
        status.green()
    } else {
        status.yellow()
    };
    eprintln!("{} {} {status}", "→".dimmed(), document.cyan());

    match response.json() {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(_) => println!("{}", response.body),
    }
    Ok(())
}

/// Downloads the schema through introspection and writes it out.
pub async fn run_fetch(config: &ReconConfig, output: Option<PathBuf>) -> Result<()> {
    eprintln!("Fetching schema from {}...", config.url.cyan());

    let mut schema = client_for(config)
        .fetch_schema(&config.url)
        .await
        .with_context(|| format!("Failed to introspect {}", config.url))?;
    schema.finalize_for_output();

    write_output(&schema.to_json_string()?, output.as_ref())?;
    if let Some(path) = &output {
        eprintln!(
            "{} Wrote {} types to {}",
            "✓".green(),
            schema.len(),
            path.display()
        );
    }
    Ok(())
}

fn probe_document(
    type_name: Option<String>,
    schema: Option<PathBuf>,
    document: Option<String>,
) -> Result<String> {
    if let Some(document) = document {
        return Ok(document);
    }

    let Some(type_name) = type_name else {
        anyhow::bail!("Pass either a TYPE or --document");
    };
    let Some(schema) = schema else {
        anyhow::bail!("A --schema file is required to reach type '{type_name}'");
    };

    let schema = read_schema(&schema)?;
    schema
        .document_for_type(&type_name)
        .with_context(|| format!("Cannot build a document reaching '{type_name}'"))
}
