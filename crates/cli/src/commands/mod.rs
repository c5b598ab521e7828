pub mod probe;
pub mod schema;

use anyhow::{Context, Result};
use graphql_recon_schema::Schema;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reads and decodes a schema file in introspection JSON format.
pub fn read_schema(path: &Path) -> Result<Schema> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Schema::from_json_str(&contents)
        .with_context(|| format!("Failed to decode schema from {}", path.display()))
}

/// Writes `content` to `output`, or to stdout when no path is given.
pub fn write_output(content: &str, output: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        handle.write_all(b"\n").ok();
    }
    Ok(())
}
