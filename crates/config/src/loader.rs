use crate::{ConfigError, ReconConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".graphql-recon.yml",
    ".graphql-recon.yaml",
    ".graphql-recon.json",
    "graphql-recon.toml",
];

/// Find a config file by walking up the directory tree from `start_dir`.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path, picking the format by extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<ReconConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        url = %config.url,
        bucket_size = config.bucket_size,
        headers = config.headers.len(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<ReconConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "toml" => parse_toml(contents, path)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    if let Some(message) = config.problem() {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        });
    }

    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<ReconConfig> {
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<ReconConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

fn parse_toml(contents: &str, path: &Path) -> Result<ReconConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let file = write_temp(
            ".yml",
            r"
url: https://api.example.com/graphql
bucketSize: 512
headers:
  Authorization: Bearer token
",
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.url, "https://api.example.com/graphql");
        assert_eq!(config.bucket_size, 512);
        assert_eq!(
            config.headers.get("Authorization"),
            Some(&"Bearer token".to_string())
        );
    }

    #[test]
    fn test_load_json_with_defaults() {
        let file = write_temp(".json", r#"{"url": "http://localhost:4000/graphql"}"#);

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.bucket_size, crate::DEFAULT_BUCKET_SIZE);
        assert_eq!(config.retry, None);
    }

    #[test]
    fn test_load_toml() {
        let file = write_temp(
            ".toml",
            r#"
url = "https://api.example.com/graphql"
timeout = 60
retry = 3

[headers]
X-Api-Key = "secret"
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.timeout, Some(60));
        assert_eq!(config.retry, Some(3));
        assert_eq!(config.headers.len(), 1);
    }

    #[test]
    fn test_validation_rejects_zero_bucket() {
        let file = write_temp(".yml", "url: https://api.example.com/graphql\nbucketSize: 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation_rejects_missing_url() {
        let file = write_temp(".json", r#"{"bucketSize": 10}"#);
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_unsupported_format() {
        let file = write_temp(".ini", "url=https://api.example.com/graphql");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".graphql-recon.yml");
        fs::write(&config_path, "url: https://api.example.com/graphql").unwrap();

        let found = find_config(temp_dir.path()).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("graphql-recon.toml");
        fs::write(&config_path, "url = \"https://api.example.com/graphql\"").unwrap();

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let found = find_config(&sub_dir).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(".graphql-recon.yml"),
            "url: https://yml.example.com/graphql",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join(".graphql-recon.json"),
            r#"{"url": "https://json.example.com/graphql"}"#,
        )
        .unwrap();

        let found = find_config(temp_dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), ".graphql-recon.yml");
    }
}
