use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a report can be traced back to the exact filter and
/// threshold settings that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_minimal_config() {
        let config_content = r#"
[crawl]
seeds = ["https://ics.uci.edu/"]
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.seeds.len(), 1);
        // Defaults fill in everything else
        assert_eq!(config.gate.max_body_bytes, 1_000_000);
        assert_eq!(config.dedup.similarity_threshold, 0.85);
        assert_eq!(config.scope.allow.len(), 5);
    }

    #[test]
    fn test_load_full_config() {
        let config_content = r#"
[crawl]
seeds = ["https://ics.uci.edu/"]
max-concurrent-fetches = 8
fetch-delay-ms = 250
max-pages = 500

[[scope.allow]]
suffix = "example.edu"

[[scope.allow]]
suffix = "news.example.edu"
path-prefix = "/tech/"

[filter]
blocked-extensions = ["pdf", "zip"]
blocked-query-params = ["ical"]
max-query-length = 80

[gate]
max-body-bytes = 2000000
min-word-count = 50
sparse-word-count = 200
sparse-body-bytes = 400000

[dedup]
similarity-threshold = 0.9
min-token-count = 12

[stats]
domain-suffix = "example.edu"

[output]
report-path = "./out/report.txt"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.max_concurrent_fetches, 8);
        assert_eq!(config.scope.allow.len(), 2);
        assert_eq!(
            config.scope.allow[1].path_prefix.as_deref(),
            Some("/tech/")
        );
        assert_eq!(config.filter.max_query_length, 80);
        assert_eq!(config.dedup.similarity_threshold, 0.9);
        assert_eq!(config.stats.domain_suffix, "example.edu");
        assert_eq!(config.output.report_path, "./out/report.txt");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawl]
seeds = ["https://ics.uci.edu/"]

[dedup]
similarity-threshold = 1.5
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let config_content = "test content";
        let file = create_temp_config(config_content);

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        // Same content should produce same hash
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 produces 64 hex characters
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
