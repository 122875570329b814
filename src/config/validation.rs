use crate::config::types::{Config, CrawlConfig, DedupConfig, FilterConfig, GateConfig, ScopeConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_scope_config(&config.scope)?;
    validate_filter_config(&config.filter)?;
    validate_gate_config(&config.gate)?;
    validate_dedup_config(&config.dedup)?;
    if config.output.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates crawl driver configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.fetch_delay_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "fetch_delay_ms must be >= 100ms, got {}ms",
            config.fetch_delay_ms
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    // Seeds must parse as absolute HTTP(S) URLs
    for seed in &config.seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("seed '{}': {}", seed, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "seed '{}' must use http or https",
                seed
            )));
        }
    }

    Ok(())
}

/// Validates scope configuration
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    if config.allow.is_empty() {
        return Err(ConfigError::Validation(
            "scope.allow must list at least one domain suffix".to_string(),
        ));
    }

    for entry in &config.allow {
        if entry.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "scope.allow entries must have a non-empty suffix".to_string(),
            ));
        }

        if entry.suffix.contains('/') || entry.suffix.contains(':') {
            return Err(ConfigError::Validation(format!(
                "scope suffix '{}' must be a bare domain suffix, not a URL",
                entry.suffix
            )));
        }

        if let Some(prefix) = &entry.path_prefix {
            if !prefix.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "path-prefix '{}' for suffix '{}' must start with '/'",
                    prefix, entry.suffix
                )));
            }
        }
    }

    Ok(())
}

/// Validates filter configuration
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    for ext in &config.blocked_extensions {
        if ext.starts_with('.') || ext.chars().any(|c| c.is_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "blocked extension '{}' must be lowercase without a leading dot",
                ext
            )));
        }
    }

    if config.max_query_length == 0 {
        return Err(ConfigError::Validation(
            "max_query_length must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates gate thresholds
fn validate_gate_config(config: &GateConfig) -> Result<(), ConfigError> {
    if config.max_body_bytes == 0 {
        return Err(ConfigError::Validation(
            "max_body_bytes must be > 0".to_string(),
        ));
    }

    if config.sparse_body_bytes > config.max_body_bytes {
        return Err(ConfigError::Validation(format!(
            "sparse_body_bytes ({}) must not exceed max_body_bytes ({})",
            config.sparse_body_bytes, config.max_body_bytes
        )));
    }

    if config.sparse_word_count < config.min_word_count {
        return Err(ConfigError::Validation(format!(
            "sparse_word_count ({}) must be >= min_word_count ({})",
            config.sparse_word_count, config.min_word_count
        )));
    }

    Ok(())
}

/// Validates dedup configuration
fn validate_dedup_config(config: &DedupConfig) -> Result<(), ConfigError> {
    if !(config.similarity_threshold > 0.0 && config.similarity_threshold <= 1.0) {
        return Err(ConfigError::Validation(format!(
            "similarity_threshold must be in (0, 1], got {}",
            config.similarity_threshold
        )));
    }

    // Shingles are 3 tokens wide, so anything below 3 can never fingerprint
    if config.min_token_count < 3 {
        return Err(ConfigError::Validation(format!(
            "min_token_count must be >= 3, got {}",
            config.min_token_count
        )));
    }

    Ok(())
}
