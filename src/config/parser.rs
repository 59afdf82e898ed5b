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
/// Logged at startup so output files can be tied back to the settings that
/// produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
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
    use crate::config::DelayRange;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let config_content = r#"
[site]
base-url = "https://shop.example.com"
categories-path = "/Categories.aspx"
listing-path = "/Stock.aspx"
user-agent = "TestAgent/1.0"

[fetcher]
timeout-secs = 5
connect-timeout-secs = 2

[listing]
max-pages = 7

[throttle]
min-request-interval-ms = 250
page-delay-ms = { min = 10, max = 20 }
category-delay-ms = { min = 30, max = 40 }
row-delay-ms = { min = 100, max = 300 }

[output]
directory = "./out"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "https://shop.example.com");
        assert_eq!(config.site.user_agent, "TestAgent/1.0");
        assert_eq!(config.fetcher.timeout_secs, 5);
        assert_eq!(config.listing.max_pages, 7);
        assert_eq!(config.throttle.min_request_interval_ms, 250);
        assert_eq!(config.throttle.page_delay_ms, DelayRange::new(10, 20));
        assert_eq!(config.throttle.row_delay_ms, Some(DelayRange::new(100, 300)));
        assert_eq!(config.output.directory, "./out");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = create_temp_config("[listing]\nmax-pages = 5\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.listing.max_pages, 5);
        assert_eq!(config.site.base_url, "https://mantech.co.za");
        assert_eq!(config.throttle.page_delay_ms, DelayRange::new(1000, 2000));
        assert_eq!(config.throttle.row_delay_ms, None);
        assert_eq!(config.output.directory, "data");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvest.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[listing]\nmax-pages = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("[listing]\nmax-pages = 2\n");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_load_config_with_hash() {
        let file1 = create_temp_config("[listing]\nmax-pages = 1\n");
        let file2 = create_temp_config("[listing]\nmax-pages = 2\n");

        let (_, hash1) = load_config_with_hash(file1.path()).unwrap();
        let (_, hash2) = load_config_with_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
