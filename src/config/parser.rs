use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
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
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitewalk::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Connections: {}", config.crawler.connections);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
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
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
start = "https://example.com/"
connections = 10
wait-time = "100ms"
max-depth = 3
include = ["/docs"]
exclude = ["/private"]
respect-nofollow = true

[user-agent]
full = "Mozilla/5.0 (compatible; sitewalk/0.1)"
robots = "sitewalk"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.start, "https://example.com/");
        assert_eq!(config.crawler.connections, 10);
        assert_eq!(config.crawler.max_depth, 3);
        assert_eq!(config.crawler.include, vec!["/docs".to_string()]);
        assert!(config.crawler.respect_nofollow);
        assert_eq!(config.user_agent.robots, "sitewalk");
    }

    #[test]
    fn test_load_config_defaults() {
        let config_content = r#"
[crawler]
start = "https://example.com/"

[user-agent]
full = "sitewalk/0.1"
robots = "sitewalk"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.connections, 20);
        assert_eq!(config.crawler.max_depth, -1);
        assert_eq!(config.crawler.wait_time, "");
        assert!(config.crawler.include.is_empty());
        assert!(!config.crawler.respect_nofollow);
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
[crawler]
start = "https://example.com/"
connections = 0

[user-agent]
full = "sitewalk/0.1"
robots = "sitewalk"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_malformed_wait_time_is_not_an_error() {
        // A bad wait-time degrades to zero delay instead of failing the load.
        let config_content = r#"
[crawler]
start = "https://example.com/"
wait-time = "whenever"

[user-agent]
full = "sitewalk/0.1"
robots = "sitewalk"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.crawler.wait_duration(), std::time::Duration::ZERO);
    }
}
