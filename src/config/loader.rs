//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::ChairConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use chair_motion::load_config;
///
/// let config = load_config("chair.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ChairConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<ChairConfig> {
    let config: ChairConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.drive.total_steps_per_revolution(), 4000);
        assert_eq!(config.axes.yaw.max.value(), 45.0);
    }

    #[test]
    fn test_parse_drive_section() {
        let toml = r#"
[drive]
steps_per_revolution = 400
microsteps = 8
gear_ratio = 2.0
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.drive.total_steps_per_revolution(), 6400);
    }

    #[test]
    fn test_parse_axis_limits() {
        let toml = r#"
[axes.yaw]
min_degrees = -30.0
max_degrees = 30.0
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.axes.yaw.min.value(), -30.0);
        assert_eq!(config.axes.yaw.max.value(), 30.0);
        // Untouched sections keep their defaults.
        assert_eq!(config.axes.pitch.max.value(), 9.81);
    }

    #[test]
    fn test_parse_rejects_invalid_microsteps() {
        let toml = r#"
[drive]
microsteps = 12
"#;

        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn test_parse_rejects_inverted_limits() {
        let toml = r#"
[axes.roll]
min_degrees = 8.0
max_degrees = -8.0
"#;

        assert!(parse_config(toml).is_err());
    }
}
