use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://jservice.io/api/";
/// Telegram renders at most eight buttons in one keyboard row.
pub const MAX_CATEGORY_COUNT: u64 = 8;
pub const MAX_CLUES_PER_CATEGORY: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub category_count: usize,
    pub clues_per_category: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            category_count: 6,
            clues_per_category: 5,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Reads only the given env file, ignoring the process environment.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let vars = dotenvy::from_path_iter(path.as_ref())?.collect::<Result<Vec<_>, _>>()?;
        Self::from_vars(vars)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();
        let defaults = Self::default();

        let api_base_url = vars
            .get("JSERVICE_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim().to_string())
            .unwrap_or(defaults.api_base_url);

        let category_count = read_number(
            &vars,
            "CATEGORY_COUNT",
            defaults.category_count as u64,
            1,
            MAX_CATEGORY_COUNT,
        )?;
        let clues_per_category = read_number(
            &vars,
            "CLUES_PER_CATEGORY",
            defaults.clues_per_category as u64,
            1,
            MAX_CLUES_PER_CATEGORY,
        )?;
        let timeout_secs = read_number(
            &vars,
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
            1,
            120,
        )?;

        Ok(Self {
            api_base_url,
            category_count: category_count as usize,
            clues_per_category: clues_per_category as usize,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn read_number(
    vars: &HashMap<String, String>,
    key: &'static str,
    default: u64,
    min: u64,
    max: u64,
) -> Result<u64, ConfigError> {
    let Some(raw) = vars.get(key) else {
        return Ok(default);
    };
    let value: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.clone(),
    })?;
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { key, value, min, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.category_count, 6);
        assert_eq!(config.clues_per_category, 5);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("JSERVICE_BASE_URL", "http://localhost:3000/api/"),
            ("CATEGORY_COUNT", "4"),
            ("CLUES_PER_CATEGORY", " 3 "),
            ("REQUEST_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:3000/api/");
        assert_eq!(config.category_count, 4);
        assert_eq!(config.clues_per_category, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_out_of_range() {
        let err = Config::from_vars(vars(&[("CATEGORY_COUNT", "9")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                key: "CATEGORY_COUNT",
                value: 9,
                ..
            }
        ));

        let err = Config::from_vars(vars(&[("CLUES_PER_CATEGORY", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn test_not_a_number() {
        let err = Config::from_vars(vars(&[("REQUEST_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn test_from_env_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "# board size")?;
        writeln!(file, "CATEGORY_COUNT=3")?;
        writeln!(file, "CLUES_PER_CATEGORY=2")?;

        let config = Config::from_file(file.path())?;
        assert_eq!(config.category_count, 3);
        assert_eq!(config.clues_per_category, 2);
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        Ok(())
    }
}
