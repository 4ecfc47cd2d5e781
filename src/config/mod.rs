use crate::dataset::fetcher::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT};
use crate::dataset::DataSource;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub source: SourceConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// http(s) URL or local path of the `{ "recipes": [...] }` document
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_seconds: u64,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub kind: CacheKind,
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./data/cache")
}

fn default_user_agent() -> String {
    format!("Recipe-Finder/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY.as_millis() as u64,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            kind: CacheKind::default(),
            dir: default_cache_dir(),
        }
    }
}

impl FetchConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let location =
            std::env::var("DATASET_SOURCE").unwrap_or_else(|_| "data/recipes.json".to_string());

        let timeout_seconds = std::env::var("FETCH_TIMEOUT")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT.as_secs().to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid FETCH_TIMEOUT value".to_string()))?;

        let max_attempts = std::env::var("FETCH_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_ATTEMPTS.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid FETCH_MAX_ATTEMPTS value".to_string()))?;

        let retry_delay_ms = std::env::var("FETCH_RETRY_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_RETRY_DELAY.as_millis().to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid FETCH_RETRY_DELAY_MS value".to_string()))?;

        let kind = match std::env::var("CACHE_KIND")
            .unwrap_or_else(|_| "file".to_string())
            .to_lowercase()
            .as_str()
        {
            "file" => CacheKind::File,
            "memory" => CacheKind::Memory,
            other => {
                return Err(Error::Config(format!(
                    "Invalid CACHE_KIND value: {other}. Must be file or memory"
                )))
            }
        };

        let dir = std::env::var("CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_cache_dir());

        Ok(Settings {
            source: SourceConfig { location },
            fetch: FetchConfig {
                timeout_seconds,
                max_attempts,
                retry_delay_ms,
                user_agent: default_user_agent(),
            },
            cache: CacheConfig { kind, dir },
        })
    }

    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read settings from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse settings from {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.fetch.max_attempts == 0 {
            return Err(Error::Config(
                "Fetch attempts must be non-zero".to_string(),
            ));
        }

        if self.fetch.timeout_seconds == 0 {
            return Err(Error::Config("Fetch timeout must be non-zero".to_string()));
        }

        DataSource::parse(&self.source.location)
            .map_err(|e| Error::Config(format!("Invalid dataset source: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn settings() -> Settings {
        Settings {
            source: SourceConfig {
                location: "https://example.com/data/recipes.json".to_string(),
            },
            fetch: FetchConfig::default(),
            cache: CacheConfig::default(),
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = settings();
        assert!(settings.validate().is_ok());

        settings.fetch.max_attempts = 0;
        assert!(settings.validate().is_err());

        let mut settings = self::settings();
        settings.fetch.timeout_seconds = 0;
        assert!(settings.validate().is_err());

        let mut settings = self::settings();
        settings.source.location = "ftp://example.com/recipes.json".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_default_retry_policy() {
        let policy = FetchConfig::default().retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay, Duration::from_millis(500));
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source:\n  location: data/recipes.json\ncache:\n  kind: memory").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.source.location, "data/recipes.json");
        assert_eq!(settings.cache.kind, CacheKind::Memory);
        assert_eq!(settings.fetch.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial_fetch_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source:\n  location: data/recipes.json\nfetch:\n  max_attempts: 5").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.fetch.max_attempts, 5);
        assert_eq!(settings.fetch.timeout_seconds, DEFAULT_TIMEOUT.as_secs());
        assert_eq!(
            settings.fetch.retry_policy().delay,
            DEFAULT_RETRY_DELAY
        );
        assert!(settings.fetch.user_agent.starts_with("Recipe-Finder/"));
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source: [not, a, map").unwrap();

        assert!(matches!(
            Settings::from_file(file.path()),
            Err(Error::Config(_))
        ));
    }
}
