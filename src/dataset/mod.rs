// Dataset loading: source resolution, fetch with retries, and the raw-document cache

pub mod cache;
pub mod fetcher;
pub mod models;

pub use cache::{Cache, FileCache, MemoryCache, CACHE_KEY};
pub use fetcher::{Fetcher, RetryPolicy};
pub use models::{Dataset, Ingredient, Quantity, Recipe};

use crate::config::{CacheKind, Settings};
use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Where the dataset document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http(Url),
    File(PathBuf),
}

impl DataSource {
    /// http(s) URLs are fetched over the network, anything without a scheme is a local path
    pub fn parse(location: &str) -> Result<Self> {
        match Url::parse(location) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(DataSource::Http(url)),
                "file" => url
                    .to_file_path()
                    .map(DataSource::File)
                    .map_err(|_| Error::Validation(format!("Invalid file URL: {location}"))),
                // Windows drive letters parse as a one-letter scheme
                scheme if scheme.len() == 1 => Ok(DataSource::File(PathBuf::from(location))),
                scheme => Err(Error::Validation(format!(
                    "Dataset source must use http, https or file scheme, got {scheme}"
                ))),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(DataSource::File(PathBuf::from(location)))
            }
            Err(e) => Err(Error::InvalidUrl(e)),
        }
    }
}

/// Copy of `url` without user name or password, for logs and error messages
pub(crate) fn redact_url(url: &Url) -> Url {
    let mut shown = url.clone();
    if shown.password().is_some() || !shown.username().is_empty() {
        let _ = shown.set_username("");
        let _ = shown.set_password(None);
    }
    shown
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http(url) => write!(f, "{}", redact_url(url)),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Holds the dataset once loaded; loading goes through the cache first
pub struct DatasetStore<C: Cache> {
    source: DataSource,
    fetcher: Fetcher,
    cache: C,
    dataset: Option<Arc<Dataset>>,
}

impl DatasetStore<Box<dyn Cache + Send>> {
    /// Build a store from settings, picking the configured cache backend
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let source = DataSource::parse(&settings.source.location)?;
        let fetcher = Fetcher::new(
            settings.fetch.user_agent.clone(),
            settings.fetch.timeout(),
            settings.fetch.retry_policy(),
        )?;
        let cache: Box<dyn Cache + Send> = match settings.cache.kind {
            CacheKind::File => Box::new(FileCache::new(&settings.cache.dir)),
            CacheKind::Memory => Box::new(MemoryCache::new()),
        };
        Ok(DatasetStore::new(source, fetcher, cache))
    }
}

impl<C: Cache> DatasetStore<C> {
    pub fn new(source: DataSource, fetcher: Fetcher, cache: C) -> Self {
        Self {
            source,
            fetcher,
            cache,
            dataset: None,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Loaded dataset, if `load` already succeeded
    pub fn dataset(&self) -> Option<Arc<Dataset>> {
        self.dataset.clone()
    }

    /// Load the dataset from the cache, or fetch and cache it.
    /// Repeated calls return the same dataset without touching the cache.
    pub async fn load(&mut self) -> Result<Arc<Dataset>> {
        if let Some(dataset) = &self.dataset {
            return Ok(dataset.clone());
        }

        let dataset = self.read_or_fetch().await.inspect_err(|e| {
            warn!("Dataset load failed: {}", e.log_safe());
        })?;

        let dataset = Arc::new(dataset);
        self.dataset = Some(dataset.clone());
        Ok(dataset)
    }

    async fn read_or_fetch(&mut self) -> Result<Dataset> {
        match self.cache.get(CACHE_KEY)? {
            Some(raw) => {
                let dataset = Dataset::from_json(&raw)?;
                info!("Loaded {} recipes from cache", dataset.len());
                Ok(dataset)
            }
            None => {
                let raw = self.fetcher.fetch(&self.source).await?;
                let dataset = Dataset::from_json(&raw)?;
                self.cache.set(CACHE_KEY, &raw)?;
                info!("Fetched {} recipes from {}", dataset.len(), self.source);
                Ok(dataset)
            }
        }
    }

    /// Forget the loaded dataset and drop the cache entry
    pub fn invalidate(&mut self) -> Result<()> {
        self.dataset = None;
        self.cache.remove(CACHE_KEY)
    }
}
