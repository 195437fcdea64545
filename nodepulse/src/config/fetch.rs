//! Source download configuration.

use std::time::Duration;

use super::defaults::DEFAULT_FETCH_TIMEOUT_SECS;

/// Which subscription sources to download and how long to wait for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    urls: Vec<String>,
    timeout: Duration,
}

impl FetchConfig {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_sources() {
        let config = FetchConfig::default();
        assert!(config.urls().is_empty());
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS));
    }

    #[test]
    fn test_with_timeout() {
        let config = FetchConfig::new(vec!["https://a.example".into()]).with_timeout_secs(3);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.urls().len(), 1);
    }
}
