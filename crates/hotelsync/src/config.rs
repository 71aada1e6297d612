use std::{env, str::FromStr, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache TTL in seconds (default: 30)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 100,000)
    pub cache_max_entries: usize,
    /// Name of the event queue (default: "hotels-news")
    pub queue_name: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub redis_url: String,
    /// Base URL of the hotels API, used by a standalone search role
    /// (default: "http://localhost:8081")
    pub hotels_api_url: String,
    /// Publish attempts before an outbox event is dead-lettered (default: 5)
    pub outbox_max_attempts: u32,
    /// Base delay between outbox relay attempts in milliseconds (default: 500)
    pub outbox_retry_ms: u64,
    /// Maximum number of dead-lettered events kept (default: 1,000)
    pub dead_letter_capacity: usize,
    /// Number of recently handled events remembered for dedupe (default: 10,000)
    pub dedupe_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 30)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 100,000)
    /// - `QUEUE_NAME` - Event queue name (default: "hotels-news")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `HOTELS_API_URL` - Hotels API base URL (default: "http://localhost:8081")
    /// - `OUTBOX_MAX_ATTEMPTS` - Outbox publish attempts (default: 5)
    /// - `OUTBOX_RETRY_MS` - Outbox base retry delay (default: 500)
    /// - `DEAD_LETTER_CAPACITY` - Dead-letter queue size (default: 1,000)
    /// - `DEDUPE_CAPACITY` - Dedupe window size (default: 10,000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from any key lookup. Unparsable values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cache_ttl_seconds: parsed(&lookup, "CACHE_TTL_SECONDS").unwrap_or(30),
            cache_max_entries: parsed(&lookup, "CACHE_MAX_ENTRIES").unwrap_or(100_000),
            queue_name: lookup("QUEUE_NAME").unwrap_or_else(|| "hotels-news".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            hotels_api_url: lookup("HOTELS_API_URL")
                .unwrap_or_else(|| "http://localhost:8081".to_string()),
            outbox_max_attempts: parsed(&lookup, "OUTBOX_MAX_ATTEMPTS").unwrap_or(5),
            outbox_retry_ms: parsed(&lookup, "OUTBOX_RETRY_MS").unwrap_or(500),
            dead_letter_capacity: parsed(&lookup, "DEAD_LETTER_CAPACITY").unwrap_or(1_000),
            dedupe_capacity: parsed(&lookup, "DEDUPE_CAPACITY").unwrap_or(10_000),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Get the outbox base retry delay as a Duration.
    pub fn outbox_retry(&self) -> Duration {
        Duration::from_millis(self.outbox_retry_ms)
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.cache_ttl_seconds, 30);
        assert_eq!(config.cache_max_entries, 100_000);
        assert_eq!(config.queue_name, "hotels-news");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.hotels_api_url, "http://localhost:8081");
        assert_eq!(config.outbox_max_attempts, 5);
        assert_eq!(config.outbox_retry_ms, 500);
        assert_eq!(config.dead_letter_capacity, 1_000);
        assert_eq!(config.dedupe_capacity, 10_000);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CACHE_TTL_SECONDS", "5"),
            ("CACHE_MAX_ENTRIES", "not-a-number"),
            ("QUEUE_NAME", "hotels-test"),
        ]);

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.cache_ttl_seconds, 5);
        assert_eq!(config.cache_max_entries, 100_000);
        assert_eq!(config.queue_name, "hotels-test");
    }

    #[test]
    fn test_numeric_overrides_of_every_width() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CACHE_MAX_ENTRIES", "2048"),
            ("OUTBOX_MAX_ATTEMPTS", "9"),
            ("OUTBOX_RETRY_MS", "75"),
            ("DEAD_LETTER_CAPACITY", "12"),
            ("DEDUPE_CAPACITY", "64"),
        ]);

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.cache_max_entries, 2048);
        assert_eq!(config.outbox_max_attempts, 9);
        assert_eq!(config.outbox_retry_ms, 75);
        assert_eq!(config.dead_letter_capacity, 12);
        assert_eq!(config.dedupe_capacity, 64);
        assert_eq!(config.cache_ttl_seconds, 30);
    }

    #[test]
    fn test_duration_conversions() {
        let config = Config {
            cache_ttl_seconds: 600,
            outbox_retry_ms: 250,
            ..Config::default()
        };

        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
        assert_eq!(config.outbox_retry(), Duration::from_millis(250));
    }
}
