use std::time::Duration;

use anyhow::{anyhow, Context};
use chrono::FixedOffset;

use crate::aggregate::DateFormatter;

/// Settings handed to the fetch layer and the aggregators at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: Option<String>,
    pub formatter: DateFormatter,
    pub timeout: Duration,
}

impl Config {
    pub fn new(backend_url: Option<String>, utc_offset: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let backend_url = backend_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            backend_url,
            formatter: DateFormatter::new(parse_offset(utc_offset)?),
            timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }

    pub fn backend_url(&self) -> anyhow::Result<&str> {
        self.backend_url
            .as_deref()
            .ok_or_else(|| anyhow!("BACKEND_URL must be set (or pass --input) to load data"))
    }
}

pub fn parse_offset(raw: &str) -> anyhow::Result<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Ok(FixedOffset::east_opt(0).context("invalid offset")?);
    }
    raw.parse::<FixedOffset>()
        .with_context(|| format!("invalid UTC offset {raw:?}, expected something like +07:00"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_offsets() {
        assert_eq!(parse_offset("+07:00").unwrap().local_minus_utc(), 7 * 3600);
        assert_eq!(parse_offset("-05:30").unwrap().local_minus_utc(), -(5 * 3600 + 1800));
        assert_eq!(parse_offset("UTC").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn rejects_garbage_offset() {
        assert!(parse_offset("jakarta").is_err());
        assert!(Config::new(None, "+99:00", 10).is_err());
    }

    #[test]
    fn trims_backend_url() {
        let config = Config::new(Some("https://api.sekolah.id/ ".to_string()), "+00:00", 10).unwrap();
        assert_eq!(config.backend_url().unwrap(), "https://api.sekolah.id");
    }

    #[test]
    fn missing_backend_url_is_an_error() {
        let config = Config::new(Some("  ".to_string()), "+00:00", 0).unwrap();
        assert!(config.backend_url().is_err());
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
