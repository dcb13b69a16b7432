use fiscal_core::FiscalError;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://apidatalake.tesouro.gov.br/ords/siconfi/tt";

/// Connection settings for the SICONFI data lake.
#[derive(Debug, Clone)]
pub struct SiconfiConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Minimum spacing between two requests
    pub min_interval: Duration,
    /// Skip TLS certificate verification. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
}

impl Default for SiconfiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            min_interval: Duration::from_millis(100),
            accept_invalid_certs: false,
        }
    }
}

impl SiconfiConfig {
    /// Read overrides from `SICONFI_BASE_URL`, `SICONFI_TIMEOUT_SECS`,
    /// `SICONFI_MIN_INTERVAL_MS` and `SICONFI_ACCEPT_INVALID_CERTS`.
    pub fn from_env() -> Result<Self, FiscalError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FiscalError> {
        let mut config = Self::default();

        if let Some(url) = lookup("SICONFI_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("SICONFI_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                FiscalError::Config(format!("SICONFI_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            if secs == 0 {
                return Err(FiscalError::Config("SICONFI_TIMEOUT_SECS must be at least 1".to_string()));
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = lookup("SICONFI_MIN_INTERVAL_MS") {
            let ms: u64 = ms.trim().parse().map_err(|_| {
                FiscalError::Config(format!("SICONFI_MIN_INTERVAL_MS is not a number: {}", ms))
            })?;
            config.min_interval = Duration::from_millis(ms);
        }
        if let Some(flag) = lookup("SICONFI_ACCEPT_INVALID_CERTS") {
            config.accept_invalid_certs = parse_bool(&flag).ok_or_else(|| {
                FiscalError::Config(format!("SICONFI_ACCEPT_INVALID_CERTS is not a boolean: {}", flag))
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_verify_tls() {
        let config = SiconfiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.min_interval, Duration::from_millis(100));
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_overrides() {
        let config = SiconfiConfig::from_lookup(lookup(&[
            ("SICONFI_BASE_URL", "http://localhost:8080/tt/"),
            ("SICONFI_TIMEOUT_SECS", "3"),
            ("SICONFI_MIN_INTERVAL_MS", "0"),
            ("SICONFI_ACCEPT_INVALID_CERTS", "yes"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/tt");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.min_interval, Duration::ZERO);
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = SiconfiConfig::from_lookup(lookup(&[("SICONFI_TIMEOUT_SECS", "ten")]));
        assert!(matches!(err, Err(FiscalError::Config(_))));

        let err = SiconfiConfig::from_lookup(lookup(&[("SICONFI_ACCEPT_INVALID_CERTS", "maybe")]));
        assert!(matches!(err, Err(FiscalError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = SiconfiConfig::from_lookup(lookup(&[("SICONFI_TIMEOUT_SECS", "0")]));
        assert!(matches!(err, Err(FiscalError::Config(_))));
    }
}
