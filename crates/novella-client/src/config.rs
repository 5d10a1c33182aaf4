use std::time::Duration;

use novella_core::AppError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36 Edg/119.0.0.0";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9";
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the HTTP client shared by a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl FetcherConfig {
    /// Read configuration from environment variables.
    ///
    /// - `NOVELLA_TIMEOUT_SECS` (optional, defaults to 15)
    /// - `NOVELLA_USER_AGENT` (optional, defaults to a desktop Edge UA)
    /// - `NOVELLA_ACCEPT_LANGUAGE` (optional, defaults to `zh-CN,zh;q=0.9`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("NOVELLA_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid NOVELLA_TIMEOUT_SECS '{raw}': must be a positive integer"
                ))
            })?;
            if secs == 0 {
                return Err(AppError::ConfigError(
                    "NOVELLA_TIMEOUT_SECS must be at least 1".into(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(ua) = lookup("NOVELLA_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = ua;
        }

        if let Some(lang) = lookup("NOVELLA_ACCEPT_LANGUAGE").filter(|v| !v.trim().is_empty()) {
            config.accept_language = lang;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = FetcherConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FetcherConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let config = FetcherConfig::from_lookup(lookup(&[
            ("NOVELLA_TIMEOUT_SECS", "30"),
            ("NOVELLA_USER_AGENT", "novella-test/1.0"),
            ("NOVELLA_ACCEPT_LANGUAGE", "en-US"),
        ]))
        .unwrap();

        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.user_agent, "novella-test/1.0");
        assert_eq!(config.accept_language, "en-US");
    }

    #[test]
    fn test_invalid_timeout() {
        let err = FetcherConfig::from_lookup(lookup(&[("NOVELLA_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));

        let err =
            FetcherConfig::from_lookup(lookup(&[("NOVELLA_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_blank_user_agent_keeps_default() {
        let config =
            FetcherConfig::from_lookup(lookup(&[("NOVELLA_USER_AGENT", "  ")])).unwrap();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
