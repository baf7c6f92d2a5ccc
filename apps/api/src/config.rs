use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional: without a key every generation call fails and the candidate
    /// sees the service diagnostic instead.
    pub gemini_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Sessions untouched for this long are dropped by the idle sweeper.
    pub session_idle_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            port: parse_port(std::env::var("PORT").ok())?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_idle_ttl_secs: parse_idle_ttl(std::env::var("SESSION_IDLE_TTL_SECS").ok())?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(raw: Option<String>) -> Result<u16> {
    raw.unwrap_or_else(|| "8080".to_string())
        .parse::<u16>()
        .context("PORT must be a valid port number")
}

fn parse_idle_ttl(raw: Option<String>) -> Result<u64> {
    let secs = raw
        .unwrap_or_else(|| "3600".to_string())
        .parse::<u64>()
        .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?;
    anyhow::ensure!(secs > 0, "SESSION_IDLE_TTL_SECS must be greater than zero");
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_to_8080() {
        assert_eq!(parse_port(None).unwrap(), 8080);
    }

    #[test]
    fn test_port_parses_value() {
        assert_eq!(parse_port(Some("3000".to_string())).unwrap(), 3000);
    }

    #[test]
    fn test_port_rejects_garbage() {
        let err = parse_port(Some("eighty".to_string())).unwrap_err();
        assert!(err.to_string().contains("PORT must be a valid port number"));
    }

    #[test]
    fn test_idle_ttl_defaults_to_one_hour() {
        assert_eq!(parse_idle_ttl(None).unwrap(), 3600);
    }

    #[test]
    fn test_idle_ttl_rejects_zero_and_garbage() {
        assert!(parse_idle_ttl(Some("0".to_string())).is_err());
        assert!(parse_idle_ttl(Some("soon".to_string())).is_err());
    }
}
