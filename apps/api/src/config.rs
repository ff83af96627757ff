use anyhow::{Context, Result};

/// Default attachment ceiling: 5 MiB.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub jobs_api_url: String,
    pub mail_relay_url: String,
    pub mail_relay_api_key: String,
    pub mail_from: String,
    /// Recruiter mailboxes that receive every application and enquiry.
    pub mail_recipients: Vec<String>,
    pub relay_timeout_secs: u64,
    pub catalog_timeout_secs: u64,
    pub max_attachment_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mail_recipients = parse_recipients(&require_env("MAIL_RECIPIENTS")?);
        if mail_recipients.is_empty() {
            anyhow::bail!("MAIL_RECIPIENTS must name at least one address");
        }

        Ok(Config {
            jobs_api_url: require_env("JOBS_API_URL")?,
            mail_relay_url: require_env("MAIL_RELAY_URL")?,
            mail_relay_api_key: require_env("MAIL_RELAY_API_KEY")?,
            mail_from: require_env("MAIL_FROM")?,
            mail_recipients,
            relay_timeout_secs: optional_env("RELAY_TIMEOUT_SECS", 30)?,
            catalog_timeout_secs: optional_env("CATALOG_TIMEOUT_SECS", 15)?,
            max_attachment_bytes: optional_env(
                "MAX_ATTACHMENT_BYTES",
                DEFAULT_MAX_ATTACHMENT_BYTES,
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated address list, dropping blanks.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
impl Config {
    /// Config pointing both upstreams at the given base URLs.
    pub fn for_tests(jobs_api_url: &str, mail_relay_url: &str) -> Self {
        Config {
            jobs_api_url: jobs_api_url.to_string(),
            mail_relay_url: mail_relay_url.to_string(),
            mail_relay_api_key: "test-key".to_string(),
            mail_from: "careers@example.com".to_string(),
            mail_recipients: vec!["hr@example.com".to_string()],
            relay_timeout_secs: 5,
            catalog_timeout_secs: 5,
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipients_trims_and_drops_blanks() {
        let parsed = parse_recipients(" hr@example.com, ,ops@example.com ,");
        assert_eq!(parsed, vec!["hr@example.com", "ops@example.com"]);
    }

    #[test]
    fn test_parse_recipients_empty() {
        assert!(parse_recipients("  ,  ").is_empty());
    }
}
