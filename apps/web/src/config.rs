use anyhow::{Context, Result};

const DEFAULT_MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Header carrying the authenticated user id, set by the upstream auth proxy.
    pub user_header: String,
    pub max_logo_bytes: usize,
    /// Extra hosts (`host[:port]`) accepted as the origin of form posts.
    pub csrf_trusted_hosts: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            user_header: std::env::var("USER_HEADER")
                .unwrap_or_else(|_| "x-user-id".to_string())
                .to_ascii_lowercase(),
            max_logo_bytes: match std::env::var("MAX_LOGO_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_LOGO_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_LOGO_BYTES,
            },
            csrf_trusted_hosts: std::env::var("CSRF_TRUSTED_HOSTS")
                .map(|raw| parse_host_list(&raw))
                .unwrap_or_default(),
        })
    }
}

fn parse_host_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_list() {
        assert_eq!(
            parse_host_list(" Jobs.Example , ,localhost:8080"),
            vec!["jobs.example".to_string(), "localhost:8080".to_string()]
        );
        assert!(parse_host_list("").is_empty());
    }
}
