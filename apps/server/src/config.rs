use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

/// Connection settings for the box-office enrichment provider.
#[derive(Clone, Debug)]
pub struct BoxOfficeConfig {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    /// Shared bearer secret. `None` leaves the API open.
    pub auth_token: Option<String>,
    /// `None` disables enrichment.
    pub box_office: Option<BoxOfficeConfig>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn millis_var(key: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("RR_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:9090".to_string())
            .parse()
            .context("Invalid RR_LISTEN_ADDR")?;
        let db_path = std::env::var("RR_DB_PATH").unwrap_or_else(|_| "./db/movies.db".into());
        let auth_token = non_empty_var("AUTH_TOKEN");
        let box_office = match (
            non_empty_var("BOXOFFICE_URL"),
            non_empty_var("BOXOFFICE_API_KEY"),
        ) {
            (Some(url), Some(api_key)) => Some(BoxOfficeConfig {
                url,
                api_key,
                timeout: millis_var("BOXOFFICE_TIMEOUT_MS", 10_000),
            }),
            _ => None,
        };
        let cors_allow = std::env::var("RR_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(Self {
            listen_addr,
            db_path,
            auth_token,
            box_office,
            cors_allow,
            request_timeout: millis_var("RR_REQUEST_TIMEOUT_MS", 15_000),
        })
    }
}
