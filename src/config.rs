use std::env;
use std::time::Duration;

use crate::blockchain::DEFAULT_DIFFICULTY;

/// Node settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub difficulty: usize,
    pub peer_timeout: Duration,
    pub peers: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = get("PORT").and_then(|v| v.parse().ok()).unwrap_or(5000);
        let difficulty = get("POW_DIFFICULTY")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DIFFICULTY);
        let peer_timeout = get("PEER_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));
        let peers = get("PEERS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host,
            port,
            difficulty,
            peer_timeout,
            peers,
        }
    }
}
