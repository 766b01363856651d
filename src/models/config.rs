//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::MAX_PAGE_SIZE;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Largest page a list endpoint will return; bigger requests are clamped.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_max_page_size() -> usize {
    MAX_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_page_size_defaults_when_missing() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "address": "127.0.0.1",
            "port": 8080,
            "database_url": "app.db",
        }))
        .unwrap();
        assert_eq!(config.max_page_size, MAX_PAGE_SIZE);
    }
}
