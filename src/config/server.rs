//! Server and dashboard configuration types.

use serde::Deserialize;

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port for the REST API.
    pub port: u16,
    /// Where `GET /api/qr` sends the customer after recording the scan.
    pub qr_redirect_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            qr_redirect_url: "https://www.naver.com".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dashboard computation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Offset east of UTC, in minutes, used for day and month bucketing.
    /// When unset, the host's local offset is used.
    pub utc_offset_minutes: Option<i32>,
}
