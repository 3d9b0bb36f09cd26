//! Wire types shared by the browser client and the worker
//!
//! The only exchange is the connectivity probe: `GET /api/ping` answered with
//! a small JSON body.

use serde::{Deserialize, Serialize};

/// Path of the connectivity probe
pub const PING_PATH: &str = "/api/ping";

/// Body of the ping endpoint's response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

impl PingResponse {
    /// The reply the worker sends
    pub fn pong() -> Self {
        Self {
            message: "pong".to_string(),
        }
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string; unknown fields are ignored
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Join a base URL and the ping path without doubling the slash
pub fn ping_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), PING_PATH)
}
