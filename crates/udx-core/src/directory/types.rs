//! Per-endpoint response schemas.
//!
//! Schemas are deliberately loose about anything beyond what the console
//! needs: unrecognized fields are captured verbatim via `serde(flatten)` so
//! payloads round-trip without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Successful login payload. The token is mandatory; anything else the
/// server sends rides along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls
    pub token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A managed user as returned by the service.
///
/// Opaque to this client beyond `phone_no`, `city` and `role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
