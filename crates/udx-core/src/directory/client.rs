//! HTTP client for the user-management service.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;

use super::error::DirectoryError;
use super::types::{LoginResponse, UserRecord};
use super::validate::{validate_phone, validate_required};

/// Production address of the user-management service.
pub const DEFAULT_BASE_URL: &str = "https://139.59.75.96";

/// Directory client configuration.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub base_url: String,
    /// Fixed per-request timeout; `None` disables it.
    pub timeout: Option<Duration>,
}

impl DirectoryConfig {
    /// Builds a client config from the loaded application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.request_timeout(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(Config::DEFAULT_REQUEST_TIMEOUT_SECS)),
        }
    }
}

/// Shape of the server's error payloads.
#[derive(Debug, Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

/// Typed gateway to the five user-management operations plus login.
///
/// One `reqwest::Client` is reused across calls; concurrent calls share
/// nothing else. No retries, no deduplication, no cancellation once a
/// request is issued.
pub struct DirectoryClient {
    config: DirectoryConfig,
    http: reqwest::Client,
}

impl DirectoryClient {
    /// Creates a new directory client with the given configuration.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the production service.
    /// - At runtime, panics if `UDX_BLOCK_REAL_API=1` and `base_url` is the production service.
    ///
    /// This prevents tests from accidentally making real network requests.
    /// Point `base_url` at a mock server instead.
    pub fn new(config: DirectoryConfig) -> Self {
        // Compile-time guard for unit tests
        #[cfg(test)]
        if config.base_url == DEFAULT_BASE_URL {
            panic!(
                "Tests must not use the production user-management service!\n\
                 Set base_url to a mock server (e.g., wiremock).\n\
                 Found base_url: {}",
                config.base_url
            );
        }

        // Runtime guard for integration tests (set UDX_BLOCK_REAL_API=1 in test harness)
        #[cfg(not(test))]
        if std::env::var("UDX_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && config.base_url == DEFAULT_BASE_URL
        {
            panic!(
                "UDX_BLOCK_REAL_API=1 but trying to use the production user-management service!\n\
                 Set base_url to a mock server.\n\
                 Found base_url: {}",
                config.base_url
            );
        }

        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Authenticates an operator with phone number + OTP.
    ///
    /// Does not store the token; the caller persists it exactly once on
    /// success.
    ///
    /// # Errors
    /// `Validation` for empty inputs, `Auth` for a rejected login, `Schema`
    /// when the response carries no token, `Request` for transport failures.
    pub async fn login(&self, phone: &str, otp: &str) -> Result<LoginResponse, DirectoryError> {
        validate_required("Phone number", phone)?;
        validate_required("OTP", otp)?;

        let builder = self
            .http
            .post(self.endpoint("/auth/login"))
            .json(&serde_json::json!({ "phone_no": phone, "otp": otp }));
        let response = self.send(builder, "login").await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = Self::server_message(response)
                .await
                .unwrap_or_else(|| format!("Login failed (HTTP {status})"));
            debug!(%status, "login rejected");
            return Err(DirectoryError::Auth(message));
        }

        Self::decode(response, "login").await
    }

    /// Fetches every user in the directory.
    ///
    /// # Errors
    /// Returns a [`DirectoryError`] on any non-2xx response or transport failure.
    pub async fn list_all(&self, token: &str) -> Result<Vec<UserRecord>, DirectoryError> {
        let builder = self.http.get(self.endpoint("/manage-users/"));
        self.call(builder, token, "list users").await
    }

    /// Fetches the users registered in `city`.
    ///
    /// The result is the server's collection verbatim; no client-side
    /// filtering or sorting is applied.
    ///
    /// # Errors
    /// `Validation` for an empty city, otherwise as for [`Self::list_all`].
    pub async fn list_by_city(
        &self,
        city: &str,
        token: &str,
    ) -> Result<Vec<UserRecord>, DirectoryError> {
        validate_required("City", city)?;

        let builder = self
            .http
            .get(self.endpoint("/manage-users/city"))
            .query(&[("city", city)]);
        self.call(builder, token, "list users by city").await
    }

    /// Fetches a single user by phone number.
    ///
    /// # Errors
    /// `Validation` unless `phone` is exactly ten digits, otherwise as for
    /// [`Self::list_all`].
    pub async fn get_by_phone(
        &self,
        phone: &str,
        token: &str,
    ) -> Result<UserRecord, DirectoryError> {
        validate_phone(phone)?;

        let builder = self
            .http
            .get(self.endpoint(&format!("/manage-users/phone/{phone}")));
        self.call(builder, token, "fetch user").await
    }

    /// Updates the role of the user identified by `phone`.
    ///
    /// # Errors
    /// `Validation` for a malformed phone or empty role, otherwise as for
    /// [`Self::list_all`].
    pub async fn update_role(
        &self,
        phone: &str,
        role: &str,
        token: &str,
    ) -> Result<UserRecord, DirectoryError> {
        validate_phone(phone)?;
        validate_required("Role", role)?;

        let builder = self
            .http
            .put(self.endpoint(&format!("/manage-users/phone/{phone}/role")))
            .json(&serde_json::json!({ "role": role }));
        self.call(builder, token, "update role").await
    }

    /// Deletes the user identified by `phone`. Returns the server's ack
    /// verbatim.
    ///
    /// # Errors
    /// `Validation` unless `phone` is exactly ten digits, otherwise as for
    /// [`Self::list_all`].
    pub async fn delete_by_phone(
        &self,
        phone: &str,
        token: &str,
    ) -> Result<Value, DirectoryError> {
        validate_phone(phone)?;

        let builder = self
            .http
            .delete(self.endpoint(&format!("/manage-users/phone/{phone}")));
        self.call(builder, token, "delete user").await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Sends an authenticated request and normalizes the outcome.
    async fn call<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        token: &str,
        op: &str,
    ) -> Result<T, DirectoryError> {
        let response = self.send(builder.bearer_auth(token), op).await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, op).await);
        }

        Self::decode(response, op).await
    }

    /// Issues the request, applying the fixed timeout. A transport failure
    /// (no response at all) becomes a `Request` error with no status.
    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        op: &str,
    ) -> Result<reqwest::Response, DirectoryError> {
        let builder = match self.config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        builder.send().await.map_err(|err| {
            debug!(operation = op, error = %err, "request failed without a response");
            let message = if err.is_timeout() {
                format!("Request timed out while trying to {op}")
            } else {
                format!("Network error while trying to {op}")
            };
            DirectoryError::Request {
                status: None,
                message,
            }
        })
    }

    /// Converts a non-2xx response into the normalized error, preferring the
    /// server-provided message over a generic status line. 401/403 map to
    /// the `Auth` kind; the stored session is never touched here.
    async fn status_error(response: reqwest::Response, op: &str) -> DirectoryError {
        let status = response.status();
        let message = Self::server_message(response)
            .await
            .unwrap_or_else(|| format!("HTTP error: status {status}"));
        debug!(operation = op, %status, "request rejected");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            DirectoryError::Auth(message)
        } else {
            DirectoryError::Request {
                status: Some(status.as_u16()),
                message,
            }
        }
    }

    /// Extracts the server's `message` field from an error body, if any.
    async fn server_message(response: reqwest::Response) -> Option<String> {
        response
            .json::<ServerMessage>()
            .await
            .ok()
            .and_then(|m| m.message)
    }

    /// Decodes a 2xx body against the endpoint's schema.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        op: &str,
    ) -> Result<T, DirectoryError> {
        response.json::<T>().await.map_err(|err| {
            DirectoryError::Schema(format!("Unexpected {op} response shape: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: constructing a client against the production service panics in
    /// test builds.
    #[test]
    #[should_panic(expected = "mock server")]
    fn test_production_base_url_is_blocked() {
        let _ = DirectoryClient::new(DirectoryConfig::default());
    }

    /// Test: endpoint paths append to the configured base URL.
    #[test]
    fn test_endpoint_joins_base_url() {
        let client = DirectoryClient::new(DirectoryConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: None,
        });
        assert_eq!(
            client.endpoint("/manage-users/"),
            "http://127.0.0.1:9/manage-users/"
        );
    }
}
