//! Client-credentials token acquisition

use crate::error::{Result, UaaError};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Exchanges client credentials for bearer tokens against the login server.
///
/// Tokens are neither cached nor refreshed; every call hits `/oauth/token`.
#[derive(Debug, Clone)]
pub struct AuthManager {
    http_client: Client,
    login_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

impl AuthManager {
    pub fn new(http_client: Client, login_url: impl Into<String>) -> Self {
        Self {
            http_client,
            login_url: login_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Token endpoint, with `subdomain` prefixed to the host when non-empty
    pub fn token_url(&self, subdomain: &str) -> Result<String> {
        if self.login_url.is_empty() {
            return Err(UaaError::Config(
                "no login endpoint provided for token requests".to_string(),
            ));
        }

        let mut url = Url::parse(&self.login_url).map_err(|e| {
            UaaError::Config(format!("Invalid login endpoint '{}': {}", self.login_url, e))
        })?;

        if !subdomain.is_empty() {
            let host = url
                .host_str()
                .ok_or_else(|| {
                    UaaError::Config(format!("Login endpoint '{}' has no host", self.login_url))
                })?
                .to_string();
            url.set_host(Some(&format!("{}.{}", subdomain, host)))
                .map_err(|e| UaaError::Config(format!("Invalid subdomain '{}': {}", subdomain, e)))?;
        }

        let base = url.as_str().trim_end_matches('/').to_string();
        Ok(format!("{}/oauth/token", base))
    }

    /// Fetch a client-credentials token.
    ///
    /// Returns the complete `Authorization` header value, e.g. `bearer eyJ...`.
    pub async fn get_client_token(
        &self,
        client_id: &str,
        client_secret: &str,
        subdomain: &str,
    ) -> Result<String> {
        let token_url = self.token_url(subdomain)?;
        debug!(%token_url, client_id, "Requesting client credentials token");

        let params = [
            ("grant_type", "client_credentials"),
            ("response_type", "token"),
        ];

        let response = self
            .http_client
            .post(&token_url)
            .basic_auth(client_id, Some(client_secret))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| UaaError::Authentication(format!("Failed to get client token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UaaError::Authentication(format!(
                "Failed to get client token: {} - {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            UaaError::Authentication(format!("Failed to parse token response: {}", e))
        })?;

        let token_type = token_response
            .token_type
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "bearer".to_string());

        Ok(format!("{} {}", token_type, token_response.access_token))
    }
}
