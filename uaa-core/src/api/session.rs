//! Authenticated session holding one manager per UAA resource

use super::auth::AuthManager;
use super::client_manager::ClientManager;
use super::group_manager::GroupManager;
use super::identity_zone_manager::IdentityZoneManager;
use super::uaa_api::UaaApi;
use super::user_manager::UserManager;
use crate::config::Config;
use crate::error::{Result, UaaError};
use reqwest::{Certificate, Client};
use std::time::Duration;
use tracing::info;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    auth_manager: AuthManager,
    client_manager: ClientManager,
    group_manager: GroupManager,
    user_manager: UserManager,
    identity_zone_manager: IdentityZoneManager,
}

impl Session {
    /// Authenticate with the configured client credentials and build the
    /// managers. Fails if no token can be obtained.
    pub async fn new(config: &Config) -> Result<Self> {
        let login_url = config.login_url();
        let auth_url = config.auth_url();

        if auth_url.is_empty() {
            return Err(UaaError::Config(
                "no auth endpoint provided for the UAA session".to_string(),
            ));
        }

        let http_client = build_http_client(config)?;

        let auth_manager = AuthManager::new(http_client.clone(), login_url);
        let client_token = auth_manager
            .get_client_token(&config.client_id, &config.client_secret, "")
            .await?;

        let api = UaaApi::new(http_client, auth_url, client_token.clone())?;

        let identity_zone_manager = IdentityZoneManager::new(api.clone());
        let session = Self {
            config: config.clone(),
            auth_manager,
            client_manager: ClientManager::new(api.clone()),
            group_manager: GroupManager::new(api.clone()),
            user_manager: UserManager::new(api, identity_zone_manager.clone(), client_token),
            identity_zone_manager,
        };

        info!(
            login_url = %session.auth_manager.login_url(),
            auth_url = %config.auth_url(),
            client_id = %config.client_id,
            "UAA session established"
        );

        Ok(session)
    }

    /// Session configured from `UAA_*` environment variables
    pub async fn from_env() -> Result<Self> {
        let config = Config::from_env().map_err(|e| UaaError::Config(format!("{:#}", e)))?;
        Self::new(&config).await
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn auth_manager(&self) -> &AuthManager {
        &self.auth_manager
    }

    pub fn client_manager(&self) -> &ClientManager {
        &self.client_manager
    }

    pub fn group_manager(&self) -> &GroupManager {
        &self.group_manager
    }

    pub fn user_manager(&self) -> &UserManager {
        &self.user_manager
    }

    pub fn identity_zone_manager(&self) -> &IdentityZoneManager {
        &self.identity_zone_manager
    }
}

fn build_http_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .danger_accept_invalid_certs(config.skip_ssl_validation);

    if let Some(dial_timeout) = config.dial_timeout {
        builder = builder.connect_timeout(dial_timeout);
    }

    if let Some(pem) = config.ca_cert.as_deref() {
        let cert = Certificate::from_pem(pem.as_bytes())
            .map_err(|e| UaaError::Config(format!("Invalid CA certificate: {}", e)))?;
        builder = builder.add_root_certificate(cert);
    }

    builder
        .build()
        .map_err(|e| UaaError::Config(format!("Failed to build HTTP client: {}", e)))
}
