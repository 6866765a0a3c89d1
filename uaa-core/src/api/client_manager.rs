//! OAuth client administration (`/oauth/clients`)

use super::scim_filter;
use super::types::{ResourceList, UaaClient};
use super::uaa_api::UaaApi;
use crate::error::{Result, UaaError};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ClientManager {
    api: UaaApi,
}

impl ClientManager {
    pub fn new(api: UaaApi) -> Self {
        Self { api }
    }

    pub async fn get_client(&self, id: &str, zone_id: &str) -> Result<UaaClient> {
        self.api
            .with_zone_id(zone_id)
            .get(&format!("/oauth/clients/{}", id))
            .await
    }

    /// Register a client; a 409 becomes [`UaaError::AlreadyExists`].
    pub async fn create(&self, new_client: &UaaClient, zone_id: &str) -> Result<UaaClient> {
        let result: Result<UaaClient> = self
            .api
            .with_zone_id(zone_id)
            .post("/oauth/clients", new_client)
            .await;

        match result {
            Err(e) if e.is_conflict() => {
                Err(UaaError::already_exists("client", &new_client.client_id))
            }
            Err(e) => Err(e),
            Ok(client) => {
                debug!(client_id = %new_client.client_id, zone_id, "Client created");
                Ok(client)
            }
        }
    }

    pub async fn update_client(&self, updated: &UaaClient, zone_id: &str) -> Result<UaaClient> {
        self.api
            .with_zone_id(zone_id)
            .put(&format!("/oauth/clients/{}", updated.client_id), updated)
            .await
    }

    pub async fn delete_client(&self, id: &str, zone_id: &str) -> Result<()> {
        self.api
            .with_zone_id(zone_id)
            .delete(&format!("/oauth/clients/{}", id))
            .await
    }

    /// Rotate a client secret. `oldSecret` is only sent when one is known.
    pub async fn change_secret(
        &self,
        id: &str,
        old_secret: Option<&str>,
        new_secret: &str,
        zone_id: &str,
    ) -> Result<()> {
        let mut data = BTreeMap::new();
        data.insert("secret", new_secret);
        if let Some(old) = old_secret.filter(|s| !s.is_empty()) {
            data.insert("oldSecret", old);
        }

        let _: Value = self
            .api
            .with_zone_id(zone_id)
            .put(&format!("/oauth/clients/{}/secret", id), &data)
            .await?;

        Ok(())
    }

    /// First client whose `client_id` matches, or [`UaaError::NotFound`]
    pub async fn find_by_client_id(&self, client_id: &str, zone_id: &str) -> Result<UaaClient> {
        let path = format!(
            "/oauth/clients?filter={}",
            scim_filter("client_id", client_id)
        );

        let list: ResourceList<UaaClient> = self.api.with_zone_id(zone_id).get(&path).await?;

        list.resources
            .into_iter()
            .next()
            .ok_or_else(|| UaaError::not_found("Client", client_id))
    }
}
