//! Identity zone administration (`/identity-zones`)

use super::scim_filter;
use super::types::IdentityZone;
use super::uaa_api::UaaApi;
use crate::error::{Result, UaaError};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct IdentityZoneManager {
    api: UaaApi,
}

impl IdentityZoneManager {
    pub fn new(api: UaaApi) -> Self {
        Self { api }
    }

    /// Create a zone; a 409 becomes [`UaaError::AlreadyExists`] keyed by name.
    pub async fn create(&self, identity_zone: &IdentityZone) -> Result<IdentityZone> {
        let result: Result<IdentityZone> = self.api.post("/identity-zones", identity_zone).await;

        match result {
            Err(e) if e.is_conflict() => {
                Err(UaaError::already_exists("identity zone", &identity_zone.name))
            }
            Err(e) => Err(e),
            Ok(created) => {
                debug!(zone_id = %created.id, name = %created.name, "Identity zone created");
                Ok(created)
            }
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<IdentityZone> {
        self.api.get(&format!("/identity-zones/{}", id)).await
    }

    /// Zone whose name equals `name` exactly.
    ///
    /// The server filter is not trusted to be exact, so the result list is
    /// checked again here.
    pub async fn find_by_name(&self, name: &str) -> Result<IdentityZone> {
        let path = format!("/identity-zones?filter={}", scim_filter("name", name));

        let zones: Vec<IdentityZone> = self.api.get(&path).await?;

        zones
            .into_iter()
            .find(|zone| zone.name == name)
            .ok_or_else(|| UaaError::not_found("Identity Zone", name))
    }

    pub async fn update(&self, id: &str, identity_zone: &IdentityZone) -> Result<IdentityZone> {
        self.api
            .put(&format!("/identity-zones/{}", id), identity_zone)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&format!("/identity-zones/{}", id)).await
    }
}
