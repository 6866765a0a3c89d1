//! SCIM group administration (`/Groups`)

use super::headers::ApiHeader;
use super::scim_filter;
use super::types::{ResourceList, UaaGroup};
use super::uaa_api::UaaApi;
use crate::error::{Result, UaaError};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GroupManager {
    api: UaaApi,
}

impl GroupManager {
    pub fn new(api: UaaApi) -> Self {
        Self { api }
    }

    /// Create an empty group; a 409 becomes [`UaaError::AlreadyExists`].
    pub async fn create_group(
        &self,
        display_name: &str,
        description: &str,
        zone_id: &str,
    ) -> Result<UaaGroup> {
        let group = UaaGroup {
            display_name: display_name.to_string(),
            description: description.to_string(),
            zone_id: zone_id.to_string(),
            ..Default::default()
        };

        let result: Result<UaaGroup> = self.api.with_zone_id(zone_id).post("/Groups", &group).await;

        match result {
            Err(e) if e.is_conflict() => Err(UaaError::already_exists("group", display_name)),
            Err(e) => Err(e),
            Ok(created) => {
                debug!(group_id = %created.id, display_name, zone_id, "Group created");
                Ok(created)
            }
        }
    }

    pub async fn get_group(&self, id: &str, zone_id: &str) -> Result<UaaGroup> {
        self.api
            .with_zone_id(zone_id)
            .get(&format!("/Groups/{}", id))
            .await
    }

    /// Every group in the zone
    pub async fn list_groups(&self, zone_id: &str) -> Result<Vec<UaaGroup>> {
        let list: ResourceList<UaaGroup> = self.api.with_zone_id(zone_id).get("/Groups").await?;
        Ok(list.resources)
    }

    /// Full-record update. `If-Match: *` is sent unconditionally, so the last
    /// writer wins.
    pub async fn update_group(
        &self,
        id: &str,
        display_name: &str,
        description: &str,
        zone_id: &str,
    ) -> Result<UaaGroup> {
        let group = UaaGroup {
            display_name: display_name.to_string(),
            description: description.to_string(),
            ..Default::default()
        };

        self.api
            .with_zone_id(zone_id)
            .with_headers([(ApiHeader::IfMatch.as_str(), "*")])
            .put(&format!("/Groups/{}", id), &group)
            .await
    }

    pub async fn delete_group(&self, id: &str, zone_id: &str) -> Result<()> {
        self.api
            .with_zone_id(zone_id)
            .delete(&format!("/Groups/{}", id))
            .await
    }

    /// First group whose `displayName` matches, or [`UaaError::NotFound`]
    pub async fn find_by_display_name(&self, display_name: &str, zone_id: &str) -> Result<UaaGroup> {
        let path = format!("/Groups?filter={}", scim_filter("displayName", display_name));

        let list: ResourceList<UaaGroup> = self.api.with_zone_id(zone_id).get(&path).await?;

        list.resources
            .into_iter()
            .next()
            .ok_or_else(|| UaaError::not_found("Group", display_name))
    }
}
