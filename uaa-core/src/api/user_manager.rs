//! SCIM user administration (`/Users`) and group membership

use super::group_cache::{GroupCache, ZoneGroups};
use super::headers::ApiHeader;
use super::identity_zone_manager::IdentityZoneManager;
use super::scim_filter;
use super::types::{GroupMember, ResourceList, UaaGroup, UaaUser, UaaUserEmail, UaaUserName};
use super::uaa_api::UaaApi;
use crate::error::{Result, UaaError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Mutable profile fields of a user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub username: String,
    pub given_name: String,
    pub family_name: String,
    /// Falls back to the username when empty
    pub email: String,
}

impl UserProfile {
    fn to_user(&self) -> UaaUser {
        let email = if self.email.is_empty() {
            self.username.clone()
        } else {
            self.email.clone()
        };

        UaaUser {
            username: self.username.clone(),
            name: UaaUserName {
                given_name: self.given_name.clone(),
                family_name: self.family_name.clone(),
            },
            emails: vec![UaaUserEmail { value: email }],
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct UserManager {
    api: UaaApi,
    identity_zone_manager: IdentityZoneManager,
    client_token: String,
    groups: GroupCache,
}

impl UserManager {
    /// `client_token` is a client-credentials `Authorization` value used for
    /// password changes made without the old password.
    pub fn new(
        api: UaaApi,
        identity_zone_manager: IdentityZoneManager,
        client_token: impl Into<String>,
    ) -> Self {
        Self {
            api,
            identity_zone_manager,
            client_token: client_token.into(),
            groups: GroupCache::new(),
        }
    }

    pub fn group_cache(&self) -> &GroupCache {
        &self.groups
    }

    /// Build the group index and default-group set for `zone_id`.
    ///
    /// No-op once the zone is cached. Nothing is cached when either fetch fails.
    pub async fn load_groups(&self, zone_id: &str) -> Result<Arc<ZoneGroups>> {
        if let Some(groups) = self.groups.get(zone_id).await {
            return Ok(groups);
        }

        let list: ResourceList<UaaGroup> = self.api.with_zone_id(zone_id).get("/Groups").await?;
        let identity_zone = self.identity_zone_manager.find_by_id(zone_id).await?;

        let default_groups = identity_zone
            .config
            .and_then(|c| c.user_config)
            .map(|u| u.default_groups)
            .unwrap_or_default();

        debug!(
            zone_id,
            groups = list.resources.len(),
            default_groups = default_groups.len(),
            "Loaded zone groups"
        );

        let zone_groups = ZoneGroups::new(
            list.resources.into_iter().map(|g| (g.display_name, g.id)),
            default_groups,
        );

        Ok(self.groups.insert(zone_id, zone_groups).await)
    }

    /// Whether `group` is granted to every new user of the zone
    pub async fn is_default_group(&self, zone_id: &str, group: &str) -> Result<bool> {
        Ok(self.load_groups(zone_id).await?.is_default(group))
    }

    pub async fn get_user(&self, id: &str, zone_id: &str) -> Result<UaaUser> {
        self.api
            .with_zone_id(zone_id)
            .get(&format!("/Users/{}", id))
            .await
    }

    /// Create a user; a 409 becomes [`UaaError::AlreadyExists`].
    pub async fn create_user(
        &self,
        profile: &UserProfile,
        password: &str,
        origin: &str,
        zone_id: &str,
    ) -> Result<UaaUser> {
        let user = UaaUser {
            password: password.to_string(),
            origin: origin.to_string(),
            ..profile.to_user()
        };

        let result: Result<UaaUser> = self.api.with_zone_id(zone_id).post("/Users", &user).await;

        match result {
            Err(e) if e.is_conflict() => Err(UaaError::already_exists("user", &profile.username)),
            Err(e) => Err(e),
            Ok(created) => {
                debug!(user_id = %created.id, zone_id, "User created");
                Ok(created)
            }
        }
    }

    /// Full-record profile update, sent with `If-Match: *`
    pub async fn update_user(
        &self,
        id: &str,
        profile: &UserProfile,
        zone_id: &str,
    ) -> Result<UaaUser> {
        self.api
            .with_zone_id(zone_id)
            .with_headers([(ApiHeader::IfMatch.as_str(), "*")])
            .put(&format!("/Users/{}", id), &profile.to_user())
            .await
    }

    pub async fn delete_user(&self, id: &str, zone_id: &str) -> Result<()> {
        self.api
            .with_zone_id(zone_id)
            .delete(&format!("/Users/{}", id))
            .await
    }

    /// Set a new password.
    ///
    /// Without an old password the call is made with the client-credentials
    /// token instead of the session token, which UAA accepts as an
    /// administrative reset.
    pub async fn change_password(
        &self,
        id: &str,
        old_password: Option<&str>,
        new_password: &str,
        zone_id: &str,
    ) -> Result<()> {
        let old_password = old_password.filter(|p| !p.is_empty());

        let mut body = BTreeMap::new();
        body.insert("password", new_password);
        if let Some(old) = old_password {
            body.insert("oldPassword", old);
        }

        let mut api = self.api.with_zone_id(zone_id);
        if old_password.is_none() {
            api = api.with_headers([(ApiHeader::Authorization.as_str(), self.client_token.as_str())]);
        }

        let _: Value = api.put(&format!("/Users/{}/password", id), &body).await?;
        Ok(())
    }

    /// Apply membership changes for a user.
    ///
    /// Every name is resolved against the zone's cached groups before any call
    /// is made, so an unknown group fails the whole update with
    /// [`UaaError::GroupNotFound`] and nothing is changed. Removals run first.
    pub async fn update_roles(
        &self,
        user_id: &str,
        to_delete: &[String],
        to_add: &[String],
        origin: &str,
        zone_id: &str,
    ) -> Result<()> {
        let groups = self.load_groups(zone_id).await?;

        let resolve = |name: &String| -> Result<String> {
            groups
                .group_id(name)
                .map(str::to_string)
                .ok_or_else(|| UaaError::GroupNotFound {
                    zone: zone_id.to_string(),
                    name: name.clone(),
                })
        };

        let delete_ids = to_delete.iter().map(resolve).collect::<Result<Vec<_>>>()?;
        let add_ids = to_add.iter().map(resolve).collect::<Result<Vec<_>>>()?;

        let api = self.api.with_zone_id(zone_id);

        for group_id in &delete_ids {
            api.delete(&format!("/Groups/{}/members/{}", group_id, user_id))
                .await?;
        }

        let member = GroupMember::user(user_id, origin);
        for group_id in &add_ids {
            let _: Value = api
                .post(&format!("/Groups/{}/members", group_id), &member)
                .await?;
        }

        debug!(
            user_id,
            zone_id,
            removed = delete_ids.len(),
            added = add_ids.len(),
            "User roles updated"
        );

        Ok(())
    }

    /// First user whose `userName` matches, or [`UaaError::NotFound`]
    pub async fn find_by_username(&self, username: &str, zone_id: &str) -> Result<UaaUser> {
        let path = format!("/Users?filter={}", scim_filter("userName", username));

        let list: ResourceList<UaaUser> = self.api.with_zone_id(zone_id).get(&path).await?;

        list.resources
            .into_iter()
            .next()
            .ok_or_else(|| UaaError::not_found("User", username))
    }
}

impl fmt::Debug for UserManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserManager")
            .field("api", &self.api)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_email_defaults_to_username() {
        let profile = UserProfile {
            username: "jdoe@example.com".to_string(),
            given_name: "John".to_string(),
            family_name: "Doe".to_string(),
            email: String::new(),
        };

        let user = profile.to_user();
        assert_eq!(user.primary_email(), Some("jdoe@example.com"));
        assert_eq!(user.name.given_name, "John");
        assert!(user.password.is_empty());
    }

    #[test]
    fn test_profile_keeps_explicit_email() {
        let profile = UserProfile {
            username: "jdoe".to_string(),
            email: "john@example.com".to_string(),
            ..Default::default()
        };

        assert_eq!(profile.to_user().primary_email(), Some("john@example.com"));
    }
}
