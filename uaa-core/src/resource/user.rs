//! SCIM user resource, including group membership

use super::{list_changes, set_if_present, DataSource, Resource, ResourceData};
use crate::api::{Session, UaaUser, UserManager, UserProfile};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

/// Origin of users managed by UAA itself
pub const DEFAULT_ORIGIN: &str = "uaa";

#[derive(Clone, Default, PartialEq)]
pub struct UserModel {
    pub username: String,
    pub password: String,
    pub origin: String,
    pub given_name: String,
    pub family_name: String,
    /// Defaults to the username on create
    pub email: String,
    /// Group display names, excluding the zone's default groups
    pub groups: BTreeSet<String>,
    pub zone_id: String,
}

impl UserModel {
    pub fn origin(&self) -> &str {
        if self.origin.is_empty() {
            DEFAULT_ORIGIN
        } else {
            &self.origin
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            given_name: self.given_name.clone(),
            family_name: self.family_name.clone(),
            email: self.email.clone(),
        }
    }

    /// Overwrite the profile fields with what the server reports. Groups and
    /// password are left alone.
    pub fn apply(&mut self, user: &UaaUser) {
        self.username = user.username.clone();
        self.origin = user.origin.clone();
        self.given_name = user.name.given_name.clone();
        self.family_name = user.name.family_name.clone();
        self.email = user.primary_email().unwrap_or_default().to_string();
        set_if_present(&mut self.zone_id, &user.zone_id);
    }
}

impl fmt::Debug for UserModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserModel")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("origin", &self.origin)
            .field("given_name", &self.given_name)
            .field("family_name", &self.family_name)
            .field("email", &self.email)
            .field("groups", &self.groups)
            .field("zone_id", &self.zone_id)
            .finish()
    }
}

/// Membership of `user` minus the zone's default groups
async fn extra_groups(
    manager: &UserManager,
    user: &UaaUser,
    zone_id: &str,
) -> Result<BTreeSet<String>> {
    let mut groups = BTreeSet::new();
    for group in &user.groups {
        if !manager.is_default_group(zone_id, &group.display).await? {
            groups.insert(group.display.clone());
        }
    }
    Ok(groups)
}

async fn sync_roles(manager: &UserManager, data: &ResourceData<UserModel>) -> Result<()> {
    let empty = BTreeSet::new();
    let old_groups = data.prior.as_ref().map_or(&empty, |prior| &prior.groups);
    let (to_delete, to_add) = list_changes(old_groups, &data.desired.groups);

    if to_delete.is_empty() && to_add.is_empty() {
        return Ok(());
    }

    manager
        .update_roles(
            &data.id,
            &to_delete,
            &to_add,
            data.desired.origin(),
            &data.desired.zone_id,
        )
        .await
}

pub struct UserResource;

#[async_trait]
impl Resource for UserResource {
    type Model = UserModel;

    async fn create(&self, session: &Session, data: &mut ResourceData<UserModel>) -> Result<()> {
        if data.desired.email.is_empty() {
            data.desired.email = data.desired.username.clone();
        }

        let manager = session.user_manager();
        let desired = &data.desired;
        let user = manager
            .create_user(
                &desired.profile(),
                &desired.password,
                desired.origin(),
                &desired.zone_id,
            )
            .await?;

        debug!(user_id = %user.id, username = %user.username, "New user created");

        data.id = user.id.clone();
        set_if_present(&mut data.desired.zone_id, &user.zone_id);

        sync_roles(manager, data).await
    }

    async fn read(&self, session: &Session, data: &mut ResourceData<UserModel>) -> Result<()> {
        let manager = session.user_manager();
        let zone_id = data.desired.zone_id.clone();

        // A cleared id tells the host the user is gone and must be recreated.
        let user = match manager.get_user(&data.id, &zone_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(user_id = %data.id, error = %e, "User read failed, dropping id");
                data.id.clear();
                return Err(e);
            }
        };
        debug!(user_id = %data.id, username = %user.username, "User retrieved");

        data.desired.apply(&user);
        data.desired.groups = extra_groups(manager, &user, &zone_id).await?;
        Ok(())
    }

    async fn update(&self, session: &Session, data: &mut ResourceData<UserModel>) -> Result<()> {
        let manager = session.user_manager();
        let zone_id = data.desired.zone_id.clone();

        let mut modified = false;
        data.changed_value(|m| &m.username, &mut modified);
        data.changed_value(|m| &m.given_name, &mut modified);
        data.changed_value(|m| &m.family_name, &mut modified);
        data.changed_value(|m| &m.email, &mut modified);

        if modified {
            let user = manager
                .update_user(&data.id, &data.desired.profile(), &zone_id)
                .await?;
            debug!(user_id = %data.id, username = %user.username, "User updated");
        }

        if let Some((old_password, new_password)) = data.change(|m| &m.password) {
            let old_password = Some(old_password.as_str()).filter(|p| !p.is_empty());
            manager
                .change_password(&data.id, old_password, &new_password, &zone_id)
                .await?;
            debug!(user_id = %data.id, "User password updated");
        }

        sync_roles(manager, data).await
    }

    /// Failures are logged and swallowed so a user removed out of band does
    /// not block the delete.
    async fn delete(&self, session: &Session, data: &ResourceData<UserModel>) -> Result<()> {
        if let Err(e) = session
            .user_manager()
            .delete_user(&data.id, &data.desired.zone_id)
            .await
        {
            warn!(user_id = %data.id, error = %e, "Ignoring user delete failure");
        }
        Ok(())
    }
}

/// Looks a user up by username
pub struct UserDataSource;

#[async_trait]
impl DataSource for UserDataSource {
    type Model = UserModel;

    async fn read(&self, session: &Session, data: &mut ResourceData<UserModel>) -> Result<()> {
        let user = session
            .user_manager()
            .find_by_username(&data.desired.username, &data.desired.zone_id)
            .await?;

        data.id = user.id.clone();
        data.desired.apply(&user);
        Ok(())
    }
}
