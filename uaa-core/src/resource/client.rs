//! OAuth client resource

use super::{DataSource, Resource, ResourceData};
use crate::api::{Session, UaaClient};
use crate::error::Result;
use async_trait::async_trait;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;
use validator::{Validate, ValidationError};

/// Zone used when a client does not name one; UAA never echoes it back.
pub const DEFAULT_ZONE_ID: &str = "uaa";

const CLIENT_CREDENTIALS: &str = "client_credentials";

#[derive(Clone, Default, PartialEq, Validate)]
#[validate(schema(function = "validate_client_secret"))]
pub struct ClientModel {
    #[validate(length(min = 1, message = "Client id is required"))]
    pub client_id: String,
    pub client_secret: String,
    pub authorized_grant_types: BTreeSet<String>,
    pub redirect_uri: BTreeSet<String>,
    pub scope: BTreeSet<String>,
    pub resource_ids: BTreeSet<String>,
    pub authorities: BTreeSet<String>,
    pub autoapprove: BTreeSet<String>,
    pub access_token_validity: i64,
    pub refresh_token_validity: i64,
    pub allowed_providers: BTreeSet<String>,
    pub name: String,
    pub token_salt: String,
    pub created_with: String,
    pub approvals_deleted: bool,
    pub required_user_groups: BTreeSet<String>,
    pub zone_id: String,
}

fn validate_client_secret(model: &ClientModel) -> std::result::Result<(), ValidationError> {
    if model.authorized_grant_types.contains(CLIENT_CREDENTIALS) && model.client_secret.is_empty() {
        return Err(ValidationError::new("client_secret_required").with_message(Cow::Borrowed(
            "Client secret is required for client_credentials",
        )));
    }
    Ok(())
}

impl ClientModel {
    pub fn zone_id(&self) -> &str {
        if self.zone_id.is_empty() {
            DEFAULT_ZONE_ID
        } else {
            &self.zone_id
        }
    }

    pub fn to_api(&self) -> UaaClient {
        UaaClient {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            authorized_grant_types: to_vec(&self.authorized_grant_types),
            redirect_uri: to_vec(&self.redirect_uri),
            scope: to_vec(&self.scope),
            resource_ids: to_vec(&self.resource_ids),
            authorities: to_vec(&self.authorities),
            autoapprove: to_vec(&self.autoapprove),
            access_token_validity: self.access_token_validity,
            refresh_token_validity: self.refresh_token_validity,
            allowed_providers: to_vec(&self.allowed_providers),
            name: self.name.clone(),
            token_salt: self.token_salt.clone(),
            created_with: self.created_with.clone(),
            approvals_deleted: self.approvals_deleted,
            required_user_groups: to_vec(&self.required_user_groups),
            last_modified: 0,
        }
    }

    /// Overwrite everything the server reports. The secret and zone are kept,
    /// and sentinel values read back as empty sets.
    pub fn apply(&mut self, client: &UaaClient) {
        self.client_id = client.client_id.clone();
        self.authorized_grant_types = to_set(&client.authorized_grant_types);
        self.redirect_uri = to_set(&client.redirect_uri);
        self.scope = if client.has_default_scope() {
            BTreeSet::new()
        } else {
            to_set(&client.scope)
        };
        self.resource_ids = if client.has_default_resource_ids() {
            BTreeSet::new()
        } else {
            to_set(&client.resource_ids)
        };
        self.authorities = if client.has_default_authorities() {
            BTreeSet::new()
        } else {
            to_set(&client.authorities)
        };
        self.autoapprove = to_set(&client.autoapprove);
        self.access_token_validity = client.access_token_validity;
        self.refresh_token_validity = client.refresh_token_validity;
        self.allowed_providers = to_set(&client.allowed_providers);
        self.name = client.name.clone();
        self.token_salt = client.token_salt.clone();
        self.created_with = client.created_with.clone();
        self.approvals_deleted = client.approvals_deleted;
        self.required_user_groups = to_set(&client.required_user_groups);
    }

    /// Same model with the fields that are not part of the client record cleared
    fn settings(&self) -> ClientModel {
        ClientModel {
            client_secret: String::new(),
            zone_id: String::new(),
            ..self.clone()
        }
    }
}

impl fmt::Debug for ClientModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientModel")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("authorized_grant_types", &self.authorized_grant_types)
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("resource_ids", &self.resource_ids)
            .field("authorities", &self.authorities)
            .field("autoapprove", &self.autoapprove)
            .field("access_token_validity", &self.access_token_validity)
            .field("refresh_token_validity", &self.refresh_token_validity)
            .field("allowed_providers", &self.allowed_providers)
            .field("name", &self.name)
            .field("created_with", &self.created_with)
            .field("approvals_deleted", &self.approvals_deleted)
            .field("required_user_groups", &self.required_user_groups)
            .field("zone_id", &self.zone_id)
            .finish_non_exhaustive()
    }
}

fn to_vec(values: &BTreeSet<String>) -> Vec<String> {
    values.iter().cloned().collect()
}

fn to_set(values: &[String]) -> BTreeSet<String> {
    values.iter().cloned().collect()
}

pub struct ClientResource;

#[async_trait]
impl Resource for ClientResource {
    type Model = ClientModel;

    fn validate(&self, model: &ClientModel) -> Result<()> {
        model.validate()?;
        Ok(())
    }

    async fn create(&self, session: &Session, data: &mut ResourceData<ClientModel>) -> Result<()> {
        self.validate(&data.desired)?;

        let zone_id = data.desired.zone_id().to_string();
        let created = session
            .client_manager()
            .create(&data.desired.to_api(), &zone_id)
            .await?;

        data.id = created.client_id;
        data.desired.zone_id = zone_id;

        self.read(session, data).await
    }

    async fn read(&self, session: &Session, data: &mut ResourceData<ClientModel>) -> Result<()> {
        let client = session
            .client_manager()
            .get_client(&data.id, data.desired.zone_id())
            .await?;

        debug!(client_id = %client.client_id, "Client retrieved");
        data.desired.apply(&client);
        Ok(())
    }

    async fn update(&self, session: &Session, data: &mut ResourceData<ClientModel>) -> Result<()> {
        self.validate(&data.desired)?;

        let zone_id = data.desired.zone_id().to_string();
        let manager = session.client_manager();

        let settings_changed = data
            .prior
            .as_ref()
            .map_or(true, |prior| prior.settings() != data.desired.settings());

        if settings_changed {
            let mut client = data.desired.to_api();
            client.client_id = data.id.clone();
            client.client_secret.clear();
            manager.update_client(&client, &zone_id).await?;
            debug!(client_id = %data.id, "Client updated");
        }

        // UAA rejects an empty secret, so clearing it is not a rotation.
        if let Some((old_secret, new_secret)) = data
            .change(|m| &m.client_secret)
            .filter(|(_, new_secret)| !new_secret.is_empty())
        {
            manager
                .change_secret(&data.id, Some(&old_secret), &new_secret, &zone_id)
                .await?;
            debug!(client_id = %data.id, "Client secret changed");
        }

        self.read(session, data).await
    }

    async fn delete(&self, session: &Session, data: &ResourceData<ClientModel>) -> Result<()> {
        session
            .client_manager()
            .delete_client(&data.id, data.desired.zone_id())
            .await
    }
}

/// Looks a client up by `client_id`
pub struct ClientDataSource;

#[async_trait]
impl DataSource for ClientDataSource {
    type Model = ClientModel;

    async fn read(&self, session: &Session, data: &mut ResourceData<ClientModel>) -> Result<()> {
        let client = session
            .client_manager()
            .find_by_client_id(&data.desired.client_id, data.desired.zone_id())
            .await?;

        data.id = client.client_id.clone();
        data.desired.apply(&client);
        Ok(())
    }
}
