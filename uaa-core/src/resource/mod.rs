//! Declarative resource handlers
//!
//! Each resource type maps a typed model onto the API managers of a
//! [`Session`]. The host runtime owns state and diffing; it hands a
//! [`ResourceData`] snapshot to a callback and persists whatever the callback
//! leaves in `id` and `desired`.

pub mod client;
pub mod group;
pub mod identity_zone;
pub mod user;

pub use client::{ClientDataSource, ClientModel, ClientResource};
pub use group::{GroupDataSource, GroupModel, GroupResource};
pub use identity_zone::{IdentityZoneDataSource, IdentityZoneModel, IdentityZoneResource};
pub use user::{UserDataSource, UserModel, UserResource};

use crate::api::Session;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Snapshot of one resource instance.
///
/// `prior` is the last persisted state (absent on create). Callbacks write the
/// resulting server state back into `desired`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceData<T> {
    pub id: String,
    pub prior: Option<T>,
    pub desired: T,
}

impl<T> ResourceData<T> {
    /// Instance that does not exist yet
    pub fn new(desired: T) -> Self {
        Self {
            id: String::new(),
            prior: None,
            desired,
        }
    }

    /// Existing instance with no pending change
    pub fn existing(id: impl Into<String>, state: T) -> Self
    where
        T: Clone,
    {
        Self {
            id: id.into(),
            prior: Some(state.clone()),
            desired: state,
        }
    }

    /// Existing instance moving from `prior` to `desired`
    pub fn planned(id: impl Into<String>, prior: T, desired: T) -> Self {
        Self {
            id: id.into(),
            prior: Some(prior),
            desired,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// Desired value of a field; sets `modified` when it differs from the prior
    /// state or there is no prior state.
    pub fn changed_value<V, F>(&self, field: F, modified: &mut bool) -> V
    where
        V: PartialEq + Clone,
        F: Fn(&T) -> &V,
    {
        let desired = field(&self.desired);
        let changed = match &self.prior {
            Some(prior) => field(prior) != desired,
            None => true,
        };
        if changed {
            *modified = true;
        }
        desired.clone()
    }

    /// `(old, new)` when the field changed. A missing prior state counts as
    /// the field's default value.
    pub fn change<V, F>(&self, field: F) -> Option<(V, V)>
    where
        V: PartialEq + Clone + Default,
        F: Fn(&T) -> &V,
    {
        let old = self
            .prior
            .as_ref()
            .map(|prior| field(prior).clone())
            .unwrap_or_default();
        let new = field(&self.desired).clone();

        (old != new).then_some((old, new))
    }
}

/// `(to_delete, to_add)`: entries only in `old`, then entries only in `new`.
pub fn list_changes(old: &BTreeSet<String>, new: &BTreeSet<String>) -> (Vec<String>, Vec<String>) {
    let to_delete = old.difference(new).cloned().collect();
    let to_add = new.difference(old).cloned().collect();
    (to_delete, to_add)
}

/// Lifecycle callbacks for one resource type
#[async_trait]
pub trait Resource: Send + Sync {
    type Model: Clone + Send + Sync;

    /// Checks that run before any request is made
    fn validate(&self, _model: &Self::Model) -> Result<()> {
        Ok(())
    }

    async fn create(&self, session: &Session, data: &mut ResourceData<Self::Model>) -> Result<()>;

    async fn read(&self, session: &Session, data: &mut ResourceData<Self::Model>) -> Result<()>;

    async fn update(&self, session: &Session, data: &mut ResourceData<Self::Model>) -> Result<()>;

    async fn delete(&self, session: &Session, data: &ResourceData<Self::Model>) -> Result<()>;
}

/// Read-only lookup by natural key.
///
/// The key is taken from `desired`; on success `id` is set and `desired` holds
/// the server state.
#[async_trait]
pub trait DataSource: Send + Sync {
    type Model: Clone + Send + Sync;

    async fn read(&self, session: &Session, data: &mut ResourceData<Self::Model>) -> Result<()>;
}

/// Copy `src` into `dst` unless it is empty
pub(crate) fn set_if_present(dst: &mut String, src: &str) {
    if !src.is_empty() {
        *dst = src.to_string();
    }
}
