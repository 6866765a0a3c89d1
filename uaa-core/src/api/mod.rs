//! UAA API client
//!
//! A [`Session`] authenticates once with client credentials and hands out
//! managers for clients, groups, users and identity zones. All managers share
//! one [`UaaApi`] request builder.

pub mod auth;
pub mod client_manager;
pub mod group_cache;
pub mod group_manager;
pub mod headers;
pub mod identity_zone_manager;
pub mod session;
pub mod types;
pub mod uaa_api;
pub mod user_manager;

pub use auth::AuthManager;
pub use client_manager::ClientManager;
pub use group_cache::{GroupCache, ZoneGroups};
pub use group_manager::GroupManager;
pub use headers::ApiHeader;
pub use identity_zone_manager::IdentityZoneManager;
pub use session::Session;
pub use types::*;
pub use uaa_api::UaaApi;
pub use user_manager::{UserManager, UserProfile};

/// URL-encoded SCIM equality filter: `attribute Eq "value"`
pub fn scim_filter(attribute: &str, value: &str) -> String {
    urlencoding::encode(&format!("{} Eq \"{}\"", attribute, value)).into_owned()
}
