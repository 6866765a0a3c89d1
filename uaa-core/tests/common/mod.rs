//! Common test utilities
#![allow(dead_code)]

use serde_json::json;
use uaa_core::config::Config;
use uaa_core::Session;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "admin";
pub const CLIENT_SECRET: &str = "admin-secret";
/// `Authorization` value every session request carries
pub const BEARER: &str = "bearer mock-token";

pub fn test_config(base_url: &str) -> Config {
    Config::new(base_url, base_url, CLIENT_ID, CLIENT_SECRET)
}

/// Mock the client-credentials token endpoint
pub async fn mount_token(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "mock-token",
            "token_type": "bearer",
            "expires_in": 43199,
            "scope": "uaa.admin scim.read scim.write",
            "jti": "6b2f0f3e"
        })))
        .mount(mock_server)
        .await;
}

/// Session against `mock_server`, with the token endpoint already mocked
pub async fn test_session(mock_server: &MockServer) -> Session {
    mount_token(mock_server).await;
    Session::new(&test_config(&mock_server.uri()))
        .await
        .expect("session should authenticate against the mock server")
}

pub fn group_list(groups: &[(&str, &str)]) -> serde_json::Value {
    let resources: Vec<_> = groups
        .iter()
        .map(|(id, name)| json!({"id": id, "displayName": name, "zoneId": "uaa"}))
        .collect();

    json!({
        "resources": resources,
        "startIndex": 1,
        "itemsPerPage": 100,
        "totalResults": groups.len(),
        "schemas": ["urn:scim:schemas:core:1.0"]
    })
}

pub fn zone_with_default_groups(zone_id: &str, default_groups: &[&str]) -> serde_json::Value {
    json!({
        "id": zone_id,
        "subdomain": "",
        "name": zone_id,
        "active": true,
        "config": {
            "userConfig": {"defaultGroups": default_groups}
        }
    })
}

/// Mock the two lookups behind the user manager's group cache
pub async fn mount_zone_groups(
    mock_server: &MockServer,
    zone_id: &str,
    groups: &[(&str, &str)],
    default_groups: &[&str],
) {
    Mock::given(method("GET"))
        .and(path("/Groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(group_list(groups)))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/identity-zones/{}", zone_id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(zone_with_default_groups(zone_id, default_groups)),
        )
        .mount(mock_server)
        .await;
}
