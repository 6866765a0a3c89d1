//! Group manager tests (using WireMock)

mod common;

use common::{group_list, test_session};
use pretty_assertions::assert_eq;
use serde_json::json;
use uaa_core::UaaError;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_group() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/Groups"))
        .and(header("x-identity-zone-id", "zone-1"))
        .and(body_json(json!({
            "displayName": "app.admin",
            "description": "Application administrators",
            "zoneId": "zone-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "g-1",
            "displayName": "app.admin",
            "description": "Application administrators",
            "zoneId": "zone-1",
            "members": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let group = session
        .group_manager()
        .create_group("app.admin", "Application administrators", "zone-1")
        .await
        .unwrap();

    assert_eq!(group.id, "g-1");
    assert_eq!(group.zone_id, "zone-1");
}

#[tokio::test]
async fn test_create_group_conflict() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/Groups"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "scim_resource_already_exists",
            "error_description": "A group with displayName: app.admin already exists."
        })))
        .mount(&mock_server)
        .await;

    let err = session
        .group_manager()
        .create_group("app.admin", "", "uaa")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "group app.admin already exists");
}

#[tokio::test]
async fn test_update_group_sends_if_match() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("PUT"))
        .and(path("/Groups/g-1"))
        .and(header("if-match", "*"))
        .and(header("x-identity-zone-id", "uaa"))
        .and(body_json(json!({
            "displayName": "app.admins",
            "description": "renamed"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g-1",
            "displayName": "app.admins",
            "description": "renamed"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let group = session
        .group_manager()
        .update_group("g-1", "app.admins", "renamed", "uaa")
        .await
        .unwrap();

    assert_eq!(group.display_name, "app.admins");
}

#[tokio::test]
async fn test_list_groups() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/Groups"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(group_list(&[("g-1", "openid"), ("g-2", "scim.read")])),
        )
        .mount(&mock_server)
        .await;

    let groups = session.group_manager().list_groups("uaa").await.unwrap();

    let names: Vec<_> = groups.iter().map(|g| g.display_name.as_str()).collect();
    assert_eq!(names, vec!["openid", "scim.read"]);
}

#[tokio::test]
async fn test_find_by_display_name_returns_first() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/Groups"))
        .and(query_param("filter", "displayName Eq \"scim.read\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(group_list(&[("g-2", "scim.read"), ("g-3", "scim.read")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let group = session
        .group_manager()
        .find_by_display_name("scim.read", "uaa")
        .await
        .unwrap();

    assert_eq!(group.id, "g-2");
}

#[tokio::test]
async fn test_find_by_display_name_not_found() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/Groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(group_list(&[])))
        .mount(&mock_server)
        .await;

    let err = session
        .group_manager()
        .find_by_display_name("does-not-exist", "uaa")
        .await
        .unwrap_err();

    assert!(matches!(err, UaaError::NotFound { .. }));
    assert!(err.to_string().contains("does-not-exist"));
}

#[tokio::test]
async fn test_get_group_404_passes_through() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/Groups/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = session
        .group_manager()
        .get_group("missing", "uaa")
        .await
        .unwrap_err();

    assert!(matches!(err, UaaError::Http { .. }));
}

#[tokio::test]
async fn test_delete_group() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("DELETE"))
        .and(path("/Groups/g-1"))
        .and(header("x-identity-zone-id", "zone-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "g-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    session
        .group_manager()
        .delete_group("g-1", "zone-1")
        .await
        .unwrap();
}
