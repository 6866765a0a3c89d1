//! Identity zone manager tests (using WireMock)

mod common;

use common::test_session;
use pretty_assertions::assert_eq;
use serde_json::json;
use uaa_core::api::IdentityZone;
use uaa_core::UaaError;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn zone_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "subdomain": id,
        "name": name,
        "active": true,
        "config": {
            "tokenPolicy": {
                "accessTokenValidity": 3600,
                "refreshTokenValidity": 7200,
                "jwtRevocable": false,
                "refreshTokenUnique": false,
                "refreshTokenFormat": "jwt",
                "activeKeyId": null
            },
            "samlConfig": {
                "assertionSigned": true,
                "requestSigned": true,
                "wantAssertionSigned": true,
                "wantAuthnRequestSigned": false,
                "assertionTimeToLiveSeconds": 600,
                "entityID": "zone.example.com",
                "keys": {}
            },
            "links": {
                "logout": {
                    "redirectUrl": "/login",
                    "redirectParameterName": "redirect",
                    "whitelist": null
                },
                "homeRedirect": null,
                "selfService": {
                    "selfServiceLinksEnabled": true,
                    "signup": null,
                    "passwd": null
                }
            },
            "prompts": [
                {"name": "username", "type": "text", "text": "Email"},
                {"name": "password", "type": "password", "text": "Password"}
            ],
            "idpDiscoveryEnabled": false,
            "accountChooserEnabled": false,
            "userConfig": {"defaultGroups": ["openid", "uaa.user"]},
            "MfaConfig": {"enabled": false, "identityProviders": ["uaa", "ldap"]}
        },
        "created": 1577836800000i64,
        "last_modified": 1577836800000i64
    })
}

#[tokio::test]
async fn test_find_by_id_decodes_nested_config() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/identity-zones/zone-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_json("zone-1", "Zone One")))
        .mount(&mock_server)
        .await;

    let zone = session
        .identity_zone_manager()
        .find_by_id("zone-1")
        .await
        .unwrap();

    let config = zone.config.unwrap();
    assert_eq!(zone.name, "Zone One");
    assert_eq!(config.input_prompts.len(), 2);
    assert_eq!(config.input_prompts[1].prompt_type, "password");
    assert_eq!(config.token_policy.unwrap().access_token_ttl, Some(3600));
    assert_eq!(config.saml.unwrap().entity_id, "zone.example.com");
    assert_eq!(
        config.user_config.unwrap().default_groups,
        vec!["openid".to_string(), "uaa.user".to_string()]
    );
    assert!(config.links.unwrap().self_service.unwrap().enabled);
}

#[tokio::test]
async fn test_find_by_name_requires_exact_match() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/identity-zones"))
        .and(query_param("filter", "name Eq \"zone\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            zone_json("zone-a", "zone-a"),
            zone_json("zone-b", "zone")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let zone = session
        .identity_zone_manager()
        .find_by_name("zone")
        .await
        .unwrap();

    assert_eq!(zone.id, "zone-b");
}

#[tokio::test]
async fn test_find_by_name_partial_matches_are_not_found() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/identity-zones"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([zone_json("zone-a", "zone-abc")])),
        )
        .mount(&mock_server)
        .await;

    let err = session
        .identity_zone_manager()
        .find_by_name("zone")
        .await
        .unwrap_err();

    assert!(matches!(err, UaaError::NotFound { .. }));
    assert_eq!(err.to_string(), "Identity Zone zone not found");
}

#[tokio::test]
async fn test_create_zone_conflict_keyed_by_name() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/identity-zones"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "conflict",
            "error_description": "The identity zone subdomain is taken."
        })))
        .mount(&mock_server)
        .await;

    let zone = IdentityZone {
        name: "Zone One".to_string(),
        sub_domain: "zone1".to_string(),
        is_active: true,
        ..Default::default()
    };

    let err = session
        .identity_zone_manager()
        .create(&zone)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        UaaError::AlreadyExists { ref key, .. } if key == "Zone One"
    ));
}

#[tokio::test]
async fn test_update_and_delete_zone() {
    let mock_server = MockServer::start().await;
    let session = test_session(&mock_server).await;

    Mock::given(method("PUT"))
        .and(path("/identity-zones/zone-1"))
        .and(body_partial_json(json!({"id": "zone-1", "name": "Renamed", "active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_json("zone-1", "Renamed")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/identity-zones/zone-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_json("zone-1", "Renamed")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let zone = IdentityZone {
        id: "zone-1".to_string(),
        name: "Renamed".to_string(),
        sub_domain: "zone-1".to_string(),
        is_active: false,
        config: None,
    };

    let manager = session.identity_zone_manager();
    let updated = manager.update("zone-1", &zone).await.unwrap();
    assert_eq!(updated.name, "Renamed");

    manager.delete("zone-1").await.unwrap();
}
