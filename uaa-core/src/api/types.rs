//! UAA API type definitions
//!
//! Wire representations for clients, groups, users and identity zones. Field
//! names follow the UAA JSON documents; empty values are omitted on the way
//! out so partial records can be sent as full-record updates.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Scope value UAA reports for a client without scopes
pub const DEFAULT_SCOPE: &str = "uaa.none";
/// Authority value UAA reports for a client without authorities
pub const DEFAULT_AUTHORITY: &str = "uaa.none";
/// Resource id UAA reports for a client without resource ids
pub const DEFAULT_RESOURCE_ID: &str = "none";

/// True only for exactly `[sentinel]`.
pub fn is_sentinel_list(values: &[String], sentinel: &str) -> bool {
    values.len() == 1 && values[0] == sentinel
}

/// Generic `{ "resources": [...] }` list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceList<T> {
    #[serde(default = "Vec::new")]
    pub resources: Vec<T>,
}

// ==================== Clients ====================

/// OAuth client registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UaaClient {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub client_secret: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub authorized_grant_types: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub redirect_uri: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub resource_ids: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub authorities: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub autoapprove: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub access_token_validity: i64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub refresh_token_validity: i64,
    #[serde(
        rename = "allowedproviders",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_providers: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub token_salt: String,
    #[serde(
        rename = "createdwith",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub created_with: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_false")]
    pub approvals_deleted: bool,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub required_user_groups: Vec<String>,
    #[serde(
        rename = "lastModified",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "is_zero"
    )]
    pub last_modified: i64,
}

impl UaaClient {
    pub fn has_default_scope(&self) -> bool {
        is_sentinel_list(&self.scope, DEFAULT_SCOPE)
    }

    pub fn has_default_authorities(&self) -> bool {
        is_sentinel_list(&self.authorities, DEFAULT_AUTHORITY)
    }

    pub fn has_default_resource_ids(&self) -> bool {
        is_sentinel_list(&self.resource_ids, DEFAULT_RESOURCE_ID)
    }
}

// ==================== Groups ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UaaGroup {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub zone_id: String,
}

/// Body for `POST /Groups/{id}/members`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub origin: String,
    #[serde(rename = "type")]
    pub member_type: String,
    pub value: String,
}

impl GroupMember {
    pub fn user(user_id: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            member_type: "USER".to_string(),
            value: user_id.into(),
        }
    }
}

// ==================== Users ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UaaUser {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(
        rename = "userName",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub username: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub origin: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: UaaUserName,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<UaaUserEmail>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<UaaUserGroup>,
    #[serde(
        rename = "zoneId",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub zone_id: String,
}

impl UaaUser {
    /// First email is the canonical one
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(|e| e.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UaaUserName {
    #[serde(default, deserialize_with = "nullable")]
    pub given_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub family_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UaaUserEmail {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UaaUserGroup {
    #[serde(default, deserialize_with = "nullable")]
    pub value: String,
    #[serde(default, deserialize_with = "nullable")]
    pub display: String,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub group_type: String,
}

// ==================== Identity zones ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityZone {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "active", default, deserialize_with = "nullable")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(
        rename = "subdomain",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub sub_domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<IdentityZoneConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityZoneConfig {
    #[serde(default, deserialize_with = "nullable")]
    pub account_chooser_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branding: Option<BrandingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret_policy: Option<ClientSecretPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_policy: Option<CorsPolicy>,
    #[serde(default, deserialize_with = "nullable")]
    pub idp_discovery_enabled: bool,
    #[serde(
        rename = "prompts",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub input_prompts: Vec<InputPrompt>,
    #[serde(
        rename = "issuer",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub issuer_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(rename = "MfaConfig", default, skip_serializing_if = "Option::is_none")]
    pub mfa_config: Option<MfaConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_policy: Option<TokenPolicy>,
    #[serde(rename = "samlConfig", default, skip_serializing_if = "Option::is_none")]
    pub saml: Option<SamlConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_config: Option<UserConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<BrandingBanner>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub company_name: String,
    #[serde(
        rename = "productLogo",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub company_logo: String,
    #[serde(
        rename = "squareLogo",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub favicon: String,
    #[serde(
        rename = "footerLegalText",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub footer_text: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "BTreeMap::is_empty")]
    pub footer_links: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingBanner {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub background_color: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub logo: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub text_color: String,
    #[serde(
        rename = "link",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub url: String,
}

/// Client secret complexity rules; `None` leaves the server default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSecretPolicy {
    #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(rename = "minLength", default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(
        rename = "requireUpperCaseCharacter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_upper_case_character: Option<i64>,
    #[serde(
        rename = "requireLowerCaseCharacter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_lower_case_character: Option<i64>,
    #[serde(rename = "requireDigit", default, skip_serializing_if = "Option::is_none")]
    pub min_digit: Option<i64>,
    #[serde(
        rename = "requireSpecialCharacter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_special_character: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_configuration: Option<CorsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xhr_configuration: Option<CorsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsConfig {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub allowed_origins: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub allowed_origin_patterns: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub allowed_uris: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub allowed_uri_patterns: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub allowed_headers: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub allowed_methods: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub allowed_credentials: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenPolicy {
    #[serde(rename = "accessTokenValidity", default, skip_serializing_if = "Option::is_none")]
    pub access_token_ttl: Option<i64>,
    #[serde(rename = "refreshTokenValidity", default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_ttl: Option<i64>,
    #[serde(rename = "jwtRevocable", default, deserialize_with = "nullable")]
    pub is_jwt_revocable: bool,
    #[serde(rename = "refreshTokenUnique", default, deserialize_with = "nullable")]
    pub is_refresh_token_unique: bool,
    #[serde(
        rename = "refreshTokenFormat",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub refresh_token_format: String,
    #[serde(
        rename = "activeKeyId",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub active_key_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamlConfig {
    #[serde(
        rename = "activeKeyId",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub active_key_id: String,
    #[serde(
        rename = "assertionTimeToLiveSeconds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub assertion_ttl_seconds: Option<i64>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub certificate: String,
    #[serde(rename = "disableInResponseToCheck", default, deserialize_with = "nullable")]
    pub disable_in_response_to_check: bool,
    #[serde(
        rename = "entityID",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub entity_id: String,
    #[serde(rename = "assertionSigned", default, deserialize_with = "nullable")]
    pub is_assertion_signed: bool,
    #[serde(rename = "requestSigned", default, deserialize_with = "nullable")]
    pub is_request_signed: bool,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "BTreeMap::is_empty")]
    pub keys: BTreeMap<String, SamlKey>,
    #[serde(rename = "wantAssertionSigned", default, deserialize_with = "nullable")]
    pub want_assertion_signed: bool,
    #[serde(rename = "wantAuthnRequestSigned", default, deserialize_with = "nullable")]
    pub want_authn_request_signed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamlKey {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub certificate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub home_redirect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logout: Option<LogoutLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_service: Option<SelfServiceLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutLinks {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub redirect_url: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub redirect_parameter_name: String,
    /// Always sent; UAA treats a missing whitelist differently from an empty one
    #[serde(rename = "whitelist", default, deserialize_with = "nullable")]
    pub allowed_redirect_urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfServiceLinks {
    #[serde(rename = "selfServiceLinksEnabled", default, deserialize_with = "nullable")]
    pub enabled: bool,
    #[serde(
        rename = "signup",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub signup_url: String,
    #[serde(
        rename = "passwd",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub password_reset_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputPrompt {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub prompt_type: String,
    #[serde(
        rename = "text",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub default_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaConfig {
    #[serde(rename = "enabled", default, deserialize_with = "nullable")]
    pub is_enabled: bool,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub identity_providers: Vec<String>,
}

/// UAA sends explicit `null` for unset fields; treat it like a missing one.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}
