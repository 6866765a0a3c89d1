//! Flattened identity zone representation used by the resource layer

use crate::api::ClientSecretPolicy;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_REFRESH_TOKEN_FORMAT: &str = "jwt";
pub const DEFAULT_PROMPT_TYPE: &str = "text";

#[derive(Debug, Clone, PartialEq)]
pub struct IdentityZoneModel {
    pub name: String,
    pub sub_domain: String,
    pub is_active: bool,
    pub account_chooser_enabled: bool,
    pub idp_discovery_enabled: bool,
    pub issuer_url: String,
    pub home_redirect_url: String,
    pub logout_redirect_url: String,
    pub logout_redirect_param: String,
    pub logout_allowed_redirect_urls: BTreeSet<String>,
    pub self_serve_enabled: bool,
    pub self_serve_signup_url: String,
    pub self_serve_password_reset_url: String,
    pub mfa_enabled: bool,
    pub mfa_identity_providers: BTreeSet<String>,
    pub default_user_groups: BTreeSet<String>,
    /// Order is significant
    pub input_prompts: Vec<InputPromptModel>,
    pub branding: Option<BrandingModel>,
    pub client_secret_policy: Option<ClientSecretPolicy>,
    pub cors_policy: Vec<CorsConfigModel>,
    pub saml_config: Option<SamlConfigModel>,
    pub token_policy: Option<TokenPolicyModel>,
}

impl Default for IdentityZoneModel {
    fn default() -> Self {
        Self {
            name: String::new(),
            sub_domain: String::new(),
            is_active: true,
            account_chooser_enabled: false,
            idp_discovery_enabled: false,
            issuer_url: String::new(),
            home_redirect_url: String::new(),
            logout_redirect_url: String::new(),
            logout_redirect_param: String::new(),
            logout_allowed_redirect_urls: BTreeSet::new(),
            self_serve_enabled: true,
            self_serve_signup_url: String::new(),
            self_serve_password_reset_url: String::new(),
            mfa_enabled: false,
            mfa_identity_providers: BTreeSet::new(),
            default_user_groups: BTreeSet::new(),
            input_prompts: Vec::new(),
            branding: None,
            client_secret_policy: None,
            cors_policy: Vec::new(),
            saml_config: None,
            token_policy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputPromptModel {
    pub name: String,
    pub prompt_type: String,
    pub value: String,
}

impl InputPromptModel {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt_type: DEFAULT_PROMPT_TYPE.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandingModel {
    pub banner_background_color: String,
    pub banner_logo: String,
    pub banner_text: String,
    pub banner_text_color: String,
    pub banner_url: String,
    pub company_name: String,
    pub company_logo: String,
    pub favicon: String,
    pub footer_text: String,
    /// Sorted by name
    pub footer_links: Vec<FooterLinkModel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterLinkModel {
    pub name: String,
    pub url: String,
}

/// The two CORS variants a zone can configure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CorsConfigName {
    Default,
    Xhr,
}

impl CorsConfigName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorsConfigName::Default => "default",
            CorsConfigName::Xhr => "xhr",
        }
    }
}

impl fmt::Display for CorsConfigName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorsConfigName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(CorsConfigName::Default),
            "xhr" => Ok(CorsConfigName::Xhr),
            other => Err(format!("Unknown CORS configuration name: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorsConfigModel {
    pub name: CorsConfigName,
    pub allowed_origins: BTreeSet<String>,
    pub allowed_origin_patterns: BTreeSet<String>,
    pub allowed_uris: BTreeSet<String>,
    pub allowed_uri_patterns: BTreeSet<String>,
    pub allowed_headers: BTreeSet<String>,
    pub allowed_methods: BTreeSet<String>,
    pub allowed_credentials: bool,
    pub max_age: Option<i64>,
}

impl CorsConfigModel {
    pub fn new(name: CorsConfigName) -> Self {
        Self {
            name,
            allowed_origins: BTreeSet::new(),
            allowed_origin_patterns: BTreeSet::new(),
            allowed_uris: BTreeSet::new(),
            allowed_uri_patterns: BTreeSet::new(),
            allowed_headers: BTreeSet::new(),
            allowed_methods: BTreeSet::new(),
            allowed_credentials: false,
            max_age: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamlConfigModel {
    pub active_key_id: String,
    pub assertion_ttl_seconds: Option<i64>,
    pub disable_in_response_to_check: bool,
    pub entity_id: String,
    pub is_assertion_signed: bool,
    pub is_request_signed: bool,
    /// Sorted by name
    pub keys: Vec<SamlKeyModel>,
    pub want_assertion_signed: bool,
    pub want_authn_request_signed: bool,
}

#[derive(Clone, PartialEq)]
pub struct SamlKeyModel {
    pub name: String,
    pub certificate: String,
}

impl fmt::Debug for SamlKeyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SamlKeyModel")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenPolicyModel {
    pub access_token_ttl: Option<i64>,
    pub refresh_token_ttl: Option<i64>,
    pub is_jwt_revocable: bool,
    pub is_refresh_token_unique: bool,
    pub refresh_token_format: String,
    pub active_key_id: String,
}

impl Default for TokenPolicyModel {
    fn default() -> Self {
        Self {
            access_token_ttl: None,
            refresh_token_ttl: None,
            is_jwt_revocable: false,
            is_refresh_token_unique: false,
            refresh_token_format: DEFAULT_REFRESH_TOKEN_FORMAT.to_string(),
            active_key_id: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let model = IdentityZoneModel::default();
        assert!(model.is_active);
        assert!(model.self_serve_enabled);
        assert!(!model.mfa_enabled);

        assert_eq!(TokenPolicyModel::default().refresh_token_format, "jwt");
        assert_eq!(InputPromptModel::new("username", "Email").prompt_type, "text");
    }

    #[test]
    fn test_cors_name_parsing() {
        assert_eq!("default".parse::<CorsConfigName>(), Ok(CorsConfigName::Default));
        assert_eq!("xhr".parse::<CorsConfigName>(), Ok(CorsConfigName::Xhr));
        assert!("other".parse::<CorsConfigName>().is_err());
        assert_eq!(CorsConfigName::Xhr.to_string(), "xhr");
    }
}
