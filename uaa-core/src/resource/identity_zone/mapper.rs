//! Two-way mapping between [`IdentityZoneModel`] and the API [`IdentityZone`]

use super::model::{
    BrandingModel, CorsConfigModel, CorsConfigName, FooterLinkModel, IdentityZoneModel,
    InputPromptModel, SamlConfigModel, SamlKeyModel, TokenPolicyModel, DEFAULT_PROMPT_TYPE,
};
use crate::api::{
    BrandingBanner, BrandingConfig, CorsConfig, CorsPolicy, IdentityZone, IdentityZoneConfig,
    InputPrompt, Links, LogoutLinks, MfaConfig, SamlConfig, SamlKey, SelfServiceLinks,
    TokenPolicy, UserConfig,
};
use std::collections::{BTreeMap, BTreeSet};

// ==================== API -> model ====================

pub fn from_api(zone: &IdentityZone) -> IdentityZoneModel {
    let mut model = IdentityZoneModel {
        name: zone.name.clone(),
        sub_domain: zone.sub_domain.clone(),
        is_active: zone.is_active,
        ..Default::default()
    };

    let Some(config) = &zone.config else {
        return model;
    };

    model.account_chooser_enabled = config.account_chooser_enabled;
    model.idp_discovery_enabled = config.idp_discovery_enabled;
    model.issuer_url = config.issuer_url.clone();
    model.input_prompts = config.input_prompts.iter().map(prompt_from_api).collect();
    model.branding = config.branding.as_ref().map(branding_from_api);
    model.client_secret_policy = config.client_secret_policy.clone();
    model.cors_policy = config
        .cors_policy
        .as_ref()
        .map(cors_policy_from_api)
        .unwrap_or_default();
    model.saml_config = config.saml.as_ref().map(saml_from_api);
    model.token_policy = config.token_policy.as_ref().map(token_policy_from_api);

    if let Some(mfa) = &config.mfa_config {
        model.mfa_enabled = mfa.is_enabled;
        model.mfa_identity_providers = to_set(&mfa.identity_providers);
    }

    if let Some(links) = &config.links {
        model.home_redirect_url = links.home_redirect.clone();

        if let Some(logout) = &links.logout {
            model.logout_redirect_url = logout.redirect_url.clone();
            model.logout_redirect_param = logout.redirect_parameter_name.clone();
            model.logout_allowed_redirect_urls = to_set(&logout.allowed_redirect_urls);
        }

        if let Some(self_service) = &links.self_service {
            model.self_serve_enabled = self_service.enabled;
            model.self_serve_signup_url = self_service.signup_url.clone();
            model.self_serve_password_reset_url = self_service.password_reset_url.clone();
        }
    }

    if let Some(user_config) = &config.user_config {
        model.default_user_groups = to_set(&user_config.default_groups);
    }

    model
}

fn prompt_from_api(prompt: &InputPrompt) -> InputPromptModel {
    InputPromptModel {
        name: prompt.name.clone(),
        prompt_type: prompt.prompt_type.clone(),
        value: prompt.value.clone(),
    }
}

fn branding_from_api(branding: &BrandingConfig) -> BrandingModel {
    let banner = branding.banner.clone().unwrap_or_default();

    BrandingModel {
        banner_background_color: banner.background_color,
        banner_logo: banner.logo,
        banner_text: banner.text,
        banner_text_color: banner.text_color,
        banner_url: banner.url,
        company_name: branding.company_name.clone(),
        company_logo: branding.company_logo.clone(),
        favicon: branding.favicon.clone(),
        footer_text: branding.footer_text.clone(),
        footer_links: branding
            .footer_links
            .iter()
            .map(|(name, url)| FooterLinkModel {
                name: name.clone(),
                url: url.clone(),
            })
            .collect(),
    }
}

fn cors_policy_from_api(policy: &CorsPolicy) -> Vec<CorsConfigModel> {
    [
        (CorsConfigName::Default, &policy.default_configuration),
        (CorsConfigName::Xhr, &policy.xhr_configuration),
    ]
    .into_iter()
    .filter_map(|(name, config)| config.as_ref().map(|c| cors_config_from_api(name, c)))
    .collect()
}

fn cors_config_from_api(name: CorsConfigName, config: &CorsConfig) -> CorsConfigModel {
    CorsConfigModel {
        name,
        allowed_origins: to_set(&config.allowed_origins),
        allowed_origin_patterns: to_set(&config.allowed_origin_patterns),
        allowed_uris: to_set(&config.allowed_uris),
        allowed_uri_patterns: to_set(&config.allowed_uri_patterns),
        allowed_headers: to_set(&config.allowed_headers),
        allowed_methods: to_set(&config.allowed_methods),
        allowed_credentials: config.allowed_credentials,
        max_age: config.max_age,
    }
}

fn saml_from_api(saml: &SamlConfig) -> SamlConfigModel {
    SamlConfigModel {
        active_key_id: saml.active_key_id.clone(),
        assertion_ttl_seconds: saml.assertion_ttl_seconds,
        disable_in_response_to_check: saml.disable_in_response_to_check,
        entity_id: saml.entity_id.clone(),
        is_assertion_signed: saml.is_assertion_signed,
        is_request_signed: saml.is_request_signed,
        keys: saml
            .keys
            .iter()
            .map(|(name, key)| SamlKeyModel {
                name: name.clone(),
                certificate: key.certificate.clone(),
            })
            .collect(),
        want_assertion_signed: saml.want_assertion_signed,
        want_authn_request_signed: saml.want_authn_request_signed,
    }
}

fn token_policy_from_api(policy: &TokenPolicy) -> TokenPolicyModel {
    TokenPolicyModel {
        access_token_ttl: policy.access_token_ttl,
        refresh_token_ttl: policy.refresh_token_ttl,
        is_jwt_revocable: policy.is_jwt_revocable,
        is_refresh_token_unique: policy.is_refresh_token_unique,
        refresh_token_format: policy.refresh_token_format.clone(),
        active_key_id: policy.active_key_id.clone(),
    }
}

// ==================== model -> API ====================

pub fn to_api(id: &str, model: &IdentityZoneModel) -> IdentityZone {
    IdentityZone {
        id: id.to_string(),
        is_active: model.is_active,
        name: model.name.clone(),
        sub_domain: model.sub_domain.clone(),
        config: Some(config_to_api(model)),
    }
}

fn config_to_api(model: &IdentityZoneModel) -> IdentityZoneConfig {
    IdentityZoneConfig {
        account_chooser_enabled: model.account_chooser_enabled,
        branding: model.branding.as_ref().map(branding_to_api),
        client_secret_policy: model.client_secret_policy.clone(),
        cors_policy: cors_policy_to_api(&model.cors_policy),
        idp_discovery_enabled: model.idp_discovery_enabled,
        input_prompts: model.input_prompts.iter().map(prompt_to_api).collect(),
        issuer_url: model.issuer_url.clone(),
        links: Some(Links {
            home_redirect: model.home_redirect_url.clone(),
            logout: Some(LogoutLinks {
                redirect_url: model.logout_redirect_url.clone(),
                redirect_parameter_name: model.logout_redirect_param.clone(),
                allowed_redirect_urls: to_vec(&model.logout_allowed_redirect_urls),
            }),
            self_service: Some(SelfServiceLinks {
                enabled: model.self_serve_enabled,
                signup_url: model.self_serve_signup_url.clone(),
                password_reset_url: model.self_serve_password_reset_url.clone(),
            }),
        }),
        mfa_config: Some(MfaConfig {
            is_enabled: model.mfa_enabled,
            identity_providers: to_vec(&model.mfa_identity_providers),
        }),
        token_policy: model.token_policy.as_ref().map(token_policy_to_api),
        saml: model.saml_config.as_ref().map(saml_to_api),
        user_config: Some(UserConfig {
            default_groups: to_vec(&model.default_user_groups),
        }),
    }
}

fn prompt_to_api(prompt: &InputPromptModel) -> InputPrompt {
    let prompt_type = if prompt.prompt_type.is_empty() {
        DEFAULT_PROMPT_TYPE.to_string()
    } else {
        prompt.prompt_type.clone()
    };

    InputPrompt {
        name: prompt.name.clone(),
        prompt_type,
        value: prompt.value.clone(),
    }
}

fn branding_to_api(branding: &BrandingModel) -> BrandingConfig {
    let banner = BrandingBanner {
        background_color: branding.banner_background_color.clone(),
        logo: branding.banner_logo.clone(),
        text: branding.banner_text.clone(),
        text_color: branding.banner_text_color.clone(),
        url: branding.banner_url.clone(),
    };

    BrandingConfig {
        banner: (banner != BrandingBanner::default()).then_some(banner),
        company_name: branding.company_name.clone(),
        company_logo: branding.company_logo.clone(),
        favicon: branding.favicon.clone(),
        footer_text: branding.footer_text.clone(),
        footer_links: branding
            .footer_links
            .iter()
            .map(|link| (link.name.clone(), link.url.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// `None` when no entry is configured; a repeated name keeps the last entry.
fn cors_policy_to_api(entries: &[CorsConfigModel]) -> Option<CorsPolicy> {
    if entries.is_empty() {
        return None;
    }

    let mut policy = CorsPolicy::default();
    for entry in entries {
        let config = cors_config_to_api(entry);
        match entry.name {
            CorsConfigName::Default => policy.default_configuration = Some(config),
            CorsConfigName::Xhr => policy.xhr_configuration = Some(config),
        }
    }
    Some(policy)
}

fn cors_config_to_api(entry: &CorsConfigModel) -> CorsConfig {
    CorsConfig {
        allowed_origins: to_vec(&entry.allowed_origins),
        allowed_origin_patterns: to_vec(&entry.allowed_origin_patterns),
        allowed_uris: to_vec(&entry.allowed_uris),
        allowed_uri_patterns: to_vec(&entry.allowed_uri_patterns),
        allowed_headers: to_vec(&entry.allowed_headers),
        allowed_methods: to_vec(&entry.allowed_methods),
        allowed_credentials: entry.allowed_credentials,
        max_age: entry.max_age,
    }
}

fn saml_to_api(saml: &SamlConfigModel) -> SamlConfig {
    SamlConfig {
        active_key_id: saml.active_key_id.clone(),
        assertion_ttl_seconds: saml.assertion_ttl_seconds,
        certificate: String::new(),
        disable_in_response_to_check: saml.disable_in_response_to_check,
        entity_id: saml.entity_id.clone(),
        is_assertion_signed: saml.is_assertion_signed,
        is_request_signed: saml.is_request_signed,
        keys: saml
            .keys
            .iter()
            .map(|key| {
                (
                    key.name.clone(),
                    SamlKey {
                        certificate: key.certificate.clone(),
                    },
                )
            })
            .collect(),
        want_assertion_signed: saml.want_assertion_signed,
        want_authn_request_signed: saml.want_authn_request_signed,
    }
}

fn token_policy_to_api(policy: &TokenPolicyModel) -> TokenPolicy {
    TokenPolicy {
        access_token_ttl: policy.access_token_ttl,
        refresh_token_ttl: policy.refresh_token_ttl,
        is_jwt_revocable: policy.is_jwt_revocable,
        is_refresh_token_unique: policy.is_refresh_token_unique,
        refresh_token_format: policy.refresh_token_format.clone(),
        active_key_id: policy.active_key_id.clone(),
    }
}

fn to_set(values: &[String]) -> BTreeSet<String> {
    values.iter().cloned().collect()
}

fn to_vec(values: &BTreeSet<String>) -> Vec<String> {
    values.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sorted(mut values: Vec<String>) -> Vec<String> {
        values.sort();
        values
    }

    fn zone_with_cors() -> IdentityZone {
        serde_json::from_value(json!({
            "id": "zone-1",
            "active": true,
            "name": "Zone One",
            "subdomain": "zone1",
            "config": {
                "corsPolicy": {
                    "defaultConfiguration": {
                        "allowedOrigins": ["https://b.example.com", "https://a.example.com"],
                        "allowedOriginPatterns": [".*\\.example\\.com"],
                        "allowedUris": ["/userinfo"],
                        "allowedUriPatterns": ["/Users/.*"],
                        "allowedHeaders": ["Authorization", "Accept"],
                        "allowedMethods": ["GET", "POST"],
                        "allowedCredentials": true,
                        "maxAge": 1800
                    },
                    "xhrConfiguration": {
                        "allowedOrigins": ["https://xhr.example.com"],
                        "allowedMethods": ["GET"],
                        "allowedHeaders": ["X-Requested-With"]
                    }
                },
                "prompts": [
                    {"name": "username", "type": "text", "text": "Email"},
                    {"name": "password", "type": "password", "text": "Password"},
                    {"name": "passcode", "type": "password", "text": "One Time Code"}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_cors_round_trip_keeps_both_entries() {
        let api = zone_with_cors();
        let model = from_api(&api);

        let names: Vec<_> = model.cors_policy.iter().map(|c| c.name).collect();
        assert_eq!(names, vec![CorsConfigName::Default, CorsConfigName::Xhr]);

        let back = to_api(&api.id, &model);
        let original = api.config.unwrap().cors_policy.unwrap();
        let mapped = back.config.unwrap().cors_policy.unwrap();

        let (orig_default, mapped_default) = (
            original.default_configuration.unwrap(),
            mapped.default_configuration.unwrap(),
        );
        assert_eq!(
            sorted(orig_default.allowed_origins),
            sorted(mapped_default.allowed_origins.clone())
        );
        assert_eq!(
            sorted(orig_default.allowed_headers),
            sorted(mapped_default.allowed_headers.clone())
        );
        assert_eq!(
            sorted(orig_default.allowed_methods),
            sorted(mapped_default.allowed_methods.clone())
        );
        assert_eq!(mapped_default.allowed_uri_patterns, strings(&["/Users/.*"]));
        assert_eq!(mapped_default.max_age, Some(1800));
        assert!(mapped_default.allowed_credentials);

        let mapped_xhr = mapped.xhr_configuration.unwrap();
        assert_eq!(mapped_xhr.allowed_origins, strings(&["https://xhr.example.com"]));
        assert_eq!(mapped_xhr.allowed_methods, strings(&["GET"]));
    }

    #[test]
    fn test_prompt_order_is_preserved() {
        let api = zone_with_cors();
        let back = to_api(&api.id, &from_api(&api));

        let names: Vec<_> = back
            .config
            .unwrap()
            .input_prompts
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, strings(&["username", "password", "passcode"]));
    }

    #[test]
    fn test_model_round_trip() {
        let model = IdentityZoneModel {
            name: "Zone Two".to_string(),
            sub_domain: "zone2".to_string(),
            issuer_url: "https://zone2.example.com".to_string(),
            home_redirect_url: "https://home.example.com".to_string(),
            logout_allowed_redirect_urls: ["https://bye.example.com".to_string()].into(),
            mfa_enabled: true,
            mfa_identity_providers: ["uaa".to_string()].into(),
            default_user_groups: ["openid".to_string(), "uaa.user".to_string()].into(),
            input_prompts: vec![InputPromptModel::new("username", "Email")],
            branding: Some(BrandingModel {
                company_name: "Example".to_string(),
                banner_text: "Maintenance tonight".to_string(),
                footer_links: vec![
                    FooterLinkModel {
                        name: "privacy".to_string(),
                        url: "https://example.com/privacy".to_string(),
                    },
                    FooterLinkModel {
                        name: "terms".to_string(),
                        url: "https://example.com/terms".to_string(),
                    },
                ],
                ..Default::default()
            }),
            saml_config: Some(SamlConfigModel {
                active_key_id: "key-1".to_string(),
                entity_id: "zone2.example.com".to_string(),
                keys: vec![SamlKeyModel {
                    name: "key-1".to_string(),
                    certificate: "-----BEGIN CERTIFICATE-----".to_string(),
                }],
                ..Default::default()
            }),
            token_policy: Some(TokenPolicyModel {
                access_token_ttl: Some(3600),
                ..Default::default()
            }),
            cors_policy: vec![CorsConfigModel {
                allowed_origins: ["https://a.example.com".to_string()].into(),
                ..CorsConfigModel::new(CorsConfigName::Xhr)
            }],
            ..Default::default()
        };

        let api = to_api("zone-2", &model);
        assert_eq!(api.id, "zone-2");
        assert_eq!(from_api(&api), model);
    }

    #[test]
    fn test_saml_entity_id_is_not_active_key() {
        let model = IdentityZoneModel {
            saml_config: Some(SamlConfigModel {
                active_key_id: "key-1".to_string(),
                entity_id: "entity.example.com".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let saml = to_api("", &model).config.unwrap().saml.unwrap();
        assert_eq!(saml.entity_id, "entity.example.com");
        assert_eq!(saml.active_key_id, "key-1");
    }

    #[test]
    fn test_from_api_without_config_uses_defaults() {
        let zone = IdentityZone {
            id: "z".to_string(),
            is_active: false,
            name: "bare".to_string(),
            ..Default::default()
        };

        let model = from_api(&zone);
        assert_eq!(model.name, "bare");
        assert!(!model.is_active);
        assert!(model.self_serve_enabled);
        assert!(model.cors_policy.is_empty());
        assert!(model.branding.is_none());
    }

    #[test]
    fn test_branding_without_banner() {
        let config: IdentityZoneConfig = serde_json::from_value(json!({
            "branding": {"companyName": "Example"}
        }))
        .unwrap();
        let zone = IdentityZone {
            config: Some(config),
            ..Default::default()
        };

        let branding = from_api(&zone).branding.unwrap();
        assert_eq!(branding.company_name, "Example");
        assert!(branding.banner_text.is_empty());

        let back = to_api("", &from_api(&zone)).config.unwrap().branding.unwrap();
        assert!(back.banner.is_none());
    }

    #[test]
    fn test_empty_cors_maps_to_none() {
        let api = to_api("", &IdentityZoneModel::default());
        assert!(api.config.unwrap().cors_policy.is_none());
    }

    #[test]
    fn test_empty_prompt_type_defaults_to_text() {
        let model = IdentityZoneModel {
            input_prompts: vec![InputPromptModel {
                name: "username".to_string(),
                prompt_type: String::new(),
                value: "Email".to_string(),
            }],
            ..Default::default()
        };

        let prompts = to_api("", &model).config.unwrap().input_prompts;
        assert_eq!(prompts[0].prompt_type, "text");
    }
}
