//! Configuration management for UAA Core

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::time::Duration;

/// Environment variables consulted when building a [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvVar {
    AuthUrl,
    CaCert,
    ClientId,
    ClientSecret,
    Debug,
    DialTimeout,
    LoginUrl,
    SkipSslValidation,
    Trace,
}

impl EnvVar {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvVar::AuthUrl => "UAA_AUTH_URL",
            EnvVar::CaCert => "UAA_CA_CERT",
            EnvVar::ClientId => "UAA_CLIENT_ID",
            EnvVar::ClientSecret => "UAA_CLIENT_SECRET",
            EnvVar::Debug => "UAA_DEBUG",
            EnvVar::DialTimeout => "UAA_DIAL_TIMEOUT",
            EnvVar::LoginUrl => "UAA_LOGIN_URL",
            EnvVar::SkipSslValidation => "UAA_SKIP_SSL_VALIDATION",
            EnvVar::Trace => "UAA_TRACE",
        }
    }

    fn get(&self) -> Option<String> {
        env::var(self.as_str()).ok().filter(|v| !v.is_empty())
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session configuration
#[derive(Clone)]
pub struct Config {
    /// Login server endpoint; tokens are requested from `<login>/oauth/token`
    pub login_endpoint: String,
    /// UAA endpoint that serves the SCIM and client administration APIs
    pub auth_endpoint: String,
    pub client_id: String,
    pub client_secret: String,
    /// PEM encoded CA certificate to trust in addition to the system roots
    pub ca_cert: Option<String>,
    pub skip_ssl_validation: bool,
    /// Connect timeout for the HTTP client
    pub dial_timeout: Option<Duration>,
    /// Logging configuration
    pub log: LogConfig,
}

// Hand written so the client secret never ends up in logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("login_endpoint", &self.login_endpoint)
            .field("auth_endpoint", &self.auth_endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("ca_cert", &self.ca_cert.as_ref().map(|_| "<pem>"))
            .field("skip_ssl_validation", &self.skip_ssl_validation)
            .field("dial_timeout", &self.dial_timeout)
            .field("log", &self.log)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub debug: bool,
    pub trace: bool,
    /// Log format: "json" or "pretty"
    pub format: String,
}

impl Config {
    pub fn new(
        login_endpoint: impl Into<String>,
        auth_endpoint: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            login_endpoint: login_endpoint.into(),
            auth_endpoint: auth_endpoint.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ca_cert: None,
            skip_ssl_validation: false,
            dial_timeout: None,
            log: LogConfig::default(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        let _ = dotenvy::dotenv();

        Ok(Self {
            login_endpoint: EnvVar::LoginUrl.get().unwrap_or_default(),
            auth_endpoint: EnvVar::AuthUrl.get().unwrap_or_default(),
            client_id: EnvVar::ClientId.get().unwrap_or_default(),
            client_secret: EnvVar::ClientSecret.get().unwrap_or_default(),
            ca_cert: EnvVar::CaCert.get().map(|value| value.replace("\\n", "\n")),
            skip_ssl_validation: match EnvVar::SkipSslValidation.get() {
                Some(value) => parse_bool(&value)
                    .with_context(|| format!("Invalid {}", EnvVar::SkipSslValidation))?,
                None => true,
            },
            dial_timeout: EnvVar::DialTimeout
                .get()
                .map(|value| {
                    value
                        .trim()
                        .parse::<u64>()
                        .map(Duration::from_secs)
                        .with_context(|| format!("Invalid {}", EnvVar::DialTimeout))
                })
                .transpose()?,
            log: LogConfig {
                debug: EnvVar::Debug
                    .get()
                    .and_then(|value| parse_bool(&value).ok())
                    .unwrap_or(false),
                trace: EnvVar::Trace
                    .get()
                    .map(|value| parse_bool(&value).unwrap_or(true))
                    .unwrap_or(false),
                format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
        })
    }

    /// Login endpoint in canonical URL form
    pub fn login_url(&self) -> String {
        endpoint_as_url(&self.login_endpoint)
    }

    /// Auth (UAA API) endpoint in canonical URL form
    pub fn auth_url(&self) -> String {
        endpoint_as_url(&self.auth_endpoint)
    }
}

/// Strip a trailing slash and default to https when no scheme is given.
///
/// An empty endpoint stays empty so that missing configuration can be reported
/// by the caller.
pub fn endpoint_as_url(endpoint: &str) -> String {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if endpoint.is_empty() {
        return String::new();
    }
    if endpoint.starts_with("http") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => Ok(true),
        "0" | "f" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("not a boolean: {}", other),
    }
}
