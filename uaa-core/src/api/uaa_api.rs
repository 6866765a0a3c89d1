//! Authenticated JSON request builder for the UAA API

use super::headers::ApiHeader;
use crate::error::{Result, UaaError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// Request builder bound to one UAA endpoint, token and zone.
///
/// `with_headers` and `with_zone_id` return new values; the builder they are
/// called on is never modified, so a derived copy can be held and reused
/// without affecting anyone else holding the original.
#[derive(Clone)]
pub struct UaaApi {
    http_client: Client,
    base_url: String,
    access_token: String,
    zone_id: String,
    additional_headers: BTreeMap<String, String>,
}

/// UAA error body
#[derive(Debug, Deserialize)]
struct UaaErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

impl UaaApi {
    /// `access_token` is the full `Authorization` header value, e.g. `bearer abc`.
    pub fn new(
        http_client: Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(UaaError::Config(
                "no UAA endpoint provided when instantiating the UAA API".to_string(),
            ));
        }

        Ok(Self {
            http_client,
            base_url,
            access_token: access_token.into(),
            zone_id: String::new(),
            additional_headers: BTreeMap::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    pub fn additional_headers(&self) -> &BTreeMap<String, String> {
        &self.additional_headers
    }

    /// Copy with `headers` merged over the existing extra headers.
    ///
    /// Header names are case-insensitive, so a later `authorization` replaces an
    /// earlier `Authorization`.
    pub fn with_headers<I, K, V>(&self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut additional_headers = self.additional_headers.clone();
        for (name, value) in headers {
            additional_headers.insert(name.into().to_ascii_lowercase(), value.into());
        }

        Self {
            additional_headers,
            ..self.clone()
        }
    }

    /// Copy that targets `zone_id`
    pub fn with_zone_id(&self, zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            ..self.clone()
        }
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        decode(response).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Some(body)).await?;
        decode(response).await
    }

    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        decode(response).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Full request URL for `path`
    pub(crate) fn url_for(&self, path: &str) -> String {
        let mut path = path.to_string();
        while path.contains("//") {
            path = path.replace("//", "/");
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Token, then zone, then the extra headers on top.
    pub(crate) fn request_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("authorization"),
            header_value(ApiHeader::Authorization.as_str(), &self.access_token)?,
        );
        headers.insert(
            HeaderName::from_static("x-identity-zone-id"),
            header_value(ApiHeader::ZoneId.as_str(), &self.zone_id)?,
        );

        for (name, value) in &self.additional_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| UaaError::Config(format!("Invalid header name '{}': {}", name, e)))?;
            headers.insert(header_name, header_value(name, value)?);
        }

        Ok(headers)
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path);
        let headers = self.request_headers()?;

        debug!(%method, %url, zone_id = %self.zone_id, "Sending UAA request");

        let mut request = self.http_client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%method, %url, status = status.as_u16(), "UAA request failed");
            return Err(http_error(status, &body));
        }

        Ok(response)
    }
}

impl fmt::Debug for UaaApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UaaApi")
            .field("base_url", &self.base_url)
            .field("zone_id", &self.zone_id)
            .field(
                "additional_headers",
                &self.additional_headers.keys().collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| UaaError::Config(format!("Invalid value for header '{}': {}", name, e)))
}

/// Build an HTTP error, keeping the UAA error code and description when present.
pub(crate) fn http_error(status: StatusCode, body: &str) -> UaaError {
    let parsed = serde_json::from_str::<UaaErrorResponse>(body).ok();
    let (error, description) = match parsed {
        Some(r) => (r.error, r.error_description),
        None if body.trim().is_empty() => (None, None),
        None => (None, Some(body.trim().to_string())),
    };

    UaaError::Http {
        status,
        error,
        description,
    }
}

/// Empty bodies decode as JSON `null`, so `()` and `Option<T>` accept them.
async fn decode<R: DeserializeOwned>(response: Response) -> Result<R> {
    let bytes = response.bytes().await?;
    trace!(body = %String::from_utf8_lossy(&bytes), "UAA response body");

    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
