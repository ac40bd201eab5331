//! Request loading
//!
//! Request/response types and the [`Transport`] seam. `HttpTransport` runs the
//! blocking reqwest client on smol's thread pool so callers stay async.

use crate::{ApiConfig, NetError, Response};
use std::collections::HashMap;
use std::time::Duration;

/// A POST to an API endpoint
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn post(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Form-encode `fields` as the body
    pub fn with_form(self, fields: &[(String, String)]) -> Self {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body(body.into_bytes())
    }

    /// Decode a form-encoded body back into pairs
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.body
            .as_deref()
            .map(|body| {
                url::form_urlencoded::parse(body)
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Sends requests on behalf of an [`ApiClient`](crate::ApiClient)
///
/// One request is in flight per call; there is no cancellation.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: Request) -> Result<Response, NetError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, NetError> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(&config.user_agent);
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, NetError> {
        tracing::info!("HTTP POST {}", request.url);
        let client = self.client.clone();
        smol::unblock(move || execute(&client, request)).await
    }
}

fn execute(client: &reqwest::blocking::Client, request: Request) -> Result<Response, NetError> {
    let mut builder = client.post(&request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder
        .send()
        .map_err(|e| NetError::Network(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .bytes()
        .map_err(|e| NetError::Network(e.to_string()))?
        .to_vec();

    tracing::debug!("HTTP {} ({} bytes)", status, body.len());
    Ok(Response { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = Request::post("https://example.com").with_header("Accept", "application/json");

        assert_eq!(req.url, "https://example.com");
        assert_eq!(req.headers.get("Accept").unwrap(), "application/json");
    }

    #[test]
    fn test_post_form_request() {
        let fields = vec![("payload".to_string(), r#"{"a":"b c"}"#.to_string())];
        let req = Request::post("index.php?r=user/get").with_form(&fields);

        assert_eq!(
            req.headers.get("Content-Type").unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(req.form_fields(), fields);
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(&ApiConfig::default()).is_ok());
    }
}
