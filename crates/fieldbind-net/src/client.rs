//! API client
//!
//! Normalizes endpoints, packs the request payload, and unwraps the
//! envelope of the reply.

use crate::loader::{Request, Transport};
use crate::{ApiConfig, Envelope, NetError};
use serde_json::Value;

/// Envelope-speaking client over a [`Transport`]
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Prefix `uri` with the routing prefix unless it already carries it,
    /// then resolve it against the base URL if one is configured
    pub fn endpoint(&self, uri: &str) -> Result<String, NetError> {
        let routed = if uri.contains(&self.config.prefix) {
            uri.to_string()
        } else {
            format!("{}{}", self.config.prefix, uri)
        };

        match &self.config.base_url {
            Some(base) => {
                let base = url::Url::parse(base)
                    .map_err(|e| NetError::InvalidUrl(format!("{}: {}", base, e)))?;
                let joined = base
                    .join(&routed)
                    .map_err(|e| NetError::InvalidUrl(format!("{}: {}", routed, e)))?;
                Ok(joined.to_string())
            }
            None => Ok(routed),
        }
    }

    /// Form fields for `data`
    ///
    /// Data that already is an object with the payload key is sent field by
    /// field; anything else is packed as `{payload: <json text>}`.
    pub fn payload(&self, data: &Value) -> Result<Vec<(String, String)>, NetError> {
        match data {
            Value::Object(map) if map.contains_key(&self.config.payload_key) => map
                .iter()
                .map(|(k, v)| -> Result<(String, String), NetError> {
                    let text = match v {
                        Value::String(s) => s.clone(),
                        other => serde_json::to_string(other)?,
                    };
                    Ok((k.clone(), text))
                })
                .collect(),
            _ => Ok(vec![(
                self.config.payload_key.clone(),
                serde_json::to_string(data)?,
            )]),
        }
    }

    /// POST `data` to `uri`, yielding the envelope's `data` on success
    pub async fn post(&self, uri: &str, data: &Value) -> Result<Value, NetError> {
        let url = self.endpoint(uri)?;
        let fields = self.payload(data)?;
        let response = self
            .transport
            .send(Request::post(&url).with_form(&fields))
            .await?;

        if !response.ok() {
            return Err(NetError::HttpError {
                status: response.status,
            });
        }

        let envelope: Envelope = serde_json::from_slice(&response.body)?;
        if !envelope.is_success() {
            tracing::debug!("{} failed with code {}: {}", url, envelope.code, envelope.message);
        }
        envelope.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryTransport;
    use serde_json::json;

    fn client(config: ApiConfig) -> ApiClient<MemoryTransport> {
        ApiClient::new(MemoryTransport::new(), config)
    }

    #[test]
    fn test_endpoint_prefixing() {
        let c = client(ApiConfig::default());
        assert_eq!(c.endpoint("user/get").unwrap(), "index.php?r=user/get");
        assert_eq!(c.endpoint("index.php?r=user/get").unwrap(), "index.php?r=user/get");
    }

    #[test]
    fn test_endpoint_with_base_url() {
        let c = client(ApiConfig {
            base_url: Some("http://example.com/app/".to_string()),
            ..ApiConfig::default()
        });
        assert_eq!(
            c.endpoint("user/get").unwrap(),
            "http://example.com/app/index.php?r=user/get"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let c = client(ApiConfig {
            base_url: Some("not a url".to_string()),
            ..ApiConfig::default()
        });
        assert!(matches!(c.endpoint("x"), Err(NetError::InvalidUrl(_))));
    }

    #[test]
    fn test_payload_packing() {
        let c = client(ApiConfig::default());
        let fields = c.payload(&json!({"id": 3})).unwrap();
        assert_eq!(fields, vec![("payload".to_string(), r#"{"id":3}"#.to_string())]);
    }

    #[test]
    fn test_prepacked_payload_passthrough() {
        let c = client(ApiConfig::default());
        let fields = c.payload(&json!({"payload": "{\"id\":3}", "v": 2})).unwrap();
        assert_eq!(
            fields,
            vec![
                ("payload".to_string(), "{\"id\":3}".to_string()),
                ("v".to_string(), "2".to_string()),
            ]
        );
    }
}
