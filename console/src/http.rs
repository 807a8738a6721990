//! HTTP client wrapper for the inventory REST backend
//!
//! Every backend call goes through `ApiClient`, which forwards the browser
//! session's bearer token and turns failures into classified `ApiError`s.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::types::Envelope;

use crate::error::{ApiError, ApiResult};

/// Inventory backend client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new ApiClient
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Copy of this client that authenticates as the given session
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        tracing::debug!(%method, path, "backend request");

        let mut builder = self.request(method.clone(), path);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "backend request failed");
            ApiError::from(e)
        })?;
        let status = response.status();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(value) => value,
                Err(_) if !status.is_success() => Value::String(text),
                Err(e) => return Err(ApiError::InvalidResponse(e.to_string())),
            }
        };

        if !status.is_success() {
            let err = match &body {
                Value::String(text) => ApiError::from_status(status.as_u16(), text.clone()),
                other => ApiError::from_body(status.as_u16(), other),
            };
            tracing::warn!(%method, path, status = status.as_u16(), error = %err, "backend error");
            return Err(err);
        }

        // Some endpoints answer 2xx with an `{error}` body
        if body.get("error").is_some() && body.get("data").is_none() {
            return Err(ApiError::from_body(400, &body));
        }

        Ok(body)
    }

    /// GET an endpoint that returns a bare array
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let body = self.execute(Method::GET, path, None).await?;
        if !body.is_array() {
            return Err(ApiError::InvalidResponse(format!(
                "expected an array from {}",
                path
            )));
        }
        decode(body)
    }

    /// GET a single object (bare or wrapped in `{data}`)
    pub async fn get_one<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.execute(Method::GET, path, None).await?;
        Ok(into_envelope(body)?.data)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(Method::POST, path, Some(encode(body)?)).await?;
        into_envelope(body)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(Method::PATCH, path, Some(encode(body)?)).await?;
        into_envelope(body)
    }

    /// PATCH whose answer carries nothing but a message
    pub async fn patch_ack<B>(&self, path: &str, body: &B) -> ApiResult<Option<String>>
    where
        B: Serialize + ?Sized,
    {
        let body = self.execute(Method::PATCH, path, Some(encode(body)?)).await?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode request: {}", e)))
}

fn decode<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

/// Accept both `{data, message}` and a bare payload
fn into_envelope<T: DeserializeOwned>(body: Value) -> ApiResult<Envelope<T>> {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string);
            let data = map.remove("data").unwrap_or(Value::Null);
            Ok(Envelope {
                data: decode(data)?,
                message,
            })
        }
        other => Ok(Envelope {
            data: decode(other)?,
            message: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_envelope_with_data() {
        let envelope: Envelope<Item> =
            into_envelope(json!({"data": {"id": "a"}, "message": "Creado"})).unwrap();
        assert_eq!(envelope.data, Item { id: "a".into() });
        assert_eq!(envelope.message.as_deref(), Some("Creado"));
    }

    #[test]
    fn test_bare_payload() {
        let envelope: Envelope<Item> = into_envelope(json!({"id": "b"})).unwrap();
        assert_eq!(envelope.data.id, "b");
        assert!(envelope.message.is_none());
    }

    #[test]
    fn test_shape_mismatch_is_invalid_response() {
        let result: ApiResult<Envelope<Item>> = into_envelope(json!([1, 2]));
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://backend:3000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://backend:3000");
    }
}
