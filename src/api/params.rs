use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::Value;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Extracted request parameters, shape-agnostic.
///
/// Requests are accepted in three shapes and the first non-empty source
/// wins: a JSON object body, then the query string, then a form-encoded
/// body. The ordering is observable for clients that send more than one
/// source at once and must not change.
///
/// Values are flattened to strings: `{"object_id": 12}`, `?object_id=12` and
/// an `object_id=12` form field all look identical to handlers. Extraction
/// never fails; an unreadable request simply yields no parameters.
#[derive(Debug, Default)]
pub struct RequestParams(HashMap<String, String>);

impl RequestParams {
    /// Returns the parameter if present and non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.0.len()
    }
}

#[async_trait::async_trait]
impl<S> FromRequest<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();

        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .unwrap_or_default();

        // 1. JSON object body
        if content_type.starts_with("application/json") {
            if let Ok(map) = serde_json::from_slice::<serde_json::Map<String, Value>>(&bytes) {
                let params = flatten_json(map);
                if !params.is_empty() {
                    return Ok(Self(params));
                }
            }
        }

        // 2. Query string
        if let Some(query) = parts.uri.query() {
            if let Ok(pairs) = serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
                if !pairs.is_empty() {
                    return Ok(Self(pairs.into_iter().collect()));
                }
            }
        }

        // 3. Form-encoded body
        if content_type.starts_with("application/x-www-form-urlencoded") {
            if let Ok(pairs) = serde_urlencoded::from_bytes::<Vec<(String, String)>>(&bytes) {
                if !pairs.is_empty() {
                    return Ok(Self(pairs.into_iter().collect()));
                }
            }
        }

        Ok(Self::default())
    }
}

/// Keeps JSON scalars, rendered as text; nested values have no parameter
/// equivalent and are skipped.
fn flatten_json(map: serde_json::Map<String, Value>) -> HashMap<String, String> {
    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Number(n) => Some((key, n.to_string())),
            Value::Bool(b) => Some((key, b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect()
}
