//! The authenticated HTTP client.
//!
//! One instance is shared by every domain service. It reads the bearer
//! token from the injected [`SessionStore`] on each request, maps every
//! failure onto [`ClientError`], and reacts to a 401 by clearing the
//! session and surfacing [`ClientError::SessionExpired`] so the caller can
//! navigate back to login. Mutations are never retried here.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use crate::auth::models::{AuthToken, SignUpRequest};
use crate::config::Config;
use crate::errors::{ClientError, ClientResult};
use crate::session::SessionStore;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Builds a client for the configured base URL over the given session
    /// store.
    pub fn new(config: &Config, session: Arc<SessionStore>) -> ClientResult<Self> {
        let base_url = Url::parse(&config.api_url).map_err(|error| {
            ClientError::validation(format!("invalid API URL '{}': {error}", config.api_url))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|error| ClientError::network(error.to_string()))?;

        Ok(ApiClient {
            http,
            base_url,
            session,
        })
    }

    /// The session store this client reads its token from.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Absolute URL for the given path segments. Segments are
    /// percent-escaped, so serial numbers and team names can carry spaces
    /// or slashes without corrupting the path.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ClientError::validation("API base URL cannot be a base"))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Exchanges credentials for a token at `POST /token` (form-encoded,
    /// unauthenticated). The session store is not touched here; persisting
    /// the token is the auth service's decision.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<AuthToken> {
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::validation(
                "Username and password must be provided",
            ));
        }

        let url = self.endpoint(&["token"])?;
        let form = [("username", username), ("password", password)];

        let response = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|error| ClientError::network(error.to_string()))?;

        if !response.status().is_success() {
            let message = error_detail(response)
                .await
                .unwrap_or_else(|| "Login failed".to_string());
            return Err(ClientError::authentication(message));
        }

        response
            .json::<AuthToken>()
            .await
            .map_err(|error| ClientError::parse(error.to_string()))
    }

    /// Registers a new account at `POST /CreateUserAccount` (multipart
    /// form, unauthenticated). Same error contract as [`Self::login`].
    pub async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<AuthToken> {
        let url = self.endpoint(&["CreateUserAccount"])?;
        let form = reqwest::multipart::Form::new()
            .text("username", request.username.clone())
            .text("password", request.password.clone())
            .text("email", request.email.clone());

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|error| ClientError::network(error.to_string()))?;

        if !response.status().is_success() {
            let message = error_detail(response)
                .await
                .unwrap_or_else(|| "Account creation failed".to_string());
            return Err(ClientError::authentication(message));
        }

        response
            .json::<AuthToken>()
            .await
            .map_err(|error| ClientError::parse(error.to_string()))
    }

    /// Single funnel for every authenticated request.
    ///
    /// Reads the token before doing anything else: without one the call
    /// fails with `NoSession` and no network traffic happens. A 401 clears
    /// the session (one-shot reactive invalidation, no retry).
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> ClientResult<Response> {
        let token = self.session.token().await.ok_or(ClientError::NoSession)?;

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(reqwest::header::AUTHORIZATION, token.bearer());

        // The JSON content type only travels with a body-carrying mutation.
        if let Some(body) = &body {
            if method == Method::POST || method == Method::PUT {
                request = request.json(body);
            }
        }

        let response = request.send().await.map_err(|err| {
            error!(path = url.path(), "request failed: {err}");
            ClientError::network(err.to_string())
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(path = url.path(), "token rejected by server, clearing session");
            if let Err(err) = self.session.clear().await {
                error!("could not clear session after expiry: {err}");
            }
            return Err(ClientError::SessionExpired);
        }

        if !response.status().is_success() {
            let status = response.status();
            let message = error_detail(response).await.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("API request failed")
                    .to_string()
            });
            return Err(ClientError::api(status.as_u16(), message));
        }

        Ok(response)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let url = self.endpoint(segments)?;
        let response = self.execute(Method::GET, url, None).await?;
        decode(response).await
    }

    /// GET for list endpoints, with the array-coercion shim applied.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> ClientResult<Vec<T>> {
        let mut url = self.endpoint(segments)?;
        for (name, value) in query {
            url.query_pairs_mut().append_pair(name, value);
        }
        let path = url.path().to_string();

        let response = self.execute(Method::GET, url, None).await?;
        let value: Value = decode(response).await?;

        normalize_list(&path, value)
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|error| ClientError::parse(error.to_string()))
            })
            .collect()
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> ClientResult<T> {
        let url = self.endpoint(segments)?;
        let body =
            serde_json::to_value(body).map_err(|error| ClientError::parse(error.to_string()))?;
        let response = self.execute(Method::POST, url, Some(body)).await?;
        decode(response).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> ClientResult<T> {
        let url = self.endpoint(segments)?;
        let body =
            serde_json::to_value(body).map_err(|error| ClientError::parse(error.to_string()))?;
        let response = self.execute(Method::PUT, url, Some(body)).await?;
        decode(response).await
    }

    /// DELETE returns no payload; success is the absence of an error.
    pub(crate) async fn delete(&self, segments: &[&str]) -> ClientResult<()> {
        let url = self.endpoint(segments)?;
        self.execute(Method::DELETE, url, None).await.map(|_| ())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|error| ClientError::parse(error.to_string()))
}

/// Compatibility shim for list endpoints: some backend revisions answer
/// with a bare object or `null` instead of an array. Coerce and flag the
/// drift at the boundary so it stays visible.
fn normalize_list(path: &str, value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => {
            warn!(path, "list endpoint returned null, coercing to empty list");
            Vec::new()
        }
        other => {
            warn!(path, "list endpoint returned a single value, coercing to singleton list");
            vec![other]
        }
    }
}

/// Pulls the server's `detail` message out of an error response. Handles
/// both the plain-string form and the FastAPI validation form (a list of
/// objects carrying `msg`).
async fn error_detail(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    detail_from_body(&body)
}

fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail") {
        Some(Value::String(detail)) => Some(detail.clone()),
        Some(Value::Array(items)) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::storage::MemoryStorage;
    use serde_json::json;

    #[test]
    fn test_normalize_list_keeps_arrays() {
        let items = normalize_list("/machines", json!([{"a": 1}, {"a": 2}]));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_normalize_list_coerces_null_to_empty() {
        assert!(normalize_list("/teams", Value::Null).is_empty());
    }

    #[test]
    fn test_normalize_list_wraps_single_object() {
        let items = normalize_list("/parts", json!({"code": "P-1"}));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["code"], "P-1");
    }

    #[test]
    fn test_detail_extraction() {
        assert_eq!(
            detail_from_body(r#"{"detail": "Parte não encontrada"}"#),
            Some("Parte não encontrada".to_string())
        );
        // FastAPI validation errors arrive as a list of objects.
        assert_eq!(
            detail_from_body(r#"{"detail": [{"msg": "field required"}]}"#),
            Some("field required".to_string())
        );
        assert_eq!(detail_from_body("not json"), None);
        assert_eq!(detail_from_body(r#"{"other": 1}"#), None);
    }

    #[tokio::test]
    async fn test_endpoint_escapes_segments() {
        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())).await);
        let client =
            ApiClient::new(&Config::with_api_url("http://localhost:8000"), session).unwrap();

        let url = client.endpoint(&["machines", "SN 01/B"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/machines/SN%2001%2FB");
    }

    #[tokio::test]
    async fn test_rejects_malformed_base_url() {
        let session = Arc::new(SessionStore::new(Box::new(MemoryStorage::new())).await);
        let result = ApiClient::new(&Config::with_api_url("not a url"), session);
        assert!(matches!(result, Err(ClientError::Validation { .. })));
    }
}
