//! HttpScoringClient - reqwest による ScoringService 実装
//!
//! 送信・応答の解釈・エラー変換はここ 1 か所だけ。
//! エンドポイントごとの違いは RequestStrategy が吸収します。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::{debug, warn};

use super::endpoint::{AnalyzeEndpoint, SuggestEndpoint};
use crate::config::ClientConfig;
use crate::domain::{ScoredTaskRecord, SessionError};
use crate::ports::{RequestStrategy, ScoringRequest, ScoringService};

pub struct HttpScoringClient {
    client: Client,
    base_url: Url,
    analyze: AnalyzeEndpoint,
    suggest: SuggestEndpoint,
}

impl HttpScoringClient {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: &str) -> Result<Self, SessionError> {
        Self::with_client(Client::new(), base_url, None)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, SessionError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SessionError::service(None, format!("failed to build HTTP client: {e}")))?;
        Self::with_client(client, &config.base_url, config.max_url_length)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        max_url_length: Option<usize>,
    ) -> Result<Self, SessionError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            analyze: AnalyzeEndpoint,
            suggest: SuggestEndpoint::new(max_url_length),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(
        &self,
        endpoint: &dyn RequestStrategy,
        request: &ScoringRequest,
    ) -> Result<Vec<ScoredTaskRecord>, SessionError> {
        request.ensure_not_empty()?;

        let built = endpoint.build(&self.client, &self.base_url, request)?;
        debug!(
            endpoint = endpoint.name(),
            method = %built.method(),
            tasks = request.tasks.len(),
            "sending scoring request"
        );

        let response = self.client.execute(built).await.map_err(|e| {
            warn!(endpoint = endpoint.name(), error = %e, "scoring request failed");
            SessionError::service(None, e.to_string())
        })?;

        decode(endpoint.name(), response).await
    }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    async fn analyze(
        &self,
        request: &ScoringRequest,
    ) -> Result<Vec<ScoredTaskRecord>, SessionError> {
        self.send(&self.analyze, request).await
    }

    async fn suggest(
        &self,
        request: &ScoringRequest,
    ) -> Result<Vec<ScoredTaskRecord>, SessionError> {
        self.send(&self.suggest, request).await
    }
}

/// A trailing slash keeps any path prefix when endpoint paths are joined.
fn parse_base_url(raw: &str) -> Result<Url, SessionError> {
    let mut url = Url::parse(raw)
        .map_err(|e| SessionError::service(None, format!("invalid service url {raw:?}: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn decode(
    endpoint: &str,
    response: Response,
) -> Result<Vec<ScoredTaskRecord>, SessionError> {
    let status = response.status();
    // A body we cannot read is treated like an empty one.
    let body = response.bytes().await.unwrap_or_default();

    if !status.is_success() {
        let message = error_message(&body);
        warn!(endpoint, status = status.as_u16(), %message, "scoring service returned an error");
        return Err(SessionError::service(Some(status.as_u16()), message));
    }

    serde_json::from_slice::<Vec<ScoredTaskRecord>>(&body).map_err(|e| {
        warn!(endpoint, error = %e, "unexpected scoring response body");
        SessionError::service(Some(status.as_u16()), "Invalid response from server")
    })
}

/// Message from an optional `{ "error": ... }` body.
///
/// The service reports per-field validation problems as an object, which is
/// shown as compact JSON.
fn error_message(body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return SessionError::SERVER_ERROR.to_string();
    };
    match value.get("error") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(v @ (Value::Object(_) | Value::Array(_))) => v.to_string(),
        _ => SessionError::SERVER_ERROR.to_string(),
    }
}
