//! Endpoint request builders for the scoring service.

use reqwest::{Client, Request, Url};
use tracing::debug;

use crate::domain::SessionError;
use crate::ports::{RequestStrategy, ScoringRequest};

pub const ANALYZE_PATH: &str = "api/tasks/analyze/";
pub const SUGGEST_PATH: &str = "api/tasks/suggest/";

fn endpoint_url(base_url: &Url, path: &str) -> Result<Url, SessionError> {
    base_url
        .join(path)
        .map_err(|e| SessionError::service(None, format!("invalid service url: {e}")))
}

fn build_error(e: reqwest::Error) -> SessionError {
    SessionError::service(None, e.to_string())
}

/// `POST /api/tasks/analyze/` with the payload as JSON body.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeEndpoint;

impl RequestStrategy for AnalyzeEndpoint {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn build(
        &self,
        client: &Client,
        base_url: &Url,
        request: &ScoringRequest,
    ) -> Result<Request, SessionError> {
        let url = endpoint_url(base_url, ANALYZE_PATH)?;
        client.post(url).json(request).build().map_err(build_error)
    }
}

/// `GET /api/tasks/suggest/?strategy=<s>&tasks=<url-encoded JSON array>`.
///
/// The payload travels in the address, so large collections can exceed what
/// servers accept. When `max_url_length` is set the request is refused locally
/// instead of being sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestEndpoint {
    max_url_length: Option<usize>,
}

impl SuggestEndpoint {
    pub fn new(max_url_length: Option<usize>) -> Self {
        Self { max_url_length }
    }
}

impl RequestStrategy for SuggestEndpoint {
    fn name(&self) -> &'static str {
        "suggest"
    }

    fn build(
        &self,
        client: &Client,
        base_url: &Url,
        request: &ScoringRequest,
    ) -> Result<Request, SessionError> {
        let url = endpoint_url(base_url, SUGGEST_PATH)?;
        let tasks = serde_json::to_string(&request.tasks)
            .map_err(|e| SessionError::service(None, format!("failed to encode tasks: {e}")))?;
        let built = client
            .get(url)
            .query(&[("strategy", request.strategy.as_str()), ("tasks", tasks.as_str())])
            .build()
            .map_err(build_error)?;

        let length = built.url().as_str().len();
        debug!(length, "built suggest url");
        if let Some(limit) = self.max_url_length
            && length > limit
        {
            return Err(SessionError::RequestTooLarge { length, limit });
        }
        Ok(built)
    }
}
