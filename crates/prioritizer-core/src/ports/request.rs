//! RequestStrategy port - エンドポイントごとのリクエスト組み立て
//!
//! 2 つのエンドポイントは運び方（body か URL か）だけが違うので、
//! 組み立てだけを差し替え可能にし、送信・エラー処理は 1 か所に書きます。

use reqwest::{Client, Request, Url};

use super::scoring::ScoringRequest;
use crate::domain::SessionError;

/// RequestStrategy は ScoringRequest を HTTP リクエストに変換
///
/// # 実装
/// - AnalyzeEndpoint: `POST /api/tasks/analyze/`（JSON body）
/// - SuggestEndpoint: `GET /api/tasks/suggest/?strategy=..&tasks=..`
pub trait RequestStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn build(
        &self,
        client: &Client,
        base_url: &Url,
        request: &ScoringRequest,
    ) -> Result<Request, SessionError>;
}
