//! ScoringService port - リモート採点サービスの抽象化
//!
//! 採点アルゴリズム自体はサービス側にあり、core は 2 つの契約だけを知っています。
//! - analyze: 全タスクを再採点（POST body）
//! - suggest: 今やるべき上位 3 件（GET query）

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{ScoredTaskRecord, SessionError, Strategy, TaskRecord};

/// Payload shared by both endpoints: `{ "tasks": [...], "strategy": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringRequest {
    pub tasks: Vec<TaskRecord>,
    pub strategy: Strategy,
}

impl ScoringRequest {
    pub fn new(tasks: Vec<TaskRecord>, strategy: Strategy) -> Self {
        Self { tasks, strategy }
    }

    /// Fails fast when there is nothing to score.
    pub fn ensure_not_empty(&self) -> Result<(), SessionError> {
        if self.tasks.is_empty() {
            return Err(SessionError::no_tasks());
        }
        Ok(())
    }
}

/// One outstanding request per call; no cancellation, no retries.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Re-score the whole collection.
    async fn analyze(&self, request: &ScoringRequest)
    -> Result<Vec<ScoredTaskRecord>, SessionError>;

    /// Top tasks to act on now (expected at most 3, not enforced).
    async fn suggest(&self, request: &ScoringRequest)
    -> Result<Vec<ScoredTaskRecord>, SessionError>;
}
