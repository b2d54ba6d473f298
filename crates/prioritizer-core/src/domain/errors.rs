//! Errors - エラー型と分類
//!
//! どのエラーも発生地点で終端し、自動リトライはしません。
//! Display の文字列がそのままステータス表示になります。

use thiserror::Error;

/// ErrorKind はエラーの分類
///
/// - Validation: 手入力（または strict インポート）の不備。store は変更されない
/// - Parse / Shape: JSON インポートの不備。store は変更されない
/// - Precondition: タスクが空。リクエストは送らない
/// - Service: 非 2xx 応答、通信失敗、応答の形式不正
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Parse,
    Shape,
    Precondition,
    Service,
}

/// Problems with a single task's fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please fill in title, estimated hours and importance. (title is empty)")]
    EmptyTitle,

    #[error("Please fill in title, estimated hours and importance. (estimated hours {0:?} is not a number)")]
    InvalidHours(String),

    #[error("Estimated hours must be >= 0.")]
    NegativeHours,

    #[error("Please fill in title, estimated hours and importance. (importance {0:?} is not an integer)")]
    InvalidImportance(String),

    #[error("Task #{index} in JSON is invalid: {reason}")]
    ImportedTask { index: usize, reason: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Shape(String),

    #[error("{0}")]
    Precondition(String),

    #[error("{message}")]
    Service {
        status: Option<u16>,
        message: String,
    },

    #[error("Request is too large to send ({length} bytes, limit {limit}).")]
    RequestTooLarge { length: usize, limit: usize },
}

impl SessionError {
    pub const NO_TASKS: &'static str = "No tasks to analyze.";
    pub const SERVER_ERROR: &'static str = "Server error";

    pub fn no_tasks() -> Self {
        SessionError::Precondition(Self::NO_TASKS.to_string())
    }

    pub fn service(status: Option<u16>, message: impl Into<String>) -> Self {
        SessionError::Service {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Validation(_) => ErrorKind::Validation,
            SessionError::Parse(_) => ErrorKind::Parse,
            SessionError::Shape(_) => ErrorKind::Shape,
            SessionError::Precondition(_) => ErrorKind::Precondition,
            SessionError::Service { .. } | SessionError::RequestTooLarge { .. } => {
                ErrorKind::Service
            }
        }
    }
}
