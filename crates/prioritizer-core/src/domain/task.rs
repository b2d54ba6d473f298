//! Task records - ローカルのタスクと採点済みタスク
//!
//! `TaskRecord` は JSON オブジェクトをそのまま保持します。
//! - フォーム経由: `NewTask`（検証済み）から store が id を振って生成
//! - JSON インポート経由: 要素オブジェクトを無検証で採用
//!
//! アクセサは寛容に読み取り、型が違うフィールドは「無い」ものとして扱います。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Validated draft of a manually entered task (no id yet).
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub due_date: Option<String>,
    pub estimated_hours: f64,
    pub importance: i64,
    pub dependencies: Vec<String>,
}

/// A task as held by the store and sent to the scoring service.
///
/// Serialized verbatim, so fields the core does not know about survive the
/// round-trip to the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskRecord {
    fields: Map<String, Value>,
}

impl TaskRecord {
    /// Build a record from a draft and an already assigned id.
    pub fn from_new(id: String, task: NewTask) -> Self {
        let mut fields = Map::new();
        fields.insert("id".into(), Value::String(id));
        fields.insert("title".into(), Value::String(task.title));
        fields.insert(
            "due_date".into(),
            task.due_date.map(Value::String).unwrap_or(Value::Null),
        );
        fields.insert("estimated_hours".into(), Value::from(task.estimated_hours));
        fields.insert("importance".into(), Value::from(task.importance));
        fields.insert(
            "dependencies".into(),
            Value::Array(task.dependencies.into_iter().map(Value::String).collect()),
        );
        Self { fields }
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn due_date(&self) -> Option<&str> {
        self.str_field("due_date")
    }

    pub fn estimated_hours(&self) -> Option<f64> {
        self.fields.get("estimated_hours").and_then(Value::as_f64)
    }

    /// Integer importance. Floats with no fractional part are accepted
    /// since JSON producers often emit `3.0`.
    pub fn importance(&self) -> Option<i64> {
        let value = self.fields.get("importance")?;
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        })
    }

    /// Dependency ids; non-string entries are skipped.
    pub fn dependencies(&self) -> Vec<&str> {
        match self.fields.get("dependencies") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// A task as returned by the scoring service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoredTaskRecord {
    record: TaskRecord,
}

impl ScoredTaskRecord {
    pub fn new(record: TaskRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &TaskRecord {
        &self.record
    }

    /// Score reported by the service, 0.0 when absent. Not clamped.
    pub fn score(&self) -> f64 {
        self.record
            .get("score")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    pub fn explanation(&self) -> &str {
        self.record
            .get("explanation")
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

impl From<TaskRecord> for ScoredTaskRecord {
    fn from(record: TaskRecord) -> Self {
        Self::new(record)
    }
}
