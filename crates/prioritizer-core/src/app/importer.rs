//! TaskImporter - JSON テキストからの一括読み込み
//!
//! all-or-nothing: 途中で失敗したら store には一切触れません。
//! Lenient（既定）では要素オブジェクトを無検証で採用し、
//! Strict では手入力と同じ基準で各要素を検証します。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{SessionError, TaskRecord, ValidationError};
use crate::store::TaskStore;

pub const EMPTY_INPUT: &str = "Please paste JSON first.";
pub const INVALID_JSON: &str = "Invalid JSON.";
pub const NOT_AN_ARRAY: &str = "JSON must be an array of tasks.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    #[default]
    Lenient,
    Strict,
}

pub struct TaskImporter;

impl TaskImporter {
    /// Parse `raw` into records without touching any store.
    pub fn parse(raw: &str, mode: ImportMode) -> Result<Vec<TaskRecord>, SessionError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SessionError::Parse(EMPTY_INPUT.to_string()));
        }

        let value: Value =
            serde_json::from_str(raw).map_err(|_| SessionError::Parse(INVALID_JSON.to_string()))?;
        let Value::Array(items) = value else {
            return Err(SessionError::Shape(NOT_AN_ARRAY.to_string()));
        };

        let records = items
            .into_iter()
            .map(|item| match item {
                Value::Object(fields) => Ok(TaskRecord::from_map(fields)),
                _ => Err(SessionError::Shape(NOT_AN_ARRAY.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if mode == ImportMode::Strict {
            for (index, record) in records.iter().enumerate() {
                check_record(record)
                    .map_err(|reason| ValidationError::ImportedTask { index, reason })?;
            }
        }
        Ok(records)
    }

    /// Parse and, only on success, replace the store contents.
    pub fn load(store: &mut TaskStore, raw: &str, mode: ImportMode) -> Result<usize, SessionError> {
        let records = Self::parse(raw, mode)?;
        let count = records.len();
        store.replace_all(records);
        Ok(count)
    }
}

/// Same standard as manual entry.
fn check_record(record: &TaskRecord) -> Result<(), String> {
    if record.title().is_none_or(|t| t.trim().is_empty()) {
        return Err("title is required and must be a string".into());
    }
    match record.estimated_hours() {
        None => return Err("estimated_hours must be a number".into()),
        Some(h) if h < 0.0 => return Err("estimated_hours must be >= 0".into()),
        Some(_) => {}
    }
    if record.importance().is_none() {
        return Err("importance must be an integer".into());
    }
    if record
        .get("due_date")
        .is_some_and(|d| !(d.is_null() || d.is_string()))
    {
        return Err("due_date must be a string (YYYY-MM-DD)".into());
    }
    if record
        .get("dependencies")
        .is_some_and(|d| !(d.is_null() || d.is_array()))
    {
        return Err("dependencies must be a list".into());
    }
    Ok(())
}
