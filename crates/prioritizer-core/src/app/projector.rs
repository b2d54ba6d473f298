//! ResultProjector - 採点結果を表示用モデルに変換
//!
//! 純粋関数。並べ替えはしない（順序はサービスの責任）。

use serde::Serialize;
use serde_json::Value;

use crate::domain::{ScoredTaskRecord, TaskRecord, Tier};

pub const NO_TITLE: &str = "(no title)";
pub const NONE: &str = "none";
pub const NOT_AVAILABLE: &str = "n/a";

/// One card of the result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    pub tier: Tier,
    pub score: f64,
    pub score_label: String,
    pub title: String,
    pub due_date: String,
    pub estimated_hours: String,
    pub importance: String,
    pub dependencies: String,
    pub explanation: String,
}

pub struct ResultProjector;

impl ResultProjector {
    pub fn project(scored: &[ScoredTaskRecord]) -> Vec<TaskView> {
        scored.iter().map(Self::view).collect()
    }

    /// Local records have no score yet, so every entry lands in the low tier.
    pub fn project_local(tasks: &[TaskRecord]) -> Vec<TaskView> {
        tasks
            .iter()
            .map(|t| Self::view(&ScoredTaskRecord::new(t.clone())))
            .collect()
    }

    pub fn view(scored: &ScoredTaskRecord) -> TaskView {
        let record = scored.record();
        let score = scored.score();
        let dependencies = record.dependencies();

        TaskView {
            tier: Tier::from_score(score),
            score,
            score_label: format!("{score:.3}"),
            title: non_empty(record.title()).unwrap_or(NO_TITLE).to_string(),
            due_date: non_empty(record.due_date()).unwrap_or(NONE).to_string(),
            estimated_hours: display_value(record.get("estimated_hours")),
            importance: display_value(record.get("importance")),
            dependencies: if dependencies.is_empty() {
                NONE.to_string()
            } else {
                dependencies.join(", ")
            },
            explanation: scored.explanation().to_string(),
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Strings are shown bare, other JSON values in their JSON form.
fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
