//! TaskStore - セッション中のタスク一覧（正本）
//!
//! - `append`: フォーム由来。id を採番して末尾に追加
//! - `replace_all`: JSON インポート由来。中身をそのまま採用（検証しない）
//! - 削除操作は無い
//!
//! サーバーの採点結果はここへ書き戻しません（表示専用）。

use std::sync::Arc;

use tracing::info;

use crate::domain::{NewTask, TaskRecord};
use crate::ports::{CounterIdGenerator, IdGenerator};

pub struct TaskStore {
    tasks: Vec<TaskRecord>,
    ids: Arc<dyn IdGenerator>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::with_id_generator(Arc::new(CounterIdGenerator::new()))
    }

    pub fn with_id_generator(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            tasks: Vec::new(),
            ids,
        }
    }

    /// Append a draft with a freshly assigned id, preserving insertion order.
    pub fn append(&mut self, task: NewTask) -> &TaskRecord {
        let id = self.ids.next_id();
        info!(%id, title = %task.title, "task added");
        self.tasks.push(TaskRecord::from_new(id.to_string(), task));
        &self.tasks[self.tasks.len() - 1]
    }

    /// Discard everything and adopt `records` as given.
    ///
    /// Imported ids are not checked against each other or against the
    /// local counter, which keeps counting from where it was.
    pub fn replace_all(&mut self, records: Vec<TaskRecord>) {
        info!(previous = self.tasks.len(), loaded = records.len(), "task list replaced");
        self.tasks = records;
    }

    pub fn all(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
