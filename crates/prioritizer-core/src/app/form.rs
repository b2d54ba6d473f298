//! FormIngestor - 手入力 1 件の検証と追加
//!
//! 生の文字列を受け取り、NewTask に変換してから store に追加します。
//! 検証に失敗した場合 store は変更されません。

use crate::domain::{NewTask, TaskRecord, ValidationError};
use crate::store::TaskStore;

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub title: String,
    pub due_date: String,
    pub estimated_hours: String,
    pub importance: String,
    pub dependencies: String,
}

impl FormInput {
    pub fn new(
        title: impl Into<String>,
        estimated_hours: impl Into<String>,
        importance: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            estimated_hours: estimated_hours.into(),
            importance: importance.into(),
            ..Self::default()
        }
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    pub fn dependencies(mut self, dependencies: impl Into<String>) -> Self {
        self.dependencies = dependencies.into();
        self
    }

    /// Check every field and produce a draft.
    pub fn validate(&self) -> Result<NewTask, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let raw_hours = self.estimated_hours.trim();
        let estimated_hours = raw_hours
            .parse::<f64>()
            .ok()
            .filter(|h| h.is_finite())
            .ok_or_else(|| ValidationError::InvalidHours(raw_hours.to_string()))?;
        if estimated_hours < 0.0 {
            return Err(ValidationError::NegativeHours);
        }

        let raw_importance = self.importance.trim();
        let importance = raw_importance
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidImportance(raw_importance.to_string()))?;

        let due_date = Some(self.due_date.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(NewTask {
            title: title.to_string(),
            due_date,
            estimated_hours,
            importance,
            dependencies: split_dependencies(&self.dependencies),
        })
    }
}

/// `"a, ,b"` -> `["a", "b"]`
pub fn split_dependencies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct FormIngestor;

impl FormIngestor {
    /// Validate and append. On error the store is untouched.
    pub fn submit<'a>(
        store: &'a mut TaskStore,
        input: &FormInput,
    ) -> Result<&'a TaskRecord, ValidationError> {
        let task = input.validate()?;
        Ok(store.append(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn valid_input_is_appended() {
        let mut store = TaskStore::new();
        let input = FormInput::new("  Write report ", "2", "3")
            .due_date("2024-01-01")
            .dependencies("task_7, task_9");

        let record = FormIngestor::submit(&mut store, &input).unwrap();

        assert_eq!(record.id(), Some("task_0"));
        assert_eq!(record.title(), Some("Write report"));
        assert_eq!(record.due_date(), Some("2024-01-01"));
        assert_eq!(record.estimated_hours(), Some(2.0));
        assert_eq!(record.importance(), Some(3));
        assert_eq!(record.dependencies(), vec!["task_7", "task_9"]);
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    #[case::plain("a,b", vec!["a", "b"])]
    #[case::blank_segment("a, ,b", vec!["a", "b"])]
    #[case::padding("  x ,y  ,", vec!["x", "y"])]
    #[case::empty("", vec![])]
    #[case::only_commas(" , ,, ", vec![])]
    fn dependency_splitting(#[case] raw: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_dependencies(raw), expected);
    }

    #[rstest]
    #[case::empty_title(FormInput::new("", "2", "3"))]
    #[case::whitespace_title(FormInput::new("   ", "2", "3"))]
    #[case::hours_not_numeric(FormInput::new("T", "two", "3"))]
    #[case::hours_empty(FormInput::new("T", "", "3"))]
    #[case::hours_infinite(FormInput::new("T", "inf", "3"))]
    #[case::hours_nan(FormInput::new("T", "NaN", "3"))]
    #[case::hours_negative(FormInput::new("T", "-1", "3"))]
    #[case::importance_not_numeric(FormInput::new("T", "2", "high"))]
    #[case::importance_fractional(FormInput::new("T", "2", "3.5"))]
    #[case::importance_empty(FormInput::new("T", "2", ""))]
    fn invalid_input_leaves_store_untouched(#[case] input: FormInput) {
        let mut store = TaskStore::new();
        assert!(FormIngestor::submit(&mut store, &input).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn specific_errors() {
        assert_eq!(
            FormInput::new(" ", "1", "1").validate().unwrap_err(),
            ValidationError::EmptyTitle
        );
        assert_eq!(
            FormInput::new("T", "abc", "1").validate().unwrap_err(),
            ValidationError::InvalidHours("abc".into())
        );
        assert_eq!(
            FormInput::new("T", "1", "x").validate().unwrap_err(),
            ValidationError::InvalidImportance("x".into())
        );
    }

    #[test]
    fn empty_due_date_becomes_none() {
        let task = FormInput::new("T", "0", "1").due_date("  ").validate().unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.estimated_hours, 0.0);
    }
}
