//! Session - ユーザー操作の受け口
//!
//! 1 セッション = 1 つの TaskStore。操作ごとに StatusReporter へ結果を報告し、
//! 失敗した操作は状態を一切変えません。
//!
//! # 古い応答の扱い
//! リクエストは発行順に連番を持ちます。より新しいリクエストの結果が
//! 反映済みなら、遅れて届いた古い結果は破棄します。

use std::sync::Arc;

use tracing::{info, warn};

use super::form::{FormIngestor, FormInput};
use super::importer::{ImportMode, TaskImporter};
use super::projector::{ResultProjector, TaskView};
use super::status::{Status, StatusReporter};
use crate::domain::{ScoredTaskRecord, SessionError, Strategy, TaskRecord};
use crate::ports::{ScoringRequest, ScoringService};
use crate::store::TaskStore;

pub const TASK_ADDED: &str = "Task added.";
pub const TASKS_LOADED: &str = "Tasks loaded from JSON.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Analyze,
    Suggest,
}

impl RequestKind {
    fn in_flight_message(&self) -> &'static str {
        match self {
            RequestKind::Analyze => "Analyzing tasks...",
            RequestKind::Suggest => "Fetching top 3 suggestions...",
        }
    }

    fn done_message(&self, strategy: &Strategy) -> String {
        match self {
            RequestKind::Analyze => format!("Tasks analyzed with \"{strategy}\" strategy."),
            RequestKind::Suggest => format!("Top 3 tasks to work on today ({strategy})."),
        }
    }
}

/// A request that has been issued but whose response is not applied yet.
///
/// Owns a snapshot of the tasks, so the session stays usable while it is in
/// flight.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    seq: u64,
    kind: RequestKind,
    request: ScoringRequest,
}

impl PendingRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn request(&self) -> &ScoringRequest {
        &self.request
    }

    pub async fn send(
        &self,
        service: &dyn ScoringService,
    ) -> Result<Vec<ScoredTaskRecord>, SessionError> {
        match self.kind {
            RequestKind::Analyze => service.analyze(&self.request).await,
            RequestKind::Suggest => service.suggest(&self.request).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request already completed; nothing was changed.
    Discarded,
}

pub struct Session {
    store: TaskStore,
    status: StatusReporter,
    strategy: Strategy,
    display: Vec<TaskView>,
    service: Arc<dyn ScoringService>,
    import_mode: ImportMode,
    issued: u64,
    applied: u64,
}

impl Session {
    pub fn new(service: Arc<dyn ScoringService>) -> Self {
        Self::from_parts(
            service,
            TaskStore::new(),
            StatusReporter::new(),
            Strategy::default(),
            ImportMode::default(),
        )
    }

    pub(crate) fn from_parts(
        service: Arc<dyn ScoringService>,
        store: TaskStore,
        status: StatusReporter,
        strategy: Strategy,
        import_mode: ImportMode,
    ) -> Self {
        Self {
            store,
            status,
            strategy,
            display: Vec::new(),
            service,
            import_mode,
            issued: 0,
            applied: 0,
        }
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        self.store.all()
    }

    pub fn display(&self) -> &[TaskView] {
        &self.display
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.latest()
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn set_strategy(&mut self, strategy: impl Into<Strategy>) {
        self.strategy = strategy.into();
    }

    pub fn import_mode(&self) -> ImportMode {
        self.import_mode
    }

    /// Manual entry. `Ok` means the form can be cleared.
    pub fn add_task(&mut self, input: &FormInput) -> Result<&TaskRecord, SessionError> {
        if let Err(e) = FormIngestor::submit(&mut self.store, input) {
            let err = SessionError::from(e);
            self.status.error(&err);
            return Err(err);
        }
        self.show_local();
        self.status.success(TASK_ADDED);
        let last = self.store.len() - 1;
        Ok(&self.store.all()[last])
    }

    /// Replace all tasks from JSON text. Returns the number loaded.
    pub fn load_json(&mut self, raw: &str) -> Result<usize, SessionError> {
        match TaskImporter::load(&mut self.store, raw, self.import_mode) {
            Ok(count) => {
                self.show_local();
                self.status.success(TASKS_LOADED);
                Ok(count)
            }
            Err(err) => {
                self.status.error(&err);
                Err(err)
            }
        }
    }

    pub async fn analyze(&mut self) -> Result<Completion, SessionError> {
        self.run(RequestKind::Analyze).await
    }

    pub async fn suggest(&mut self) -> Result<Completion, SessionError> {
        self.run(RequestKind::Suggest).await
    }

    pub fn begin_analysis(&mut self) -> Result<PendingRequest, SessionError> {
        self.begin(RequestKind::Analyze)
    }

    pub fn begin_suggestion(&mut self) -> Result<PendingRequest, SessionError> {
        self.begin(RequestKind::Suggest)
    }

    pub fn service(&self) -> Arc<dyn ScoringService> {
        Arc::clone(&self.service)
    }

    /// Apply the outcome of `pending`, unless a newer request already completed.
    ///
    /// Failures leave the store and the current display as they were.
    pub fn complete(
        &mut self,
        pending: PendingRequest,
        result: Result<Vec<ScoredTaskRecord>, SessionError>,
    ) -> Result<Completion, SessionError> {
        if pending.seq < self.applied {
            warn!(
                seq = pending.seq,
                applied = self.applied,
                kind = ?pending.kind,
                "discarding stale response"
            );
            return Ok(Completion::Discarded);
        }
        self.applied = pending.seq;

        match result {
            Ok(scored) => {
                info!(kind = ?pending.kind, results = scored.len(), "scoring results received");
                self.display = ResultProjector::project(&scored);
                self.status
                    .success(pending.kind.done_message(&pending.request.strategy));
                Ok(Completion::Applied)
            }
            Err(err) => {
                self.status.error(&err);
                Err(err)
            }
        }
    }

    async fn run(&mut self, kind: RequestKind) -> Result<Completion, SessionError> {
        let pending = self.begin(kind)?;
        let service = self.service();
        let result = pending.send(service.as_ref()).await;
        self.complete(pending, result)
    }

    fn begin(&mut self, kind: RequestKind) -> Result<PendingRequest, SessionError> {
        if self.store.is_empty() {
            let err = SessionError::no_tasks();
            self.status.error(&err);
            return Err(err);
        }
        self.issued += 1;
        self.status.success(kind.in_flight_message());
        Ok(PendingRequest {
            seq: self.issued,
            kind,
            request: ScoringRequest::new(self.store.all().to_vec(), self.strategy.clone()),
        })
    }

    fn show_local(&mut self) {
        self.display = ResultProjector::project_local(self.store.all());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{ErrorKind, Tier};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Echoes the request tasks back with a fixed score, counting calls.
    #[derive(Default)]
    pub(crate) struct FakeService {
        pub calls: Mutex<Vec<(RequestKind, ScoringRequest)>>,
        pub fail_with: Mutex<Option<SessionError>>,
    }

    impl FakeService {
        fn respond(
            &self,
            kind: RequestKind,
            request: &ScoringRequest,
        ) -> Result<Vec<ScoredTaskRecord>, SessionError> {
            self.calls.lock().unwrap().push((kind, request.clone()));
            if let Some(err) = self.fail_with.lock().unwrap().clone() {
                return Err(err);
            }
            let take = match kind {
                RequestKind::Analyze => request.tasks.len(),
                RequestKind::Suggest => 3,
            };
            Ok(request
                .tasks
                .iter()
                .take(take)
                .map(|t| {
                    let mut fields = t.as_map().clone();
                    fields.insert("score".into(), json!(0.8));
                    ScoredTaskRecord::new(TaskRecord::from_map(fields))
                })
                .collect())
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ScoringService for FakeService {
        async fn analyze(
            &self,
            request: &ScoringRequest,
        ) -> Result<Vec<ScoredTaskRecord>, SessionError> {
            self.respond(RequestKind::Analyze, request)
        }

        async fn suggest(
            &self,
            request: &ScoringRequest,
        ) -> Result<Vec<ScoredTaskRecord>, SessionError> {
            self.respond(RequestKind::Suggest, request)
        }
    }

    fn session() -> (Session, Arc<FakeService>) {
        let service = Arc::new(FakeService::default());
        (Session::new(service.clone()), service)
    }

    fn scored(title: &str, score: f64) -> ScoredTaskRecord {
        serde_json::from_value(json!({"title": title, "score": score})).unwrap()
    }

    fn status_text(session: &Session) -> &str {
        &session.status().unwrap().text
    }

    #[test]
    fn submit_then_import_end_to_end() {
        let (mut session, _) = session();

        let input = FormInput::new("Write report", "2", "3").due_date("2024-01-01");
        let record = session.add_task(&input).unwrap().clone();

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "id": "task_0",
                "title": "Write report",
                "due_date": "2024-01-01",
                "estimated_hours": 2.0,
                "importance": 3,
                "dependencies": [],
            })
        );
        assert_eq!(session.tasks().len(), 1);
        assert_eq!(status_text(&session), TASK_ADDED);
        assert_eq!(session.display()[0].tier, Tier::Low);

        session
            .load_json(r#"[{"title":"X","estimated_hours":1,"importance":1}]"#)
            .unwrap();

        assert_eq!(session.tasks().len(), 1);
        assert_eq!(session.tasks()[0].title(), Some("X"));
        assert_eq!(status_text(&session), TASKS_LOADED);
        assert_eq!(session.display()[0].title, "X");
    }

    #[test]
    fn failed_add_reports_error_and_keeps_state() {
        let (mut session, _) = session();
        let err = session.add_task(&FormInput::new("", "1", "1")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(session.tasks().is_empty());
        assert!(session.status().unwrap().is_error);
    }

    #[test]
    fn failed_import_keeps_tasks_and_display() {
        let (mut session, _) = session();
        session.add_task(&FormInput::new("A", "1", "1")).unwrap();
        let display = session.display().to_vec();

        let err = session.load_json("not json").unwrap_err();

        assert_eq!(err.to_string(), "Invalid JSON.");
        assert_eq!(session.tasks().len(), 1);
        assert_eq!(session.display(), display.as_slice());
        assert!(session.status().unwrap().is_error);
    }

    #[tokio::test]
    async fn empty_store_short_circuits_without_request() {
        let (mut session, service) = session();

        let err = session.analyze().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(status_text(&session), "No tasks to analyze.");

        let err = session.suggest().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);

        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn analyze_shows_results_without_touching_store() {
        let (mut session, service) = session();
        session.add_task(&FormInput::new("A", "1", "5")).unwrap();
        session.set_strategy("deadline_driven");

        assert_eq!(session.analyze().await.unwrap(), Completion::Applied);

        let calls = service.calls.lock().unwrap();
        assert_eq!(calls[0].0, RequestKind::Analyze);
        assert_eq!(calls[0].1.strategy.as_str(), "deadline_driven");
        drop(calls);

        assert_eq!(session.display()[0].tier, Tier::High);
        assert_eq!(session.tasks()[0].get("score"), None);
        assert_eq!(
            status_text(&session),
            "Tasks analyzed with \"deadline_driven\" strategy."
        );
    }

    #[tokio::test]
    async fn suggest_reports_top_three() {
        let (mut session, _) = session();
        for title in ["A", "B", "C", "D"] {
            session.add_task(&FormInput::new(title, "1", "5")).unwrap();
        }

        session.suggest().await.unwrap();

        assert_eq!(session.display().len(), 3);
        assert_eq!(
            status_text(&session),
            "Top 3 tasks to work on today (smart_balance)."
        );
    }

    #[tokio::test]
    async fn service_error_keeps_previous_display() {
        let (mut session, service) = session();
        session.add_task(&FormInput::new("A", "1", "5")).unwrap();
        session.analyze().await.unwrap();
        let display = session.display().to_vec();

        *service.fail_with.lock().unwrap() = Some(SessionError::service(Some(400), "bad strategy"));
        let err = session.analyze().await.unwrap_err();

        assert_eq!(err.to_string(), "bad strategy");
        assert_eq!(status_text(&session), "bad strategy");
        assert!(session.status().unwrap().is_error);
        assert_eq!(session.display(), display.as_slice());
    }

    #[test]
    fn begin_reports_in_flight_message() {
        let (mut session, _) = session();
        session.add_task(&FormInput::new("A", "1", "5")).unwrap();

        let pending = session.begin_suggestion().unwrap();
        assert_eq!(pending.kind(), RequestKind::Suggest);
        assert_eq!(status_text(&session), "Fetching top 3 suggestions...");

        session.begin_analysis().unwrap();
        assert_eq!(status_text(&session), "Analyzing tasks...");
    }

    #[test]
    fn stale_response_is_discarded() {
        let (mut session, _) = session();
        session.add_task(&FormInput::new("A", "1", "5")).unwrap();

        let older = session.begin_analysis().unwrap();
        let newer = session.begin_suggestion().unwrap();
        assert!(older.seq() < newer.seq());

        let applied = session
            .complete(newer, Ok(vec![scored("fresh", 0.9)]))
            .unwrap();
        assert_eq!(applied, Completion::Applied);

        let discarded = session
            .complete(older, Ok(vec![scored("stale", 0.1)]))
            .unwrap();
        assert_eq!(discarded, Completion::Discarded);

        assert_eq!(session.display().len(), 1);
        assert_eq!(session.display()[0].title, "fresh");
        assert_eq!(
            status_text(&session),
            "Top 3 tasks to work on today (smart_balance)."
        );
    }

    #[test]
    fn in_order_completions_are_all_applied() {
        let (mut session, _) = session();
        session.add_task(&FormInput::new("A", "1", "5")).unwrap();

        let first = session.begin_analysis().unwrap();
        let second = session.begin_analysis().unwrap();

        session.complete(first, Ok(vec![scored("one", 0.6)])).unwrap();
        assert_eq!(session.display()[0].title, "one");
        session.complete(second, Ok(vec![scored("two", 0.6)])).unwrap();
        assert_eq!(session.display()[0].title, "two");
    }

    #[test]
    fn strategy_is_captured_when_request_begins() {
        let (mut session, _) = session();
        session.add_task(&FormInput::new("A", "1", "5")).unwrap();

        let pending = session.begin_analysis().unwrap();
        session.set_strategy("fastest_wins");

        assert_eq!(pending.request().strategy.as_str(), "smart_balance");
        session.complete(pending, Ok(vec![])).unwrap();
        assert_eq!(
            status_text(&session),
            "Tasks analyzed with \"smart_balance\" strategy."
        );
    }
}
