//! SessionBuilder - セッションの構築とワイヤリング
//!
//! 起動時に必要な部品が揃っているかを検証します（Fail-fast）。

use std::sync::Arc;

use super::importer::ImportMode;
use super::session::Session;
use super::status::StatusReporter;
use crate::config::ClientConfig;
use crate::domain::{SessionError, Strategy};
use crate::impls::HttpScoringClient;
use crate::ports::{Clock, IdGenerator, ScoringService};
use crate::store::TaskStore;

/// SessionBuilder はセッションを構築
///
/// # 使用例
/// ```ignore
/// let session = SessionBuilder::new()
///     .service(Arc::new(HttpScoringClient::new("http://127.0.0.1:8000")?))
///     .strategy("high_impact")
///     .build()?;
/// ```
#[derive(Default)]
pub struct SessionBuilder {
    service: Option<Arc<dyn ScoringService>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    strategy: Strategy,
    import_mode: ImportMode,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no scoring service configured")]
    MissingService,

    #[error(transparent)]
    Client(#[from] SessionError),
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// HTTP client, strategy and import mode taken from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, BuildError> {
        let client = HttpScoringClient::from_config(config)?;
        Ok(Self::new()
            .service(Arc::new(client))
            .strategy(config.default_strategy.clone())
            .import_mode(config.import_mode))
    }

    pub fn service(mut self, service: Arc<dyn ScoringService>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn strategy(mut self, strategy: impl Into<Strategy>) -> Self {
        self.strategy = strategy.into();
        self
    }

    pub fn import_mode(mut self, mode: ImportMode) -> Self {
        self.import_mode = mode;
        self
    }

    pub fn build(self) -> Result<Session, BuildError> {
        let service = self.service.ok_or(BuildError::MissingService)?;
        let store = match self.ids {
            Some(ids) => TaskStore::with_id_generator(ids),
            None => TaskStore::new(),
        };
        let status = match self.clock {
            Some(clock) => StatusReporter::with_clock(clock),
            None => StatusReporter::new(),
        };
        Ok(Session::from_parts(
            service,
            store,
            status,
            self.strategy,
            self.import_mode,
        ))
    }
}
