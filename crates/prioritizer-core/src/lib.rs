//! prioritizer-core
//!
//! Client-side task list and orchestration for a remote task scoring service.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（TaskRecord, ScoredTaskRecord, Strategy, Tier, errors）
//! - **ports**: 抽象化レイヤー（ScoringService, RequestStrategy, Clock, IdGenerator）
//! - **impls**: 実装（reqwest による HttpScoringClient とエンドポイント）
//! - **store**: セッション中のタスク一覧（TaskStore）
//! - **app**: アプリケーション層（Session, FormIngestor, TaskImporter, ResultProjector, StatusReporter）
//! - **config**: クライアント設定（TOML）

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod store;

pub use app::{Session, SessionBuilder};
pub use config::ClientConfig;
pub use domain::{SessionError, Strategy, TaskRecord};
