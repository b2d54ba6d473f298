//! App - アプリケーション層
//!
//! ports と store を組み合わせて、ユーザー操作を実装します。
//!
//! # 主要コンポーネント
//! - **Session**: 操作の受け口（追加・読み込み・採点・提案）
//! - **SessionBuilder**: セッションの構築とワイヤリング
//! - **FormIngestor** / **TaskImporter**: store への入力経路
//! - **ResultProjector**: 採点結果 → 表示モデル
//! - **StatusReporter**: 最新のステータス表示

pub mod builder;
pub mod form;
pub mod importer;
pub mod projector;
pub mod session;
pub mod status;

pub use self::builder::{BuildError, SessionBuilder};
pub use self::form::{FormIngestor, FormInput};
pub use self::importer::{ImportMode, TaskImporter};
pub use self::projector::{ResultProjector, TaskView};
pub use self::session::{Completion, PendingRequest, RequestKind, Session};
pub use self::status::{Status, StatusReporter};
