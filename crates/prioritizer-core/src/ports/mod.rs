//! Ports - 抽象化レイヤー
//!
//! 外部（採点サービス、時計、採番）とのインターフェースを trait で定義し、
//! 実装の詳細を隠蔽します。テストではフェイク実装に差し替えます。

pub mod clock;
pub mod id_generator;
pub mod request;
pub mod scoring;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{CounterIdGenerator, IdGenerator};
pub use self::request::RequestStrategy;
pub use self::scoring::{ScoringRequest, ScoringService};
