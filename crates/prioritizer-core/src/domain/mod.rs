//! Domain model (tasks, ids, strategy, tiers, errors).

pub mod errors;
pub mod ids;
pub mod strategy;
pub mod task;
pub mod tier;

pub use self::errors::{ErrorKind, SessionError, ValidationError};
pub use self::ids::LocalTaskId;
pub use self::strategy::Strategy;
pub use self::task::{NewTask, ScoredTaskRecord, TaskRecord};
pub use self::tier::Tier;
