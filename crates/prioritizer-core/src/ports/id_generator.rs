//! IdGenerator port - ローカル id の採番
//!
//! trait にしておくことで、テストや別の採番規則に差し替えられます。

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::LocalTaskId;

/// IdGenerator はセッション内で一意な id を発行
///
/// # 不変条件
/// - 発行した id は二度と返さない
/// - 連番は増える一方（store の置き換えでもリセットしない）
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> LocalTaskId;
}

/// 0 から始まる連番
#[derive(Debug, Default)]
pub struct CounterIdGenerator {
    next: AtomicU64,
}

impl CounterIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for CounterIdGenerator {
    fn next_id(&self) -> LocalTaskId {
        LocalTaskId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero_and_increases() {
        let id_gen = CounterIdGenerator::new();
        let ids: Vec<_> = (0..5).map(|_| id_gen.next_id()).collect();

        assert_eq!(ids[0].to_string(), "task_0");
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn custom_start() {
        let id_gen = CounterIdGenerator::starting_at(40);
        assert_eq!(id_gen.next_id().to_string(), "task_40");
        assert_eq!(id_gen.next_id().to_string(), "task_41");
    }
}
