//! Locally assigned task identifiers.
//!
//! フォームから追加したタスクにだけ store が id を振ります。
//! 形式は `task_<n>`、n はセッション内で単調増加（再利用しない）。

use std::fmt;

/// Identifier of a task entered in this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalTaskId(u64);

impl LocalTaskId {
    pub const PREFIX: &'static str = "task_";

    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub fn seq(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LocalTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_prefix() {
        assert_eq!(LocalTaskId::new(0).to_string(), "task_0");
        assert_eq!(LocalTaskId::new(17).to_string(), "task_17");
    }

    #[test]
    fn ids_order_by_sequence() {
        assert!(LocalTaskId::new(1) < LocalTaskId::new(2));
    }
}
