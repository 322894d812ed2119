//! Level threshold with parent inheritance

use super::log_level::{AtomicLevel, LogLevel};
use std::sync::Arc;

/// Threshold shared by one logger and, through `parent`, its ancestors.
///
/// Children hold the only references, pointing upward, so a chain can never
/// form a cycle. A gate left at `Uninitialized` defers to its parent; a chain
/// with no initialized gate resolves to `Off`.
#[derive(Debug, Default)]
pub struct LevelGate {
    level: AtomicLevel,
    parent: Option<Arc<LevelGate>>,
}

impl LevelGate {
    /// Root gate with an explicit threshold.
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: AtomicLevel::new(level),
            parent: None,
        }
    }

    /// Unset gate inheriting from `parent`.
    pub fn child_of(parent: Arc<LevelGate>) -> Self {
        Self {
            level: AtomicLevel::default(),
            parent: Some(parent),
        }
    }

    /// Level of this gate, or of the nearest ancestor that has one set.
    pub fn effective_level(&self) -> LogLevel {
        let mut gate = Some(self);
        while let Some(current) = gate {
            let level = current.level.load();
            if level != LogLevel::Uninitialized {
                return level;
            }
            gate = current.parent.as_deref();
        }
        LogLevel::Off
    }

    /// Set this gate's own level. `Uninitialized` restores inheritance.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level);
    }

    #[inline]
    pub fn loggable(&self, level: LogLevel) -> bool {
        level.is_emitting() && level >= self.effective_level()
    }
}
