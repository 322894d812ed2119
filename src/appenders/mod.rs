//! Appender implementations

pub mod console;

pub use console::{ConsoleAppender, ConsoleTarget};

// Re-export trait for convenience
pub use crate::core::Appender;
