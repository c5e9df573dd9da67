use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Swallows engine output. Injected where assertions look at state and
/// events rather than log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentLogger;

impl DomainLogger for SilentLogger {
    fn info(&self, _msg: &str) {}

    fn warn(&self, _msg: &str) {}

    fn error(&self, _msg: &str) {}
}

pub fn init_noop_logger() -> DynLogger {
    Arc::new(SilentLogger)
}
