use crate::domains::logger::DomainLogger;
use std::sync::Arc;

struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "gridbots::engine", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "gridbots::engine", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "gridbots::engine", "{}", msg);
    }
}

/// Domain logger that forwards into the process-wide `tracing` subscriber.
pub fn init_tracing_logger() -> Arc<dyn DomainLogger> {
    Arc::new(TracingBridge)
}
