use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards every message to a primary and an optional secondary logger.
pub struct MultiLogger {
    primary: Arc<dyn DomainLogger>,
    secondary: Option<Arc<dyn DomainLogger>>,
}

impl MultiLogger {
    pub fn new(primary: Arc<dyn DomainLogger>, secondary: Option<Arc<dyn DomainLogger>>) -> Self {
        Self { primary, secondary }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.primary.info(msg);
        if let Some(sec) = &self.secondary {
            sec.info(msg);
        }
    }

    fn warn(&self, msg: &str) {
        self.primary.warn(msg);
        if let Some(sec) = &self.secondary {
            sec.warn(msg);
        }
    }

    fn error(&self, msg: &str) {
        self.primary.error(msg);
        if let Some(sec) = &self.secondary {
            sec.error(msg);
        }
    }
}

/// File logger with the tracing bridge attached as secondary. Falls back to
/// tracing alone if the file cannot be opened.
pub fn init_combined_logger(path: &str) -> Arc<dyn DomainLogger> {
    let tracing_logger = super::init_tracing_logger();
    match super::init_file_logger(path) {
        Ok(file_logger) => Arc::new(MultiLogger::new(file_logger, Some(tracing_logger))),
        Err(e) => {
            tracing_logger.warn(&e);
            tracing_logger
        }
    }
}
