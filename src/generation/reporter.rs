//! Progress reporting for a generation run
//!
//! A [`Reporter`] is handed to the orchestrator and the components it drives,
//! one method per severity. [`TracingReporter`] forwards everything to the
//! `tracing` subscriber installed by the binary.

use tracing::{debug, error, info, warn};

/// Severity-per-method progress sink
pub trait Reporter: Send + Sync {
    /// A unit of work (run, module, root files) begins
    fn start(&self, message: &str);
    /// A unit of work finished
    fn end(&self, message: &str);
    /// An artifact was produced
    fn success(&self, message: &str);
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Reporter that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for TracingReporter {
    fn start(&self, message: &str) {
        info!(stage = "start", "{message}");
    }

    fn end(&self, message: &str) {
        info!(stage = "end", "{message}");
    }

    fn success(&self, message: &str) {
        info!(stage = "success", "✓ {message}");
    }

    fn debug(&self, message: &str) {
        debug!("{message}");
    }

    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn warning(&self, message: &str) {
        warn!("⚠ {message}");
    }

    fn error(&self, message: &str) {
        error!("✗ {message}");
    }
}
