//! Execution context
//!
//! Callers pass an explicit context to `Transform::run`; there is no
//! process-wide mutable state in this crate. The context carries the
//! worker count and whether the built-in CMM may be used. When the
//! `lcms2` feature is enabled and `ccmm_allowed` is false, transforms
//! route through the external engine instead.

use std::thread;

/// Execution context for pixel transforms
#[derive(Debug, Clone)]
pub struct Context {
    /// Number of worker tasks a `run` may fan out to (≥ 1)
    pub jobs: usize,
    /// Allow the built-in color management path
    pub ccmm_allowed: bool,
}

impl Context {
    pub fn new() -> Self {
        Self {
            jobs: thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            ccmm_allowed: true,
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_ccmm_allowed(mut self, allowed: bool) -> Self {
        self.ccmm_allowed = allowed;
        self
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
