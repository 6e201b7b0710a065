//! Passive pipeline instrumentation
//!
//! Observers receive one record per completed logical call. They cannot
//! steer the pipeline: the trait is infallible by signature and the
//! pipeline ignores whatever an observer does with the record.

use std::time::Duration;
use tracing::{debug, warn};

/// What happened to one logical call
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub method: &'static str,
    pub endpoint: String,
    /// `"success"` or the failure kind label
    pub outcome: &'static str,
    pub elapsed: Duration,
    pub served_from_cache: bool,
    /// Whether the call was retried after a token refresh
    pub retried: bool,
}

impl CallRecord {
    pub fn is_success(&self) -> bool {
        self.outcome == "success"
    }
}

/// Passive observer of pipeline events
pub trait PipelineObserver: Send + Sync {
    fn on_call(&self, record: &CallRecord);
}

/// Observer that ships records to `tracing`
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_call(&self, record: &CallRecord) {
        if record.is_success() {
            debug!(
                method = record.method,
                endpoint = %record.endpoint,
                elapsed_ms = record.elapsed.as_millis() as u64,
                cached = record.served_from_cache,
                retried = record.retried,
                "request completed"
            );
        } else {
            warn!(
                method = record.method,
                endpoint = %record.endpoint,
                outcome = record.outcome,
                elapsed_ms = record.elapsed.as_millis() as u64,
                retried = record.retried,
                "request failed"
            );
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_detection() {
        let record = CallRecord {
            method: "GET",
            endpoint: "/market/summary".to_string(),
            outcome: "success",
            elapsed: Duration::from_millis(12),
            served_from_cache: false,
            retried: false,
        };
        assert!(record.is_success());

        let failed = CallRecord {
            outcome: "server_error",
            ..record
        };
        assert!(!failed.is_success());
    }
}
