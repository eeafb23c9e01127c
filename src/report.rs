use std::sync::Arc;

use tracing::error;

/// Destination for user-facing failure reports. A report is raised at
/// most once per failed resource; retrying is the caller's decision,
/// never the reporter's.
pub trait Report: Send + Sync {
    fn report(&self, message: &str);
}

pub type Reporter = Arc<dyn Report>;

/// Surfaces reports on the diagnostic log.
pub struct LogReporter;

impl Report for LogReporter {
    fn report(&self, message: &str) {
        error!("{message}");
    }
}
