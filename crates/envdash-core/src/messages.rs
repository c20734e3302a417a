//! Message types for UI/worker communication.
//!
//! ```text
//! +------------------+     Command      +-------------------+
//! |    UI loop       | ---------------> |  DashboardWorker  |
//! |  (owns state)    |                  |  (tokio runtime)  |
//! |                  | <--------------- |                   |
//! +------------------+  DashboardEvent  +-------------------+
//! ```
//!
//! The UI loop is the only place view state is mutated; the worker only
//! fetches.

use crate::indicator::Resource;
use crate::loader::{FetchRequest, Payload};

/// Commands sent from the UI loop to the background worker.
#[derive(Debug, Clone)]
pub enum Command {
    /// Issue one request.
    Fetch(FetchRequest),

    /// Shut down the worker.
    Shutdown,
}

/// Events sent from the worker back to the UI loop.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// A fetch succeeded.
    Loaded(Payload),

    /// A fetch failed.
    Failed {
        /// The request that failed.
        request: FetchRequest,
        /// Description of the error.
        error: String,
    },
}

impl DashboardEvent {
    /// The resource this event concerns.
    #[must_use]
    pub fn resource(&self) -> Resource {
        match self {
            Self::Loaded(payload) => payload.resource(),
            Self::Failed { request, .. } => request.resource(),
        }
    }

    /// Whether this is the outcome of a config save rather than a read.
    #[must_use]
    pub fn is_save(&self) -> bool {
        matches!(
            self,
            Self::Loaded(Payload::ConfigSaved(_))
                | Self::Failed {
                    request: FetchRequest::SaveConfig(_),
                    ..
                }
        )
    }
}
