use std::sync::Arc;
use std::time::Duration;

use tokio::task::{self, JoinHandle};
use tracing::debug;

use crate::adapters::ntp_client::NtpClient;
use crate::domain::ntp::{NtpStats, QueryOutcome};
use crate::error::QueryError;

/// One in-flight query against a single server.
///
/// The request runs on tokio's blocking pool. Dropping the task, or giving
/// up on it in [`QueryTask::join`], detaches the worker: it keeps running
/// until the client returns and its result is discarded.
#[derive(Debug)]
pub struct QueryTask {
    server: String,
    handle: JoinHandle<Result<NtpStats, QueryError>>,
}

impl QueryTask {
    /// Start querying `server`. Must be called from within a Tokio runtime.
    pub fn spawn(client: Arc<dyn NtpClient>, server: String, version: u8) -> Self {
        debug!("creating task for server {server}");
        let host = server.clone();
        let handle = task::spawn_blocking(move || {
            debug!("running task to {host}");
            client.request(&host, version)
        });
        Self { server, handle }
    }

    /// Wait at most `timeout` for the query to finish.
    pub async fn join(self, timeout: Duration) -> QueryOutcome {
        debug!(
            "joining task to {} with timeout {:.1} seconds",
            self.server,
            timeout.as_secs_f64()
        );
        let result = match tokio::time::timeout(timeout, self.handle).await {
            Ok(Ok(res)) => res,
            Ok(Err(e)) => Err(QueryError::Task(e.to_string())),
            Err(_) => {
                debug!("task to {} still running, detaching", self.server);
                Err(QueryError::Timeout(timeout))
            }
        };
        QueryOutcome {
            server: self.server,
            result,
        }
    }
}

/// Query one server and wait for its outcome.
pub async fn execute(
    client: Arc<dyn NtpClient>,
    server: &str,
    version: u8,
    timeout: Duration,
) -> QueryOutcome {
    QueryTask::spawn(client, server.to_string(), version)
        .join(timeout)
        .await
}
