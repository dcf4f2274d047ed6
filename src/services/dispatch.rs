use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, instrument};

use crate::adapters::ntp_client::{DEFAULT_NTP_VERSION, NtpClient};
use crate::domain::ntp::QueryOutcome;

use super::task::QueryTask;

/// Per-server join deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Fans a query out to every server and gathers the outcomes back in order.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn NtpClient>,
    version: u8,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn NtpClient>) -> Self {
        Self {
            client,
            version: DEFAULT_NTP_VERSION,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Query all `servers` concurrently, one worker each.
    ///
    /// The returned outcomes line up index for index with `servers`,
    /// whatever order the workers finish in. Joins are awaited together, so
    /// a run lasts about one timeout at worst.
    #[instrument(skip_all, fields(servers = servers.len(), version = self.version))]
    pub async fn run<S: AsRef<str>>(&self, servers: &[S]) -> Vec<QueryOutcome> {
        let tasks: Vec<QueryTask> = servers
            .iter()
            .map(|s| {
                QueryTask::spawn(
                    Arc::clone(&self.client),
                    s.as_ref().to_string(),
                    self.version,
                )
            })
            .collect();

        let outcomes = join_all(tasks.into_iter().map(|t| t.join(self.timeout))).await;
        debug!(
            ok = outcomes.iter().filter(|o| o.is_ok()).count(),
            "all tasks joined"
        );
        outcomes
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
