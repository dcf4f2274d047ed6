use std::time::Duration;

use thiserror::Error;

/// Top-level error type for ntpgroup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// DNS resolution failure.
    #[error("dns: {0}")]
    Dns(String),
    /// Network related error.
    #[error("network: {0}")]
    Network(String),
    /// Protocol violation.
    #[error("protocol: {0}")]
    Protocol(String),
    /// No answer before the deadline.
    #[error("timeout after {:.1}s", .0.as_secs_f64())]
    Timeout(Duration),
    /// The worker running the query failed (panicked or was cancelled).
    #[error("task: {0}")]
    Task(String),
    /// Requested NTP version outside 1..=4.
    #[error("unsupported NTP version {0} (expected 1..=4)")]
    InvalidVersion(u8),
    /// A failure attributed to one server of the group.
    #[error("{server}: {source}")]
    Server {
        server: String,
        #[source]
        source: Box<QueryError>,
    },
}

impl QueryError {
    /// Attach the server name to an error.
    pub fn for_server(server: impl Into<String>, err: QueryError) -> Self {
        QueryError::Server {
            server: server.into(),
            source: Box::new(err),
        }
    }

    /// The underlying error, with any server attribution stripped.
    pub fn root(&self) -> &QueryError {
        match self {
            QueryError::Server { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<rsntp::SynchronizationError> for QueryError {
    fn from(err: rsntp::SynchronizationError) -> Self {
        match err {
            rsntp::SynchronizationError::IOError(e) => QueryError::Network(e.to_string()),
            rsntp::SynchronizationError::ProtocolError(e) => QueryError::Protocol(e.to_string()),
        }
    }
}
