//! ntpgroup library: query a group of NTP servers concurrently and tabulate
//! their statistics.

pub mod adapters;
pub mod domain;
mod error;
pub mod fmt;
pub mod servers;
pub mod services;

pub use adapters::ntp_client::{DEFAULT_NTP_VERSION, NtpClient, SntpClient};
pub use domain::ntp::{NtpStats, QueryOutcome, ResultRow, RowStats};
pub use error::QueryError;
pub use services::aggregate::{FailurePolicy, aggregate};
pub use services::dispatch::{DEFAULT_TIMEOUT, Dispatcher};
pub use services::task::{QueryTask, execute};
