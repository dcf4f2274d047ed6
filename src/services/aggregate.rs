use chrono::{DateTime, Local};

use crate::domain::ntp::{QueryOutcome, ResultRow, RowStats};
use crate::error::QueryError;

/// What to do with servers that produced no statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failed server (in input order) aborts the whole report.
    #[default]
    FailFast,
    /// Failed servers become error rows.
    Partial,
}

/// Turn outcomes into report rows, keeping input order.
pub fn aggregate(
    outcomes: &[QueryOutcome],
    policy: FailurePolicy,
) -> Result<Vec<ResultRow>, QueryError> {
    outcomes.iter().map(|o| to_row(o, policy)).collect()
}

fn to_row(outcome: &QueryOutcome, policy: FailurePolicy) -> Result<ResultRow, QueryError> {
    let stats = match (&outcome.result, policy) {
        (Ok(stats), _) => {
            let adjusted = stats.adjusted_time().ok_or_else(|| {
                QueryError::for_server(
                    &outcome.server,
                    QueryError::Protocol(format!("offset {} out of range", stats.offset)),
                )
            })?;
            Ok(RowStats {
                ref_id: stats.ref_id.clone(),
                stratum: stats.stratum,
                delay: stats.delay,
                offset: stats.offset,
                tx_time: DateTime::<Local>::from(stats.tx_time),
                adjusted_time: DateTime::<Local>::from(adjusted),
            })
        }
        (Err(e), FailurePolicy::FailFast) => {
            return Err(QueryError::for_server(&outcome.server, e.clone()));
        }
        (Err(e), FailurePolicy::Partial) => Err(e.to_string()),
    };
    Ok(ResultRow {
        server: outcome.server.clone(),
        stats,
    })
}
