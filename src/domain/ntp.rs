use chrono::{DateTime, Duration, Local, Utc};

use crate::error::QueryError;

/// Statistics returned by one successful NTP round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct NtpStats {
    pub ref_id: String,
    pub stratum: u8,
    /// Round-trip delay in seconds.
    pub delay: f64,
    /// Local clock offset in seconds, signed.
    pub offset: f64,
    /// Local instant the request left.
    pub orig_time: DateTime<Utc>,
    /// Server transmit instant.
    pub tx_time: DateTime<Utc>,
}

impl NtpStats {
    /// `orig_time + offset`, or `None` when the sum leaves chrono's range.
    pub fn adjusted_time(&self) -> Option<DateTime<Utc>> {
        let delta = Duration::nanoseconds((self.offset * 1e9).round() as i64);
        self.orig_time.checked_add_signed(delta)
    }
}

/// What became of querying one server.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryOutcome {
    pub server: String,
    pub result: Result<NtpStats, QueryError>,
}

impl QueryOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Presentation fields for a successful row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowStats {
    pub ref_id: String,
    pub stratum: u8,
    pub delay: f64,
    pub offset: f64,
    pub tx_time: DateTime<Local>,
    pub adjusted_time: DateTime<Local>,
}

/// One line of the report. Failed servers carry the error message.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub server: String,
    pub stats: Result<RowStats, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(orig_secs: i64, offset: f64) -> NtpStats {
        let orig_time = DateTime::from_timestamp(orig_secs, 0).unwrap();
        NtpStats {
            ref_id: "GPS".into(),
            stratum: 1,
            delay: 0.02,
            offset,
            orig_time,
            tx_time: orig_time,
        }
    }

    #[test]
    fn adjusted_time_adds_offset() {
        let adjusted = stats(1000, 0.5).adjusted_time().unwrap();
        assert_eq!(adjusted.timestamp(), 1000);
        assert_eq!(adjusted.timestamp_subsec_nanos(), 500_000_000);
    }

    #[test]
    fn adjusted_time_handles_negative_offset() {
        let adjusted = stats(1000, -0.25).adjusted_time().unwrap();
        assert_eq!(adjusted.timestamp_millis(), 999_750);
    }

    #[test]
    fn adjusted_time_out_of_range_is_none() {
        let mut s = stats(0, 0.0);
        s.orig_time = DateTime::<Utc>::MAX_UTC;
        s.offset = 1.0;
        assert!(s.adjusted_time().is_none());
    }
}
