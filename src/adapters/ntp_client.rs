use std::io;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rsntp::{Config, ReferenceIdentifier, SynchronizationError};
use tracing::{debug, instrument};

use crate::domain::ntp::NtpStats;
use crate::error::QueryError;

use super::resolver;

pub const NTP_PORT: u16 = 123;
pub const DEFAULT_NTP_VERSION: u8 = 3;

/// Blocking NTP request capability: one round trip per call.
///
/// Implementations run on a dedicated worker thread, so they may block.
pub trait NtpClient: Send + Sync {
    fn request(&self, host: &str, version: u8) -> Result<NtpStats, QueryError>;
}

/// Validate an NTP protocol version number.
pub fn check_version(version: u8) -> Result<u8, QueryError> {
    match version {
        1..=4 => Ok(version),
        other => Err(QueryError::InvalidVersion(other)),
    }
}

/// [`NtpClient`] backed by rsntp's synchronous SNTP client.
#[derive(Clone, Debug)]
pub struct SntpClient {
    timeout: Duration,
}

impl SntpClient {
    /// `timeout` bounds the socket wait of a single request.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn client_for(&self, ip: IpAddr) -> rsntp::SntpClient {
        let cfg = if ip.is_ipv6() {
            Config::default().bind_address((Ipv6Addr::UNSPECIFIED, 0).into())
        } else {
            Config::default().bind_address(([0, 0, 0, 0], 0).into())
        };
        rsntp::SntpClient::with_config(cfg.timeout(self.timeout))
    }

    fn map_error(&self, err: SynchronizationError) -> QueryError {
        match err {
            SynchronizationError::IOError(ref e)
                if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) =>
            {
                QueryError::Timeout(self.timeout)
            }
            other => other.into(),
        }
    }
}

fn format_reference_id(reference_id: &ReferenceIdentifier) -> String {
    reference_id.to_string()
}

impl NtpClient for SntpClient {
    #[instrument(skip(self))]
    fn request(&self, host: &str, version: u8) -> Result<NtpStats, QueryError> {
        // rsntp always emits v4 packets; servers answer v3 and v4 alike.
        check_version(version)?;

        let ip = resolver::resolve_ip(host)?;
        let addr = SocketAddr::new(ip, NTP_PORT);
        debug!(%addr, "sending request");

        let client = self.client_for(ip);
        let orig_time = Utc::now();
        let res = client
            .synchronize(addr.to_string())
            .map_err(|e| self.map_error(e))?;

        let tx_time: DateTime<Utc> = match res.datetime().try_into() {
            Ok(dt) => dt,
            Err(e) => return Err(QueryError::Protocol(e.to_string())),
        };

        Ok(NtpStats {
            ref_id: format_reference_id(res.reference_identifier()),
            stratum: res.stratum(),
            delay: res.round_trip_delay().as_secs_f64(),
            offset: res.clock_offset().as_secs_f64(),
            orig_time,
            tx_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_one_through_four_are_valid() {
        for v in 1..=4 {
            assert_eq!(check_version(v), Ok(v));
        }
        assert_eq!(check_version(0), Err(QueryError::InvalidVersion(0)));
        assert_eq!(check_version(5), Err(QueryError::InvalidVersion(5)));
    }

    #[test]
    fn invalid_version_fails_before_any_lookup() {
        let client = SntpClient::new(Duration::from_millis(10));
        let err = client.request("no.such.host.invalid", 9).unwrap_err();
        assert_eq!(err, QueryError::InvalidVersion(9));
    }

    #[test]
    fn socket_timeouts_map_to_timeout() {
        let client = SntpClient::new(Duration::from_secs(2));
        let io = io::Error::new(io::ErrorKind::WouldBlock, "would block");
        let err = client.map_error(SynchronizationError::IOError(io));
        assert_eq!(err, QueryError::Timeout(Duration::from_secs(2)));
    }
}
