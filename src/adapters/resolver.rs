use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use crate::error::QueryError;

use super::ntp_client::NTP_PORT;

/// Resolve the IP address for a host name, preferring IPv4 over IPv6.
pub fn resolve_ip(host: &str) -> Result<IpAddr, QueryError> {
    let addrs: Vec<SocketAddr> = (host, NTP_PORT)
        .to_socket_addrs()
        .map_err(|e| QueryError::Dns(format!("{host}: {e}")))?
        .collect();

    let (v4, v6): (Vec<IpAddr>, Vec<IpAddr>) = addrs
        .into_iter()
        .map(|a| a.ip())
        .partition(|ip| ip.is_ipv4());

    v4.into_iter()
        .chain(v6)
        .next()
        .ok_or_else(|| QueryError::Dns(format!("No IP address found for '{host}'")))
}
