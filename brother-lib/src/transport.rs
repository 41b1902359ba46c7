use crate::config::Config;
use crate::error::BrotherError;
use crate::snmp::{SnmpValue, decode_get_response, encode_get_request};
use bytes::Bytes;
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::{UdpSocket, lookup_host};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, trace};

/// Values returned for one fetch, keyed by OID.
pub type RawData = HashMap<String, SnmpValue>;

// Largest UDP payload
const MAX_DATAGRAM: usize = 65_507;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResponse {
    Values(RawData),
    /// The device refused the OID at this 0-based position of the request.
    Rejected { index: usize },
}

/// Request/response access to a printer.
///
/// Retries and timeouts are the transport's business; callers see either an
/// answer, a rejection, or an error.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn fetch(&mut self, oids: &[&str]) -> Result<FetchResponse, BrotherError>;

    /// Release resources. Calling it more than once is harmless.
    fn close(&mut self);
}

/// SNMPv1 GET over UDP.
pub struct SnmpTransport {
    host: String,
    port: u16,
    community: String,
    timeout: Duration,
    retries: u32,
    socket: Option<UdpSocket>,
    request_id: i32,
}

impl SnmpTransport {
    pub fn new(config: &Config) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            community: config.community.clone(),
            timeout: config.timeout,
            retries: config.retries,
            socket: None,
            request_id: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    fn next_request_id(&mut self) -> i32 {
        self.request_id = self.request_id.wrapping_add(1) & i32::MAX;
        self.request_id
    }

    /// Resolve the host and connect a socket on first use.
    async fn socket(&mut self) -> Result<&UdpSocket, BrotherError> {
        if self.socket.is_none() {
            let addr = lookup_host((self.host.as_str(), self.port))
                .await?
                .next()
                .ok_or_else(|| BrotherError::Connection(format!("Unable to resolve {}", self.host)))?;
            let local: SocketAddr = if addr.is_ipv4() {
                (Ipv4Addr::UNSPECIFIED, 0).into()
            } else {
                (Ipv6Addr::UNSPECIFIED, 0).into()
            };
            let socket = UdpSocket::bind(local).await?;
            socket.connect(addr).await?;
            debug!(%addr, "SNMP socket connected");
            self.socket = Some(socket);
        }
        self.socket
            .as_ref()
            .ok_or_else(|| BrotherError::Connection("socket unavailable".to_string()))
    }
}

impl Transport for SnmpTransport {
    async fn fetch(&mut self, oids: &[&str]) -> Result<FetchResponse, BrotherError> {
        let id = self.next_request_id();
        let request = encode_get_request(&self.community, id, oids)?;
        let timeout = self.timeout;
        let attempts = self.retries.saturating_add(1);
        let socket = self.socket().await?;

        let mut buf = vec![0u8; MAX_DATAGRAM];
        for attempt in 1..=attempts {
            socket.send(&request).await?;
            trace!(id, attempt, oids = oids.len(), "GetRequest sent");

            let deadline = Instant::now() + timeout;
            loop {
                let Ok(received) = timeout_at(deadline, socket.recv(&mut buf)).await else {
                    debug!(id, attempt, "No answer within {:?}", timeout);
                    break;
                };
                let len = received?;
                let response = decode_get_response(Bytes::copy_from_slice(&buf[..len]))?;
                if response.request_id != id {
                    trace!(expected = id, got = response.request_id, "Ignoring stale response");
                    continue;
                }
                return response.into_fetch_response(oids.len());
            }
        }

        Err(BrotherError::snmp("No SNMP response received before timeout"))
    }

    fn close(&mut self) {
        if self.socket.take().is_some() {
            debug!(host = %self.host, "SNMP socket closed");
        }
    }
}
