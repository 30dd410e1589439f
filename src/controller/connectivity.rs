use std::time::Duration;

use async_trait::async_trait;
use tokio::net::lookup_host;
use tracing::debug;
use url::{Host, Url};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Reports whether the network is usable before a fetch is started.
#[async_trait]
pub trait Connectivity {
    async fn is_online(&self) -> bool;
}

/// Treats the network as available when the api host resolves.
pub struct DnsConnectivity {
    host: String,
    port: u16,
    timeout: Duration,
}

impl DnsConnectivity {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Probe the host of `base_url`. Unparseable urls probe nothing and
    /// report offline.
    pub fn for_base_url(base_url: &str) -> Self {
        let parsed = Url::parse(base_url).ok();
        // IPv6 literals come back bracketed from host_str, which the
        // resolver rejects
        let host = match parsed.as_ref().and_then(|u| u.host()) {
            Some(Host::Domain(domain)) => domain.to_string(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            None => String::new(),
        };
        let port = parsed
            .as_ref()
            .and_then(|u| u.port_or_known_default())
            .unwrap_or(443);
        Self::new(host, port)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Connectivity for DnsConnectivity {
    async fn is_online(&self) -> bool {
        if self.host.is_empty() {
            return false;
        }

        let lookup = lookup_host((self.host.as_str(), self.port));

        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(mut addrs)) => addrs.next().is_some(),
            Ok(Err(e)) => {
                debug!("Could not resolve {}: {}", self.host, e);
                false
            }
            Err(_) => {
                debug!("Resolving {} timed out", self.host);
                false
            }
        }
    }
}
