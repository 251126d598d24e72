//! Controller address, credentials and connection options

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use tracing::debug;
use url::Url;

use aci_inventory_api::Protocol;

use crate::error::{ClientError, Result};

/// Login timeout used by the controller module
pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Who to log in as, and where
#[derive(Clone)]
pub struct Credentials {
    /// Resolved controller address
    pub host: IpAddr,
    pub username: String,
    pub password: String,
    pub protocol: Protocol,
}

impl Credentials {
    pub fn new(
        host: IpAddr,
        username: impl Into<String>,
        password: impl Into<String>,
        protocol: Protocol,
    ) -> Self {
        Self {
            host,
            username: username.into(),
            password: password.into(),
            protocol,
        }
    }

    /// `<protocol>://<host>/`
    ///
    /// # Errors
    /// Returns an error if the resulting URL does not parse.
    pub fn base_url(&self) -> Result<Url> {
        let host = match self.host {
            IpAddr::V4(v4) => v4.to_string(),
            IpAddr::V6(v6) => format!("[{v6}]"),
        };
        Ok(Url::parse(&format!("{}://{}/", self.protocol.scheme(), host))?)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("protocol", &self.protocol)
            .finish()
    }
}

/// Transport settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Accept any TLS certificate presented by the controller
    pub insecure_skip_verify: bool,
    /// Timeout applied to the login request only
    pub login_timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            insecure_skip_verify: false,
            login_timeout: DEFAULT_LOGIN_TIMEOUT,
        }
    }
}

impl ConnectOptions {
    #[must_use]
    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    #[must_use]
    pub fn with_login_timeout(mut self, timeout: Duration) -> Self {
        self.login_timeout = timeout;
        self
    }
}

/// Resolve a controller host name to one address, preferring IPv4
///
/// Literal addresses are returned as-is without a lookup.
///
/// # Errors
/// Returns [`ClientError::Resolve`] if the lookup fails or yields nothing.
pub async fn resolve_host(host: &str) -> Result<IpAddr> {
    if let Ok(addr) = host.parse::<IpAddr>() {
        return Ok(addr);
    }

    let addrs: Vec<IpAddr> = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|e| ClientError::Resolve {
            host: host.to_string(),
            message: e.to_string(),
        })?
        .map(|sa| sa.ip())
        .collect();

    let chosen = addrs
        .iter()
        .find(|a| a.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| ClientError::Resolve {
            host: host.to_string(),
            message: "no addresses returned".to_string(),
        })?;

    debug!(host, address = %chosen, "resolved controller host");
    Ok(chosen)
}
