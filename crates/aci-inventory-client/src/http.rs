//! reqwest-backed controller session

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use aci_inventory_api::LoginRequest;

use crate::connection::{ConnectOptions, Credentials};
use crate::error::{ClientError, Result};
use crate::response::ApiResponse;
use crate::traits::ApicTransport;

/// Login endpoint, relative to the controller base URL
pub const LOGIN_PATH: &str = "api/aaaLogin.json";

/// HTTP session against one controller
///
/// The underlying client keeps a cookie store, so the `APIC-cookie` returned
/// by a successful login is sent on every later request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    login_timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for the controller named in `credentials`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    ///
    /// # Example
    /// ```no_run
    /// use std::net::{IpAddr, Ipv4Addr};
    /// use aci_inventory_api::Protocol;
    /// use aci_inventory_client::{ConnectOptions, Credentials, HttpTransport};
    ///
    /// let creds = Credentials::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), "admin", "pw", Protocol::Https);
    /// let transport = HttpTransport::new(&creds, &ConnectOptions::default())?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(credentials: &Credentials, options: &ConnectOptions) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(options.insecure_skip_verify)
            .build()?;
        Self::with_client(credentials.base_url()?, client, options.login_timeout)
    }

    /// Create a transport with a custom `reqwest::Client`
    ///
    /// The client must have a cookie store enabled for the session to carry over.
    ///
    /// # Errors
    /// Currently infallible; kept fallible to match [`HttpTransport::new`].
    pub fn with_client(base_url: Url, client: Client, login_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client,
            base_url,
            login_timeout,
        })
    }

    /// Build a full URL from a controller-relative path
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    /// Controller base URL
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn timeout_error(err: reqwest::Error, timeout: Duration) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout(timeout)
    } else {
        ClientError::Http(err)
    }
}

#[async_trait]
impl ApicTransport for HttpTransport {
    #[instrument(skip(self, request), fields(user = %request.aaa_user.attributes.name))]
    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse> {
        let url = self.url(LOGIN_PATH)?;
        debug!(%url, timeout = ?self.login_timeout, "logging in");

        // The timeout spans the whole exchange, body included
        let timeout = self.login_timeout;
        let response = self
            .client
            .post(url)
            .json(request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| timeout_error(e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| timeout_error(e, timeout))?;
        debug!(status, "login answered");
        Ok(ApiResponse { status, body })
    }

    #[instrument(skip(self), level = "debug")]
    async fn get(&self, path: &str) -> Result<ApiResponse> {
        let url = self.url(path)?;
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "GET completed");
        Ok(ApiResponse { status, body })
    }

    fn transport_type(&self) -> &'static str {
        "http"
    }
}
