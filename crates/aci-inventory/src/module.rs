//! One complete inventory run: resolve, login, query, write, report

use std::fmt;
use std::sync::Arc;

use tracing::{info, instrument};

use aci_inventory_api::{InventoryRequest, LoginRequest, ModuleResult, Protocol};
use aci_inventory_client::{ApicTransport, ConnectOptions, Credentials, HttpTransport, resolve_host};

use crate::classes::ClassMap;
use crate::error::Result;
use crate::fetcher::InventoryFetcher;
use crate::uri::DEFAULT_POD;
use crate::writer::ResultWriter;

/// Parameters of one run
#[derive(Clone)]
pub struct ModuleParams {
    pub request: InventoryRequest,
    /// Output file name without the `.txt` extension
    pub filename: Option<String>,
    /// Controller host name or address
    pub host: String,
    pub username: String,
    pub password: String,
    pub protocol: Protocol,
    pub pod: u32,
    pub options: ConnectOptions,
}

impl ModuleParams {
    pub fn new(request: InventoryRequest, host: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            request,
            filename: None,
            host: host.into(),
            username: "admin".to_string(),
            password: password.into(),
            protocol: Protocol::default(),
            pod: DEFAULT_POD,
            options: ConnectOptions::default(),
        }
    }

    #[must_use]
    pub fn login_request(&self) -> LoginRequest {
        LoginRequest::new(&self.username, &self.password)
    }
}

impl fmt::Debug for ModuleParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleParams")
            .field("request", &self.request)
            .field("filename", &self.filename)
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("protocol", &self.protocol)
            .field("pod", &self.pod)
            .field("options", &self.options)
            .finish()
    }
}

/// Run against the controller named in `params` over HTTP(S)
///
/// # Errors
/// Returns an error if the host does not resolve, login is rejected, any
/// request fails, the output file cannot be written, or the inspected
/// query status is not 200.
#[instrument(skip_all, fields(host = %params.host, node = params.request.node_id))]
pub async fn run_module(
    params: &ModuleParams,
    classes: &ClassMap,
    writer: &ResultWriter,
) -> Result<ModuleResult> {
    let address = resolve_host(&params.host).await?;
    let credentials = Credentials::new(
        address,
        &params.username,
        &params.password,
        params.protocol,
    );
    let transport = HttpTransport::new(&credentials, &params.options)?;
    info!(base_url = %transport.base_url(), "connecting to apic");

    run_with_transport(Arc::new(transport), params, classes, writer).await
}

/// Run over an already constructed transport
///
/// The response is written before the status is checked, so a failed
/// query still leaves its payload in the output file.
///
/// # Errors
/// See [`run_module`].
pub async fn run_with_transport(
    transport: Arc<dyn ApicTransport>,
    params: &ModuleParams,
    classes: &ClassMap,
    writer: &ResultWriter,
) -> Result<ModuleResult> {
    let fetcher = InventoryFetcher::new(transport, classes).with_pod(params.pod);

    fetcher.authenticate(&params.login_request()).await?;
    let outcome = fetcher.fetch(&params.request).await?;

    writer.write(&outcome.response, params.filename.as_deref())?;
    outcome.into_result()
}
