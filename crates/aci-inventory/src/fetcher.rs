//! Inventory fetcher: login, then class queries over one session

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use aci_inventory_api::{Command, InventoryRequest, LoginRequest, ModuleResult, ResponseRecord};
use aci_inventory_client::ApicTransport;

use crate::classes::ClassMap;
use crate::error::{InventoryError, Result};
use crate::uri::{ClassQuery, DEFAULT_POD, NODES_PATH};

/// Responses gathered for one command, before the status check
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// Status of the last query issued
    pub status: u16,
    pub response: ResponseRecord,
}

impl FetchOutcome {
    /// Turn the outcome into the reported result
    ///
    /// # Errors
    /// Returns [`InventoryError::RequestFailed`] when `status` is not 200.
    pub fn into_result(self) -> Result<ModuleResult> {
        if self.status == 200 {
            Ok(ModuleResult {
                status: self.status,
                response: self.response,
                changed: true,
            })
        } else {
            Err(InventoryError::RequestFailed {
                status: self.status,
                response: self.response.into_value(),
            })
        }
    }
}

/// Issues inventory queries for one node over an authenticated session
///
/// Requests are sent strictly one after another; nothing is retried.
pub struct InventoryFetcher<'a> {
    transport: Arc<dyn ApicTransport>,
    classes: &'a ClassMap,
    pod: u32,
}

impl<'a> InventoryFetcher<'a> {
    pub fn new(transport: Arc<dyn ApicTransport>, classes: &'a ClassMap) -> Self {
        Self {
            transport,
            classes,
            pod: DEFAULT_POD,
        }
    }

    /// Query nodes of another pod
    #[must_use]
    pub fn with_pod(mut self, pod: u32) -> Self {
        self.pod = pod;
        self
    }

    /// Log in; the session cookie is kept by the transport
    ///
    /// # Errors
    /// Returns [`InventoryError::Authentication`] if the controller does not
    /// answer 200, or a client error if the request itself fails.
    #[instrument(skip(self, login), fields(user = %login.aaa_user.attributes.name))]
    pub async fn authenticate(&self, login: &LoginRequest) -> Result<()> {
        let response = self.transport.login(login).await?;
        if !response.is_ok() {
            warn!(status = response.status, "login rejected");
            return Err(InventoryError::Authentication {
                status: response.status,
                body: response.body,
            });
        }
        info!(transport = self.transport.transport_type(), "authenticated to apic");
        Ok(())
    }

    /// Run the queries for `request`
    ///
    /// For [`Command::All`] every default-table class is queried in table
    /// order and the reported status is the one of the last query.
    ///
    /// # Errors
    /// Returns an error if a class cannot be resolved, a request fails, or a
    /// response body is not JSON. Non-200 statuses are not errors here; see
    /// [`FetchOutcome::into_result`].
    #[instrument(skip(self), fields(node = request.node_id, command = %request.command))]
    pub async fn fetch(&self, request: &InventoryRequest) -> Result<FetchOutcome> {
        let node = request.node();

        match request.command {
            Command::Nodes => {
                let (status, value) = self.get_json(NODES_PATH).await?;
                Ok(FetchOutcome {
                    status,
                    response: ResponseRecord::Single(value),
                })
            }
            Command::All => {
                let entries = self.classes.default_entries();
                let mut responses = Vec::with_capacity(entries.len());
                let mut last_status = None;

                for entry in entries {
                    let path = self.class_path(entry.command, &node, request)?;
                    let (status, value) = self.get_json(&path).await?;
                    if status != 200 {
                        warn!(command = %entry.command, status, "class query failed");
                    }
                    last_status = Some(status);
                    responses.push(value);
                }

                let status = last_status.ok_or_else(|| InventoryError::MissingClass {
                    command: Command::All,
                    node: node.clone(),
                })?;
                info!(queries = responses.len(), status, "collected all classes");
                Ok(FetchOutcome {
                    status,
                    response: ResponseRecord::Sequence(responses),
                })
            }
            command => {
                let path = self.class_path(command, &node, request)?;
                let (status, value) = self.get_json(&path).await?;
                Ok(FetchOutcome {
                    status,
                    response: ResponseRecord::Single(value),
                })
            }
        }
    }

    fn class_path(&self, command: Command, node: &str, request: &InventoryRequest) -> Result<String> {
        let class = self
            .classes
            .get_mo_class(command, node)
            .ok_or_else(|| InventoryError::MissingClass {
                command,
                node: node.to_string(),
            })?;
        Ok(ClassQuery::new(node, class)
            .pod(self.pod)
            .level(request.level)
            .build())
    }

    async fn get_json(&self, path: &str) -> Result<(u16, Value)> {
        debug!(path, "querying controller");
        let response = self.transport.get(path).await?;
        let value = response.json().map_err(|e| match e {
            aci_inventory_client::ClientError::Json(source) => InventoryError::Parse {
                path: path.to_string(),
                source,
            },
            other => InventoryError::Client(other),
        })?;
        Ok((response.status, value))
    }
}
