//! Error types for aci-inventory

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use aci_inventory_api::{Command, FailureResult};
use aci_inventory_client::ClientError;

/// Errors that can occur during an inventory run
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Login was answered with a status other than 200
    #[error("could not authenticate to apic (status {status})")]
    Authentication {
        /// Login response status
        status: u16,
        /// Raw login response body
        body: String,
    },

    /// The inspected class query was answered with a status other than 200
    #[error("error issuing api request (status {status})")]
    RequestFailed {
        /// Status of the last query issued
        status: u16,
        /// Parsed response payload
        response: Value,
    },

    /// No class is mapped for this command
    #[error("no managed-object class for command '{command}' on node {node}")]
    MissingClass {
        /// Requested command
        command: Command,
        /// Node id as used in the path
        node: String,
    },

    /// Controller answered with a body that is not JSON
    #[error("failed to parse response from {path}: {source}")]
    Parse {
        /// Request path
        path: String,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Transport failure (network, DNS, TLS, timeout)
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Serializing the response for the output file failed
    #[error("failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Writing the output file failed
    #[error("failed to write {path}: {source}")]
    Io {
        /// Output file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl InventoryError {
    /// Check if the controller rejected the credentials
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, InventoryError::Authentication { .. })
    }

    /// HTTP status attached to the failure, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            InventoryError::Authentication { status, .. }
            | InventoryError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Failure record reported to the caller
    #[must_use]
    pub fn to_failure(&self) -> FailureResult {
        let failure = FailureResult::new(self.to_string());
        match self {
            InventoryError::Authentication { status, body } => failure
                .with_status(*status)
                .with_response(Value::String(body.clone())),
            InventoryError::RequestFailed { status, response } => {
                failure.with_status(*status).with_response(response.clone())
            }
            _ => failure,
        }
    }
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_authentication_failure_record() {
        let err = InventoryError::Authentication {
            status: 403,
            body: "denied".to_string(),
        };
        assert!(err.is_authentication());

        let failure = err.to_failure();
        assert!(failure.failed);
        assert!(!failure.changed);
        assert_eq!(failure.status, Some(403));
        assert!(failure.msg.contains("could not authenticate to apic"));
        assert!(failure.msg.contains("403"));
        assert_eq!(failure.response, Some(json!("denied")));
    }

    #[test]
    fn test_request_failure_record() {
        let err = InventoryError::RequestFailed {
            status: 400,
            response: json!({"imdata": []}),
        };
        let failure = err.to_failure();
        assert_eq!(failure.status, Some(400));
        assert!(failure.msg.starts_with("error issuing api request"));
        assert_eq!(failure.response, Some(json!({"imdata": []})));
    }

    #[test]
    fn test_missing_class_has_no_status() {
        let err = InventoryError::MissingClass {
            command: Command::Nodes,
            node: "101".to_string(),
        };
        assert_eq!(err.status(), None);
        let failure = err.to_failure();
        assert!(failure.msg.contains("nodes"));
        assert!(failure.response.is_none());
    }
}
