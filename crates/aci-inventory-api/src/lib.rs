//! aci-inventory-api: Shared request and result types
//!
//! Contains the inventory request model, the APIC login body, and the
//! result records reported back to the invoking playbook.

pub mod error;
pub mod requests;
pub mod responses;

pub use error::ParseError;
pub use requests::{Command, InventoryRequest, Level, LoginRequest, Protocol};
pub use responses::{FailureResult, ModuleResult, ResponseRecord};
