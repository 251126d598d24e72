//! aci-inventory: fabric node inventory over the APIC REST API
//!
//! Maps an inventory command to managed-object classes, issues the class
//! queries over an authenticated [`ApicTransport`] session and writes the
//! aggregated response to disk.
//!
//! [`ApicTransport`]: aci_inventory_client::ApicTransport

pub mod classes;
pub mod error;
pub mod fetcher;
pub mod module;
pub mod uri;
pub mod writer;

pub use classes::{ClassEntry, ClassMap};
pub use error::{InventoryError, Result};
pub use fetcher::{FetchOutcome, InventoryFetcher};
pub use module::{ModuleParams, run_module, run_with_transport};
pub use uri::{ClassQuery, NODES_PATH};
pub use writer::ResultWriter;
