//! aci-inventory-client: APIC session client
//!
//! Provides the [`ApicTransport`] abstraction used by the inventory fetcher
//! and a reqwest-backed implementation that keeps the login cookie for every
//! subsequent request.
//!
//! # Example
//!
//! ```no_run
//! use aci_inventory_api::{LoginRequest, Protocol};
//! use aci_inventory_client::{ApicTransport, ConnectOptions, Credentials, HttpTransport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let host = aci_inventory_client::resolve_host("apic1.example.net").await?;
//! let credentials = Credentials::new(host, "admin", "secret", Protocol::Https);
//! let transport = HttpTransport::new(&credentials, &ConnectOptions::default())?;
//!
//! let login = transport.login(&LoginRequest::new("admin", "secret")).await?;
//! if login.is_ok() {
//!     let nodes = transport.get("api/node/class/topSystem.json").await?;
//!     println!("{}", nodes.body);
//! }
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod http;
pub mod response;
pub mod traits;

pub use connection::{ConnectOptions, Credentials, resolve_host};
pub use error::{ClientError, Result};
pub use http::HttpTransport;
pub use response::ApiResponse;
pub use traits::ApicTransport;
