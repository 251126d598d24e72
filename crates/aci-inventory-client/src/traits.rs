//! Controller transport trait

use async_trait::async_trait;

use aci_inventory_api::LoginRequest;

use crate::error::Result;
use crate::response::ApiResponse;

/// A session against one APIC
///
/// `login` establishes the session; every `get` afterwards is sent with the
/// session cookie obtained from it. Paths are relative to the controller's
/// base URL (`api/...`).
#[async_trait]
pub trait ApicTransport: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse>;
    async fn get(&self, path: &str) -> Result<ApiResponse>;
    fn transport_type(&self) -> &'static str;
}
