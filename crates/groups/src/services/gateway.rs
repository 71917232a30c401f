//! Contract for the transport that performs remote calls.

use async_trait::async_trait;
use serde_json::Value;

use crate::types::GatewayResult;

/// Remote service access used by the coordinator.
///
/// Paths are relative to the service root (`/groups/{id}`). Implementations
/// own the wire format; a successful call yields the decoded JSON body, or
/// `Value::Null` for an empty one.
#[async_trait]
pub trait RequestGateway: Send + Sync {
    async fn get(&self, path: &str) -> GatewayResult<Value>;

    async fn post(&self, path: &str, body: Value) -> GatewayResult<Value>;

    async fn put(&self, path: &str, body: Value) -> GatewayResult<Value>;

    async fn delete(&self, path: &str) -> GatewayResult<Value>;
}
