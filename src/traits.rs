use crate::error::Result;
use crate::types::{StoreRequest, StoreResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Abstraction for the HTTP exchange with the document store.
///
/// Implementations send exactly one request per call and report the final
/// status and body, whatever the status is. Only a failed exchange is an `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for its response.
    async fn send(&self, request: StoreRequest) -> Result<StoreResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: StoreRequest) -> Result<StoreResponse> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, request: StoreRequest) -> Result<StoreResponse> {
        (**self).send(request).await
    }
}
