//! reqwest-backed [`Transport`].
//!
//! # Examples
//!
//! ```ignore
//! use couch_http::client::{ClientConfig, ReqwestTransport};
//! use couch_http::{StoreRequest, Transport};
//!
//! let transport = ReqwestTransport::with_config(ClientConfig::default())?;
//! let response = transport
//!     .send(StoreRequest::get("http://localhost:5984/test").with_basic_auth("admin", "secret"))
//!     .await?;
//! println!("{} {}", response.status, response.body);
//! ```

use crate::client::config::ClientConfig;
use crate::error::{Result, StoreError};
use crate::traits::Transport;
use crate::types::{Method, StoreRequest, StoreResponse};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// [`Transport`] that sends requests with a [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an existing reqwest client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a reqwest client from `config`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Config`] when the proxy URL is invalid or the client
    /// cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(config.user_agent);

        if !config.proxy_url.is_empty() {
            let proxy = reqwest::Proxy::all(&config.proxy_url)
                .map_err(|e| StoreError::Config(format!("invalid proxy url: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;
        Ok(Self { client })
    }

    /// Get the underlying reqwest client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: StoreRequest) -> Result<StoreResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut req_builder = self.client.request(method, &request.url);

        if let Some(auth) = &request.auth {
            req_builder = req_builder.basic_auth(&auth.user, Some(&auth.password));
        }
        if let Some(content_type) = &request.content_type {
            req_builder = req_builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(StoreResponse { status, body })
    }
}
