//! # novita
//!
//! Client for the Novita GPU cloud API.
//!
//! [`NovitaClient`] blocks the calling thread; [`AsyncNovitaClient`] returns
//! futures. Both expose the same resource clients under `gpu`:
//!
//! ```no_run
//! use novita::{NovitaClient, Result};
//!
//! fn main() -> Result<()> {
//!     let client = NovitaClient::from_env()?;
//!     for product in client.gpu.products.list()? {
//!         println!("{} {:?}", product.name, product.price());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The transport is closed, and its connection pool released, when the client
//! is dropped. Calls made afterwards through a cloned resource client fail
//! with [`Error::ClientClosed`].

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::future::{ready, Ready};
use tracing::debug;

pub use novita_core::{
    error, id, price, query, ApiRequest, AsyncTransport, BlockingTransport, ClientConfig, Error, ErrorPayload,
    Executor, Operation, Result,
};
pub use novita_gpu::{models, resources, ssh, GpuClient, SshEndpoint};

/// Blocking Novita client.
///
/// Must not be created or used inside an async runtime; use
/// [`AsyncNovitaClient`] there.
#[derive(Debug)]
pub struct NovitaClient {
    config: ClientConfig,
    transport: BlockingTransport,
    /// GPU instance API
    pub gpu: GpuClient<BlockingTransport>,
}

impl NovitaClient {
    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = BlockingTransport::new(&config)?;
        debug!(base_url = %transport.base_url(), "created blocking Novita client");
        Ok(Self {
            gpu: GpuClient::new(&transport),
            config,
            transport,
        })
    }

    /// Create a client with `api_key` and default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the key is empty.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(api_key)?)
    }

    /// Create a client with the key from `NOVITA_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Configuration the client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying transport, for issuing raw [`Operation`]s.
    #[must_use]
    pub fn transport(&self) -> &BlockingTransport {
        &self.transport
    }

    /// Close the transport and release its connections. Returns `true` only
    /// for the call that closed it.
    pub fn close(&self) -> bool {
        self.transport.close()
    }
}

impl Drop for NovitaClient {
    fn drop(&mut self) {
        self.transport.close();
    }
}

/// Asynchronous Novita client.
#[derive(Debug)]
pub struct AsyncNovitaClient {
    config: ClientConfig,
    transport: AsyncTransport,
    /// GPU instance API
    pub gpu: GpuClient<AsyncTransport>,
}

impl AsyncNovitaClient {
    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = AsyncTransport::new(&config)?;
        debug!(base_url = %transport.base_url(), "created async Novita client");
        Ok(Self {
            gpu: GpuClient::new(&transport),
            config,
            transport,
        })
    }

    /// Create a client with `api_key` and default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the key is empty.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(api_key)?)
    }

    /// Create a client with the key from `NOVITA_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Configuration the client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying transport, for issuing raw [`Operation`]s.
    #[must_use]
    pub fn transport(&self) -> &AsyncTransport {
        &self.transport
    }

    /// Close the transport and release its connections. Returns `true` only
    /// for the call that closed it.
    pub fn close(&self) -> bool {
        self.transport.close()
    }

    /// Awaitable form of [`close`](Self::close).
    ///
    /// The connection pool is dropped immediately; requests already in flight
    /// keep their connection until they complete.
    pub fn aclose(&self) -> Ready<bool> {
        ready(self.close())
    }
}

impl Drop for AsyncNovitaClient {
    fn drop(&mut self) {
        self.transport.close();
    }
}
