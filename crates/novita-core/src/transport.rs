//! HTTP transports.
//!
//! [`BlockingTransport`] and [`AsyncTransport`] share configuration handling,
//! URL construction and status translation. Both are cheap to clone; clones
//! share the underlying connection pool. Closing any clone drops the pool for
//! all of them.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request::{ApiRequest, Executor, Operation};
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;
use url::Url;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("novita-rust/", env!("CARGO_PKG_VERSION"));

/// State shared by every clone of a transport.
///
/// The HTTP client lives behind the lock until the transport is closed;
/// closing takes it out, so its connection pool is dropped once in-flight
/// requests finish.
#[derive(Debug)]
struct Shared<C> {
    http: RwLock<Option<C>>,
    base_url: Url,
}

impl<C: Clone> Shared<C> {
    fn new(http: C, base_url: Url) -> Arc<Self> {
        Arc::new(Self {
            http: RwLock::new(Some(http)),
            base_url,
        })
    }

    fn client(&self) -> Result<C> {
        self.http
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::ClientClosed)
    }

    fn is_closed(&self) -> bool {
        self.http
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn close(&self) -> bool {
        let released = self
            .http
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let first = released.is_some();
        if first {
            debug!(base_url = %self.base_url, "closing Novita transport");
        }
        drop(released);
        first
    }
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut auth = HeaderValue::from_str(&config.bearer())
        .map_err(|_| Error::Config("API key contains characters not allowed in a header".into()))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn build_url(base: &Url, request: &ApiRequest) -> Result<Url> {
    let mut url = base.join(request.path.trim_start_matches('/'))?;
    if !request.query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(request.query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}

/// Transport that blocks the calling thread.
///
/// Must not be used from inside an async runtime; use [`AsyncTransport`]
/// there instead.
#[derive(Debug, Clone)]
pub struct BlockingTransport {
    inner: Arc<Shared<reqwest::blocking::Client>>,
}

impl BlockingTransport {
    /// Create a transport from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.parse_base_url()?;
        let http = reqwest::blocking::Client::builder()
            .default_headers(default_headers(config)?)
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            inner: Shared::new(http, base_url),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Close the transport and release its connection pool. Returns `true`
    /// only for the call that actually closed it; later calls through any
    /// clone fail with [`Error::ClientClosed`].
    pub fn close(&self) -> bool {
        self.inner.close()
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    fn send<T: Send + 'static>(&self, operation: Operation<T>) -> Result<T> {
        let http = self.inner.client()?;
        let (request, decode) = operation.into_parts();
        let request = request?;
        let url = build_url(&self.inner.base_url, &request)?;
        let target = request.target();

        debug!(request = %target, "sending Novita request");
        let mut builder = http.request(request.method, url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.bytes()?;
        debug!(request = %target, status = status.as_u16(), bytes = body.len(), "received Novita response");

        Error::check_response(status, &target, &body)?;
        decode(&body)
    }
}

impl Executor for BlockingTransport {
    type Output<T: Send + 'static> = Result<T>;

    fn execute<T: Send + 'static>(&self, operation: Operation<T>) -> Self::Output<T> {
        self.send(operation)
    }
}

/// Transport that returns futures.
#[derive(Debug, Clone)]
pub struct AsyncTransport {
    inner: Arc<Shared<reqwest::Client>>,
}

impl AsyncTransport {
    /// Create a transport from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.parse_base_url()?;
        let http = reqwest::Client::builder()
            .default_headers(default_headers(config)?)
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            inner: Shared::new(http, base_url),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Close the transport and release its connection pool. Returns `true`
    /// only for the call that actually closed it; later calls through any
    /// clone fail with [`Error::ClientClosed`].
    pub fn close(&self) -> bool {
        self.inner.close()
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    async fn send<T: Send + 'static>(self, operation: Operation<T>) -> Result<T> {
        let http = self.inner.client()?;
        let (request, decode) = operation.into_parts();
        let request = request?;
        let url = build_url(&self.inner.base_url, &request)?;
        let target = request.target();

        debug!(request = %target, "sending Novita request");
        let mut builder = http.request(request.method, url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(request = %target, status = status.as_u16(), bytes = body.len(), "received Novita response");

        Error::check_response(status, &target, &body)?;
        decode(&body)
    }
}

impl Executor for AsyncTransport {
    type Output<T: Send + 'static> = BoxFuture<'static, Result<T>>;

    fn execute<T: Send + 'static>(&self, operation: Operation<T>) -> Self::Output<T> {
        self.clone().send(operation).boxed()
    }
}
