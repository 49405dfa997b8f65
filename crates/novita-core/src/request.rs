//! Request descriptions and the executor contract.
//!
//! Resource clients never perform I/O themselves. Each method builds an
//! [`Operation`]: the HTTP request to send plus the function that turns the
//! successful response body into the result type. An [`Executor`] runs the
//! operation, either blocking the caller or returning a future, so a single
//! resource implementation serves both the sync and async clients.

use crate::error::{Error, Result};
use crate::query::QueryParams;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A fully described HTTP call, independent of any transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the configured base URL
    pub path: String,
    /// Query parameters, in order
    pub query: Vec<(&'static str, String)>,
    /// JSON body, sent as `application/json`
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Describe a request with no query or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Shorthand for a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query.extend(query.into_pairs());
        self
    }

    /// Attach a JSON body.
    ///
    /// `None` fields are expected to be skipped by the body's `Serialize`
    /// implementation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body cannot be represented as JSON.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Method, path and query, for logs and not-found messages.
    #[must_use]
    pub fn target(&self) -> String {
        let mut target = format!("{} /{}", self.method, self.path.trim_start_matches('/'));
        for (i, (key, value)) in self.query.iter().enumerate() {
            target.push(if i == 0 { '?' } else { '&' });
            target.push_str(key);
            target.push('=');
            target.push_str(value);
        }
        target
    }
}

type Decoder<T> = Box<dyn FnOnce(&[u8]) -> Result<T> + Send>;

/// A request paired with the decoder for its successful response.
///
/// The request slot holds an error when the call was rejected before any I/O
/// (local validation, body serialization). Executors surface that error
/// without touching the network.
pub struct Operation<T> {
    request: Result<ApiRequest>,
    decode: Decoder<T>,
}

impl<T: Send + 'static> Operation<T> {
    /// Pair a request with a custom decoder.
    pub fn new<F>(request: Result<ApiRequest>, decode: F) -> Self
    where
        F: FnOnce(&[u8]) -> Result<T> + Send + 'static,
    {
        Self {
            request,
            decode: Box::new(decode),
        }
    }

    /// An operation that fails immediately with `error`.
    #[must_use]
    pub fn fail(error: Error) -> Self {
        Self::new(Err(error), |_| Err(Error::Decode("operation was never sent".into())))
    }

    /// Transform the decoded value.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Operation<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let decode = self.decode;
        Operation::new(self.request, move |body| decode(body).map(f))
    }

    /// Transform the decoded value with a fallible function.
    #[must_use]
    pub fn and_then<U, F>(self, f: F) -> Operation<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Result<U> + Send + 'static,
    {
        let decode = self.decode;
        Operation::new(self.request, move |body| decode(body).and_then(f))
    }

    /// The request this operation would send.
    ///
    /// # Errors
    ///
    /// Returns the error recorded when the request could not be built.
    pub fn request(&self) -> std::result::Result<&ApiRequest, &Error> {
        self.request.as_ref()
    }

    /// Decode a successful response body.
    ///
    /// # Errors
    ///
    /// Returns whatever error the decoder produces.
    pub fn decode(self, body: &[u8]) -> Result<T> {
        (self.decode)(body)
    }

    /// Split into the request and the decoder.
    #[must_use]
    pub fn into_parts(self) -> (Result<ApiRequest>, Decoder<T>) {
        (self.request, self.decode)
    }
}

impl<T: DeserializeOwned + Send + 'static> Operation<T> {
    /// Decode the response body as JSON into `T`.
    #[must_use]
    pub fn json(request: Result<ApiRequest>) -> Self {
        Self::new(request, |body| {
            serde_json::from_slice(body).map_err(|e| Error::Decode(e.to_string()))
        })
    }
}

impl Operation<()> {
    /// Ignore the response body.
    #[must_use]
    pub fn unit(request: Result<ApiRequest>) -> Self {
        Self::new(request, |_| Ok(()))
    }
}

impl<T> fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

/// Runs operations against the API.
///
/// Blocking executors return `Result<T>` directly; asynchronous ones return a
/// future resolving to `Result<T>`. Resource clients are generic over the
/// executor and return `E::Output<T>` from every method.
pub trait Executor: Clone + Send + Sync + 'static {
    /// What a call returns for a result type `T`.
    type Output<T: Send + 'static>;

    /// Send the request and decode the response.
    fn execute<T: Send + 'static>(&self, operation: Operation<T>) -> Self::Output<T>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Echo {
        name: String,
    }

    #[test]
    fn test_target_includes_query() {
        let request = ApiRequest::get("/gpu/instance").with_query(
            QueryParams::new()
                .with("instanceId", "inst-1")
                .with("verbose", true),
        );
        assert_eq!(request.target(), "GET /gpu/instance?instanceId=inst-1&verbose=true");
    }

    #[test]
    fn test_with_json_records_body() {
        let request = ApiRequest::post("network/create")
            .with_json(&json!({"name": "vpc"}))
            .unwrap();
        assert_eq!(request.body, Some(json!({"name": "vpc"})));
    }

    #[test]
    fn test_json_operation_decodes() {
        let op = Operation::<Echo>::json(Ok(ApiRequest::get("echo")));
        assert_eq!(op.request().unwrap().path, "echo");
        let echo = op.decode(br#"{"name":"gpu"}"#).unwrap();
        assert_eq!(echo.name, "gpu");
    }

    #[test]
    fn test_json_operation_reports_decode_errors() {
        let op = Operation::<Echo>::json(Ok(ApiRequest::get("echo")));
        assert!(matches!(op.decode(b"[]"), Err(Error::Decode(_))));
    }

    #[test]
    fn test_map_and_and_then() {
        let op = Operation::<Echo>::json(Ok(ApiRequest::get("echo")))
            .map(|echo| echo.name)
            .and_then(|name| {
                if name.is_empty() {
                    Err(Error::not_found("empty"))
                } else {
                    Ok(name.len())
                }
            });
        assert_eq!(op.decode(br#"{"name":"abc"}"#).unwrap(), 3);
    }

    #[test]
    fn test_fail_keeps_error() {
        let op = Operation::<()>::fail(Error::Validation("bad".into()));
        assert!(matches!(op.request(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_unit_ignores_body() {
        let op = Operation::unit(Ok(ApiRequest::post("gpu/instance/stop")));
        assert!(op.decode(b"not json at all").is_ok());
    }
}
