//! Resource clients.
//!
//! Every client is generic over an [`Executor`](novita_core::Executor) and
//! returns `E::Output<T>`: `Result<T>` with the blocking transport, a future
//! of `Result<T>` with the async one. Methods only describe the call; the
//! executor performs it.

mod clusters;
mod endpoints;
mod images;
mod instances;
mod jobs;
mod metrics;
mod networks;
mod products;
mod registries;
mod ssh_keys;
mod storages;
mod templates;

pub use clusters::Clusters;
pub use endpoints::Endpoints;
pub use images::Images;
pub use instances::Instances;
pub use jobs::Jobs;
pub use metrics::Metrics;
pub use networks::Networks;
pub use products::Products;
pub use registries::Registries;
pub use ssh_keys::SshKeys;
pub use storages::Storages;
pub use templates::Templates;

use novita_core::{ApiRequest, Result};
use serde::Serialize;
use validator::Validate;

/// `POST` with a JSON body.
fn post<B: Serialize + ?Sized>(path: &str, body: &B) -> Result<ApiRequest> {
    ApiRequest::post(path).with_json(body)
}

/// `POST` with a JSON body that must pass local validation first.
fn post_validated<B: Serialize + Validate>(path: &str, body: &B) -> Result<ApiRequest> {
    body.validate()?;
    post(path, body)
}
