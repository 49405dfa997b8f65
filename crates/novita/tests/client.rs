//! Facade client construction and lifecycle.

use novita::{
    AsyncNovitaClient, AsyncTransport, BlockingTransport, ClientConfig, Error, NovitaClient,
};
use serde_json::json;
use serial_test::serial;
use std::panic::{catch_unwind, AssertUnwindSafe};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY_ENV: &str = "NOVITA_API_KEY";

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("sk-test")
        .unwrap()
        .with_base_url(format!("{}/v1", server.uri()))
}

async fn mount_instances(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/v1/gpu/instances"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "instances": [{"id": "inst-1", "name": "worker", "status": "running"}],
            "message": "rejected"
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Lists instances inside a client scope, recording the transport it used.
fn count_instances(
    config: ClientConfig,
    used: &mut Option<BlockingTransport>,
) -> novita::Result<usize> {
    let client = NovitaClient::new(config)?;
    *used = Some(client.transport().clone());
    let instances = client.gpu.instances.list()?;
    Ok(instances.len())
}

async fn count_instances_async(
    config: ClientConfig,
    used: &mut Option<AsyncTransport>,
) -> novita::Result<usize> {
    let client = AsyncNovitaClient::new(config)?;
    *used = Some(client.transport().clone());
    let instances = client.gpu.instances.list().await?;
    Ok(instances.len())
}

#[test]
#[serial]
fn test_missing_key_fails_before_any_request() {
    std::env::remove_var(API_KEY_ENV);

    let err = NovitaClient::from_env().unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
    assert!(err.to_string().contains("No API key provided"));

    let err = AsyncNovitaClient::from_env().unwrap_err();
    assert!(err.to_string().contains("No API key provided"));

    let err = NovitaClient::with_api_key("   ").unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
}

#[test]
#[serial]
fn test_key_from_environment() {
    std::env::set_var(API_KEY_ENV, "sk-from-env");
    let client = NovitaClient::from_env();
    std::env::remove_var(API_KEY_ENV);

    let client = client.unwrap();
    assert_eq!(
        client.transport().base_url().as_str(),
        "https://api.novita.ai/gpu-instance/openapi/v1/"
    );
}

#[test]
fn test_drop_closes_transport_once() {
    let client = NovitaClient::with_api_key("sk-test").unwrap();
    let transport = client.transport().clone();
    let instances = client.gpu.instances.clone();
    drop(client);

    assert!(transport.is_closed());
    assert!(!transport.close(), "transport was already closed by drop");

    let err = instances.list().unwrap_err();
    assert_eq!(err, Error::ClientClosed);
}

#[test]
fn test_explicit_close_then_drop() {
    let client = NovitaClient::with_api_key("sk-test").unwrap();
    let transport = client.transport().clone();
    assert!(client.close());
    assert!(!client.close());
    drop(client);
    assert!(transport.is_closed());
}

#[test]
fn test_panic_still_closes_transport() {
    let client = NovitaClient::with_api_key("sk-test").unwrap();
    let transport = client.transport().clone();

    let result = catch_unwind(AssertUnwindSafe(move || {
        let _client = client;
        panic!("boom");
    }));

    assert!(result.is_err());
    assert!(transport.is_closed());
    assert!(!transport.close());
}

#[tokio::test]
async fn test_async_client_against_base_url_override() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clusters"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "us-ca-01", "name": "US-CA-01", "supportNetworkStorage": true}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let config = config(&server);
    let client = AsyncNovitaClient::new(config.clone()).unwrap();
    let clusters = client.gpu.clusters.list().await.unwrap();
    assert!(clusters[0].support_network_storage);
    assert!(client.aclose().await);
    assert!(!client.aclose().await);
    assert_eq!(client.gpu.clusters.list().await.unwrap_err(), Error::ClientClosed);

    let blocking = tokio::task::spawn_blocking(move || {
        let client = NovitaClient::new(config).unwrap();
        client.gpu.clusters.list()
    })
    .await
    .unwrap()
    .unwrap();
    assert_eq!(blocking, clusters);
}

#[tokio::test]
async fn test_scoped_client_closes_after_call() {
    for (status, succeeds) in [(200, true), (401, false)] {
        let server = MockServer::start().await;
        mount_instances(&server, status).await;

        let config = config(&server);
        let (result, transport) = tokio::task::spawn_blocking(move || {
            let mut used = None;
            let result = count_instances(config, &mut used);
            (result, used.unwrap())
        })
        .await
        .unwrap();

        assert_eq!(result.is_ok(), succeeds, "{result:?}");
        if !succeeds {
            assert!(matches!(result, Err(Error::Authentication { .. })));
        }
        assert!(transport.is_closed());
        assert!(!transport.close(), "scope exit should have closed it");
    }
}

#[tokio::test]
async fn test_scoped_async_client_closes_after_call() {
    for (status, succeeds) in [(200, true), (401, false)] {
        let server = MockServer::start().await;
        mount_instances(&server, status).await;

        let mut used = None;
        let result = count_instances_async(config(&server), &mut used).await;
        let transport = used.unwrap();

        assert_eq!(result.is_ok(), succeeds, "{result:?}");
        if succeeds {
            assert_eq!(result.unwrap(), 1);
        }
        assert!(transport.is_closed());
        assert!(!transport.close());
    }
}
