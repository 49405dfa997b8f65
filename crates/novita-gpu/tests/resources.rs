//! Resource clients against a mock API server.

use novita_core::id::{InstanceId, NetworkId, StorageId, TemplateId};
use novita_core::{AsyncTransport, BlockingTransport, ClientConfig, Error};
use novita_gpu::models::{
    CreateInstanceRequest, CreateNetworkStorageRequest, InstanceKind, InstanceListParams,
    InstanceStatus, JobListParams, SaveImageRequest,
};
use novita_gpu::GpuClient;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PREFIX: &str = "/gpu-instance/openapi/v1";

fn fixture(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture at {}: {}", path.display(), e));
    serde_json::from_str(&text).unwrap()
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("sk-test")
        .unwrap()
        .with_base_url(format!("{}{PREFIX}", server.uri()))
}

fn async_client(server: &MockServer) -> GpuClient<AsyncTransport> {
    let transport = AsyncTransport::new(&config(server)).unwrap();
    GpuClient::new(&transport)
}

async fn mount_get(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/{route}")))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_instances_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/gpu/instances")))
        .and(query_param("pageSize", "20"))
        .and(query_param("status", "running"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("instance_list.json")))
        .expect(1)
        .mount(&server)
        .await;

    let params = InstanceListParams {
        page_size: Some(20),
        status: Some(InstanceStatus::Running),
        ..InstanceListParams::default()
    };
    let instances = async_client(&server)
        .instances
        .list_with(&params)
        .await
        .unwrap();
    assert_eq!(instances.len(), 2);
}

#[tokio::test]
async fn test_create_instance_sends_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/gpu/instance/create")))
        .and(body_json(json!({
            "name": "trainer",
            "productId": "1xa100-80g",
            "gpuNum": 1,
            "rootfsSize": 100,
            "imageUrl": "nvcr.io/nvidia/pytorch:24.01-py3",
            "kind": "gpu"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "inst-new"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateInstanceRequest::new(
        "1xa100-80g",
        1,
        100,
        "nvcr.io/nvidia/pytorch:24.01-py3",
        InstanceKind::Gpu,
    )
    .with_name("trainer");
    let created = async_client(&server)
        .instances
        .create(&request)
        .await
        .unwrap();
    assert_eq!(created.id, "inst-new");
}

#[tokio::test]
async fn test_invalid_request_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = async_client(&server);
    let request = CreateInstanceRequest::new("p", 1, 5000, "img", InstanceKind::Gpu);
    let err = client.instances.create(&request).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let storage = CreateNetworkStorageRequest {
        cluster_id: "us-ca-01".into(),
        storage_name: "tiny".into(),
        storage_size: 1,
    };
    let err = client.storages.create(&storage).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_save_image_returns_job_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{PREFIX}/job/save/image")))
        .and(body_json(json!({"instanceId": "inst-1", "image": "acme/snap:v1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobId": "job-42"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = SaveImageRequest {
        instance_id: InstanceId::new("inst-1"),
        image: "acme/snap:v1".into(),
        registry_auth_id: None,
    };
    let job = async_client(&server)
        .instances
        .save_image(&request)
        .await
        .unwrap();
    assert_eq!(job, "job-42");
}

#[tokio::test]
async fn test_ssh_endpoint_from_port_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/gpu/instance")))
        .and(query_param("instanceId", "inst-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "inst-1",
            "name": "demo",
            "status": "running",
            "portMappings": [{"port": 22, "endpoint": "node1.example.com:22222", "type": "tcp"}]
        })))
        .mount(&server)
        .await;

    let endpoint = async_client(&server)
        .instances
        .get_ssh_endpoint(&InstanceId::new("inst-1"))
        .await
        .unwrap();
    assert_eq!(endpoint.to_string(), "root@node1.example.com:22222");
    assert_eq!(endpoint.command, "ssh root@node1.example.com -p 22222");
}

#[tokio::test]
async fn test_envelopes_per_resource() {
    let server = MockServer::start().await;
    mount_get(&server, "products", 200, fixture("gpu_products.json")).await;
    mount_get(&server, "endpoint", 200, fixture("endpoint.json")).await;
    mount_get(&server, "networkstorages/list", 200, json!({"data": null})).await;
    mount_get(&server, "templates", 200, fixture("templates.json")).await;
    mount_get(&server, "clusters", 200, json!({"data": [{"id": "us-ca-01", "name": "US-CA-01"}]}))
        .await;
    mount_get(
        &server,
        "jobs",
        200,
        json!({"jobs": [{"Id": "job-1", "type": "saveImage", "state": {"state": "running"}}]}),
    )
    .await;
    mount_get(&server, "image/prewarm/quota", 200, json!({"quota": 5, "used": 2})).await;

    let client = async_client(&server);
    assert_eq!(client.products.list().await.unwrap().len(), 2);
    assert_eq!(
        client.endpoints.get(&"ep-3f9a".into()).await.unwrap().name.as_deref(),
        Some("sdxl-serverless")
    );
    assert!(client.storages.list().await.unwrap().is_empty());
    assert_eq!(client.templates.list().await.unwrap().len(), 2);
    assert_eq!(client.clusters.list().await.unwrap()[0].id, "us-ca-01");
    let jobs = client.jobs.list_with(&JobListParams::default()).await.unwrap();
    assert_eq!(jobs[0].id, "job-1");
    assert_eq!(client.images.get_quota().await.unwrap().remaining(), 3);
}

#[tokio::test]
async fn test_missing_envelope_key_is_decode_error() {
    let server = MockServer::start().await;
    mount_get(&server, "products", 200, json!({"code": 0, "msg": "oops"})).await;
    mount_get(
        &server,
        "networkstorages/list",
        200,
        json!({"storages": [{"storageId": "stor-1", "storageSize": 10}]}),
    )
    .await;
    mount_get(
        &server,
        "gpu/instances",
        200,
        json!({"data": [{"id": "inst-1", "name": "x", "status": "running"}]}),
    )
    .await;

    let client = async_client(&server);
    let products = client.products.list().await;
    assert!(matches!(products, Err(Error::Decode(_))), "{products:?}");
    let storages = client.storages.list().await;
    assert!(matches!(storages, Err(Error::Decode(_))), "{storages:?}");
    let instances = client.instances.list().await;
    assert!(matches!(instances, Err(Error::Decode(_))), "{instances:?}");
}

#[tokio::test]
async fn test_cpu_products_accept_string_numbers() {
    let server = MockServer::start().await;
    mount_get(&server, "cpu/products", 200, fixture("cpu_products.json")).await;

    let products = async_client(&server).products.list_cpu().await.unwrap();
    assert_eq!(products[0].cpu_num, Some(4));
    assert_eq!(products[0].memory_size, Some(8));
}

#[tokio::test]
async fn test_network_get_empty_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PREFIX}/network")))
        .and(query_param("networkId", "net-404"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"network": []})))
        .mount(&server)
        .await;

    let err = async_client(&server)
        .networks
        .get(&NetworkId::new("net-404"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn test_status_translation_on_every_resource() {
    let cases = [
        (401, "authentication failed"),
        (404, "no such thing"),
        (429, "slow down"),
        (400, "rootfsSize too small"),
    ];

    for (status, message) in cases {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({"code": status, "message": message})),
            )
            .mount(&server)
            .await;

        let client = async_client(&server);
        let results = vec![
            client.instances.list().await.map(|_| ()),
            client.instances.stop(&InstanceId::new("inst-1")).await,
            client.products.list().await.map(|_| ()),
            client.clusters.list().await.map(|_| ()),
            client.endpoints.list().await.map(|_| ()),
            client.images.list().await.map(|_| ()),
            client.jobs.list().await.map(|_| ()),
            client.metrics.get(&InstanceId::new("inst-1")).await.map(|_| ()),
            client.networks.list().await.map(|_| ()),
            client.storages.delete(&StorageId::new("stor-1")).await,
            client.registries.list().await.map(|_| ()),
            client.templates.delete(&TemplateId::new("tpl-1")).await,
            client.ssh_keys.list().await.map(|_| ()),
        ];

        for result in results {
            let err = result.unwrap_err();
            match status {
                401 => assert!(matches!(err, Error::Authentication { .. }), "{err:?}"),
                404 => assert!(matches!(err, Error::NotFound { .. }), "{err:?}"),
                429 => assert!(matches!(err, Error::RateLimit { .. }), "{err:?}"),
                _ => {
                    assert!(matches!(err, Error::BadRequest { .. }), "{err:?}");
                    assert!(err.to_string().contains(message));
                }
            }
            assert_eq!(err.status(), Some(status));
        }
    }
}

#[tokio::test]
async fn test_blocking_and_async_agree() {
    let server = MockServer::start().await;
    mount_get(&server, "gpu/instances", 200, fixture("instance_list.json")).await;
    mount_get(&server, "products", 200, fixture("gpu_products.json")).await;
    mount_get(&server, "template", 200, json!({"id": "tpl-9", "name": "bare"})).await;

    let client = async_client(&server);
    let template_id = TemplateId::new("tpl-9");
    let (async_instances, async_products, async_template) = futures::try_join!(
        client.instances.list(),
        client.products.list(),
        client.templates.get(&template_id),
    )
    .unwrap();

    let config = config(&server);
    let (instances, products, template) = tokio::task::spawn_blocking(move || {
        let transport = BlockingTransport::new(&config).unwrap();
        let client = GpuClient::new(&transport);
        (
            client.instances.list().unwrap(),
            client.products.list().unwrap(),
            client.templates.get(&TemplateId::new("tpl-9")).unwrap(),
        )
    })
    .await
    .unwrap();

    assert_eq!(instances, async_instances);
    assert_eq!(products, async_products);
    assert_eq!(template, async_template);
}
