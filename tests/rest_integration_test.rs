use httpmock::prelude::*;
use paperspace_client::{
    Client, ClientConfig, ClusterGetParams, ClusterPlatformType, ExperimentParams,
    MachineCreateParams, MachineListParams, MachineState, MlModel, NetworkDeleteParams,
    NetworkListParams, PaperspaceError, RequestParams, SingleNodeExperimentParams,
    UpdateModelParams,
};
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn client_for(server: &MockServer) -> Client {
    let config = ClientConfig::default()
        .with_api_key("test-key")
        .with_base_url(server.base_url());
    Client::from_config(config)
}

#[tokio::test]
async fn test_get_machines_sends_filter_as_query() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/machines/getMachines")
                .header("x-api-key", "test-key")
                .header("accept", "application/json")
                .query_param("filter", r#"{"state":"running"}"#);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([
                    {"id": "ps1", "name": "gpu-1", "state": "running", "cpus": 8},
                    {"id": "ps2", "name": "gpu-2", "state": "serviceready"}
                ]));
        })
        .await;

    let client = client_for(&server);
    let machines = client
        .get_machines(
            MachineListParams::new().with_filter("state", "running"),
            &RequestParams::default(),
        )
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(machines.len(), 2);
    assert_eq!(machines[0].state, MachineState::Running);
    assert_eq!(
        machines[1].state,
        MachineState::Other("serviceready".to_string())
    );
}

#[tokio::test]
async fn test_get_machine_by_id() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/machines/getMachinePublic")
                .query_param("machineId", "psabc123");
            then.status(200).json_body(json!({
                "id": "psabc123",
                "name": "workstation",
                "state": "off",
                "region": "East Coast (NY2)",
                "dtCreated": "2021-11-09T17:43:48.102Z"
            }));
        })
        .await;

    let client = client_for(&server);
    let machine = client
        .get_machine("psabc123", &RequestParams::default())
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(machine.name, "workstation");
    assert_eq!(machine.state, MachineState::Off);
    assert!(machine.dt_created.is_some());
}

#[tokio::test]
async fn test_create_machine_posts_json_body() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/machines/createSingleMachinePublic")
                .header("content-type", "application/json")
                .json_body(json!({
                    "name": "trainer",
                    "region": "East Coast (NY2)",
                    "machineType": "P4000",
                    "size": 50,
                    "billingType": "hourly",
                    "templateId": "tkni3aa4",
                    "assignPublicIP": true
                }));
            then.status(200)
                .json_body(json!({"id": "psnew", "name": "trainer", "state": "provisioning"}));
        })
        .await;

    let client = client_for(&server);
    let params = MachineCreateParams {
        name: "trainer".to_string(),
        region: "East Coast (NY2)".to_string(),
        machine_type: "P4000".to_string(),
        size: 50,
        billing_type: "hourly".to_string(),
        template_id: "tkni3aa4".to_string(),
        assign_public_ip: true,
        ..Default::default()
    };
    let machine = client
        .create_machine(params, &RequestParams::default())
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(machine.id, "psnew");
    assert_eq!(machine.state, MachineState::Provisioning);
}

#[tokio::test]
async fn test_custom_headers_are_forwarded() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/clusters/getCluster")
                .query_param("id", "clabc")
                .header("x-team", "team-1");
            then.status(200).json_body(json!({"id": "clabc", "cloud": "aws"}));
        })
        .await;

    let client = client_for(&server);
    let rp = RequestParams::default()
        .with_header("x-team", "team-1")
        .with_timeout(Duration::from_secs(5));
    let cluster = client
        .get_cluster("clabc", Default::default(), &rp)
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(cluster.id, "clabc");
}

#[tokio::test]
async fn test_error_envelope_from_server() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/machines/updateMachine");
            then.status(400).json_body(json!({
                "error": {
                    "name": "ValidationError",
                    "message": "Invalid machine update",
                    "status": 400,
                    "details": {"message": "shutdownTimeoutInHours must be positive"}
                }
            }));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .update_machine(Default::default(), &RequestParams::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.to_string(),
        "Invalid machine update: shutdownTimeoutInHours must be positive"
    );
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/networks");
            then.status(502).body("upstream unavailable");
        })
        .await;

    let client = client_for(&server);
    let err = client
        .get_networks(Default::default(), &RequestParams::default())
        .await
        .unwrap_err();

    match err {
        PaperspaceError::Api(api) => {
            assert_eq!(api.name, "HTTPError");
            assert_eq!(api.status, 502);
            assert_eq!(api.message, "upstream unavailable");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_network_uses_delete_verb() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/networks/net-42");
            then.status(204);
        })
        .await;

    let client = client_for(&server);
    client
        .delete_network("net-42", NetworkDeleteParams::default(), &RequestParams::default())
        .await
        .unwrap();

    api_mock.assert_async().await;
}

#[tokio::test]
async fn test_run_experiment_unwraps_data() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/experiments/v2/run").json_body(json!({
                "name": "mnist",
                "projectHandle": "prq1",
                "container": "tensorflow/tensorflow:latest-gpu",
                "machineType": "P4000",
                "command": "python train.py"
            }));
            then.status(200).json_body(json!({
                "data": {
                    "id": 12,
                    "handle": "esabc",
                    "projectHandle": "prq1",
                    "state": 1,
                    "tags": ["nightly"],
                    "started_by_user_id": 7,
                    "dtCreated": "2021-11-09T17:43:48.102Z"
                },
                "message": "success"
            }));
        })
        .await;

    let client = client_for(&server);
    let params = ExperimentParams {
        name: Some("mnist".to_string()),
        project_handle: Some("prq1".to_string()),
        single_node: SingleNodeExperimentParams {
            container: Some("tensorflow/tensorflow:latest-gpu".to_string()),
            machine_type: Some("P4000".to_string()),
            command: Some("python train.py".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let experiment = client
        .run_experiment(params, &RequestParams::default())
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(experiment.handle, "esabc");
    assert_eq!(experiment.started_by_user_id, 7);
    assert_eq!(experiment.tags, vec!["nightly".to_string()]);
}

#[tokio::test]
async fn test_experiments_error_code_overrides_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/experiments/v2/run");
            then.status(400).json_body(json!({
                "error": {"name": "ValidationError", "status": 400, "code": 422,
                          "details": "machineType is required"}
            }));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .run_experiment(ExperimentParams::default(), &RequestParams::default())
        .await
        .unwrap_err();

    match err {
        PaperspaceError::Api(api) => {
            assert_eq!(api.status, 422);
            assert_eq!(api.message, "machineType is required");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_model() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/mlModels/updateModel").json_body(json!({
                "id": "mo123",
                "attributes": {"name": "resnet", "isPublic": false}
            }));
            then.status(200).json_body(json!({
                "name": "resnet",
                "isPublic": false,
                "modelType": "Tensorflow",
                "summary": {"accuracy": 0.93}
            }));
        })
        .await;

    let client = client_for(&server);
    let model = client
        .update_model(
            UpdateModelParams {
                id: "mo123".to_string(),
                attributes: MlModel {
                    name: Some("resnet".to_string()),
                    is_public: Some(false),
                    ..Default::default()
                },
            },
            &RequestParams::default(),
        )
        .await
        .unwrap();

    api_mock.assert_async().await;
    assert_eq!(model.model_type.as_deref(), Some("Tensorflow"));
    assert_eq!(model.summary.unwrap()["accuracy"], json!(0.93));
}

#[tokio::test]
async fn test_null_fields_in_responses() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/machines/getMachinePublic");
            then.status(200).json_body(json!({
                "id": "ps1",
                "gpu": null,
                "agentType": null,
                "state": "off"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/networks");
            then.status(200).json_body(json!([
                {"id": "n1", "name": "private", "isManaged": null}
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/experiments/v2/run");
            then.status(200).json_body(json!({
                "data": {"id": 12, "handle": "esabc", "tags": null},
                "message": "success"
            }));
        })
        .await;

    let client = client_for(&server);
    let request_params = RequestParams::default();

    let machine = client.get_machine("ps1", &request_params).await.unwrap();
    assert_eq!(machine.gpu, "");
    assert_eq!(machine.agent_type, "");
    assert_eq!(machine.state, MachineState::Off);

    let networks = client
        .get_networks(NetworkListParams::default(), &request_params)
        .await
        .unwrap();
    assert_eq!(networks.len(), 1);
    assert!(!networks[0].is_managed);

    let experiment = client
        .run_experiment(ExperimentParams::default(), &request_params)
        .await
        .unwrap();
    assert_eq!(experiment.handle, "esabc");
    assert!(experiment.tags.is_empty());
}

#[tokio::test]
async fn test_cluster_with_unknown_platform() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/clusters/getCluster")
                .query_param("id", "c1");
            then.status(200)
                .json_body(json!({"id": "c1", "cloud": "oci", "name": null}));
        })
        .await;

    let client = client_for(&server);
    let cluster = client
        .get_cluster("c1", ClusterGetParams::default(), &RequestParams::default())
        .await
        .unwrap();

    assert_eq!(cluster.id, "c1");
    assert_eq!(cluster.name, "");
    assert_eq!(
        cluster.platform,
        Some(ClusterPlatformType::Other("oci".to_string()))
    );
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn fetch_machine_with_logs(debug: bool) -> String {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/machines/getMachinePublic");
            then.status(200)
                .json_body(json!({"id": "ps1", "name": "logged-machine"}));
        })
        .await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let config = ClientConfig {
        debug,
        ..ClientConfig::default()
            .with_api_key("test-key")
            .with_base_url(server.base_url())
    };
    let client = Client::from_config(config);
    client
        .get_machine("ps1", &RequestParams::default())
        .await
        .unwrap();

    logs.contents()
}

#[tokio::test]
async fn test_debug_config_logs_response_bodies() {
    let logs = fetch_machine_with_logs(true).await;
    assert!(logs.contains("GET"));
    assert!(logs.contains("Response body:"));
    assert!(logs.contains("logged-machine"));
}

#[tokio::test]
async fn test_bodies_not_logged_without_debug() {
    let logs = fetch_machine_with_logs(false).await;
    assert!(logs.contains("-> 200"));
    assert!(!logs.contains("Response body:"));
}
