use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use conviction_indexer::{EdgeSource, IndexerClient, IndexerConfig, IndexerError};
use conviction_types::{Address, NetworkId};

#[derive(Clone, Copy)]
enum Mode {
    Ok,
    Status(StatusCode),
    GraphqlErrors,
    Hang,
}

#[derive(Clone)]
struct Stub {
    mode: Mode,
    total_edges: usize,
    requests: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

impl Stub {
    fn new(mode: Mode, total_edges: usize) -> Self {
        Self {
            mode,
            total_edges,
            requests: Arc::new(AtomicUsize::new(0)),
            last_body: Arc::new(Mutex::new(None)),
        }
    }
}

fn record(i: usize, track: u64) -> Value {
    json!({
        "from": format!("delegator{i}"),
        "to": "delegate",
        "balance": "1000",
        "lockPeriod": 1,
        "track": track,
        "createdAt": "2024-05-01T00:00:00Z",
    })
}

async fn graphql(State(stub): State<Stub>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    stub.requests.fetch_add(1, Ordering::SeqCst);
    *stub.last_body.lock().unwrap() = Some(body.clone());

    match stub.mode {
        Mode::Status(code) => return (code, Json(json!({}))),
        Mode::GraphqlErrors => {
            return (
                StatusCode::OK,
                Json(json!({ "data": null, "errors": [{ "message": "rate limited" }] })),
            )
        }
        Mode::Hang => tokio::time::sleep(Duration::from_secs(5)).await,
        Mode::Ok => {}
    }

    let query = body["query"].as_str().unwrap_or_default();
    let vars = &body["variables"];
    let track = vars["track_eq"].as_u64().unwrap_or(0);

    if query.contains("proposalsConnection") {
        let records: Vec<_> = (0..stub.total_edges).map(|i| record(i, track)).collect();
        return (
            StatusCode::OK,
            Json(json!({ "data": {
                "votingDelegations": records,
                "proposalsConnection": { "totalCount": 3 },
            }})),
        );
    }

    let limit = vars["limit"].as_u64().unwrap_or(0) as usize;
    let offset = vars["offset"].as_u64().unwrap_or(0) as usize;
    let end = (offset + limit).min(stub.total_edges);
    let records: Vec<_> = (offset.min(end)..end).map(|i| record(i, track)).collect();
    (
        StatusCode::OK,
        Json(json!({ "data": { "votingDelegations": records } })),
    )
}

async fn spawn_stub(stub: Stub) -> String {
    let app = Router::new().route("/graphql", post(graphql)).with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/graphql")
}

async fn client_for(stub: &Stub, page_size: usize, max_pages: usize) -> IndexerClient {
    let url = spawn_stub(stub.clone()).await;
    let mut config = IndexerConfig::default().with_endpoint(NetworkId::Polkadot, url);
    config.page_size = page_size;
    config.max_pages = max_pages;
    config.timeout_secs = 1;
    IndexerClient::new(config).unwrap()
}

#[tokio::test]
async fn pages_until_short_page() {
    let stub = Stub::new(Mode::Ok, 25);
    let client = client_for(&stub, 10, 100).await;

    let edges = client.fetch_edges(NetworkId::Polkadot, None).await.unwrap();
    assert_eq!(edges.len(), 25);
    assert_eq!(stub.requests.load(Ordering::SeqCst), 3);
    assert_eq!(edges[24].from.as_str(), "delegator24");
}

#[tokio::test]
async fn exact_multiple_needs_one_empty_page() {
    let stub = Stub::new(Mode::Ok, 20);
    let client = client_for(&stub, 10, 100).await;

    let edges = client.fetch_edges(NetworkId::Polkadot, Some(11)).await.unwrap();
    assert_eq!(edges.len(), 20);
    assert_eq!(stub.requests.load(Ordering::SeqCst), 3);
    assert!(edges.iter().all(|e| e.track == 11));

    let last = stub.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(last["variables"]["track_eq"], 11);
    assert_eq!(last["variables"]["offset"], 20);
}

#[tokio::test]
async fn paging_stops_at_max_pages() {
    let stub = Stub::new(Mode::Ok, 100);
    let client = client_for(&stub, 10, 2).await;

    let edges = client.fetch_edges(NetworkId::Polkadot, None).await.unwrap();
    assert_eq!(edges.len(), 20);
    assert_eq!(stub.requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn snapshot_sends_address_and_statuses() {
    let stub = Stub::new(Mode::Ok, 2);
    let client = client_for(&stub, 10, 1).await;
    let address = Address::new("15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5");

    let snapshot = client
        .fetch_track_snapshot(NetworkId::Polkadot, &address, 33)
        .await
        .unwrap();
    assert_eq!(snapshot.edges.len(), 2);
    assert_eq!(snapshot.active_proposals_count, 3);

    let body = stub.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["variables"]["address"], address.as_str());
    assert_eq!(body["variables"]["track_eq"], 33);
    assert_eq!(body["variables"]["status_in"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let stub = Stub::new(Mode::Status(StatusCode::SERVICE_UNAVAILABLE), 0);
    let client = client_for(&stub, 10, 1).await;

    match client.fetch_edges(NetworkId::Polkadot, None).await {
        Err(IndexerError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn graphql_errors_are_reported() {
    let stub = Stub::new(Mode::GraphqlErrors, 0);
    let client = client_for(&stub, 10, 1).await;

    let result = client
        .fetch_track_snapshot(NetworkId::Polkadot, &Address::new("x"), 0)
        .await;
    assert!(matches!(result, Err(IndexerError::Graphql(msg)) if msg == "rate limited"));
}

#[tokio::test]
async fn slow_indexer_times_out() {
    let stub = Stub::new(Mode::Hang, 0);
    let client = client_for(&stub, 10, 1).await;

    let result = client.fetch_edges(NetworkId::Polkadot, None).await;
    assert!(matches!(result, Err(IndexerError::Timeout(_))), "got {result:?}");
}

#[tokio::test]
async fn unconfigured_network_is_rejected_without_io() {
    let stub = Stub::new(Mode::Ok, 0);
    let client = client_for(&stub, 10, 1).await;

    let result = client.fetch_edges(NetworkId::Acala, None).await;
    assert!(matches!(result, Err(IndexerError::NoEndpoint(NetworkId::Acala))));
    assert_eq!(stub.requests.load(Ordering::SeqCst), 0);
}
