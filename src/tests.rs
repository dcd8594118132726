//! Client protocol tests against in-process transports.

use crate::error::{Result, StoreError};
use crate::{ConnectionConfig, CouchClient, Method, StoreRequest, StoreResponse, Transport};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::sync::Arc;

const HOST: &str = "http://localhost";
const BASE: &str = "http://localhost:5984/test";

fn config() -> ConnectionConfig {
    ConnectionConfig::new("admin", "secret", "test", HOST)
}

/// Replays canned responses in order and records every request.
#[derive(Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<StoreResponse>>>,
    requests: Mutex<Vec<StoreRequest>>,
}

impl ScriptedTransport {
    fn new(responses: impl IntoIterator<Item = StoreResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::default(),
        })
    }

    fn failing() -> Arc<Self> {
        let transport = Self::default();
        transport
            .responses
            .lock()
            .push_back(Err(StoreError::Transport("connection refused".into())));
        Arc::new(transport)
    }

    fn calls(&self) -> Vec<(Method, String)> {
        self.requests
            .lock()
            .iter()
            .map(|r| (r.method, r.url.clone()))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: StoreRequest) -> Result<StoreResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(StoreError::Transport("no scripted response left".into())))
    }
}

#[derive(Default)]
struct MemoryState {
    databases: HashSet<String>,
    documents: HashMap<(String, String), (u64, Map<String, Value>)>,
    requests: Vec<(Method, String)>,
}

/// Minimal CouchDB: databases, documents and `_rev` conflict checks.
#[derive(Default)]
struct MemoryCouch {
    state: Mutex<MemoryState>,
}

fn couch_error(status: u16, error: &str) -> StoreResponse {
    StoreResponse::new(status, json!({ "error": error, "reason": error }).to_string())
}

fn rev_string(generation: u64, id: &str) -> String {
    format!("{}-{:032x}", generation, id.len() as u64 * 7919 + generation)
}

impl MemoryCouch {
    fn calls(&self) -> Vec<(Method, String)> {
        self.state.lock().requests.clone()
    }

    fn handle(&self, request: &StoreRequest) -> StoreResponse {
        let mut state = self.state.lock();
        state.requests.push((request.method, request.url.clone()));

        let Some(rest) = request.url.strip_prefix("http://localhost:5984/") else {
            return couch_error(400, "bad_request");
        };
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        let rev = query.strip_prefix("rev=");
        let (db, id) = match path.split_once('/') {
            Some((db, id)) => (db.to_string(), Some(id.to_string())),
            None => (path.to_string(), None),
        };

        let Some(id) = id else {
            return match request.method {
                Method::Get if state.databases.contains(&db) => {
                    StoreResponse::new(200, json!({ "db_name": db }).to_string())
                }
                Method::Get => couch_error(404, "not_found"),
                Method::Put if state.databases.insert(db.clone()) => {
                    StoreResponse::new(201, r#"{"ok":true}"#)
                }
                Method::Put => couch_error(412, "file_exists"),
                Method::Delete => couch_error(405, "method_not_allowed"),
            };
        };

        if !state.databases.contains(&db) {
            return couch_error(404, "not_found");
        }
        if rev == Some("null") {
            return couch_error(400, "bad_request");
        }

        let key = (db, id.clone());
        let current = state.documents.get(&key).map(|(g, _)| rev_string(*g, &id));
        match request.method {
            Method::Get => match state.documents.get(&key) {
                Some((generation, body)) => {
                    let mut doc = body.clone();
                    doc.insert("_id".into(), json!(id));
                    doc.insert("_rev".into(), json!(rev_string(*generation, &id)));
                    StoreResponse::new(200, Value::Object(doc).to_string())
                }
                None => couch_error(404, "not_found"),
            },
            Method::Put => {
                if current.as_deref() != rev {
                    return couch_error(409, "conflict");
                }
                let body: Map<String, Value> = request
                    .body
                    .as_deref()
                    .and_then(|b| serde_json::from_str(b).ok())
                    .unwrap_or_default();
                let generation = state.documents.get(&key).map_or(1, |(g, _)| g + 1);
                state.documents.insert(key, (generation, body));
                let rev = rev_string(generation, &id);
                StoreResponse::new(201, json!({ "ok": true, "id": id, "rev": rev }).to_string())
            }
            Method::Delete => {
                if current.is_none() {
                    return couch_error(404, "not_found");
                }
                if current.as_deref() != rev {
                    return couch_error(409, "conflict");
                }
                state.documents.remove(&key);
                StoreResponse::new(200, r#"{"ok":true}"#)
            }
        }
    }
}

#[async_trait]
impl Transport for MemoryCouch {
    async fn send(&self, request: StoreRequest) -> Result<StoreResponse> {
        Ok(self.handle(&request))
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_errors() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::ERROR)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

#[test]
fn test_base_url_tracks_latest_database() {
    let transport = ScriptedTransport::new(Vec::new());
    let mut client = CouchClient::new(config(), transport.clone());
    assert_eq!(client.base_url(), BASE);

    client.set_database("first");
    client.set_database("second");
    assert_eq!(client.base_url(), "http://localhost:5984/second");
    assert_eq!(client.database(), "second");

    let mut portless = CouchClient::new(config().with_port(None), transport.clone());
    portless.set_database("other");
    assert_eq!(portless.base_url(), "http://localhost/other");
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_create_database_existing_skips_put() {
    let transport = ScriptedTransport::new([StoreResponse::new(200, r#"{"db_name":"test"}"#)]);
    let client = CouchClient::new(config(), transport.clone());

    assert!(client.create_database().await.unwrap());
    assert_eq!(transport.calls(), vec![(Method::Get, BASE.to_string())]);
}

#[tokio::test]
async fn test_create_database_bootstraps_missing() {
    let transport = ScriptedTransport::new([
        StoreResponse::new(404, r#"{"error":"not_found"}"#),
        StoreResponse::new(201, r#"{"ok":true}"#),
    ]);
    let client = CouchClient::new(config(), transport.clone());

    assert!(client.create_database().await.unwrap());
    assert_eq!(
        transport.calls(),
        vec![(Method::Get, BASE.to_string()), (Method::Put, BASE.to_string())]
    );
    let requests = transport.requests.lock();
    assert!(requests[1].body.is_none());
}

#[tokio::test]
async fn test_create_database_put_failure() {
    let transport = ScriptedTransport::new([
        StoreResponse::new(404, ""),
        StoreResponse::new(500, r#"{"error":"unknown_error"}"#),
    ]);
    let client = CouchClient::new(config(), transport);

    assert!(!client.create_database().await.unwrap());
}

#[tokio::test]
async fn test_requests_carry_credentials() {
    let transport = ScriptedTransport::new([StoreResponse::new(201, "")]);
    let client = CouchClient::new(config(), transport.clone());

    client.create("doc1", r#"{"a":1}"#).await.unwrap();

    let requests = transport.requests.lock();
    let request = &requests[0];
    let auth = request.auth.as_ref().unwrap();
    assert_eq!(auth.user, "admin");
    assert_eq!(auth.password, "secret");
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.body.as_deref(), Some(r#"{"a":1}"#));
}

#[tokio::test]
async fn test_create_conflict_is_false() {
    let transport = ScriptedTransport::new([StoreResponse::new(409, r#"{"error":"conflict"}"#)]);
    let client = CouchClient::new(config(), transport.clone());

    assert!(!client.create("doc1", "{}").await.unwrap());
    assert_eq!(transport.calls(), vec![(Method::Put, format!("{}/doc1", BASE))]);
}

#[tokio::test]
async fn test_write_status_boundary() {
    let transport = ScriptedTransport::new([
        StoreResponse::new(299, ""),
        StoreResponse::new(300, ""),
        StoreResponse::new(299, ""),
        StoreResponse::new(300, ""),
    ]);
    let client = CouchClient::new(config(), transport);

    assert!(client.create("a", "{}").await.unwrap());
    assert!(!client.create("b", "{}").await.unwrap());
    assert!(client.update("a", "{}", Some("1-x")).await.unwrap());
    assert!(!client.update("b", "{}", Some("1-x")).await.unwrap());
}

#[tokio::test]
async fn test_update_with_revision_skips_lookup() {
    let transport = ScriptedTransport::new([StoreResponse::new(201, "")]);
    let client = CouchClient::new(config(), transport.clone());

    assert!(client.update("x", r#"{"a":2}"#, Some("1-abc")).await.unwrap());
    assert_eq!(transport.calls(), vec![(Method::Put, format!("{}/x?rev=1-abc", BASE))]);
}

#[tokio::test]
async fn test_update_resolves_revision() {
    let transport = ScriptedTransport::new([
        StoreResponse::new(200, r#"{"_id":"x","_rev":"2-def","a":1}"#),
        StoreResponse::new(201, ""),
    ]);
    let client = CouchClient::new(config(), transport.clone());

    assert!(client.update("x", r#"{"a":2}"#, None).await.unwrap());
    assert_eq!(
        transport.calls(),
        vec![
            (Method::Get, format!("{}/x", BASE)),
            (Method::Put, format!("{}/x?rev=2-def", BASE)),
        ]
    );
}

#[tokio::test]
async fn test_update_unresolved_revision_sends_null() {
    let transport = ScriptedTransport::new([
        StoreResponse::new(404, r#"{"error":"not_found"}"#),
        StoreResponse::new(400, r#"{"error":"bad_request"}"#),
    ]);
    let client = CouchClient::new(config(), transport.clone());

    assert!(!client.update("x", "{}", None).await.unwrap());
    assert_eq!(transport.calls()[1], (Method::Put, format!("{}/x?rev=null", BASE)));
}

#[tokio::test]
async fn test_update_failure_logs_body_once() {
    let (logs, _guard) = capture_errors();
    let transport = ScriptedTransport::new([
        StoreResponse::new(409, r#"{"error":"conflict","reason":"Document update conflict."}"#),
        StoreResponse::new(201, ""),
    ]);
    let client = CouchClient::new(config(), transport);

    assert!(!client.update("x", "{}", Some("1-stale")).await.unwrap());
    assert!(client.update("x", "{}", Some("2-fresh")).await.unwrap());

    let text = logs.text();
    assert_eq!(text.matches("ERROR").count(), 1);
    assert!(text.contains("Document update conflict."));
}

#[tokio::test]
async fn test_other_failures_do_not_log() {
    let (logs, _guard) = capture_errors();
    let transport = ScriptedTransport::new([
        StoreResponse::new(409, "create-conflict"),
        StoreResponse::new(404, "read-missing"),
        StoreResponse::new(409, "delete-conflict"),
    ]);
    let client = CouchClient::new(config(), transport);

    assert!(!client.create("x", "{}").await.unwrap());
    assert!(client.read("x").await.unwrap().is_empty());
    assert!(!client.delete("x", Some("1-a")).await.unwrap());
    assert!(logs.text().is_empty());
}

#[tokio::test]
async fn test_read_non_ok_is_empty() {
    let transport = ScriptedTransport::new([
        StoreResponse::new(404, r#"{"error":"not_found"}"#),
        StoreResponse::new(401, r#"{"error":"unauthorized"}"#),
        StoreResponse::new(500, "oops"),
    ]);
    let client = CouchClient::new(config(), transport);

    for _ in 0..3 {
        assert!(client.read("x").await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_read_ok_non_json_is_error() {
    let transport = ScriptedTransport::new([StoreResponse::new(200, "<html>")]);
    let client = CouchClient::new(config(), transport);

    assert!(matches!(client.read("x").await, Err(StoreError::Json(_))));
}

#[tokio::test]
async fn test_delete_with_revision_skips_lookup() {
    let transport = ScriptedTransport::new([StoreResponse::new(200, r#"{"ok":true}"#)]);
    let client = CouchClient::new(config(), transport.clone());

    assert!(client.delete("x", Some("3-ghi")).await.unwrap());
    assert_eq!(transport.calls(), vec![(Method::Delete, format!("{}/x?rev=3-ghi", BASE))]);
}

#[tokio::test]
async fn test_delete_unresolved_revision_sends_null() {
    let transport = ScriptedTransport::new([
        StoreResponse::new(404, ""),
        StoreResponse::new(400, ""),
    ]);
    let client = CouchClient::new(config(), transport.clone());

    assert!(!client.delete("x", None).await.unwrap());
    assert_eq!(
        transport.calls(),
        vec![
            (Method::Get, format!("{}/x", BASE)),
            (Method::Delete, format!("{}/x?rev=null", BASE)),
        ]
    );
}

#[tokio::test]
async fn test_lookup_without_rev_field_sends_null() {
    let transport = ScriptedTransport::new([
        StoreResponse::new(200, r#"{"_id":"x"}"#),
        StoreResponse::new(400, ""),
    ]);
    let client = CouchClient::new(config(), transport.clone());

    assert!(!client.delete("x", None).await.unwrap());
    assert_eq!(transport.calls()[1].1, format!("{}/x?rev=null", BASE));
}

#[tokio::test]
async fn test_delete_uses_ok_threshold() {
    // 1xx passes the write threshold but delete needs 2xx
    let transport = ScriptedTransport::new([StoreResponse::new(102, "")]);
    let client = CouchClient::new(config(), transport);

    assert!(!client.delete("x", Some("1-a")).await.unwrap());
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let client = CouchClient::new(config(), ScriptedTransport::failing());
    let err = client.create_database().await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));

    let client = CouchClient::new(config(), ScriptedTransport::failing());
    assert!(client.update("x", "{}", None).await.is_err());
}

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let couch = Arc::new(MemoryCouch::default());
    let client = CouchClient::new(config(), couch.clone());

    assert!(client.create_database().await.unwrap());
    assert!(client.create("doc1", r#"{"a":1,"tags":["x","y"]}"#).await.unwrap());

    let doc = client.read("doc1").await.unwrap();
    assert_eq!(doc["a"], json!(1));
    assert_eq!(doc["tags"], json!(["x", "y"]));
    assert!(doc["_rev"].as_str().unwrap().starts_with("1-"));
}

#[tokio::test]
async fn test_stale_revision_rejected() {
    let couch = Arc::new(MemoryCouch::default());
    let client = CouchClient::new(config(), couch);

    client.create_database().await.unwrap();
    client.create("doc1", r#"{"a":1}"#).await.unwrap();
    let first = client.read("doc1").await.unwrap()["_rev"].as_str().unwrap().to_owned();

    assert!(client.update("doc1", r#"{"a":2}"#, Some(first.as_str())).await.unwrap());
    assert!(!client.update("doc1", r#"{"a":3}"#, Some(first.as_str())).await.unwrap());
    assert!(!client.delete("doc1", Some(first.as_str())).await.unwrap());
    assert_eq!(client.read("doc1").await.unwrap()["a"], json!(2));
}

#[tokio::test]
async fn test_full_document_lifecycle() {
    let couch = Arc::new(MemoryCouch::default());
    let client = CouchClient::new(config(), couch.clone());

    assert!(client.create_database().await.unwrap());
    assert_eq!(
        couch.calls(),
        vec![(Method::Get, BASE.to_string()), (Method::Put, BASE.to_string())]
    );

    assert!(client.create("doc1", r#"{"a":1}"#).await.unwrap());
    let doc = client.read("doc1").await.unwrap();
    assert_eq!(doc["a"], json!(1));
    let rev = doc["_rev"].as_str().unwrap().to_owned();

    let before = couch.calls().len();
    assert!(client.update("doc1", r#"{"a":2}"#, None).await.unwrap());
    assert_eq!(
        couch.calls()[before..],
        [
            (Method::Get, format!("{}/doc1", BASE)),
            (Method::Put, format!("{}/doc1?rev={}", BASE, rev)),
        ]
    );
    assert_eq!(client.read("doc1").await.unwrap()["a"], json!(2));

    let before = couch.calls().len();
    assert!(client.delete("doc1", None).await.unwrap());
    let calls = couch.calls();
    assert_eq!(calls[before].0, Method::Get);
    assert_eq!(calls[before + 1].0, Method::Delete);
    assert!(calls[before + 1].1.contains("?rev=2-"));

    assert!(client.read("doc1").await.unwrap().is_empty());
    assert!(!client.delete("doc1", None).await.unwrap());
}

#[tokio::test]
async fn test_set_database_redirects_operations() {
    let couch = Arc::new(MemoryCouch::default());
    let mut client = CouchClient::new(config(), couch.clone());

    client.create_database().await.unwrap();
    client.create("doc1", r#"{"a":1}"#).await.unwrap();

    client.set_database("other");
    assert!(client.read("doc1").await.unwrap().is_empty());
    assert!(client.create_database().await.unwrap());
    assert!(client.create("doc1", r#"{"b":1}"#).await.unwrap());

    client.set_database("test");
    assert_eq!(client.read("doc1").await.unwrap()["a"], json!(1));
}
