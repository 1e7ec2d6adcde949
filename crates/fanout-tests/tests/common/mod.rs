//! Shared harness: stub services, stub registry, and the gateway under test

#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fanout_api::{create_router, AppState, SERVICE_LIST_HEADER};
use fanout_client::testing::{closed_port_url, TestServer};
use fanout_client::{HttpServiceCaller, RegistryClient};
use fanout_gateway::Aggregator;
use parking_lot::Mutex;
use serde_json::{json, Value};

// =============================================================================
// Stub services
// =============================================================================

/// What a stub service does when called
#[derive(Debug, Clone)]
pub enum Behavior {
    /// 200 with `{"service": name}` after the delay
    Ok { delay_ms: u64 },
    /// Given status after the delay
    Status { code: u16, delay_ms: u64 },
    /// 200 with a body that is not JSON
    NotJson,
}

impl Behavior {
    pub fn ok() -> Self {
        Behavior::Ok { delay_ms: 0 }
    }

    pub fn slow(delay_ms: u64) -> Self {
        Behavior::Ok { delay_ms }
    }

    pub fn error(code: u16) -> Self {
        Behavior::Status { code, delay_ms: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    End,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub service: String,
    pub phase: Phase,
    pub at: Instant,
}

/// Start/end log shared by all stub services of one test
#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    fn push(&self, service: &str, phase: Phase) {
        self.0.lock().push(Event {
            service: service.to_string(),
            phase,
            at: Instant::now(),
        });
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().clone()
    }

    /// Events rendered as `start:a`, `end:a`, ...
    pub fn trace(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(|e| match e.phase {
                Phase::Start => format!("start:{}", e.service),
                Phase::End => format!("end:{}", e.service),
            })
            .collect()
    }

    pub fn started(&self, service: &str) -> bool {
        self.events()
            .iter()
            .any(|e| e.service == service && e.phase == Phase::Start)
    }
}

async fn respond(name: String, behavior: Behavior, recorder: Recorder) -> Response {
    recorder.push(&name, Phase::Start);
    let response = match behavior {
        Behavior::Ok { delay_ms } => {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            Json(json!({ "service": name })).into_response()
        }
        Behavior::Status { code, delay_ms } => {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, "stub failure").into_response()
        }
        Behavior::NotJson => "definitely { not json".into_response(),
    };
    recorder.push(&name, Phase::End);
    response
}

/// One server hosting every stub service at `/<name>`
pub async fn start_services(services: &[(&str, Behavior)], recorder: &Recorder) -> TestServer {
    let mut router = Router::new();
    for (name, behavior) in services {
        let name = name.to_string();
        let behavior = behavior.clone();
        let recorder = recorder.clone();
        router = router.route(
            &format!("/{}", name),
            get(move || respond(name.clone(), behavior.clone(), recorder.clone())),
        );
    }
    TestServer::start(router).await.expect("start stub services")
}

// =============================================================================
// Stub registry
// =============================================================================

/// Route object using an explicit url
pub fn url_route(services: &TestServer, name: &str) -> Value {
    json!({ "name": name, "url": services.url(&format!("/{}", name)) })
}

/// Route object that must be resolved from protocol/host/path
pub fn split_route(services: &TestServer, name: &str) -> Value {
    json!({
        "name": name,
        "url": null,
        "protocols": ["http", "https"],
        "hosts": [services.addr.to_string()],
        "path": format!("/{}", name),
    })
}

/// Registry serving `{"data": routes}` at `/routes`
pub async fn start_registry(routes: Vec<Value>) -> TestServer {
    let body = json!({ "data": routes, "next": null });
    let router = Router::new().route(
        "/routes",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    TestServer::start(router).await.expect("start stub registry")
}

/// Registry whose route list can be replaced while it is running
pub struct LiveRegistry {
    pub server: TestServer,
    routes: Arc<Mutex<Vec<Value>>>,
}

impl LiveRegistry {
    pub async fn start(routes: Vec<Value>) -> Self {
        let routes = Arc::new(Mutex::new(routes));
        let shared = routes.clone();
        let router = Router::new().route(
            "/routes",
            get(move || {
                let data = shared.lock().clone();
                async move { Json(json!({ "data": data })) }
            }),
        );
        let server = TestServer::start(router).await.expect("start live registry");
        Self { server, routes }
    }

    pub fn set(&self, routes: Vec<Value>) {
        *self.routes.lock() = routes;
    }
}

/// Registry answering with an arbitrary body
pub async fn start_raw_registry(body: &'static str) -> TestServer {
    let router = Router::new().route("/routes", get(move || async move { body }));
    TestServer::start(router).await.expect("start stub registry")
}

// =============================================================================
// Gateway under test
// =============================================================================

pub struct Gateway {
    pub server: TestServer,
    http: reqwest::Client,
}

#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
    pub elapsed: Duration,
}

impl Gateway {
    /// Gateway using the real registry client and caller
    pub async fn start(registry_url: &str) -> Self {
        let registry = RegistryClient::new(registry_url).expect("registry client");
        let caller = HttpServiceCaller::new().expect("caller");
        let aggregator = Aggregator::new(Arc::new(registry), Arc::new(caller));

        let server = TestServer::start(create_router(AppState::new(aggregator)))
            .await
            .expect("start gateway");

        Self {
            server,
            http: reqwest::Client::new(),
        }
    }

    /// Gateway pointed at a port nobody listens on
    pub async fn without_registry() -> Self {
        let url = closed_port_url().await.expect("closed port");
        Self::start(&url).await
    }

    pub async fn post(&self, path: &str, services: &str) -> Reply {
        let started = Instant::now();
        let response = self
            .http
            .post(self.server.url(path))
            .header(SERVICE_LIST_HEADER, services)
            .send()
            .await
            .expect("gateway request");
        let status = response.status().as_u16();
        let body = response.json().await.unwrap_or(Value::Null);

        Reply {
            status,
            body,
            elapsed: started.elapsed(),
        }
    }

    pub async fn sequence(&self, services: &str) -> Reply {
        self.post("/sequence", services).await
    }

    pub async fn parallel(&self, services: &str) -> Reply {
        self.post("/parallel", services).await
    }
}

/// Sorted top-level keys of a JSON object
pub fn keys(body: &Value) -> Vec<String> {
    let mut keys: Vec<String> = body
        .as_object()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}
