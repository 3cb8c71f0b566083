#![allow(dead_code)]

use async_trait::async_trait;
use campus_client::{AppContext, ClientConfig, RecordingNotifier};
use campus_common::MemoryStorage;
use campus_http::{ApiError, ApiNetwork, ApiRequest, ApiResponse};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

struct Scripted {
    outcome: Result<ApiResponse, ApiError>,
    delay: Option<Duration>,
}

impl Clone for Scripted {
    fn clone(&self) -> Self {
        Self {
            outcome: self.outcome.clone(),
            delay: self.delay,
        }
    }
}

/// Network double answering from a per-route script.
///
/// Each route keeps a queue; the last entry is repeated once the others are
/// used up. Unscripted routes answer 404.
#[derive(Default)]
pub struct MockNetwork {
    routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

fn route_key(method: &str, path: &str) -> String {
    format!("{} {}", method.to_uppercase(), path)
}

impl MockNetwork {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, method: &str, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .entry(route_key(method, path))
            .or_default()
            .push_back(scripted);
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.push(
            method,
            path,
            Scripted {
                outcome: Ok(ApiResponse::json(status, &body)),
                delay: None,
            },
        );
    }

    pub fn respond_raw(&self, method: &str, path: &str, response: ApiResponse) {
        self.push(
            method,
            path,
            Scripted {
                outcome: Ok(response),
                delay: None,
            },
        );
    }

    pub fn respond_after(&self, delay: Duration, method: &str, path: &str, status: u16, body: Value) {
        self.push(
            method,
            path,
            Scripted {
                outcome: Ok(ApiResponse::json(status, &body)),
                delay: Some(delay),
            },
        );
    }

    pub fn fail(&self, method: &str, path: &str, error: ApiError) {
        self.push(
            method,
            path,
            Scripted {
                outcome: Err(error),
                delay: None,
            },
        );
    }

    pub fn fail_after(&self, delay: Duration, method: &str, path: &str, error: ApiError) {
        self.push(
            method,
            path,
            Scripted {
                outcome: Err(error),
                delay: Some(delay),
            },
        );
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }

    fn next(&self, method: &str, path: &str) -> Option<Scripted> {
        let mut routes = self.routes.lock();
        let queue = routes.get_mut(&route_key(method, path))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl ApiNetwork for MockNetwork {
    async fn send(&self, request: ApiRequest) -> campus_http::Result<ApiResponse> {
        self.requests.lock().push(request.clone());
        let Some(scripted) = self.next(&request.method, &request.path) else {
            return Ok(ApiResponse::json(
                404,
                &serde_json::json!({ "msg": format!("no route for {}", request.path) }),
            ));
        };
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.outcome
    }
}

pub struct Harness {
    pub ctx: AppContext,
    pub network: Arc<MockNetwork>,
    pub storage: Arc<MemoryStorage>,
    pub notices: Arc<RecordingNotifier>,
}

pub fn harness() -> Harness {
    harness_with_storage(Arc::new(MemoryStorage::new()))
}

pub fn harness_with_storage(storage: Arc<MemoryStorage>) -> Harness {
    let network = MockNetwork::new();
    let notices = Arc::new(RecordingNotifier::new());
    let config = ClientConfig {
        enable_logging: false,
        ..ClientConfig::default()
    };
    let ctx = AppContext::with_network(config, storage.clone(), network.clone(), notices.clone());
    Harness {
        ctx,
        network,
        storage,
        notices,
    }
}

pub fn login_ok(network: &MockNetwork, user_id: i64, identity: i64, token: &str) {
    network.respond(
        "POST",
        "/auth/login",
        200,
        serde_json::json!({
            "user_id": user_id,
            "identity": identity,
            "name": "Test User",
            "token": token
        }),
    );
}
