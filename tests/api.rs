//! Black-box tests against a running server.
//!
//! Each test binds its own listener on an ephemeral port and shuts it down on exit.

use std::net::SocketAddr;

use futures::future::join_all;
use microservice::api::handlers::{GreetingResponse, HealthResponse};
use microservice::api::AppState;
use microservice::server::serve_with_shutdown;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Running server bound to an ephemeral port.
struct TestApp {
    addr: SocketAddr,
    client: reqwest::Client,
    _shutdown: oneshot::Sender<()>,
}

impl TestApp {
    async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            serve_with_shutdown(listener, AppState::new(), async {
                rx.await.ok();
            })
            .await
            .unwrap();
        });

        Self {
            addr,
            client: reqwest::Client::new(),
            _shutdown: tx,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }
}

#[tokio::test]
async fn hello_returns_constant_greeting() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/hello").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let body: GreetingResponse = response.json().await.unwrap();
    assert_eq!(
        body,
        GreetingResponse::success("Hello from Spring Boot Microservice!")
    );
}

#[tokio::test]
async fn hello_body_is_byte_identical_across_calls() {
    let app = TestApp::spawn().await;

    let first = app.get("/api/hello").await.bytes().await.unwrap();
    for _ in 0..10 {
        let again = app.get("/api/hello").await.bytes().await.unwrap();
        assert_eq!(again, first);
    }
}

#[tokio::test]
async fn hello_name_greets_arbitrary_names() {
    let app = TestApp::spawn().await;

    for name in ["World", "Jürgen", "O\"Brien", "two words", "日本語"] {
        let response = app
            .client
            .get(app.url(&format!("/api/hello/{}", name)))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{name}");

        let body: GreetingResponse = response.json().await.unwrap();
        assert_eq!(body.message, format!("Hello, {}!", name));
        assert_eq!(body.status, "success");
    }
}

#[tokio::test]
async fn health_reports_up() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: HealthResponse = response.json().await.unwrap();
    assert_eq!(body, HealthResponse::up());
    assert_eq!(body.service, "microservice");
}

#[tokio::test]
async fn unmatched_paths_return_404() {
    let app = TestApp::spawn().await;

    for path in ["/api/nonexistent", "/api/hello/", "/api/hello/a/b", "/hello"] {
        assert_eq!(
            app.get(path).await.status(),
            StatusCode::NOT_FOUND,
            "{path}"
        );
    }
}

#[tokio::test]
async fn wrong_method_returns_405() {
    let app = TestApp::spawn().await;

    let response = app.client.post(app.url("/api/hello")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn concurrent_requests_match_sequential_responses() {
    let app = TestApp::spawn().await;
    let paths = [
        "/api/hello",
        "/api/hello/Alice",
        "/api/health",
        "/api/hello/Bob",
    ];

    let mut sequential = Vec::new();
    for path in paths {
        sequential.push(app.get(path).await.text().await.unwrap());
    }

    let requests = (0..25).flat_map(|_| paths).map(|path| {
        let client = app.client.clone();
        let url = app.url(path);
        async move { client.get(url).send().await.unwrap().text().await.unwrap() }
    });
    let concurrent = join_all(requests).await;

    for (i, body) in concurrent.iter().enumerate() {
        assert_eq!(body, &sequential[i % paths.len()]);
    }
}
