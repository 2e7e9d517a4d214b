#![allow(dead_code)]

use axum::{Router, extract::ConnectInfo};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_url::domain::repositories::{ClickRepository, LinkRepository};
use tiny_url::infrastructure::persistence::MemoryStore;
use tiny_url::routes::router;
use tiny_url::state::AppState;
use tiny_url::utils::code_generator::RandomCodeGenerator;
use tower::Layer;

pub const BASE_URL: &str = "https://s.example.com";
pub const PEER_ADDR: &str = "127.0.0.1:12345";

pub fn create_test_state(behind_proxy: bool) -> AppState {
    let store = Arc::new(MemoryStore::new());
    create_test_state_with(store.clone(), store, behind_proxy)
}

pub fn create_test_state_with(
    link_repo: Arc<dyn LinkRepository>,
    click_repo: Arc<dyn ClickRepository>,
    behind_proxy: bool,
) -> AppState {
    AppState::new(
        link_repo,
        click_repo,
        Arc::new(RandomCodeGenerator),
        BASE_URL,
        behind_proxy,
    )
}

/// Full application router over a fresh in-memory store.
pub fn create_test_router() -> Router {
    router(create_test_state(false))
}

pub fn create_test_server() -> TestServer {
    TestServer::new(create_test_router()).unwrap()
}

/// Like [`create_test_server`], but every request carries [`PEER_ADDR`] as
/// its connection address.
pub fn create_test_server_with_peer(behind_proxy: bool) -> TestServer {
    let app = router(create_test_state(behind_proxy)).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

pub async fn create_link(server: &TestServer, url: &str, custom_code: Option<&str>) -> Value {
    let body = match custom_code {
        Some(code) => json!({ "url": url, "customCode": code }),
        None => json!({ "url": url }),
    };

    let response = server.post("/api/links").json(&body).await;
    response.assert_status_ok();
    response.json::<Value>()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
