//! Self-signed TLS mock of the media API.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use futures_util::{StreamExt, stream};
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::task::JoinHandle;

/// Canned reply for a request path.
#[derive(Debug, Clone)]
pub enum Route {
    /// `200 OK` with a JSON body.
    Document(Vec<u8>),
    /// Bare status with a custom reason phrase and an empty body.
    Status(u16, &'static str),
    /// Accept the request and never answer.
    Hang,
    /// `200 OK`, first half of the body, then the connection breaks.
    Truncated(Vec<u8>),
    /// `200 OK`, first half of the body, then nothing more.
    Stall(Vec<u8>),
}

#[derive(Clone)]
struct MockState {
    routes: Arc<HashMap<String, Route>>,
    requests: Arc<Mutex<Vec<String>>>,
}

pub struct MockMediaServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    handle: Handle<SocketAddr>,
    task: JoinHandle<()>,
}

impl MockMediaServer {
    /// Start serving `routes` keyed by request path. Unknown paths get `404`.
    pub async fn start(routes: HashMap<String, Route>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState { routes: Arc::new(routes), requests: Arc::clone(&requests) };

        let app = Router::new().fallback(serve_route).with_state(state);

        let tls = RustlsConfig::from_config(Arc::new(server_config()));
        let handle: Handle<SocketAddr> = Handle::new();
        let server = axum_server::bind_rustls(SocketAddr::from(([127, 0, 0, 1], 0)), tls).handle(handle.clone());

        let task = tokio::spawn(async move {
            let _ = server.serve(app.into_make_service()).await;
        });

        let addr = handle.listening().await.expect("mock server listening");

        Self { addr, requests, handle, task }
    }

    /// Host (with port) to configure the client with.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    /// HTTP client that trusts the mock server's self-signed certificate.
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(true)
            .no_proxy()
            .build()
            .expect("build mock client")
    }

    /// Request targets (path and query) seen so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockMediaServer {
    fn drop(&mut self) {
        self.handle.shutdown();
        self.task.abort();
    }
}

async fn serve_route(State(state): State<MockState>, uri: Uri) -> Response {
    let target = uri.path_and_query().map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    state.requests.lock().unwrap().push(target);

    let Some(route) = state.routes.get(uri.path()).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match route {
        Route::Document(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Route::Status(code, reason) => {
            let mut response = StatusCode::from_u16(code).expect("valid status").into_response();
            response
                .extensions_mut()
                .insert(hyper::ext::ReasonPhrase::from_static(reason.as_bytes()));
            response
        }
        Route::Hang => {
            tokio::time::sleep(Duration::from_secs(60)).await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
        Route::Truncated(body) => {
            let head = Bytes::from(body[..body.len() / 2].to_vec());
            let chunks = stream::iter(vec![Ok(head), Err(io::Error::other("connection reset"))]);
            json_stream(Body::from_stream(chunks))
        }
        Route::Stall(body) => {
            let head = Bytes::from(body[..body.len() / 2].to_vec());
            let chunks = stream::iter(vec![Ok::<_, io::Error>(head)]).chain(stream::pending());
            json_stream(Body::from_stream(chunks))
        }
    }
}

fn json_stream(body: Body) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn server_config() -> rustls::ServerConfig {
    let params = rcgen::CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])
        .expect("certificate params");
    let key_pair = rcgen::KeyPair::generate().expect("generate key pair");
    let cert = params.self_signed(&key_pair).expect("self-sign certificate");

    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));

    rustls::ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .expect("protocol versions")
        .with_no_client_auth()
        .with_single_cert(vec![cert.der().clone()], key)
        .expect("server TLS config")
}
