use super::response::MockResponse;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

type GenericError = Box<dyn std::error::Error + Send + Sync>;
type Result<T> = std::result::Result<T, GenericError>;

/// Path of the mock authorization endpoint
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";
/// Path of the mock token endpoint
pub const TOKEN_PATH: &str = "/oauth/token";

/// A local mock OAuth2 provider
pub struct MockProvider {
    addr: SocketAddr,
    state: Arc<Mutex<ProviderState>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

struct ProviderState {
    response: MockResponse,
    token_requests: Vec<TokenRequest>,
}

/// A request received by the token endpoint
#[derive(Debug, Clone)]
pub struct TokenRequest {
    pub method: Method,
    pub headers: http::HeaderMap,
    pub body: Bytes,
    pub form: HashMap<String, String>,
}

impl TokenRequest {
    /// Value of a decoded form field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }

    /// Value of a header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl MockProvider {
    /// Start a mock provider on a random port
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(Mutex::new(ProviderState {
            response: MockResponse::default(),
            token_requests: Vec::new(),
        }));

        let state_clone = state.clone();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut stop_future = shutdown_rx;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let state = state_clone.clone();

                                tokio::spawn(async move {
                                    if let Err(err) = hyper_util::server::conn::auto::Builder::new(hyper_util::rt::TokioExecutor::new())
                                        .serve_connection(io, service_fn(move |req| handle_request(req, state.clone())))
                                        .await
                                    {
                                        tracing::debug!(error = %err, "Mock provider connection closed with error");
                                    }
                                });
                            }
                            Err(e) => tracing::warn!(error = %e, "Mock provider accept error"),
                        }
                    }
                    _ = &mut stop_future => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Base URL of the provider
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Authorization endpoint URL
    pub fn auth_url(&self) -> String {
        format!("{}{}", self.base_url(), AUTHORIZE_PATH)
    }

    /// Token endpoint URL
    pub fn token_url(&self) -> String {
        format!("{}{}", self.base_url(), TOKEN_PATH)
    }

    /// Script the response of the token endpoint
    pub fn respond_with(&self, response: MockResponse) {
        self.state.lock().unwrap().response = response;
    }

    /// Requests received by the token endpoint so far
    pub fn token_requests(&self) -> Vec<TokenRequest> {
        self.state.lock().unwrap().token_requests.clone()
    }

    /// The most recent token request
    pub fn last_token_request(&self) -> Option<TokenRequest> {
        self.state.lock().unwrap().token_requests.last().cloned()
    }

    /// Assert the token endpoint was called exactly `n` times
    pub fn verify_calls(&self, n: usize) {
        let calls = self.state.lock().unwrap().token_requests.len();
        assert_eq!(
            calls, n,
            "Token endpoint expected {} calls, got {}",
            n, calls
        );
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<Mutex<ProviderState>>,
) -> Result<Response<Full<Bytes>>> {
    let (parts, body) = req.into_parts();
    let body_bytes = body.collect().await?.to_bytes();

    match (&parts.method, parts.uri.path()) {
        (&Method::POST, TOKEN_PATH) => {
            // Release the lock before any scripted delay.
            let scripted = {
                let mut state_guard = state.lock().unwrap();
                state_guard.token_requests.push(TokenRequest {
                    method: parts.method.clone(),
                    headers: parts.headers.clone(),
                    form: parse_form(&body_bytes),
                    body: body_bytes,
                });
                state_guard.response.clone()
            };

            if let Some(delay) = scripted.delay {
                tokio::time::sleep(delay).await;
            }

            let mut response = Response::builder().status(scripted.status);
            if let Some(content_type) = scripted.content_type {
                response = response.header(http::header::CONTENT_TYPE, content_type);
            }
            Ok(response.body(Full::new(scripted.body))?)
        }
        (&Method::GET, AUTHORIZE_PATH) => Ok(Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from("Mock authorization page")))?),
        _ => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::from("Unknown mock provider endpoint")))?),
    }
}

fn parse_form(body: &[u8]) -> HashMap<String, String> {
    serde_urlencoded::from_bytes(body).unwrap_or_default()
}
