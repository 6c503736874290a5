// ABOUTME: Fake HTTP/1.1 server (hyper) over Unix or TCP sockets for transport-level tests.
// ABOUTME: Records every request and answers with a canned status and JSON body.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, header};
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, UnixListener};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Maps a request (and its index across the server's lifetime) to a status and body.
pub type Handler = Arc<dyn Fn(usize, &RecordedRequest) -> (u16, String) + Send + Sync>;

#[derive(Clone)]
pub struct FakeServer {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    connections: Arc<AtomicUsize>,
}

impl FakeServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

/// Whether the server closes each connection after one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepAlive {
    Yes,
    No,
}

pub fn serve_unix(listener: UnixListener, keep_alive: KeepAlive, handler: Handler) -> FakeServer {
    let server = FakeServer {
        requests: Arc::default(),
        connections: Arc::default(),
    };
    let state = server.clone();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            state.connections.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(handle(stream, keep_alive, handler.clone(), state.clone()));
        }
    });
    server
}

pub fn serve_tcp(listener: TcpListener, keep_alive: KeepAlive, handler: Handler) -> FakeServer {
    let server = FakeServer {
        requests: Arc::default(),
        connections: Arc::default(),
    };
    let state = server.clone();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            state.connections.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(handle(stream, keep_alive, handler.clone(), state.clone()));
        }
    });
    server
}

async fn handle<S>(stream: S, keep_alive: KeepAlive, handler: Handler, state: FakeServer)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let service = service_fn(move |req: Request<Incoming>| {
        let handler = handler.clone();
        let state = state.clone();
        async move {
            let (parts, body) = req.into_parts();
            let body = body.collect().await?.to_bytes();

            let request = RecordedRequest {
                method: parts.method.to_string(),
                path: parts
                    .uri
                    .path_and_query()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default(),
                headers: parts
                    .headers
                    .iter()
                    .map(|(name, value)| {
                        (
                            name.to_string(),
                            value.to_str().unwrap_or_default().to_string(),
                        )
                    })
                    .collect(),
                body: String::from_utf8_lossy(&body).into_owned(),
            };

            let index = {
                let mut requests = state.requests.lock();
                requests.push(request.clone());
                requests.len() - 1
            };
            let (status, body) = handler(index, &request);

            let response = Response::builder()
                .status(status)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Full::new(Bytes::from(body)))
                .expect("valid canned response");
            Ok::<_, hyper::Error>(response)
        }
    });

    let _ = http1::Builder::new()
        .keep_alive(keep_alive == KeepAlive::Yes)
        .serve_connection(TokioIo::new(stream), service)
        .await;
}

/// Box a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(usize, &RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    Arc::new(f)
}
