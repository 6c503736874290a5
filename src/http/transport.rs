// ABOUTME: Transport trait and its hyper implementation over Unix or TCP sockets.
// ABOUTME: Keeps one HTTP/1.1 connection alive and reconnects when the peer drops it.

use super::message::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::client::conn::http1::{self, SendRequest};
use hyper::header;
use hyper_util::rt::TokioIo;
use std::fmt;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, UnixStream};
use tokio::sync::Mutex;

/// Sends one request and returns the fully collected response.
///
/// Implementations must report connection-level failures as `TransportError`
/// and hand every HTTP status (including 4xx/5xx) back as a response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Errors below the HTTP status level: the peer never produced a response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP handshake with {endpoint} failed: {source}")]
    Handshake {
        endpoint: String,
        #[source]
        source: hyper::Error,
    },

    #[error("request failed: {0}")]
    Request(#[source] hyper::Error),

    #[error("failed to build request: {0}")]
    Build(#[from] hyper::http::Error),
}

/// Where a transport connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Local control socket, e.g. `/var/run/docker.sock`.
    Unix(PathBuf),
    /// `host:port` address.
    Tcp(String),
}

impl Endpoint {
    /// Value for the `Host` header.
    fn host(&self) -> &str {
        match self {
            Endpoint::Unix(_) => "localhost",
            Endpoint::Tcp(addr) => addr,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Unix(path) => write!(f, "unix://{}", path.display()),
            Endpoint::Tcp(addr) => write!(f, "http://{addr}"),
        }
    }
}

/// HTTP/1.1 client bound to a single endpoint.
///
/// The connection is opened on first use and reused for every following call.
/// Calls are sequential; the mutex only hands out exclusive use of the sender.
pub struct HttpTransport {
    endpoint: Endpoint,
    connection: Mutex<Option<SendRequest<Full<Bytes>>>>,
}

impl HttpTransport {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            connection: Mutex::new(None),
        }
    }

    pub fn unix(path: impl Into<PathBuf>) -> Self {
        Self::new(Endpoint::Unix(path.into()))
    }

    pub fn tcp(addr: impl Into<String>) -> Self {
        Self::new(Endpoint::Tcp(addr.into()))
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn connect(&self) -> Result<SendRequest<Full<Bytes>>, TransportError> {
        tracing::debug!(endpoint = %self.endpoint, "opening connection");

        let connect_error = |source| TransportError::Connect {
            endpoint: self.endpoint.to_string(),
            source,
        };

        match &self.endpoint {
            Endpoint::Unix(path) => {
                let stream = UnixStream::connect(path).await.map_err(connect_error)?;
                handshake(stream, &self.endpoint).await
            }
            Endpoint::Tcp(addr) => {
                let stream = TcpStream::connect(addr.as_str())
                    .await
                    .map_err(connect_error)?;
                handshake(stream, &self.endpoint).await
            }
        }
    }

    /// Reuse the cached sender when it is still usable, otherwise reconnect.
    async fn acquire(
        &self,
        cached: Option<SendRequest<Full<Bytes>>>,
    ) -> Result<SendRequest<Full<Bytes>>, TransportError> {
        match cached {
            Some(mut sender) if !sender.is_closed() => match sender.ready().await {
                Ok(()) => Ok(sender),
                Err(e) => {
                    tracing::debug!(endpoint = %self.endpoint, "dropping stale connection: {}", e);
                    self.connect().await
                }
            },
            _ => self.connect().await,
        }
    }
}

async fn handshake<S>(
    stream: S,
    endpoint: &Endpoint,
) -> Result<SendRequest<Full<Bytes>>, TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (sender, conn) = http1::handshake(TokioIo::new(stream))
        .await
        .map_err(|source| TransportError::Handshake {
            endpoint: endpoint.to_string(),
            source,
        })?;

    // Drive the connection in the background for as long as the sender lives
    let endpoint = endpoint.to_string();
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::warn!(%endpoint, "connection error: {}", e);
        }
    });

    Ok(sender)
}

impl HttpTransport {
    fn build(&self, request: &ApiRequest) -> Result<hyper::Request<Full<Bytes>>, TransportError> {
        Ok(hyper::Request::builder()
            .method(request.method.clone())
            .uri(request.path.as_str())
            .header(header::HOST, self.endpoint.host())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(request.body_bytes()))?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut slot = self.connection.lock().await;
        let reused = slot.is_some();
        let mut sender = self.acquire(slot.take()).await?;

        tracing::debug!(method = %request.method, path = %request.path, "sending request");

        let resp = match sender.send_request(self.build(&request)?).await {
            Ok(resp) => resp,
            // The peer closed an idle connection before the request went out
            Err(e) if reused && e.is_canceled() => {
                tracing::debug!(endpoint = %self.endpoint, "idle connection closed, reconnecting");
                sender = self.connect().await?;
                sender
                    .send_request(self.build(&request)?)
                    .await
                    .map_err(TransportError::Request)?
            }
            Err(e) => return Err(TransportError::Request(e)),
        };
        let status = resp.status().as_u16();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(TransportError::Request)?
            .to_bytes();

        tracing::debug!(status, path = %request.path, "received response");

        *slot = Some(sender);
        Ok(ApiResponse { status, body })
    }
}
