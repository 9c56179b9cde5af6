use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::{TcpListener, TcpStream};

use crate::error::ServerError;
use crate::request::Request;
use crate::response::Response;

/// Upper bound on the request head. Anything larger is rejected.
const MAX_HEAD_BYTES: usize = 8 * 1024;

/// Produces the page for one request.
///
/// Each request is handled in isolation: the handler borrows the request,
/// owns no per-request state across calls, and its failures are mapped to
/// a 500 without touching the accept loop.
pub trait Handler: Send + Sync + 'static {
    /// Error type surfaced when the page cannot be produced.
    type Error: std::error::Error + Send + 'static;

    fn handle(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;
}

/// Accept loop around a bound TCP listener.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    pub async fn bind(addr: &str) -> Result<Server, ServerError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Server { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve forever, one response per connection.
    pub async fn serve<H: Handler>(self, handler: Arc<H>) -> Result<(), ServerError> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, handler).await {
                    tracing::debug!(peer = %peer, error = %e, "connection error");
                }
            });
        }
    }
}

async fn handle_connection<H: Handler>(
    mut stream: TcpStream,
    handler: Arc<H>,
) -> Result<(), ServerError> {
    let response = match read_head(&mut stream).await.and_then(|h| Request::parse(&h)) {
        Ok(request) => match handler.handle(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(target = %request.target, error = %e, "page handler failed");
                Response::internal_error()
            }
        },
        Err(e) => {
            tracing::debug!(error = %e, "rejecting malformed request");
            Response::bad_request("malformed request")
        }
    };

    response.write_to(&mut stream).await?;
    Ok(())
}

/// Read until the head terminator. Body bytes may be consumed along the
/// way; they are never looked at.
async fn read_head<R: AsyncRead + Unpin>(stream: &mut R) -> Result<String, ServerError> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    let end = loop {
        if let Some(end) = head_end(&buf) {
            break end;
        }
        if buf.len() > MAX_HEAD_BYTES {
            return Err(ServerError::HeadTooLarge(MAX_HEAD_BYTES));
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(ServerError::TruncatedHead);
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    String::from_utf8(buf[..end].to_vec())
        .map_err(|_| ServerError::Malformed("request head is not UTF-8".into()))
}

fn head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
