use tokio::io::{AsyncWrite, AsyncWriteExt};

/// One HTTP/1.1 response, written whole and followed by a close.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    pub fn html(body: String) -> Response {
        Response {
            status: 200,
            reason: "OK",
            content_type: "text/html; charset=UTF-8",
            body: body.into_bytes(),
        }
    }

    pub fn bad_request(message: &str) -> Response {
        Response {
            status: 400,
            reason: "Bad Request",
            content_type: "text/plain; charset=UTF-8",
            body: format!("{message}\n").into_bytes(),
        }
    }

    pub fn internal_error() -> Response {
        Response {
            status: 500,
            reason: "Internal Server Error",
            content_type: "text/plain; charset=UTF-8",
            body: b"internal error\n".to_vec(),
        }
    }

    pub async fn write_to<W: AsyncWrite + Unpin>(&self, stream: &mut W) -> std::io::Result<()> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.reason,
            self.content_type,
            self.body.len(),
        );
        stream.write_all(head.as_bytes()).await?;
        stream.write_all(&self.body).await?;
        stream.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_status_line_headers_and_body() {
        let mut out = Vec::new();
        Response::html("<html></html>".into())
            .write_to(&mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/html; charset=UTF-8\r\n"));
        assert!(text.contains("Content-Length: 13\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\n<html></html>"));
    }
}
