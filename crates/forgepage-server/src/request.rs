use crate::error::ServerError;

/// One parsed HTTP/1.1 request head. The body, if any, is ignored: the
/// service answers a single page request per connection and closes.
#[derive(Clone, Debug)]
pub struct Request {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
}

impl Request {
    /// Parse a request head (everything before the blank line).
    pub fn parse(head: &str) -> Result<Request, ServerError> {
        let mut lines = head.split("\r\n");
        let request_line = lines
            .next()
            .ok_or_else(|| ServerError::Malformed("empty request head".into()))?;

        let mut parts = request_line.split(' ');
        let method = parts
            .next()
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ServerError::Malformed("missing method".into()))?;
        let target = parts
            .next()
            .ok_or_else(|| ServerError::Malformed("missing request target".into()))?;
        let version = parts
            .next()
            .ok_or_else(|| ServerError::Malformed("missing HTTP version".into()))?;
        if !version.starts_with("HTTP/") {
            return Err(ServerError::Malformed(format!(
                "bad HTTP version: {version}"
            )));
        }

        let mut headers = Vec::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| ServerError::Malformed(format!("bad header line: {line}")))?;
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }

        Ok(Request {
            method: method.to_string(),
            target: target.to_string(),
            headers,
        })
    }

    /// First header with the given name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn host(&self) -> Option<&str> {
        self.header("Host")
    }
}
