use forgepage_host::HostParts;
use futures_util::StreamExt;

use crate::error::FetchError;
use crate::http::HttpClient;

/// Build the project-title endpoint URL for a parsed host.
pub fn fragment_url(parts: &HostParts) -> String {
    format!(
        "http://{}/export/projtitl.php?group_name={}",
        parts.domain, parts.group_name
    )
}

/// Fetches the project-title fragment from the forge.
pub struct FragmentFetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> FragmentFetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetch the fragment for a parsed host, best-effort.
    ///
    /// A single GET, read to exhaustion into a string buffer. Any failure
    /// (connect, status, mid-stream) returns `None`; the caller omits the
    /// fragment and renders the rest of the page. Failures are logged at
    /// debug level and never surfaced to the viewer.
    pub async fn fetch_fragment(&self, parts: &HostParts) -> Option<String> {
        let url = fragment_url(parts);
        match self.read_to_string(&url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "fragment fetch failed, omitting fragment");
                None
            }
        }
    }

    async fn read_to_string(&self, url: &str) -> Result<String, FetchError> {
        let mut stream = self
            .client
            .get(url)
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let mut buf = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetchError::Network(e.to_string()))?;
            buf.extend_from_slice(&chunk);
        }

        // The endpoint serves HTML text; non-UTF8 bytes are decoded lossily
        // so rendering stays total.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
