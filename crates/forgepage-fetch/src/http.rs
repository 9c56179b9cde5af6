use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

/// A boxed stream type for HTTP response bodies.
///
/// The stream yields `Result<Bytes, E>` where E is the error type from the
/// HTTP client.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Asynchronous HTTP client abstraction.
///
/// The minimal interface the fragment fetch needs: open a GET and stream
/// the body. Implementations handle their own redirect following, timeout
/// configuration, and status mapping.
///
/// # Implementations
///
/// - [`ReqwestClient`]: production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for HTTP operations.
    type Error: std::error::Error + Send + 'static;

    /// Open a streaming GET and return the response body as a stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (DNS failure, connection
    /// error, HTTP error status, etc.). Implementations should map
    /// non-success statuses to an error rather than streaming the body.
    fn get(
        &self,
        url: &str,
    ) -> impl Future<
        Output = std::result::Result<
            BoxStream<'static, std::result::Result<Bytes, Self::Error>>,
            Self::Error,
        >,
    > + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use futures_util::StreamExt;

    use super::*;
    use crate::error::FetchError;

    /// Production HTTP client implementation using reqwest.
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a client with an optional request timeout.
        ///
        /// `None` leaves the request unbounded.
        pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| FetchError::Client(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &str,
        ) -> std::result::Result<
            BoxStream<'static, std::result::Result<Bytes, Self::Error>>,
            Self::Error,
        > {
            let response = self.client.get(url).send().await?.error_for_status()?;
            let stream = response.bytes_stream().map(|result| result.map(Bytes::from));

            Ok(Box::pin(stream))
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
