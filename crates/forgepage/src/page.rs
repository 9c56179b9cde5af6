use std::time::Duration;

use forgepage_fetch::{FragmentFetcher, HttpClient, ReqwestClient};
use forgepage_host::HostParts;
use forgepage_render::{PageContext, RenderError, Renderer};
use forgepage_server::{Handler, Request, Response};

use crate::config::Config;

/// Produces one project page per request: parse the host, best-effort
/// fetch the title fragment, render the template around it.
pub struct PageService<C: HttpClient> {
    fetcher: FragmentFetcher<C>,
    renderer: Renderer,
    config: Config,
}

impl PageService<ReqwestClient> {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let timeout = config.fetch_timeout_secs.map(Duration::from_secs);
        let client = ReqwestClient::new(timeout)?;
        Self::with_client(config, client).map_err(Into::into)
    }
}

impl<C: HttpClient> PageService<C> {
    pub fn with_client(config: Config, client: C) -> Result<Self, RenderError> {
        let renderer = match &config.template_dir {
            Some(dir) => Renderer::from_dir(dir)?,
            None => Renderer::embedded()?,
        };
        Ok(Self {
            fetcher: FragmentFetcher::new(client),
            renderer,
            config,
        })
    }

    /// Fetch the fragment and render the page for a request host.
    pub async fn page_for_host(&self, host: &str) -> Result<String, RenderError> {
        let parts = HostParts::parse(host);
        let fragment = self.fetcher.fetch_fragment(&parts).await;
        self.render(parts, fragment)
    }

    /// Render without fetching, fragment omitted.
    pub fn static_page_for_host(&self, host: &str) -> Result<String, RenderError> {
        self.render(HostParts::parse(host), None)
    }

    fn render(&self, parts: HostParts, fragment: Option<String>) -> Result<String, RenderError> {
        self.renderer.render_page(&PageContext {
            group_name: parts.group_name,
            domain: parts.domain,
            themeroot: self.config.themeroot.clone(),
            fragment,
            escape_fragment: self.config.escape_fragment,
        })
    }
}

impl<C: HttpClient + 'static> Handler for PageService<C> {
    type Error = RenderError;

    async fn handle(&self, request: &Request) -> Result<Response, Self::Error> {
        let host = request.host().unwrap_or(self.config.default_host.as_str());
        let html = self.page_for_host(host).await?;
        Ok(Response::html(html))
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use bytes::Bytes;
    use forgepage_fetch::BoxStream;
    use futures_util::stream;

    use super::*;

    #[derive(Debug)]
    struct TestError;

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "test error")
        }
    }

    impl std::error::Error for TestError {}

    struct FixedClient {
        body: Option<&'static str>,
    }

    impl HttpClient for FixedClient {
        type Error = TestError;

        fn get(
            &self,
            _url: &str,
        ) -> impl Future<
            Output = Result<BoxStream<'static, Result<Bytes, Self::Error>>, Self::Error>,
        > + Send {
            let body = self.body;
            async move {
                match body {
                    Some(body) => {
                        let s: BoxStream<'static, Result<Bytes, TestError>> =
                            Box::pin(stream::iter(vec![Ok(Bytes::from_static(body.as_bytes()))]));
                        Ok(s)
                    }
                    None => Err(TestError),
                }
            }
        }
    }

    fn service(body: Option<&'static str>) -> PageService<FixedClient> {
        PageService::with_client(Config::default(), FixedClient { body }).unwrap()
    }

    #[tokio::test]
    async fn successful_fetch_inlines_the_fragment_verbatim() {
        let svc = service(Some("<h1>The <em>geometry</em> package</h1>"));
        let req =
            Request::parse("GET / HTTP/1.1\r\nHost: geometry.r-forge.r-project.org").unwrap();

        let response = svc.handle(&req).await.unwrap();
        let html = String::from_utf8(response.body).unwrap();
        assert!(html.contains("<h1>The <em>geometry</em> package</h1>"));
        assert!(html.contains("<title>geometry</title>"));
    }

    #[tokio::test]
    async fn failed_fetch_still_renders_the_page() {
        let svc = service(None);
        let req =
            Request::parse("GET / HTTP/1.1\r\nHost: geometry.r-forge.r-project.org").unwrap();

        let response = svc.handle(&req).await.unwrap();
        assert_eq!(response.status, 200);
        let html = String::from_utf8(response.body).unwrap();
        assert!(html.contains("Qhull in R"));
        assert!(!html.contains("<h1>The"));
    }

    #[tokio::test]
    async fn missing_host_header_falls_back_to_the_configured_default() {
        let svc = service(None);
        let req = Request::parse("GET / HTTP/1.0").unwrap();

        let response = svc.handle(&req).await.unwrap();
        let html = String::from_utf8(response.body).unwrap();
        assert!(html.contains("<title>localhost</title>"));
    }
}
