//! Best-effort HTTP fetch of the remote project-title fragment.
//!
//! The fragment is decorative: a one-line HTML snippet served by the forge
//! at `http://{domain}/export/projtitl.php?group_name={group_name}`. The
//! fetch is single-shot with no retry; any failure yields `None` and the
//! page is rendered without the fragment.

mod error;
mod fragment;
mod http;

pub use error::FetchError;
pub use fragment::{FragmentFetcher, fragment_url};
pub use http::{BoxStream, HttpClient};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
