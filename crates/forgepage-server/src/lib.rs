//! Minimal HTTP/1.1 wrapper for the project page.
//!
//! One request head in, one HTML document out, connection closed. The
//! service is request-scoped by construction: each connection is handled
//! by its own task with no shared mutable state.

mod error;
mod request;
mod response;
mod server;

pub use error::ServerError;
pub use request::Request;
pub use response::Response;
pub use server::{Handler, Server};
