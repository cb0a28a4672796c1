//! HTTP request model for curl generation
//!
//! This module describes an outbound HTTP request as plain data: the
//! request line, an ordered header list and an optional entity. The curl
//! translator only ever sees requests through the [`OutboundRequest`]
//! trait, so adapters for other HTTP client libraries can be written at
//! the boundary without touching the translator.
//!
//! # Examples
//!
//! ```
//! use http2curl::http::{BodyPart, Entity, HttpRequest, Method};
//!
//! let request = HttpRequest::builder()
//!     .method(Method::Post)
//!     .uri("/upload")
//!     .header("Host", "localhost")
//!     .header("Content-Type", "multipart/form-data; boundary=xyz")
//!     .entity(Entity::Multipart(vec![
//!         BodyPart::file("file", "README.md", "application/octet-stream"),
//!     ]))
//!     .build();
//!
//! assert_eq!(request.uri(), "/upload");
//! ```

pub mod headers;
pub mod message;

pub use headers::Headers;
pub use message::{BodyPart, Content, Entity, HttpRequest, HttpRequestBuilder, Method, OutboundRequest};

/// Result type for HTTP model operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP model errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Invalid header line: {0}")]
    InvalidHeader(String),
}
