//! curl command generation
//!
//! This module turns an [`OutboundRequest`](crate::http::OutboundRequest)
//! into a `curl` command line for diagnostic logging.
//!
//! # Architecture
//!
//! Generation runs in three stages that never share state across calls:
//!
//! - [`Http2Curl`] translates a request into a [`CurlCommand`], inferring
//!   the URL, method, body kind, cookies and basic authentication
//! - the optional callback from [`Options`] may edit the command, e.g. to
//!   redact headers
//! - the serializer renders the command, escaping every argument for the
//!   target [`Platform`]
//!
//! # Examples
//!
//! ```
//! use http2curl::curl::{Http2Curl, Options, TargetPlatform};
//! use http2curl::http::{HttpRequest, Method};
//!
//! let options = Options::builder()
//!     .target_platform(TargetPlatform::Posix)
//!     .use_short_form()
//!     .build()
//!     .unwrap();
//!
//! let request = HttpRequest::builder()
//!     .method(Method::Get)
//!     .uri("https://test.com:8080/items/query?x=y#z")
//!     .build();
//!
//! let curl = Http2Curl::new(options).generate_curl(&request).unwrap();
//! assert_eq!(curl, "curl 'https://test.com:8080/items/query?x=y#z' --compressed -k -v");
//! ```

pub mod command;
pub mod escape;
pub mod logger;
pub mod options;
pub mod serializer;
pub mod translator;

pub use command::{CurlCommand, FormPart, ServerAuthentication};
pub use escape::{escape, escape_posix, escape_windows, Platform};
pub use logger::{CurlLogger, CurlLoggerBuilder};
pub use options::{MultipleCookiePolicy, Options, OptionsBuilder, TargetPlatform};
pub use serializer::Serializer;
pub use translator::Http2Curl;

/// Result type for curl generation
pub type Result<T> = std::result::Result<T, Error>;

/// curl generation errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading the entity or a multipart part failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Relative request target with neither a Host header nor an original URL
    #[error("Cannot infer host: no Host header and no original request URL")]
    MissingHost,

    /// Multipart content type on an entity whose parts cannot be enumerated
    #[error("Multipart entity parts are not accessible: {0}")]
    OpaqueMultipart(String),

    /// Multipart part without a Content-Disposition header
    #[error("Multipart part is missing the Content-Disposition header")]
    MissingContentDisposition,

    /// Multipart part with a disposition other than form-data
    #[error("Unsupported multipart part disposition: {0}")]
    UnsupportedPart(String),

    /// More than one Cookie header under the reject policy
    #[error("More than one Cookie header in HTTP request not allowed: found {0}")]
    MultipleCookieHeaders(usize),

    /// Configuration value rejected while building options
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
