//! HTTP request types
//!
//! This module defines the request model the curl translator consumes and
//! the [`OutboundRequest`] capability trait it is written against.

use super::{Error, Headers, Result};
use bytes::Bytes;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

/// HTTP methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl Method {
    /// Convert method to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Method::Get),
            "HEAD" => Ok(Method::Head),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "CONNECT" => Ok(Method::Connect),
            "OPTIONS" => Ok(Method::Options),
            "TRACE" => Ok(Method::Trace),
            "PATCH" => Ok(Method::Patch),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload of an entity or a multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Content already buffered in memory
    Bytes(Bytes),
    /// Content to be read from a file when needed
    File(PathBuf),
}

impl Content {
    /// Read the whole content into memory
    pub fn read_all(&self) -> io::Result<Bytes> {
        match self {
            Content::Bytes(bytes) => Ok(bytes.clone()),
            Content::File(path) => fs::read(path).map(Bytes::from),
        }
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::Bytes(Bytes::from(bytes))
    }
}

impl From<&'static str> for Content {
    fn from(text: &'static str) -> Self {
        Content::Bytes(Bytes::from_static(text.as_bytes()))
    }
}

/// One part of a multipart entity
///
/// Each part carries its own headers, at least `Content-Disposition`, and
/// its own content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyPart {
    headers: Headers,
    content: Content,
}

impl BodyPart {
    /// Create a part from raw headers and content
    pub fn new(headers: Headers, content: Content) -> Self {
        BodyPart { headers, content }
    }

    /// Create an inline `form-data` field
    pub fn form_field(
        name: &str,
        value: impl Into<Content>,
        content_type: &str,
    ) -> Self {
        let mut headers = Headers::new();
        headers.insert("Content-Disposition", format!("form-data; name=\"{}\"", name));
        headers.insert("Content-Type", content_type);
        BodyPart::new(headers, value.into())
    }

    /// Create a `form-data` file upload backed by `filename` on disk
    pub fn file(name: &str, filename: &str, content_type: &str) -> Self {
        let mut headers = Headers::new();
        headers.insert(
            "Content-Disposition",
            format!("form-data; name=\"{}\"; filename=\"{}\"", name, filename),
        );
        headers.insert("Content-Type", content_type);
        BodyPart::new(headers, Content::File(PathBuf::from(filename)))
    }

    /// Get the part headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get the part content
    pub fn content(&self) -> &Content {
        &self.content
    }
}

/// Request entity (body)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// A single opaque payload
    Content(Content),
    /// A multipart payload whose parts are enumerable
    Multipart(Vec<BodyPart>),
}

/// Read-only view of an outbound HTTP request
///
/// This is the only thing the curl translator knows about a request.
/// Adapters for HTTP client libraries implement it at the boundary.
pub trait OutboundRequest {
    /// Request method as it appears on the request line
    fn method(&self) -> &str;

    /// Request target: an absolute URL, an origin-form path, or an
    /// authority for `CONNECT`
    fn target(&self) -> &str;

    /// All headers in wire order, duplicates included
    fn headers(&self) -> &Headers;

    /// Target of the original request when this request is a wrapped or
    /// redirected copy of it
    fn original_target(&self) -> Option<&str> {
        None
    }

    /// Request entity, if any
    fn entity(&self) -> Option<&Entity> {
        None
    }
}

/// HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    uri: String,
    headers: Headers,
    original_uri: Option<String>,
    entity: Option<Entity>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        HttpRequest {
            method,
            uri: uri.into(),
            headers: Headers::new(),
            original_uri: None,
            entity: None,
        }
    }

    /// Create a builder for constructing requests
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    /// Get the request method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Get the request URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Get the headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get the entity
    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    /// Mark this request as a wrapped copy of a request sent to `uri`
    pub fn set_original_uri(&mut self, uri: impl Into<String>) {
        self.original_uri = Some(uri.into());
    }
}

impl OutboundRequest for HttpRequest {
    fn method(&self) -> &str {
        self.method.as_str()
    }

    fn target(&self) -> &str {
        &self.uri
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn original_target(&self) -> Option<&str> {
        self.original_uri.as_deref()
    }

    fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }
}

/// Builder for HTTP requests
#[derive(Debug, Default)]
pub struct HttpRequestBuilder {
    method: Option<Method>,
    uri: Option<String>,
    headers: Headers,
    original_uri: Option<String>,
    entity: Option<Entity>,
}

impl HttpRequestBuilder {
    /// Set the HTTP method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the URI
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add a header given as a raw `Name: value` line
    pub fn header_line(mut self, line: &str) -> Result<Self> {
        let (name, value) = Headers::parse_header_line(line)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Record the URI of the request this one was derived from
    pub fn original_uri(mut self, uri: impl Into<String>) -> Self {
        self.original_uri = Some(uri.into());
        self
    }

    /// Set an in-memory body
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        let body: Vec<u8> = body.into();
        self.entity = Some(Entity::Content(Content::from(body)));
        self
    }

    /// Set the entity
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Build the request
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            method: self.method.unwrap_or(Method::Get),
            uri: self.uri.unwrap_or_else(|| "/".to_string()),
            headers: self.headers,
            original_uri: self.original_uri,
            entity: self.entity,
        }
    }
}
