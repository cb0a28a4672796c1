//! Request to curl command translation
//!
//! [`Http2Curl`] rebuilds everything curl needs from an
//! [`OutboundRequest`]: an absolute URL, the body and how curl should send
//! it, whether the method must be spelled out, and which headers map to
//! dedicated curl options (`--cookie`, `--user`) instead of `--header`.

use super::{CurlCommand, Error, MultipleCookiePolicy, Options, Result};
use crate::http::{BodyPart, Entity, Headers, OutboundRequest};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Content types sent with `--data`; every other body uses `--data-binary`
const NON_BINARY_CONTENT_TYPES: [&str; 2] = ["application/x-www-form-urlencoded", "application/json"];

/// Generates curl commands for HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Http2Curl {
    options: Options,
}

impl Http2Curl {
    /// Create a generator using `options`
    pub fn new(options: Options) -> Self {
        Http2Curl { options }
    }

    /// Get the options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Generate a curl command for `request`
    ///
    /// The configured command updater runs on the translated command
    /// before it is rendered.
    pub fn generate_curl<R>(&self, request: &R) -> Result<String>
    where
        R: OutboundRequest + ?Sized,
    {
        let mut curl = self.translate(request)?;
        self.options.update_command(&mut curl);
        Ok(curl.to_curl(&self.options))
    }

    /// Translate `request` into an unrendered curl command
    ///
    /// Fails when the request body or a multipart part cannot be read or
    /// described, and when the host cannot be inferred. A partially
    /// translated command is never returned.
    pub fn translate<R>(&self, request: &R) -> Result<CurlCommand>
    where
        R: OutboundRequest + ?Sized,
    {
        let mut curl = CurlCommand::new();
        let mut headers = request.headers().clone();
        let mut ignored_headers: Vec<&'static str> = Vec::new();

        curl.set_url(infer_url(request)?);

        let mut has_body = false;
        if let Some(entity) = request.entity() {
            let content_type = headers.get("Content-Type").map(str::to_string);
            match entity {
                Entity::Multipart(parts) => {
                    if content_type.as_deref().is_some_and(is_multipart_mixed) {
                        headers.remove("Content-Type");
                        headers.insert("Content-Type", "multipart/mixed");
                    } else {
                        // curl writes its own boundary
                        ignored_headers.push("Content-Type");
                    }
                    ignored_headers.push("Content-Length");

                    for part in parts {
                        add_form_part(part, &mut curl)?;
                    }
                }
                Entity::Content(content) => {
                    if let Some(content_type) = &content_type {
                        if starts_with_ignore_case(content_type, "multipart/") {
                            return Err(Error::OpaqueMultipart(content_type.clone()));
                        }
                    }

                    let body = decode_text(&content.read_all()?);
                    if content_type.as_deref().is_some_and(is_non_binary) {
                        curl.add_data(body);
                    } else {
                        curl.add_data_binary(body);
                    }
                    ignored_headers.push("Content-Length");
                }
            }
            has_body = true;
        }

        let inferred_method = if has_body { "POST" } else { "GET" };
        if request.method() != inferred_method {
            curl.set_method(request.method());
        }

        extract_basic_authentication(&mut headers, &mut curl);
        self.extract_cookie(&mut headers, &mut curl)?;

        for (name, value) in headers.iter() {
            if !ignored_headers.iter().any(|ignored| ignored.eq_ignore_ascii_case(name)) {
                curl.add_header(name, value);
            }
        }

        curl.set_compressed(true).set_insecure(true).set_verbose(true);
        Ok(curl)
    }

    /// Move a single `Cookie` header into `--cookie`
    fn extract_cookie(&self, headers: &mut Headers, curl: &mut CurlCommand) -> Result<()> {
        match headers.count("Cookie") {
            0 => Ok(()),
            1 => {
                if let Some(cookie) = headers.get("Cookie") {
                    curl.set_cookie_header(cookie);
                }
                headers.remove("Cookie");
                Ok(())
            }
            // RFC 6265: a user agent MUST NOT attach more than one Cookie
            // header field
            count => match self.options.multiple_cookie_policy {
                MultipleCookiePolicy::Warn => {
                    log::warn!(
                        "Request has {} Cookie headers; printing them as plain headers",
                        count
                    );
                    Ok(())
                }
                MultipleCookiePolicy::Reject => Err(Error::MultipleCookieHeaders(count)),
            },
        }
    }
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn is_multipart_mixed(content_type: &str) -> bool {
    starts_with_ignore_case(content_type, "multipart/mixed")
}

fn is_non_binary(content_type: &str) -> bool {
    NON_BINARY_CONTENT_TYPES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(content_type.trim()))
}

/// Decode a body as UTF-8, falling back to one char per byte
///
/// The fallback keeps every byte below 256 so POSIX `\xHH` escaping
/// reproduces the original payload.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Check for a `scheme://` prefix
fn is_absolute_url(target: &str) -> bool {
    match target.find("://") {
        Some(end) => {
            let scheme = &target[..end];
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Host and port of an absolute URL, without user info
fn authority(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Collapse repeated slashes in the path of an absolute URL
fn collapse_slashes(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let path_end = rest.find(['?', '#']).unwrap_or(rest.len());
    let (path, suffix) = rest.split_at(path_end);

    let mut out = String::with_capacity(url.len());
    out.push_str(scheme);
    out.push_str("://");
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        out.push(c);
    }
    out.push_str(suffix);
    out
}

fn infer_url<R>(request: &R) -> Result<String>
where
    R: OutboundRequest + ?Sized,
{
    let target = request.target();
    if is_absolute_url(target) {
        return Ok(target.to_string());
    }

    let is_connect = request.method() == "CONNECT";
    let host = request
        .headers()
        .get("Host")
        .or_else(|| request.original_target().and_then(authority))
        .or_else(|| is_connect.then_some(target).filter(|t| !t.is_empty()))
        .ok_or(Error::MissingHost)?;

    // Only the original URL is known, so a redirect from https to http
    // is still printed as https
    let scheme = if host.ends_with(":443")
        || request
            .original_target()
            .is_some_and(|original| starts_with_ignore_case(original, "https"))
    {
        "https"
    } else {
        "http"
    };

    if is_connect {
        Ok(format!("{}://{}", scheme, host))
    } else {
        Ok(collapse_slashes(&format!("{}://{}/{}", scheme, host, target)))
    }
}

/// Split a header value on `;` outside quoted strings
fn split_parameters(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                parts.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());
    parts
}

/// Unwrap a parameter value, resolving quoted-pair escapes
fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn add_form_part(part: &BodyPart, curl: &mut CurlCommand) -> Result<()> {
    let disposition = part
        .headers()
        .get("Content-Disposition")
        .ok_or(Error::MissingContentDisposition)?;

    let mut elements = split_parameters(disposition).into_iter();
    let disposition_type = elements.next().unwrap_or_default();
    if !disposition_type.eq_ignore_ascii_case("form-data") {
        return Err(Error::UnsupportedPart(disposition.to_string()));
    }

    let mut name = String::new();
    let mut filename = None;
    for element in elements {
        let (key, value) = element.split_once('=').unwrap_or((element, ""));
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => name = unquote(value.trim()),
            "filename" => filename = Some(unquote(value.trim())),
            _ => {}
        }
    }

    let mut content = match filename {
        Some(filename) => format!("@{}", filename),
        None => decode_text(&part.content().read_all()?),
    };
    if let Some(content_type) = part.headers().get("Content-Type") {
        content.push_str(";type=");
        content.push_str(content_type);
    }

    curl.add_form_part(name, content);
    Ok(())
}

fn basic_token(value: &str) -> Option<&str> {
    if starts_with_ignore_case(value, "Basic ") {
        Some(value["Basic ".len()..].trim())
    } else {
        None
    }
}

fn decode_credentials(token: &str) -> std::result::Result<(String, String), String> {
    let decoded = STANDARD.decode(token).map_err(|e| e.to_string())?;
    let decoded = String::from_utf8(decoded).map_err(|e| e.to_string())?;
    let (user, password) = decoded
        .split_once(':')
        .ok_or_else(|| "no ':' between user and password".to_string())?;
    Ok((user.to_string(), password.to_string()))
}

/// Move the first decodable `Authorization: Basic` header into `--user`
fn extract_basic_authentication(headers: &mut Headers, curl: &mut CurlCommand) {
    let mut found = None;
    for (index, (name, value)) in headers.iter().enumerate() {
        if !name.eq_ignore_ascii_case("Authorization") {
            continue;
        }
        let Some(token) = basic_token(value) else {
            continue;
        };
        match decode_credentials(token) {
            Ok(credentials) => {
                found = Some((index, credentials));
                break;
            }
            Err(reason) => {
                log::warn!("Leaving malformed Basic authorization header as is: {}", reason);
            }
        }
    }

    if let Some((index, (user, password))) = found {
        headers.remove_at(index);
        curl.set_server_authentication(user, password);
    }
}
