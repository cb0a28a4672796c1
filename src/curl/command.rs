//! curl command model
//!
//! [`CurlCommand`] holds the logical pieces of a command in the order they
//! were added. It knows nothing about shells; rendering is done by the
//! [`Serializer`](super::Serializer).

use super::{Options, Serializer};
use crate::http::Headers;

/// A named `--form` part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    name: String,
    content: String,
}

impl FormPart {
    /// Create a form part
    ///
    /// `content` is either `@<filename>;type=<mime>` or
    /// `<text>;type=<mime>`.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        FormPart {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the part name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the part content
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Credentials passed with `--user`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAuthentication {
    user: String,
    password: String,
}

impl ServerAuthentication {
    /// Create credentials
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        ServerAuthentication {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Get the user name
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Get the password, possibly empty
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// A curl command before rendering
///
/// Single-valued fields (url, method, cookie, credentials) keep the last
/// value set. Everything else is appended and rendered in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurlCommand {
    url: String,
    method: Option<String>,
    cookie_header: Option<String>,
    headers: Headers,
    form_parts: Vec<FormPart>,
    data: Vec<String>,
    data_binary: Vec<String>,
    server_authentication: Option<ServerAuthentication>,
    compressed: bool,
    insecure: bool,
    verbose: bool,
}

impl CurlCommand {
    /// Create an empty command
    pub fn new() -> Self {
        CurlCommand::default()
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = url.into();
        self
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name, value);
        self
    }

    /// Remove every header called `name` (case-insensitive)
    pub fn remove_header(&mut self, name: &str) -> &mut Self {
        self.headers.remove(name);
        self
    }

    pub fn add_form_part(&mut self, name: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.form_parts.push(FormPart::new(name, content));
        self
    }

    pub fn add_data(&mut self, data: impl Into<String>) -> &mut Self {
        self.data.push(data.into());
        self
    }

    pub fn add_data_binary(&mut self, data: impl Into<String>) -> &mut Self {
        self.data_binary.push(data.into());
        self
    }

    pub fn set_cookie_header(&mut self, cookie_header: impl Into<String>) -> &mut Self {
        self.cookie_header = Some(cookie_header.into());
        self
    }

    pub fn set_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.method = Some(method.into());
        self
    }

    pub fn set_server_authentication(
        &mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> &mut Self {
        self.server_authentication = Some(ServerAuthentication::new(user, password));
        self
    }

    pub fn set_compressed(&mut self, compressed: bool) -> &mut Self {
        self.compressed = compressed;
        self
    }

    pub fn set_insecure(&mut self, insecure: bool) -> &mut Self {
        self.insecure = insecure;
        self
    }

    pub fn set_verbose(&mut self, verbose: bool) -> &mut Self {
        self.verbose = verbose;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn cookie_header(&self) -> Option<&str> {
        self.cookie_header.as_deref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn form_parts(&self) -> &[FormPart] {
        &self.form_parts
    }

    pub fn data(&self) -> &[String] {
        &self.data
    }

    pub fn data_binary(&self) -> &[String] {
        &self.data_binary
    }

    pub fn server_authentication(&self) -> Option<&ServerAuthentication> {
        self.server_authentication.as_ref()
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn is_insecure(&self) -> bool {
        self.insecure
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Render the command with the layout and platform from `options`
    pub fn to_curl(&self, options: &Options) -> String {
        Serializer::new(options).serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curl::TargetPlatform;

    fn posix_short() -> Options {
        Options::builder()
            .target_platform(TargetPlatform::Posix)
            .use_short_form()
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_command_is_empty() {
        let curl = CurlCommand::new();
        assert_eq!(curl.url(), "");
        assert!(curl.method().is_none());
        assert!(curl.cookie_header().is_none());
        assert!(curl.headers().is_empty());
        assert!(curl.server_authentication().is_none());
        assert!(!curl.is_compressed() && !curl.is_insecure() && !curl.is_verbose());
    }

    #[test]
    fn test_last_write_wins() {
        let mut curl = CurlCommand::new();
        curl.set_cookie_header("a=1")
            .set_cookie_header("b=2")
            .set_server_authentication("u1", "p1")
            .set_server_authentication("u2", "")
            .set_method("PUT")
            .set_method("PATCH");

        assert_eq!(curl.cookie_header(), Some("b=2"));
        assert_eq!(curl.server_authentication(), Some(&ServerAuthentication::new("u2", "")));
        assert_eq!(curl.method(), Some("PATCH"));
    }

    #[test]
    fn test_append_preserves_order() {
        let mut curl = CurlCommand::new();
        curl.add_header("B", "2")
            .add_header("A", "1")
            .add_header("B", "3")
            .add_form_part("z", "1;type=text/plain")
            .add_form_part("a", "@a.txt;type=text/plain")
            .add_data("second")
            .add_data("first");

        let headers: Vec<_> = curl.headers().iter().collect();
        assert_eq!(headers, vec![("B", "2"), ("A", "1"), ("B", "3")]);
        assert_eq!(curl.form_parts()[0].name(), "z");
        assert_eq!(curl.form_parts()[1].content(), "@a.txt;type=text/plain");
        assert_eq!(curl.data(), ["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn test_remove_header_removes_all_matches() {
        let mut curl = CurlCommand::new();
        curl.add_header("Host", "a")
            .add_header("Accept", "*/*")
            .add_header("host", "b")
            .remove_header("Host");

        let headers: Vec<_> = curl.headers().iter().collect();
        assert_eq!(headers, vec![("Accept", "*/*")]);
    }

    #[test]
    fn test_to_curl() {
        let mut curl = CurlCommand::new();
        curl.set_url("http://test.com/items/12345").set_method("DELETE");

        assert_eq!(
            curl.to_curl(&posix_short()),
            "curl 'http://test.com/items/12345' -X DELETE"
        );
    }
}
