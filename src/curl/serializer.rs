//! curl command rendering
//!
//! The serializer walks a [`CurlCommand`] in a fixed group order and turns
//! each group into a flag followed by one escaped argument:
//!
//! `curl <url>`, method, cookie, headers, form parts, data, binary data,
//! credentials, `--compressed`, `--insecure`, `--verbose`.

use super::escape::{escape, escape_url_globs};
use super::{CurlCommand, Options, Platform};

/// curl command-line flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Request,
    Cookie,
    Header,
    Form,
    Data,
    DataBinary,
    User,
    Compressed,
    Insecure,
    Verbose,
}

impl Flag {
    fn long(self) -> &'static str {
        match self {
            Flag::Request => "--request",
            Flag::Cookie => "--cookie",
            Flag::Header => "--header",
            Flag::Form => "--form",
            Flag::Data => "--data",
            Flag::DataBinary => "--data-binary",
            Flag::User => "--user",
            Flag::Compressed => "--compressed",
            Flag::Insecure => "--insecure",
            Flag::Verbose => "--verbose",
        }
    }

    fn short(self) -> Option<&'static str> {
        match self {
            Flag::Request => Some("-X"),
            Flag::Cookie => Some("-b"),
            Flag::Header => Some("-H"),
            Flag::Form => Some("-F"),
            Flag::Data => Some("-d"),
            Flag::User => Some("-u"),
            Flag::Insecure => Some("-k"),
            Flag::Verbose => Some("-v"),
            Flag::DataBinary | Flag::Compressed => None,
        }
    }
}

/// Renders commands with one set of [`Options`]
pub struct Serializer<'a> {
    options: &'a Options,
}

impl<'a> Serializer<'a> {
    pub fn new(options: &'a Options) -> Self {
        Serializer { options }
    }

    fn flag(&self, flag: Flag) -> &'static str {
        if self.options.use_short_form {
            flag.short().unwrap_or_else(|| flag.long())
        } else {
            flag.long()
        }
    }

    fn escape(&self, value: &str) -> String {
        escape(value, self.options.platform, self.options.escape_non_ascii)
    }

    fn group(&self, flag: Flag, value: &str) -> String {
        format!("{} {}", self.flag(flag), self.escape(value))
    }

    // Glob backslashes must reach curl undoubled
    fn escape_url(&self, url: &str) -> String {
        match self.options.platform {
            Platform::Posix => self.escape(&escape_url_globs(url)),
            Platform::Windows => escape_url_globs(&self.escape(url)),
        }
    }

    /// Render `curl` as a command line
    pub fn serialize(&self, curl: &CurlCommand) -> String {
        let mut groups = Vec::new();

        groups.push(format!("curl {}", self.escape_url(curl.url())));

        match curl.method() {
            Some(method) if is_plain_method(method) => {
                groups.push(format!("{} {}", self.flag(Flag::Request), method));
            }
            Some(method) => groups.push(self.group(Flag::Request, method)),
            None => {}
        }

        if let Some(cookie) = curl.cookie_header() {
            groups.push(self.group(Flag::Cookie, cookie));
        }

        for (name, value) in curl.headers().iter() {
            groups.push(self.group(Flag::Header, &format!("{}: {}", name, value)));
        }

        for part in curl.form_parts() {
            groups.push(self.group(Flag::Form, &format!("{}={}", part.name(), part.content())));
        }

        for data in curl.data() {
            groups.push(self.group(Flag::Data, data));
        }

        for data in curl.data_binary() {
            groups.push(self.group(Flag::DataBinary, data));
        }

        if let Some(auth) = curl.server_authentication() {
            groups.push(self.group(Flag::User, &format!("{}:{}", auth.user(), auth.password())));
        }

        if curl.is_compressed() {
            groups.push(self.flag(Flag::Compressed).to_string());
        }
        if curl.is_insecure() {
            groups.push(self.flag(Flag::Insecure).to_string());
        }
        if curl.is_verbose() {
            groups.push(self.flag(Flag::Verbose).to_string());
        }

        groups.join(self.separator().as_str())
    }

    fn separator(&self) -> String {
        if self.options.print_multiliner {
            let platform = self.options.platform;
            format!(
                " {}{}  ",
                platform.line_continuation(),
                platform.line_separator()
            )
        } else {
            " ".to_string()
        }
    }
}

/// Check for a method name that needs no quoting on any platform
///
/// This is the subset of RFC 9110 token characters that neither POSIX
/// shells nor `cmd.exe` interpret.
fn is_plain_method(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
