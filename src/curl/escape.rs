//! Shell argument escaping
//!
//! Every argument of a generated command goes through [`escape`], which
//! produces a literal the target shell turns back into the original text.
//!
//! POSIX shells get plain single quotes when the value is printable ASCII
//! without a single quote, and ANSI-C quoting (`$'...'`) otherwise. The
//! Windows command interpreter gets double quotes with `cmd.exe` specific
//! escapes for quotes, percent signs, backslashes and line breaks.

/// Shell a command is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// POSIX `sh` compatible shells (bash, zsh, ksh)
    Posix,
    /// Windows `cmd.exe`
    Windows,
}

impl Platform {
    /// Platform of the host this code was compiled for
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Check if this is the Windows command interpreter
    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    /// Line terminator used between lines of a multi-line command
    pub fn line_separator(&self) -> &'static str {
        match self {
            Platform::Posix => "\n",
            Platform::Windows => "\r\n",
        }
    }

    /// Token that continues a command on the next line
    pub fn line_continuation(&self) -> &'static str {
        match self {
            Platform::Posix => "\\",
            Platform::Windows => "^",
        }
    }
}

/// Escape `value` as a single shell argument for `platform`
///
/// `escape_non_ascii` only affects POSIX output; Windows arguments never
/// re-encode characters.
pub fn escape(value: &str, platform: Platform, escape_non_ascii: bool) -> String {
    match platform {
        Platform::Posix => escape_posix(value, escape_non_ascii),
        Platform::Windows => escape_windows(value),
    }
}

fn is_printable_ascii(c: char) -> bool {
    ('\x20'..='\x7e').contains(&c)
}

/// Escape `value` for a POSIX shell
pub fn escape_posix(value: &str, escape_non_ascii: bool) -> String {
    if value.chars().all(|c| is_printable_ascii(c) && c != '\'') {
        return format!("'{}'", value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    out.push_str("$'");
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if escape_non_ascii && !is_printable_ascii(c) => push_code_point(&mut out, c),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

// Fixed-width escapes so a following hex digit is never read as part of
// the code point.
fn push_code_point(out: &mut String, c: char) {
    let code = u32::from(c);
    let escaped = if code < 0x100 {
        format!("\\x{:02x}", code)
    } else if code <= 0xffff {
        format!("\\u{:04x}", code)
    } else {
        format!("\\U{:08x}", code)
    };
    out.push_str(&escaped);
}

/// Escape `value` for the Windows command interpreter
///
/// - `"` becomes `""`, understood by both `cmd.exe` and the MS CRT
///   argument parser
/// - `%` becomes `"%"` so it is never expanded as an environment variable
/// - `\` is doubled so the CRT parser does not collapse it
/// - line breaks cannot appear inside quotes, so each run of them closes
///   the quote, escapes the break with `^` and reopens the quote
pub fn escape_windows(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');

    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\"\""),
            '%' => out.push_str("\"%\""),
            '\\' => out.push_str("\\\\"),
            '\r' | '\n' => {
                let mut run = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next != '\r' && next != '\n' {
                        break;
                    }
                    run.push(next);
                    chars.next();
                }
                out.push_str("\"^");
                out.push_str(&run);
                out.push_str(&run);
                out.push('"');
            }
            c => out.push(c),
        }
    }

    out.push('"');
    out
}

/// Prefix curl's URL globbing characters with a backslash
pub fn escape_url_globs(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, '[' | ']' | '{' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
