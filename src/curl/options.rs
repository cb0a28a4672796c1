//! curl generation options
//!
//! [`Options`] decide how a command is displayed; what the command
//! contains is decided by the request. Options are immutable after
//! building and can be shared between threads.

use super::{CurlCommand, Error, Platform, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Requested target platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetPlatform {
    /// POSIX shells
    Posix,
    /// Windows command interpreter
    Windows,
    /// Whatever the current host is, decided once when options are built
    #[default]
    Auto,
}

impl TargetPlatform {
    /// Resolve to a concrete platform
    pub fn resolve(self) -> Platform {
        match self {
            TargetPlatform::Posix => Platform::Posix,
            TargetPlatform::Windows => Platform::Windows,
            TargetPlatform::Auto => Platform::current(),
        }
    }
}

impl FromStr for TargetPlatform {
    type Err = Error;

    /// Parse platform from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "posix" | "unix" | "linux" | "macos" => Ok(TargetPlatform::Posix),
            "windows" | "win" => Ok(TargetPlatform::Windows),
            "auto" => Ok(TargetPlatform::Auto),
            _ => Err(Error::InvalidConfig(format!("unknown target platform: {}", s))),
        }
    }
}

/// What to do with a request carrying more than one `Cookie` header
///
/// RFC 6265 forbids it, but clients still send such requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultipleCookiePolicy {
    /// Keep them as plain `--header` arguments and log a warning
    #[default]
    Warn,
    /// Fail the translation
    Reject,
}

type CommandUpdater = Arc<dyn Fn(&mut CurlCommand) + Send + Sync>;

/// Immutable curl generation settings
#[derive(Clone)]
pub struct Options {
    pub(crate) platform: Platform,
    pub(crate) use_short_form: bool,
    pub(crate) print_multiliner: bool,
    pub(crate) escape_non_ascii: bool,
    pub(crate) multiple_cookie_policy: MultipleCookiePolicy,
    pub(crate) command_updater: Option<CommandUpdater>,
}

impl Options {
    /// Create a new options builder
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// Platform commands are rendered for
    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn use_short_form(&self) -> bool {
        self.use_short_form
    }

    pub fn print_multiliner(&self) -> bool {
        self.print_multiliner
    }

    pub fn escape_non_ascii(&self) -> bool {
        self.escape_non_ascii
    }

    pub fn multiple_cookie_policy(&self) -> MultipleCookiePolicy {
        self.multiple_cookie_policy
    }

    /// Run the configured updater, if any, on `curl`
    pub fn update_command(&self, curl: &mut CurlCommand) {
        if let Some(updater) = &self.command_updater {
            updater(curl);
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            platform: TargetPlatform::default().resolve(),
            use_short_form: false,
            print_multiliner: false,
            escape_non_ascii: true,
            multiple_cookie_policy: MultipleCookiePolicy::default(),
            command_updater: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("platform", &self.platform)
            .field("use_short_form", &self.use_short_form)
            .field("print_multiliner", &self.print_multiliner)
            .field("escape_non_ascii", &self.escape_non_ascii)
            .field("multiple_cookie_policy", &self.multiple_cookie_policy)
            .field("command_updater", &self.command_updater.is_some())
            .finish()
    }
}

/// Builder for [`Options`]
pub struct OptionsBuilder {
    target_platform: TargetPlatform,
    target_platform_name: Option<String>,
    use_short_form: bool,
    print_multiliner: bool,
    escape_non_ascii: bool,
    multiple_cookie_policy: MultipleCookiePolicy,
    command_updater: Option<CommandUpdater>,
}

impl OptionsBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        OptionsBuilder {
            target_platform: TargetPlatform::Auto,
            target_platform_name: None,
            use_short_form: false,
            print_multiliner: false,
            escape_non_ascii: true,
            multiple_cookie_policy: MultipleCookiePolicy::Warn,
            command_updater: None,
        }
    }

    /// Render commands for `platform`
    pub fn target_platform(mut self, platform: TargetPlatform) -> Self {
        self.target_platform = platform;
        self.target_platform_name = None;
        self
    }

    /// Render commands for the platform called `name`
    ///
    /// The name is validated by [`build`](Self::build).
    pub fn target_platform_name(mut self, name: impl Into<String>) -> Self {
        self.target_platform_name = Some(name.into());
        self
    }

    /// Print `-H` instead of `--header` where curl has a short flag
    pub fn use_short_form(mut self) -> Self {
        self.use_short_form = true;
        self
    }

    pub fn use_long_form(mut self) -> Self {
        self.use_short_form = false;
        self
    }

    /// Print one argument group per line
    pub fn print_multiliner(mut self) -> Self {
        self.print_multiliner = true;
        self
    }

    pub fn print_single_liner(mut self) -> Self {
        self.print_multiliner = false;
        self
    }

    /// Re-encode characters outside printable ASCII in POSIX output
    pub fn escape_non_ascii(mut self, enable: bool) -> Self {
        self.escape_non_ascii = enable;
        self
    }

    pub fn multiple_cookie_policy(mut self, policy: MultipleCookiePolicy) -> Self {
        self.multiple_cookie_policy = policy;
        self
    }

    /// Edit every translated command before it is rendered
    ///
    /// Typical use is removing headers that only add noise to the log,
    /// such as `Host` or `User-Agent`.
    pub fn update_command<F>(mut self, updater: F) -> Self
    where
        F: Fn(&mut CurlCommand) + Send + Sync + 'static,
    {
        self.command_updater = Some(Arc::new(updater));
        self
    }

    /// Build the options, resolving the target platform
    pub fn build(self) -> Result<Options> {
        let target_platform = match &self.target_platform_name {
            Some(name) => name.parse::<TargetPlatform>()?,
            None => self.target_platform,
        };

        Ok(Options {
            platform: target_platform.resolve(),
            use_short_form: self.use_short_form,
            print_multiliner: self.print_multiliner,
            escape_non_ascii: self.escape_non_ascii,
            multiple_cookie_policy: self.multiple_cookie_policy,
            command_updater: self.command_updater,
        })
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
