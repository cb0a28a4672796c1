//! Request logging adapter
//!
//! [`CurlLogger`] is what a test suite hooks into its HTTP client: it
//! generates the curl command for each outgoing request and hands it to
//! the `log` facade and to any registered consumers. Generation failures
//! are logged and swallowed so the request itself always proceeds.

use super::{Error, Http2Curl, Options, Result};
use crate::http::OutboundRequest;
use log::Level;
use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;

type Consumer = Arc<dyn Fn(&str) + Send + Sync>;

/// Logs curl commands for outgoing requests
#[derive(Clone)]
pub struct CurlLogger {
    http2curl: Http2Curl,
    level: Option<Level>,
    log_stacktrace: bool,
    consumers: Vec<Consumer>,
}

impl CurlLogger {
    /// Create a logger that logs at debug level
    pub fn new(options: Options) -> Self {
        CurlLogger {
            http2curl: Http2Curl::new(options),
            level: Some(Level::Debug),
            log_stacktrace: false,
            consumers: Vec::new(),
        }
    }

    /// Create a logger builder
    pub fn builder(options: Options) -> CurlLoggerBuilder {
        CurlLoggerBuilder::new(options)
    }

    /// Level commands are logged at, `None` if only consumers get them
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Generate and publish the curl command for `request`
    ///
    /// Returns the published message, or `None` when generation failed.
    pub fn log_request<R>(&self, request: &R) -> Option<String>
    where
        R: OutboundRequest + ?Sized,
    {
        let curl = match self.http2curl.generate_curl(request) {
            Ok(curl) => curl,
            Err(e) => {
                log::warn!("Failed to generate curl command for HTTP request: {}", e);
                return None;
            }
        };

        let mut message = curl;
        if self.log_stacktrace {
            message.push_str("\n\tgenerated\n");
            message.push_str(&Backtrace::force_capture().to_string());
        }

        for consumer in &self.consumers {
            consumer(&message);
        }
        if let Some(level) = self.level {
            log::log!(level, "{}", message);
        }

        Some(message)
    }
}

impl fmt::Debug for CurlLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurlLogger")
            .field("http2curl", &self.http2curl)
            .field("level", &self.level)
            .field("log_stacktrace", &self.log_stacktrace)
            .field("consumers", &self.consumers.len())
            .finish()
    }
}

/// Builder for [`CurlLogger`]
pub struct CurlLoggerBuilder {
    options: Options,
    level: Option<Level>,
    level_name: Option<String>,
    log_stacktrace: bool,
    consumers: Vec<Consumer>,
}

impl CurlLoggerBuilder {
    fn new(options: Options) -> Self {
        CurlLoggerBuilder {
            options,
            level: Some(Level::Debug),
            level_name: None,
            log_stacktrace: false,
            consumers: Vec::new(),
        }
    }

    pub fn log_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self.level_name = None;
        self
    }

    /// Log at the level called `name` (`error`, `warn`, `info`, `debug`,
    /// `trace`), validated by [`build`](Self::build)
    pub fn log_level_name(mut self, name: impl Into<String>) -> Self {
        self.level_name = Some(name.into());
        self
    }

    /// Only hand commands to consumers
    pub fn no_log_level(mut self) -> Self {
        self.level = None;
        self.level_name = None;
        self
    }

    /// Append the stack that generated the command to each message
    pub fn log_stacktrace(mut self, enable: bool) -> Self {
        self.log_stacktrace = enable;
        self
    }

    /// Also pass every message to `consumer`
    pub fn consumer<F>(mut self, consumer: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.consumers.push(Arc::new(consumer));
        self
    }

    pub fn build(self) -> Result<CurlLogger> {
        let level = match &self.level_name {
            Some(name) => Some(
                name.parse::<Level>()
                    .map_err(|_| Error::InvalidConfig(format!("unknown log level: {}", name)))?,
            ),
            None => self.level,
        };

        Ok(CurlLogger {
            http2curl: Http2Curl::new(self.options),
            level,
            log_stacktrace: self.log_stacktrace,
            consumers: self.consumers,
        })
    }
}
