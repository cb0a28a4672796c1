//! http2curl - curl command generation for HTTP request logging
//!
//! This crate turns an outbound HTTP request into an equivalent `curl`
//! invocation that can be pasted into a POSIX shell or the Windows command
//! interpreter, so failing tests can be replayed by hand.

pub mod curl;
pub mod http;
