//! Writing a [`Problem`] to an HTTP response
//!
//! The core only needs three capabilities from a response, captured by
//! [`ResponseSink`]. An implementation for `http::Response<Vec<u8>>` is
//! provided; with the `axum` feature a `Problem` is also an axum response.

use std::convert::Infallible;

use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue, StatusCode};

use crate::problem::{APPLICATION_PROBLEM_JSON, Problem, STATUS};

/// Minimal view of an HTTP response under construction.
///
/// The status is set at most once and always before the body, since most
/// transports freeze the status line on the first body byte.
pub trait ResponseSink {
    type Error;

    fn set_header(&mut self, name: &str, value: &str);

    fn set_status(&mut self, status: u16);

    /// Write `body` and return the number of bytes written.
    ///
    /// # Errors
    /// Returns the transport's error when the write fails.
    fn write_body(&mut self, body: &[u8]) -> Result<usize, Self::Error>;
}

impl Problem {
    /// Write the Problem to `sink` as `application/problem+json`.
    ///
    /// The status line is taken from the `status` member when it holds an
    /// integer that fits a `u16`; otherwise the sink keeps its default.
    ///
    /// # Errors
    /// Returns the sink's write error unchanged.
    pub fn write_to<S>(&self, sink: &mut S) -> Result<usize, S::Error>
    where
        S: ResponseSink + ?Sized,
    {
        sink.set_header(CONTENT_TYPE.as_str(), APPLICATION_PROBLEM_JSON);
        if let Some(code) = self.status() {
            sink.set_status(code);
        } else if let Some(raw) = self.get(STATUS) {
            tracing::debug!(status = %raw, "ignoring problem status that is not an HTTP status integer");
        }
        sink.write_body(&self.json())
    }
}

impl ResponseSink for http::Response<Vec<u8>> {
    type Error = Infallible;

    fn set_header(&mut self, name: &str, value: &str) {
        let name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(header = name, error = %err, "skipping invalid header name");
                return;
            }
        };
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers_mut().insert(name, value);
            }
            Err(err) => {
                tracing::warn!(header = %name, error = %err, "skipping invalid header value");
            }
        }
    }

    fn set_status(&mut self, status: u16) {
        match StatusCode::from_u16(status) {
            Ok(code) => *self.status_mut() = code,
            Err(err) => {
                tracing::warn!(status, error = %err, "keeping default status, code not representable");
            }
        }
    }

    fn write_body(&mut self, body: &[u8]) -> Result<usize, Self::Error> {
        self.body_mut().extend_from_slice(body);
        Ok(body.len())
    }
}

/// Axum integration: make Problem directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Problem {
    fn into_response(self) -> axum::response::Response {
        let mut resp = http::Response::new(Vec::new());
        if let Err(never) = self.write_to(&mut resp) {
            match never {}
        }
        resp.map(axum::body::Body::from)
    }
}
