//! Completed exchanges and the buffered response stream.

use std::io::{BufRead, Cursor, Read};

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::exchange::RequestMethod;

/// What the transport knows about an exchange once the response is complete.
#[derive(Debug, Clone)]
pub struct CompletedExchange {
    method: RequestMethod,
    request_uri: String,
    status: u16,
    /// In arrival order; repeated headers keep every value.
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl CompletedExchange {
    /// Create a completed exchange. Header names are normalized to lowercase.
    pub fn new(
        method: RequestMethod,
        request_uri: impl Into<String>,
        status: u16,
        headers: impl IntoIterator<Item = (String, String)>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            method,
            request_uri: request_uri.into(),
            status,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
            body: body.into(),
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Path and query of the request.
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of a header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_values(name).next()
    }

    /// Every value of a header, e.g. each `Set-Cookie`.
    pub fn header_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .filter(move |(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// The full response payload.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub(crate) fn into_body(self) -> Bytes {
        self.body
    }
}

/// A readable view over a fully buffered response payload.
///
/// The transport reads the whole body into memory before the callback runs,
/// so large responses cost their full size in memory.
#[derive(Debug, Clone, Default)]
pub struct ResponseStream {
    inner: Cursor<Bytes>,
}

impl ResponseStream {
    /// Wrap a payload.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            inner: Cursor::new(body.into()),
        }
    }

    /// Total payload length, independent of how much has been read.
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whole payload, independent of how much has been read.
    pub fn into_bytes(self) -> Bytes {
        self.inner.into_inner()
    }

    /// Deserialize the whole payload as JSON.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_slice(&self.into_bytes())?)
    }
}

impl Read for ResponseStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for ResponseStream {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}
