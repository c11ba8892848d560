use std::{fmt::Debug, sync::Arc, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, warn};
use reqwest::Client;

use crate::error::TransportError;

/// Longest error body kept in [`TransportError::Status`].
const MAX_ERROR_BODY: usize = 200;

/// Something that can perform an HTTP GET and hand back the raw body.
///
/// [`HttpTransport`] is the network-backed default. Tests and embedding
/// applications can supply their own implementation when building a
/// [`OneCallClient`](crate::OneCallClient).
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        (**self).get(url).await
    }
}

/// Default [`Transport`] backed by a `reqwest` client with a hard timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Builds a transport whose requests (connect, send and body read) are
    /// bounded by `timeout_secs`.
    pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(timeout_secs);
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The request URL carries the API key, so it is stripped before the
    /// error leaves the transport.
    fn map_err(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Request(err.without_url())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_err(e))?;

        let status = res.status();
        if !status.is_success() {
            warn!("One Call request failed with status {status}");
            let body = read_prefix(res, MAX_ERROR_BODY).await;
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate_body(&String::from_utf8_lossy(&body)),
            });
        }

        let body = res.bytes().await.map_err(|e| self.map_err(e))?;

        debug!("received {} bytes", body.len());
        Ok(body)
    }
}

/// Reads chunks until more than `limit` bytes arrived or the body ends.
/// Read failures end the prefix early.
async fn read_prefix(mut res: reqwest::Response, limit: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    while buf.len() <= limit {
        match res.chunk().await {
            Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
            _ => break,
        }
    }
    buf
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }

    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
