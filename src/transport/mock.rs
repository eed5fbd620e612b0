//! Mock transport implementation for testing.
//!
//! This module provides a mock transport that operates entirely in-memory,
//! allowing tests to run without network dependencies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use url::Url;

use super::traits::{Transport, TransportRequest, TransportResponse};
use crate::Error;
use crate::operation::HttpMethod;

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Target URL.
    pub url: Url,
    /// Headers, in order.
    pub headers: Vec<(String, String)>,
    /// JSON payload.
    pub body: Option<serde_json::Value>,
    /// Timeout requested for the exchange.
    pub timeout: Option<Duration>,
}

impl RecordedRequest {
    /// Returns the value of the first header named `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Mock transport for testing.
///
/// Records every request and answers from a queue of scripted results,
/// falling back to a default response (`200 {}`) once the queue is empty.
/// A configured delay longer than a request's timeout produces a
/// [`Timeout`](crate::ErrorKind::Timeout) error after the timeout elapses.
pub struct MockTransport {
    /// Scripted results, consumed in order.
    scripted: RwLock<VecDeque<Result<TransportResponse, Error>>>,
    /// Response used when nothing is scripted.
    default_response: RwLock<TransportResponse>,
    /// Simulated server latency.
    delay: RwLock<Option<Duration>>,
    /// Captured requests.
    requests: RwLock<Vec<RecordedRequest>>,
    /// Request counter.
    request_count: AtomicU64,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            scripted: RwLock::new(VecDeque::new()),
            default_response: RwLock::new(TransportResponse::new(200, "{}")),
            delay: RwLock::new(None),
            requests: RwLock::new(Vec::new()),
            request_count: AtomicU64::new(0),
        }
    }

    /// Queues a response for the next unanswered request.
    pub fn push_response(&self, response: TransportResponse) {
        self.scripted.write().push_back(Ok(response));
    }

    /// Queues a failure for the next unanswered request.
    pub fn push_error(&self, error: Error) {
        self.scripted.write().push_back(Err(error));
    }

    /// Sets the response returned when nothing is queued.
    pub fn set_default_response(&self, response: TransportResponse) {
        *self.default_response.write() = response;
    }

    /// Sets a simulated latency applied to every request.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write() = Some(delay);
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Returns every captured request, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().clone()
    }

    /// Returns the most recent captured request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.read().last().cloned()
    }

    /// Clears captured requests and scripted results.
    pub fn reset(&self) {
        self.requests.write().clear();
        self.scripted.write().clear();
        self.request_count.store(0, Ordering::Relaxed);
    }

    fn record(&self, request: &TransportRequest<'_>) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.requests.write().push(RecordedRequest {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.to_vec(),
            body: request.body.cloned(),
            timeout: request.timeout,
        });
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest<'_>) -> Result<TransportResponse, Error> {
        self.record(&request);

        let delay = *self.delay.read();
        if let Some(delay) = delay {
            match request.timeout {
                Some(timeout) if timeout < delay => {
                    tokio::time::sleep(timeout).await;
                    return Err(Error::timeout(format!(
                        "request timed out after {:?}",
                        timeout
                    )));
                },
                _ => tokio::time::sleep(delay).await,
            }
        }

        let scripted = self.scripted.write().pop_front();
        match scripted {
            Some(result) => result,
            None => Ok(self.default_response.read().clone()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
