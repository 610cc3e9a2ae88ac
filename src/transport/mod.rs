//! Rate-limited HTTP transport.
//!
//! Every HTTP request in the pipeline goes through [`RateLimitedClient`],
//! which enforces two limits for a configured N:
//!
//! - at most N requests in flight concurrently, and
//! - a steady-state issue rate of at most N requests per second.
//!
//! Concurrency is capped by a pool of N semaphore tokens held for the
//! duration of each request. Rate is capped by a shared admission schedule:
//! successive dispatches are spaced at least 1/N seconds apart globally, so
//! the aggregate long-run issue rate never exceeds N per second no matter
//! how quickly individual requests complete. Callers awaiting admission
//! suspend without blocking unrelated work.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::header::HeaderMap;
use tokio::sync::Semaphore;
use tokio::time::Instant;

/// HTTP client wrapper enforcing a concurrency cap and a request-rate ceiling.
///
/// The transport surfaces failures (timeouts, connection errors, non-2xx
/// statuses) to the caller and never retries.
pub struct RateLimitedClient {
    client: Arc<reqwest::Client>,
    permits: Arc<Semaphore>,
    min_interval: Duration,
    next_slot: Mutex<Instant>,
}

impl RateLimitedClient {
    /// Creates a transport issuing at most `rate_limit` concurrent requests
    /// and `rate_limit` requests per second. A zero limit is clamped to one.
    pub fn new(client: Arc<reqwest::Client>, rate_limit: u32) -> Self {
        let tokens = rate_limit.max(1) as usize;
        Self {
            client,
            permits: Arc::new(Semaphore::new(tokens)),
            min_interval: Duration::from_secs_f64(1.0 / tokens as f64),
            next_slot: Mutex::new(Instant::now()),
        }
    }

    /// Issues a GET request with query parameters through the rate gate.
    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.execute(self.client.get(url).query(query)).await
    }

    /// Issues a POST request with the given headers and body through the rate gate.
    pub async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: String,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.execute(self.client.post(url).headers(headers).body(body))
            .await
    }

    /// Claims the next dispatch slot and returns how long to wait for it.
    ///
    /// Slots are handed out in claim order, 1/N seconds apart, which keeps
    /// admission FIFO-ish and the aggregate rate at or below N per second.
    fn claim_dispatch_slot(&self) -> Duration {
        let mut next = self.next_slot.lock().expect("dispatch schedule lock poisoned");
        let now = Instant::now();
        let slot = (*next).max(now);
        *next = slot + self.min_interval;
        slot - now
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, reqwest::Error> {
        // The semaphore is never closed, so acquisition only fails on a bug.
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .expect("transport semaphore closed");

        let wait = self.claim_dispatch_slot();
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }

        let result = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);

        drop(permit);
        result
    }

    /// Number of tokens currently available, exposed for tests.
    #[cfg(test)]
    fn available_tokens(&self) -> usize {
        self.permits.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(rate_limit: u32) -> RateLimitedClient {
        RateLimitedClient::new(Arc::new(reqwest::Client::new()), rate_limit)
    }

    #[test]
    fn test_zero_rate_limit_clamped_to_one() {
        let transport = test_client(0);
        assert_eq!(transport.available_tokens(), 1);
        assert_eq!(transport.min_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_token_count_matches_rate_limit() {
        let transport = test_client(10);
        assert_eq!(transport.available_tokens(), 10);
        assert_eq!(transport.min_interval, Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_dispatch_slots_spaced_by_min_interval() {
        let transport = test_client(2);

        // The first slot is immediate; each subsequent claim is pushed out
        // by another 1/N seconds.
        assert!(transport.claim_dispatch_slot().is_zero());
        let second = transport.claim_dispatch_slot();
        let third = transport.claim_dispatch_slot();
        assert!(second > Duration::from_millis(400));
        assert!(third > second);
    }

    #[tokio::test]
    async fn test_failed_request_returns_token_at_completion() {
        // Requests against an unroutable port fail fast; the token comes
        // back at completion since pacing gates admission, not release.
        let transport = test_client(2);
        let result = transport.get("http://127.0.0.1:9/", &[]).await;
        assert!(result.is_err(), "Request to closed port should fail");
        assert_eq!(transport.available_tokens(), 2);
    }

    #[tokio::test]
    async fn test_issue_rate_capped_at_n_per_second() {
        // Eight fail-fast requests through an N=2 limiter: admissions are
        // spaced 0.5s apart globally, so the batch cannot finish in under
        // 3.5 seconds regardless of how quickly each request errors out.
        let transport = Arc::new(test_client(2));
        let start = std::time::Instant::now();

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let transport = Arc::clone(&transport);
            tasks.push(tokio::spawn(async move {
                let _ = transport.get("http://127.0.0.1:9/", &[]).await;
            }));
        }
        for task in tasks {
            let _ = task.await;
        }

        assert!(
            start.elapsed() >= Duration::from_millis(2900),
            "8 requests at 2/s finished in {:?}; rate ceiling not enforced",
            start.elapsed()
        );
    }
}
