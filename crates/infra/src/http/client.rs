use std::time::Duration;

use pathwise_domain::{ApiConfig, PathwiseError};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);

/// How many times a request is sent and how long to wait in between
///
/// The default sends once. Only 5xx responses and connection or timeout
/// failures are retried; the wait doubles after every retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 1, base_backoff: DEFAULT_BACKOFF }
    }
}

impl RetryPolicy {
    pub fn attempts(max_attempts: u32) -> Self {
        Self { max_attempts: max_attempts.max(1), ..Self::default() }
    }

    #[must_use]
    pub fn with_backoff(mut self, base_backoff: Duration) -> Self {
        self.base_backoff = base_backoff;
        self
    }

    /// Wait before retry number `retry` (1-based).
    fn delay_before(&self, retry: u32) -> Duration {
        let doublings = retry.saturating_sub(1).min(8);
        self.base_backoff.saturating_mul(1 << doublings)
    }

    fn allows_another(&self, attempt: u32) -> bool {
        attempt < self.max_attempts.max(1)
    }
}

/// Transport shared by every API client
///
/// Status codes are not interpreted here: any response, including 4xx and
/// 5xx, is handed back once the retry policy gives up.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Client with the timeout and attempt count from `config`.
    ///
    /// # Errors
    /// Returns `Config` when the TLS backend cannot be initialised.
    pub fn new(config: &ApiConfig) -> Result<Self, PathwiseError> {
        let mut builder = ReqwestClient::builder()
            .no_proxy()
            .user_agent(concat!("pathwise/", env!("CARGO_PKG_VERSION")));
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| PathwiseError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, retry: RetryPolicy::attempts(config.max_attempts) })
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send `builder`, retrying according to the policy.
    ///
    /// # Errors
    /// Returns `Transport` when no response could be obtained.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, PathwiseError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let request = builder
                .try_clone()
                .ok_or_else(|| PathwiseError::Internal("request body is not replayable".into()))?
                .build()
                .map_err(|e| PathwiseError::from(InfraError::from(e)))?;
            let (method, url) = (request.method().clone(), request.url().clone());

            let outcome = self.client.execute(request).await;
            let retryable = match &outcome {
                Ok(response) => response.status().is_server_error(),
                Err(e) => is_transient(e),
            };

            if retryable && self.retry.allows_another(attempt) {
                let delay = self.retry.delay_before(attempt);
                warn!(attempt, %method, %url, delay_ms = delay.as_millis() as u64, "Retrying request");
                tokio::time::sleep(delay).await;
                continue;
            }

            return match outcome {
                Ok(response) => {
                    debug!(attempt, %method, %url, status = %response.status(), "HTTP response");
                    Ok(response)
                }
                Err(e) => {
                    debug!(attempt, %method, %url, error = %e, "HTTP request failed");
                    Err(InfraError::from(e).into())
                }
            };
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use reqwest::StatusCode;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn client(attempts: u32) -> HttpClient {
        let config = ApiConfig { max_attempts: attempts, ..ApiConfig::default() };
        HttpClient::new(&config)
            .unwrap()
            .with_retry(RetryPolicy::attempts(attempts).with_backoff(Duration::from_millis(5)))
    }

    #[tokio::test]
    async fn server_error_is_returned_after_one_attempt_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let http = client(1);
        let response = http.send(http.request(Method::GET, &server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn server_errors_are_retried_up_to_the_limit() {
        let server = MockServer::start().await;
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        Mock::given(method("GET"))
            .respond_with(move |_: &Request| {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    ResponseTemplate::new(502)
                } else {
                    ResponseTemplate::new(200)
                }
            })
            .expect(3)
            .mount(&server)
            .await;

        let http = client(3);
        let response = http.send(http.request(Method::GET, &server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_are_never_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let http = client(3);
        let response = http.send(http.request(Method::GET, &server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let http = client(2);
        let result = http.send(http.request(Method::GET, &url)).await;

        assert!(matches!(result, Err(PathwiseError::Transport(_))), "got {result:?}");
    }

    #[test]
    fn backoff_doubles_and_zero_attempts_means_one() {
        let policy = RetryPolicy::attempts(0).with_backoff(Duration::from_millis(100));
        assert_eq!(policy.max_attempts, 1);
        assert!(!policy.allows_another(1));
        assert_eq!(policy.delay_before(1), Duration::from_millis(100));
        assert_eq!(policy.delay_before(3), Duration::from_millis(400));
    }
}
