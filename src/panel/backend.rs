//! Backend abstraction for the control panel - enables mocking for tests

use async_trait::async_trait;
use log::debug;

use crate::config::BackendConfig;

use super::errors::PanelResult;
use super::types::{FormInput, HistoryResponse, SubmitResponse};

/// Requests the control panel makes - can be mocked for testing
#[async_trait]
pub trait PanelBackend: Send + Sync {
    /// POST the grid configuration form
    async fn submit_config(&self, input: &FormInput) -> PanelResult<SubmitResponse>;

    /// GET the order history
    async fn order_history(&self) -> PanelResult<HistoryResponse>;
}

// ============================================================================
// HTTP Implementation
// ============================================================================

/// Backend reached over HTTP
///
/// The status code is not checked: any reply whose body parses is returned,
/// so a 4xx carrying a `message` still reaches the output element.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    submit_url: String,
    history_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Use an existing client, e.g. one shared with other components
    pub fn with_client(client: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            client,
            submit_url: join_url(&config.base_url, &config.submit_path),
            history_url: join_url(&config.base_url, &config.history_path),
        }
    }

    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }

    pub fn history_url(&self) -> &str {
        &self.history_url
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[async_trait]
impl PanelBackend for HttpBackend {
    async fn submit_config(&self, input: &FormInput) -> PanelResult<SubmitResponse> {
        debug!("POST {}", self.submit_url);
        let response = self
            .client
            .post(&self.submit_url)
            .json(input)
            .send()
            .await?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn order_history(&self) -> PanelResult<HistoryResponse> {
        debug!("GET {}", self.history_url);
        let response = self
            .client
            .get(&self.history_url)
            .send()
            .await?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

// ============================================================================
// Mock Implementation for Testing
// ============================================================================

pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::Value;
    use tokio::sync::Mutex;

    use crate::panel::errors::PanelError;

    /// Mock backend for testing
    pub struct MockBackend {
        pub submissions: Arc<Mutex<Vec<FormInput>>>,
        history_calls: AtomicUsize,
        pub submit_reply: Arc<Mutex<PanelResult<SubmitResponse>>>,
        pub history_reply: Arc<Mutex<PanelResult<HistoryResponse>>>,
        pub submit_delay: Arc<Mutex<Duration>>,
        pub history_delay: Arc<Mutex<Duration>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self {
                submissions: Arc::new(Mutex::new(Vec::new())),
                history_calls: AtomicUsize::new(0),
                submit_reply: Arc::new(Mutex::new(Ok(SubmitResponse::new("ok")))),
                history_reply: Arc::new(Mutex::new(Ok(HistoryResponse(Value::Array(
                    Vec::new(),
                ))))),
                submit_delay: Arc::new(Mutex::new(Duration::ZERO)),
                history_delay: Arc::new(Mutex::new(Duration::ZERO)),
            }
        }

        pub async fn set_submit_reply(&self, reply: PanelResult<SubmitResponse>) {
            *self.submit_reply.lock().await = reply;
        }

        pub async fn set_history_reply(&self, reply: PanelResult<HistoryResponse>) {
            *self.history_reply.lock().await = reply;
        }

        /// Make both endpoints fail like an unreachable server
        pub async fn set_unreachable(&self) {
            let err = PanelError::RequestFailed("Mock network failure".into());
            self.set_submit_reply(Err(err.clone())).await;
            self.set_history_reply(Err(err)).await;
        }

        pub async fn set_submit_delay(&self, delay: Duration) {
            *self.submit_delay.lock().await = delay;
        }

        pub async fn set_history_delay(&self, delay: Duration) {
            *self.history_delay.lock().await = delay;
        }

        pub async fn submit_count(&self) -> usize {
            self.submissions.lock().await.len()
        }

        pub fn history_count(&self) -> usize {
            self.history_calls.load(Ordering::SeqCst)
        }

        /// Total requests made against either endpoint
        pub async fn total_calls(&self) -> usize {
            self.submit_count().await + self.history_count()
        }
    }

    impl Default for MockBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl PanelBackend for MockBackend {
        async fn submit_config(&self, input: &FormInput) -> PanelResult<SubmitResponse> {
            self.submissions.lock().await.push(input.clone());
            let delay = *self.submit_delay.lock().await;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            self.submit_reply.lock().await.clone()
        }

        async fn order_history(&self) -> PanelResult<HistoryResponse> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            let delay = *self.history_delay.lock().await;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            self.history_reply.lock().await.clone()
        }
    }
}
