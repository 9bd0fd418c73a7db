use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::backstory::BackstoryRequest;
use crate::error::IntegrationError;
use crate::gemini::GeminiApi;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// A non-blocking handle to an in-flight async request.
/// Call `try_recv()` from the game loop to check for results without blocking.
pub struct PendingRequest<T> {
    receiver: mpsc::Receiver<Result<T, IntegrationError>>,
}

impl<T> PendingRequest<T> {
    /// A request that has already finished
    pub fn ready(result: Result<T, IntegrationError>) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(result);
        Self { receiver: rx }
    }

    /// Non-blocking check for the result. Returns `None` if still pending.
    pub fn try_recv(&self) -> Option<Result<T, IntegrationError>> {
        self.receiver.try_recv().ok()
    }

    /// Blocking wait for the result.
    pub fn wait(self) -> Result<T, IntegrationError> {
        self.receiver
            .recv()
            .map_err(|_| IntegrationError::Network("Channel closed".into()))?
    }
}

/// Connection settings for the narrative service
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeConfig {
    pub model: String,
    pub timeout: Duration,
    /// `None` disables generation; every request resolves to `MissingApiKey`
    pub api_key: Option<String>,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            api_key: None,
        }
    }
}

/// Owns a background tokio runtime and dispatches generation requests via channels.
pub struct NarrativeClient {
    runtime: tokio::runtime::Runtime,
    api: Option<Arc<GeminiApi>>,
}

impl NarrativeClient {
    pub fn new(config: NarrativeConfig) -> Result<Self, IntegrationError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| IntegrationError::Network(format!("Failed to create runtime: {}", e)))?;

        let api = match config.api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => {
                let client = Client::builder()
                    .timeout(config.timeout)
                    .build()
                    .map_err(|e| IntegrationError::Network(format!("Failed to create HTTP client: {}", e)))?;
                Some(Arc::new(GeminiApi::new(client, config.model, key)))
            }
            None => {
                warn!("API key not set; narrative generation disabled");
                None
            }
        };

        Ok(Self { runtime, api })
    }

    pub fn is_enabled(&self) -> bool {
        self.api.is_some()
    }

    /// Generate a backstory in the background
    pub fn generate_backstory(&self, request: &BackstoryRequest) -> PendingRequest<String> {
        let Some(api) = self.api.as_ref().map(Arc::clone) else {
            return PendingRequest::ready(Err(IntegrationError::MissingApiKey));
        };
        let prompt = request.prompt();
        let (tx, rx) = mpsc::channel();

        self.runtime.spawn(async move {
            let result = api.generate(&prompt).await;
            debug!(ok = result.is_ok(), "Backstory request finished");
            let _ = tx.send(result);
        });

        PendingRequest { receiver: rx }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_request_try_recv_none_then_result() {
        let (tx, rx) = mpsc::channel();
        let pending: PendingRequest<String> = PendingRequest { receiver: rx };

        assert!(pending.try_recv().is_none());
        tx.send(Ok("hello".to_string())).unwrap();

        let result = pending.try_recv();
        assert_eq!(result.unwrap().unwrap(), "hello");
    }

    #[test]
    fn test_pending_request_closed_channel() {
        let (tx, rx) = mpsc::channel::<Result<u32, IntegrationError>>();
        drop(tx);
        let pending = PendingRequest { receiver: rx };
        assert!(matches!(pending.wait(), Err(IntegrationError::Network(_))));
    }

    #[test]
    fn test_client_without_key_is_disabled() {
        let client = NarrativeClient::new(NarrativeConfig::default()).unwrap();
        assert!(!client.is_enabled());

        let request = BackstoryRequest::new("Vex", "Female", "Zylorian", "Mystic");
        let result = client.generate_backstory(&request).wait();
        assert!(matches!(result, Err(IntegrationError::MissingApiKey)));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = NarrativeConfig {
            api_key: Some("   ".into()),
            ..NarrativeConfig::default()
        };
        let client = NarrativeClient::new(config).unwrap();
        assert!(!client.is_enabled());
    }

    #[test]
    fn test_error_messages() {
        let server = IntegrationError::ServerError { status: 500, message: "Internal".into() };
        assert!(server.to_string().contains("500"));
        assert!(IntegrationError::Timeout.to_string().contains("timed out"));
    }
}
