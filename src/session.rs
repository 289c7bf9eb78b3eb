use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ConfigurationError, TurnError};
use crate::gateway::{InferenceBackend, InvokeRequest};
use crate::model::{GenerationConfig, Turn};
use crate::providers::bedrock::BedrockBackend;

/// A linear conversation with one model.
///
/// The full transcript is resent on every turn. A user turn is recorded even
/// when the request for it fails, so it stays part of every later request
/// until [`ConversationSession::reset`] is called.
///
/// Turns are taken through `&mut self`; sharing a session between threads
/// needs outside synchronization and is not supported.
pub struct ConversationSession<B = BedrockBackend> {
    backend: B,
    generation: GenerationConfig,
    transcript: Vec<Turn>,
}

impl ConversationSession<BedrockBackend> {
    pub fn new(client: Client, cfg: &Config) -> Result<Self, ConfigurationError> {
        let credentials = cfg.credentials()?;
        let backend = BedrockBackend::new(client, credentials, cfg.endpoint_base())
            .with_timeout_secs(cfg.timeout_secs);
        info!(
            region = %backend.credentials().region(),
            model = %cfg.model_id,
            "conversation session ready"
        );
        Ok(Self::with_backend(
            backend,
            GenerationConfig::for_model(cfg.model_id.clone()),
        ))
    }
}

impl<B> ConversationSession<B>
where
    B: InferenceBackend,
{
    pub fn with_backend(backend: B, generation: GenerationConfig) -> Self {
        Self {
            backend,
            generation,
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn generation(&self) -> &GenerationConfig {
        &self.generation
    }

    pub fn reset(&mut self) {
        debug!(
            cleared_turns = self.transcript.len(),
            "conversation transcript reset"
        );
        self.transcript.clear();
    }

    pub async fn send_turn(&mut self, user_text: &str) -> Result<String, TurnError> {
        self.transcript.push(Turn::user(user_text));

        let request = InvokeRequest {
            generation: &self.generation,
            messages: &self.transcript,
        };
        let outcome = self.backend.invoke(request).await;
        match outcome {
            Ok(reply) => {
                self.transcript.push(Turn::assistant(reply.clone()));
                debug!(
                    transcript_len = self.transcript.len(),
                    "turn completed"
                );
                Ok(reply)
            }
            Err(err) => {
                warn!(
                    kind = err.kind(),
                    transcript_len = self.transcript.len(),
                    error = %err,
                    "turn failed"
                );
                Err(err)
            }
        }
    }
}
