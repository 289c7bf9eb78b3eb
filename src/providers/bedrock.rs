use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Credentials;
use crate::error::TurnError;
use crate::gateway::{InferenceBackend, InvokeFuture, InvokeRequest};
use crate::model::{Role, Turn};
use crate::providers::http_errors::bedrock_request_error;

#[derive(Debug, Serialize)]
struct InvokeBody<'a> {
    anthropic_version: &'a str,
    max_tokens: u32,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BedrockBackend {
    client: Client,
    credentials: Credentials,
    endpoint_base: String,
    timeout_secs: Option<u64>,
}

impl BedrockBackend {
    pub fn new(client: Client, credentials: Credentials, endpoint_base: impl Into<String>) -> Self {
        Self {
            client,
            credentials,
            endpoint_base: endpoint_base.into(),
            timeout_secs: None,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn invoke_url(&self, model_id: &str) -> String {
        invoke_url(&self.endpoint_base, model_id)
    }

    async fn invoke_model(&self, request: InvokeRequest<'_>) -> Result<String, TurnError> {
        let generation = request.generation;
        let api_url = self.invoke_url(&generation.model_id);
        let body = InvokeBody {
            anthropic_version: &generation.anthropic_version,
            max_tokens: generation.max_tokens,
            messages: to_wire_messages(request.messages),
            temperature: generation.temperature,
            top_p: generation.top_p,
        };
        debug!(
            api_url = %api_url,
            model = %generation.model_id,
            message_count = request.messages.len(),
            "sending bedrock invoke request"
        );

        let response = self
            .client
            .post(&api_url)
            .header(CONTENT_TYPE, "application/json")
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.credentials.bearer_token()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!(
                    api_url = %api_url,
                    model = %generation.model_id,
                    error = %err,
                    "bedrock request failed"
                );
                bedrock_request_error(err, &api_url, self.timeout_secs)
            })?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|err| bedrock_request_error(err, &api_url, self.timeout_secs))?;

        if !status.is_success() {
            warn!(
                api_url = %api_url,
                model = %generation.model_id,
                status = %status,
                response_body_len = response_body.len(),
                "bedrock returned non-success status"
            );
            return Err(TurnError::Status {
                status: status.as_u16(),
                body: response_body,
            });
        }

        let reply = extract_reply(&response_body).inspect_err(|err| {
            warn!(
                model = %generation.model_id,
                error = %err,
                "bedrock response did not contain reply text"
            );
        })?;
        debug!(
            model = %generation.model_id,
            response_len = reply.len(),
            "received bedrock invoke response"
        );
        Ok(reply)
    }
}

impl InferenceBackend for BedrockBackend {
    fn invoke<'a>(&'a self, request: InvokeRequest<'a>) -> InvokeFuture<'a> {
        Box::pin(self.invoke_model(request))
    }
}

fn invoke_url(endpoint_base: &str, model_id: &str) -> String {
    format!(
        "{}/model/{}/invoke",
        endpoint_base.trim_end_matches('/'),
        model_id
    )
}

fn to_wire_messages(messages: &[Turn]) -> Vec<WireMessage<'_>> {
    messages
        .iter()
        .map(|turn| WireMessage {
            role: turn.role,
            content: &turn.content,
        })
        .collect()
}

fn extract_reply(response_body: &str) -> Result<String, TurnError> {
    let parsed: InvokeResponse =
        serde_json::from_str(response_body).map_err(|err| TurnError::MalformedResponse {
            detail: format!("failed to parse response body: {err}"),
        })?;

    parsed
        .content
        .into_iter()
        .next()
        .ok_or_else(|| TurnError::MalformedResponse {
            detail: "response has no content blocks".to_string(),
        })?
        .text
        .ok_or_else(|| TurnError::MalformedResponse {
            detail: "first content block has no text".to_string(),
        })
}
