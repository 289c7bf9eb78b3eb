use std::env;
use std::fmt;

use crate::error::ConfigurationError;
use crate::model::DEFAULT_MODEL_ID;

pub const DEFAULT_REGION: &str = "ap-south-1";

#[derive(Clone)]
pub struct Config {
    pub bearer_token: Option<String>,
    pub region: String,
    pub model_id: String,
    pub endpoint_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    pub fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            bearer_token: get_var("AWS_BEARER_TOKEN_BEDROCK"),
            region: parse_region(get_var("AWS_REGION").as_deref()),
            model_id: non_blank(get_var("BEDROCK_MODEL_ID").as_deref())
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            endpoint_url: non_blank(get_var("BEDROCK_ENDPOINT_URL").as_deref())
                .map(|url| url.trim_end_matches('/').to_string()),
            timeout_secs: parse_timeout_secs(get_var("BEDROCK_TIMEOUT_SECS").as_deref()),
        }
    }

    pub fn credentials(&self) -> Result<Credentials, ConfigurationError> {
        Credentials::new(self.bearer_token.as_deref(), Some(self.region.as_str()))
    }

    pub fn endpoint_base(&self) -> String {
        match &self.endpoint_url {
            Some(url) => url.clone(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "<redacted>"),
            )
            .field("region", &self.region)
            .field("model_id", &self.model_id)
            .field("endpoint_url", &self.endpoint_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    bearer_token: String,
    region: String,
}

impl Credentials {
    pub fn new(bearer_token: Option<&str>, region: Option<&str>) -> Result<Self, ConfigurationError> {
        let bearer_token = bearer_token
            .filter(|token| !token.is_empty())
            .ok_or(ConfigurationError::MissingBearerToken)?;

        Ok(Self {
            bearer_token: bearer_token.to_string(),
            region: parse_region(region),
        })
    }

    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_region(raw: Option<&str>) -> String {
    non_blank(raw).unwrap_or_else(|| DEFAULT_REGION.to_string())
}

fn parse_timeout_secs(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
}
