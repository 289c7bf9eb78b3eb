use std::error::Error as StdError;
use std::io::ErrorKind;

use crate::error::TurnError;

fn error_chain_has_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == ErrorKind::ConnectionRefused
        {
            return true;
        }

        if source
            .to_string()
            .to_ascii_lowercase()
            .contains("connection refused")
        {
            return true;
        }

        current = source.source();
    }

    false
}

fn error_chain_has_timeout(err: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == ErrorKind::TimedOut
        {
            return true;
        }

        if source
            .to_string()
            .to_ascii_lowercase()
            .contains("timed out")
        {
            return true;
        }

        current = source.source();
    }

    false
}

fn transport(detail: String) -> TurnError {
    TurnError::Transport { detail }
}

pub(crate) fn bedrock_request_error(
    err: reqwest::Error,
    api_url: &str,
    timeout_secs: Option<u64>,
) -> TurnError {
    if err.is_timeout() || error_chain_has_timeout(&err) {
        let elapsed = timeout_secs
            .map(|secs| format!(" after {secs}s"))
            .unwrap_or_default();
        return transport(format!(
            "Model request timed out{elapsed} while calling '{api_url}'. \
             Increase BEDROCK_TIMEOUT_SECS or check network connectivity."
        ));
    }

    if err.is_connect() {
        if error_chain_has_connection_refused(&err) {
            return transport(format!(
                "Connection refused by Bedrock endpoint at '{api_url}'. \
                 Check BEDROCK_ENDPOINT_URL."
            ));
        }

        return transport(format!(
            "Failed to connect to Bedrock endpoint at '{api_url}'. \
             Check AWS_REGION and network connectivity."
        ));
    }

    transport(format!("Failed to call Bedrock endpoint at '{api_url}': {err}"))
}
