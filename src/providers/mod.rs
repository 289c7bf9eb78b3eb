pub mod bedrock;
pub(crate) mod http_errors;
