use std::future::Future;
use std::pin::Pin;

use crate::error::TurnError;
use crate::model::{GenerationConfig, Turn};

#[derive(Debug, Clone, Copy)]
pub struct InvokeRequest<'a> {
    pub generation: &'a GenerationConfig,
    pub messages: &'a [Turn],
}

pub type InvokeFuture<'a> = Pin<Box<dyn Future<Output = Result<String, TurnError>> + 'a>>;

pub trait InferenceBackend {
    fn invoke<'a>(&'a self, request: InvokeRequest<'a>) -> InvokeFuture<'a>;
}
