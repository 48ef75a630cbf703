use async_trait::async_trait;

use crate::error::Result;
use crate::models::{GenerationRequest, GenerationResponse};

/// The remote generation endpoint, seen as an opaque collaborator. One
/// call per generation cycle; the controller never talks HTTP directly.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}
