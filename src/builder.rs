use crate::models::{GenerationRequest, ImageSize, ProviderChoice};

/// Collects the user's selections into a wire-ready [`GenerationRequest`].
///
/// The prompt is forwarded exactly as entered: no trimming, no length
/// checks, empty text included. Prompt policy belongs to the endpoint.
/// Size and provider are closed selectors, so building cannot fail.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    prompt: String,
    size: ImageSize,
    provider: ProviderChoice,
}

impl RequestBuilder {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            size: ImageSize::default(),
            provider: ProviderChoice::default(),
        }
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_provider(mut self, provider: ProviderChoice) -> Self {
        self.provider = provider;
        self
    }

    /// One size selection drives both dimensions; `Auto` becomes an
    /// absent provider field.
    pub fn build(self) -> GenerationRequest {
        let pixels = self.size.pixels();
        GenerationRequest {
            prompt: self.prompt,
            width: pixels,
            height: pixels,
            provider: self.provider.into_field(),
        }
    }
}
