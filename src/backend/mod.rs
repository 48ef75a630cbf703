pub mod http;
pub mod traits;

pub use http::{HttpBackend, FALLBACK_FAILURE_MESSAGE};
pub use traits::GenerationBackend;
