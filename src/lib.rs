pub mod backend;
pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod logger;
pub mod models;

pub use backend::{GenerationBackend, HttpBackend, FALLBACK_FAILURE_MESSAGE};
pub use builder::RequestBuilder;
pub use config::BackendConfig;
pub use controller::{CycleId, GenerationController, GenerationState};
pub use error::{GenerationError, Result};
pub use models::*;
