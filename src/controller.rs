use std::sync::Arc;

use crate::backend::GenerationBackend;
use crate::error::Result;
use crate::models::{GeneratedImage, GenerationRequest, GenerationResponse};

/// Identifies one submission cycle. Completions carrying a superseded id
/// are discarded, so a slow response can never overwrite newer state.
pub type CycleId = u64;

/// The one live value describing the generation lifecycle. Replaced
/// wholesale on every transition; an image and a failure message can
/// never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationState {
    /// No request in flight, nothing generated yet.
    Idle,
    /// A request is outstanding. Prior results are already cleared.
    Pending,
    /// The endpoint produced an image. `note` is advisory text shown
    /// alongside it, not an error.
    Succeeded {
        image: GeneratedImage,
        note: Option<String>,
    },
    /// The cycle failed; `message` is ready for display as-is.
    Failed { message: String },
}

impl GenerationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GenerationState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, GenerationState::Pending)
    }

    pub fn image(&self) -> Option<&GeneratedImage> {
        match self {
            GenerationState::Succeeded { image, .. } => Some(image),
            _ => None,
        }
    }

    pub fn note(&self) -> Option<&str> {
        match self {
            GenerationState::Succeeded { note, .. } => note.as_deref(),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            GenerationState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

impl Default for GenerationState {
    fn default() -> Self {
        GenerationState::Idle
    }
}

/// Owns the lifecycle state machine and the single outbound call per
/// cycle. Succeeded and Failed are resting states; the last result stays
/// visible until the next submission replaces it.
pub struct GenerationController {
    backend: Arc<dyn GenerationBackend>,
    state: GenerationState,
    cycle: CycleId,
}

impl GenerationController {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            state: GenerationState::Idle,
            cycle: 0,
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Submission event. Clears whatever the previous cycle left behind
    /// and enters Pending; the returned id ties the eventual completion
    /// back to this cycle.
    pub fn begin_cycle(&mut self) -> CycleId {
        self.cycle += 1;
        self.state = GenerationState::Pending;
        log::debug!("Generation cycle {} started", self.cycle);
        self.cycle
    }

    /// Applies the outcome of the remote call for cycle `id`. Outcomes
    /// for superseded cycles are dropped without touching the state.
    pub fn complete_cycle(&mut self, id: CycleId, outcome: Result<GenerationResponse>) {
        if id != self.cycle {
            log::debug!(
                "Discarding stale outcome for cycle {} (current is {})",
                id,
                self.cycle
            );
            return;
        }

        self.state = match outcome {
            Ok(response) => {
                if let Some(note) = &response.note {
                    log::info!("Generation cycle {} succeeded with note: {}", id, note);
                } else {
                    log::info!("Generation cycle {} succeeded", id);
                }
                GenerationState::Succeeded {
                    image: GeneratedImage::from_base64(&response.image_b64),
                    note: response.note,
                }
            }
            Err(err) => {
                let message = err.to_string();
                log::warn!("Generation cycle {} failed: {}", id, message);
                GenerationState::Failed { message }
            }
        };
    }

    /// Runs one full cycle: Pending, exactly one backend call, then the
    /// resulting Succeeded or Failed state.
    pub async fn submit(&mut self, request: GenerationRequest) -> &GenerationState {
        let id = self.begin_cycle();
        let outcome = self.backend.generate(&request).await;
        self.complete_cycle(id, outcome);
        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RequestBuilder;
    use crate::error::GenerationError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Returns queued outcomes in order, recording how often it was hit.
    struct ScriptedBackend {
        outcomes: Mutex<VecDeque<Result<GenerationResponse>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedBackend {
        fn new(outcomes: Vec<Result<GenerationResponse>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(0),
            })
        }

        fn call_count(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate(&self, _request: &GenerationRequest) -> Result<GenerationResponse> {
            *self.calls.lock().unwrap() += 1;
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted backend ran out of outcomes")
        }
    }

    fn success(image_b64: &str, note: Option<&str>) -> Result<GenerationResponse> {
        Ok(GenerationResponse {
            image_b64: image_b64.to_string(),
            note: note.map(String::from),
        })
    }

    fn request() -> GenerationRequest {
        RequestBuilder::new("a watercolor landscape").build()
    }

    #[test]
    fn test_starts_idle() {
        let controller = GenerationController::new(ScriptedBackend::new(vec![]));
        assert!(controller.state().is_idle());
    }

    #[test]
    fn test_submission_clears_previous_result() {
        let backend = ScriptedBackend::new(vec![]);
        let mut controller = GenerationController::new(backend);

        let id = controller.begin_cycle();
        controller.complete_cycle(id, success("QUJD", Some("demo mode")));
        assert!(controller.state().image().is_some());

        controller.begin_cycle();
        let state = controller.state();
        assert!(state.is_pending());
        assert!(state.image().is_none());
        assert!(state.note().is_none());
        assert!(state.failure().is_none());
    }

    #[tokio::test]
    async fn test_success_yields_prefixed_image() {
        let backend = ScriptedBackend::new(vec![success("QUJD", None)]);
        let mut controller = GenerationController::new(backend.clone());

        let state = controller.submit(request()).await;
        assert_eq!(
            state.image().unwrap().as_data_uri(),
            "data:image/png;base64,QUJD"
        );
        assert!(state.note().is_none());
        assert!(state.failure().is_none());
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_note_overlays_successful_result() {
        let backend = ScriptedBackend::new(vec![success("QUJD", Some("demo mode"))]);
        let mut controller = GenerationController::new(backend);

        let state = controller.submit(request()).await;
        assert!(state.image().is_some());
        assert_eq!(state.note(), Some("demo mode"));
        assert!(state.failure().is_none());
    }

    #[tokio::test]
    async fn test_service_failure_shows_body_verbatim() {
        let backend = ScriptedBackend::new(vec![Err(GenerationError::Service(
            "provider unavailable".to_string(),
        ))]);
        let mut controller = GenerationController::new(backend);

        let state = controller.submit(request()).await;
        assert_eq!(state.failure(), Some("provider unavailable"));
        assert!(state.image().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_failed() {
        let backend = ScriptedBackend::new(vec![Err(GenerationError::Transport(
            "connection refused".to_string(),
        ))]);
        let mut controller = GenerationController::new(backend);

        let state = controller.submit(request()).await;
        assert_eq!(state.failure(), Some("Request error: connection refused"));
    }

    #[tokio::test]
    async fn test_sequential_cycles_are_independent() {
        let backend = ScriptedBackend::new(vec![
            success("QUJD", Some("demo mode")),
            success("QUJD", None),
        ]);
        let mut controller = GenerationController::new(backend.clone());

        controller.submit(request()).await;
        assert_eq!(controller.state().note(), Some("demo mode"));

        let state = controller.submit(request()).await;
        assert!(state.image().is_some());
        assert!(state.note().is_none());
        assert!(state.failure().is_none());
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_then_success_leaves_no_residue() {
        let backend = ScriptedBackend::new(vec![
            Err(GenerationError::Service("provider unavailable".to_string())),
            success("QUJD", None),
        ]);
        let mut controller = GenerationController::new(backend);

        controller.submit(request()).await;
        assert!(controller.state().failure().is_some());

        let state = controller.submit(request()).await;
        assert!(state.failure().is_none());
        assert!(state.image().is_some());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let backend = ScriptedBackend::new(vec![]);
        let mut controller = GenerationController::new(backend);

        let first = controller.begin_cycle();
        let second = controller.begin_cycle();

        controller.complete_cycle(first, success("U1RBTEU=", None));
        assert!(controller.state().is_pending());

        controller.complete_cycle(second, success("QUJD", None));
        assert_eq!(
            controller.state().image().unwrap().as_data_uri(),
            "data:image/png;base64,QUJD"
        );
    }

    #[test]
    fn test_stale_failure_cannot_overwrite_newer_result() {
        let backend = ScriptedBackend::new(vec![]);
        let mut controller = GenerationController::new(backend);

        let first = controller.begin_cycle();
        let second = controller.begin_cycle();
        controller.complete_cycle(second, success("QUJD", None));

        controller.complete_cycle(first, Err(GenerationError::Service("too late".to_string())));
        assert!(controller.state().failure().is_none());
        assert!(controller.state().image().is_some());
    }
}
