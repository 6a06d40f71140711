//! Request State Module
//!
//! Mutable state behind the orchestrator and the read-only view it publishes.

use tokio_util::sync::CancellationToken;

use crate::models::ImageRecord;

// == Images View ==
/// What presentational code consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagesView {
    pub images: Vec<ImageRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

// == Request State ==
/// Orchestration state. `active` is set while a fetch is in flight.
#[derive(Debug, Default)]
pub struct RequestState {
    pub results: Vec<ImageRecord>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    active: Option<ActiveRequest>,
}

#[derive(Debug)]
struct ActiveRequest {
    id: u64,
    cancel: CancellationToken,
}

impl RequestState {
    pub fn with_results(results: Vec<ImageRecord>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn view(&self) -> ImagesView {
        ImagesView {
            images: self.results.clone(),
            loading: self.is_loading,
            error: self.last_error.clone(),
        }
    }

    /// Whether request `id` still owns the state.
    pub fn is_current(&self, id: u64) -> bool {
        self.active.as_ref().is_some_and(|a| a.id == id)
    }

    /// Enters Loading for request `id`, cancelling whatever it supersedes.
    pub fn begin(&mut self, id: u64) -> CancellationToken {
        self.cancel_active();
        let cancel = CancellationToken::new();
        self.active = Some(ActiveRequest {
            id,
            cancel: cancel.clone(),
        });
        self.is_loading = true;
        self.last_error = None;
        cancel
    }

    /// Serves `images` without a network round trip; supersedes any
    /// in-flight request.
    pub fn apply_cached(&mut self, images: Vec<ImageRecord>) {
        self.cancel_active();
        self.results = images;
        self.is_loading = false;
        self.last_error = None;
    }

    pub fn succeed(&mut self, images: Vec<ImageRecord>) {
        self.active = None;
        self.results = images;
        self.is_loading = false;
    }

    /// Terminal failure: the error replaces the results.
    pub fn fail(&mut self, message: String) {
        self.active = None;
        self.results.clear();
        self.last_error = Some(message);
        self.is_loading = false;
    }

    fn cancel_active(&mut self) {
        if let Some(previous) = self.active.take() {
            previous.cancel.cancel();
        }
    }
}
