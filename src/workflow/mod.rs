//! Analysis Workflow
//!
//! State machine for the single in-flight analysis request. Replaces the
//! usual loading/error boolean pair with one sum type, so "loading with an
//! error showing" is unrepresentable. Each accepted submission gets a
//! token; completions carrying a stale token are ignored, which keeps a
//! late callback from overwriting state that has already moved on.

use tracing::{debug, warn};

use crate::models::AnalysisResult;

/// Identifies one accepted submission. Monotonically increasing within a
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Lifecycle of the session's analysis request.
#[derive(Debug, Clone)]
pub enum WorkflowState {
    /// No request yet, or reset back to the form.
    Idle,
    /// Request in flight; no second submission is accepted.
    Submitting(RequestToken),
    /// Result available for presentation.
    Succeeded(Box<AnalysisResult>),
    /// Request failed; the message is shown verbatim and retry is allowed.
    Failed(String),
}

/// Owns the [`WorkflowState`] and enforces its transitions. One instance
/// per session, owned by the top-level controller.
#[derive(Debug)]
pub struct AnalysisWorkflow {
    state: WorkflowState,
    next_token: u64,
}

impl AnalysisWorkflow {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
            next_token: 0,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, WorkflowState::Submitting(_))
    }

    /// Current result, if any.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            WorkflowState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Current error message, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Begin a submission. Allowed from `Idle` and `Failed` (clearing the
    /// previous error); rejected while a request is already in flight or a
    /// result is being presented. Returns the token the caller must hand
    /// back with the completion.
    pub fn submit(&mut self) -> Option<RequestToken> {
        match self.state {
            WorkflowState::Idle | WorkflowState::Failed(_) => {
                let token = RequestToken(self.next_token);
                self.next_token += 1;
                self.state = WorkflowState::Submitting(token);
                debug!("analysis request {} submitted", token.0);
                Some(token)
            }
            WorkflowState::Submitting(_) | WorkflowState::Succeeded(_) => None,
        }
    }

    /// Deliver a successful completion. Returns false when the token no
    /// longer matches the in-flight request.
    pub fn complete(&mut self, token: RequestToken, result: AnalysisResult) -> bool {
        if !self.accepts(token) {
            warn!("ignoring stale analysis completion for request {}", token.0);
            return false;
        }
        self.state = WorkflowState::Succeeded(Box::new(result));
        true
    }

    /// Deliver a failed completion. Same staleness rule as [`complete`].
    ///
    /// [`complete`]: AnalysisWorkflow::complete
    pub fn fail(&mut self, token: RequestToken, message: String) -> bool {
        if !self.accepts(token) {
            warn!("ignoring stale analysis failure for request {}", token.0);
            return false;
        }
        self.state = WorkflowState::Failed(message);
        true
    }

    /// Return to the form, discarding any result or error.
    pub fn reset(&mut self) {
        self.state = WorkflowState::Idle;
    }

    fn accepts(&self, token: RequestToken) -> bool {
        matches!(self.state, WorkflowState::Submitting(current) if current == token)
    }
}

impl Default for AnalysisWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
