//! State of the current submit-to-resolution cycle.

use super::types::{ApiError, EchoResponse};

/// Exactly one of these holds at any time. A new cycle moves to `Loading`
/// and settles into `Success` or `Failure`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CycleState {
    #[default]
    Idle,
    Loading,
    Success(EchoResponse),
    Failure(ApiError),
}

impl CycleState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CycleState::Loading)
    }

    /// The state a transport result settles into.
    pub fn settled(result: Result<EchoResponse, ApiError>) -> Self {
        match result {
            Ok(response) => CycleState::Success(response),
            Err(error) => CycleState::Failure(error),
        }
    }
}
