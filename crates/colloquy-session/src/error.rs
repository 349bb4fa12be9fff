use thiserror::Error;

use colloquy_client::ApiError;
use colloquy_types::Plan;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A run is already in flight for this session; the run slot is taken
    #[error("a run is already in progress")]
    Busy,

    #[error("attachment upload failed: {0}")]
    Upload(#[source] ApiError),

    #[error("message submission failed: {0}")]
    Submission(#[source] ApiError),

    #[error("could not load conversation history: {0}")]
    History(#[source] ApiError),

    #[error("assistant limit reached ({limit}) for the {plan:?} plan")]
    PlanLimit { plan: Plan, limit: usize },

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
