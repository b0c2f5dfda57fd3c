use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the planner and its boundary parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("food {0} is not in the catalog")]
    InvalidFoodReference(i64),
    #[error("unknown meal slot: {0:?}")]
    InvalidSlotReference(String),
    #[error("invalid occurrence id: {0:?}")]
    InvalidOccurrenceReference(String),
    #[error("session {0} not found")]
    UnknownSession(Uuid),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
