//! Error types for the DayToken library

use thiserror::Error;

use crate::authorize::AuthorizationDecision;

pub type Result<T> = std::result::Result<T, DayTokenError>;

#[derive(Error, Debug)]
pub enum DayTokenError {
    #[error("Invalid tick: elapsed time {0} is malformed")]
    InvalidTick(f64),

    #[error("Token generation unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("Operation already decided: {decision}")]
    AlreadyDecided {
        /// The terminal decision already standing on the operation
        decision: AuthorizationDecision,
    },

    #[error("Engine has not been started")]
    NotStarted,

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("Identifier already enrolled: {0}")]
    AlreadyEnrolled(String),

    #[error("Identifier not enrolled: {0}")]
    NotEnrolled(String),
}
