//! Error types for the event registration core.
//!
//! All conditions here are local and recoverable: the surrounding glue
//! translates them into user-visible messages, the core only keeps them
//! distinguishable.

use crate::types::EventId;
use thiserror::Error;

/// Why a registration was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// No event has this id
    #[error("event {0} not found")]
    NotFound(EventId),

    /// The event is not upcoming (past-dated)
    #[error("event {0} is not available")]
    Unavailable(EventId),

    /// No seats left
    #[error("event {0} has no seats left")]
    SoldOut(EventId),
}

/// A category string outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event category: {0}")]
pub struct UnknownCategory(pub String);

/// Why a portal action was rejected
///
/// Registration failures keep their own kind; submissions rejected by form
/// validation carry the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    /// A registration attempt failed
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// An event submission failed validation
    #[error("invalid event: {0}")]
    InvalidEvent(String),
}
