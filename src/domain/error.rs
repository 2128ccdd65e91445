//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid seat '{input}': {reason}")]
    InvalidSeat { input: String, reason: String },

    #[error("invalid mobile number '{0}': expected 10 digits")]
    InvalidMobile(String),

    #[error("invalid travel date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("booking {0} has no seats")]
    EmptyBooking(String),

    #[error("at least one seat must be selected")]
    NoSeatsSelected,

    #[error("maximum {max} seats per booking, got {count}")]
    TooManySeats { count: usize, max: usize },

    #[error("seat selected more than once: {0}")]
    DuplicateSeat(String),

    #[error("invalid seat: {0}")]
    UnknownSeat(String),

    #[error("seats already booked: {}", .0.join(", "))]
    SeatsAlreadyBooked(Vec<String>),

    #[error(
        "daily limit exceeded: {already} seats already booked for this date, \
         {requested} requested, maximum is {limit} per day"
    )]
    DailyLimitExceeded {
        already: usize,
        requested: usize,
        limit: usize,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
