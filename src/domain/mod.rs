//! Domain layer: seats, bookings and the boarding sequencer
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod booking;
pub mod error;
pub mod layout;
pub mod seat;
pub mod sequencer;

pub use booking::{
    parse_seats, parse_travel_date, Booking, BookingId, BookingPolicy, MobileNumber, TravelDate,
};
pub use error::{DomainError, DomainResult};
pub use layout::{SeatLayout, DEFAULT_ROWS, MAX_ROWS, SEATS_PER_ROW};
pub use seat::{SeatId, SeatLetter};
pub use sequencer::{
    BoardingEntry, BoardingEstimate, BoardingPlan, BoardingSequencer, BoardingStep,
    SETTLE_DURATION_SECS,
};
