//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (BookingRepository, Clock)
//! but are themselves concrete structs, not traits.

mod boarding;
mod booking;

pub use boarding::BoardingService;
pub use booking::{BookingService, ListedBooking, NewBooking, SeatStatus};
