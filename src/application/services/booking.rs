//! Booking service
//!
//! Seat reservations, seat changes, boarding flags and per-date seat maps.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    parse_seats, Booking, BookingId, BookingPolicy, MobileNumber, SeatId, SeatLayout, TravelDate,
};
use crate::infrastructure::traits::{BookingRepository, Clock};

/// Request to reserve seats.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub travel_date: TravelDate,
    pub mobile_number: String,
    pub seats: Vec<String>,
}

/// A booking together with its 1-based position in the day's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedBooking {
    pub sequence: usize,
    #[serde(flatten)]
    pub booking: Booking,
}

/// Occupancy of one seat on a travel date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatStatus {
    pub seat: SeatId,
    pub booking_id: Option<BookingId>,
}

impl SeatStatus {
    pub fn is_booked(&self) -> bool {
        self.booking_id.is_some()
    }
}

/// Service for creating and maintaining bookings.
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    layout: SeatLayout,
    policy: BookingPolicy,
}

impl BookingService {
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
        layout: SeatLayout,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            repo,
            clock,
            layout,
            policy,
        }
    }

    fn bookings_on(&self, date: TravelDate) -> ApplicationResult<Vec<Booking>> {
        self.repo
            .list_by_date(date)
            .with_context(|| format!("list bookings for {date}"))
    }

    fn find(&self, id: &BookingId) -> ApplicationResult<Booking> {
        self.repo
            .get(id)
            .with_context(|| format!("look up booking {id}"))?
            .ok_or_else(|| ApplicationError::BookingNotFound(id.to_string()))
    }

    /// Reserve seats for a passenger.
    #[instrument(level = "debug", skip(self), fields(date = %request.travel_date))]
    pub fn create(&self, request: NewBooking) -> ApplicationResult<Booking> {
        let mobile = MobileNumber::parse(&request.mobile_number)?;
        let seats = parse_seats(&request.seats)?;
        let same_date = self.bookings_on(request.travel_date)?;
        self.policy
            .check_request(&self.layout, &mobile, &seats, &same_date, None)?;

        let booking = Booking {
            id: BookingId::generate(),
            travel_date: request.travel_date,
            mobile_number: mobile,
            seats,
            booked_at: self.clock.now(),
            updated_at: None,
            boarded: false,
            boarding_time: None,
        };
        self.repo
            .create(booking.clone())
            .with_context(|| format!("store booking {}", booking.id))?;

        info!(id = %booking.id, seats = ?booking.seat_labels(), "booking confirmed");
        Ok(booking)
    }

    /// Replace the seats of an existing booking.
    #[instrument(level = "debug", skip(self))]
    pub fn update_seats(&self, id: &BookingId, seats: &[String]) -> ApplicationResult<Booking> {
        let mut booking = self.find(id)?;
        let requested = parse_seats(seats)?;
        let same_date = self.bookings_on(booking.travel_date)?;
        self.policy.check_request(
            &self.layout,
            &booking.mobile_number,
            &requested,
            &same_date,
            Some(&booking.id),
        )?;

        debug!(from = ?booking.seat_labels(), "replacing seats");
        booking.seats = requested;
        booking.updated_at = Some(self.clock.now());
        self.repo
            .update(booking.clone())
            .with_context(|| format!("update booking {id}"))?;

        info!(id = %booking.id, seats = ?booking.seat_labels(), "booking updated");
        Ok(booking)
    }

    /// Flag the passengers of a booking as boarded.
    #[instrument(level = "debug", skip(self))]
    pub fn mark_boarded(&self, id: &BookingId) -> ApplicationResult<Booking> {
        let booking = self
            .repo
            .mark_boarded(id, self.clock.now())
            .with_context(|| format!("mark booking {id} boarded"))?
            .ok_or_else(|| ApplicationError::BookingNotFound(id.to_string()))?;
        info!(id = %booking.id, "passenger boarded");
        Ok(booking)
    }

    /// All bookings for a date, numbered in creation order.
    pub fn list_for_date(&self, date: TravelDate) -> ApplicationResult<Vec<ListedBooking>> {
        Ok(self
            .bookings_on(date)?
            .into_iter()
            .enumerate()
            .map(|(i, booking)| ListedBooking {
                sequence: i + 1,
                booking,
            })
            .collect())
    }

    /// Every seat of the layout with its occupant on `date`, if any.
    pub fn seat_map(&self, date: TravelDate) -> ApplicationResult<Vec<SeatStatus>> {
        let held: HashMap<SeatId, BookingId> = self
            .bookings_on(date)?
            .into_iter()
            .flat_map(|b| {
                let id = b.id;
                b.seats.into_iter().map(move |s| (s, id.clone()))
            })
            .collect();

        Ok(self
            .layout
            .seats()
            .into_iter()
            .map(|seat| SeatStatus {
                booking_id: held.get(&seat).cloned(),
                seat,
            })
            .collect())
    }
}
