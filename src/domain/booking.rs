//! Bookings and the rules a booking request must satisfy

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::layout::SeatLayout;
use crate::domain::seat::SeatId;

/// Travel dates are plain calendar days.
pub type TravelDate = NaiveDate;

/// Parse `YYYY-MM-DD`.
pub fn parse_travel_date(input: &str) -> DomainResult<TravelDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(input.to_string()))
}

/// Short booking reference, e.g. `3F9A0C1B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// First 8 hex digits of a random v4 UUID, uppercased.
    pub fn generate() -> Self {
        let simple = Uuid::new_v4().simple().to_string();
        Self(simple[..8].to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BookingId {
    /// References are matched case-insensitively, stored uppercase.
    fn from(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Passenger contact number: exactly ten digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

fn mobile_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("valid mobile pattern"))
}

impl MobileNumber {
    pub fn parse(input: &str) -> DomainResult<Self> {
        if mobile_pattern().is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(DomainError::InvalidMobile(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MobileNumber> for String {
    fn from(mobile: MobileNumber) -> Self {
        mobile.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reservation of one or more seats on a travel date.
///
/// Seats within one booking board together as a single unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub travel_date: TravelDate,
    pub mobile_number: MobileNumber,
    pub seats: Vec<SeatId>,
    pub booked_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub boarded: bool,
    #[serde(default)]
    pub boarding_time: Option<DateTime<Utc>>,
}

impl Booking {
    /// Row farthest from the entrance, `None` for a seatless booking.
    pub fn farthest_row(&self) -> Option<u32> {
        self.seats.iter().map(SeatId::row).max()
    }

    /// Row nearest to the entrance, `None` for a seatless booking.
    pub fn nearest_row(&self) -> Option<u32> {
        self.seats.iter().map(SeatId::row).min()
    }

    pub fn seat_labels(&self) -> Vec<String> {
        self.seats.iter().map(ToString::to_string).collect()
    }
}

/// Parse a list of seat identifiers, failing on the first malformed one.
pub fn parse_seats<S: AsRef<str>>(inputs: &[S]) -> DomainResult<Vec<SeatId>> {
    inputs.iter().map(|s| SeatId::parse(s.as_ref())).collect()
}

/// Limits applied to booking requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    pub max_seats_per_booking: usize,
    pub daily_seat_limit: usize,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            max_seats_per_booking: 6,
            daily_seat_limit: 6,
        }
    }
}

impl BookingPolicy {
    /// Validate a seat request against the bookings already held for the date.
    ///
    /// `same_date` must contain only bookings for the request's travel date.
    /// `replacing` names a booking whose current seats are being replaced; its
    /// seats count neither as conflicts nor toward the daily limit.
    pub fn check_request(
        &self,
        layout: &SeatLayout,
        mobile: &MobileNumber,
        requested: &[SeatId],
        same_date: &[Booking],
        replacing: Option<&BookingId>,
    ) -> DomainResult<()> {
        if requested.is_empty() {
            return Err(DomainError::NoSeatsSelected);
        }
        if requested.len() > self.max_seats_per_booking {
            return Err(DomainError::TooManySeats {
                count: requested.len(),
                max: self.max_seats_per_booking,
            });
        }

        let mut seen = HashSet::new();
        for seat in requested {
            if !seen.insert(*seat) {
                return Err(DomainError::DuplicateSeat(seat.to_string()));
            }
        }

        if let Some(unknown) = requested.iter().find(|s| !layout.contains(s)) {
            return Err(DomainError::UnknownSeat(unknown.to_string()));
        }

        let others = || {
            same_date
                .iter()
                .filter(move |b| replacing.map_or(true, |id| &b.id != id))
        };

        let already: usize = others()
            .filter(|b| &b.mobile_number == mobile)
            .map(|b| b.seats.len())
            .sum();
        if already + requested.len() > self.daily_seat_limit {
            return Err(DomainError::DailyLimitExceeded {
                already,
                requested: requested.len(),
                limit: self.daily_seat_limit,
            });
        }

        let taken: HashSet<SeatId> = others().flat_map(|b| b.seats.iter().copied()).collect();
        let conflicts: Vec<String> = requested
            .iter()
            .filter(|s| taken.contains(*s))
            .map(ToString::to_string)
            .collect();
        if !conflicts.is_empty() {
            return Err(DomainError::SeatsAlreadyBooked(conflicts));
        }

        Ok(())
    }
}
