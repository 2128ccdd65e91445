//! Boarding-order optimizer and its time-cost model
//!
//! Bookings whose seats lie farthest from the entrance board first, so that
//! passengers boarding later never have to squeeze past someone who is still
//! stowing luggage further forward. The time estimate replays the order one
//! booking at a time:
//!
//! - every booking needs one settle duration to occupy its seats,
//! - a booking waits one extra settle duration if any row in front of its
//!   nearest seat (rows `1..nearest`) is blocked,
//! - once a booking has boarded, rows `1..=farthest` count as blocked for the
//!   rest of the pass.
//!
//! The blocked-row set only grows within one call and is rebuilt per call.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::domain::booking::{Booking, BookingId, MobileNumber};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::seat::SeatId;

/// Seconds a boarding group needs to settle into its seats.
pub const SETTLE_DURATION_SECS: u64 = 60;

/// One booking's place in the proposed boarding order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingEntry {
    /// 1-based position in the sequence
    pub sequence: usize,
    pub booking_id: BookingId,
    pub seats: Vec<SeatId>,
    pub mobile_number: MobileNumber,
}

/// Diagnostics for one booking in a simulated boarding pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingStep {
    pub booking_id: BookingId,
    /// Whether the aisle in front of the booking was blocked
    pub blocked: bool,
    pub wait_seconds: u64,
    /// Offset at which the booking reached the aisle (before any wait)
    pub started_at_seconds: u64,
    /// Offset at which the booking is seated
    pub settled_at_seconds: u64,
}

/// Result of replaying an ordered list of bookings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingEstimate {
    pub total_seconds: u64,
    pub steps: Vec<BoardingStep>,
}

impl BoardingEstimate {
    pub fn blocked_count(&self) -> usize {
        self.steps.iter().filter(|s| s.blocked).count()
    }
}

/// Proposed boarding order with its estimated duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingPlan {
    pub sequence: Vec<BoardingEntry>,
    pub total_time_seconds: u64,
    #[serde(skip)]
    pub steps: Vec<BoardingStep>,
}

impl BoardingPlan {
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Orders bookings for boarding and estimates how long boarding takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardingSequencer {
    settle_seconds: u64,
}

impl Default for BoardingSequencer {
    fn default() -> Self {
        Self {
            settle_seconds: SETTLE_DURATION_SECS,
        }
    }
}

impl BoardingSequencer {
    pub fn new(settle_seconds: u64) -> Self {
        Self { settle_seconds }
    }

    pub fn settle_seconds(&self) -> u64 {
        self.settle_seconds
    }

    /// Sort bookings so the farthest row boards first.
    ///
    /// The sort is stable: bookings sharing the same farthest row keep their
    /// input order. A booking without seats is rejected.
    pub fn order_bookings(&self, mut bookings: Vec<Booking>) -> DomainResult<Vec<Booking>> {
        if let Some(empty) = bookings.iter().find(|b| b.seats.is_empty()) {
            return Err(DomainError::EmptyBooking(empty.id.to_string()));
        }
        bookings.sort_by_key(|b| Reverse(b.farthest_row().unwrap_or(0)));
        Ok(bookings)
    }

    /// Replay `ordered` one booking at a time and sum settle and wait times.
    pub fn estimate_boarding_time(&self, ordered: &[Booking]) -> BoardingEstimate {
        let mut blocked_rows: BTreeSet<u32> = BTreeSet::new();
        let mut total: u64 = 0;
        let mut steps = Vec::with_capacity(ordered.len());

        for booking in ordered {
            let (Some(nearest), Some(farthest)) = (booking.nearest_row(), booking.farthest_row())
            else {
                continue;
            };

            let started_at = total;
            let blocked = blocked_rows.range(1..nearest).next().is_some();
            let wait = if blocked { self.settle_seconds } else { 0 };
            total += wait + self.settle_seconds;

            trace!(
                booking = %booking.id,
                nearest,
                farthest,
                blocked,
                "boarding step"
            );
            blocked_rows.extend(1..=farthest);

            steps.push(BoardingStep {
                booking_id: booking.id.clone(),
                blocked,
                wait_seconds: wait,
                started_at_seconds: started_at,
                settled_at_seconds: total,
            });
        }

        BoardingEstimate {
            total_seconds: total,
            steps,
        }
    }

    /// Order the bookings and estimate the resulting boarding time.
    #[instrument(level = "debug", skip_all, fields(bookings = bookings.len()))]
    pub fn compute_boarding_sequence(&self, bookings: Vec<Booking>) -> DomainResult<BoardingPlan> {
        let ordered = self.order_bookings(bookings)?;
        let estimate = self.estimate_boarding_time(&ordered);
        debug!(
            total_seconds = estimate.total_seconds,
            blocked = estimate.blocked_count(),
            "boarding sequence computed"
        );

        let sequence = ordered
            .into_iter()
            .enumerate()
            .map(|(i, b)| BoardingEntry {
                sequence: i + 1,
                booking_id: b.id,
                seats: b.seats,
                mobile_number: b.mobile_number,
            })
            .collect();

        Ok(BoardingPlan {
            sequence,
            total_time_seconds: estimate.total_seconds,
            steps: estimate.steps,
        })
    }
}
