//! Seat layout of the bus

use crate::domain::seat::{SeatId, SeatLetter};

/// Default number of rows on the route's bus.
pub const DEFAULT_ROWS: u32 = 15;

/// Highest row count a layout may be configured with.
pub const MAX_ROWS: u32 = 99;

/// 2x2 seating: A B | aisle | C D.
pub const SEATS_PER_ROW: u32 = 4;

/// The single bus served by the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLayout {
    rows: u32,
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self { rows: DEFAULT_ROWS }
    }
}

impl SeatLayout {
    pub fn new(rows: u32) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn capacity(&self) -> u64 {
        u64::from(self.rows) * u64::from(SEATS_PER_ROW)
    }

    /// Whether the seat physically exists on this bus.
    pub fn contains(&self, seat: &SeatId) -> bool {
        seat.row() <= self.rows
    }

    /// All seats, front to back, left to right.
    pub fn seats(&self) -> Vec<SeatId> {
        (1..=self.rows)
            .flat_map(|row| {
                SeatLetter::ALL
                    .iter()
                    .filter_map(move |&letter| SeatId::new(letter, row).ok())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_layout_then_has_sixty_seats() {
        let layout = SeatLayout::default();
        assert_eq!(layout.capacity(), 60);
        assert_eq!(layout.seats().len(), 60);
    }

    #[test]
    fn given_largest_row_count_then_capacity_does_not_overflow() {
        assert_eq!(SeatLayout::new(u32::MAX).capacity(), 4 * u64::from(u32::MAX));
    }

    #[test]
    fn given_layout_when_listing_seats_then_row_major_from_front() {
        let seats = SeatLayout::new(2).seats();
        let rendered: Vec<String> = seats.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["A1", "B1", "C1", "D1", "A2", "B2", "C2", "D2"]);
    }

    #[test]
    fn given_seat_beyond_last_row_then_not_contained() {
        let layout = SeatLayout::default();
        assert!(layout.contains(&SeatId::parse("D15").unwrap()));
        assert!(!layout.contains(&SeatId::parse("A16").unwrap()));
    }
}
