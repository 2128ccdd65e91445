//! Tests for BoardingService

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use busboard::application::services::{BoardingService, BookingService, NewBooking};
use busboard::domain::{parse_travel_date, BoardingSequencer, BookingPolicy, SeatLayout};
use busboard::infrastructure::store::InMemoryBookingRepository;
use busboard::infrastructure::traits::FixedClock;

struct Services {
    bookings: BookingService,
    boarding: BoardingService,
}

#[fixture]
fn services() -> Services {
    let repo = Arc::new(InMemoryBookingRepository::new());
    let clock = Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
    ));
    Services {
        bookings: BookingService::new(
            repo.clone(),
            clock,
            SeatLayout::default(),
            BookingPolicy::default(),
        ),
        boarding: BoardingService::new(repo, BoardingSequencer::default()),
    }
}

fn book(services: &Services, date: &str, mobile: &str, seats: &[&str]) -> String {
    services
        .bookings
        .create(NewBooking {
            travel_date: parse_travel_date(date).unwrap(),
            mobile_number: mobile.to_string(),
            seats: seats.iter().map(|s| s.to_string()).collect(),
        })
        .unwrap()
        .id
        .to_string()
}

#[rstest]
fn given_no_bookings_when_planning_then_empty_sequence_and_zero_time(services: Services) {
    let plan = services
        .boarding
        .plan_for_date(parse_travel_date("2026-10-20").unwrap())
        .unwrap();
    assert!(plan.sequence.is_empty());
    assert_eq!(plan.total_time_seconds, 0);
}

#[rstest]
fn given_bookings_when_planning_then_farthest_rows_board_first(services: Services) {
    let front = book(&services, "2026-10-20", "1111111111", &["A1", "B1"]);
    let rear = book(&services, "2026-10-20", "2222222222", &["C15"]);
    let middle = book(&services, "2026-10-20", "3333333333", &["D8", "C8"]);
    book(&services, "2026-10-21", "4444444444", &["A14"]);

    let plan = services
        .boarding
        .plan_for_date(parse_travel_date("2026-10-20").unwrap())
        .unwrap();

    let order: Vec<String> = plan
        .sequence
        .iter()
        .map(|e| e.booking_id.to_string())
        .collect();
    assert_eq!(order, vec![rear, middle, front]);
    assert_eq!(
        plan.sequence.iter().map(|e| e.sequence).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    // rear 60, middle waits behind rows 1..7 (120), front has nearest row 1 (60)
    assert_eq!(plan.total_time_seconds, 240);
}

#[rstest]
fn given_boarded_booking_when_planning_then_excluded(services: Services) {
    let rear = book(&services, "2026-10-20", "1111111111", &["D10"]);
    let near = book(&services, "2026-10-20", "2222222222", &["A7"]);

    let before = services
        .boarding
        .plan_for_date(parse_travel_date("2026-10-20").unwrap())
        .unwrap();
    assert_eq!(before.total_time_seconds, 180);

    services.bookings.mark_boarded(&rear.as_str().into()).unwrap();

    let after = services
        .boarding
        .plan_for_date(parse_travel_date("2026-10-20").unwrap())
        .unwrap();
    assert_eq!(after.sequence.len(), 1);
    assert_eq!(after.sequence[0].booking_id.to_string(), near);
    assert_eq!(after.total_time_seconds, 60);
}
