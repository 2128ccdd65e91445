//! Tests for JsonFileBookingRepository

use std::io;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use busboard::domain::{parse_seats, parse_travel_date, Booking, BookingId, MobileNumber};
use busboard::infrastructure::store::JsonFileBookingRepository;
use busboard::infrastructure::traits::{BookingRepository, RealFileSystem};

fn booking(id: &str, date: &str, seats: &[&str]) -> Booking {
    Booking {
        id: BookingId::from(id),
        travel_date: parse_travel_date(date).unwrap(),
        mobile_number: MobileNumber::parse("9876543210").unwrap(),
        seats: parse_seats(seats).unwrap(),
        booked_at: Utc.with_ymd_and_hms(2026, 10, 1, 8, 30, 0).unwrap(),
        updated_at: None,
        boarded: false,
        boarding_time: None,
    }
}

#[fixture]
fn temp() -> TempDir {
    TempDir::new().unwrap()
}

fn repo_at(temp: &TempDir) -> JsonFileBookingRepository {
    JsonFileBookingRepository::new(
        temp.path().join("data").join("bookings.json"),
        Arc::new(RealFileSystem),
    )
}

#[rstest]
fn given_missing_file_when_listing_then_empty(temp: TempDir) {
    let repo = repo_at(&temp);
    let listed = repo
        .list_by_date(parse_travel_date("2026-10-20").unwrap())
        .unwrap();
    assert!(listed.is_empty());
    assert!(!repo.path().exists());
}

#[rstest]
fn given_created_bookings_when_reopening_then_persisted(temp: TempDir) {
    {
        let repo = repo_at(&temp);
        repo.create(booking("AAAA0001", "2026-10-20", &["A1", "B1"]))
            .unwrap();
        repo.create(booking("AAAA0002", "2026-10-21", &["C3"]))
            .unwrap();
    }

    let reopened = repo_at(&temp);
    let listed = reopened
        .list_by_date(parse_travel_date("2026-10-20").unwrap())
        .unwrap();
    assert_eq!(listed, vec![booking("AAAA0001", "2026-10-20", &["A1", "B1"])]);
}

#[rstest]
fn given_booking_when_marking_boarded_then_written_to_disk(temp: TempDir) {
    let repo = repo_at(&temp);
    repo.create(booking("AAAA0001", "2026-10-20", &["A1"]))
        .unwrap();
    let at = Utc.with_ymd_and_hms(2026, 10, 20, 6, 45, 0).unwrap();

    let boarded = repo
        .mark_boarded(&BookingId::from("AAAA0001"), at)
        .unwrap()
        .unwrap();
    assert!(boarded.boarded);

    let content = std::fs::read_to_string(repo.path()).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(stored[0]["boarded"], true);
    assert_eq!(stored[0]["seats"][0], "A1");
    assert!(repo
        .pending_for_date(parse_travel_date("2026-10-20").unwrap())
        .unwrap()
        .is_empty());
}

#[rstest]
fn given_booking_when_updating_then_replaced(temp: TempDir) {
    let repo = repo_at(&temp);
    repo.create(booking("AAAA0001", "2026-10-20", &["A1"]))
        .unwrap();

    repo.update(booking("AAAA0001", "2026-10-20", &["D12"]))
        .unwrap();

    let stored = repo.get(&BookingId::from("AAAA0001")).unwrap().unwrap();
    assert_eq!(stored.seat_labels(), vec!["D12"]);
}

#[rstest]
fn given_malformed_seat_in_file_when_loading_then_invalid_data(temp: TempDir) {
    let repo = repo_at(&temp);
    std::fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
    std::fs::write(
        repo.path(),
        r#"[{"id":"AAAA0001","travelDate":"2026-10-20","mobileNumber":"9876543210",
            "seats":["X"],"bookedAt":"2026-10-01T08:30:00Z","boarded":false}]"#,
    )
    .unwrap();

    let err = repo
        .list_by_date(parse_travel_date("2026-10-20").unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
