//! Tests for seat identifier parsing and formatting

use rstest::rstest;

use busboard::domain::{DomainError, SeatId, SeatLetter};

#[rstest]
#[case("A1", SeatLetter::A, 1)]
#[case("B7", SeatLetter::B, 7)]
#[case("C12", SeatLetter::C, 12)]
#[case("D15", SeatLetter::D, 15)]
fn given_well_formed_seat_when_parsing_then_splits_letter_and_row(
    #[case] input: &str,
    #[case] letter: SeatLetter,
    #[case] row: u32,
) {
    let seat = SeatId::parse(input).unwrap();
    assert_eq!(seat.letter(), letter);
    assert_eq!(seat.row(), row);
}

#[rstest]
#[case("")]
#[case("A")]
#[case("12")]
#[case("c12")]
#[case("C-1")]
#[case("C 12")]
#[case("C12 ")]
#[case("AB1")]
#[case("A0")]
#[case("E4")]
#[case("A99999999999")]
fn given_malformed_seat_when_parsing_then_invalid_seat(#[case] input: &str) {
    match SeatId::parse(input) {
        Err(DomainError::InvalidSeat { input: reported, .. }) => assert_eq!(reported, input),
        other => panic!("expected InvalidSeat for {input:?}, got {other:?}"),
    }
}

#[rstest]
fn given_any_seat_when_formatting_then_parsing_then_round_trips(
    #[values(SeatLetter::A, SeatLetter::B, SeatLetter::C, SeatLetter::D)] letter: SeatLetter,
    #[values(1, 9, 10, 15, 120)] row: u32,
) {
    let seat = SeatId::new(letter, row).unwrap();
    let parsed: SeatId = seat.to_string().parse().unwrap();
    assert_eq!((parsed.letter(), parsed.row()), (letter, row));
}
