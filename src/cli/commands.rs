//! Command dispatch

use std::io;

use clap::CommandFactory;
use colored::Colorize;
use itertools::Itertools;
use serde_json::json;
use tracing::{debug, instrument};

use crate::application::services::{NewBooking, SeatStatus};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{parse_travel_date, BoardingPlan, BookingId, TravelDate, SEATS_PER_ROW};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `busboard --help`".into(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "busboard", &mut io::stdout());
        return Ok(());
    }

    let settings = load_settings(cli)?;
    if let Commands::Config { command } = command {
        return config_command(command, &settings);
    }

    let container = ServiceContainer::new(settings);
    match command {
        Commands::Seats { date } => seats(&container, travel_date(date)?),
        Commands::Book {
            date,
            mobile,
            seats,
        } => book(&container, travel_date(date)?, mobile, seats),
        Commands::List { date, json } => list(&container, travel_date(date)?, *json),
        Commands::Update { id, seats } => update(&container, id, seats),
        Commands::Board { id } => board(&container, id),
        Commands::Sequence { date, json } => sequence(&container, travel_date(date)?, *json),
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data_file) = &cli.data_file {
        settings.override_data_file(data_file);
    }
    debug!(data_file = %settings.data_file.display(), "settings loaded");
    Ok(settings)
}

fn travel_date(input: &str) -> CliResult<TravelDate> {
    Ok(parse_travel_date(input).map_err(ApplicationError::from)?)
}

#[instrument(skip(container))]
fn seats(container: &ServiceContainer, date: TravelDate) -> CliResult<()> {
    let statuses = container.booking_service().seat_map(date)?;
    let booked = statuses.iter().filter(|s| s.is_booked()).count();

    output::header(&format!("Seat map for {date} (front of bus at top)"));
    for (row, chunk) in statuses.chunks(SEATS_PER_ROW as usize).enumerate() {
        let (left, right) = chunk.split_at(chunk.len() / 2);
        output::detail(&format!(
            "{:>2}  {}   {}",
            row + 1,
            left.iter().map(render_seat).join(" "),
            right.iter().map(render_seat).join(" "),
        ));
    }
    output::info(&format!(
        "\n{} of {} seats booked",
        booked,
        statuses.len()
    ));
    Ok(())
}

fn render_seat(status: &SeatStatus) -> String {
    let label = format!("{:<3}", status.seat.to_string());
    if status.is_booked() {
        label.red().to_string()
    } else {
        label.green().to_string()
    }
}

#[instrument(skip(container))]
fn book(
    container: &ServiceContainer,
    date: TravelDate,
    mobile: &str,
    seats: &[String],
) -> CliResult<()> {
    let booking = container.booking_service().create(NewBooking {
        travel_date: date,
        mobile_number: mobile.to_string(),
        seats: seats.to_vec(),
    })?;
    output::success("Booking confirmed successfully!");
    output::action("Booking ID", &booking.id);
    output::detail(&format!("Seats: {}", booking.seat_labels().join(", ")));
    Ok(())
}

#[instrument(skip(container))]
fn list(container: &ServiceContainer, date: TravelDate, as_json: bool) -> CliResult<()> {
    let bookings = container.booking_service().list_for_date(date)?;
    if as_json {
        let body = json!({ "bookings": bookings, "total": bookings.len() });
        return print_json(&body);
    }

    if bookings.is_empty() {
        output::info(&format!("No bookings for {date}"));
        return Ok(());
    }
    output::header(&format!("Bookings for {date}"));
    for listed in &bookings {
        let b = &listed.booking;
        let state = if b.boarded {
            "boarded".green()
        } else {
            "waiting".yellow()
        };
        output::detail(&format!(
            "{:>3}. {}  {}  {:<20}  {}",
            listed.sequence,
            b.id,
            b.mobile_number,
            b.seat_labels().join(", "),
            state
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn update(container: &ServiceContainer, id: &str, seats: &[String]) -> CliResult<()> {
    let booking = container
        .booking_service()
        .update_seats(&BookingId::from(id), seats)?;
    output::success("Booking updated successfully!");
    output::detail(&format!("Seats: {}", booking.seat_labels().join(", ")));
    Ok(())
}

#[instrument(skip(container))]
fn board(container: &ServiceContainer, id: &str) -> CliResult<()> {
    let booking = container
        .booking_service()
        .mark_boarded(&BookingId::from(id))?;
    output::success(&format!("Passenger marked as boarded: {}", booking.id));
    Ok(())
}

#[instrument(skip(container))]
fn sequence(container: &ServiceContainer, date: TravelDate, as_json: bool) -> CliResult<()> {
    let plan = container.boarding_service().plan_for_date(date)?;
    if as_json {
        return print_json(&sequence_body(&plan));
    }

    if plan.is_empty() {
        output::info(&format!("No passengers waiting to board on {date}"));
        return Ok(());
    }
    output::header(&format!("Boarding sequence for {date}"));
    for (entry, step) in plan.sequence.iter().zip(&plan.steps) {
        let wait = if step.blocked {
            format!("waits {}s", step.wait_seconds).yellow().to_string()
        } else {
            String::new()
        };
        output::detail(&format!(
            "{:>3}. {}  {:<20}  {}  {}",
            entry.sequence,
            entry.booking_id,
            entry.seats.iter().join(", "),
            entry.mobile_number,
            wait
        ));
    }
    output::action(
        "Estimated boarding time",
        &format!("{} seconds", plan.total_time_seconds),
    );
    Ok(())
}

/// JSON document for `sequence --json`.
pub fn sequence_body(plan: &BoardingPlan) -> serde_json::Value {
    json!({
        "sequence": plan.sequence,
        "totalTimeSeconds": plan.total_time_seconds,
        "estimatedTime": format!("{} seconds", plan.total_time_seconds),
    })
}

fn print_json(value: &serde_json::Value) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        InfraError::io(
            "render JSON",
            io::Error::new(io::ErrorKind::InvalidData, e),
        )
    })?;
    output::info(&text);
    Ok(())
}

fn config_command(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine config directory".into())
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "" } else { " (not found)" };
                    output::action("Global config", &format!("{}{}", path.display(), state));
                }
                None => output::warning("cannot determine config directory"),
            }
            output::action("Data file", &settings.data_file.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardingSequencer, Booking, MobileNumber};
    use chrono::Utc;

    #[test]
    fn given_plan_when_rendering_json_then_includes_estimated_time() {
        let booking = Booking {
            id: BookingId::from("ABCD1234"),
            travel_date: parse_travel_date("2026-10-20").unwrap(),
            mobile_number: MobileNumber::parse("9876543210").unwrap(),
            seats: vec!["A15".parse().unwrap()],
            booked_at: Utc::now(),
            updated_at: None,
            boarded: false,
            boarding_time: None,
        };
        let plan = BoardingSequencer::default()
            .compute_boarding_sequence(vec![booking])
            .unwrap();

        let body = sequence_body(&plan);
        assert_eq!(body["totalTimeSeconds"], 60);
        assert_eq!(body["estimatedTime"], "60 seconds");
        assert_eq!(body["sequence"][0]["bookingId"], "ABCD1234");
    }

    #[test]
    fn given_bad_date_then_data_error_exit_code() {
        let err = travel_date("20-10-2026").unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }
}
