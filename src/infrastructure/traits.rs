//! I/O boundary traits for testability
//!
//! These traits abstract storage, time and filesystem access, allowing
//! services to be tested with in-memory implementations.

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::{Booking, BookingId, TravelDate};

/// Booking storage consumed by the application services.
pub trait BookingRepository: Send + Sync {
    /// Store a new booking.
    fn create(&self, booking: Booking) -> io::Result<()>;

    /// Look up a booking by reference.
    fn get(&self, id: &BookingId) -> io::Result<Option<Booking>>;

    /// All bookings for a travel date, in creation order.
    fn list_by_date(&self, date: TravelDate) -> io::Result<Vec<Booking>>;

    /// Replace a stored booking (matched by id).
    ///
    /// Fails with `NotFound` if no booking has that id.
    fn update(&self, booking: Booking) -> io::Result<()>;

    /// Flag a booking as boarded at `at`.
    ///
    /// Returns `None` for an unknown id. A booking that is already boarded
    /// keeps its original boarding time.
    fn mark_boarded(&self, id: &BookingId, at: DateTime<Utc>) -> io::Result<Option<Booking>>;

    /// Bookings for a date that have not boarded yet.
    fn pending_for_date(&self, date: TravelDate) -> io::Result<Vec<Booking>> {
        Ok(self
            .list_by_date(date)?
            .into_iter()
            .filter(|b| !b.boarded)
            .collect())
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Rename/move a file.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
