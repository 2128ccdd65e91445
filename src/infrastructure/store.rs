//! Booking repository implementations
//!
//! `InMemoryBookingRepository` keeps bookings for the lifetime of the process.
//! `JsonFileBookingRepository` keeps them in a single JSON document so the
//! CLI sees the same bookings across invocations.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::domain::{Booking, BookingId, TravelDate};
use crate::infrastructure::traits::{BookingRepository, FileSystem};

fn poisoned<T>(_: T) -> io::Error {
    io::Error::new(io::ErrorKind::Other, "booking store lock poisoned")
}

fn replace(bookings: &mut [Booking], booking: Booking) -> io::Result<()> {
    match bookings.iter_mut().find(|b| b.id == booking.id) {
        Some(slot) => {
            *slot = booking;
            Ok(())
        }
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no booking with id {}", booking.id),
        )),
    }
}

fn board(bookings: &mut [Booking], id: &BookingId, at: DateTime<Utc>) -> Option<Booking> {
    let booking = bookings.iter_mut().find(|b| &b.id == id)?;
    if !booking.boarded {
        booking.boarded = true;
        booking.boarding_time = Some(at);
    }
    Some(booking.clone())
}

fn for_date(bookings: &[Booking], date: TravelDate) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| b.travel_date == date)
        .cloned()
        .collect()
}

// ============================================================
// IN-MEMORY
// ============================================================

/// Process-local booking store.
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing bookings.
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: Mutex::new(bookings),
        }
    }

    fn guard(&self) -> io::Result<MutexGuard<'_, Vec<Booking>>> {
        self.bookings.lock().map_err(poisoned)
    }
}

impl BookingRepository for InMemoryBookingRepository {
    fn create(&self, booking: Booking) -> io::Result<()> {
        self.guard()?.push(booking);
        Ok(())
    }

    fn get(&self, id: &BookingId) -> io::Result<Option<Booking>> {
        Ok(self.guard()?.iter().find(|b| &b.id == id).cloned())
    }

    fn list_by_date(&self, date: TravelDate) -> io::Result<Vec<Booking>> {
        Ok(for_date(&self.guard()?, date))
    }

    fn update(&self, booking: Booking) -> io::Result<()> {
        replace(&mut self.guard()?, booking)
    }

    fn mark_boarded(&self, id: &BookingId, at: DateTime<Utc>) -> io::Result<Option<Booking>> {
        Ok(board(&mut self.guard()?, id, at))
    }
}

// ============================================================
// JSON FILE
// ============================================================

/// Booking store backed by one JSON array on disk.
///
/// A missing or empty file is an empty store. Every mutation rewrites the
/// whole document through a temporary file followed by a rename.
pub struct JsonFileBookingRepository {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
    lock: Mutex<()>,
}

impl JsonFileBookingRepository {
    pub fn new(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> io::Result<Vec<Booking>> {
        if !self.fs.exists(&self.path) {
            return Ok(Vec::new());
        }
        let content = self.fs.read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: {}", self.path.display(), e),
            )
        })
    }

    fn save(&self, bookings: &[Booking]) -> io::Result<()> {
        let content = serde_json::to_string_pretty(bookings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.fs.ensure_parent(&self.path)?;
        let tmp = self.path.with_extension("json.tmp");
        self.fs.write(&tmp, &content)?;
        self.fs.rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), count = bookings.len(), "bookings saved");
        Ok(())
    }

    /// Load, mutate and save under the store lock.
    fn modify<R>(&self, f: impl FnOnce(&mut Vec<Booking>) -> io::Result<R>) -> io::Result<R> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut bookings = self.load()?;
        let result = f(&mut bookings)?;
        self.save(&bookings)?;
        Ok(result)
    }

    fn read(&self) -> io::Result<Vec<Booking>> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        self.load()
    }
}

impl BookingRepository for JsonFileBookingRepository {
    #[instrument(level = "debug", skip_all, fields(id = %booking.id))]
    fn create(&self, booking: Booking) -> io::Result<()> {
        self.modify(|bookings| {
            bookings.push(booking);
            Ok(())
        })
    }

    fn get(&self, id: &BookingId) -> io::Result<Option<Booking>> {
        Ok(self.read()?.into_iter().find(|b| &b.id == id))
    }

    fn list_by_date(&self, date: TravelDate) -> io::Result<Vec<Booking>> {
        Ok(for_date(&self.read()?, date))
    }

    #[instrument(level = "debug", skip_all, fields(id = %booking.id))]
    fn update(&self, booking: Booking) -> io::Result<()> {
        self.modify(|bookings| replace(bookings, booking))
    }

    #[instrument(level = "debug", skip(self, at))]
    fn mark_boarded(&self, id: &BookingId, at: DateTime<Utc>) -> io::Result<Option<Booking>> {
        self.modify(|bookings| Ok(board(bookings, id, at)))
    }
}
