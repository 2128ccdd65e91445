//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{BoardingService, BookingService};
use crate::config::Settings;
use crate::infrastructure::store::JsonFileBookingRepository;
use crate::infrastructure::traits::{BookingRepository, Clock, RealFileSystem, SystemClock};

/// Container holding shared dependencies and handing out services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Booking storage
    pub repo: Arc<dyn BookingRepository>,

    /// Time source for booking and boarding timestamps
    pub clock: Arc<dyn Clock>,
}

impl ServiceContainer {
    /// Create a container backed by the JSON data file from `settings`.
    pub fn new(settings: Settings) -> Self {
        let repo = JsonFileBookingRepository::new(
            settings.data_file.clone(),
            Arc::new(RealFileSystem),
        );
        Self::with_deps(settings, Arc::new(repo), Arc::new(SystemClock))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        repo: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            repo,
            clock,
        }
    }

    pub fn booking_service(&self) -> BookingService {
        BookingService::new(
            Arc::clone(&self.repo),
            Arc::clone(&self.clock),
            self.settings.layout(),
            self.settings.policy(),
        )
    }

    pub fn boarding_service(&self) -> BoardingService {
        BoardingService::new(Arc::clone(&self.repo), self.settings.sequencer())
    }
}
