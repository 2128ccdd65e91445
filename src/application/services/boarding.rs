//! Boarding service
//!
//! Produces the boarding order for the passengers still waiting on a date.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{BoardingPlan, BoardingSequencer, TravelDate};
use crate::infrastructure::traits::BookingRepository;

pub struct BoardingService {
    repo: Arc<dyn BookingRepository>,
    sequencer: BoardingSequencer,
}

impl BoardingService {
    pub fn new(repo: Arc<dyn BookingRepository>, sequencer: BoardingSequencer) -> Self {
        Self { repo, sequencer }
    }

    /// Boarding order and estimated duration for bookings not yet boarded.
    ///
    /// A date without pending bookings yields an empty plan.
    #[instrument(level = "debug", skip(self))]
    pub fn plan_for_date(&self, date: TravelDate) -> ApplicationResult<BoardingPlan> {
        let pending = self
            .repo
            .pending_for_date(date)
            .with_context(|| format!("load pending bookings for {date}"))?;
        let plan = self.sequencer.compute_boarding_sequence(pending)?;
        info!(
            bookings = plan.sequence.len(),
            total_seconds = plan.total_time_seconds,
            "boarding plan ready"
        );
        Ok(plan)
    }
}
