//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/busboard/busboard.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `BUSBOARD_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{
    BoardingSequencer, BookingPolicy, SeatLayout, DEFAULT_ROWS, MAX_ROWS, SETTLE_DURATION_SECS,
};

/// Unified configuration for busboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// JSON file holding all bookings
    pub data_file: PathBuf,
    /// Number of seat rows on the bus
    pub rows: u32,
    /// Seats one booking may hold
    pub max_seats_per_booking: usize,
    /// Seats one mobile number may hold per travel date
    pub daily_seat_limit: usize,
    /// Seconds a boarding group needs to settle
    pub settle_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let policy = BookingPolicy::default();
        Self {
            data_file: default_data_file(),
            rows: DEFAULT_ROWS,
            max_seats_per_booking: policy.max_seats_per_booking,
            daily_seat_limit: policy.daily_seat_limit,
            settle_seconds: SETTLE_DURATION_SECS,
        }
    }
}

/// Default location of the booking store.
fn default_data_file() -> PathBuf {
    ProjectDirs::from("", "", "busboard")
        .map(|dirs| dirs.data_dir().join("bookings.json"))
        .unwrap_or_else(|| PathBuf::from("bookings.json"))
}

/// Get the XDG config directory for busboard.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "busboard").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("busboard.toml"))
}

impl Settings {
    pub fn layout(&self) -> SeatLayout {
        SeatLayout::new(self.rows)
    }

    pub fn policy(&self) -> BookingPolicy {
        BookingPolicy {
            max_seats_per_booking: self.max_seats_per_booking,
            daily_seat_limit: self.daily_seat_limit,
        }
    }

    pub fn sequencer(&self) -> BoardingSequencer {
        BoardingSequencer::new(self.settle_seconds)
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the data file path.
    fn expand_paths(&mut self) {
        self.data_file = expand_path(&self.data_file);
    }

    /// Point at a different data file, expanded like the config value.
    pub fn override_data_file(&mut self, path: &Path) {
        self.data_file = expand_path(path);
    }

    /// Reject values that make the booking rules meaningless.
    fn validate(&self) -> Result<(), ApplicationError> {
        let invalid = |message: &str| {
            Err(ApplicationError::Config {
                message: message.to_string(),
            })
        };
        if self.rows == 0 {
            return invalid("rows must be at least 1");
        }
        if self.rows > MAX_ROWS {
            return Err(ApplicationError::Config {
                message: format!("rows must be at most {MAX_ROWS}"),
            });
        }
        if self.max_seats_per_booking == 0 {
            return invalid("max_seats_per_booking must be at least 1");
        }
        if self.daily_seat_limit == 0 {
            return invalid("daily_seat_limit must be at least 1");
        }
        if self.settle_seconds == 0 {
            return invalid("settle_seconds must be at least 1");
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default(
                "data_file",
                defaults.data_file.to_string_lossy().to_string(),
            )
            .map_err(config_err)?
            .set_default("rows", i64::from(defaults.rows))
            .map_err(config_err)?
            .set_default(
                "max_seats_per_booking",
                defaults.max_seats_per_booking as i64,
            )
            .map_err(config_err)?
            .set_default("daily_seat_limit", defaults.daily_seat_limit as i64)
            .map_err(config_err)?
            .set_default("settle_seconds", defaults.settle_seconds as i64)
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("BUSBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;

        settings.expand_paths();
        settings.validate()?;

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# busboard configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/busboard/busboard.toml
#   Explicit: busboard --config <file>
#   Env:      BUSBOARD_* environment variables (e.g. BUSBOARD_ROWS=12)

# JSON file holding all bookings
# data_file = "~/.local/share/busboard/bookings.json"

# Seat rows on the bus, at most 99 (4 seats per row: A B | C D)
# rows = 15

# Seats a single booking may hold
# max_seats_per_booking = 6

# Seats one mobile number may hold per travel date
# daily_seat_limit = 6

# Seconds a boarding group needs to settle into its seats
# settle_seconds = 60
"#
        .to_string()
    }
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => path.to_path_buf(),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
