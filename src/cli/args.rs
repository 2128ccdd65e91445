//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Seat booking and boarding-order planning for a single bus route
#[derive(Parser, Debug)]
#[command(name = "busboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Booking data file (overrides config)
    #[arg(long, global = true, env = "BUSBOARD_DATA_FILE", value_hint = ValueHint::FilePath)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the seat map for a travel date
    Seats {
        /// Travel date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },

    /// Book seats
    Book {
        /// Travel date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Passenger mobile number (10 digits)
        #[arg(short, long)]
        mobile: String,
        /// Seats to book, e.g. A1 B1
        #[arg(required = true, num_args = 1..)]
        seats: Vec<String>,
    },

    /// List bookings for a travel date
    List {
        /// Travel date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Replace the seats of a booking
    Update {
        /// Booking reference
        id: String,
        /// New seats, e.g. C4 D4
        #[arg(required = true, num_args = 1..)]
        seats: Vec<String>,
    },

    /// Mark a booking's passengers as boarded
    Board {
        /// Booking reference
        id: String,
    },

    /// Show the optimal boarding order for passengers not yet boarded
    Sequence {
        /// Travel date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config and data paths
    Path,
}
