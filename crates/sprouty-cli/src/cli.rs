//! CLI argument definitions for sprouty.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `reminders` | List, create, complete, snooze and delete care reminders |
//! | `plants` | Browse the garden log and edit plant notes or status |
//! | `diagnosis` | Diagnose a plant photo and read diagnosis history |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--token` | `$SPROUTY_AUTH_TOKEN` | Bearer token |
//! | `--api-url` | `$SPROUTY_API_URL` | Backend base URL |
//! | `--timeout-ms` | `15000` | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! sprouty reminders due --pretty
//! sprouty reminders create --plant 65f0c1 --type Water --frequency weekly
//! sprouty plants list --search fern
//! sprouty diagnosis run ./leaf.jpg --plant 65f0c1 --notes "yellow spots"
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Sprouty - gardening assistant from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "sprouty",
    author,
    version,
    about = "Gardening assistant CLI: reminders, garden log and plant diagnosis"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Bearer token; falls back to SPROUTY_AUTH_TOKEN.
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Backend base URL; overrides SPROUTY_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Care reminders.
    #[command(subcommand)]
    Reminders(ReminderCommand),

    /// Garden log plants.
    #[command(subcommand)]
    Plants(PlantCommand),

    /// Photo diagnosis.
    #[command(subcommand)]
    Diagnosis(DiagnosisCommand),
}

#[derive(Debug, Subcommand)]
pub enum ReminderCommand {
    /// List every reminder.
    List,
    /// Reminders due in the next seven days.
    Upcoming,
    /// Reminders due now.
    Due {
        /// Serve placeholder data without calling the backend.
        #[arg(long, default_value_t = false)]
        fallback: bool,
    },
    /// Create a reminder.
    Create(CreateReminderArgs),
    /// Mark a reminder completed.
    Complete { id: String },
    /// Delete a reminder.
    Delete { id: String },
    /// Mark a reminder's notification as sent.
    Notified { id: String },
    /// Push a reminder back by some minutes.
    Snooze {
        id: String,
        #[arg(long, default_value_t = 30)]
        minutes: i64,
    },
    /// Reminder statistics.
    Stats,
    /// Probe the backend for reachability and CORS headers.
    Ping,
}

#[derive(Debug, Args)]
pub struct CreateReminderArgs {
    /// Plant identifier.
    #[arg(long)]
    pub plant: String,

    /// Reminder type (Water, Fertilize, Prune, Repot, ...).
    #[arg(long = "type")]
    pub reminder_type: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// First occurrence (RFC3339).
    #[arg(long)]
    pub date: Option<String>,

    /// daily, weekly, monthly or a number of days.
    #[arg(long)]
    pub frequency: Option<String>,

    /// Create a one-off reminder.
    #[arg(long, default_value_t = false)]
    pub no_recurring: bool,

    /// Notification method; repeat for several.
    #[arg(long = "notify")]
    pub notify: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum PlantCommand {
    /// List plants in the garden log.
    List {
        /// Filter by name, species or nickname.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one plant.
    Show { id: String },
    /// Replace a plant's notes.
    Notes { id: String, text: String },
    /// Set a plant's health status (Healthy, "Needs Attention", Critical, Sick).
    Status { id: String, status: String },
}

#[derive(Debug, Subcommand)]
pub enum DiagnosisCommand {
    /// Diagnose a plant photo.
    Run {
        image: PathBuf,
        #[arg(long)]
        plant: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Diagnosis history of a plant.
    History { plant_id: String },
}
