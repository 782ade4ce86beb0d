//! Command-line interface definitions.

use crate::checkin::Routine;
use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Mood check-ins with pattern-aware suggestions
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Session id to read and write check-ins under (overrides MOODLENS_SESSION)
    #[clap(long, global = true)]
    pub session: Option<String>,

    /// Log output format
    #[clap(
        long,
        global = true,
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,

    /// Log level used when RUST_LOG is not set
    #[clap(long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record how today went and show updated insights
    Checkin(CheckinArgs),

    /// Show patterns and suggestions from recent check-ins
    Insights(InsightsArgs),

    /// Talk things through with the support chat
    Chat,
}

#[derive(Args, Debug)]
pub struct CheckinArgs {
    /// How closely today followed your usual routine
    #[clap(long, value_enum)]
    pub routine: RoutineArg,

    /// Stress rating from 1 (calm) to 5 (overwhelmed)
    #[clap(long, value_parser = clap::value_parser!(i64).range(1..=5))]
    pub stress: i64,

    /// Mark that you are feeling down
    #[clap(long)]
    pub dejected: bool,

    /// What is weighing on you (only kept with --dejected)
    #[clap(long, requires = "dejected")]
    pub notes: Option<String>,

    /// Continue into the support chat, opening with this check-in
    #[clap(long)]
    pub chat: bool,
}

#[derive(Args, Debug)]
pub struct InsightsArgs {
    /// Print the insights as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutineArg {
    Consistent,
    PartlyOff,
    TotallyOff,
}

impl From<RoutineArg> for Routine {
    fn from(arg: RoutineArg) -> Self {
        match arg {
            RoutineArg::Consistent => Routine::Consistent,
            RoutineArg::PartlyOff => Routine::PartlyOff,
            RoutineArg::TotallyOff => Routine::TotallyOff,
        }
    }
}
