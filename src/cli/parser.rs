use crate::core::calendar::Period;
use crate::utils::time::date_arg;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rTimeclock
/// Terminal client for the employee time-clock API
#[derive(Parser)]
#[command(
    name = "rtimeclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clock in, take lunch and clock out against the time-clock server, and review your hours",
    long_about = None
)]
pub struct Cli {
    /// Override local store path (useful for tests or a custom store)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the API base URL from the configuration
    #[arg(global = true, long = "api-url", env = "RTIMECLOCK_API_URL")]
    pub api_url: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Coordinates sent along with a clock action.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LocationArgs {
    #[arg(long = "lat", requires = "lon", allow_negative_numbers = true, help = "Latitude in degrees")]
    pub lat: Option<f64>,

    #[arg(long = "lon", requires = "lat", allow_negative_numbers = true, help = "Longitude in degrees")]
    pub lon: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the local store and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Sign in with CPF and password
    Login {
        #[arg(long, env = "RTIMECLOCK_CPF", help = "CPF, masked (123.456.789-01) or 11 digits")]
        cpf: String,

        #[arg(long, env = "RTIMECLOCK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the local session
    Logout,

    /// Show the signed-in employee
    Whoami,

    /// Show today's record and the work timer
    Status {
        #[arg(long, help = "Keep the timer running on screen (Ctrl-C to stop)")]
        watch: bool,

        #[arg(
            long = "refresh",
            default_value_t = 60,
            value_parser = clap::value_parser!(u64).range(5..),
            help = "Seconds between server refreshes while watching"
        )]
        refresh: u64,
    },

    /// Start the work day
    In(LocationArgs),

    /// Start the lunch break
    LunchStart(LocationArgs),

    /// End the lunch break
    LunchEnd(LocationArgs),

    /// Finish the work day
    Out(LocationArgs),

    /// Hours report for a day, week, month or year
    Report {
        #[arg(long, short, value_enum, default_value = "month")]
        period: Period,

        #[arg(long, value_parser = date_arg, help = "Reference date (YYYY-MM-DD), default today")]
        date: Option<NaiveDate>,

        #[arg(long, conflicts_with = "prev", help = "Move one period forward (never past today)")]
        next: bool,

        #[arg(long, help = "Move one period back")]
        prev: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_commands_take_negative_coordinates() {
        let cli = Cli::try_parse_from(["rtimeclock", "in", "--lat", "-18.91", "--lon", "-48.18"])
            .unwrap();
        match cli.command {
            Commands::In(loc) => {
                assert_eq!(loc.lat, Some(-18.91));
                assert_eq!(loc.lon, Some(-48.18));
            }
            _ => panic!("expected `in`"),
        }
    }

    #[test]
    fn lat_without_lon_is_rejected() {
        assert!(Cli::try_parse_from(["rtimeclock", "out", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn report_defaults_to_month() {
        let cli = Cli::try_parse_from(["rtimeclock", "report"]).unwrap();
        match cli.command {
            Commands::Report { period, date, next, prev } => {
                assert_eq!(period, Period::Month);
                assert!(date.is_none() && !next && !prev);
            }
            _ => panic!("expected `report`"),
        }
    }

    #[test]
    fn next_and_prev_conflict() {
        assert!(Cli::try_parse_from(["rtimeclock", "report", "--next", "--prev"]).is_err());
    }
}
