//! Unified application error type.
//! All modules (api, db, core, cli, utils) return AppError to keep the error
//! handling consistent: every failure ends up as one message at the command
//! boundary.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Local store error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("You are not logged in. Run `rtimeclock login` first.")]
    NotLoggedIn,

    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    // ---------------------------
    // Remote API
    // ---------------------------
    #[error("Could not connect to the server: {0}")]
    Transport(String),

    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected server response: {0}")]
    BadResponse(String),

    // ---------------------------
    // Device / permissions
    // ---------------------------
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Inconsistent attendance record: {0}")]
    InvalidRecord(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("No attendance record for today")]
    NoRecordForToday,

    #[error("Cannot show records in the future (period starts {0})")]
    FutureRange(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Errors that must wipe the local session (redirect to login).
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Unauthorized(_) | AppError::SessionExpired)
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
