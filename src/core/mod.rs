pub mod auth;
pub mod calendar;
pub mod clock;
pub mod context;
pub mod log;
pub mod report;
pub mod session;
pub mod telemetry;
pub mod timer;
pub mod token;
