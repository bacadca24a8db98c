pub mod location;
pub mod record;
pub mod report;
pub mod session_state;
pub mod user;
pub mod workday;
