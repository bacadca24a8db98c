pub mod clock;
pub mod config;
pub mod init;
pub mod log;
pub mod login;
pub mod logout;
pub mod report;
pub mod status;
pub mod whoami;
