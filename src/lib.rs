//! rTimeclock library root.
//! Exposes the CLI parser, the high-level run() function, and internal modules.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::models::workday::ClockAction;
use crate::ui::messages::warning;
use crate::utils::path::resolve_db_path;
use clap::Parser;

/// Print the reason of the last forced logout once.
fn show_logout_notice(ctx: &AppContext) -> AppResult<()> {
    if let Some(reason) = ctx.session.take_logout_reason()? {
        warning(reason.notice());
    }
    Ok(())
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use crate::cli::commands;

    match &cli.command {
        Commands::Init => return commands::init::handle(cli),
        Commands::Config { .. } => return commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => return commands::log::handle(&cli.command, cfg),
        _ => {}
    }

    let ctx = AppContext::open(cfg.clone())?;
    show_logout_notice(&ctx)?;

    match &cli.command {
        Commands::Login { .. } => commands::login::handle(&cli.command, &ctx),
        Commands::Logout => commands::logout::handle(&ctx),
        Commands::Whoami => commands::whoami::handle(&ctx),
        Commands::Status { .. } => commands::status::handle(&cli.command, &ctx),
        Commands::In(loc) => commands::clock::handle(ClockAction::ClockIn, loc, &ctx),
        Commands::LunchStart(loc) => commands::clock::handle(ClockAction::LunchStart, loc, &ctx),
        Commands::LunchEnd(loc) => commands::clock::handle(ClockAction::LunchEnd, loc, &ctx),
        Commands::Out(loc) => commands::clock::handle(ClockAction::ClockOut, loc, &ctx),
        Commands::Report { .. } => commands::report::handle(&cli.command, &ctx),
        Commands::Init | Commands::Config { .. } | Commands::Log { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = resolve_db_path(custom_db);
    }
    if let Some(url) = &cli.api_url {
        cfg.api_base_url = url.clone();
    }
    log::debug!("store={} api={}", cfg.database, cfg.api_base_url);

    dispatch(&cli, &cfg)
}
