use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::resolve_db_path;

/// Handle the `init` command
///
/// Creates the config directory and file (unless `--test`), then the local
/// store with all pending migrations applied.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let custom = cli.db.as_deref().map(resolve_db_path);
    let cfg = Config::init_all(custom, cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing rTimeclock…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Local store : {}", &db_path);

    let pool = DbPool::open(&db_path)?;

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "",
        &format!("Local store initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success("rTimeclock initialization completed!");
    Ok(())
}
