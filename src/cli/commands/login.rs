use crate::cli::parser::Commands;
use crate::core::auth::AuthLogic;
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Login { cpf, password } = cmd {
        let session = AuthLogic::login(ctx, cpf, password)?;
        success(format!("Welcome, {}!", session.user.first_name()));
    }
    Ok(())
}
