use crate::core::auth::AuthLogic;
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(ctx: &AppContext) -> AppResult<()> {
    if AuthLogic::logout(ctx)? {
        success("Logged out.");
    } else {
        info("No active session.");
    }
    Ok(())
}
