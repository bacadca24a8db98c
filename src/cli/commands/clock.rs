use crate::cli::parser::LocationArgs;
use crate::core::clock::ClockLogic;
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::models::workday::ClockAction;
use crate::ui::messages::success;

/// `in`, `lunch-start`, `lunch-end` and `out`.
pub fn handle(action: ClockAction, loc: &LocationArgs, ctx: &AppContext) -> AppResult<()> {
    let message = match action {
        ClockAction::ClockIn => ClockLogic::clock_in(ctx, loc.lat, loc.lon)?,
        ClockAction::LunchStart => ClockLogic::lunch_start(ctx, loc.lat, loc.lon)?,
        ClockAction::LunchEnd => ClockLogic::lunch_end(ctx, loc.lat, loc.lon)?,
        ClockAction::ClockOut => ClockLogic::clock_out(ctx, loc.lat, loc.lon)?,
    };
    success(message);
    Ok(())
}
