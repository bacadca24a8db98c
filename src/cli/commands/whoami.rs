use crate::core::context::AppContext;
use crate::core::token::token_expiry;
use crate::errors::AppResult;

pub fn handle(ctx: &AppContext) -> AppResult<()> {
    let session = ctx.session.require()?;
    let user = &session.user;
    let tz = ctx.cfg.tz()?;

    println!("👤 {}", user.name);
    println!("   Role    : {}", user.role);
    if let Some(company) = user.company_name.as_deref().filter(|c| !c.is_empty()) {
        println!("   Company : {}", company);
    }
    match token_expiry(&session.token) {
        Some(exp) => println!(
            "   Session : valid until {}",
            exp.with_timezone(&tz).format("%d/%m/%Y %H:%M")
        ),
        None => println!("   Session : no expiry"),
    }
    Ok(())
}
