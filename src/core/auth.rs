use crate::core::context::AppContext;
use crate::core::telemetry::Outcome;
use crate::core::token::is_token_expired;
use crate::errors::{AppError, AppResult};
use crate::models::user::Session;
use chrono::Utc;
use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Accepts `123.456.789-01` or eleven plain digits; returns the digits.
pub fn normalize_cpf(input: &str) -> AppResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::InvalidCredentials("CPF is required.".into()));
    }
    let masked = Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").map_err(|e| AppError::Other(e.to_string()))?;
    let plain = Regex::new(r"^\d{11}$").map_err(|e| AppError::Other(e.to_string()))?;
    if !masked.is_match(input) && !plain.is_match(input) {
        return Err(AppError::InvalidCredentials("Invalid CPF format.".into()));
    }
    Ok(input.chars().filter(|c| c.is_ascii_digit()).collect())
}

pub fn check_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::InvalidCredentials("Password is required.".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidCredentials(format!(
            "Password must have at least {} characters.",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub struct AuthLogic;

impl AuthLogic {
    pub fn login(ctx: &AppContext, cpf: &str, password: &str) -> AppResult<Session> {
        let cpf = normalize_cpf(cpf)?;
        check_password(password)?;

        let api = ctx.api();
        let result = api.login(&cpf, password).and_then(|s| {
            if is_token_expired(&s.token, Utc::now()) {
                Err(AppError::BadResponse(
                    "the server issued an already expired token".into(),
                ))
            } else {
                Ok(s)
            }
        });

        let tele = ctx.telemetry(&api);
        match &result {
            Ok(s) => {
                ctx.session.save(s)?;
                // the token is fresh now, so the event can be authenticated
                let authed = ctx.authed_api(s);
                ctx.telemetry(&authed).emit(
                    Some(&s.user),
                    "/login",
                    "POST",
                    "login",
                    Outcome::Success,
                    "Logged in",
                );
            }
            Err(e) => tele.emit(
                None,
                "/login",
                "POST",
                "login",
                Outcome::Failure,
                &e.to_string(),
            ),
        }
        result
    }

    /// Returns whether there was a session to drop.
    pub fn logout(ctx: &AppContext) -> AppResult<bool> {
        let session = ctx.session.load()?;
        if let Some(s) = &session {
            let api = ctx.authed_api(s);
            ctx.telemetry(&api).emit(
                Some(&s.user),
                "/logout",
                "POST",
                "logout",
                Outcome::Success,
                "Logged out",
            );
        }
        ctx.session.clear()?;
        Ok(session.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_masks_are_stripped() {
        assert_eq!(normalize_cpf("123.456.789-01").unwrap(), "12345678901");
        assert_eq!(normalize_cpf(" 12345678901 ").unwrap(), "12345678901");
    }

    #[test]
    fn malformed_cpf_is_rejected() {
        for bad in ["", "123.456.789", "1234567890", "123-456-789.01", "abc.def.ghi-jk"] {
            assert!(normalize_cpf(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(check_password("").is_err());
        assert!(check_password("12345").is_err());
        assert!(check_password("123456").is_ok());
    }
}
