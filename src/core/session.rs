//! Single access point to the persisted session.
//!
//! Token, user profile, the in-progress record id and the logout reason all
//! live in the key-value store; nothing else reads those keys directly.

use crate::core::token::is_token_expired;
use crate::db::kv::KvStore;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::user::Session;
use chrono::Utc;

pub const KEY_USER_DATA: &str = "userData";
pub const KEY_RECORD_ID: &str = "recordId";
pub const KEY_LOGOUT_REASON: &str = "logoutReason";

/// Why the local session was dropped; shown once on the next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    Expired,
    Unauthorized,
}

impl LogoutReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoutReason::Expired => "expired",
            LogoutReason::Unauthorized => "unauthorized",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "expired" => Some(LogoutReason::Expired),
            "unauthorized" => Some(LogoutReason::Unauthorized),
            _ => None,
        }
    }

    pub fn notice(&self) -> &'static str {
        match self {
            LogoutReason::Expired => "Your session expired. Please log in again.",
            LogoutReason::Unauthorized => {
                "The server rejected your session. Please log in again."
            }
        }
    }
}

pub struct SessionManager {
    store: KvStore,
}

impl SessionManager {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }

    /// Stored session, if any. A corrupt blob is treated as no session.
    pub fn load(&self) -> AppResult<Option<Session>> {
        let Some(raw) = self.store.get(KEY_USER_DATA)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(s) => Ok(Some(s)),
            Err(e) => {
                log::warn!("discarding unreadable session data: {}", e);
                self.store.remove(KEY_USER_DATA)?;
                Ok(None)
            }
        }
    }

    /// Persist a fresh login. Any leftover day state from a previous user
    /// is dropped.
    pub fn save(&self, session: &Session) -> AppResult<()> {
        let blob = serde_json::to_string(session)?;
        self.store.set(KEY_USER_DATA, &blob)?;
        self.store.remove(KEY_RECORD_ID)?;
        Ok(())
    }

    /// Plain logout: wipe everything.
    pub fn clear(&self) -> AppResult<()> {
        self.store.clear()
    }

    /// Valid session or an error. Expired tokens force a logout; the
    /// returned error is the notice, so no reason is kept for the next run.
    pub fn require(&self) -> AppResult<Session> {
        let session = self.load()?.ok_or(AppError::NotLoggedIn)?;
        if is_token_expired(&session.token, Utc::now()) {
            self.drop_session(LogoutReason::Expired, false)?;
            return Err(AppError::SessionExpired);
        }
        Ok(session)
    }

    /// Drop the session and remember why, for a notice on the next run.
    pub fn force_logout(&self, reason: LogoutReason) -> AppResult<()> {
        self.drop_session(reason, true)
    }

    fn drop_session(&self, reason: LogoutReason, remember: bool) -> AppResult<()> {
        self.store.clear()?;
        if remember {
            self.store.set(KEY_LOGOUT_REASON, reason.as_str())?;
        }
        if let Err(e) = ttlog(
            &self.store.pool().conn,
            "logout",
            reason.as_str(),
            "Local session cleared",
        ) {
            log::warn!("failed to write internal log: {}", e);
        }
        Ok(())
    }

    /// One-time read of the logout reason.
    pub fn take_logout_reason(&self) -> AppResult<Option<LogoutReason>> {
        let raw = self.store.get(KEY_LOGOUT_REASON)?;
        if raw.is_some() {
            self.store.remove(KEY_LOGOUT_REASON)?;
        }
        Ok(raw.as_deref().and_then(LogoutReason::parse))
    }

    pub fn record_id(&self) -> AppResult<Option<String>> {
        self.store.get(KEY_RECORD_ID)
    }

    pub fn set_record_id(&self, id: &str) -> AppResult<()> {
        self.store.set(KEY_RECORD_ID, id)
    }

    pub fn clear_record_id(&self) -> AppResult<()> {
        self.store.remove(KEY_RECORD_ID)
    }
}
