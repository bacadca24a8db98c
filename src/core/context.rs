use crate::api::ApiClient;
use crate::config::Config;
use crate::core::calendar::today_in;
use crate::core::session::{LogoutReason, SessionManager};
use crate::core::telemetry::Telemetry;
use crate::db::kv::KvStore;
use crate::errors::AppResult;
use crate::models::user::Session;
use chrono::NaiveDate;

/// What every command needs: configuration plus the session store.
pub struct AppContext {
    pub cfg: Config,
    pub session: SessionManager,
}

impl AppContext {
    pub fn new(cfg: Config, store: KvStore) -> Self {
        Self {
            cfg,
            session: SessionManager::new(store),
        }
    }

    pub fn open(cfg: Config) -> AppResult<Self> {
        let store = KvStore::open(&cfg.database)?;
        Ok(Self::new(cfg, store))
    }

    /// Client without credentials (login).
    pub fn api(&self) -> ApiClient {
        ApiClient::from_config(&self.cfg)
    }

    pub fn authed_api(&self, session: &Session) -> ApiClient {
        ApiClient::from_config(&self.cfg).with_token(&session.token)
    }

    pub fn today(&self) -> AppResult<NaiveDate> {
        Ok(today_in(self.cfg.tz()?))
    }

    pub fn telemetry<'a>(&'a self, api: &'a ApiClient) -> Telemetry<'a> {
        let remote = self.cfg.telemetry.then_some(api);
        Telemetry::new(self.session.store().pool(), remote, &self.cfg.device_name)
    }

    /// A 401 from the server invalidates the local session.
    pub fn guard<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if let Err(e) = &result
            && e.is_auth()
            && let Err(clear) = self.session.force_logout(LogoutReason::Unauthorized)
        {
            log::warn!("failed to clear session after 401: {}", clear);
        }
        result
    }
}
