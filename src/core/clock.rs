use crate::api::ApiClient;
use crate::core::context::AppContext;
use crate::core::telemetry::Outcome;
use crate::core::timer::reconstruct;
use crate::errors::{AppError, AppResult};
use crate::models::location::Coordinates;
use crate::models::record::AttendanceRecord;
use crate::models::session_state::SessionState;
use crate::models::user::Session;
use crate::models::workday::{ClockAction, WorkDay};
use chrono::{DateTime, Utc};

/// Today's record as the server sees it, with the derived stopwatch state.
#[derive(Debug, Clone)]
pub struct DayStatus {
    pub session: Session,
    pub record: Option<AttendanceRecord>,
    pub day: WorkDay,
    pub state: SessionState,
}

pub struct ClockLogic;

impl ClockLogic {
    /// Fetch today's record, validate it and rebuild the timer as of `now`.
    /// Keeps the cached record id in step with the server.
    pub fn status(ctx: &AppContext, now: DateTime<Utc>) -> AppResult<DayStatus> {
        let session = ctx.session.require()?;
        let api = ctx.authed_api(&session);
        let (record, day) = Self::load_today(ctx, &api)?;

        match (&record, day) {
            (Some(rec), WorkDay::Working { .. })
            | (Some(rec), WorkDay::OnLunch { .. })
            | (Some(rec), WorkDay::BackFromLunch { .. })
                if !rec.id.is_empty() =>
            {
                ctx.session.set_record_id(&rec.id)?
            }
            (_, WorkDay::Finished { .. }) | (None, _) => ctx.session.clear_record_id()?,
            _ => {}
        }

        let state = match &record {
            Some(rec) => reconstruct(rec, now),
            None => reconstruct(&AttendanceRecord::default(), now),
        };

        Ok(DayStatus {
            session,
            record,
            day,
            state,
        })
    }

    fn load_today(
        ctx: &AppContext,
        api: &ApiClient,
    ) -> AppResult<(Option<AttendanceRecord>, WorkDay)> {
        let today = ctx.today()?;
        let record = ctx.guard(api.today_record(today))?;
        let day = match &record {
            Some(rec) => rec.validate()?,
            None => WorkDay::NotStarted,
        };
        Ok((record, day))
    }

    /// Register one clock action.
    ///
    /// The current state is refetched first and the transition checked
    /// locally, so a repeated command does not reach the server twice.
    pub fn perform(
        ctx: &AppContext,
        action: ClockAction,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> AppResult<&'static str> {
        let session = ctx.session.require()?;
        let api = ctx.authed_api(&session);

        let (record, day) = Self::load_today(ctx, &api)?;
        day.apply(action, Utc::now())?;

        let coords = Coordinates::resolve(lat, lon, ctx.cfg.location)?;
        if coords.is_none() && ctx.cfg.require_location {
            return Err(AppError::LocationUnavailable(
                "location permission denied: pass --lat/--lon or set `location` in the config"
                    .into(),
            ));
        }

        let result = Self::send(ctx, &api, &session, action, record.as_ref(), coords);

        let tele = ctx.telemetry(&api);
        match &result {
            Ok(target) => tele.emit(
                Some(&session.user),
                action.path(),
                "POST",
                action.as_str(),
                Outcome::Success,
                &format!("{} ({})", action.success_message(), target),
            ),
            Err(e) => tele.emit(
                Some(&session.user),
                action.path(),
                "POST",
                action.as_str(),
                Outcome::Failure,
                &e.to_string(),
            ),
        }

        result.map(|_| action.success_message())
    }

    pub fn clock_in(ctx: &AppContext, lat: Option<f64>, lon: Option<f64>) -> AppResult<&'static str> {
        Self::perform(ctx, ClockAction::ClockIn, lat, lon)
    }

    pub fn lunch_start(
        ctx: &AppContext,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> AppResult<&'static str> {
        Self::perform(ctx, ClockAction::LunchStart, lat, lon)
    }

    pub fn lunch_end(ctx: &AppContext, lat: Option<f64>, lon: Option<f64>) -> AppResult<&'static str> {
        Self::perform(ctx, ClockAction::LunchEnd, lat, lon)
    }

    pub fn clock_out(ctx: &AppContext, lat: Option<f64>, lon: Option<f64>) -> AppResult<&'static str> {
        Self::perform(ctx, ClockAction::ClockOut, lat, lon)
    }

    /// Returns the record id the action applied to.
    fn send(
        ctx: &AppContext,
        api: &ApiClient,
        session: &Session,
        action: ClockAction,
        record: Option<&AttendanceRecord>,
        coords: Option<Coordinates>,
    ) -> AppResult<String> {
        let record_id = match action {
            ClockAction::ClockIn => {
                let id = ctx.guard(api.clock_in(&session.user.id, coords))?;
                ctx.session.set_record_id(&id)?;
                id
            }
            ClockAction::LunchStart => {
                let id = Self::open_record_id(ctx, record)?;
                ctx.guard(api.lunch_start(&id, coords))?;
                id
            }
            ClockAction::LunchEnd => {
                let id = Self::open_record_id(ctx, record)?;
                ctx.guard(api.lunch_end(&id, coords))?;
                id
            }
            ClockAction::ClockOut => {
                let id = Self::open_record_id(ctx, record)?;
                ctx.guard(api.clock_out(&id, coords))?;
                ctx.session.clear_record_id()?;
                id
            }
        };
        Ok(record_id)
    }

    /// Id of today's open record: the freshly fetched one wins over the cache.
    fn open_record_id(ctx: &AppContext, record: Option<&AttendanceRecord>) -> AppResult<String> {
        if let Some(rec) = record
            && !rec.id.is_empty()
        {
            return Ok(rec.id.clone());
        }
        ctx.session.record_id()?.ok_or(AppError::NoRecordForToday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::kv::KvStore;

    fn ctx() -> AppContext {
        AppContext::new(Config::default(), KvStore::in_memory().unwrap())
    }

    fn rec(id: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn fetched_id_beats_cached_one() {
        let ctx = ctx();
        ctx.session.set_record_id("cached").unwrap();
        let id = ClockLogic::open_record_id(&ctx, Some(&rec("fresh"))).unwrap();
        assert_eq!(id, "fresh");
    }

    #[test]
    fn record_without_id_uses_the_cache() {
        let ctx = ctx();
        ctx.session.set_record_id("cached").unwrap();
        assert_eq!(
            ClockLogic::open_record_id(&ctx, Some(&rec(""))).unwrap(),
            "cached"
        );
        assert_eq!(ClockLogic::open_record_id(&ctx, None).unwrap(), "cached");
    }

    #[test]
    fn no_id_anywhere_is_reported() {
        let ctx = ctx();
        assert!(matches!(
            ClockLogic::open_record_id(&ctx, Some(&rec(""))),
            Err(AppError::NoRecordForToday)
        ));
    }
}
