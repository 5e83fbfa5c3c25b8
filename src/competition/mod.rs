//! The daily competition state machine.
//!
//! The phase is never stored: it is recomputed on every request as a pure
//! function of one clock snapshot plus the active season and today's schedule
//! row. That keeps it consistent across restarts and concurrent handlers.

mod time;

pub use time::{minutes_or_zero, parse_time_to_minutes, InvalidTimeFormat};

use chrono::{Local, NaiveDate, Timelike};
use color_eyre::Result;

use crate::db::{Db, ScheduleDay, Season};

/// Phase of a resolved competition day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    /// Before today's fajr boundary.
    WaitingFajr,
    /// Between fajr and maghrib: questions served, answers accepted.
    Open,
    /// After maghrib: answers closed, results revealed.
    ClosedShowResult,
}

/// The schedule context of a resolved day, carried along with its phase so
/// handlers never re-resolve.
#[derive(Debug, Clone)]
pub struct CompetitionDay {
    pub season_id: i64,
    pub day_number: i64,
    pub fajr: Option<String>,
    pub maghrib: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub enum Status {
    NoSeason,
    Upcoming { season_id: i64, days_left: i64 },
    Day { phase: DayPhase, day: CompetitionDay },
    Ended { winner_id: i64 },
}

impl Status {
    /// The wire-visible status string.
    pub fn label(&self) -> &'static str {
        match self {
            Status::NoSeason => "no_season",
            Status::Upcoming { .. } => "upcoming",
            Status::Day { phase, .. } => match phase {
                DayPhase::WaitingFajr => "waiting_fajr",
                DayPhase::Open => "open",
                DayPhase::ClosedShowResult => "closed_show_result",
            },
            Status::Ended { .. } => "ended",
        }
    }

    pub fn day(&self) -> Option<&CompetitionDay> {
        match self {
            Status::Day { day, .. } => Some(day),
            _ => None,
        }
    }

    /// The day context, but only while answers are accepted.
    pub fn open_day(&self) -> Option<&CompetitionDay> {
        match self {
            Status::Day {
                phase: DayPhase::Open,
                day,
            } => Some(day),
            _ => None,
        }
    }

    /// Whether today's outcome may be shown (results revealed).
    pub fn reveals_result(&self) -> bool {
        matches!(
            self,
            Status::Day {
                phase: DayPhase::ClosedShowResult,
                ..
            } | Status::Ended { .. }
        )
    }
}

/// A single clock read, reused for every comparison within one evaluation so
/// the phase decision cannot straddle a minute boundary.
#[derive(Debug, Clone, Copy)]
pub struct Now {
    pub date: NaiveDate,
    pub minutes: u32,
}

pub fn clock_now() -> Now {
    let now = Local::now();
    Now {
        date: now.date_naive(),
        minutes: now.time().hour() * 60 + now.time().minute(),
    }
}

/// Derives the competition status from resolver output.
///
/// A recorded winner ends the whole season regardless of the clock. An active
/// season with no schedule row for today is a data gap and reads as
/// `no_season`: the competition never opens without prayer-time boundaries.
pub fn evaluate(
    now_minutes: u32,
    today: NaiveDate,
    season: Option<&Season>,
    schedule: Option<&ScheduleDay>,
) -> Status {
    let Some(season) = season else {
        return Status::NoSeason;
    };

    if let Some(winner_id) = season.winner_user_id {
        return Status::Ended { winner_id };
    }

    if today < season.start_date {
        return Status::Upcoming {
            season_id: season.id,
            days_left: (season.start_date - today).num_days(),
        };
    }

    let Some(day) = schedule else {
        return Status::NoSeason;
    };

    let fajr = minutes_or_zero(day.fajr.as_deref());
    let maghrib = minutes_or_zero(day.maghrib.as_deref());

    let phase = if now_minutes < fajr {
        DayPhase::WaitingFajr
    } else if now_minutes < maghrib {
        DayPhase::Open
    } else {
        DayPhase::ClosedShowResult
    };

    Status::Day {
        phase,
        day: CompetitionDay {
            season_id: day.season_id,
            day_number: day.day_number,
            fajr: day.fajr.clone(),
            maghrib: day.maghrib.clone(),
            date: day.gregorian_date,
        },
    }
}

/// Resolves today against the active season and evaluates the state machine.
pub async fn current(db: &Db) -> Result<Status> {
    let now = clock_now();
    let season = db.active_season().await?;
    let schedule = match &season {
        Some(season) => db.schedule_for_date(season.id, now.date).await?,
        None => None,
    };
    Ok(evaluate(now.minutes, now.date, season.as_ref(), schedule.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn season() -> Season {
        Season {
            id: 1,
            year_hijri: Some("1447".into()),
            start_date: date("2026-02-18"),
            end_date: date("2026-03-19"),
            total_days: 30,
            is_active: true,
            winner_user_id: None,
        }
    }

    fn schedule(fajr: &str, maghrib: &str) -> ScheduleDay {
        ScheduleDay {
            id: 1,
            season_id: 1,
            day_number: 3,
            day_name: Some("الجمعة".into()),
            gregorian_date: date("2026-02-20"),
            fajr: Some(fajr.into()),
            sunrise: None,
            dhuhr: None,
            asr: None,
            maghrib: Some(maghrib.into()),
            isha: None,
        }
    }

    #[test]
    fn phase_follows_boundaries() {
        // fajr 05:15 -> 315, maghrib 18:00 -> 1080
        let s = season();
        let day = schedule("05:15 ص", "06:00 م");
        let today = date("2026-02-20");

        let at = |m| evaluate(m, today, Some(&s), Some(&day)).label().to_owned();
        assert_eq!(at(300), "waiting_fajr");
        assert_eq!(at(500), "open");
        assert_eq!(at(1100), "closed_show_result");
    }

    #[test]
    fn boundary_minutes_are_inclusive_exclusive() {
        let s = season();
        let day = schedule("05:15 ص", "06:00 م");
        let today = date("2026-02-20");

        // fajr minute itself opens; maghrib minute itself closes
        assert_eq!(evaluate(315, today, Some(&s), Some(&day)).label(), "open");
        assert_eq!(
            evaluate(1080, today, Some(&s), Some(&day)).label(),
            "closed_show_result"
        );
    }

    #[test]
    fn no_active_season() {
        assert_eq!(
            evaluate(500, date("2026-02-20"), None, None).label(),
            "no_season"
        );
    }

    #[test]
    fn upcoming_counts_days_left() {
        let s = season();
        let status = evaluate(500, date("2026-02-15"), Some(&s), None);
        match status {
            Status::Upcoming { days_left, .. } => assert_eq!(days_left, 3),
            other => panic!("expected upcoming, got {other:?}"),
        }
    }

    #[test]
    fn winner_short_circuits_everything() {
        let mut s = season();
        s.winner_user_id = Some(42);
        let day = schedule("05:15 ص", "06:00 م");

        // mid-open window, but the season already has a winner
        let status = evaluate(500, date("2026-02-20"), Some(&s), Some(&day));
        match status {
            Status::Ended { winner_id } => assert_eq!(winner_id, 42),
            other => panic!("expected ended, got {other:?}"),
        }

        // even before the season's nominal start
        let status = evaluate(500, date("2026-02-10"), Some(&s), None);
        assert_eq!(status.label(), "ended");
    }

    #[test]
    fn schedule_gap_reads_as_no_season() {
        let s = season();
        let status = evaluate(500, date("2026-02-20"), Some(&s), None);
        assert_eq!(status.label(), "no_season");
    }

    #[test]
    fn unparseable_times_degrade_to_closed() {
        // Both boundaries fall back to 0, so any time past midnight reads as
        // closed. Documented degradation, not a crash.
        let s = season();
        let mut day = schedule("??", "??");
        day.fajr = Some("??".into());
        day.maghrib = None;
        let status = evaluate(500, date("2026-02-20"), Some(&s), Some(&day));
        assert_eq!(status.label(), "closed_show_result");
    }

    #[test]
    fn reveal_gating() {
        let s = season();
        let day = schedule("05:15 ص", "06:00 م");
        let today = date("2026-02-20");

        assert!(!evaluate(300, today, Some(&s), Some(&day)).reveals_result());
        assert!(!evaluate(500, today, Some(&s), Some(&day)).reveals_result());
        assert!(evaluate(1100, today, Some(&s), Some(&day)).reveals_result());
        assert!(evaluate(500, today, Some(&s), Some(&day)).open_day().is_some());
        assert!(evaluate(300, today, Some(&s), Some(&day)).open_day().is_none());
    }
}
