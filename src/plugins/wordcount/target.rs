use chrono::{Datelike, NaiveDate};

use super::data::{month_key, UserLedgerEntry};

/// Cumulative NaNoWriMo pace, words expected by the end of day `n + 1`.
pub const NANO_PACE: [u64; 30] = [
    1667, 3333, 5000, 6667, 8333, 10000, 11667, 13333, 15000, 16667, 18333, 20000, 21667, 23333,
    25000, 26667, 28333, 30000, 31667, 33333, 35000, 36667, 38333, 40000, 41667, 43333, 45000,
    46667, 48333, 50000,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    Pace,
    Goal(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTarget {
    pub day: u32,
    pub target: u64,
    pub current: u64,
    pub source: TargetSource,
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = match date.month() {
        12 => (date.year() + 1, 1),
        month => (date.year(), month + 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Per-day pace for a goal, rounded up.
pub fn per_day(goal: u64, days_in_month: u32) -> u64 {
    goal.div_ceil(u64::from(days_in_month.max(1)))
}

/// Where the user should be on `date`.
///
/// In the challenge month without a goal the pace table applies, otherwise a
/// goal for the month is pro-rated linearly. `None` means there is nothing to
/// compare against, including day 31 of a challenge month.
pub fn daily_target(
    date: NaiveDate,
    entry: Option<&UserLedgerEntry>,
    challenge_month: u32,
) -> Option<DailyTarget> {
    let key = month_key(date);
    let goal = entry.and_then(|entry| entry.goal(&key));
    let current = entry.map(|entry| entry.monthly(&key)).unwrap_or_default();
    let day = date.day();

    match goal {
        None if date.month() == challenge_month => {
            let target = *NANO_PACE.get(day as usize - 1)?;
            Some(DailyTarget {
                day,
                target,
                current,
                source: TargetSource::Pace,
            })
        }
        Some(goal) => Some(DailyTarget {
            day,
            target: per_day(goal, days_in_month(date)).saturating_mul(u64::from(day)),
            current,
            source: TargetSource::Goal(goal),
        }),
        None => None,
    }
}
