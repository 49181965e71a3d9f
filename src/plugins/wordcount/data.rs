use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::BotError;

static WORD_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?\d+$").unwrap());
static GOAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static GROUPING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,.]").unwrap());

/// Largest word count or goal a single command may carry.
pub const MAX_WORDS: u64 = 1_000_000_000;

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Per-user counters. `monthly` and `total` are always derived from `daily`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct UserLedgerEntry {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub daily: BTreeMap<String, u64>,
    #[serde(default)]
    pub monthly: BTreeMap<String, u64>,
    #[serde(default)]
    pub goal: BTreeMap<String, u64>,
}

impl UserLedgerEntry {
    pub fn monthly(&self, month_key: &str) -> u64 {
        self.monthly.get(month_key).copied().unwrap_or_default()
    }

    pub fn goal(&self, month_key: &str) -> Option<u64> {
        self.goal.get(month_key).copied().filter(|goal| *goal > 0)
    }

    fn recompute(&mut self, month_key: &str) {
        let monthly = saturating_sum(
            self.daily
                .iter()
                .filter(|(day, _)| day.starts_with(month_key))
                .map(|(_, count)| count),
        );
        self.monthly.insert(month_key.to_owned(), monthly);
        self.total = saturating_sum(self.daily.values());
    }
}

/// A parsed word count argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// `+N` / `-N`, added to the day
    Relative(i64),
    /// `N`, the desired total for the month
    Absolute(i64),
}

impl WordCount {
    pub fn parse(input: &str) -> Result<Self, BotError> {
        let invalid = || BotError::InvalidNumber(input.to_owned());
        if !WORD_COUNT.is_match(input) {
            return Err(invalid());
        }
        let value = input.parse::<i64>().map_err(|_| invalid())?;
        if value.unsigned_abs() > MAX_WORDS {
            return Err(invalid());
        }
        if input.starts_with(['+', '-']) {
            Ok(Self::Relative(value))
        } else {
            Ok(Self::Absolute(value))
        }
    }
}

/// Outcome of a successful `record_word_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub month_key: String,
    pub monthly: u64,
    pub total: u64,
    /// change actually applied to the day after clamping
    pub applied: i64,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Ledger {
    users: IndexMap<String, UserLedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, user_id: &str) -> Option<&UserLedgerEntry> {
        self.users.get(user_id)
    }

    pub fn get_or_create(&mut self, user_id: &str) -> &mut UserLedgerEntry {
        self.users.entry(user_id.to_owned()).or_default()
    }

    /// Parses `input` and applies it to `date`. Nothing changes on invalid input.
    pub fn record_word_count(
        &mut self,
        user_id: &str,
        date: NaiveDate,
        input: &str,
    ) -> Result<Recorded, BotError> {
        let count = WordCount::parse(input)?;
        Ok(self.apply(user_id, date, count))
    }

    pub fn apply(&mut self, user_id: &str, date: NaiveDate, count: WordCount) -> Recorded {
        let month_key = month_key(date);
        let day_key = day_key(date);

        let entry = self.get_or_create(user_id);
        let current_daily = entry.daily.get(&day_key).copied().unwrap_or_default();
        let current_monthly = entry.monthly(&month_key);

        let delta = match count {
            WordCount::Relative(delta) => delta,
            WordCount::Absolute(target) => target.saturating_sub(to_signed(current_monthly)),
        };
        let new_daily = to_signed(current_daily).saturating_add(delta).max(0) as u64;
        entry.daily.insert(day_key, new_daily);
        entry.recompute(&month_key);

        Recorded {
            monthly: entry.monthly(&month_key),
            total: entry.total,
            applied: to_signed(new_daily) - to_signed(current_daily),
            month_key,
        }
    }

    pub fn query_monthly(&self, user_id: &str, month_key: &str) -> u64 {
        self.get(user_id)
            .map(|entry| entry.monthly(month_key))
            .unwrap_or_default()
    }

    pub fn query_total(&self, user_id: &str) -> u64 {
        self.get(user_id).map(|entry| entry.total).unwrap_or_default()
    }

    pub fn goal(&self, user_id: &str, month_key: &str) -> Option<u64> {
        self.get(user_id).and_then(|entry| entry.goal(month_key))
    }

    /// Stores a goal, accepting `50 000`, `50,000` and `50.000`. Zero clears it.
    pub fn set_goal(&mut self, user_id: &str, month_key: &str, input: &str) -> Result<u64, BotError> {
        let normalized = GROUPING.replace_all(input, "");
        if !GOAL.is_match(&normalized) {
            return Err(BotError::InvalidNumber(input.to_owned()));
        }
        let goal = normalized
            .parse::<u64>()
            .ok()
            .filter(|goal| *goal <= MAX_WORDS)
            .ok_or_else(|| BotError::InvalidNumber(input.to_owned()))?;

        let entry = self.get_or_create(user_id);
        if goal == 0 {
            entry.goal.remove(month_key);
        } else {
            entry.goal.insert(month_key.to_owned(), goal);
        }
        Ok(goal)
    }

    /// Users with words in the month, highest first, ties in ledger order.
    pub fn top_leaderboard(&self, month_key: &str, limit: usize) -> Vec<(String, u64)> {
        let mut board: Vec<(String, u64)> = self
            .users
            .iter()
            .map(|(id, entry)| (id.to_owned(), entry.monthly(month_key)))
            .filter(|(_, count)| *count > 0)
            .collect();
        // sort_by is stable
        board.sort_by(|a, b| b.1.cmp(&a.1));
        board.truncate(limit);
        board
    }
}

fn saturating_sum<'a>(counts: impl Iterator<Item = &'a u64>) -> u64 {
    counts.fold(0u64, |sum, count| sum.saturating_add(*count))
}

fn to_signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
