use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;
use futures_util::future::join_all;

use super::{
    data::month_key,
    db::Storage,
    target::{daily_target, days_in_month, per_day},
};
use crate::{
    common::{display_month, fill},
    directory::Directory,
    WordBot,
};

impl<S: Storage, D: Directory> WordBot<S, D> {
    fn month_name(&self, date: NaiveDate, now: DateTime<Tz>, cap: bool) -> String {
        display_month(date, now.year(), &self.strings.months, cap)
    }

    /// `words`, `words all`, `words <n|+n|-n> [yesterday]`
    pub async fn words(&self, user_id: &str, args: &[String], now: DateTime<Tz>) -> String {
        let commands = &self.strings.commands;
        let today = now.date_naive();
        let date = match args.get(1) {
            Some(modifier) if modifier.eq_ignore_ascii_case(&commands.yesterday) => {
                today.pred_opt().unwrap_or(today)
            }
            _ => today,
        };
        let key = month_key(date);
        let month = self.month_name(date, now, true);

        let mut store = self.store.lock().await;

        let Some(input) = args.first() else {
            return fill(
                &self.strings.words_show_monthly,
                &[
                    ("month", month),
                    ("monthly", store.ledger().query_monthly(user_id, &key).to_string()),
                ],
            );
        };

        if input.to_lowercase() == commands.all.to_lowercase() {
            return fill(
                &self.strings.words_show_all,
                &[
                    ("month", self.month_name(date, now, false)),
                    ("monthly", store.ledger().query_monthly(user_id, &key).to_string()),
                    ("total", store.ledger().query_total(user_id).to_string()),
                ],
            );
        }

        let recorded = match store.ledger_mut().record_word_count(user_id, date, input) {
            Ok(recorded) => recorded,
            Err(e) => {
                tracing::debug!(user_id, error = %e, "rejected word count");
                return self.strings.invalid_number.to_owned();
            }
        };
        tracing::info!(
            user_id,
            month = %recorded.month_key,
            monthly = recorded.monthly,
            applied = recorded.applied,
            "word count recorded"
        );

        match store.persist().await {
            Ok(()) => fill(
                &self.strings.words_set,
                &[("month", month), ("monthly", recorded.monthly.to_string())],
            ),
            Err(_) => self.strings.error_saving.to_owned(),
        }
    }

    /// `wordcount`: today's target against the month so far
    pub async fn wordcount(&self, user_id: &str, now: DateTime<Tz>) -> String {
        let date = now.date_naive();
        let store = self.store.lock().await;

        match daily_target(date, store.ledger().get(user_id), self.conf.challenge_month) {
            Some(target) => fill(
                &self.strings.wordcount_today,
                &[
                    ("day", target.day.to_string()),
                    ("target", target.target.to_string()),
                    ("currentWordCount", target.current.to_string()),
                ],
            ),
            None => fill(
                &self.strings.goal_none,
                &[("month", self.month_name(date, now, true))],
            ),
        }
    }

    /// `goal` shows the month's goal, `goal <n>` sets it
    pub async fn goal(&self, user_id: &str, args: &[String], now: DateTime<Tz>) -> String {
        let date = now.date_naive();
        let key = month_key(date);
        let month = self.month_name(date, now, true);
        let days = days_in_month(date);

        let mut store = self.store.lock().await;

        if args.is_empty() {
            return match store.ledger().goal(user_id, &key) {
                Some(goal) => fill(
                    &self.strings.goal_show,
                    &[
                        ("month", month),
                        ("goal", goal.to_string()),
                        ("perDay", per_day(goal, days).to_string()),
                    ],
                ),
                None => fill(&self.strings.goal_none, &[("month", month)]),
            };
        }

        // "50 000" arrives as two arguments
        let input = args.concat();
        let goal = match store.ledger_mut().set_goal(user_id, &key, &input) {
            Ok(goal) => goal,
            Err(e) => {
                tracing::debug!(user_id, error = %e, "rejected goal");
                return self.strings.invalid_number.to_owned();
            }
        };
        tracing::info!(user_id, month = %key, goal, "goal set");

        if store.persist().await.is_err() {
            return self.strings.error_saving.to_owned();
        }
        if goal == 0 {
            return fill(&self.strings.goal_none, &[("month", month)]);
        }
        fill(
            &self.strings.goal_set,
            &[
                ("month", month),
                ("perDay", per_day(goal, days).to_string()),
                ("goal", goal.to_string()),
            ],
        )
    }

    /// `leaderboard`: top writers of the current month
    pub async fn leaderboard(&self, now: DateTime<Tz>) -> String {
        let date = now.date_naive();
        let month = self.month_name(date, now, false);

        // names are resolved after the lock is released
        let board = self
            .store
            .lock()
            .await
            .ledger()
            .top_leaderboard(&month_key(date), self.conf.leaderboard_limit);

        if board.is_empty() {
            return fill(&self.strings.leaderboard_empty, &[("month", month)]);
        }

        let lines = join_all(board.iter().enumerate().map(|(index, (user_id, count))| async move {
            let username = match self.directory.display_name(user_id).await {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!(error = %e, "falling back to placeholder name");
                    fill(&self.strings.unknown_user, &[("id", user_id.to_owned())])
                }
            };
            fill(
                &self.strings.leaderboard_entry,
                &[
                    ("rank", (index + 1).to_string()),
                    ("username", username),
                    ("count", count.to_string()),
                ],
            )
        }))
        .await;

        fill(
            &self.strings.leaderboard_title,
            &[("month", month), ("entries", lines.join("\n"))],
        )
    }
}
