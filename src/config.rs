use std::collections::HashMap;
use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG: &str = "config/wordbot.toml";
pub const MAX_LEADERBOARD: usize = 10;

// config struct
// every field has a default so an empty or partial file still boots
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BotConf {
    pub prefix: String,
    pub language: String,
    pub lang_dir: String,
    pub prompts_path: String,
    pub data_path: String,
    pub timezone: String,
    pub challenge_month: u32,
    pub leaderboard_limit: usize,
    /// user id -> display name, used by the console front end
    pub names: HashMap<String, String>,
}

impl Default for BotConf {
    fn default() -> Self {
        Self {
            prefix: String::from("!"),
            language: String::from("en"),
            lang_dir: String::from("lang"),
            prompts_path: String::from("lang/prompts.json"),
            data_path: String::from("userData.json"),
            timezone: String::from("America/Toronto"),
            challenge_month: 11,
            leaderboard_limit: MAX_LEADERBOARD,
            names: HashMap::new(),
        }
    }
}

impl BotConf {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let conf: Self = toml::from_str(input)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Missing file means defaults, unreadable or invalid file is an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(input) => Self::from_toml(&input),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn time_zone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::TimeZone(self.timezone.clone()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=12).contains(&self.challenge_month) {
            return Err(ConfigError::ChallengeMonth(self.challenge_month));
        }
        if !(1..=MAX_LEADERBOARD).contains(&self.leaderboard_limit) {
            return Err(ConfigError::LeaderboardLimit(self.leaderboard_limit));
        }
        self.time_zone().map(|_| ())
    }
}
