//! Localized strings, command aliases and month names.
//!
//! Loaded once at startup from `<lang_dir>/<language>.json`, falling back to
//! `en.json` when the requested language cannot be read.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Canonical command -> localized alias.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Commands {
    pub help: String,
    pub leaderboard: String,
    pub wordcount: String,
    pub words: String,
    pub goal: String,
    pub cheer: String,
    pub congrats: String,
    pub hydrate: String,
    pub prompt: String,
    /// argument keyword of `words`
    pub all: String,
    /// argument keyword of `words`
    pub yesterday: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Strings {
    pub commands: Commands,
    pub months: [String; 12],
    pub help: String,
    pub leaderboard_title: String,
    pub leaderboard_entry: String,
    pub leaderboard_empty: String,
    pub unknown_user: String,
    pub wordcount_today: String,
    pub words_show_monthly: String,
    pub words_show_all: String,
    pub words_set: String,
    pub goal_none: String,
    pub goal_show: String,
    pub goal_set: String,
    pub invalid_number: String,
    pub error_saving: String,
    pub hydrate: String,
    pub cheer: Vec<String>,
    pub congrats: Vec<String>,
}

impl Strings {
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&input)
    }

    pub fn load(dir: impl AsRef<Path>, language: &str) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        match Self::from_file(dir.join(format!("{language}.json"))) {
            Ok(strings) => {
                tracing::info!(language, "loaded language file");
                Ok(strings)
            }
            Err(e) => {
                tracing::warn!(language, error = %e, "could not load language file, falling back to en.json");
                Self::from_file(dir.join("en.json"))
            }
        }
    }
}

/// Writing prompts served by the `prompt` command.
pub fn load_prompts(path: impl AsRef<Path>) -> Result<Vec<String>, ConfigError> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&input)?)
}
