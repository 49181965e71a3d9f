use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::sync::Mutex;

use crate::{
    common::split_command,
    config::BotConf,
    directory::Directory,
    error::ConfigError,
    lang::{Commands, Strings},
    plugins::{
        message::message_main,
        wordcount::{LedgerStore, Storage},
    },
};

pub mod common;
pub mod config;
pub mod directory;
pub mod error;
pub mod lang;
pub mod plugins;

/// A reply produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// answer to the author's message
    Reply(String),
    /// plain message to the channel
    Channel(String),
}

impl Outgoing {
    pub fn content(&self) -> &str {
        match self {
            Outgoing::Reply(content) | Outgoing::Channel(content) => content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Leaderboard,
    WordCount,
    Cheer,
    Congrats,
    Hydrate,
    Prompt,
    Words,
    Goal,
}

impl Command {
    /// Matches an already lowercased command word against the localized aliases.
    pub fn resolve(word: &str, commands: &Commands) -> Option<Self> {
        let is = |alias: &str| word == alias.to_lowercase();
        if word == "help" || is(commands.help.as_str()) {
            return Some(Command::Help);
        }
        [
            (Command::Leaderboard, &commands.leaderboard),
            (Command::WordCount, &commands.wordcount),
            (Command::Cheer, &commands.cheer),
            (Command::Congrats, &commands.congrats),
            (Command::Hydrate, &commands.hydrate),
            (Command::Prompt, &commands.prompt),
            (Command::Words, &commands.words),
            (Command::Goal, &commands.goal),
        ]
        .into_iter()
        .find(|(_, alias)| is(alias.as_str()))
        .map(|(command, _)| command)
    }
}

/// Shared bot state. The ledger store sits behind one lock, held for the whole
/// read, update and persist of a command.
pub struct WordBot<S, D> {
    store: Mutex<LedgerStore<S>>,
    directory: D,
    strings: Strings,
    prompts: Vec<String>,
    conf: BotConf,
    tz: Tz,
}

impl<S: Storage, D: Directory> WordBot<S, D> {
    pub fn new(
        conf: BotConf,
        strings: Strings,
        prompts: Vec<String>,
        store: LedgerStore<S>,
        directory: D,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            tz: conf.time_zone()?,
            store: Mutex::new(store),
            directory,
            strings,
            prompts,
            conf,
        })
    }

    /// Current time in the configured zone.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    pub fn store(&self) -> &Mutex<LedgerStore<S>> {
        &self.store
    }

    /// Handles one chat message. `None` when it is not a command for us.
    pub async fn on_message(
        &self,
        author: &str,
        content: &str,
        now: DateTime<Tz>,
    ) -> Option<Outgoing> {
        let (word, args) = split_command(content, &self.conf.prefix)?;
        let command = Command::resolve(&word, &self.strings.commands)?;
        tracing::debug!(author, ?command, ?args, "command");

        let reply = match command {
            Command::Words => self.words(author, &args, now).await,
            Command::WordCount => self.wordcount(author, now).await,
            Command::Goal => self.goal(author, &args, now).await,
            Command::Leaderboard => self.leaderboard(now).await,
            _ => {
                return message_main(command, &self.strings, &self.prompts, &mut rand::thread_rng())
            }
        };
        Some(Outgoing::Reply(reply))
    }
}
