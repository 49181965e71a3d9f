use std::collections::HashMap;

use crate::error::BotError;

/// Resolves user ids to display names, implemented by the messaging front end.
#[allow(async_fn_in_trait)]
pub trait Directory {
    async fn display_name(&self, user_id: &str) -> Result<String, BotError>;
}

/// Fixed id -> name table, used by the console front end and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    names: HashMap<String, String>,
}

impl StaticDirectory {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    pub fn insert(mut self, user_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(user_id.into(), name.into());
        self
    }
}

impl Directory for StaticDirectory {
    async fn display_name(&self, user_id: &str) -> Result<String, BotError> {
        self.names
            .get(user_id)
            .cloned()
            .ok_or_else(|| BotError::UnknownUser(user_id.to_owned()))
    }
}
