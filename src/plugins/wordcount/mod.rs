//! Word count ledger, progress targets and the commands built on them.

pub mod data;
pub mod db;
pub mod process;
pub mod target;

pub use data::{Ledger, Recorded, UserLedgerEntry, WordCount};
pub use db::{JsonFileStorage, LedgerStore, MemoryStorage, Storage};
pub use target::{daily_target, DailyTarget, TargetSource};
