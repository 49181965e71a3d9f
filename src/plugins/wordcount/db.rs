use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::fs;

use super::data::Ledger;
use crate::error::StorageError;

/// Where the ledger document lives.
#[allow(async_fn_in_trait)]
pub trait Storage {
    /// `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<Ledger>, StorageError>;

    /// Replaces the stored document with `ledger`.
    async fn save(&self, ledger: &Ledger) -> Result<(), StorageError>;
}

fn decode(input: &str) -> Result<Ledger, StorageError> {
    serde_json::from_str(input).map_err(StorageError::Corrupt)
}

/// Single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    async fn load(&self) -> Result<Option<Ledger>, StorageError> {
        match fs::read_to_string(&self.path).await {
            Ok(input) => decode(&input).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(ledger)?;
        fs::write(&self.path, json.as_bytes()).await?;
        Ok(())
    }
}

/// In-memory document, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: Mutex<Option<String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
            ..Default::default()
        }
    }

    /// Makes every following `save` fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn document(&self) -> Result<Option<String>, StorageError> {
        self.document
            .lock()
            .map(|doc| doc.clone())
            .map_err(|_| StorageError::Other(String::from("storage lock poisoned")))
    }
}

impl Storage for MemoryStorage {
    async fn load(&self) -> Result<Option<Ledger>, StorageError> {
        match self.document()? {
            Some(input) => decode(&input).map(Some),
            None => Ok(None),
        }
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Other(String::from("writes disabled")));
        }
        let json = serde_json::to_string_pretty(ledger)?;
        let mut document = self
            .document
            .lock()
            .map_err(|_| StorageError::Other(String::from("storage lock poisoned")))?;
        *document = Some(json);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// The ledger plus its backing storage.
///
/// Memory is authoritative between persists: a failed save is returned to the
/// caller and the in-memory ledger keeps the change.
#[derive(Debug)]
pub struct LedgerStore<S> {
    ledger: Ledger,
    storage: S,
}

impl<S: Storage> LedgerStore<S> {
    /// Loads the ledger, never fails. A missing document is created empty, a
    /// corrupt or unreadable one is replaced by an empty ledger in memory.
    pub async fn open(storage: S) -> Self {
        let ledger = match storage.load().await {
            Ok(Some(ledger)) => {
                tracing::info!(users = ledger.len(), "ledger loaded");
                ledger
            }
            Ok(None) => {
                let ledger = Ledger::new();
                if let Err(e) = storage.save(&ledger).await {
                    tracing::error!(error = %e, "failed to create empty ledger");
                }
                tracing::info!("no ledger found, starting empty");
                ledger
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load ledger, starting with empty ledger");
                Ledger::new()
            }
        };
        Self { ledger, storage }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn persist(&self) -> Result<(), StorageError> {
        self.storage.save(&self.ledger).await.inspect_err(|e| {
            tracing::error!(error = %e, "failed to write ledger");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn nov(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    #[tokio::test]
    async fn missing_file_is_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userData.json");

        let store = LedgerStore::open(JsonFileStorage::new(&path)).await;
        assert!(store.ledger().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
    }

    #[tokio::test]
    async fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userData.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = LedgerStore::open(JsonFileStorage::new(&path)).await;
        assert!(store.ledger().is_empty());
        // left alone until the next mutation
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userData.json");

        let mut store = LedgerStore::open(JsonFileStorage::new(&path)).await;
        store.ledger_mut().record_word_count("123456789", nov(3), "+1500").unwrap();
        store.ledger_mut().set_goal("123456789", "2024-11", "50000").unwrap();
        store.ledger_mut().record_word_count("42", nov(4), "900").unwrap();
        store.persist().await.unwrap();

        let reopened = LedgerStore::open(JsonFileStorage::new(&path)).await;
        assert_eq!(reopened.ledger(), store.ledger());
        assert_eq!(reopened.ledger().query_monthly("42", "2024-11"), 900);
        assert_eq!(reopened.ledger().goal("123456789", "2024-11"), Some(50000));
    }

    #[tokio::test]
    async fn reads_legacy_entries_without_goal() {
        let storage = MemoryStorage::with_document(
            r#"{"7": {"total": 10, "daily": {"2024-11-01": 10}, "monthly": {"2024-11": 10}}}"#,
        );
        let store = LedgerStore::open(storage).await;
        assert_eq!(store.ledger().query_total("7"), 10);
        assert!(store.ledger().get("7").unwrap().goal.is_empty());
    }

    #[tokio::test]
    async fn poisoned_memory_is_not_overwritten() {
        let storage = MemoryStorage::with_document(r#"{"7": {"total": 3}}"#);
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = storage.document.lock().unwrap();
            panic!("poison");
        }));

        assert!(matches!(storage.document(), Err(StorageError::Other(_))));
        let store = LedgerStore::open(storage).await;
        assert!(store.ledger().is_empty());
        // open treated it as unreadable, not missing, so nothing was written
        assert_eq!(store.storage().writes(), 0);
    }

    #[tokio::test]
    async fn failed_write_keeps_memory() {
        let mut store = LedgerStore::open(MemoryStorage::new()).await;
        assert_eq!(store.storage().writes(), 1);

        store.storage().fail_writes(true);
        store.ledger_mut().record_word_count("ada", nov(1), "+10").unwrap();
        assert!(store.persist().await.is_err());
        assert_eq!(store.ledger().query_monthly("ada", "2024-11"), 10);
        assert_eq!(store.storage().writes(), 1);

        store.storage().fail_writes(false);
        store.persist().await.unwrap();
        let saved = store.storage().document().unwrap().unwrap();
        assert!(saved.contains("\"2024-11-01\": 10"));
    }
}
