use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cached::{Cached, TimedSizedCache};
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};
use xdg::BaseDirectories;

use crate::data_provider::RangeLimitsProvider;
use crate::error::RangeResult;
use crate::types::RangeLimits;

/// Key under which the last authoritative range limits are persisted
pub const RANGE_LIMITS_KEY: &str = "dateRangeLimits";

/// Default lifespan of the in-session fetch memo, in seconds
pub const DEFAULT_MEMO_LIFESPAN_SECS: u64 = 300;

/// Keyed persistent storage for range limits
///
/// Reads return `None` for missing or corrupt entries. Writes always overwrite.
#[async_trait]
pub trait RangeLimitsStore: Send + Sync {
    async fn read(&self, key: &str) -> Option<RangeLimits>;

    async fn write(&self, key: &str, limits: &RangeLimits) -> RangeResult<()>;
}

/// Stores each key as a JSON file inside a directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the XDG cache directory for this program
    pub fn from_xdg() -> Option<Self> {
        let pgm = env!("CARGO_PKG_NAME");
        let xdg_dirs = BaseDirectories::with_prefix(pgm);
        xdg_dirs.get_cache_home().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl RangeLimitsStore for FileStore {
    async fn read(&self, key: &str) -> Option<RangeLimits> {
        let path = self.entry_path(key);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                debug!("No cached range limits at {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(limits) => Some(limits),
            Err(e) => {
                warn!("Ignoring corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn write(&self, key: &str, limits: &RangeLimits) -> RangeResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(limits)?;
        tokio::fs::write(self.entry_path(key), json).await?;
        Ok(())
    }
}

/// In-memory store, used in tests and when no cache directory is available
///
/// Entries are kept as raw JSON so that corrupt entries behave like they do on disk.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw (possibly corrupt) entry
    pub fn with_raw(key: &str, raw: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), raw.to_string());
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Raw stored text for a key
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl RangeLimitsStore for MemoryStore {
    async fn read(&self, key: &str) -> Option<RangeLimits> {
        let raw = self.raw(key).await?;
        match serde_json::from_str(&raw) {
            Ok(limits) => Some(limits),
            Err(e) => {
                warn!("Ignoring corrupt in-memory entry {}: {}", key, e);
                None
            }
        }
    }

    async fn write(&self, key: &str, limits: &RangeLimits) -> RangeResult<()> {
        let json = serde_json::to_string(limits)?;
        self.entries.lock().await.insert(key.to_string(), json);
        Ok(())
    }
}

/// Memoizes authoritative fetches for a session
///
/// A successful response is reused until its lifespan runs out; failures are
/// never memoized. `refresh` drops the memo before fetching.
pub struct CachedRangeProvider<P> {
    inner: P,
    memo: Mutex<TimedSizedCache<(), RangeLimits>>,
}

impl<P: RangeLimitsProvider> CachedRangeProvider<P> {
    pub fn new(inner: P, lifespan_secs: u64) -> Self {
        Self {
            inner,
            memo: Mutex::new(TimedSizedCache::with_size_and_lifespan(1, lifespan_secs)),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of memoized responses (0 or 1)
    pub async fn memo_size(&self) -> usize {
        self.memo.lock().await.cache_size()
    }
}

#[async_trait]
impl<P: RangeLimitsProvider> RangeLimitsProvider for CachedRangeProvider<P> {
    async fn range_limits(&self) -> RangeResult<RangeLimits> {
        let memoized = self.memo.lock().await.cache_get(&()).cloned();
        if let Some(limits) = memoized {
            trace!("Range limits served from session memo");
            return Ok(limits);
        }

        let limits = self.inner.range_limits().await?;
        self.memo.lock().await.cache_set((), limits.clone());
        Ok(limits)
    }

    async fn refresh(&self) -> RangeResult<RangeLimits> {
        self.memo.lock().await.cache_clear();
        self.range_limits().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_provider::MockProvider;
    use crate::fixtures;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gameday-cache-{}-{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_file_store_missing_entry_reads_none() {
        let store = FileStore::new(scratch_dir("missing"));
        assert!(store.read(RANGE_LIMITS_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_file_store_write_then_read() {
        let dir = scratch_dir("write");
        let store = FileStore::new(&dir);
        let limits = RangeLimits {
            min_date: "2024-01-01".to_string(),
            max_date: "2024-12-31".to_string(),
        };

        store.write(RANGE_LIMITS_KEY, &limits).await.unwrap();
        assert_eq!(store.read(RANGE_LIMITS_KEY).await, Some(limits));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_file_store_overwrites() {
        let dir = scratch_dir("overwrite");
        let store = FileStore::new(&dir);
        let first = RangeLimits::from_dates(
            chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        );
        let second = fixtures::create_mock_range_limits();

        store.write(RANGE_LIMITS_KEY, &first).await.unwrap();
        store.write(RANGE_LIMITS_KEY, &second).await.unwrap();
        assert_eq!(store.read(RANGE_LIMITS_KEY).await, Some(second));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_file_store_corrupt_entry_reads_none() {
        let dir = scratch_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.json", RANGE_LIMITS_KEY)), "{not json").unwrap();

        let store = FileStore::new(&dir);
        assert!(store.read(RANGE_LIMITS_KEY).await.is_none());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_memory_store_corrupt_entry_reads_none() {
        let store = MemoryStore::with_raw(RANGE_LIMITS_KEY, r#"{"minDate": 7}"#);
        assert!(store.read(RANGE_LIMITS_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_memory_store_write_uses_camel_case() {
        let store = MemoryStore::new();
        store
            .write(RANGE_LIMITS_KEY, &fixtures::create_mock_range_limits())
            .await
            .unwrap();

        let raw = store.raw(RANGE_LIMITS_KEY).await.unwrap();
        assert!(raw.contains("\"minDate\""));
        assert!(raw.contains("\"maxDate\""));
    }

    #[tokio::test]
    async fn test_memo_serves_second_fetch() {
        let provider = CachedRangeProvider::new(MockProvider::new(), 60);

        let first = provider.range_limits().await.unwrap();
        let second = provider.range_limits().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.inner().calls(), 1);
        assert_eq!(provider.memo_size().await, 1);
    }

    #[tokio::test]
    async fn test_memo_refresh_refetches() {
        let provider = CachedRangeProvider::new(MockProvider::new(), 60);

        provider.range_limits().await.unwrap();
        provider.refresh().await.unwrap();

        assert_eq!(provider.inner().calls(), 2);
        assert_eq!(provider.memo_size().await, 1);
    }

    #[tokio::test]
    async fn test_memo_does_not_keep_failures() {
        let provider = CachedRangeProvider::new(MockProvider::failing(), 60);

        assert!(provider.range_limits().await.is_err());
        assert!(provider.range_limits().await.is_err());

        assert_eq!(provider.inner().calls(), 2);
        assert_eq!(provider.memo_size().await, 0);
    }
}
