//! BLZ lookup-table store.
//!
//! Maps 8-digit German routing numbers (BLZ) to check-digit method ids. The
//! backing file is the binary LUT published for the kontocheck ecosystem,
//! cached under a per-user directory and downloaded once when absent:
//! - Format 1.x: delta stream with an Adler-32 application checksum.
//! - Format 2.0: slot directory over zlib-compressed blocks.
//!
//! The store initializes lazily under a one-shot latch and fails soft: when
//! the file cannot be fetched or decoded, lookups return not-found and the
//! caller reports the account method as unavailable instead of erroring.

mod error;
mod fetch;
mod parse;

pub use error::LutError;

use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::parse::LutData;

/// Lazily initialized BLZ → method-id mapping.
///
/// The first `lookup`/`ensure_loaded` on any thread acquires and parses the
/// file under the latch; concurrent first callers block on it. The outcome is
/// cached for the lifetime of the store, a failure included. Operators force
/// a retry by deleting the cache file and restarting.
pub struct LutStore {
    cache_dir: PathBuf,
    url: String,
    state: OnceLock<Option<LutData>>,
}

impl LutStore {
    pub fn new(cache_dir: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            url: url.into(),
            state: OnceLock::new(),
        }
    }

    /// Store wired from the environment: `STPS_CACHE_DIR` and `STPS_LUT_URL`,
    /// with `~/.stps` and the canonical download URL as defaults.
    pub fn from_env() -> Self {
        let cache_dir = fetch::default_cache_dir().unwrap_or_else(|| PathBuf::from(".stps"));
        Self::new(cache_dir, fetch::default_lut_url())
    }

    /// Method id for an 8-digit routing number. Loads the store on first use;
    /// `None` for unknown routing numbers and whenever the store is unloaded.
    pub fn lookup(&self, blz: &str) -> Option<u8> {
        self.data()?.get(blz)
    }

    /// Forces initialization. True when the mapping is usable.
    pub fn ensure_loaded(&self) -> bool {
        self.data().is_some()
    }

    /// True once a load has succeeded. Does not trigger a load.
    pub fn is_loaded(&self) -> bool {
        self.state.get().is_some_and(Option::is_some)
    }

    /// Number of decoded main-office entries; 0 while unloaded. Does not
    /// trigger a load.
    pub fn entry_count(&self) -> usize {
        self.state
            .get()
            .and_then(Option::as_ref)
            .map_or(0, LutData::len)
    }

    fn data(&self) -> Option<&LutData> {
        self.state
            .get_or_init(|| match self.load() {
                Ok(data) => {
                    info!(entries = data.len(), "BLZ lookup table loaded");
                    Some(data)
                }
                Err(e) => {
                    warn!("BLZ lookup table unavailable, lookups degrade to not-found: {e}");
                    None
                }
            })
            .as_ref()
    }

    fn load(&self) -> Result<LutData, LutError> {
        let bytes = fetch::acquire(&self.cache_dir, &self.url)?;
        parse::parse(&bytes)
    }
}
