//! Cache-path resolution and one-shot download of the LUT file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::LutError;

pub(crate) const LUT_FILE_NAME: &str = "blz.lut";
pub(crate) const DEFAULT_LUT_URL: &str = "https://www.michael-plugge.de/blz.lut";

/// Per-user cache directory: `STPS_CACHE_DIR` when set, otherwise `~/.stps`
/// (`%USERPROFILE%\.stps` on Windows). None when no home directory can be
/// determined.
pub(crate) fn default_cache_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var("STPS_CACHE_DIR") {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    let home = env::var("HOME").or_else(|_| env::var("USERPROFILE")).ok()?;
    Some(PathBuf::from(home).join(".stps"))
}

pub(crate) fn default_lut_url() -> String {
    env::var("STPS_LUT_URL").unwrap_or_else(|_| DEFAULT_LUT_URL.to_string())
}

/// Raw LUT bytes, downloading into the cache first when the file is absent.
/// A pre-seeded file is served as-is; nothing here ever re-downloads.
pub(crate) fn acquire(cache_dir: &Path, url: &str) -> Result<Vec<u8>, LutError> {
    let path = cache_dir.join(LUT_FILE_NAME);
    if path.exists() {
        return Ok(fs::read(&path)?);
    }
    fs::create_dir_all(cache_dir)?;
    info!(%url, "downloading BLZ lookup table");
    let body = download(url)?;
    fs::write(&path, &body)?;
    Ok(body)
}

fn download(url: &str) -> Result<Vec<u8>, LutError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LutError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(resp.bytes()?.to_vec())
}
