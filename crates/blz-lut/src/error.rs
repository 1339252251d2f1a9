use thiserror::Error;

/// Errors raised while acquiring or decoding the BLZ lookup table.
///
/// Callers going through [`crate::LutStore`] never see these directly: a load
/// failure is logged once and latched, and lookups degrade to not-found.
#[derive(Debug, Error)]
pub enum LutError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected http status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
    #[error("invalid signature")]
    InvalidSignature,
    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },
    #[error("zlib inflate failed: {0}")]
    Inflate(std::io::Error),
    #[error("truncated lut file while reading {0}")]
    Truncated(&'static str),
    #[error("malformed lut file: {0}")]
    Malformed(&'static str),
}
