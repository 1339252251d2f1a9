use anyhow::Result;
use blz_lut::LutStore;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

// Nothing listens here; every test pre-seeds the cache or expects a soft
// failure, so no network traffic leaves the process.
const DEAD_URL: &str = "http://127.0.0.1:0/blz.lut";

// Helper: minimal Format 2.0 file with BLZs {10000000, 10000001, 10020030}
// and methods {0x00, 0x01, 0x09}.
fn v2_fixture() -> Vec<u8> {
    let mut blz_plain = Vec::new();
    blz_plain.extend_from_slice(&3u32.to_le_bytes());
    blz_plain.push(0xFF);
    blz_plain.extend_from_slice(&10_000_000u32.to_le_bytes());
    blz_plain.push(0x01);
    blz_plain.push(0xFE);
    blz_plain.extend_from_slice(&20_029u16.to_le_bytes());
    let blz_block = v2_block(1, &blz_plain);
    let method_block = v2_block(2, &[0x00, 0x01, 0x09]);

    let mut out = Vec::new();
    out.extend_from_slice(b"BLZ Lookup Table/Format 2.0\n");
    out.extend_from_slice(b"synthesized fixture\nDATA\n");
    out.extend_from_slice(&2u16.to_le_bytes());
    let first = (out.len() + 2 * 12) as u32;
    let second = first + blz_block.len() as u32;
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&first.to_le_bytes());
    out.extend_from_slice(&(blz_block.len() as u32).to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&second.to_le_bytes());
    out.extend_from_slice(&(method_block.len() as u32).to_le_bytes());
    out.extend_from_slice(&blz_block);
    out.extend_from_slice(&method_block);
    out
}

fn v2_block(block_type: u32, plain: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(plain).unwrap();
    let compressed = enc.finish().unwrap();
    let mut out = Vec::new();
    out.extend_from_slice(&block_type.to_le_bytes());
    out.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
    out.extend_from_slice(&(plain.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&compressed);
    out
}

// Helper: same entries in Format 1.x with an info line.
fn v1_fixture() -> Vec<u8> {
    let mut stream = Vec::new();
    stream.push(0xFD);
    stream.extend_from_slice(&10_000_000u32.to_le_bytes());
    stream.push(0x00);
    stream.push(0x01);
    stream.push(0x01);
    stream.push(0xFE);
    stream.extend_from_slice(&20_029u16.to_le_bytes());
    stream.push(0x09);

    let count = 3u32;
    let mut out = Vec::new();
    out.extend_from_slice(b"BLZ Lookup Table/Format 1.x\n");
    out.extend_from_slice(b"Stand 2024-06-03\n");
    out.extend_from_slice(&count.to_le_bytes());
    let checksum = adler2::adler32_slice(&stream) ^ count;
    out.extend_from_slice(&checksum.to_le_bytes());
    out.extend_from_slice(&stream);
    out
}

fn seeded_store(bytes: &[u8]) -> Result<(TempDir, LutStore)> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("blz.lut"), bytes)?;
    let store = LutStore::new(dir.path(), DEAD_URL);
    Ok((dir, store))
}

#[test]
fn test_lookup_round_trip_from_seeded_cache() -> Result<()> {
    let (_dir, store) = seeded_store(&v2_fixture())?;
    assert!(!store.is_loaded());
    assert_eq!(store.entry_count(), 0);

    assert_eq!(store.lookup("10000000"), Some(0x00));
    assert_eq!(store.lookup("10000001"), Some(0x01));
    assert_eq!(store.lookup("10020030"), Some(0x09));
    assert_eq!(store.lookup("99999999"), None);

    assert!(store.is_loaded());
    assert_eq!(store.entry_count(), 3);
    Ok(())
}

#[test]
fn test_v1_cache_served_identically() -> Result<()> {
    let (_dir, store) = seeded_store(&v1_fixture())?;
    assert!(store.ensure_loaded());
    assert_eq!(store.entry_count(), 3);
    assert_eq!(store.lookup("10020030"), Some(0x09));
    assert_eq!(store.lookup("99999999"), None);
    Ok(())
}

#[test]
fn test_download_failure_is_soft() -> Result<()> {
    let dir = TempDir::new()?;
    let store = LutStore::new(dir.path(), DEAD_URL);
    assert!(!store.ensure_loaded());
    assert_eq!(store.lookup("10000000"), None);
    assert_eq!(store.entry_count(), 0);
    assert!(!store.is_loaded());
    // Failed downloads leave no partial file behind.
    assert!(!dir.path().join("blz.lut").exists());
    Ok(())
}

#[test]
fn test_parse_failure_latches_until_restart() -> Result<()> {
    let (dir, store) = seeded_store(b"garbage that is longer than the signature line")?;
    assert!(!store.ensure_loaded());
    assert_eq!(store.lookup("10000000"), None);

    // Replacing the file does not help a latched store; only a new store
    // (a process restart in production) picks it up.
    fs::write(dir.path().join("blz.lut"), v2_fixture())?;
    assert!(!store.ensure_loaded());
    assert_eq!(store.lookup("10000000"), None);

    let fresh = LutStore::new(dir.path(), DEAD_URL);
    assert!(fresh.ensure_loaded());
    assert_eq!(fresh.lookup("10000000"), Some(0x00));
    Ok(())
}

#[test]
fn test_from_env_honors_overrides() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("blz.lut"), v2_fixture())?;
    std::env::set_var("STPS_CACHE_DIR", dir.path());
    std::env::set_var("STPS_LUT_URL", DEAD_URL);
    let store = LutStore::from_env();
    assert!(store.ensure_loaded());
    assert_eq!(store.lookup("10000001"), Some(0x01));
    std::env::remove_var("STPS_CACHE_DIR");
    std::env::remove_var("STPS_LUT_URL");
    Ok(())
}
