use std::fs;

use anyhow::Result;
use duckdb::types::Value;
use duckdb::Connection;
use stps::{iban, surface, CheckResult, LutStore, Stps, TimePoint};
use tempfile::TempDir;

const DEAD_URL: &str = "http://127.0.0.1:0/blz.lut";

// Helper: minimal Format 1.x file, each entry encoded as a replace opcode.
fn v1_fixture(entries: &[(u32, u8)]) -> Vec<u8> {
    let mut stream = Vec::new();
    for &(blz, method) in entries {
        stream.push(0xFD);
        stream.extend_from_slice(&blz.to_le_bytes());
        stream.push(method);
    }
    let count = entries.len() as u32;
    let mut file = Vec::new();
    file.extend_from_slice(b"BLZ Lookup Table/Format 1.x\n");
    file.extend_from_slice(&count.to_le_bytes());
    file.extend_from_slice(&(adler2::adler32_slice(&stream) ^ count).to_le_bytes());
    file.extend_from_slice(&stream);
    file
}

// Helper: store over a pre-seeded cache; the URL is unreachable so any
// download attempt fails fast.
fn seeded_store(entries: &[(u32, u8)]) -> Result<(TempDir, LutStore)> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("blz.lut"), v1_fixture(entries))?;
    let store = LutStore::new(dir.path(), DEAD_URL);
    Ok((dir, store))
}

fn unloaded_store() -> Result<(TempDir, LutStore)> {
    let dir = TempDir::new()?;
    let store = LutStore::new(dir.path(), DEAD_URL);
    Ok((dir, store))
}

#[test]
fn test_lut_driven_validation() -> Result<()> {
    let (_dir, store) = seeded_store(&[(37040044, 0x00), (10000000, 0x01)])?;
    assert_eq!(
        surface::validate_account_for_blz(&store, "0532013000", "37040044"),
        CheckResult::Ok
    );
    assert_eq!(
        surface::validate_account_for_blz(&store, "0532013001", "37040044"),
        CheckResult::False
    );
    assert_eq!(
        surface::validate_account_for_blz(&store, "0532013000", "99999999"),
        CheckResult::NotImplemented
    );
    Ok(())
}

#[test]
fn test_unresolvable_blz_soft_fails() -> Result<()> {
    let (_dir, store) = unloaded_store()?;
    assert_eq!(
        surface::validate_account_for_blz(&store, "0532013000", "37040044"),
        CheckResult::NotImplemented
    );
    assert!(!store.is_loaded());
    Ok(())
}

#[test]
fn test_iban_validation_with_deep_check() -> Result<()> {
    let (_dir, store) = seeded_store(&[(37040044, 0x00)])?;

    // MOD-97 passes and the embedded account passes method 0x00.
    assert!(iban::validate_iban(&store, "DE89 3704 0044 0532 0130 00"));
    // MOD-97 passes but the embedded account fails its check-digit method.
    assert!(!iban::validate_iban(&store, "DE62370400440532013001"));
    // Plain MOD-97 failure.
    assert!(!iban::validate_iban(&store, "DE89370400440532013001"));
    // Wrong length for the country.
    assert!(!iban::validate_iban(&store, "DE8937040044053201300"));
    // Unknown country.
    assert!(!iban::validate_iban(&store, "ZZ89370400440532013000"));
    // Non-German IBANs skip the deep check.
    assert!(iban::validate_iban(&store, "GB82 WEST 1234 5698 7654 32"));
    Ok(())
}

#[test]
fn test_iban_unknown_blz_falls_back_to_mod97() -> Result<()> {
    let (_dir, store) = seeded_store(&[(10000000, 0x01)])?;
    // 37040044 is not in the table, so the MOD-97 verdict stands.
    assert!(iban::validate_iban(&store, "DE89370400440532013000"));
    assert!(iban::validate_iban(&store, "DE62370400440532013001"));
    Ok(())
}

#[test]
fn test_german_iban_with_explicit_method() -> Result<()> {
    let (_dir, store) = seeded_store(&[(37040044, 0x00)])?;
    assert!(iban::validate_german_iban(&store, "DE89370400440532013000", 0x00));
    // Same IBAN under a method the account fails.
    assert!(!iban::validate_german_iban(&store, "DE89370400440532013000", 0x01));
    // Valid but not German.
    assert!(!iban::validate_german_iban(&store, "GB82WEST12345698765432", 0x00));
    Ok(())
}

#[test]
fn test_facade_session_capture() -> Result<()> {
    let (_dir, store) = unloaded_store()?;
    let mut stps = Stps::with_store(Connection::open_in_memory()?, store);

    stps.run("CREATE TABLE accounts (id INTEGER, holder VARCHAR)")?;
    stps.run("INSERT INTO accounts VALUES (1, 'alice'), (2, 'bob')")?;
    stps.tt_enable("accounts", "id")?;
    stps.run("UPDATE accounts SET holder = 'carol' WHERE id = 2")?;

    // The read is observed, which flushes the pending version-1 capture.
    let holders = stps.query_map("SELECT holder FROM accounts ORDER BY id", |r| {
        r.get::<_, String>(0)
    })?;
    assert_eq!(holders, ["alice", "carol"]);

    let rows = stps.tt_log("accounts")?;
    assert_eq!(rows.len(), 4);
    assert_eq!(rows.iter().filter(|r| r.version == 1).count(), 2);

    let at0 = stps.tt_at("accounts", TimePoint::Version(0))?;
    assert_eq!(at0.rows[1][1], Value::Text("bob".to_string()));
    let at1 = stps.tt_at("accounts", TimePoint::Version(1))?;
    assert_eq!(at1.rows[1][1], Value::Text("carol".to_string()));

    let d = stps.tt_diff("accounts", 0, 1)?;
    assert_eq!(d.len(), 1);
    assert_eq!(d[0].pk_value, "2");
    assert_eq!(d[0].change_type, "UPDATE");
    assert_eq!(d[0].changes[0].column, "holder");
    assert_eq!(d[0].changes[0].from.as_deref(), Some("bob"));
    assert_eq!(d[0].changes[0].to.as_deref(), Some("carol"));

    let status = stps.tt_status()?;
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].current_version, 1);

    stps.tt_disable("accounts")?;
    assert!(stps.tt_status()?.is_empty());
    Ok(())
}
