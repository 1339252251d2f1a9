//! Operator smoke tool for account and IBAN validation.
//!
//! ```text
//! account_check 1234567897 0x00        verdict under an explicit method
//! account_check 0532013000 37040044    verdict with the LUT picking the method
//! account_check --iban DE89...         IBAN check
//! account_check --status               lookup-table status as JSON
//! ```

use dotenvy::dotenv;
use serde_json::json;
use stps::{iban, surface, LutStore};
use tracing::info;
use tracing::level_filters::LevelFilter;

enum Selector {
    Method(i32),
    Blz(String),
}

fn usage() -> ! {
    eprintln!("usage: account_check <account> <method-id|blz>");
    eprintln!("       account_check --iban <iban>");
    eprintln!("       account_check --status");
    std::process::exit(2);
}

/// An 8-digit argument is a routing number; anything else must parse as a
/// method id, decimal or 0x-prefixed hex.
fn parse_selector(s: &str) -> Selector {
    if let Some(hex) = s.strip_prefix("0x") {
        if let Ok(id) = u8::from_str_radix(hex, 16) {
            return Selector::Method(i32::from(id));
        }
    }
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        return Selector::Blz(s.to_string());
    }
    match s.parse::<i32>() {
        Ok(id) => Selector::Method(id),
        Err(_) => usage(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .with_target(false)
        .compact()
        .init();
    dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let store = LutStore::from_env();

    match args.as_slice() {
        [flag] if flag.as_str() == "--status" => {
            let loaded = store.ensure_loaded();
            println!(
                "{}",
                json!({ "loaded": loaded, "entries": store.entry_count() })
            );
            std::process::exit(if loaded { 0 } else { 1 });
        }
        [flag, iban_arg] if flag.as_str() == "--iban" => {
            let valid = iban::validate_iban(&store, iban_arg);
            println!(
                "{} -> {}",
                iban::format_iban(iban_arg),
                if valid { "VALID" } else { "INVALID" }
            );
            std::process::exit(if valid { 0 } else { 1 });
        }
        [account, selector] => {
            let verdict = match parse_selector(selector) {
                Selector::Method(id) => {
                    let Some(v) =
                        surface::validate_account_result(Some(account.as_str()), Some(id), None)
                    else {
                        usage();
                    };
                    v.to_string()
                }
                Selector::Blz(blz) => {
                    let verdict = surface::validate_account_for_blz(&store, account, &blz);
                    info!(
                        loaded = store.is_loaded(),
                        entries = store.entry_count(),
                        "lookup table status"
                    );
                    verdict.to_string()
                }
            };
            println!("{} -> {}", account, verdict);
            std::process::exit(if verdict == "OK" { 0 } else { 1 });
        }
        _ => usage(),
    }
}
