//! IBAN validation and helpers.
//!
//! Standard MOD-97 over the rearranged numeric form per ISO 13616, plus a
//! German deep check: when the routing number embedded in a `DE` IBAN
//! resolves in the lookup table, the embedded account number must also pass
//! its check-digit method.

use blz_lut::LutStore;
use kontocheck::CheckResult;

/// ISO 13616 IBAN lengths, sorted by country code.
const IBAN_LENGTHS: &[(&str, usize)] = &[
    ("AD", 24),
    ("AE", 23),
    ("AL", 28),
    ("AT", 20),
    ("AZ", 28),
    ("BA", 20),
    ("BE", 16),
    ("BG", 22),
    ("BH", 22),
    ("BR", 29),
    ("BY", 28),
    ("CH", 21),
    ("CR", 22),
    ("CY", 28),
    ("CZ", 24),
    ("DE", 22),
    ("DK", 18),
    ("DO", 28),
    ("EE", 20),
    ("EG", 29),
    ("ES", 24),
    ("FI", 18),
    ("FO", 18),
    ("FR", 27),
    ("GB", 22),
    ("GE", 22),
    ("GI", 23),
    ("GL", 18),
    ("GR", 27),
    ("GT", 28),
    ("HR", 21),
    ("HU", 28),
    ("IE", 22),
    ("IL", 23),
    ("IS", 26),
    ("IT", 27),
    ("JO", 30),
    ("KW", 30),
    ("KZ", 20),
    ("LB", 28),
    ("LC", 32),
    ("LI", 21),
    ("LT", 20),
    ("LU", 20),
    ("LV", 21),
    ("MC", 27),
    ("MD", 24),
    ("ME", 22),
    ("MK", 19),
    ("MR", 27),
    ("MT", 31),
    ("MU", 30),
    ("NL", 18),
    ("NO", 15),
    ("PK", 24),
    ("PL", 28),
    ("PS", 29),
    ("PT", 25),
    ("QA", 29),
    ("RO", 24),
    ("RS", 22),
    ("SA", 24),
    ("SE", 24),
    ("SI", 19),
    ("SK", 24),
    ("SM", 27),
    ("TN", 24),
    ("TR", 26),
    ("UA", 29),
    ("VA", 22),
    ("VG", 24),
    ("XK", 20),
];

fn country_length(code: &str) -> Option<usize> {
    IBAN_LENGTHS
        .binary_search_by_key(&code, |&(c, _)| c)
        .ok()
        .map(|i| IBAN_LENGTHS[i].1)
}

/// Uppercases and strips whitespace; everything else passes through.
fn normalize(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// MOD-97 of the rearranged form, letters expanding to two digits.
/// `None` when a character is neither an ASCII digit nor an ASCII letter.
fn mod97(rearranged: &str) -> Option<u32> {
    let mut rem: u64 = 0;
    for c in rearranged.chars() {
        if let Some(d) = c.to_digit(10) {
            rem = (rem * 10 + u64::from(d)) % 97;
        } else if c.is_ascii_uppercase() {
            rem = (rem * 100 + u64::from(c as u8 - b'A') + 10) % 97;
        } else {
            return None;
        }
    }
    Some(rem as u32)
}

/// Standard IBAN validation: syntax, country length, MOD-97 remainder 1.
/// For a German IBAN whose BLZ resolves in the lookup table, the embedded
/// account number must additionally pass its check-digit method; an
/// unresolved BLZ leaves the MOD-97 verdict standing.
pub fn validate_iban(store: &LutStore, iban: &str) -> bool {
    let cleaned = normalize(iban);
    let bytes = cleaned.as_bytes();
    if bytes.len() < 15 {
        return false;
    }
    if !(bytes[0].is_ascii_alphabetic() && bytes[1].is_ascii_alphabetic()) {
        return false;
    }
    if !(bytes[2].is_ascii_digit() && bytes[3].is_ascii_digit()) {
        return false;
    }
    let country = &cleaned[..2];
    let Some(expected) = country_length(country) else {
        return false;
    };
    if bytes.len() != expected {
        return false;
    }
    let rearranged = format!("{}{}", &cleaned[4..], &cleaned[..4]);
    if mod97(&rearranged) != Some(1) {
        return false;
    }
    if country == "DE" && cleaned.len() == 22 {
        let blz = &cleaned[4..12];
        let account = &cleaned[12..22];
        if let Some(method) = store.lookup(blz) {
            return kontocheck::validate(account, method, blz) == CheckResult::Ok;
        }
    }
    true
}

/// Deep German validation with an explicit method id on top of the standard
/// check. Non-German IBANs fail.
pub fn validate_german_iban(store: &LutStore, iban: &str, method_id: u8) -> bool {
    if !validate_iban(store, iban) {
        return false;
    }
    let cleaned = normalize(iban);
    if cleaned.len() != 22 || !cleaned.starts_with("DE") {
        return false;
    }
    let blz = &cleaned[4..12];
    let account = &cleaned[12..22];
    kontocheck::validate(account, method_id, blz) == CheckResult::Ok
}

/// Groups of four characters separated by single spaces.
pub fn format_iban(iban: &str) -> String {
    let cleaned = normalize(iban);
    let mut out = String::with_capacity(cleaned.len() + cleaned.len() / 4);
    for (i, c) in cleaned.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// The two-letter country code, or `""` when the input does not start with
/// two letters.
pub fn country_code(iban: &str) -> String {
    let cleaned = normalize(iban);
    let bytes = cleaned.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1].is_ascii_alphabetic() {
        cleaned[..2].to_string()
    } else {
        String::new()
    }
}

/// The two check digits following the country code, or `""`.
pub fn check_digits(iban: &str) -> String {
    let cleaned = normalize(iban);
    let bytes = cleaned.as_bytes();
    if bytes.len() >= 4 && bytes[2].is_ascii_digit() && bytes[3].is_ascii_digit() {
        cleaned[2..4].to_string()
    } else {
        String::new()
    }
}

/// Everything after the country code and check digits.
pub fn bban(iban: &str) -> String {
    let cleaned = normalize(iban);
    cleaned.get(4..).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod97_remainders() {
        assert_eq!(mod97("WEST12345698765432GB82"), Some(1));
        assert_eq!(mod97("370400440532013000DE89"), Some(1));
        assert_eq!(mod97("0"), Some(0));
        assert_eq!(mod97("a"), None);
        assert_eq!(mod97("12-34"), None);
    }

    #[test]
    fn helpers_extract_parts() {
        let iban = "de89 3704 0044 0532 0130 00";
        assert_eq!(format_iban(iban), "DE89 3704 0044 0532 0130 00");
        assert_eq!(country_code(iban), "DE");
        assert_eq!(check_digits(iban), "89");
        assert_eq!(bban(iban), "370400440532013000");
        assert_eq!(country_code("1234"), "");
        assert_eq!(check_digits("DEXX"), "");
        assert_eq!(bban("DE89"), "");
    }

    #[test]
    fn country_table_is_sorted() {
        assert!(IBAN_LENGTHS.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(country_length("DE"), Some(22));
        assert_eq!(country_length("NO"), Some(15));
        assert_eq!(country_length("ZZ"), None);
    }
}
