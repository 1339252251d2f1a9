//! Scalar validation semantics of the SQL surface, expressed over `Option`
//! arguments: `None` in is NULL in, `None` out is NULL out.

use blz_lut::LutStore;
use kontocheck::{CheckResult, MAX_METHOD_ID};

pub const INVALID_METHOD: &str = "INVALID_METHOD";

fn method_in_range(method_id: i32) -> bool {
    (0..=i32::from(MAX_METHOD_ID)).contains(&method_id)
}

/// `stps_validate_account_number`: true only for `OK`. A NULL account, a
/// NULL method id or one outside `0..=0xC6` yield NULL; a NULL routing
/// number is treated as empty.
pub fn validate_account_number(
    account: Option<&str>,
    method_id: Option<i32>,
    blz: Option<&str>,
) -> Option<bool> {
    let account = account?;
    let method_id = method_id?;
    if !method_in_range(method_id) {
        return None;
    }
    Some(kontocheck::validate(account, method_id as u8, blz.unwrap_or("")).is_ok())
}

/// `stps_validate_account_result`: the verdict's wire name. An out-of-range
/// method id is reported as `INVALID_METHOD` rather than NULL so callers can
/// tell it apart from a failed check.
pub fn validate_account_result(
    account: Option<&str>,
    method_id: Option<i32>,
    blz: Option<&str>,
) -> Option<&'static str> {
    let account = account?;
    let method_id = method_id?;
    if !method_in_range(method_id) {
        return Some(INVALID_METHOD);
    }
    let verdict = kontocheck::validate(account, method_id as u8, blz.unwrap_or(""));
    Some(match verdict {
        CheckResult::Ok => "OK",
        CheckResult::False => "FALSE",
        CheckResult::InvalidKto => "INVALID_KTO",
        CheckResult::NotImplemented => "NOT_IMPLEMENTED",
    })
}

/// Validation with the routing number picking the method. A BLZ the store
/// cannot resolve, including an unloaded store, reports `NotImplemented`.
pub fn validate_account_for_blz(store: &LutStore, account: &str, blz: &str) -> CheckResult {
    match store.lookup(blz) {
        Some(method) => kontocheck::validate(account, method, blz),
        None => CheckResult::NotImplemented,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_arguments_propagate() {
        assert_eq!(validate_account_number(None, Some(0), None), None);
        assert_eq!(validate_account_number(Some("1234567897"), None, None), None);
        assert_eq!(validate_account_result(None, Some(0), None), None);
        assert_eq!(validate_account_result(Some("1234567897"), None, None), None);
        // NULL blz is an empty routing number, not a NULL result.
        assert_eq!(
            validate_account_number(Some("1234567897"), Some(0), None),
            Some(true)
        );
    }

    #[test]
    fn out_of_range_method_id() {
        assert_eq!(validate_account_number(Some("1234567897"), Some(-1), None), None);
        assert_eq!(validate_account_number(Some("1234567897"), Some(0xFF), None), None);
        assert_eq!(
            validate_account_result(Some("1234567897"), Some(0xFF), None),
            Some(INVALID_METHOD)
        );
        assert_eq!(
            validate_account_result(Some("1234567897"), Some(-1), None),
            Some(INVALID_METHOD)
        );
    }

    #[test]
    fn verdicts_use_wire_names() {
        assert_eq!(
            validate_account_result(Some("1234567897"), Some(0), None),
            Some("OK")
        );
        assert_eq!(
            validate_account_result(Some("1234567890"), Some(0), None),
            Some("FALSE")
        );
        assert_eq!(
            validate_account_result(Some("12A4567897"), Some(0), None),
            Some("INVALID_KTO")
        );
        assert_eq!(validate_account_number(Some("1234567890"), Some(0), None), Some(false));
    }
}
