//! Check-digit validation for German account numbers.
//!
//! Every German bank publishes which of the Bundesbank's check-digit methods
//! its account numbers use; this crate implements the methods themselves,
//! keyed by the one-byte ids found in the routing-number lookup table.
//! Validation is a pure function of the inputs and a static method table.
//!
//! ```
//! use kontocheck::{validate, CheckResult};
//!
//! assert_eq!(validate("1234567897", 0x00, ""), CheckResult::Ok);
//! assert_eq!(validate("1234567890", 0x00, ""), CheckResult::False);
//! ```

mod account;
mod methods_00_49;
mod methods_50_99;
mod methods_a0_c6;
mod registry;
mod result;
mod scheme;

pub use account::Account;
pub use registry::{unimplemented_ids, MAX_METHOD_ID};
pub use result::CheckResult;

/// Validates `account` under the given method id.
///
/// The account is left-padded with zeros to ten digits; anything longer or
/// containing a non-digit is [`CheckResult::InvalidKto`]. Ids without a
/// published method give [`CheckResult::NotImplemented`]. `blz` is consulted
/// only by the few methods whose rule depends on the bank; pass `""` when
/// unknown.
pub fn validate(account: &str, method: u8, blz: &str) -> CheckResult {
    let Some(acct) = Account::parse(account) else {
        return CheckResult::InvalidKto;
    };
    match registry::rule_for(method) {
        Some(rule) => scheme::run(&acct, blz, rule),
        None => CheckResult::NotImplemented,
    }
}
