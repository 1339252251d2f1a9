use strum_macros::Display;

/// Verdict of a check-digit validation.
///
/// `NotImplemented` is reserved for method ids whose published rules are not
/// carried by this crate; callers should report it distinctly from `False`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CheckResult {
    #[strum(serialize = "OK")]
    Ok,
    #[strum(serialize = "FALSE")]
    False,
    #[strum(serialize = "INVALID_KTO")]
    InvalidKto,
    #[strum(serialize = "NOT_IMPLEMENTED")]
    NotImplemented,
}

impl CheckResult {
    #[inline]
    pub fn is_ok(self) -> bool {
        self == CheckResult::Ok
    }
}
