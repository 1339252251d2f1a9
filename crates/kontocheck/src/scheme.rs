use crate::account::Account;
use crate::result::CheckResult;

/// Reduction applied to each digit-weight product before summing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fold {
    /// Products are summed as-is.
    None,
    /// Products of ten or more are reduced to their digit sum.
    Sub9,
    /// Only the ones digit of each product is kept.
    Ones,
}

/// Handling for a computed check digit of 10, which has no decimal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rest1 {
    /// The account number cannot carry a valid check digit.
    Invalid,
    /// The check digit becomes 0.
    Zero,
    /// The check digit becomes 9.
    Nine,
    /// Valid when the digits at `check - 1` and `check` match, otherwise 0.
    PairOrZero,
    /// Valid when the digits at `check - 1` and `check` match, otherwise invalid.
    PairOrInvalid,
}

/// Mapping from the weighted sum to the expected check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    /// `(10 - sum % 10) % 10`.
    Mod10,
    /// `11 - sum % 11`; remainder 0 gives 0, remainder 1 resolves per [`Rest1`].
    Mod11(Rest1),
    /// The remainder `sum % 11` itself; remainder 10 resolves per [`Rest1`].
    Rem11(Rest1),
    /// `(7 - sum % 7) % 7`.
    Mod7,
    /// `(9 - sum % 9) % 9`.
    Mod9,
}

/// A weighted check-digit scheme over a contiguous digit span.
///
/// Weights are the published right-to-left row: `weights[0]` applies to the
/// digit at `check - 1`, the next to the digit left of it, and so on. The
/// weighted span therefore covers `check - weights.len() .. check`.
pub(crate) struct Scheme {
    pub weights: &'static [u8],
    pub fold: Fold,
    pub style: Style,
    pub check: usize,
}

/// A weighted row over the tail of the account, including the check digit
/// itself. Valid when the sum is divisible by `modulus`.
pub(crate) struct ZeroSum {
    pub weights: &'static [u8],
    pub modulus: u32,
}

pub(crate) type MethodFn = fn(&Account, &str) -> CheckResult;

/// One attempt inside a multi-variant method.
pub(crate) enum Step {
    Scheme(&'static Scheme),
    ZeroSum(&'static ZeroSum),
    Transform,
}

/// Dispatch entry for one method id.
pub(crate) enum Rule {
    Scheme(&'static Scheme),
    /// Variants tried in order until one accepts; the last verdict wins.
    FirstOk(&'static [Step]),
    Fn(MethodFn),
}

pub(crate) fn run(acct: &Account, blz: &str, rule: &Rule) -> CheckResult {
    match rule {
        Rule::Scheme(s) => weighted(acct, s),
        Rule::FirstOk(steps) => {
            let mut last = CheckResult::False;
            for step in *steps {
                last = match step {
                    Step::Scheme(s) => weighted(acct, s),
                    Step::ZeroSum(z) => zero_sum(acct, z),
                    Step::Transform => iterated_transform(acct),
                };
                if last == CheckResult::Ok {
                    break;
                }
            }
            last
        }
        Rule::Fn(f) => f(acct, blz),
    }
}

pub(crate) fn reduce(product: u32, fold: Fold) -> u32 {
    match fold {
        Fold::None => product,
        Fold::Sub9 => {
            if product >= 10 {
                product - 9
            } else {
                product
            }
        }
        Fold::Ones => product % 10,
    }
}

/// Weighted sum over `digits[start ..]`, one digit per weight. The weight row
/// is right-to-left, so it is walked in reverse against the span.
pub(crate) fn span_sum(acct: &Account, start: usize, weights: &[u8], fold: Fold) -> u32 {
    let d = acct.digits();
    let mut sum = 0u32;
    for (i, &w) in weights.iter().rev().enumerate() {
        sum += reduce(u32::from(d[start + i]) * u32::from(w), fold);
    }
    sum
}

pub(crate) fn weighted(acct: &Account, s: &Scheme) -> CheckResult {
    let start = s.check - s.weights.len();
    let sum = span_sum(acct, start, s.weights, s.fold);
    compare(acct, s, sum)
}

/// Maps `sum` through the scheme's style and compares against the digit at
/// `s.check`.
pub(crate) fn compare(acct: &Account, s: &Scheme, sum: u32) -> CheckResult {
    let got = acct.digit(s.check);
    let want = match s.style {
        Style::Mod10 => ((10 - sum % 10) % 10) as u8,
        Style::Mod7 => ((7 - sum % 7) % 7) as u8,
        Style::Mod9 => ((9 - sum % 9) % 9) as u8,
        Style::Mod11(rest1) => match sum % 11 {
            0 => 0,
            1 => return resolve_rest1(acct, s, rest1),
            r => (11 - r) as u8,
        },
        Style::Rem11(rest1) => {
            let r = sum % 11;
            if r == 10 {
                return resolve_rest1(acct, s, rest1);
            }
            r as u8
        }
    };
    verdict(want == got)
}

fn resolve_rest1(acct: &Account, s: &Scheme, rest1: Rest1) -> CheckResult {
    let got = acct.digit(s.check);
    match rest1 {
        Rest1::Invalid => CheckResult::InvalidKto,
        Rest1::Zero => verdict(got == 0),
        Rest1::Nine => verdict(got == 9),
        Rest1::PairOrZero => {
            if acct.digit(s.check - 1) == got {
                CheckResult::Ok
            } else {
                verdict(got == 0)
            }
        }
        Rest1::PairOrInvalid => {
            if acct.digit(s.check - 1) == got {
                CheckResult::Ok
            } else {
                CheckResult::InvalidKto
            }
        }
    }
}

pub(crate) fn zero_sum(acct: &Account, z: &ZeroSum) -> CheckResult {
    let start = 10 - z.weights.len();
    let sum = span_sum(acct, start, z.weights, Fold::None);
    verdict(sum % z.modulus == 0)
}

/// Substitution rows for the iterated transformation. Rows apply first to
/// fourth starting at the rightmost weighted digit and moving left.
const TRANSFORM_ROWS: [[u8; 10]; 4] = [
    [0, 1, 5, 9, 3, 7, 4, 8, 2, 6],
    [0, 1, 7, 6, 9, 8, 3, 2, 5, 4],
    [0, 1, 8, 4, 6, 2, 9, 5, 7, 3],
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
];

const TRANSFORM_PATTERN: [usize; 9] = [0, 3, 2, 1, 0, 3, 2, 1, 0];

/// The iterated-transformation check: each of the first nine digits is
/// substituted through its row, the row sums are added, and the ones
/// complement of the total must match the last digit.
pub(crate) fn iterated_transform(acct: &Account) -> CheckResult {
    let d = acct.digits();
    let mut sum = 0u32;
    for i in 0..9 {
        sum += u32::from(TRANSFORM_ROWS[TRANSFORM_PATTERN[i]][d[i] as usize]);
    }
    let want = ((10 - sum % 10) % 10) as u8;
    verdict(want == d[9])
}

pub(crate) fn verdict(matches: bool) -> CheckResult {
    if matches {
        CheckResult::Ok
    } else {
        CheckResult::False
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(s: &str) -> Account {
        Account::parse(s).unwrap()
    }

    static PLAIN: Scheme = Scheme {
        weights: &[2, 1, 2, 1, 2, 1, 2, 1, 2],
        fold: Fold::Sub9,
        style: Style::Mod10,
        check: 9,
    };

    #[test]
    fn folds_products_over_nine() {
        // 9 * 2 = 18 folds to 9, so the sum stays below what raw products give.
        assert_eq!(weighted(&acct("1234567897"), &PLAIN), CheckResult::Ok);
        assert_eq!(weighted(&acct("1234567890"), &PLAIN), CheckResult::False);
    }

    #[test]
    fn rest1_invalid_rejects() {
        static S: Scheme = Scheme {
            weights: &[2, 3],
            fold: Fold::None,
            style: Style::Mod11(Rest1::Invalid),
            check: 9,
        };
        // d7*3 + d8*2 = 0*3 + 6*2 = 12, remainder 1.
        assert_eq!(weighted(&acct("0000000060"), &S), CheckResult::InvalidKto);
    }

    #[test]
    fn zero_sum_row() {
        static Z: ZeroSum = ZeroSum {
            weights: &[1, 2],
            modulus: 11,
        };
        // d8*2 + d9*1 = 10 + 1 = 11, divisible.
        assert_eq!(zero_sum(&acct("0000000051"), &Z), CheckResult::Ok);
        assert_eq!(zero_sum(&acct("0000000052"), &Z), CheckResult::False);
    }

    #[test]
    fn transform_row_cycle() {
        // All zeros transforms to zero in every row; check digit must be 0.
        assert_eq!(iterated_transform(&acct("0000000000")), CheckResult::Ok);
        assert_eq!(iterated_transform(&acct("0000000001")), CheckResult::False);
    }
}
