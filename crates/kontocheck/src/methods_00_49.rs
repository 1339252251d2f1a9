//! Methods 00 through 49. Weight rows are the published right-to-left form.

use crate::account::Account;
use crate::result::CheckResult;
use crate::scheme::{
    iterated_transform, span_sum, verdict, weighted, Fold, Rest1, Rule, Scheme, Step, Style,
};

pub(crate) static M00: Scheme = Scheme {
    weights: &[2, 1, 2, 1, 2, 1, 2, 1, 2],
    fold: Fold::Sub9,
    style: Style::Mod10,
    check: 9,
};

pub(crate) static M01: Scheme = Scheme {
    weights: &[3, 7, 1, 3, 7, 1, 3, 7, 1],
    fold: Fold::None,
    style: Style::Mod10,
    check: 9,
};

pub(crate) static M02: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 8, 9, 2],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Invalid),
    check: 9,
};

pub(crate) static M04: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 2, 3, 4],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Invalid),
    check: 9,
};

pub(crate) static M05: Scheme = Scheme {
    weights: &[7, 3, 1, 7, 3, 1, 7, 3, 1],
    fold: Fold::None,
    style: Style::Mod10,
    check: 9,
};

pub(crate) static M06: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 2, 3, 4],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

pub(crate) static M07: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 8, 9, 10],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Invalid),
    check: 9,
};

// Accounts below 60000 carry no check digit.
fn method_08(acct: &Account, _blz: &str) -> CheckResult {
    if acct.number() < 60000 {
        return CheckResult::Ok;
    }
    weighted(acct, &M00)
}

fn method_09(_acct: &Account, _blz: &str) -> CheckResult {
    CheckResult::Ok
}

pub(crate) static M10: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 8, 9, 10],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

static M11: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 8, 9, 10],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Nine),
    check: 9,
};

// Reserved by the Bundesbank; no account can validate under it.
fn method_12(_acct: &Account, _blz: &str) -> CheckResult {
    CheckResult::InvalidKto
}

/// Six-digit base at positions 2-7; on failure the number is re-read two
/// places to the left with the sub-account in front.
static M13_BASE: Scheme = Scheme {
    weights: &[2, 1, 2, 1, 2, 1],
    fold: Fold::Sub9,
    style: Style::Mod10,
    check: 7,
};

static M13_SHIFTED: Scheme = Scheme {
    weights: &[2, 1, 2, 1, 2, 1],
    fold: Fold::Sub9,
    style: Style::Mod10,
    check: 9,
};

static M14: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Invalid),
    check: 9,
};

pub(crate) static M15: Scheme = Scheme {
    weights: &[2, 3, 4, 5],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

static M16: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 2, 3, 4],
    fold: Fold::None,
    style: Style::Mod11(Rest1::PairOrZero),
    check: 9,
};

/// Shared by method 17 and the C1 special branch: one is subtracted from the
/// folded sum and the remainder is taken from ten, not eleven.
pub(crate) fn minus_one_eleven(sum: u32, got: u8) -> CheckResult {
    let r = (i64::from(sum) - 1) % 11;
    let want = if r == 0 { 0 } else { 10 - r };
    verdict(want == i64::from(got))
}

pub(crate) fn method_17(acct: &Account, _blz: &str) -> CheckResult {
    let sum = span_sum(acct, 1, &[2, 1, 2, 1, 2, 1], Fold::Sub9);
    minus_one_eleven(sum, acct.digit(7))
}

static M18: Scheme = Scheme {
    weights: &[3, 9, 7, 1, 3, 9, 7, 1, 3],
    fold: Fold::None,
    style: Style::Mod10,
    check: 9,
};

pub(crate) static M19: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 8, 9, 1],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

pub(crate) static M20: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 8, 9, 3],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

// The raw weighted sum is collapsed digit by digit until a single digit
// remains; that digit's ten complement is the check digit.
fn method_21(acct: &Account, _blz: &str) -> CheckResult {
    let mut sum = span_sum(acct, 0, &[2, 1, 2, 1, 2, 1, 2, 1, 2], Fold::None);
    while sum >= 10 {
        let mut digits = 0;
        while sum > 0 {
            digits += sum % 10;
            sum /= 10;
        }
        sum = digits;
    }
    verdict(((10 - sum) % 10) as u8 == acct.digit(9))
}

pub(crate) static M22: Scheme = Scheme {
    weights: &[3, 1, 3, 1, 3, 1, 3, 1, 3],
    fold: Fold::Ones,
    style: Style::Mod10,
    check: 9,
};

static M23: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7],
    fold: Fold::None,
    style: Style::Mod11(Rest1::PairOrInvalid),
    check: 6,
};

// Leading type digits are normalized away, then each remaining digit
// contributes ((digit * weight) + weight) mod 11 with the weight row 1,2,3
// starting at the first significant digit. The ones digit of the total is
// the check digit.
fn method_24(acct: &Account, _blz: &str) -> CheckResult {
    let mut d = *acct.digits();
    if (3..=6).contains(&d[0]) {
        d[0] = 0;
    }
    if d[0] == 9 {
        d[0] = 0;
        d[1] = 0;
        d[2] = 0;
    }
    let start = (0..9).find(|&i| d[i] != 0).unwrap_or(9);
    let mut sum = 0u32;
    for i in start..9 {
        let w = [1u32, 2, 3][(i - start) % 3];
        sum += (u32::from(d[i]) * w + w) % 11;
    }
    verdict((sum % 10) as u8 == acct.digit(9))
}

// Remainder 1 forces check digit 0, allowed only for account types 8 and 9.
fn method_25(acct: &Account, _blz: &str) -> CheckResult {
    let sum = span_sum(acct, 1, &[2, 3, 4, 5, 6, 7, 8, 9], Fold::None);
    let want = match sum % 11 {
        0 => 0,
        1 => {
            if acct.digit(1) != 8 && acct.digit(1) != 9 {
                return CheckResult::InvalidKto;
            }
            0
        }
        r => (11 - r) as u8,
    };
    verdict(want == acct.digit(9))
}

static M26_BASE: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 2],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 7,
};

static M26_SHIFTED: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 2],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

fn method_26(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(0) == 0 && acct.digit(1) == 0 {
        weighted(acct, &M26_SHIFTED)
    } else {
        weighted(acct, &M26_BASE)
    }
}

fn method_27(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(0) == 0 {
        weighted(acct, &M00)
    } else {
        iterated_transform(acct)
    }
}

pub(crate) static M28: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 8],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 7,
};

fn method_29(acct: &Account, _blz: &str) -> CheckResult {
    iterated_transform(acct)
}

static M30: Scheme = Scheme {
    weights: &[2, 1, 2, 1, 0, 0, 0, 0, 2],
    fold: Fold::None,
    style: Style::Mod10,
    check: 9,
};

static M31: Scheme = Scheme {
    weights: &[1, 2, 3, 4, 5, 6, 7, 8, 9],
    fold: Fold::None,
    style: Style::Rem11(Rest1::Invalid),
    check: 9,
};

pub(crate) static M32: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

pub(crate) static M33: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

static M34: Scheme = Scheme {
    weights: &[2, 4, 8, 5, 10, 9, 7],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 7,
};

static M35: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 8, 9, 10],
    fold: Fold::None,
    style: Style::Rem11(Rest1::PairOrInvalid),
    check: 9,
};

static M36: Scheme = Scheme {
    weights: &[2, 4, 8, 5],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

static M37: Scheme = Scheme {
    weights: &[2, 4, 8, 5, 10],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

static M38: Scheme = Scheme {
    weights: &[2, 4, 8, 5, 10, 9],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

static M39: Scheme = Scheme {
    weights: &[2, 4, 8, 5, 10, 9, 7],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

static M40: Scheme = Scheme {
    weights: &[2, 4, 8, 5, 10, 9, 7, 3, 6],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

static M41_TAIL: Scheme = Scheme {
    weights: &[2, 1, 2, 1, 2, 1],
    fold: Fold::Sub9,
    style: Style::Mod10,
    check: 9,
};

// A '9' in position 4 restricts the weighted span to positions 4-9.
fn method_41(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(3) == 9 {
        weighted(acct, &M41_TAIL)
    } else {
        weighted(acct, &M00)
    }
}

static M42: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 8, 9],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

static M43: Scheme = Scheme {
    weights: &[1, 2, 3, 4, 5, 6, 7, 8, 9],
    fold: Fold::None,
    style: Style::Mod10,
    check: 9,
};

fn method_45(acct: &Account, _blz: &str) -> CheckResult {
    // Accounts with a leading zero or a '1' in position 5 carry no check digit.
    if acct.digit(0) == 0 || acct.digit(4) == 1 {
        return CheckResult::Ok;
    }
    weighted(acct, &M00)
}

static M46: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 7,
};

static M47: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 8,
};

static M48: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 8,
};

pub(crate) static RULES: &[(u8, Rule)] = &[
    (0x00, Rule::Scheme(&M00)),
    (0x01, Rule::Scheme(&M01)),
    (0x02, Rule::Scheme(&M02)),
    (0x03, Rule::Scheme(&M00)),
    (0x04, Rule::Scheme(&M04)),
    (0x05, Rule::Scheme(&M05)),
    (0x06, Rule::Scheme(&M06)),
    (0x07, Rule::Scheme(&M07)),
    (0x08, Rule::Fn(method_08)),
    (0x09, Rule::Fn(method_09)),
    (0x0A, Rule::Scheme(&M10)),
    (0x0B, Rule::Scheme(&M11)),
    (0x0C, Rule::Fn(method_12)),
    (
        0x0D,
        Rule::FirstOk(&[Step::Scheme(&M13_BASE), Step::Scheme(&M13_SHIFTED)]),
    ),
    (0x0E, Rule::Scheme(&M14)),
    (0x0F, Rule::Scheme(&M15)),
    (0x10, Rule::Scheme(&M16)),
    (0x11, Rule::Fn(method_17)),
    (0x12, Rule::Scheme(&M18)),
    (0x13, Rule::Scheme(&M19)),
    (0x14, Rule::Scheme(&M20)),
    (0x15, Rule::Fn(method_21)),
    (0x16, Rule::Scheme(&M22)),
    (0x17, Rule::Scheme(&M23)),
    (0x18, Rule::Fn(method_24)),
    (0x19, Rule::Fn(method_25)),
    (0x1A, Rule::Fn(method_26)),
    (0x1B, Rule::Fn(method_27)),
    (0x1C, Rule::Scheme(&M28)),
    (0x1D, Rule::Fn(method_29)),
    (0x1E, Rule::Scheme(&M30)),
    (0x1F, Rule::Scheme(&M31)),
    (0x20, Rule::Scheme(&M32)),
    (0x21, Rule::Scheme(&M33)),
    (0x22, Rule::Scheme(&M34)),
    (0x23, Rule::Scheme(&M35)),
    (0x24, Rule::Scheme(&M36)),
    (0x25, Rule::Scheme(&M37)),
    (0x26, Rule::Scheme(&M38)),
    (0x27, Rule::Scheme(&M39)),
    (0x28, Rule::Scheme(&M40)),
    (0x29, Rule::Fn(method_41)),
    (0x2A, Rule::Scheme(&M42)),
    (0x2B, Rule::Scheme(&M43)),
    (0x2C, Rule::Scheme(&M37)),
    (0x2D, Rule::Fn(method_45)),
    (0x2E, Rule::Scheme(&M46)),
    (0x2F, Rule::Scheme(&M47)),
    (0x30, Rule::Scheme(&M48)),
    (
        0x31,
        Rule::FirstOk(&[Step::Scheme(&M00), Step::Scheme(&M01)]),
    ),
];
