//! Methods A0 through C6. Most of these post-2000 methods delegate to one
//! or two of the decimal methods depending on the account type digit.

use crate::account::Account;
use crate::methods_00_49::{
    method_17, minus_one_eleven, M00, M01, M02, M04, M05, M06, M10, M15, M20, M22, M32,
};
use crate::methods_50_99::{method_75, method_93, M58, M75_BASE, M90_A, M93_TAIL};
use crate::result::CheckResult;
use crate::scheme::{
    iterated_transform, span_sum, verdict, weighted, Fold, Rest1, Rule, Scheme, Step, Style,
};

static MA0: Scheme = Scheme {
    weights: &[2, 4, 8, 5, 10],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

fn method_a0(acct: &Account, _blz: &str) -> CheckResult {
    // Three-digit accounts carry no check digit.
    if acct.span_number(0, 7) == 0 {
        return CheckResult::Ok;
    }
    weighted(acct, &MA0)
}

static MA1: Scheme = Scheme {
    weights: &[2, 1, 2, 1, 2, 1, 2],
    fold: Fold::Sub9,
    style: Style::Mod10,
    check: 9,
};

// Only eight- and ten-digit accounts exist under this method.
fn method_a1(acct: &Account, _blz: &str) -> CheckResult {
    let d = acct.digits();
    if (d[0] == 0 && d[1] != 0) || (d[0] == 0 && d[1] == 0 && d[2] == 0) {
        return CheckResult::InvalidKto;
    }
    weighted(acct, &MA1)
}

static MA4_SEVEN: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7],
    fold: Fold::None,
    style: Style::Mod7,
    check: 9,
};

fn method_a4(acct: &Account, blz: &str) -> CheckResult {
    if acct.digit(2) == 9 && acct.digit(3) == 9 {
        if weighted(acct, &M93_TAIL).is_ok() {
            return CheckResult::Ok;
        }
        return method_93(acct, blz);
    }
    if weighted(acct, &M90_A).is_ok() {
        return CheckResult::Ok;
    }
    if weighted(acct, &MA4_SEVEN).is_ok() {
        return CheckResult::Ok;
    }
    method_93(acct, blz)
}

fn method_a5(acct: &Account, _blz: &str) -> CheckResult {
    if weighted(acct, &M00).is_ok() {
        return CheckResult::Ok;
    }
    if acct.digit(0) == 9 {
        return CheckResult::InvalidKto;
    }
    weighted(acct, &M10)
}

fn method_a6(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(1) == 8 {
        weighted(acct, &M00)
    } else {
        weighted(acct, &M01)
    }
}

static MA8_EXC1: Scheme = Scheme {
    weights: &[2, 3, 4, 5, 6, 7, 8],
    fold: Fold::None,
    style: Style::Mod11(Rest1::Zero),
    check: 9,
};

static MA8_ALT: Scheme = Scheme {
    weights: &[1, 2, 1, 2, 1, 2],
    fold: Fold::Sub9,
    style: Style::Mod10,
    check: 9,
};

fn method_a8(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(2) == 9 {
        if weighted(acct, &MA8_EXC1).is_ok() {
            return CheckResult::Ok;
        }
        return weighted(acct, &M10);
    }
    if weighted(acct, &M32).is_ok() {
        return CheckResult::Ok;
    }
    weighted(acct, &MA8_ALT)
}

fn method_b0(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(0) == 0 || acct.digit(0) == 8 {
        return CheckResult::InvalidKto;
    }
    // Account types 1, 2, 3 and 6 in position 8 carry no check digit.
    if matches!(acct.digit(7), 1 | 2 | 3 | 6) {
        return CheckResult::Ok;
    }
    weighted(acct, &M06)
}

fn method_b2(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(0) < 8 {
        weighted(acct, &M02)
    } else {
        weighted(acct, &M00)
    }
}

fn method_b3(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(0) < 9 {
        weighted(acct, &M32)
    } else {
        weighted(acct, &M06)
    }
}

fn method_b4(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(0) == 9 {
        weighted(acct, &M00)
    } else {
        weighted(acct, &M02)
    }
}

fn method_b5(acct: &Account, _blz: &str) -> CheckResult {
    if weighted(acct, &M05).is_ok() {
        return CheckResult::Ok;
    }
    if acct.digit(0) > 7 {
        return CheckResult::False;
    }
    weighted(acct, &M00)
}

// The unconverted ESER range (leading zero) stays unverifiable.
fn method_b6(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(0) > 0 {
        return weighted(acct, &M20);
    }
    CheckResult::NotImplemented
}

fn method_b7(acct: &Account, _blz: &str) -> CheckResult {
    let n = acct.number();
    if (1_000_000..=5_999_999).contains(&n) || (700_000_000..=899_999_999).contains(&n) {
        return weighted(acct, &M01);
    }
    CheckResult::Ok
}

// Both branches compare against position 10; the modulus-10 pass uses a
// 1,2,3 weight cycle with the weight folded into each product.
fn method_b9(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(0) != 0 || acct.digit(1) != 0 {
        return CheckResult::InvalidKto;
    }
    if acct.digit(2) == 0 && acct.digit(3) == 0 {
        return CheckResult::InvalidKto;
    }
    if acct.digit(2) != 0 {
        let mut sum = 0u32;
        for (i, w) in [1u32, 2, 3, 1, 2, 3, 1].into_iter().enumerate() {
            sum += (u32::from(acct.digit(2 + i)) * w + w) % 11;
        }
        let r = sum % 10;
        if r as u8 == acct.digit(9) {
            return CheckResult::Ok;
        }
        return verdict(((r + 5) % 10) as u8 == acct.digit(9));
    }
    let r = span_sum(acct, 3, &[1, 2, 3, 4, 5, 6], Fold::None) % 11;
    if r as u8 == acct.digit(9) {
        return CheckResult::Ok;
    }
    verdict(((r + 5) % 10) as u8 == acct.digit(9))
}

fn method_c1(acct: &Account, blz: &str) -> CheckResult {
    if acct.digit(0) != 5 {
        return method_17(acct, blz);
    }
    let sum = span_sum(acct, 0, &[1, 2, 1, 2, 1, 2, 1, 2, 1], Fold::Sub9);
    minus_one_eleven(sum, acct.digit(9))
}

fn method_c3(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(0) != 9 {
        weighted(acct, &M00)
    } else {
        weighted(acct, &M58)
    }
}

fn method_c4(acct: &Account, _blz: &str) -> CheckResult {
    if acct.digit(0) != 9 {
        weighted(acct, &M15)
    } else {
        weighted(acct, &M58)
    }
}

fn method_c5(acct: &Account, blz: &str) -> CheckResult {
    if acct.span_number(0, 4) == 0 && (1..=8).contains(&acct.digit(4)) {
        return method_75(acct, blz);
    }
    if acct.digit(0) == 0 && (1..=8).contains(&acct.digit(1)) {
        return weighted(acct, &M75_BASE);
    }
    if matches!(acct.digit(0), 1 | 4 | 5 | 6 | 9) {
        return iterated_transform(acct);
    }
    if acct.digit(0) == 3 {
        return weighted(acct, &M00);
    }
    if acct.digit(0) == 0 && acct.digit(1) == 0 && (3..=5).contains(&acct.digit(2)) {
        return CheckResult::Ok;
    }
    if (acct.digit(0) == 7 && acct.digit(1) == 0) || (acct.digit(0) == 8 && acct.digit(1) == 5) {
        return CheckResult::Ok;
    }
    CheckResult::InvalidKto
}

// A constant 31 stands in for the weighted bank prefix.
fn method_c6(acct: &Account, _blz: &str) -> CheckResult {
    let sum = 31 + span_sum(acct, 1, &[1, 2, 1, 2, 1, 2, 1, 2], Fold::Sub9);
    verdict(((10 - sum % 10) % 10) as u8 == acct.digit(9))
}

pub(crate) static RULES: &[(u8, Rule)] = &[
    (0xA0, Rule::Fn(method_a0)),
    (0xA1, Rule::Fn(method_a1)),
    (
        0xA2,
        Rule::FirstOk(&[Step::Scheme(&M00), Step::Scheme(&M04)]),
    ),
    (
        0xA3,
        Rule::FirstOk(&[Step::Scheme(&M00), Step::Scheme(&M10)]),
    ),
    (0xA4, Rule::Fn(method_a4)),
    (0xA5, Rule::Fn(method_a5)),
    (0xA6, Rule::Fn(method_a6)),
    (0xA7, Rule::Scheme(&M00)),
    (0xA8, Rule::Fn(method_a8)),
    (
        0xA9,
        Rule::FirstOk(&[Step::Scheme(&M01), Step::Scheme(&M06)]),
    ),
    (0xB0, Rule::Fn(method_b0)),
    (
        0xB1,
        Rule::FirstOk(&[Step::Scheme(&M05), Step::Scheme(&M01)]),
    ),
    (0xB2, Rule::Fn(method_b2)),
    (0xB3, Rule::Fn(method_b3)),
    (0xB4, Rule::Fn(method_b4)),
    (0xB5, Rule::Fn(method_b5)),
    (0xB6, Rule::Fn(method_b6)),
    (0xB7, Rule::Fn(method_b7)),
    (
        0xB8,
        Rule::FirstOk(&[Step::Scheme(&M20), Step::Transform]),
    ),
    (0xB9, Rule::Fn(method_b9)),
    (0xC0, Rule::Scheme(&M20)),
    (0xC1, Rule::Fn(method_c1)),
    (
        0xC2,
        Rule::FirstOk(&[Step::Scheme(&M22), Step::Scheme(&M00)]),
    ),
    (0xC3, Rule::Fn(method_c3)),
    (0xC4, Rule::Fn(method_c4)),
    (0xC5, Rule::Fn(method_c5)),
    (0xC6, Rule::Fn(method_c6)),
];
