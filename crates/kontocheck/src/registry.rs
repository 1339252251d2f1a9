use std::sync::LazyLock;

use crate::scheme::Rule;
use crate::{methods_00_49, methods_50_99, methods_a0_c6};

/// Highest method id the dispatcher knows about.
pub const MAX_METHOD_ID: u8 = 0xC6;

static BY_ID: LazyLock<[Option<&'static Rule>; MAX_METHOD_ID as usize + 1]> = LazyLock::new(|| {
    let mut table = [None; MAX_METHOD_ID as usize + 1];
    for (id, rule) in methods_00_49::RULES
        .iter()
        .chain(methods_50_99::RULES)
        .chain(methods_a0_c6::RULES)
    {
        table[*id as usize] = Some(rule);
    }
    table
});

pub(crate) fn rule_for(id: u8) -> Option<&'static Rule> {
    if id > MAX_METHOD_ID {
        return None;
    }
    BY_ID[id as usize]
}

/// Ids inside the dispatch range with no method behind them: the span
/// between the decimal methods and A0, plus the AA-AF and BA-BF holes.
pub fn unimplemented_ids() -> Vec<u8> {
    (0..=MAX_METHOD_ID)
        .filter(|&id| rule_for(id).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_published_ids() {
        for id in 0x00..=0x63u8 {
            assert!(rule_for(id).is_some(), "missing method {id:#04x}");
        }
        for id in (0xA0..=0xA9u8).chain(0xB0..=0xB9).chain(0xC0..=0xC6) {
            assert!(rule_for(id).is_some(), "missing method {id:#04x}");
        }
    }

    #[test]
    fn gap_is_exactly_the_unassigned_ranges() {
        let expected: Vec<u8> = (0x64..=0x9Fu8)
            .chain(0xAA..=0xAF)
            .chain(0xBA..=0xBF)
            .collect();
        assert_eq!(unimplemented_ids(), expected);
    }
}
