/// A normalized account number: exactly ten decimal digits, left-padded with
/// zeros. Digit positions are left-indexed, so `digit(9)` is the rightmost
/// digit (the check digit for most methods).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    digits: [u8; 10],
}

impl Account {
    /// Parse a raw account string. Rejects empty input, non-decimal
    /// characters, and anything longer than ten digits.
    pub fn parse(raw: &str) -> Option<Account> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > 10 {
            return None;
        }
        let mut digits = [0u8; 10];
        let pad = 10 - trimmed.len();
        for (i, c) in trimmed.bytes().enumerate() {
            if !c.is_ascii_digit() {
                return None;
            }
            digits[pad + i] = c - b'0';
        }
        Some(Account { digits })
    }

    #[inline]
    pub fn digits(&self) -> &[u8; 10] {
        &self.digits
    }

    #[inline]
    pub fn digit(&self, pos: usize) -> u8 {
        self.digits[pos]
    }

    /// The full ten-digit value as a number.
    pub fn number(&self) -> u64 {
        self.digits.iter().fold(0u64, |acc, &d| acc * 10 + d as u64)
    }

    /// Numeric value of the digit span `[start, end)`.
    pub fn span_number(&self, start: usize, end: usize) -> u64 {
        self.digits[start..end]
            .iter()
            .fold(0u64, |acc, &d| acc * 10 + d as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::Account;

    #[test]
    fn pads_left() {
        let a = Account::parse("123").unwrap();
        assert_eq!(a.digits(), &[0, 0, 0, 0, 0, 0, 0, 1, 2, 3]);
        assert_eq!(a.number(), 123);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Account::parse("").is_none());
        assert!(Account::parse("12A4567897").is_none());
        assert!(Account::parse("12345678901").is_none());
        assert!(Account::parse("12 34").is_none());
    }

    #[test]
    fn span_value() {
        let a = Account::parse("1234567890").unwrap();
        assert_eq!(a.span_number(0, 8), 12345678);
        assert_eq!(a.span_number(8, 10), 90);
    }
}
