//! Grouped decimal formatting for values shown to players.

/// Digit-grouping style (thousands separator).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Grouping {
    separator: char,
}

impl Grouping {
    /// `1,234,567`
    pub const US: Self = Self { separator: ',' };
    /// `1.234.567`
    pub const CONTINENTAL: Self = Self { separator: '.' };
    /// `1 234 567`
    pub const SPACE: Self = Self { separator: ' ' };

    pub const fn new(separator: char) -> Self {
        Self { separator }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn format(&self, value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if value < 0 {
            out.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.separator);
            }
            out.push(ch);
        }
        out
    }
}

impl Default for Grouping {
    fn default() -> Self {
        Self::US
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        let us = Grouping::US;
        assert_eq!(us.format(0), "0");
        assert_eq!(us.format(999), "999");
        assert_eq!(us.format(1_000), "1,000");
        assert_eq!(us.format(2_008_000), "2,008,000");
        assert_eq!(us.format(-1_500_000), "-1,500,000");
        assert_eq!(us.format(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn other_separators() {
        assert_eq!(Grouping::CONTINENTAL.format(1_234_567), "1.234.567");
        assert_eq!(Grouping::SPACE.format(12_345), "12 345");
        assert_eq!(Grouping::new('\'').format(100_000), "100'000");
    }
}
