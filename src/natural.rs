//! Natural ordering for sheet numbers
//!
//! Sheet numbers mix letters and digits (`A1`, `A10`, `M-201`), and people
//! expect `2` before `10`. A [`NaturalKey`] splits the text into maximal runs
//! of ASCII digits and non-digits; digit runs compare by numeric value, text
//! runs compare case-insensitively.
//!
//! # Ordering rules
//!
//! - Tokens compare pairwise from the left.
//! - `Numeric` vs `Numeric`: by value (`007` == `7`), with no upper bound.
//! - `Text` vs `Text`: lexicographically on the lowercased text.
//! - `Numeric` vs `Text` at the same position: the numeric token sorts first.
//! - A key that is a strict prefix of another sorts first.
//! - Empty (or absent) input is the single token `Text("")`.
//!
//! ```
//! use sheetnum::natural::natural_key;
//!
//! assert!(natural_key("2") < natural_key("10"));
//! assert!(natural_key("10") < natural_key("A1"));
//! assert!(natural_key("A1") < natural_key("A10"));
//! assert_eq!(natural_key("a10"), natural_key("A10"));
//! ```

use std::cmp::Ordering;
use std::fmt;

/// Arbitrary-length non-negative integer kept as its canonical digit string
///
/// Leading zeros are stripped (all-zero runs become `"0"`), so comparing by
/// length first and then bytewise is the same as comparing by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digits(String);

impl Digits {
    fn from_run(run: &str) -> Self {
        let trimmed = run.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, if it fits in a `u128`
    #[must_use]
    pub fn value(&self) -> Option<u128> {
        self.0.parse().ok()
    }
}

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One run of a natural key
///
/// Variant order matters: the derived `Ord` puts `Numeric` before `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NaturalKeyToken {
    Numeric(Digits),
    /// Lowercased text run
    Text(String),
}

/// Comparable key built from a sheet number
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NaturalKey(Vec<NaturalKeyToken>);

impl NaturalKey {
    #[must_use]
    pub fn tokens(&self) -> &[NaturalKeyToken] {
        &self.0
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|token| match token {
                NaturalKeyToken::Numeric(d) => d.as_str().to_string(),
                NaturalKeyToken::Text(t) => format!("{t:?}"),
            })
            .collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Build the natural key for a sheet number
///
/// Accepts `&str` or `Option<&str>`; `None` and `""` both yield `Text("")`.
#[must_use]
pub fn natural_key<'a>(text: impl Into<Option<&'a str>>) -> NaturalKey {
    let text = text.into().unwrap_or_default();
    if text.is_empty() {
        return NaturalKey(vec![NaturalKeyToken::Text(String::new())]);
    }

    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_is_digit = None;

    for (i, c) in text.char_indices() {
        let is_digit = c.is_ascii_digit();
        match run_is_digit {
            Some(current) if current != is_digit => {
                tokens.push(token_for(&text[run_start..i], current));
                run_start = i;
            }
            _ => {}
        }
        run_is_digit = Some(is_digit);
    }
    if let Some(current) = run_is_digit {
        tokens.push(token_for(&text[run_start..], current));
    }

    NaturalKey(tokens)
}

fn token_for(run: &str, is_digit: bool) -> NaturalKeyToken {
    if is_digit {
        NaturalKeyToken::Numeric(Digits::from_run(run))
    } else {
        NaturalKeyToken::Text(run.to_lowercase())
    }
}

/// Compare two sheet numbers in natural order
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}
