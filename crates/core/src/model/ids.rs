use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of Juz in the catalog.
pub const JUZ_COUNT: u8 = 30;

/// Errors produced when building a `JuzId`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum JuzIdError {
    #[error("juz number {0} is out of range (1-30)")]
    OutOfRange(i64),

    #[error("failed to parse juz number from {0:?}")]
    Parse(String),
}

/// Identifier of one of the 30 Juz, always in `1..=30`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JuzId(u8);

impl JuzId {
    /// The first Juz, used as the default active unit.
    pub const FIRST: Self = Self(1);

    /// Creates a new `JuzId`.
    ///
    /// # Errors
    ///
    /// Returns `JuzIdError::OutOfRange` if `number` is not in `1..=30`.
    pub fn new(number: u8) -> Result<Self, JuzIdError> {
        Self::try_from(i64::from(number))
    }

    /// Catalog-internal constructor for numbers known to be in range.
    pub(crate) const fn from_catalog(number: u8) -> Self {
        Self(number)
    }

    /// Returns the underlying number.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Iterates all ids in reading order.
    pub fn all() -> impl Iterator<Item = JuzId> {
        (1..=JUZ_COUNT).map(Self)
    }
}

impl TryFrom<i64> for JuzId {
    type Error = JuzIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(number) if (1..=JUZ_COUNT).contains(&number) => Ok(Self(number)),
            _ => Err(JuzIdError::OutOfRange(value)),
        }
    }
}

impl TryFrom<u8> for JuzId {
    type Error = JuzIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JuzId> for u8 {
    fn from(id: JuzId) -> Self {
        id.0
    }
}

impl fmt::Debug for JuzId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JuzId({})", self.0)
    }
}

impl fmt::Display for JuzId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JuzId {
    type Err = JuzIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        match raw.parse::<i64>() {
            Ok(number) => Self::try_from(number),
            // Well-formed but wider than i64 is still just a number outside the catalog.
            Err(_) if is_integer_literal(raw) => Err(JuzIdError::OutOfRange(
                if raw.starts_with('-') { i64::MIN } else { i64::MAX },
            )),
            Err(_) => Err(JuzIdError::Parse(s.to_string())),
        }
    }
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
