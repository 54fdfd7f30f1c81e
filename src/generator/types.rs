use thiserror::Error;

pub const DEFAULT_MIN: i64 = 0;
pub const DEFAULT_MAX: i64 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("minimum ({min}) must be less than maximum ({max})")]
    InvalidRange { min: i64, max: i64 },

    #[error("entropy source failed: {0}")]
    Entropy(String),
}

/// Closed integer range with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    min: i64,
    max: i64,
}

impl Range {
    pub fn new(min: i64, max: i64) -> Result<Self, GeneratorError> {
        if min >= max {
            return Err(GeneratorError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Reads the two range input fields the way the page always has: the
    /// leading integer of each, with empty or unparsable text falling back to
    /// the defaults. The result is not validated.
    pub fn from_inputs(min: Option<&str>, max: Option<&str>) -> (i64, i64) {
        let min = min.and_then(parse_leading_int).unwrap_or(DEFAULT_MIN);
        let max = max.and_then(parse_leading_int).unwrap_or(DEFAULT_MAX);
        (min, max)
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of integers in the range, inclusive of both ends.
    pub fn span(&self) -> u128 {
        (self.max as i128 - self.min as i128 + 1) as u128
    }
}

impl Default for Range {
    fn default() -> Self {
        Self { min: DEFAULT_MIN, max: DEFAULT_MAX }
    }
}

fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|v| v * sign)
}
