use crate::error::{DropzoneError, Result};
use std::fmt;
use std::str::FromStr;

const K: u128 = 1024;

/// Binary-prefixed size units, `KB = 1024` bytes up to `YB = 1024^8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteUnit {
    Bytes,
    Kb,
    Mb,
    Gb,
    Tb,
    Pb,
    Eb,
    Zb,
    Yb,
}

impl ByteUnit {
    pub const ALL: [ByteUnit; 9] = [
        ByteUnit::Bytes,
        ByteUnit::Kb,
        ByteUnit::Mb,
        ByteUnit::Gb,
        ByteUnit::Tb,
        ByteUnit::Pb,
        ByteUnit::Eb,
        ByteUnit::Zb,
        ByteUnit::Yb,
    ];

    fn exponent(&self) -> u32 {
        match self {
            ByteUnit::Bytes => 0,
            ByteUnit::Kb => 1,
            ByteUnit::Mb => 2,
            ByteUnit::Gb => 3,
            ByteUnit::Tb => 4,
            ByteUnit::Pb => 5,
            ByteUnit::Eb => 6,
            ByteUnit::Zb => 7,
            ByteUnit::Yb => 8,
        }
    }

    pub fn multiplier(&self) -> u128 {
        K.pow(self.exponent())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ByteUnit::Bytes => "Bytes",
            ByteUnit::Kb => "KB",
            ByteUnit::Mb => "MB",
            ByteUnit::Gb => "GB",
            ByteUnit::Tb => "TB",
            ByteUnit::Pb => "PB",
            ByteUnit::Eb => "EB",
            ByteUnit::Zb => "ZB",
            ByteUnit::Yb => "YB",
        }
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ByteUnit {
    type Err = DropzoneError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "" | "B" | "BYTE" | "BYTES" => Ok(ByteUnit::Bytes),
            other => ByteUnit::ALL
                .into_iter()
                .find(|u| u.as_str() == other)
                .ok_or_else(|| DropzoneError::InvalidByteSize(format!("unknown unit '{}'", s))),
        }
    }
}

/// Converts `amount` of `unit` into bytes.
///
/// `get_bytes(1, ByteUnit::Mb)` is `1048576`.
pub fn get_bytes(amount: u64, unit: ByteUnit) -> u128 {
    amount as u128 * unit.multiplier()
}

/// Human-readable size with two decimals, trailing zeros dropped (`"1.5 KB"`).
pub fn format_bytes(bytes: impl Into<u128>) -> String {
    format_bytes_with(bytes, 2)
}

pub fn format_bytes_with(bytes: impl Into<u128>, decimals: usize) -> String {
    let bytes = bytes.into();
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = ByteUnit::Bytes;
    for candidate in ByteUnit::ALL.into_iter().skip(1) {
        if bytes < candidate.multiplier() {
            break;
        }
        unit = candidate;
    }

    let value = bytes as f64 / unit.multiplier() as f64;
    let mut text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    format!("{} {}", text, unit)
}

/// Parses sizes such as `"512"`, `"10MB"` or `"10 mb"` into a byte count.
pub fn parse_byte_size(input: &str) -> Result<u64> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (amount, unit) = input.split_at(split);

    let amount: u64 = amount
        .parse()
        .map_err(|_| DropzoneError::InvalidByteSize(format!("missing amount in '{}'", input)))?;
    let unit: ByteUnit = unit.parse()?;

    u64::try_from(get_bytes(amount, unit))
        .map_err(|_| DropzoneError::InvalidByteSize(format!("'{}' does not fit in 64 bits", input)))
}
