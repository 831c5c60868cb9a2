//! Duration and byte-size unit tables.
//!
//! Durations resolve to `f64` seconds. Byte sizes resolve to `i64` and use
//! exact integer arithmetic: the magnitude is scanned as a mantissa plus a
//! decimal scale (`1.5` is mantissa 15, scale 1) so that `1.5KB` is computed
//! as `15 * 1024 / 10` without going through floating point.

/// Appended to "unknown duration unit" diagnostics.
pub const LEGAL_DURATION: &str =
    "Legal duration units are 'ms', 's', 'm', 'h', 'd', 'w' and 'y'";

/// Appended to "unknown bytes unit" diagnostics.
pub const LEGAL_BYTES: &str =
    "Legal multiplier units are 'B', 'KB', 'MB', 'GB', 'TB' and 'PB'";

const DURATION_UNITS: &[(&str, f64)] = &[
    ("ms", 1e-3),
    ("s", 1.0),
    ("m", 60.0),
    ("h", 60.0 * 60.0),
    ("d", 60.0 * 60.0 * 24.0),
    ("w", 60.0 * 60.0 * 24.0 * 7.0),
    ("y", 60.0 * 60.0 * 24.0 * 365.0),
];

/// Seconds per `unit`, or `None` if the unit is not a duration unit.
///
/// Unit names are case-sensitive: `m` is minutes, `M` is nothing.
pub fn duration_unit(unit: &str) -> Option<f64> {
    DURATION_UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|&(_, scale)| scale)
}

/// Multiplier for a byte unit: `B`, `k`/`KB`, `m`/`MB`, ... `p`/`PB`.
///
/// Case-insensitive, the trailing `B` is optional.
pub fn bytes_multiplier(unit: &str) -> Option<i64> {
    let stem = unit
        .strip_suffix('b')
        .or_else(|| unit.strip_suffix('B'))
        .unwrap_or(unit);

    let shift = match stem {
        "" if !unit.is_empty() => 0,
        "k" | "K" => 10,
        "m" | "M" => 20,
        "g" | "G" => 30,
        "t" | "T" => 40,
        "p" | "P" => 50,
        _ => return None,
    };
    Some(1i64 << shift)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BytesError {
    #[error("unknown bytes unit")]
    UnknownUnit,

    /// The product does not fit, or is not a whole number of bytes.
    #[error("bytes value cannot be represented")]
    Overflow,
}

/// Combine a scanned magnitude with a byte unit.
pub fn bytes_unit(magnitude: PrefixedInt, unit: &str) -> Result<i64, BytesError> {
    let multiplier = bytes_multiplier(unit).ok_or(BytesError::UnknownUnit)?;

    let divisor = 10i128
        .checked_pow(magnitude.scale)
        .ok_or(BytesError::Overflow)?;
    let scaled = i128::from(magnitude.mantissa)
        .checked_mul(i128::from(multiplier))
        .ok_or(BytesError::Overflow)?;

    if scaled % divisor != 0 {
        return Err(BytesError::Overflow);
    }
    i64::try_from(scaled / divisor).map_err(|_| BytesError::Overflow)
}

/// A non-negative decimal number scanned without loss of precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixedInt {
    /// All digits, integer and fractional, as one integer.
    pub mantissa: i64,
    /// Number of fractional digits.
    pub scale: u32,
    /// Bytes of input consumed.
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PrefixedIntError {
    #[error("expected a digit")]
    NoDigits,

    #[error("number too large")]
    Overflow,
}

/// Scan `digits [ '.' digits ]` from the start of `text`.
///
/// Stops at the first character that cannot continue the number, so a unit
/// suffix may follow directly. A sign is not accepted.
pub fn parse_prefixed_int(text: &str) -> Result<PrefixedInt, PrefixedIntError> {
    let bytes = text.as_bytes();
    let mut mantissa: i64 = 0;
    let mut scale = 0u32;
    let mut pos = 0;

    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        mantissa = push_digit(mantissa, bytes[pos])?;
        pos += 1;
    }
    if pos == 0 {
        return Err(PrefixedIntError::NoDigits);
    }

    let has_fraction = bytes.get(pos) == Some(&b'.')
        && bytes.get(pos + 1).is_some_and(|b| b.is_ascii_digit());
    if has_fraction {
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            mantissa = push_digit(mantissa, bytes[pos])?;
            scale += 1;
            pos += 1;
        }
    }

    Ok(PrefixedInt {
        mantissa,
        scale,
        len: pos,
    })
}

fn push_digit(mantissa: i64, digit: u8) -> Result<i64, PrefixedIntError> {
    mantissa
        .checked_mul(10)
        .and_then(|m| m.checked_add(i64::from(digit - b'0')))
        .ok_or(PrefixedIntError::Overflow)
}
