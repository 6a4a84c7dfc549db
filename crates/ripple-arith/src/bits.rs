//! Bit-literal helpers.
//!
//! Literals are slices of `u8` holding 0 or 1, written most significant digit
//! first unless a function says otherwise.

use crate::error::{ArithError, ArithResult};

/// Check that every digit is 0 or 1.
pub fn validate_bits(bits: &[u8]) -> ArithResult<()> {
    match bits.iter().position(|&b| b > 1) {
        Some(position) => Err(ArithError::InvalidBit {
            value: bits[position].to_string(),
            position,
        }),
        None => Ok(()),
    }
}

/// Parse a string of `0` / `1` characters.
pub fn parse_bitstring(s: &str) -> ArithResult<Vec<u8>> {
    s.chars()
        .enumerate()
        .map(|(position, ch)| match ch {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(ArithError::InvalidBit {
                value: other.to_string(),
                position,
            }),
        })
        .collect()
}

/// Flip every digit.
pub fn negate_bits(bits: &[u8]) -> ArithResult<Vec<u8>> {
    validate_bits(bits)?;
    Ok(bits.iter().map(|&b| 1 - b).collect())
}

/// `value` as `width` digits, most significant first.
pub fn bitstring_from_int(value: u64, width: usize) -> ArithResult<Vec<u8>> {
    if width < 64 && value >> width != 0 {
        return Err(ArithError::InvalidWidth { value, width });
    }
    Ok((0..width)
        .rev()
        .map(|i| u8::from(i < 64 && (value >> i) & 1 == 1))
        .collect())
}

/// Read a literal as an unsigned integer.
///
/// With `little_endian`, `bits[0]` is the least significant digit.
/// Fails with [`ArithError::InvalidWidth`] when the value needs more than 64
/// bits.
pub fn int_from_bits(bits: &[u8], little_endian: bool) -> ArithResult<u64> {
    validate_bits(bits)?;
    let n = bits.len();
    let mut value = 0u64;
    for i in 0..n {
        let bit = if little_endian { bits[n - 1 - i] } else { bits[i] };
        if value >> 63 != 0 {
            return Err(ArithError::InvalidWidth {
                value: u64::MAX,
                width: 64,
            });
        }
        value = (value << 1) | u64::from(bit);
    }
    Ok(value)
}

/// Smallest width holding every value in `values` (at least 1).
pub fn required_bits(values: &[u64]) -> usize {
    let max = values.iter().copied().max().unwrap_or(0);
    (u64::BITS - max.leading_zeros()).max(1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitstring_from_int() {
        assert_eq!(bitstring_from_int(5, 4).unwrap(), vec![0, 1, 0, 1]);
        assert_eq!(bitstring_from_int(0, 2).unwrap(), vec![0, 0]);
        assert_eq!(bitstring_from_int(0, 0).unwrap(), Vec::<u8>::new());
        assert!(matches!(
            bitstring_from_int(4, 2),
            Err(ArithError::InvalidWidth { value: 4, width: 2 })
        ));
        assert_eq!(bitstring_from_int(u64::MAX, 64).unwrap().len(), 64);
    }

    #[test]
    fn test_int_from_bits() {
        assert_eq!(int_from_bits(&[1, 1, 0], false).unwrap(), 6);
        assert_eq!(int_from_bits(&[1, 1, 0], true).unwrap(), 3);
        assert_eq!(int_from_bits(&[], true).unwrap(), 0);
        assert!(int_from_bits(&[1; 65], false).is_err());
        // Leading zeros beyond 64 digits are fine.
        let mut long = vec![0u8; 10];
        long.extend([1; 64]);
        assert_eq!(int_from_bits(&long, false).unwrap(), u64::MAX);
    }

    #[test]
    fn test_parse_and_negate() {
        assert_eq!(parse_bitstring("1011").unwrap(), vec![1, 0, 1, 1]);
        let err = parse_bitstring("10x1").unwrap_err();
        assert!(matches!(err, ArithError::InvalidBit { position: 2, .. }));
        assert_eq!(negate_bits(&[1, 0, 0]).unwrap(), vec![0, 1, 1]);
        assert!(negate_bits(&[1, 2]).is_err());
    }

    #[test]
    fn test_required_bits() {
        assert_eq!(required_bits(&[]), 1);
        assert_eq!(required_bits(&[0, 0]), 1);
        assert_eq!(required_bits(&[2, 0]), 2);
        assert_eq!(required_bits(&[3, 8]), 4);
        assert_eq!(required_bits(&[u64::MAX]), 64);
    }
}
