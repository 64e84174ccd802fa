//! Basis-index arithmetic.
//!
//! Bit convention used everywhere in the crate: qubit 0 is the most
//! significant bit of a basis index. For `width = 3`, index `0b100` is |100⟩,
//! i.e. qubit 0 set and qubits 1 and 2 clear.
use crate::core::error::{Result, SimError};

/// Largest register width for which `1 << width` fits a `usize` index.
pub const MAX_WIDTH: usize = usize::BITS as usize - 1;

/// `2^width`, rejecting widths that would overflow an index.
pub fn dimension(width: usize) -> Result<usize> {
    if width > MAX_WIDTH {
        return Err(SimError::range(format!("width {width} exceeds {MAX_WIDTH}")));
    }
    Ok(1usize << width)
}

/// Widest register the dense engine will allocate: a full operator is
/// `2^MAX_QUBITS` square complex entries.
pub const MAX_QUBITS: usize = 12;

/// `2^n_qubits` for a register the engine can hold densely.
pub fn register_dimension(n_qubits: usize) -> Result<usize> {
    if n_qubits == 0 {
        return Err(SimError::invalid_argument("register needs at least one qubit"));
    }
    if n_qubits > MAX_QUBITS {
        return Err(SimError::range(format!(
            "{n_qubits} qubits exceeds the dense limit of {MAX_QUBITS}"
        )));
    }
    dimension(n_qubits)
}

/// `i` as a `width`-digit binary string, most significant digit first.
pub fn index_to_bits(i: usize, width: usize) -> Result<String> {
    let dim = dimension(width)?;
    if i >= dim {
        return Err(SimError::range(format!("index {i} outside [0, {dim})")));
    }
    if width == 0 {
        return Ok(String::new());
    }
    Ok(format!("{i:0width$b}"))
}

/// Inverse of [`index_to_bits`].
pub fn bits_to_index(bits: &str) -> Result<usize> {
    if bits.len() > MAX_WIDTH {
        return Err(SimError::range(format!("'{bits}' is wider than {MAX_WIDTH} bits")));
    }
    bits.chars().try_fold(0usize, |acc, ch| match ch {
        '0' => Ok(acc << 1),
        '1' => Ok((acc << 1) | 1),
        other => Err(SimError::format(format!("'{bits}' contains non-binary character '{other}'"))),
    })
}

/// Shift that brings qubit `position` down to bit 0 of an index.
pub fn shift_of(width: usize, position: usize) -> Result<usize> {
    if position >= width {
        return Err(SimError::range(format!("qubit {position} outside [0, {width})")));
    }
    Ok(width - 1 - position)
}

/// Digit (0 or 1) of qubit `position` within basis index `i`.
pub fn bit_at(i: usize, width: usize, position: usize) -> Result<u8> {
    let shift = shift_of(width, position)?;
    if i >= dimension(width)? {
        return Err(SimError::range(format!("index {i} outside [0, 2^{width})")));
    }
    Ok(((i >> shift) & 1) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_first() {
        assert_eq!(index_to_bits(4, 3).unwrap(), "100");
        assert_eq!(index_to_bits(1, 3).unwrap(), "001");
        assert_eq!(bit_at(4, 3, 0).unwrap(), 1);
        assert_eq!(bit_at(4, 3, 2).unwrap(), 0);
        assert_eq!(bit_at(1, 3, 2).unwrap(), 1);
    }

    #[test]
    fn round_trip_small_widths() {
        for width in 1..=6 {
            for i in 0..(1usize << width) {
                let bits = index_to_bits(i, width).unwrap();
                assert_eq!(bits.len(), width);
                assert_eq!(bits_to_index(&bits).unwrap(), i);
            }
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(index_to_bits(8, 3), Err(SimError::Range(_))));
        assert!(matches!(bit_at(0, 2, 2), Err(SimError::Range(_))));
        assert!(matches!(bit_at(4, 2, 0), Err(SimError::Range(_))));
        assert!(matches!(dimension(MAX_WIDTH + 1), Err(SimError::Range(_))));
    }

    #[test]
    fn register_dimension_is_bounded() {
        assert_eq!(register_dimension(1).unwrap(), 2);
        assert_eq!(register_dimension(MAX_QUBITS).unwrap(), 1 << MAX_QUBITS);
        assert!(matches!(register_dimension(0), Err(SimError::InvalidArgument(_))));
        assert!(matches!(register_dimension(MAX_QUBITS + 1), Err(SimError::Range(_))));
        assert!(matches!(register_dimension(62), Err(SimError::Range(_))));
    }

    #[test]
    fn rejects_non_binary() {
        assert!(matches!(bits_to_index("012"), Err(SimError::Format(_))));
        assert!(matches!(bits_to_index("1 0"), Err(SimError::Format(_))));
        assert_eq!(bits_to_index("").unwrap(), 0);
    }
}
