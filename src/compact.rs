//! Compact difficulty-target encoding, the packed form difficulty limits
//! take inside the block header `bits` field.

use primitive_types::U256;

/// Pack a 256-bit target into compact form: one size byte followed by a
/// three-byte mantissa. The mantissa is kept below 0x800000 because the
/// encoding is sign-magnitude.
pub fn to_compact(target: U256) -> u32 {
    let mut size = (target.bits() as u32 + 7) / 8;
    let mut compact = if size <= 3 {
        (target.low_u64() as u32) << (8 * (3 - size))
    } else {
        let shifted = target >> (8 * (size - 3) as usize);
        shifted.low_u64() as u32
    };
    if compact & 0x0080_0000 != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | (size << 24)
}

/// Expand a compact-encoded target back into its 256-bit form.
pub fn from_compact(compact: u32) -> U256 {
    let size = compact >> 24;
    let mantissa = compact & 0x007f_ffff;
    if size <= 3 {
        U256::from(mantissa >> (8 * (3 - size)))
    } else {
        U256::from(mantissa) << (8 * (size - 3) as usize)
    }
}
