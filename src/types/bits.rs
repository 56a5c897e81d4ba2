//------------ Bit helpers ---------------------------------------------------
//
// All bit patterns in the trie are left-justified in a u32: bit index 0 is
// the most significant bit, i.e. the first bit of an IPv4 address. Shifts by
// the full width (32) are legal inputs here and yield zero, where the plain
// shift operators would panic in debug mode.

/// Returns a mask with the leading `len` bits set. `len` must be 0..=32.
pub(crate) fn prefix_mask(len: u8) -> u32 {
    u32::MAX.checked_shl(32 - len as u32).unwrap_or(0)
}

/// Returns the bit at `idx` (0..32, counted from the most significant bit)
/// of `bits`.
pub(crate) fn get_bit(bits: u32, idx: u8) -> bool {
    bits & (1 << (31 - idx)) != 0
}

/// Returns the bit at `idx` as a child slot index, 0 or 1.
pub(crate) fn bit_index(bits: u32, idx: u8) -> usize {
    get_bit(bits, idx) as usize
}

/// The longest common prefix length of two 32-bit patterns.
pub(crate) fn lcpl(a: u32, b: u32) -> u8 {
    (a ^ b).leading_zeros() as u8
}

/// Drops the leading `len` bits of `bits`, shifting the rest to the front.
pub(crate) fn shl_or_zero(bits: u32, len: u8) -> u32 {
    bits.checked_shl(len as u32).unwrap_or(0)
}

/// Shifts `bits` back by `len` positions, the inverse of [shl_or_zero].
pub(crate) fn shr_or_zero(bits: u32, len: u8) -> u32 {
    bits.checked_shr(len as u32).unwrap_or(0)
}

/// Whether the leading `len` bits of `a` and `b` are equal.
pub(crate) fn eq_leading(a: u32, b: u32, len: u8) -> bool {
    (a ^ b) & prefix_mask(len) == 0
}
