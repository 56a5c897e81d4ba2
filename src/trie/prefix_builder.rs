use crate::types::bits::{prefix_mask, shr_or_zero};
use crate::types::Ipv4Prefix;

//------------ PrefixBuilder -------------------------------------------------

/// Reassembles the full prefix of a node while walking the trie: segments
/// are pushed on the way down and popped on the way back up.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrefixBuilder {
    bits: u32,
    len: u8,
}

impl PrefixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a left-justified segment of `len` bits. Bits of `bits`
    /// beyond `len` must be zero.
    pub fn push(&mut self, bits: u32, len: u8) {
        debug_assert!(self.len + len <= 32);
        self.bits |= shr_or_zero(bits, self.len);
        self.len += len;
    }

    /// Removes the last `len` bits.
    pub fn pop(&mut self, len: u8) {
        debug_assert!(len <= self.len);
        self.len -= len;
        self.bits &= prefix_mask(self.len);
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn build(&self) -> Ipv4Prefix {
        Ipv4Prefix::new_masked(self.bits, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut b = PrefixBuilder::new();
        assert_eq!(b.build().to_string(), "0.0.0.0/0");

        b.push(0x0a00_0000, 8);
        b.push(0x0a00_0000, 8);
        assert_eq!(b.build().to_string(), "10.10.0.0/16");

        b.push(0x0a00_0000, 8);
        b.push(0x0500_0000, 8);
        assert_eq!(b.build().to_string(), "10.10.10.5/32");

        b.pop(8);
        assert_eq!(b.build().to_string(), "10.10.10.0/24");
        b.pop(20);
        assert_eq!(b.len(), 4);
        assert_eq!(b.build().to_string(), "0.0.0.0/4");
    }

    #[test]
    fn test_odd_segments() {
        let mut b = PrefixBuilder::new();
        b.push(0b1100_0000 << 24, 3);
        b.push(0b0101_1000 << 24, 5);
        assert_eq!(b.build().bits(), 0b1100_1011 << 24);
        b.pop(5);
        assert_eq!(b.build().bits(), 0b1100_0000 << 24);
    }
}
