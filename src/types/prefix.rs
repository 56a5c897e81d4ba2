use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::types::bits::{eq_leading, prefix_mask};
use crate::types::errors::PrefixTrieError;

//------------ Ipv4Prefix ----------------------------------------------------

/// An IPv4 prefix, i.e. a network address together with the number of
/// leading bits that are significant.
///
/// The host bits (the bits beyond `len`) are always zero: every constructor
/// masks them out. An `Ipv4Prefix` can therefore be handed to the trie
/// without further checks.
#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone, PartialOrd, Ord)]
pub struct Ipv4Prefix {
    net: u32,
    len: u8,
}

impl Ipv4Prefix {
    /// Creates a prefix from an address and a length, zeroing out any host
    /// bits in the address. Returns [PrefixTrieError::InvalidPrefix] if
    /// `len` is larger than 32.
    pub fn new(addr: Ipv4Addr, len: u8) -> Result<Self, PrefixTrieError> {
        Self::from_bits(u32::from(addr), len)
    }

    /// Like [Ipv4Prefix::new], but takes the address as a big-endian u32.
    pub fn from_bits(net: u32, len: u8) -> Result<Self, PrefixTrieError> {
        if len > 32 {
            return Err(PrefixTrieError::InvalidPrefix);
        }
        Ok(Self::new_masked(net, len))
    }

    /// A /32 prefix covering exactly `addr`.
    pub fn host(addr: Ipv4Addr) -> Self {
        Self {
            net: addr.into(),
            len: 32,
        }
    }

    // Callers guarantee len <= 32.
    pub(crate) fn new_masked(net: u32, len: u8) -> Self {
        debug_assert!(len <= 32);
        Self {
            net: net & prefix_mask(len),
            len,
        }
    }

    /// The network address as a left-justified bit pattern.
    pub fn bits(&self) -> u32 {
        self.net
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.net)
    }

    /// Whether `addr` falls within this prefix.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        eq_leading(self.net, u32::from(addr), self.len)
    }

    /// Whether `other` is equal to, or more specific than, this prefix.
    pub fn covers(&self, other: &Ipv4Prefix) -> bool {
        self.len <= other.len && eq_leading(self.net, other.net, self.len)
    }
}

impl fmt::Display for Ipv4Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr(), self.len)
    }
}

impl FromStr for Ipv4Prefix {
    type Err = PrefixTrieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, len) =
            s.trim().split_once('/').ok_or(PrefixTrieError::InvalidPrefix)?;
        let addr = addr
            .parse::<Ipv4Addr>()
            .map_err(|_| PrefixTrieError::InvalidPrefix)?;
        let len = len
            .parse::<u8>()
            .map_err(|_| PrefixTrieError::InvalidPrefix)?;
        Self::new(addr, len)
    }
}

impl TryFrom<inetnum::addr::Prefix> for Ipv4Prefix {
    type Error = PrefixTrieError;

    fn try_from(value: inetnum::addr::Prefix) -> Result<Self, Self::Error> {
        match value.addr() {
            IpAddr::V4(addr) => Self::new(addr, value.len()),
            IpAddr::V6(_) => Err(PrefixTrieError::AddressFamilyNotSupported),
        }
    }
}

// There is no reasonable way for this to panic, Ipv4Prefix and inetnum's
// Prefix represent the same data, and the host bits are always zero.
#[allow(clippy::unwrap_used)]
impl From<Ipv4Prefix> for inetnum::addr::Prefix {
    fn from(value: Ipv4Prefix) -> Self {
        Self::new(IpAddr::V4(value.addr()), value.len()).unwrap()
    }
}
