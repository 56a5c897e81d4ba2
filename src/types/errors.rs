use std::fmt;

/// Possible errors returned at the boundary of a prefix trie. The trie
/// itself never fails once a prefix has been validated, so these errors can
/// only be produced while turning outside input into an [Ipv4Prefix].
///
/// [Ipv4Prefix]: crate::Ipv4Prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixTrieError {
    /// The prefix length is outside of 0..=32, or the text could not be
    /// parsed as an `address/length` pair.
    InvalidPrefix,
    /// The prefix or address is not IPv4. The trie stores 32-bit keys only.
    AddressFamilyNotSupported,
}

impl std::error::Error for PrefixTrieError {}

impl fmt::Display for PrefixTrieError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PrefixTrieError::InvalidPrefix => {
                write!(f, "Error: The specified Prefix is invalid.")
            }
            PrefixTrieError::AddressFamilyNotSupported => write!(
                f,
                "Error: Only IPv4 prefixes and addresses can be stored."
            ),
        }
    }
}

/// Errors returned while loading a [Config](crate::config::Config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(String),
    /// The configuration file is not valid JSON, or does not have the
    /// expected shape.
    Parse(String),
    /// A configured static route carries a network that is not a valid
    /// IPv4 prefix.
    Route(String),
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => {
                write!(f, "Error: Cannot read configuration: {}", msg)
            }
            ConfigError::Parse(msg) => {
                write!(f, "Error: Cannot parse configuration: {}", msg)
            }
            ConfigError::Route(network) => write!(
                f,
                "Error: Static route network {:?} is not a valid IPv4 \
                prefix.",
                network
            ),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        ConfigError::Parse(value.to_string())
    }
}
