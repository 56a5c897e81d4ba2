pub(crate) mod bits;
pub(crate) mod match_result;
pub(crate) mod prefix;

pub use match_result::Match;
pub use prefix::Ipv4Prefix;

pub mod errors;
pub mod stats;
pub mod test_types;
