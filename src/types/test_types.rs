use inetnum::asn::Asn;

//------------ PrefixAs ------------------------------------------------------
//
// A small payload for tests and benches: the origin AS of a route.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrefixAs(pub u32);

impl PrefixAs {
    pub fn asn(&self) -> Asn {
        Asn::from_u32(self.0)
    }
}

impl std::fmt::Display for PrefixAs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.asn())
    }
}

impl From<u32> for PrefixAs {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
