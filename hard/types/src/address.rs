use {
    crate::{StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{
        de::{self, Error},
        Serialize,
    },
    std::{
        fmt::{self, Display, Formatter},
        io,
        str::FromStr,
    },
};

/// An account address.
///
/// Addresses are opaque to the ledger: any non-empty string of ASCII
/// alphanumeric characters is accepted. Their byte order is the order in which
/// accounts are listed by paginated queries.
#[derive(Serialize, BorshSerialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(String);

impl Addr {
    pub const MAX_LEN: usize = 255;

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(s: &str) -> StdResult<()> {
        if s.is_empty() {
            return Err(StdError::invalid_addr(s, "empty"));
        }

        if s.len() > Self::MAX_LEN {
            return Err(StdError::invalid_addr(s, "too long"));
        }

        if s.chars().any(|ch| !ch.is_ascii_alphanumeric()) {
            return Err(StdError::invalid_addr(s, "non-alphanumeric character"));
        }

        Ok(())
    }
}

impl AsRef<str> for Addr {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Addr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for Addr {
    type Error = StdError;

    fn try_from(s: String) -> StdResult<Self> {
        Self::validate(&s)?;

        Ok(Self(s))
    }
}

impl TryFrom<&str> for Addr {
    type Error = StdError;

    fn try_from(s: &str) -> StdResult<Self> {
        Addr::try_from(s.to_string())
    }
}

impl FromStr for Addr {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        Addr::try_from(s.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Addr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        <String as de::Deserialize>::deserialize(deserializer)?
            .try_into()
            .map_err(D::Error::custom)
    }
}

impl BorshDeserialize for Addr {
    fn deserialize_reader<R>(reader: &mut R) -> io::Result<Self>
    where
        R: io::Read,
    {
        <String as BorshDeserialize>::deserialize_reader(reader)?
            .try_into()
            .map_err(io::Error::other)
    }
}

// ----------------------------------- tests -----------------------------------
