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
        ops::Deref,
        str::FromStr,
    },
};

/// Denomination of a coin.
///
/// A valid denom is no longer than 128 characters, consisting of one or more
/// parts, each an ASCII alphanumeric string (`a-z|A-Z|0-9`), separated by the
/// forward slash (`/`).
///
/// Examples of valid denoms:
///
/// - `ukava`
/// - `erc20/tether/usdt`
///
/// Examples of invalid denoms:
///
/// - `` (empty)
/// - `ibc//1234` (empty part)
/// - `bnb&` (non-alphanumeric character)
#[derive(Serialize, BorshSerialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denom(String);

impl Denom {
    pub const MAX_LEN: usize = 128;
    pub const SEPARATOR: char = '/';

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(s: &str) -> StdResult<()> {
        if s.len() > Self::MAX_LEN {
            return Err(StdError::invalid_denom(s, "too long"));
        }

        for part in s.split(Self::SEPARATOR) {
            if part.is_empty() {
                return Err(StdError::invalid_denom(s, "empty part"));
            }

            if part.chars().any(|ch| !ch.is_ascii_alphanumeric()) {
                return Err(StdError::invalid_denom(s, "non-alphanumeric character"));
            }
        }

        Ok(())
    }
}

impl AsRef<str> for Denom {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Denom {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl Display for Denom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for Denom {
    type Error = StdError;

    fn try_from(s: String) -> StdResult<Self> {
        Self::validate(&s)?;

        Ok(Self(s))
    }
}

impl TryFrom<&str> for Denom {
    type Error = StdError;

    fn try_from(s: &str) -> StdResult<Self> {
        Denom::try_from(s.to_string())
    }
}

impl FromStr for Denom {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        Denom::try_from(s.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Denom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        <String as de::Deserialize>::deserialize(deserializer)?
            .try_into()
            .map_err(D::Error::custom)
    }
}

impl BorshDeserialize for Denom {
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
