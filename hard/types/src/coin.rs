use {
    crate::{Denom, StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    hard_math::Int256,
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Clone, PartialEq, Eq)]
pub struct Coin {
    pub denom: Denom,
    pub amount: Int256,
}

impl Coin {
    pub fn new<D, A>(denom: D, amount: A) -> StdResult<Self>
    where
        D: TryInto<Denom>,
        A: Into<Int256>,
        StdError: From<D::Error>,
    {
        Ok(Self {
            denom: denom.try_into()?,
            amount: amount.into(),
        })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl fmt::Debug for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coin({}{})", self.amount, self.denom)
    }
}

/// A reference to a record in a `Coins` map.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinRef<'a> {
    pub denom: &'a Denom,
    pub amount: &'a Int256,
}

impl fmt::Display for CoinRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
