use {
    crate::{Coin, CoinRef, Denom, StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    hard_math::{Int256, IsZero},
    serde::{de, ser, ser::SerializeSeq},
    std::{
        collections::{btree_map, BTreeMap},
        fmt, io,
    },
};

/// A set of coins, as a mapping from denoms to amounts.
///
/// Denoms are unique and ordered alphabetically, and every amount is strictly
/// positive: a record whose amount reaches zero is purged.
#[derive(BorshSerialize, Default, Clone, PartialEq, Eq)]
pub struct Coins(BTreeMap<Denom, Int256>);

impl Coins {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create a `Coins` with exactly one coin.
    /// Error if the amount isn't positive.
    pub fn one<D, A>(denom: D, amount: A) -> StdResult<Self>
    where
        D: TryInto<Denom>,
        A: Into<Int256>,
        StdError: From<D::Error>,
    {
        Self::try_from(vec![Coin::new(denom, amount)?])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether there is a non-zero amount of the given denom.
    pub fn has(&self, denom: &Denom) -> bool {
        self.0.contains_key(denom)
    }

    /// Get the amount of the given denom.
    /// Note, if the denom does not exist, zero is returned.
    pub fn amount_of(&self, denom: &Denom) -> Int256 {
        self.0.get(denom).copied().unwrap_or(Int256::ZERO)
    }

    pub fn denoms(&self) -> impl Iterator<Item = &Denom> {
        self.0.keys()
    }

    pub fn iter(&self) -> CoinsIter<'_> {
        CoinsIter(self.0.iter())
    }

    /// Increase the amount of a denom by the given amount. If the denom doesn't
    /// exist, a new record is created. Adding zero is a no-op.
    pub fn insert(&mut self, coin: Coin) -> StdResult<()> {
        if coin.amount.is_negative() {
            return Err(StdError::invalid_coins(format!(
                "cannot insert a negative amount: {coin}"
            )));
        }

        if coin.amount.is_zero() {
            return Ok(());
        }

        let Some(amount) = self.0.get_mut(&coin.denom) else {
            self.0.insert(coin.denom, coin.amount);
            return Ok(());
        };

        *amount = amount.checked_add(coin.amount)?;

        Ok(())
    }

    pub fn insert_many<I>(&mut self, coins: I) -> StdResult<()>
    where
        I: IntoIterator<Item = Coin>,
    {
        for coin in coins {
            self.insert(coin)?;
        }

        Ok(())
    }

    /// Decrease the amount of a denom by the given amount. Amount can't be
    /// reduced below zero. If the amount is reduced to exactly zero, the record
    /// is purged.
    pub fn deduct(&mut self, coin: Coin) -> StdResult<()> {
        if coin.amount.is_negative() {
            return Err(StdError::invalid_coins(format!(
                "cannot deduct a negative amount: {coin}"
            )));
        }

        if coin.amount.is_zero() {
            return Ok(());
        }

        let have = self.amount_of(&coin.denom);

        if have < coin.amount {
            return Err(StdError::insufficient_coins(coin.denom, have, coin.amount));
        }

        let remaining = have.checked_sub(coin.amount)?;

        if remaining.is_zero() {
            self.0.remove(&coin.denom);
        } else {
            self.0.insert(coin.denom, remaining);
        }

        Ok(())
    }

    pub fn deduct_many<I>(&mut self, coins: I) -> StdResult<()>
    where
        I: IntoIterator<Item = Coin>,
    {
        for coin in coins {
            self.deduct(coin)?;
        }

        Ok(())
    }

    /// Decrease the amount of a denom, flooring at zero instead of erroring.
    pub fn saturating_deduct(&mut self, coin: Coin) -> StdResult<()> {
        let have = self.amount_of(&coin.denom);

        if have <= coin.amount {
            self.0.remove(&coin.denom);
            return Ok(());
        }

        self.deduct(coin)
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = StdError;

    /// Build a coin set from a list of coins, as supplied by a user. Every
    /// amount must be positive and every denom unique.
    fn try_from(coins: Vec<Coin>) -> StdResult<Self> {
        let mut map = BTreeMap::new();

        for coin in coins {
            if !coin.amount.is_positive() {
                return Err(StdError::invalid_coins(format!(
                    "amount must be positive: {coin}"
                )));
            }

            if map.insert(coin.denom.clone(), coin.amount).is_some() {
                return Err(StdError::invalid_coins(format!(
                    "duplicate denom: {}",
                    coin.denom
                )));
            }
        }

        Ok(Self(map))
    }
}

impl TryFrom<BTreeMap<Denom, Int256>> for Coins {
    type Error = StdError;

    fn try_from(map: BTreeMap<Denom, Int256>) -> StdResult<Self> {
        if let Some((denom, amount)) = map.iter().find(|(_, amount)| !amount.is_positive()) {
            return Err(StdError::invalid_coins(format!(
                "amount must be positive: {amount}{denom}"
            )));
        }

        Ok(Self(map))
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Coins {
    type IntoIter = CoinsIter<'a>;
    type Item = CoinRef<'a>;

    fn into_iter(self) -> Self::IntoIter {
        CoinsIter(self.0.iter())
    }
}

impl IntoIterator for Coins {
    type IntoIter = CoinsIntoIter;
    type Item = Coin;

    fn into_iter(self) -> Self::IntoIter {
        CoinsIntoIter(self.0.into_iter())
    }
}

pub struct CoinsIter<'a>(btree_map::Iter<'a, Denom, Int256>);

impl<'a> Iterator for CoinsIter<'a> {
    type Item = CoinRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(denom, amount)| CoinRef { denom, amount })
    }
}

pub struct CoinsIntoIter(btree_map::IntoIter<Denom, Int256>);

impl Iterator for CoinsIntoIter {
    type Item = Coin;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(denom, amount)| Coin { denom, amount })
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .iter()
            .map(|coin| coin.to_string())
            .collect::<Vec<_>>()
            .join(",");

        f.write_str(&s)
    }
}

impl fmt::Debug for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coins({self})")
    }
}

// Coins are stored as a map, but serialized to JSON as an array of
// `{ denom, amount }` objects.
impl ser::Serialize for Coins {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for coin in self {
            seq.serialize_element(&coin)?;
        }
        seq.end()
    }
}

impl<'de> de::Deserialize<'de> for Coins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        <Vec<Coin> as de::Deserialize>::deserialize(deserializer)?
            .try_into()
            .map_err(de::Error::custom)
    }
}

impl BorshDeserialize for Coins {
    fn deserialize_reader<R>(reader: &mut R) -> io::Result<Self>
    where
        R: io::Read,
    {
        <BTreeMap<Denom, Int256> as BorshDeserialize>::deserialize_reader(reader)?
            .try_into()
            .map_err(io::Error::other)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr};

    fn denom(s: &str) -> Denom {
        Denom::from_str(s).unwrap()
    }

    fn coin(denom: &str, amount: i128) -> Coin {
        Coin::new(denom, amount).unwrap()
    }

    #[test]
    fn building_from_vec_validates() {
        assert!(Coins::try_from(vec![coin("bnb", 1), coin("ukava", 2)]).is_ok());

        assert_eq!(
            Coins::try_from(vec![coin("bnb", 0)]).unwrap_err(),
            StdError::invalid_coins("amount must be positive: 0bnb")
        );
        assert_eq!(
            Coins::try_from(vec![coin("bnb", -5)]).unwrap_err(),
            StdError::invalid_coins("amount must be positive: -5bnb")
        );
        assert_eq!(
            Coins::try_from(vec![coin("bnb", 1), coin("bnb", 2)]).unwrap_err(),
            StdError::invalid_coins("duplicate denom: bnb")
        );
    }

    #[test]
    fn insert_and_deduct_work() {
        let mut coins = Coins::new();

        coins.insert(coin("bnb", 100)).unwrap();
        coins.insert(coin("bnb", 50)).unwrap();
        coins.insert(coin("ukava", 0)).unwrap();
        assert_eq!(coins.amount_of(&denom("bnb")), Int256::new(150));
        assert!(!coins.has(&denom("ukava")));

        coins.deduct(coin("bnb", 30)).unwrap();
        assert_eq!(coins.amount_of(&denom("bnb")), Int256::new(120));

        assert_eq!(
            coins.deduct(coin("bnb", 121)).unwrap_err(),
            StdError::insufficient_coins("bnb", Int256::new(120), Int256::new(121))
        );

        // Deducting everything purges the record.
        coins.deduct(coin("bnb", 120)).unwrap();
        assert!(coins.is_empty());
    }

    #[test]
    fn saturating_deduct_floors_at_zero() {
        let mut coins = Coins::one("bnb", 10).unwrap();
        coins.saturating_deduct(coin("bnb", 25)).unwrap();
        assert!(coins.is_empty());
    }

    #[test]
    fn display_works() {
        let coins = Coins::try_from(vec![coin("ukava", 5), coin("bnb", 10)]).unwrap();
        assert_eq!(coins.to_string(), "10bnb,5ukava");
        assert_eq!(Coins::new().to_string(), "");
    }

    #[test]
    fn serde_works() {
        let coins = Coins::try_from(vec![coin("bnb", 10), coin("ukava", 5)]).unwrap();
        let json = serde_json::to_string(&coins).unwrap();
        assert_eq!(
            json,
            r#"[{"denom":"bnb","amount":"10"},{"denom":"ukava","amount":"5"}]"#
        );
        assert_eq!(serde_json::from_str::<Coins>(&json).unwrap(), coins);

        assert!(serde_json::from_str::<Coins>(r#"[{"denom":"bnb","amount":"0"}]"#).is_err());
    }
}
