use {
    borsh::{BorshDeserialize, BorshSerialize},
    hard_math::Udec256,
    hard_types::{Addr, Coins, Denom},
    serde::{Deserialize, Serialize},
    std::{collections::BTreeMap, fmt},
};

/// The two sides of the ledger. Each has its own interest factors and its own
/// position records.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Supply,
    Borrow,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Supply => f.write_str("supply"),
            Side::Borrow => f.write_str("borrow"),
        }
    }
}

/// An account's balances on one side of the ledger, together with the
/// interest factor each balance was last synced at.
///
/// The keys of `index` always equal the denoms of `amount`.
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub owner: Addr,
    pub amount: Coins,
    pub index: BTreeMap<Denom, Udec256>,
}

/// Coins an account has supplied to the pool.
pub type Deposit = Position;

/// Coins an account owes to the pool.
pub type Borrow = Position;

impl Position {
    pub fn new(owner: Addr) -> Self {
        Self {
            owner,
            amount: Coins::new(),
            index: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_empty()
    }

    /// Drop snapshots of denoms no longer held, restoring the invariant that
    /// the index and the balances cover the same denoms.
    pub fn prune_index(&mut self) {
        let amount = &self.amount;
        self.index.retain(|denom, _| amount.has(denom));
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, hard_types::Coin, std::str::FromStr};

    #[test]
    fn prune_index_drops_stale_denoms() {
        let mut position = Position::new(Addr::from_str("alice").unwrap());
        position.amount.insert(Coin::new("bnb", 10).unwrap()).unwrap();
        position.index.insert(Denom::from_str("bnb").unwrap(), Udec256::ONE);
        position.index.insert(Denom::from_str("ukava").unwrap(), Udec256::ONE);

        position.prune_index();

        assert_eq!(position.index.len(), 1);
        assert!(position.index.contains_key(&Denom::from_str("bnb").unwrap()));
    }

    #[test]
    fn serializes_to_json() {
        let mut position = Position::new(Addr::from_str("alice").unwrap());
        position.amount.insert(Coin::new("bnb", 10).unwrap()).unwrap();
        position.index.insert(Denom::from_str("bnb").unwrap(), Udec256::ONE);

        assert_eq!(
            serde_json::to_string(&position).unwrap(),
            r#"{"owner":"alice","amount":[{"denom":"bnb","amount":"10"}],"index":{"bnb":"1"}}"#
        );
    }
}
