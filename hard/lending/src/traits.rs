use {
    hard_math::{Int256, Udec256},
    hard_types::{Addr, Coins, Denom, StdError},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BankError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(
        "insufficient funds: account {account} has {available}{denom} spendable, but {required}{denom} is required"
    )]
    InsufficientFunds {
        account: Addr,
        denom: Denom,
        available: Int256,
        required: Int256,
    },
}

/// The token ledger the lending pool escrows coins with.
///
/// Coins move between user accounts and a single pool owned by the lending
/// module. A transfer either moves every coin in the set or none of them.
pub trait Bank {
    /// Coins the account can currently transfer out.
    fn spendable_balances(&self, account: &Addr) -> Coins;

    /// Coins currently held by the lending pool.
    fn pool_balances(&self) -> Coins;

    fn send_to_pool(&mut self, from: &Addr, coins: &Coins) -> Result<(), BankError>;

    fn send_from_pool(&mut self, to: &Addr, coins: &Coins) -> Result<(), BankError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("no price available for market `{market_id}`")]
    PriceUnavailable { market_id: String },
}

/// Source of spot prices, keyed by the market id configured for each money
/// market.
pub trait Oracle {
    fn price(&self, market_id: &str) -> Result<Udec256, OracleError>;
}
