use {
    hard_lending::{Bank, BankError},
    hard_types::{Addr, Coins, StdResult},
    std::collections::BTreeMap,
};

/// Name the pool is reported under when it runs short of coins.
pub const POOL: &str = "hard";

/// An in-memory bank. Every transfer is all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockBank {
    balances: BTreeMap<Addr, Coins>,
    pool: Coins,
}

impl MockBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(mut self, account: &Addr, coins: Coins) -> Self {
        self.set_balance(account, coins);
        self
    }

    pub fn set_balance(&mut self, account: &Addr, coins: Coins) {
        if coins.is_empty() {
            self.balances.remove(account);
        } else {
            self.balances.insert(account.clone(), coins);
        }
    }

    /// Mint coins straight into the pool, e.g. to simulate interest paid in
    /// by a source outside the ledger.
    pub fn fund_pool(&mut self, coins: Coins) -> StdResult<()> {
        self.pool.insert_many(coins)
    }

    /// Sum of every account's balance and the pool, per denom.
    pub fn total_supply(&self) -> StdResult<Coins> {
        let mut total = self.pool.clone();
        for coins in self.balances.values() {
            total.insert_many(coins.clone())?;
        }
        Ok(total)
    }
}

impl Bank for MockBank {
    fn spendable_balances(&self, account: &Addr) -> Coins {
        self.balances.get(account).cloned().unwrap_or_default()
    }

    fn pool_balances(&self) -> Coins {
        self.pool.clone()
    }

    fn send_to_pool(&mut self, from: &Addr, coins: &Coins) -> Result<(), BankError> {
        let mut balance = self.spendable_balances(from);
        ensure_covers(from, &balance, coins)?;

        let mut pool = self.pool.clone();
        balance.deduct_many(coins.clone())?;
        pool.insert_many(coins.clone())?;

        self.set_balance(from, balance);
        self.pool = pool;

        Ok(())
    }

    fn send_from_pool(&mut self, to: &Addr, coins: &Coins) -> Result<(), BankError> {
        let pool_addr = Addr::try_from(POOL)?;
        ensure_covers(&pool_addr, &self.pool, coins)?;

        let mut pool = self.pool.clone();
        let mut balance = self.spendable_balances(to);
        pool.deduct_many(coins.clone())?;
        balance.insert_many(coins.clone())?;

        self.pool = pool;
        self.set_balance(to, balance);

        Ok(())
    }
}

fn ensure_covers(account: &Addr, available: &Coins, required: &Coins) -> Result<(), BankError> {
    for coin in required {
        let have = available.amount_of(coin.denom);
        if have < *coin.amount {
            return Err(BankError::InsufficientFunds {
                account: account.clone(),
                denom: coin.denom.clone(),
                available: have,
                required: *coin.amount,
            });
        }
    }

    Ok(())
}

// ----------------------------------- tests -----------------------------------
