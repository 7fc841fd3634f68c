use {
    crate::{BalanceTracker, MockBank, MockOracle},
    hard_lending::{
        Bank, BorrowLimit, InterestRateModel, LendingResult, Ledger, MoneyMarket, Params,
    },
    hard_math::{Int256, Udec256},
    hard_types::{Addr, Coins, Denom, MockStorage},
    std::{collections::BTreeMap, str::FromStr},
};

/// A money market with round numbers: one whole unit per smallest unit, no
/// borrow cap, priced by `<denom>:usd`.
pub fn mock_money_market(denom: &str, loan_to_value: Udec256) -> MoneyMarket {
    MoneyMarket {
        denom: Denom::from_str(denom).unwrap(),
        borrow_limit: BorrowLimit {
            has_max_limit: false,
            maximum_limit: Int256::ZERO,
            loan_to_value,
        },
        spot_market_id: format!("{denom}:usd"),
        conversion_factor: Int256::ONE,
        interest_rate_model: InterestRateModel {
            base_rate_apy: Udec256::new_percent(5),
            base_multiplier: Udec256::new_percent(10),
            kink: Udec256::new_percent(80),
            jump_multiplier: Udec256::new(5),
        },
        reserve_factor: Udec256::new_percent(5),
        auction_size: Int256::new(1_000_000),
        keeper_reward_percentage: Udec256::new_percent(2),
    }
}

/// bnb with a loan-to-value of 0.8 and ukava with 0.5.
pub fn mock_params() -> Params {
    Params {
        money_markets: vec![
            mock_money_market("bnb", Udec256::new_percent(80)),
            mock_money_market("ukava", Udec256::new_percent(50)),
        ],
        ..Default::default()
    }
}

/// bnb at 2.0 and ukava at 0.5.
pub fn mock_oracle() -> MockOracle {
    MockOracle::new()
        .with_price("bnb:usd", Udec256::new(2))
        .with_price("ukava:usd", Udec256::new_percent(50))
}

/// A ledger wired to an in-memory bank and oracle.
pub struct TestSuite {
    pub ledger: Ledger<MockStorage>,
    pub bank: MockBank,
    pub oracle: MockOracle,
    /// Balances recorded by the [`BalanceTracker`].
    pub(crate) balances: BTreeMap<Addr, Coins>,
}

impl TestSuite {
    pub fn new(params: &Params, bank: MockBank, oracle: MockOracle) -> Self {
        Self {
            ledger: Ledger::instantiate(MockStorage::new(), params).unwrap(),
            bank,
            oracle,
            balances: BTreeMap::new(),
        }
    }

    /// A suite with [`mock_params`], [`mock_oracle`], and the given starting
    /// balances.
    pub fn new_with_balances<I>(balances: I) -> Self
    where
        I: IntoIterator<Item = (Addr, Coins)>,
    {
        let bank = balances
            .into_iter()
            .fold(MockBank::new(), |bank, (account, coins)| {
                bank.with_balance(&account, coins)
            });

        Self::new(&mock_params(), bank, mock_oracle())
    }

    pub fn balance_tracker(&mut self) -> BalanceTracker<'_> {
        BalanceTracker { suite: self }
    }

    pub fn query_balances(&self, account: &Addr) -> Coins {
        self.bank.spendable_balances(account)
    }

    pub fn deposit(&mut self, depositor: &Addr, coins: Coins) -> LendingResult<()> {
        self.ledger
            .deposit(&mut self.bank, &self.oracle, depositor, &coins)
    }

    pub fn withdraw(&mut self, depositor: &Addr, coins: Coins) -> LendingResult<()> {
        self.ledger
            .withdraw(&mut self.bank, &self.oracle, depositor, &coins)
    }

    pub fn borrow(&mut self, borrower: &Addr, coins: Coins) -> LendingResult<()> {
        self.ledger
            .borrow(&mut self.bank, &self.oracle, borrower, &coins)
    }

    pub fn repay(&mut self, payer: &Addr, borrower: &Addr, coins: Coins) -> LendingResult<()> {
        self.ledger
            .repay(&mut self.bank, &self.oracle, payer, borrower, &coins)
    }

    pub fn sync_supply_interest(&mut self, account: &Addr) -> LendingResult<()> {
        self.ledger.sync_supply_interest(&self.oracle, account)
    }

    pub fn sync_borrow_interest(&mut self, account: &Addr) -> LendingResult<()> {
        self.ledger.sync_borrow_interest(&self.oracle, account)
    }

    /// Advance the global factors of a denom, as the periodic driver would.
    pub fn accrue(&mut self, denom: &str, supply: &str, borrow: &str) -> LendingResult<()> {
        let denom = Denom::from_str(denom)?;
        let supply = Udec256::from_str(supply)?;
        let borrow = Udec256::from_str(borrow)?;

        self.ledger.set_supply_interest_factor(&denom, supply)?;
        self.ledger.set_borrow_interest_factor(&denom, borrow)
    }

    pub fn total_deposited(&self, denom: &str) -> Int256 {
        self.ledger
            .total_deposited(&self.bank, &Denom::from_str(denom).unwrap())
    }
}
