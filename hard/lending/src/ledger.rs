use {
    crate::{
        execute, query, Bank, Borrow, Deposit, LendingResult, Oracle, Params, Position, Side,
    },
    hard_math::{Int256, Udec256},
    hard_types::{Addr, Buffer, Coins, Denom, StdResult, Storage},
    std::collections::BTreeMap,
};

/// The lending ledger, owning its storage.
///
/// Every mutating operation runs against a write buffer layered over the
/// storage. The buffer is committed only if the whole operation succeeds,
/// including the final bank transfer; otherwise it is dropped and the storage
/// is left exactly as it was.
pub struct Ledger<S> {
    storage: S,
}

impl<S> Ledger<S> {
    /// Wrap a storage that already holds ledger state.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S> Ledger<S>
where
    S: Storage,
{
    /// Set up a fresh ledger with the given params.
    pub fn instantiate(storage: S, params: &Params) -> LendingResult<Self> {
        let mut ledger = Self::new(storage);
        ledger.transact("instantiate", |storage| execute::instantiate(storage, params))?;
        Ok(ledger)
    }

    fn transact<F, T>(&mut self, operation: &'static str, action: F) -> LendingResult<T>
    where
        F: FnOnce(&mut dyn Storage) -> LendingResult<T>,
    {
        let mut buffer = Buffer::new(&mut self.storage);

        match action(&mut buffer) {
            Ok(output) => {
                buffer.commit();
                Ok(output)
            },
            Err(err) => {
                tracing::warn!(
                    operation,
                    kind = ?err.kind(),
                    err = err.to_string(),
                    "Operation aborted"
                );
                Err(err)
            },
        }
    }

    // --------------------------------- execute ---------------------------------

    pub fn set_params(&mut self, params: &Params) -> LendingResult<()> {
        self.transact("set_params", |storage| execute::set_params(storage, params))
    }

    pub fn deposit(
        &mut self,
        bank: &mut dyn Bank,
        oracle: &dyn Oracle,
        depositor: &Addr,
        coins: &Coins,
    ) -> LendingResult<()> {
        self.transact("deposit", |storage| {
            execute::deposit(storage, bank, oracle, depositor, coins)
        })
    }

    pub fn withdraw(
        &mut self,
        bank: &mut dyn Bank,
        oracle: &dyn Oracle,
        depositor: &Addr,
        coins: &Coins,
    ) -> LendingResult<()> {
        self.transact("withdraw", |storage| {
            execute::withdraw(storage, bank, oracle, depositor, coins)
        })
    }

    pub fn borrow(
        &mut self,
        bank: &mut dyn Bank,
        oracle: &dyn Oracle,
        borrower: &Addr,
        coins: &Coins,
    ) -> LendingResult<()> {
        self.transact("borrow", |storage| {
            execute::borrow(storage, bank, oracle, borrower, coins)
        })
    }

    pub fn repay(
        &mut self,
        bank: &mut dyn Bank,
        oracle: &dyn Oracle,
        payer: &Addr,
        borrower: &Addr,
        coins: &Coins,
    ) -> LendingResult<()> {
        self.transact("repay", |storage| {
            execute::repay(storage, bank, oracle, payer, borrower, coins)
        })
    }

    pub fn sync_supply_interest(
        &mut self,
        oracle: &dyn Oracle,
        account: &Addr,
    ) -> LendingResult<()> {
        self.transact("sync_supply_interest", |storage| {
            execute::sync_supply_interest(storage, oracle, account)
        })
    }

    pub fn sync_borrow_interest(
        &mut self,
        oracle: &dyn Oracle,
        account: &Addr,
    ) -> LendingResult<()> {
        self.transact("sync_borrow_interest", |storage| {
            execute::sync_borrow_interest(storage, oracle, account)
        })
    }

    pub fn set_supply_interest_factor(
        &mut self,
        denom: &Denom,
        factor: Udec256,
    ) -> LendingResult<()> {
        self.transact("set_supply_interest_factor", |storage| {
            execute::set_supply_interest_factor(storage, denom, factor)
        })
    }

    pub fn set_borrow_interest_factor(
        &mut self,
        denom: &Denom,
        factor: Udec256,
    ) -> LendingResult<()> {
        self.transact("set_borrow_interest_factor", |storage| {
            execute::set_borrow_interest_factor(storage, denom, factor)
        })
    }

    // ---------------------------------- query ----------------------------------

    pub fn params(&self) -> StdResult<Params> {
        query::query_params(&self.storage)
    }

    pub fn deposit_of(&self, depositor: &Addr) -> StdResult<Option<Deposit>> {
        query::query_deposit(&self.storage, depositor)
    }

    pub fn borrow_of(&self, borrower: &Addr) -> StdResult<Option<Borrow>> {
        query::query_borrow(&self.storage, borrower)
    }

    pub fn synced_deposit_of(&self, depositor: &Addr) -> LendingResult<Option<Position>> {
        query::query_synced_position(&self.storage, Side::Supply, depositor)
    }

    pub fn synced_borrow_of(&self, borrower: &Addr) -> LendingResult<Option<Position>> {
        query::query_synced_position(&self.storage, Side::Borrow, borrower)
    }

    pub fn deposits(
        &self,
        start_after: Option<&Addr>,
        limit: Option<u32>,
    ) -> StdResult<BTreeMap<Addr, Deposit>> {
        query::query_deposits(&self.storage, start_after, limit)
    }

    pub fn borrows(
        &self,
        start_after: Option<&Addr>,
        limit: Option<u32>,
    ) -> StdResult<BTreeMap<Addr, Borrow>> {
        query::query_borrows(&self.storage, start_after, limit)
    }

    pub fn supply_interest_factor(&self, denom: &Denom) -> StdResult<Option<Udec256>> {
        query::query_interest_factor(&self.storage, Side::Supply, denom)
    }

    pub fn borrow_interest_factor(&self, denom: &Denom) -> StdResult<Option<Udec256>> {
        query::query_interest_factor(&self.storage, Side::Borrow, denom)
    }

    pub fn supply_interest_factors(&self) -> StdResult<BTreeMap<Denom, Udec256>> {
        query::query_supply_interest_factors(&self.storage)
    }

    pub fn borrow_interest_factors(&self) -> StdResult<BTreeMap<Denom, Udec256>> {
        query::query_borrow_interest_factors(&self.storage)
    }

    pub fn total_deposited(&self, bank: &dyn Bank, denom: &Denom) -> Int256 {
        query::query_total_deposited(bank, denom)
    }

    pub fn total_borrowed(&self) -> StdResult<Coins> {
        query::query_total_borrowed(&self.storage)
    }

    pub fn risky_accounts(&self, limit: Option<u32>) -> StdResult<Vec<(Udec256, Addr)>> {
        query::query_risky_accounts(&self.storage, limit)
    }

    pub fn liquidation_candidates(
        &self,
        oracle: &dyn Oracle,
        limit: Option<u32>,
    ) -> LendingResult<Vec<Addr>> {
        query::query_liquidation_candidates(&self.storage, oracle, limit)
    }

    pub fn ltv_of(&self, oracle: &dyn Oracle, account: &Addr) -> LendingResult<Option<Udec256>> {
        query::query_ltv(&self.storage, oracle, account)
    }
}
