use {
    crate::TestSuite,
    hard_math::Int256,
    hard_types::{Addr, Denom},
    std::{
        cmp::Ordering,
        collections::{BTreeMap, BTreeSet},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceChange {
    Increased(i128),
    Decreased(i128),
    Unchanged,
}

pub struct BalanceTracker<'a> {
    pub(crate) suite: &'a mut TestSuite,
}

impl BalanceTracker<'_> {
    /// Record the current balance of a list of accounts.
    pub fn record_many<'a, I>(&mut self, accounts: I)
    where
        I: IntoIterator<Item = &'a Addr>,
    {
        let new_balances = accounts
            .into_iter()
            .map(|addr| (addr.clone(), self.suite.query_balances(addr)))
            .collect::<BTreeMap<_, _>>();

        self.suite.balances.extend(new_balances);
    }

    /// Record the current balance of a single account.
    pub fn record(&mut self, account: &Addr) {
        let coins = self.suite.query_balances(account);
        self.suite.balances.insert(account.clone(), coins);
    }

    /// Clear all recorded balances.
    pub fn clear(&mut self) {
        self.suite.balances.clear();
    }

    /// Get the changes in balances of an account since the last recorded balances.
    pub fn changes(&self, account: &Addr) -> BTreeMap<Denom, BalanceChange> {
        let old_balances = self.suite.balances.get(account).unwrap();
        let new_balances = self.suite.query_balances(account);

        old_balances
            .denoms()
            .chain(new_balances.denoms())
            // Take denoms only once
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|denom| {
                let old_balance = old_balances.amount_of(denom);
                let new_balance = new_balances.amount_of(denom);
                let change = match new_balance.cmp(&old_balance) {
                    Ordering::Greater => {
                        BalanceChange::Increased(to_i128(new_balance - old_balance))
                    },
                    Ordering::Less => BalanceChange::Decreased(to_i128(old_balance - new_balance)),
                    Ordering::Equal => BalanceChange::Unchanged,
                };

                (denom.clone(), change)
            })
            .collect()
    }

    /// Assert a list of balance changes for an account. Denoms not listed are
    /// not checked; a listed denom the account never held counts as unchanged.
    pub fn should_change(&self, account: &Addr, changes: BTreeMap<Denom, BalanceChange>) {
        let delta = self.changes(account);

        for (denom, change) in changes {
            let diff = delta.get(&denom).copied().unwrap_or(BalanceChange::Unchanged);
            if change != diff {
                panic!(
                    "incorrect balance! account: {account}, denom: {denom}, expected: {change:?}, actual: {diff:?}"
                );
            }
        }
    }
}

fn to_i128(amount: Int256) -> i128 {
    amount.to_string().parse().unwrap()
}
