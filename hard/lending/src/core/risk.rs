use {
    crate::{core, LendingResult, Oracle, Params, BORROWS, DEPOSITS, LTV_BY_ACCOUNT, LTV_INDEX},
    hard_math::Udec256,
    hard_types::{Addr, Order, StdResult, Storage},
};

/// The loan-to-value ratio the account is currently filed under in the risk
/// index, or `None` if it isn't filed.
///
/// Must be captured before an operation mutates the account, so that the
/// stale entry can be found and replaced afterwards.
pub fn current_standing(storage: &dyn Storage, account: &Addr) -> StdResult<Option<Udec256>> {
    LTV_BY_ACCOUNT.may_load(storage, account)
}

/// Re-file an account in the risk index after its positions changed.
///
/// The entry under `prior` is dropped. A new one is filed only if the account
/// holds both a deposit and a borrow.
pub fn update_risk_index(
    storage: &mut dyn Storage,
    params: &Params,
    oracle: &dyn Oracle,
    account: &Addr,
    prior: Option<Udec256>,
) -> LendingResult<()> {
    if let Some(prior) = prior {
        LTV_INDEX.remove(storage, (prior, account));
    }

    let deposit = DEPOSITS.may_load(storage, account)?;
    let borrow = BORROWS.may_load(storage, account)?;

    let (Some(deposit), Some(borrow)) = (deposit, borrow) else {
        LTV_BY_ACCOUNT.remove(storage, account);
        return Ok(());
    };

    let ltv = core::ltv(&deposit.amount, &borrow.amount, params, oracle)?;

    LTV_INDEX.insert(storage, (ltv, account))?;
    LTV_BY_ACCOUNT.save(storage, account, &ltv)?;

    Ok(())
}

/// The `limit` accounts with the highest loan-to-value ratios, riskiest first.
pub fn riskiest_accounts(storage: &dyn Storage, limit: usize) -> StdResult<Vec<(Udec256, Addr)>> {
    LTV_INDEX
        .range(storage, None, None, Order::Descending)
        .take(limit)
        .collect()
}

// ----------------------------------- tests -----------------------------------
