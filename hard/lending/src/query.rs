use {
    crate::{
        core, interest_factors, positions, Bank, Borrow, Deposit, LendingResult, Oracle, Params,
        Position, Side, BORROWS, BORROW_INTEREST_FACTORS, DEPOSITS, PARAMS, SUPPLY_INTEREST_FACTORS,
        TOTAL_BORROWED,
    },
    hard_math::{Int256, Udec256},
    hard_storage::Bound,
    hard_types::{Addr, Coins, Denom, Order, StdResult, Storage},
    std::collections::BTreeMap,
};

const DEFAULT_PAGE_LIMIT: u32 = 30;

pub fn query_params(storage: &dyn Storage) -> StdResult<Params> {
    PARAMS.load(storage)
}

pub fn query_deposit(storage: &dyn Storage, depositor: &Addr) -> StdResult<Option<Deposit>> {
    DEPOSITS.may_load(storage, depositor)
}

pub fn query_borrow(storage: &dyn Storage, borrower: &Addr) -> StdResult<Option<Borrow>> {
    BORROWS.may_load(storage, borrower)
}

/// The account's position with interest accrued up to the current factors,
/// without writing anything.
pub fn query_synced_position(
    storage: &dyn Storage,
    side: Side,
    account: &Addr,
) -> LendingResult<Option<Position>> {
    let Some(mut position) = positions(side).may_load(storage, account)? else {
        return Ok(None);
    };

    core::accrue_interest(storage, side, &mut position)?;

    Ok(Some(position))
}

pub fn query_deposits(
    storage: &dyn Storage,
    start_after: Option<&Addr>,
    limit: Option<u32>,
) -> StdResult<BTreeMap<Addr, Deposit>> {
    let start = start_after.map(Bound::Exclusive);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

    DEPOSITS
        .range(storage, start, None, Order::Ascending)
        .take(limit as usize)
        .collect()
}

pub fn query_borrows(
    storage: &dyn Storage,
    start_after: Option<&Addr>,
    limit: Option<u32>,
) -> StdResult<BTreeMap<Addr, Borrow>> {
    let start = start_after.map(Bound::Exclusive);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

    BORROWS
        .range(storage, start, None, Order::Ascending)
        .take(limit as usize)
        .collect()
}

pub fn query_interest_factor(
    storage: &dyn Storage,
    side: Side,
    denom: &Denom,
) -> StdResult<Option<Udec256>> {
    interest_factors(side).may_load(storage, denom)
}

pub fn query_supply_interest_factors(storage: &dyn Storage) -> StdResult<BTreeMap<Denom, Udec256>> {
    SUPPLY_INTEREST_FACTORS
        .range(storage, None, None, Order::Ascending)
        .collect()
}

pub fn query_borrow_interest_factors(storage: &dyn Storage) -> StdResult<BTreeMap<Denom, Udec256>> {
    BORROW_INTEREST_FACTORS
        .range(storage, None, None, Order::Ascending)
        .collect()
}

/// Total amount of a denom held by the pool. Deposits net of outstanding
/// borrows, plus repaid interest.
pub fn query_total_deposited(bank: &dyn Bank, denom: &Denom) -> Int256 {
    bank.pool_balances().amount_of(denom)
}

pub fn query_total_borrowed(storage: &dyn Storage) -> StdResult<Coins> {
    Ok(TOTAL_BORROWED.may_load(storage)?.unwrap_or_default())
}

/// The riskiest accounts by loan-to-value ratio. Without a limit, the
/// configured `check_ltv_index_count` is used.
pub fn query_risky_accounts(
    storage: &dyn Storage,
    limit: Option<u32>,
) -> StdResult<Vec<(Udec256, Addr)>> {
    let limit = match limit {
        Some(limit) => limit,
        None => PARAMS.load(storage)?.check_ltv_index_count,
    };

    core::riskiest_accounts(storage, limit as usize)
}

/// Among the riskiest accounts, those whose positions, with interest accrued
/// up to the current factors, violate their loan-to-value limit.
pub fn query_liquidation_candidates(
    storage: &dyn Storage,
    oracle: &dyn Oracle,
    limit: Option<u32>,
) -> LendingResult<Vec<Addr>> {
    let params = PARAMS.load(storage)?;
    let limit = limit.unwrap_or(params.check_ltv_index_count);

    let mut candidates = Vec::new();

    for (_, account) in core::riskiest_accounts(storage, limit as usize)? {
        let Some((deposit, borrow)) = synced_positions(storage, &account)? else {
            continue;
        };

        if !core::is_within_ltv(&deposit.amount, &borrow.amount, &params, oracle)? {
            candidates.push(account);
        }
    }

    Ok(candidates)
}

/// The account's loan-to-value ratio with interest accrued up to the current
/// factors, or `None` unless it holds both a deposit and a borrow.
pub fn query_ltv(
    storage: &dyn Storage,
    oracle: &dyn Oracle,
    account: &Addr,
) -> LendingResult<Option<Udec256>> {
    let params = PARAMS.load(storage)?;

    let Some((deposit, borrow)) = synced_positions(storage, account)? else {
        return Ok(None);
    };

    core::ltv(&deposit.amount, &borrow.amount, &params, oracle).map(Some)
}

fn synced_positions(
    storage: &dyn Storage,
    account: &Addr,
) -> LendingResult<Option<(Deposit, Borrow)>> {
    let deposit = query_synced_position(storage, Side::Supply, account)?;
    let borrow = query_synced_position(storage, Side::Borrow, account)?;

    Ok(deposit.zip(borrow))
}
