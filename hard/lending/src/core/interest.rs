use {
    crate::{interest_factors, positions, LendingResult, Position, Side, TOTAL_BORROWED},
    hard_math::{IsZero, Udec256},
    hard_types::{Addr, Coin, Coins, Denom, StdResult, Storage},
};

/// Load the global interest factor of a denom, initializing it to 1.0 if this
/// is the first time the denom is used on the given side.
pub fn init_interest_factor(
    storage: &mut dyn Storage,
    side: Side,
    denom: &Denom,
) -> StdResult<Udec256> {
    let factors = interest_factors(side);

    if let Some(factor) = factors.may_load(storage, denom)? {
        return Ok(factor);
    }

    factors.save(storage, denom, &Udec256::ONE)?;

    tracing::debug!(
        side = side.to_string(),
        denom = denom.to_string(),
        "Initialized interest factor"
    );

    Ok(Udec256::ONE)
}

/// Bring a position up to date with the current global interest factors.
///
/// For every denom held, the balance grows by the same ratio the global factor
/// grew by since the position's snapshot, rounded down. Denoms without a
/// snapshot get one and accrue nothing. Returns the interest accrued.
pub fn accrue_interest(
    storage: &dyn Storage,
    side: Side,
    position: &mut Position,
) -> LendingResult<Coins> {
    let factors = interest_factors(side);
    let mut accrued = Coins::new();

    for denom in position.amount.denoms().cloned().collect::<Vec<_>>() {
        let Some(current) = factors.may_load(storage, &denom)? else {
            continue;
        };

        let Some(snapshot) = position.index.insert(denom.clone(), current) else {
            continue;
        };

        let amount = position.amount.amount_of(&denom);
        let interest = amount
            .checked_mul_dec_ratio_floor(current, snapshot)?
            .checked_sub(amount)?;

        if interest.is_non_zero() {
            accrued.insert(Coin {
                denom,
                amount: interest,
            })?;
        }
    }

    position.amount.insert_many(accrued.clone())?;

    Ok(accrued)
}

/// Sync the position an account holds on the given side and persist it.
///
/// Interest accrued on borrows is added to the aggregate borrowed amount.
/// Returns the synced position, or `None` if the account has none.
pub fn sync_interest(
    storage: &mut dyn Storage,
    side: Side,
    account: &Addr,
) -> LendingResult<Option<Position>> {
    let store = positions(side);

    let Some(mut position) = store.may_load(storage, account)? else {
        return Ok(None);
    };

    let accrued = accrue_interest(storage, side, &mut position)?;

    store.save(storage, account, &position)?;

    if !accrued.is_empty() {
        if side == Side::Borrow {
            let mut total = TOTAL_BORROWED.may_load(storage)?.unwrap_or_default();
            total.insert_many(accrued.clone())?;
            TOTAL_BORROWED.save(storage, &total)?;
        }

        tracing::debug!(
            side = side.to_string(),
            account = account.to_string(),
            accrued = accrued.to_string(),
            "Accrued interest"
        );
    }

    Ok(Some(position))
}

// ----------------------------------- tests -----------------------------------
