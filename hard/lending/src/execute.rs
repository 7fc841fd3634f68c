use {
    crate::{
        core, interest_factors, Bank, LendingError, LendingResult, Oracle, Params, Position,
        Side, BORROWS, DEPOSITS, PARAMS, TOTAL_BORROWED,
    },
    hard_math::{Int256, Udec256},
    hard_types::{Addr, Coins, Denom, StdError, Storage},
};

pub fn instantiate(storage: &mut dyn Storage, params: &Params) -> LendingResult<()> {
    set_params(storage, params)
}

pub fn set_params(storage: &mut dyn Storage, params: &Params) -> LendingResult<()> {
    params.validate()?;

    PARAMS.save(storage, params)?;

    tracing::info!(
        money_markets = params.money_markets.len(),
        check_ltv_index_count = params.check_ltv_index_count,
        "Updated params"
    );

    Ok(())
}

pub fn deposit(
    storage: &mut dyn Storage,
    bank: &mut dyn Bank,
    oracle: &dyn Oracle,
    depositor: &Addr,
    coins: &Coins,
) -> LendingResult<()> {
    let params = PARAMS.load(storage)?;

    ensure_non_empty(coins)?;

    for denom in coins.denoms() {
        if params.money_market(denom).is_none() {
            return Err(LendingError::InvalidDepositDenom {
                denom: denom.clone(),
            });
        }

        core::init_interest_factor(storage, Side::Supply, denom)?;
    }

    let prior = core::current_standing(storage, depositor)?;

    let deposit = core::sync_interest(storage, Side::Supply, depositor)?;
    core::sync_interest(storage, Side::Borrow, depositor)?;

    let spendable = bank.spendable_balances(depositor);
    if let Some(err) = LendingError::insufficient_funds(depositor, &spendable, coins) {
        return Err(err);
    }

    let mut deposit = deposit.unwrap_or_else(|| Position::new(depositor.clone()));
    merge_into(storage, Side::Supply, &mut deposit, coins)?;

    DEPOSITS.save(storage, depositor, &deposit)?;

    core::update_risk_index(storage, &params, oracle, depositor, prior)?;

    bank.send_to_pool(depositor, coins)?;

    tracing::info!(
        depositor = depositor.to_string(),
        coins = coins.to_string(),
        "Deposited coins"
    );

    Ok(())
}

pub fn withdraw(
    storage: &mut dyn Storage,
    bank: &mut dyn Bank,
    oracle: &dyn Oracle,
    depositor: &Addr,
    coins: &Coins,
) -> LendingResult<()> {
    let params = PARAMS.load(storage)?;

    ensure_non_empty(coins)?;

    let prior = core::current_standing(storage, depositor)?;

    let Some(mut deposit) = core::sync_interest(storage, Side::Supply, depositor)? else {
        return Err(LendingError::NoDeposit {
            account: depositor.clone(),
        });
    };
    let borrow = core::sync_interest(storage, Side::Borrow, depositor)?;

    for coin in coins {
        let deposited = deposit.amount.amount_of(coin.denom);
        if deposited < *coin.amount {
            return Err(LendingError::InsufficientBalance {
                denom: coin.denom.clone(),
                requested: *coin.amount,
                deposited,
            });
        }
    }

    deposit.amount.deduct_many(coins.clone())?;
    deposit.prune_index();

    let borrowed = borrow.map(|borrow| borrow.amount).unwrap_or_default();
    core::check_ltv(&deposit.amount, &borrowed, &params, oracle)?;

    ensure_pool_covers(&*bank, coins)?;

    if deposit.is_empty() {
        DEPOSITS.remove(storage, depositor);
    } else {
        DEPOSITS.save(storage, depositor, &deposit)?;
    }

    core::update_risk_index(storage, &params, oracle, depositor, prior)?;

    bank.send_from_pool(depositor, coins)?;

    tracing::info!(
        depositor = depositor.to_string(),
        coins = coins.to_string(),
        "Withdrew coins"
    );

    Ok(())
}

pub fn borrow(
    storage: &mut dyn Storage,
    bank: &mut dyn Bank,
    oracle: &dyn Oracle,
    borrower: &Addr,
    coins: &Coins,
) -> LendingResult<()> {
    let params = PARAMS.load(storage)?;

    ensure_non_empty(coins)?;

    for denom in coins.denoms() {
        if params.money_market(denom).is_none() {
            return Err(LendingError::InvalidBorrowDenom {
                denom: denom.clone(),
            });
        }

        core::init_interest_factor(storage, Side::Borrow, denom)?;
    }

    let prior = core::current_standing(storage, borrower)?;

    let deposit = core::sync_interest(storage, Side::Supply, borrower)?;
    let borrow = core::sync_interest(storage, Side::Borrow, borrower)?;

    // Checked after syncing, so the aggregate includes interest accrued up to
    // this point.
    let mut total_borrowed = TOTAL_BORROWED.may_load(storage)?.unwrap_or_default();
    for coin in coins {
        ensure_within_borrow_cap(&params, &total_borrowed, coin.denom, *coin.amount)?;
    }

    let mut borrow = borrow.unwrap_or_else(|| Position::new(borrower.clone()));
    merge_into(storage, Side::Borrow, &mut borrow, coins)?;

    let deposited = deposit.map(|deposit| deposit.amount).unwrap_or_default();
    core::check_ltv(&deposited, &borrow.amount, &params, oracle)?;

    ensure_pool_covers(&*bank, coins)?;

    BORROWS.save(storage, borrower, &borrow)?;

    total_borrowed.insert_many(coins.clone())?;
    TOTAL_BORROWED.save(storage, &total_borrowed)?;

    core::update_risk_index(storage, &params, oracle, borrower, prior)?;

    bank.send_from_pool(borrower, coins)?;

    tracing::info!(
        borrower = borrower.to_string(),
        coins = coins.to_string(),
        "Borrowed coins"
    );

    Ok(())
}

/// Repay the borrower's debt from the payer's balance. Each denom is capped at
/// the amount owed; the excess stays with the payer.
pub fn repay(
    storage: &mut dyn Storage,
    bank: &mut dyn Bank,
    oracle: &dyn Oracle,
    payer: &Addr,
    borrower: &Addr,
    coins: &Coins,
) -> LendingResult<()> {
    let params = PARAMS.load(storage)?;

    ensure_non_empty(coins)?;

    let prior = core::current_standing(storage, borrower)?;

    core::sync_interest(storage, Side::Supply, borrower)?;
    let Some(mut borrow) = core::sync_interest(storage, Side::Borrow, borrower)? else {
        return Err(LendingError::NoBorrow {
            account: borrower.clone(),
        });
    };

    let payment = core::calculate_payment_amount(&borrow.amount, coins)?;

    let spendable = bank.spendable_balances(payer);
    if let Some(err) = LendingError::insufficient_funds(payer, &spendable, &payment) {
        return Err(err);
    }

    borrow.amount.deduct_many(payment.clone())?;
    borrow.prune_index();

    if borrow.is_empty() {
        BORROWS.remove(storage, borrower);
    } else {
        BORROWS.save(storage, borrower, &borrow)?;
    }

    // The aggregate is rounded independently of each account, so it may fall
    // short of a full repayment by dust.
    let mut total_borrowed = TOTAL_BORROWED.may_load(storage)?.unwrap_or_default();
    for coin in payment.clone() {
        total_borrowed.saturating_deduct(coin)?;
    }
    TOTAL_BORROWED.save(storage, &total_borrowed)?;

    core::update_risk_index(storage, &params, oracle, borrower, prior)?;

    bank.send_to_pool(payer, &payment)?;

    tracing::info!(
        payer = payer.to_string(),
        borrower = borrower.to_string(),
        repaid = payment.to_string(),
        "Repaid coins"
    );

    Ok(())
}

pub fn sync_supply_interest(
    storage: &mut dyn Storage,
    oracle: &dyn Oracle,
    account: &Addr,
) -> LendingResult<()> {
    sync_and_reindex(storage, oracle, Side::Supply, account)
}

pub fn sync_borrow_interest(
    storage: &mut dyn Storage,
    oracle: &dyn Oracle,
    account: &Addr,
) -> LendingResult<()> {
    sync_and_reindex(storage, oracle, Side::Borrow, account)
}

/// Advance the global supply interest factor of a denom. Factors never
/// decrease.
pub fn set_supply_interest_factor(
    storage: &mut dyn Storage,
    denom: &Denom,
    factor: Udec256,
) -> LendingResult<()> {
    set_interest_factor(storage, Side::Supply, denom, factor)
}

/// Advance the global borrow interest factor of a denom. Factors never
/// decrease.
pub fn set_borrow_interest_factor(
    storage: &mut dyn Storage,
    denom: &Denom,
    factor: Udec256,
) -> LendingResult<()> {
    set_interest_factor(storage, Side::Borrow, denom, factor)
}

fn sync_and_reindex(
    storage: &mut dyn Storage,
    oracle: &dyn Oracle,
    side: Side,
    account: &Addr,
) -> LendingResult<()> {
    let params = PARAMS.load(storage)?;
    let prior = core::current_standing(storage, account)?;

    if core::sync_interest(storage, side, account)?.is_none() {
        return Ok(());
    }

    core::update_risk_index(storage, &params, oracle, account, prior)
}

fn set_interest_factor(
    storage: &mut dyn Storage,
    side: Side,
    denom: &Denom,
    factor: Udec256,
) -> LendingResult<()> {
    let params = PARAMS.load(storage)?;

    if params.money_market(denom).is_none() {
        return Err(LendingError::MarketNotFound {
            denom: denom.clone(),
        });
    }

    let factors = interest_factors(side);

    // A factor that was never set is implicitly 1.0.
    let current = factors.may_load(storage, denom)?.unwrap_or(Udec256::ONE);

    if factor < current {
        return Err(LendingError::InterestFactorDecreased {
            denom: denom.clone(),
            current: current.to_string(),
            proposed: factor.to_string(),
        });
    }

    factors.save(storage, denom, &factor)?;

    tracing::info!(
        side = side.to_string(),
        denom = denom.to_string(),
        factor = factor.to_string(),
        "Set interest factor"
    );

    Ok(())
}

/// Add coins to a synced position. Denoms new to the position are snapshotted
/// at the current global factor; existing snapshots are kept.
fn merge_into(
    storage: &dyn Storage,
    side: Side,
    position: &mut Position,
    coins: &Coins,
) -> LendingResult<()> {
    let factors = interest_factors(side);

    for denom in coins.denoms() {
        if !position.index.contains_key(denom) {
            let factor = factors.load(storage, denom)?;
            position.index.insert(denom.clone(), factor);
        }
    }

    position.amount.insert_many(coins.clone())?;

    Ok(())
}

fn ensure_non_empty(coins: &Coins) -> LendingResult<()> {
    if coins.is_empty() {
        return Err(StdError::invalid_coins("coins must not be empty").into());
    }

    Ok(())
}

fn ensure_within_borrow_cap(
    params: &Params,
    total_borrowed: &Coins,
    denom: &Denom,
    amount: Int256,
) -> LendingResult<()> {
    let Some(money_market) = params.money_market(denom) else {
        return Err(LendingError::InvalidBorrowDenom {
            denom: denom.clone(),
        });
    };

    let limit = &money_market.borrow_limit;

    if !limit.has_max_limit {
        return Ok(());
    }

    let proposed = total_borrowed.amount_of(denom).checked_add(amount)?;

    if proposed > limit.maximum_limit {
        return Err(LendingError::BorrowCapExceeded {
            denom: denom.clone(),
            requested: amount,
            proposed,
            limit: limit.maximum_limit,
        });
    }

    Ok(())
}

fn ensure_pool_covers(bank: &dyn Bank, coins: &Coins) -> LendingResult<()> {
    let pool = bank.pool_balances();

    for coin in coins {
        let available = pool.amount_of(coin.denom);
        if available < *coin.amount {
            return Err(LendingError::InsufficientPoolBalance {
                denom: coin.denom.clone(),
                requested: *coin.amount,
                available,
            });
        }
    }

    Ok(())
}
