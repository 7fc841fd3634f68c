use {
    crate::{LendingError, LendingResult},
    hard_types::{Coin, Coins},
};

/// The amount actually collected for a repayment: each requested denom capped
/// at what is owed.
///
/// Errors if a requested denom isn't owed at all.
pub fn calculate_payment_amount(owed: &Coins, requested: &Coins) -> LendingResult<Coins> {
    let mut payment = Coins::new();

    for coin in requested {
        let owed_amount = owed.amount_of(coin.denom);

        if !owed_amount.is_positive() {
            return Err(LendingError::ExceedsOwedAmount {
                denom: coin.denom.clone(),
                owed: owed_amount,
            });
        }

        payment.insert(Coin {
            denom: coin.denom.clone(),
            amount: (*coin.amount).min(owed_amount),
        })?;
    }

    Ok(payment)
}

// ----------------------------------- tests -----------------------------------
