use {
    crate::{LendingError, LendingResult, Oracle, Params},
    hard_math::{IsZero, Udec256},
    hard_types::Coins,
};

/// Value of a set of coins in the oracle's quote currency.
///
/// Each amount is converted from the denom's smallest unit into whole units
/// using the money market's conversion factor, then multiplied by its price.
pub fn value_of(coins: &Coins, params: &Params, oracle: &dyn Oracle) -> LendingResult<Udec256> {
    let mut value = Udec256::ZERO;

    for coin in coins {
        let money_market = params
            .money_market(coin.denom)
            .ok_or_else(|| LendingError::MarketNotFound {
                denom: coin.denom.clone(),
            })?;

        let price = oracle.price(&money_market.spot_market_id)?;
        let units = Udec256::checked_from_ratio(*coin.amount, money_market.conversion_factor)?;

        value = value.checked_add(units.checked_mul(price)?)?;
    }

    Ok(value)
}

/// The loan-to-value limit a set of deposits supports: the strictest limit
/// among the money markets of the deposited denoms. Zero if nothing is
/// deposited.
pub fn ltv_limit(deposit: &Coins, params: &Params) -> LendingResult<Udec256> {
    let mut limit: Option<Udec256> = None;

    for denom in deposit.denoms() {
        let money_market = params
            .money_market(denom)
            .ok_or_else(|| LendingError::MarketNotFound {
                denom: denom.clone(),
            })?;

        let ltv = money_market.borrow_limit.loan_to_value;

        limit = Some(limit.map_or(ltv, |limit| limit.min(ltv)));
    }

    Ok(limit.unwrap_or(Udec256::ZERO))
}

/// Ensure the borrow is covered by the deposit.
///
/// An account without debt always passes and no prices are fetched.
/// Otherwise the borrow's value must not exceed the deposit's value times the
/// deposit's loan-to-value limit.
pub fn check_ltv(
    deposit: &Coins,
    borrow: &Coins,
    params: &Params,
    oracle: &dyn Oracle,
) -> LendingResult<()> {
    let borrow_value = value_of(borrow, params, oracle)?;

    if borrow_value.is_zero() {
        return Ok(());
    }

    let deposit_value = value_of(deposit, params, oracle)?;
    let limit = deposit_value.checked_mul(ltv_limit(deposit, params)?)?;

    if borrow_value > limit {
        return Err(LendingError::ltv_exceeded(borrow_value, limit));
    }

    Ok(())
}

pub fn is_within_ltv(
    deposit: &Coins,
    borrow: &Coins,
    params: &Params,
    oracle: &dyn Oracle,
) -> LendingResult<bool> {
    match check_ltv(deposit, borrow, params, oracle) {
        Ok(()) => Ok(true),
        Err(LendingError::LtvExceeded { .. }) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Ratio of the borrow's value to the deposit's value.
///
/// An account with debt but no valued collateral is maximally risky, so its
/// ratio is `Udec256::MAX`.
pub fn ltv(
    deposit: &Coins,
    borrow: &Coins,
    params: &Params,
    oracle: &dyn Oracle,
) -> LendingResult<Udec256> {
    let borrow_value = value_of(borrow, params, oracle)?;

    if borrow_value.is_zero() {
        return Ok(Udec256::ZERO);
    }

    let deposit_value = value_of(deposit, params, oracle)?;

    if deposit_value.is_zero() {
        return Ok(Udec256::MAX);
    }

    Ok(borrow_value.checked_div(deposit_value)?)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{core::testing::*, OracleError},
        hard_types::Coin,
        std::str::FromStr,
        test_case::test_case,
    };

    fn coins(list: &[(&str, i128)]) -> Coins {
        Coins::try_from(
            list.iter()
                .map(|(denom, amount)| Coin::new(*denom, *amount).unwrap())
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn value_applies_conversion_factor_and_price() {
        let params = params();
        let oracle = FixedPrices::default();

        // 2 whole bnb at 2.0, plus 150 whole ukava at 0.5.
        let value = value_of(
            &coins(&[("bnb", 200_000_000), ("ukava", 150_000_000)]),
            &params,
            &oracle,
        )
        .unwrap();
        assert_eq!(value, Udec256::from_str("79").unwrap());
    }

    #[test]
    fn limit_is_the_strictest_deposited_market() {
        let params = params();

        assert_eq!(
            ltv_limit(&coins(&[("bnb", 1)]), &params).unwrap(),
            Udec256::new_percent(80)
        );
        assert_eq!(
            ltv_limit(&coins(&[("bnb", 1), ("ukava", 1)]), &params).unwrap(),
            Udec256::new_percent(50)
        );
        assert_eq!(ltv_limit(&Coins::new(), &params).unwrap(), Udec256::ZERO);
    }

    // Deposit 100 bnb worth 200 supports at most 160 of debt.
    #[test_case(50, true ; "well within")]
    #[test_case(80, true ; "exactly at the limit")]
    #[test_case(81, false ; "just above the limit")]
    fn ltv_check(borrowed_bnb: i128, expect: bool) {
        let params = params();
        let oracle = FixedPrices::default();

        let within = is_within_ltv(
            &coins(&[("bnb", 100 * BNB_UNIT)]),
            &coins(&[("bnb", borrowed_bnb * BNB_UNIT)]),
            &params,
            &oracle,
        )
        .unwrap();
        assert_eq!(within, expect);
    }

    #[test]
    fn no_debt_needs_no_prices() {
        let params = params();
        let oracle = FixedPrices::empty();

        check_ltv(&coins(&[("bnb", 100)]), &Coins::new(), &params, &oracle).unwrap();

        assert_eq!(
            check_ltv(&coins(&[("bnb", 100)]), &coins(&[("bnb", 1)]), &params, &oracle),
            Err(LendingError::from(OracleError::PriceUnavailable {
                market_id: "bnb:usd".to_string()
            }))
        );
    }

    #[test]
    fn ratio_of_values() {
        let params = params();
        let oracle = FixedPrices::default();

        assert_eq!(
            ltv(
                &coins(&[("bnb", 100 * BNB_UNIT)]),
                &coins(&[("bnb", 25 * BNB_UNIT)]),
                &params,
                &oracle,
            )
            .unwrap(),
            Udec256::new_percent(25)
        );
        assert_eq!(
            ltv(&Coins::new(), &coins(&[("bnb", 1)]), &params, &oracle).unwrap(),
            Udec256::MAX
        );
        assert_eq!(
            ltv(&coins(&[("bnb", 1)]), &Coins::new(), &params, &oracle).unwrap(),
            Udec256::ZERO
        );
    }
}
