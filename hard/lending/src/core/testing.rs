use {
    crate::{BorrowLimit, InterestRateModel, MoneyMarket, Oracle, OracleError, Params},
    hard_math::{Int256, Udec256},
    hard_types::Denom,
    std::{collections::BTreeMap, str::FromStr},
};

pub const BNB_UNIT: i128 = 100_000_000;

pub const UKAVA_UNIT: i128 = 1_000_000;

pub fn money_market(denom: &str, ltv_percent: u128, conversion_factor: i128) -> MoneyMarket {
    MoneyMarket {
        denom: Denom::from_str(denom).unwrap(),
        borrow_limit: BorrowLimit {
            has_max_limit: false,
            maximum_limit: Int256::ZERO,
            loan_to_value: Udec256::new_percent(ltv_percent),
        },
        spot_market_id: format!("{denom}:usd"),
        conversion_factor: Int256::new(conversion_factor),
        interest_rate_model: InterestRateModel {
            base_rate_apy: Udec256::new_percent(5),
            base_multiplier: Udec256::new_percent(2),
            kink: Udec256::new_percent(80),
            jump_multiplier: Udec256::new(10),
        },
        reserve_factor: Udec256::new_percent(5),
        auction_size: Int256::new(1_000_000_000),
        keeper_reward_percentage: Udec256::new_percent(2),
    }
}

/// bnb (8 decimals, LTV 0.8) and ukava (6 decimals, LTV 0.5).
pub fn params() -> Params {
    Params {
        money_markets: vec![
            money_market("bnb", 80, BNB_UNIT),
            money_market("ukava", 50, UKAVA_UNIT),
        ],
        ..Default::default()
    }
}

/// Oracle with fixed prices: bnb at 2.0 and ukava at 0.5 by default.
pub struct FixedPrices(BTreeMap<String, Udec256>);

impl FixedPrices {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }
}

impl Default for FixedPrices {
    fn default() -> Self {
        Self(BTreeMap::from([
            ("bnb:usd".to_string(), Udec256::new(2)),
            ("ukava:usd".to_string(), Udec256::new_percent(50)),
        ]))
    }
}

impl Oracle for FixedPrices {
    fn price(&self, market_id: &str) -> Result<Udec256, OracleError> {
        self.0
            .get(market_id)
            .copied()
            .ok_or_else(|| OracleError::PriceUnavailable {
                market_id: market_id.to_string(),
            })
    }
}
