use {
    crate::{LendingError, LendingResult, MoneyMarket},
    borsh::{BorshDeserialize, BorshSerialize},
    hard_types::Denom,
    serde::{Deserialize, Serialize},
    std::collections::BTreeSet,
};

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Params {
    #[serde(default)]
    pub money_markets: Vec<MoneyMarket>,
    /// How many of the riskiest accounts the periodic driver re-checks each
    /// cycle.
    #[serde(default = "Params::default_check_ltv_index_count")]
    pub check_ltv_index_count: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            money_markets: Vec::new(),
            check_ltv_index_count: Self::default_check_ltv_index_count(),
        }
    }
}

impl Params {
    pub const DEFAULT_CHECK_LTV_INDEX_COUNT: u32 = 10;

    fn default_check_ltv_index_count() -> u32 {
        Self::DEFAULT_CHECK_LTV_INDEX_COUNT
    }

    pub fn validate(&self) -> LendingResult<()> {
        let mut seen = BTreeSet::new();

        for money_market in &self.money_markets {
            money_market.validate()?;

            if !seen.insert(&money_market.denom) {
                return Err(LendingError::invalid_params(format!(
                    "duplicate money market for `{}`",
                    money_market.denom
                )));
            }
        }

        Ok(())
    }

    /// Find the money market of the given denom, if one is configured.
    pub fn money_market(&self, denom: &Denom) -> Option<&MoneyMarket> {
        self.money_markets.iter().find(|mm| mm.denom == *denom)
    }
}

// ----------------------------------- tests -----------------------------------
