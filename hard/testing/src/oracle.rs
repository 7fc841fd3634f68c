use {
    hard_lending::{Oracle, OracleError},
    hard_math::Udec256,
    std::collections::BTreeMap,
};

/// An oracle whose prices are set by hand.
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    prices: BTreeMap<String, Udec256>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, market_id: &str, price: Udec256) -> Self {
        self.set_price(market_id, price);
        self
    }

    pub fn set_price(&mut self, market_id: &str, price: Udec256) {
        self.prices.insert(market_id.to_string(), price);
    }

    pub fn remove_price(&mut self, market_id: &str) {
        self.prices.remove(market_id);
    }
}

impl Oracle for MockOracle {
    fn price(&self, market_id: &str) -> Result<Udec256, OracleError> {
        self.prices
            .get(market_id)
            .copied()
            .ok_or_else(|| OracleError::PriceUnavailable {
                market_id: market_id.to_string(),
            })
    }
}
