use {
    crate::{LendingError, LendingResult},
    borsh::{BorshDeserialize, BorshSerialize},
    hard_math::{Int256, IsZero, Udec256},
    hard_types::Denom,
    serde::{Deserialize, Serialize},
};

/// Borrowing restrictions of a money market.
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct BorrowLimit {
    /// Whether `maximum_limit` is enforced.
    pub has_max_limit: bool,
    /// The most that can be borrowed from the pool in aggregate, in the
    /// denom's smallest unit.
    pub maximum_limit: Int256,
    /// The fraction of a deposit's value that can be borrowed against it.
    pub loan_to_value: Udec256,
}

impl BorrowLimit {
    pub fn validate(&self) -> LendingResult<()> {
        if self.maximum_limit.is_negative() {
            return Err(LendingError::invalid_params(format!(
                "maximum limit cannot be negative: {}",
                self.maximum_limit
            )));
        }

        if self.loan_to_value.is_zero() {
            return Err(LendingError::invalid_params(format!(
                "loan-to-value must be positive: {}",
                self.loan_to_value
            )));
        }

        if self.loan_to_value > Udec256::ONE {
            return Err(LendingError::invalid_params(format!(
                "loan-to-value cannot be greater than 1.0: {}",
                self.loan_to_value
            )));
        }

        Ok(())
    }
}

/// Parameters of a kinked interest rate curve. The curve itself is evaluated
/// by whoever advances the interest factors; the ledger only stores and
/// validates it.
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct InterestRateModel {
    pub base_rate_apy: Udec256,
    pub base_multiplier: Udec256,
    pub kink: Udec256,
    pub jump_multiplier: Udec256,
}

impl InterestRateModel {
    pub fn validate(&self) -> LendingResult<()> {
        if self.base_rate_apy > Udec256::ONE {
            return Err(LendingError::invalid_params(format!(
                "base rate APY must be between 0.0-1.0: {}",
                self.base_rate_apy
            )));
        }

        if self.kink > Udec256::ONE {
            return Err(LendingError::invalid_params(format!(
                "kink must be between 0.0-1.0: {}",
                self.kink
            )));
        }

        Ok(())
    }
}

/// Configuration of a single asset that can be deposited and borrowed.
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct MoneyMarket {
    pub denom: Denom,
    pub borrow_limit: BorrowLimit,
    /// Identifier of the oracle market that prices this denom.
    pub spot_market_id: String,
    /// Number of smallest units per whole unit of the asset, e.g. 10^8 for
    /// an asset with 8 decimals.
    pub conversion_factor: Int256,
    pub interest_rate_model: InterestRateModel,
    /// Fraction of borrow interest kept as reserves.
    pub reserve_factor: Udec256,
    /// Amount of the asset sold per liquidation auction lot.
    pub auction_size: Int256,
    /// Fraction of liquidated collateral paid to the keeper that triggers it.
    pub keeper_reward_percentage: Udec256,
}

impl MoneyMarket {
    pub fn validate(&self) -> LendingResult<()> {
        self.borrow_limit.validate()?;
        self.interest_rate_model.validate()?;

        if !self.conversion_factor.is_positive() {
            return Err(LendingError::invalid_params(format!(
                "conversion factor of `{}` must be positive: {}",
                self.denom, self.conversion_factor
            )));
        }

        if self.reserve_factor > Udec256::ONE {
            return Err(LendingError::invalid_params(format!(
                "reserve factor must be between 0.0-1.0: {}",
                self.reserve_factor
            )));
        }

        if !self.auction_size.is_positive() {
            return Err(LendingError::invalid_params(format!(
                "auction size must be positive: {}",
                self.auction_size
            )));
        }

        if self.keeper_reward_percentage > Udec256::ONE {
            return Err(LendingError::invalid_params(format!(
                "keeper reward percentage must be between 0.0-1.0: {}",
                self.keeper_reward_percentage
            )));
        }

        Ok(())
    }
}
