use {
    crate::{BankError, OracleError},
    hard_math::{Int256, MathError},
    hard_types::{Addr, Coins, Denom, StdError},
};

/// Broad classification of a [`LendingError`], for callers that react to the
/// category of a failure rather than its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is malformed, e.g. it names an unsupported denom.
    Validation,
    /// The request would leave the account above its loan-to-value limit.
    Solvency,
    /// An account or the pool doesn't hold enough coins.
    Funds,
    /// The account has no position on the required side.
    NotFound,
    /// A price needed to value a position couldn't be retrieved.
    Oracle,
    Math,
    Storage,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LendingError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("invalid params: {reason}")]
    InvalidParams { reason: String },

    #[error("invalid deposit denom: no money market found for `{denom}`")]
    InvalidDepositDenom { denom: Denom },

    #[error("invalid borrow denom: no money market found for `{denom}`")]
    InvalidBorrowDenom { denom: Denom },

    #[error("no money market found for `{denom}`")]
    MarketNotFound { denom: Denom },

    #[error("loan-to-value limit exceeded: borrow value {borrow_value} exceeds limit {limit}")]
    LtvExceeded { borrow_value: String, limit: String },

    #[error(
        "insufficient funds: the requested amount of {requested} exceeds the available balance of {available}{denom} in account {account}"
    )]
    InsufficientFunds {
        account: Addr,
        denom: Denom,
        requested: Int256,
        available: Int256,
    },

    #[error(
        "insufficient balance: cannot withdraw {requested}{denom}, only {deposited}{denom} is deposited"
    )]
    InsufficientBalance {
        denom: Denom,
        requested: Int256,
        deposited: Int256,
    },

    #[error(
        "insufficient pool balance: requested {requested}{denom} but the pool holds {available}{denom}"
    )]
    InsufficientPoolBalance {
        denom: Denom,
        requested: Int256,
        available: Int256,
    },

    #[error("account can only repay up to {owed}{denom}")]
    ExceedsOwedAmount { denom: Denom, owed: Int256 },

    #[error(
        "borrow cap exceeded: borrowing {requested}{denom} would bring the total to {proposed}, above the limit of {limit}"
    )]
    BorrowCapExceeded {
        denom: Denom,
        requested: Int256,
        proposed: Int256,
        limit: Int256,
    },

    #[error("no deposit found for account {account}")]
    NoDeposit { account: Addr },

    #[error("no borrow found for account {account}")]
    NoBorrow { account: Addr },

    #[error("price unavailable for market `{market_id}`")]
    PriceUnavailable { market_id: String },

    #[error("interest factor for `{denom}` can't decrease from {current} to {proposed}")]
    InterestFactorDecreased {
        denom: Denom,
        current: String,
        proposed: String,
    },
}

impl LendingError {
    pub fn invalid_params<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::InvalidParams {
            reason: reason.to_string(),
        }
    }

    pub fn ltv_exceeded<V, L>(borrow_value: V, limit: L) -> Self
    where
        V: ToString,
        L: ToString,
    {
        Self::LtvExceeded {
            borrow_value: borrow_value.to_string(),
            limit: limit.to_string(),
        }
    }

    /// Build an `InsufficientFunds` error for the first denom in `requested`
    /// that `available` can't cover. Returns `None` if every denom is covered.
    pub fn insufficient_funds(
        account: &Addr,
        available: &Coins,
        requested: &Coins,
    ) -> Option<Self> {
        requested.iter().find_map(|coin| {
            let have = available.amount_of(coin.denom);
            (have < *coin.amount).then(|| Self::InsufficientFunds {
                account: account.clone(),
                denom: coin.denom.clone(),
                requested: *coin.amount,
                available: have,
            })
        })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParams { .. }
            | Self::InvalidDepositDenom { .. }
            | Self::InvalidBorrowDenom { .. }
            | Self::MarketNotFound { .. }
            | Self::InterestFactorDecreased { .. } => ErrorKind::Validation,
            Self::LtvExceeded { .. } => ErrorKind::Solvency,
            Self::InsufficientFunds { .. }
            | Self::InsufficientBalance { .. }
            | Self::InsufficientPoolBalance { .. }
            | Self::ExceedsOwedAmount { .. }
            | Self::BorrowCapExceeded { .. } => ErrorKind::Funds,
            Self::NoDeposit { .. } | Self::NoBorrow { .. } => ErrorKind::NotFound,
            Self::PriceUnavailable { .. } => ErrorKind::Oracle,
            Self::Math(_) => ErrorKind::Math,
            Self::Std(StdError::Math(_)) => ErrorKind::Math,
            Self::Std(StdError::InvalidDenom { .. } | StdError::InvalidCoins { .. }) => {
                ErrorKind::Validation
            },
            Self::Std(_) => ErrorKind::Storage,
        }
    }
}

impl From<BankError> for LendingError {
    fn from(err: BankError) -> Self {
        match err {
            BankError::InsufficientFunds {
                account,
                denom,
                available,
                required,
            } => Self::InsufficientFunds {
                account,
                denom,
                requested: required,
                available,
            },
            BankError::Std(err) => Self::Std(err),
        }
    }
}

impl From<OracleError> for LendingError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::PriceUnavailable { market_id } => Self::PriceUnavailable { market_id },
        }
    }
}

pub type LendingResult<T> = std::result::Result<T, LendingError>;

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr};

    #[test]
    fn insufficient_funds_reports_first_short_denom() {
        let alice = Addr::from_str("alice").unwrap();
        let available = Coins::one("bnb", 30).unwrap();
        let requested = Coins::try_from(vec![
            hard_types::Coin::new("bnb", 50).unwrap(),
            hard_types::Coin::new("ukava", 1).unwrap(),
        ])
        .unwrap();

        let err = LendingError::insufficient_funds(&alice, &available, &requested).unwrap();
        assert_eq!(
            err.to_string(),
            "insufficient funds: the requested amount of 50 exceeds the available balance of 30bnb in account alice"
        );
        assert_eq!(err.kind(), ErrorKind::Funds);

        assert!(LendingError::insufficient_funds(&alice, &requested, &available).is_none());
    }

    #[test]
    fn kinds_follow_taxonomy() {
        let alice = Addr::from_str("alice").unwrap();

        assert_eq!(
            LendingError::ltv_exceeded("200", "160").kind(),
            ErrorKind::Solvency
        );
        assert_eq!(
            LendingError::NoBorrow { account: alice }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            LendingError::from(OracleError::PriceUnavailable {
                market_id: "bnb:usd".to_string()
            })
            .kind(),
            ErrorKind::Oracle
        );
        assert_eq!(
            LendingError::from(MathError::division_by_zero(1)).kind(),
            ErrorKind::Math
        );
    }
}
