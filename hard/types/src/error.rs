use {
    data_encoding::BASE64,
    hard_math::MathError,
    std::{any::type_name, convert::Infallible},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StdError {
    #[error(transparent)]
    Infallible(#[from] Infallible),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("invalid denom `{denom}`: {reason}")]
    InvalidDenom { denom: String, reason: &'static str },

    #[error("invalid address `{addr}`: {reason}")]
    InvalidAddr { addr: String, reason: &'static str },

    #[error("invalid coins: {reason}")]
    InvalidCoins { reason: String },

    #[error("insufficient coins: cannot subtract {sub}{denom} from {have}{denom}")]
    InsufficientCoins {
        denom: String,
        have: String,
        sub: String,
    },

    #[error("data not found! type: {ty}, storage key: {key}")]
    DataNotFound { ty: &'static str, key: String },

    #[error("failed to serialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Serialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },

    #[error("failed to deserialize! codec: {codec}, type: {ty}, reason: {reason}")]
    Deserialize {
        codec: &'static str,
        ty: &'static str,
        reason: String,
    },
}

impl StdError {
    pub fn invalid_denom<D>(denom: D, reason: &'static str) -> Self
    where
        D: ToString,
    {
        Self::InvalidDenom {
            denom: denom.to_string(),
            reason,
        }
    }

    pub fn invalid_addr<A>(addr: A, reason: &'static str) -> Self
    where
        A: ToString,
    {
        Self::InvalidAddr {
            addr: addr.to_string(),
            reason,
        }
    }

    pub fn invalid_coins<R>(reason: R) -> Self
    where
        R: ToString,
    {
        Self::InvalidCoins {
            reason: reason.to_string(),
        }
    }

    pub fn insufficient_coins<D, A>(denom: D, have: A, sub: A) -> Self
    where
        D: ToString,
        A: ToString,
    {
        Self::InsufficientCoins {
            denom: denom.to_string(),
            have: have.to_string(),
            sub: sub.to_string(),
        }
    }

    pub fn data_not_found<T>(key: &[u8]) -> Self {
        Self::DataNotFound {
            ty: type_name::<T>(),
            key: BASE64.encode(key),
        }
    }

    pub fn serialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: ToString,
    {
        Self::Serialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }

    pub fn deserialize<T, R>(codec: &'static str, reason: R) -> Self
    where
        R: ToString,
    {
        Self::Deserialize {
            codec,
            ty: type_name::<T>(),
            reason: reason.to_string(),
        }
    }
}

pub type StdResult<T> = core::result::Result<T, StdError>;
