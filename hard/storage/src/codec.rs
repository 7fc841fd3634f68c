use {
    borsh::{BorshDeserialize, BorshSerialize},
    hard_types::{StdError, StdResult},
};

// Values are always stored as Borsh. There's no benefit using any other
// encoding for data that never leaves the ledger's own storage.

pub fn to_borsh_vec<T>(data: &T) -> StdResult<Vec<u8>>
where
    T: BorshSerialize,
{
    borsh::to_vec(data).map_err(|err| StdError::serialize::<T, _>("borsh", err))
}

pub fn from_borsh_slice<T>(bytes: &[u8]) -> StdResult<T>
where
    T: BorshDeserialize,
{
    borsh::from_slice(bytes).map_err(|err| StdError::deserialize::<T, _>("borsh", err))
}
