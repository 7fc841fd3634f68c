use {
    crate::{from_borsh_slice, to_borsh_vec},
    borsh::{BorshDeserialize, BorshSerialize},
    hard_types::{StdError, StdResult, Storage},
    std::{borrow::Cow, marker::PhantomData},
};

/// The full storage key of a single value, typed by the value it holds.
pub struct Path<'a, T> {
    storage_key: Cow<'a, [u8]>,
    data: PhantomData<T>,
}

impl<'a, T> Path<'a, T> {
    pub fn new(storage_key: Vec<u8>) -> Self {
        Self {
            storage_key: Cow::Owned(storage_key),
            data: PhantomData,
        }
    }

    pub const fn from_raw(storage_key: &'a [u8]) -> Self {
        Self {
            storage_key: Cow::Borrowed(storage_key),
            data: PhantomData,
        }
    }

    #[inline]
    pub fn storage_key(&self) -> &[u8] {
        self.storage_key.as_ref()
    }

    pub fn exists(&self, storage: &dyn Storage) -> bool {
        storage.read(self.storage_key()).is_some()
    }

    pub fn remove(&self, storage: &mut dyn Storage) {
        storage.remove(self.storage_key())
    }
}

impl<T> Path<'_, T>
where
    T: BorshSerialize + BorshDeserialize,
{
    pub fn may_load(&self, storage: &dyn Storage) -> StdResult<Option<T>> {
        storage
            .read(self.storage_key())
            .map(|val| from_borsh_slice(&val))
            .transpose()
    }

    pub fn load(&self, storage: &dyn Storage) -> StdResult<T> {
        storage
            .read(self.storage_key())
            .ok_or_else(|| StdError::data_not_found::<T>(self.storage_key()))
            .and_then(|val| from_borsh_slice(&val))
    }

    pub fn save(&self, storage: &mut dyn Storage, data: &T) -> StdResult<()> {
        let data_raw = to_borsh_vec(data)?;
        storage.write(self.storage_key(), &data_raw);
        Ok(())
    }
}
