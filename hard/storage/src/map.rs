use {
    crate::{
        from_borsh_slice, increment_last_byte, nested_namespaces_with_key, Bound, Path,
        PrimaryKey,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    hard_types::{Order, StdResult, Storage},
    std::marker::PhantomData,
};

/// A typed key-value mapping under a namespace, mimicking `BTreeMap`.
///
/// Entries are ordered by the byte order of their serialized keys, which
/// `PrimaryKey` guarantees to agree with the order of the keys themselves.
pub struct Map<'a, K, T> {
    namespace: &'a [u8],
    key: PhantomData<K>,
    data: PhantomData<T>,
}

impl<'a, K, T> Map<'a, K, T> {
    pub const fn new(namespace: &'a str) -> Self {
        Self {
            namespace: namespace.as_bytes(),
            key: PhantomData,
            data: PhantomData,
        }
    }
}

impl<K, T> Map<'_, K, T>
where
    K: PrimaryKey,
    T: BorshSerialize + BorshDeserialize,
{
    fn prefix(&self) -> Vec<u8> {
        nested_namespaces_with_key::<Vec<u8>>(self.namespace, &[], None)
    }

    pub fn path(&self, key: K) -> Path<'static, T> {
        Path::new(nested_namespaces_with_key(
            self.namespace,
            &[],
            Some(&key.joined_key()),
        ))
    }

    pub fn has(&self, storage: &dyn Storage, key: K) -> bool {
        self.path(key).exists(storage)
    }

    pub fn may_load(&self, storage: &dyn Storage, key: K) -> StdResult<Option<T>> {
        self.path(key).may_load(storage)
    }

    pub fn load(&self, storage: &dyn Storage, key: K) -> StdResult<T> {
        self.path(key).load(storage)
    }

    pub fn save(&self, storage: &mut dyn Storage, key: K, data: &T) -> StdResult<()> {
        self.path(key).save(storage, data)
    }

    pub fn remove(&self, storage: &mut dyn Storage, key: K) {
        self.path(key).remove(storage)
    }

    pub fn is_empty(&self, storage: &dyn Storage) -> bool {
        let prefix = self.prefix();
        let max = increment_last_byte(prefix.clone());

        storage
            .scan(Some(prefix.as_slice()), Some(max.as_slice()), Order::Ascending)
            .next()
            .is_none()
    }

    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<(K::Output, T)>> + 'b>
    where
        K: 'b,
        K::Output: 'b,
        T: 'b,
    {
        let prefix = self.prefix();
        let prefix_len = prefix.len();

        let min = match min {
            Some(bound) => bound.to_raw_min(&prefix),
            None => prefix.clone(),
        };
        let max = match max {
            Some(bound) => bound.to_raw_max(&prefix),
            None => increment_last_byte(prefix),
        };

        let iter = storage
            .scan(Some(min.as_slice()), Some(max.as_slice()), order)
            .map(move |(key_raw, value_raw)| {
                let key = K::from_slice(&key_raw[prefix_len..])?;
                let value = from_borsh_slice(&value_raw)?;
                Ok((key, value))
            });

        Box::new(iter)
    }

    pub fn keys<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<K>>,
        max: Option<Bound<K>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<K::Output>> + 'b>
    where
        K: 'b,
        K::Output: 'b,
        T: 'b,
    {
        let iter = self
            .range(storage, min, max, order)
            .map(|res| res.map(|(key, _)| key));

        Box::new(iter)
    }
}

// ----------------------------------- tests -----------------------------------
