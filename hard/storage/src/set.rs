use {
    crate::{Bound, Map, PrimaryKey},
    hard_types::{Order, StdResult, Storage},
};

/// Mimic the behavior of `BTreeSet`.
///
/// Internally, this is basically a `Map<T, ()>`; the unit value serializes to
/// empty bytes.
pub struct Set<'a, T> {
    map: Map<'a, T, ()>,
}

impl<'a, T> Set<'a, T> {
    pub const fn new(namespace: &'a str) -> Self {
        Self {
            map: Map::new(namespace),
        }
    }
}

impl<T> Set<'_, T>
where
    T: PrimaryKey,
{
    pub fn has(&self, storage: &dyn Storage, item: T) -> bool {
        self.map.has(storage, item)
    }

    pub fn insert(&self, storage: &mut dyn Storage, item: T) -> StdResult<()> {
        self.map.save(storage, item, &())
    }

    pub fn remove(&self, storage: &mut dyn Storage, item: T) {
        self.map.remove(storage, item)
    }

    pub fn is_empty(&self, storage: &dyn Storage) -> bool {
        self.map.is_empty(storage)
    }

    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        min: Option<Bound<T>>,
        max: Option<Bound<T>>,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<T::Output>> + 'b>
    where
        T: 'b,
        T::Output: 'b,
    {
        self.map.keys(storage, min, max, order)
    }
}

// ----------------------------------- tests -----------------------------------
