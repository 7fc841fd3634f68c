use std::collections::BTreeMap;

/// The order in which to iterate over key-value pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// A key-value pair.
pub type Record = (Vec<u8>, Vec<u8>);

/// A pending write to a storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Insert(Vec<u8>),
    Delete,
}

/// A set of pending writes, ordered by key.
pub type Batch = BTreeMap<Vec<u8>, Op>;

/// Describing a KV store that supports read, write, and iteration.
pub trait Storage {
    /// Read a single key-value pair from the storage.
    ///
    /// Return `None` if the key doesn't exist.
    fn read(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Iterate over data in the KV store under the given bounds and order.
    ///
    /// Minimum bound is inclusive, maximum bound is exclusive.
    /// If `min` > `max`, an empty iterator is to be returned.
    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a>;

    /// Write a single key-value pair to the storage.
    fn write(&mut self, key: &[u8], value: &[u8]);

    /// Delete a single key-value pair from the storage.
    ///
    /// No-op if the key doesn't exist.
    fn remove(&mut self, key: &[u8]);

    /// Perform a batch of writes and removes altogether.
    ///
    /// The default implementation loops through the ops and applies them one
    /// by one.
    fn flush(&mut self, batch: Batch) {
        for (key, op) in batch {
            if let Op::Insert(value) = op {
                self.write(&key, &value);
            } else {
                self.remove(&key);
            }
        }
    }
}

// A mutable reference to a `Storage` is also a `Storage`, so a write buffer can
// be layered over storage that is owned elsewhere.
impl<T> Storage for &mut T
where
    T: Storage + ?Sized,
{
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        (**self).read(key)
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        (**self).scan(min, max, order)
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &[u8]) {
        (**self).remove(key)
    }

    fn flush(&mut self, batch: Batch) {
        (**self).flush(batch)
    }
}
