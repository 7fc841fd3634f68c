use {
    crate::{Batch, Op, Order, Record, Storage},
    std::{
        cmp::Ordering,
        iter::{self, Peekable},
        ops::Bound,
    },
};

/// A key-value storage with an in-memory write buffer.
///
/// Reads see the pending writes layered over the base storage. Nothing
/// reaches the base until `commit` is called; dropping the buffer discards
/// every pending write.
pub struct Buffer<S> {
    base: S,
    pending: Batch,
}

impl<S> Buffer<S> {
    pub fn new(base: S) -> Self {
        Self {
            base,
            pending: Batch::new(),
        }
    }

    /// Number of keys with a pending write or delete.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl<S> Buffer<S>
where
    S: Storage,
{
    /// Consume self, flush pending ops to the underlying store, return the
    /// underlying store.
    pub fn commit(mut self) -> S {
        self.base.flush(self.pending);
        self.base
    }
}

impl<S> Storage for Buffer<S>
where
    S: Storage,
{
    fn read(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(Op::Insert(value)) => Some(value.clone()),
            Some(Op::Delete) => None,
            None => self.base.read(key),
        }
    }

    fn scan<'a>(
        &'a self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Box::new(iter::empty());
            }
        }

        let base = self.base.scan(min, max, order);

        let min = min.map_or(Bound::Unbounded, |bytes| Bound::Included(bytes.to_vec()));
        let max = max.map_or(Bound::Unbounded, |bytes| Bound::Excluded(bytes.to_vec()));
        let pending_raw = self.pending.range((min, max));
        let pending: Box<dyn Iterator<Item = _>> = match order {
            Order::Ascending => Box::new(pending_raw),
            Order::Descending => Box::new(pending_raw.rev()),
        };

        Box::new(Merged::new(base, pending, order))
    }

    fn write(&mut self, key: &[u8], value: &[u8]) {
        self.pending.insert(key.to_vec(), Op::Insert(value.to_vec()));
    }

    fn remove(&mut self, key: &[u8]) {
        self.pending.insert(key.to_vec(), Op::Delete);
    }

    fn flush(&mut self, batch: Batch) {
        // With `a.extend(b)`, values in `b` win for keys present in both.
        self.pending.extend(batch);
    }
}

struct Merged<'a, B, P>
where
    B: Iterator<Item = Record>,
    P: Iterator<Item = (&'a Vec<u8>, &'a Op)>,
{
    base: Peekable<B>,
    pending: Peekable<P>,
    order: Order,
}

impl<'a, B, P> Merged<'a, B, P>
where
    B: Iterator<Item = Record>,
    P: Iterator<Item = (&'a Vec<u8>, &'a Op)>,
{
    fn new(base: B, pending: P, order: Order) -> Self {
        Self {
            base: base.peekable(),
            pending: pending.peekable(),
            order,
        }
    }

    fn take_pending(&mut self) -> Option<Record> {
        let (key, op) = self.pending.next()?;

        match op {
            Op::Insert(value) => Some((key.clone(), value.clone())),
            Op::Delete => self.next(),
        }
    }
}

impl<'a, B, P> Iterator for Merged<'a, B, P>
where
    B: Iterator<Item = Record>,
    P: Iterator<Item = (&'a Vec<u8>, &'a Op)>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        match (self.base.peek(), self.pending.peek()) {
            (Some((base_key, _)), Some((pending_key, _))) => {
                let ordering = match self.order {
                    Order::Ascending => base_key.cmp(pending_key),
                    Order::Descending => base_key.cmp(pending_key).reverse(),
                };

                match ordering {
                    Ordering::Less => self.base.next(),
                    Ordering::Equal => {
                        self.base.next();
                        self.take_pending()
                    },
                    Ordering::Greater => self.take_pending(),
                }
            },
            (None, Some(_)) => self.take_pending(),
            (Some(_), None) => self.base.next(),
            (None, None) => None,
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, crate::MockStorage};

    // base    : 1 2 _ 4 5 6 7 _
    // pending :   D P _ _ P D 8  (P = put, D = delete)
    // merged  : 1 _ 3 4 5 6 _ 8
    fn make_base() -> MockStorage {
        let mut base = MockStorage::new();
        for i in [1, 2, 4, 5, 6, 7] {
            base.write(&[i], &[i]);
        }
        base
    }

    fn apply_pending<S: Storage>(buffer: &mut Buffer<S>) {
        buffer.remove(&[2]);
        buffer.write(&[3], &[3]);
        buffer.write(&[6], &[255]);
        buffer.remove(&[7]);
        buffer.write(&[8], &[8]);
    }

    fn expected() -> Vec<Record> {
        vec![
            (vec![1], vec![1]),
            (vec![3], vec![3]),
            (vec![4], vec![4]),
            (vec![5], vec![5]),
            (vec![6], vec![255]),
            (vec![8], vec![8]),
        ]
    }

    fn collect_records(storage: &dyn Storage, order: Order) -> Vec<Record> {
        storage.scan(None, None, order).collect()
    }

    #[test]
    fn iterator_works() {
        let mut base = make_base();
        let mut buffer = Buffer::new(&mut base);
        apply_pending(&mut buffer);

        let mut merged = expected();
        assert_eq!(collect_records(&buffer, Order::Ascending), merged);

        merged.reverse();
        assert_eq!(collect_records(&buffer, Order::Descending), merged);
    }

    #[test]
    fn bounded_scan_works() {
        let mut base = make_base();
        let mut buffer = Buffer::new(&mut base);
        apply_pending(&mut buffer);

        let records = buffer
            .scan(Some([2].as_slice()), Some([6].as_slice()), Order::Ascending)
            .collect::<Vec<_>>();
        assert_eq!(records, expected()[1..4].to_vec());

        let count = buffer
            .scan(Some([6].as_slice()), Some([2].as_slice()), Order::Ascending)
            .count();
        assert_eq!(count, 0);
    }

    #[test]
    fn commit_flushes_and_drop_discards() {
        let mut base = make_base();

        {
            let mut buffer = Buffer::new(&mut base);
            apply_pending(&mut buffer);
            assert_eq!(buffer.pending_len(), 5);
        }
        assert_eq!(base.read(&[2]), Some(vec![2]));
        assert_eq!(base.read(&[3]), None);

        let mut buffer = Buffer::new(&mut base);
        apply_pending(&mut buffer);
        buffer.commit();
        assert_eq!(collect_records(&base, Order::Ascending), expected());
    }
}
