use crate::{extend_one_byte, PrimaryKey};

/// A bound on a range query over a map or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound<K> {
    Inclusive(K),
    Exclusive(K),
}

impl<K> Bound<K>
where
    K: PrimaryKey,
{
    /// Convert into a raw bound under the given namespace, where the minimum
    /// is inclusive and the maximum exclusive, as `Storage::scan` expects.
    pub(crate) fn to_raw_min(&self, namespace: &[u8]) -> Vec<u8> {
        match self {
            Bound::Inclusive(key) => concat(namespace, &key.joined_key()),
            Bound::Exclusive(key) => extend_one_byte(concat(namespace, &key.joined_key())),
        }
    }

    pub(crate) fn to_raw_max(&self, namespace: &[u8]) -> Vec<u8> {
        match self {
            Bound::Inclusive(key) => extend_one_byte(concat(namespace, &key.joined_key())),
            Bound::Exclusive(key) => concat(namespace, &key.joined_key()),
        }
    }
}

fn concat(namespace: &[u8], key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(namespace.len() + key.len());
    out.extend_from_slice(namespace);
    out.extend_from_slice(key);
    out
}
