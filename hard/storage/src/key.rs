use {
    crate::{encode_length, split_first_key},
    hard_math::Udec256,
    hard_types::{Addr, Denom, StdError, StdResult},
    std::borrow::Cow,
};

pub type RawKey<'a> = Cow<'a, [u8]>;

// ------------------------------------ key ------------------------------------

/// Describes a key used in mapping data structures, i.e. [`Map`](crate::Map)
/// and [`Set`](crate::Set).
///
/// Keys are serialized such that the byte order of two serialized keys is the
/// same as the order of the keys themselves. This is what makes range queries
/// over a map meaningful.
pub trait PrimaryKey {
    /// The number of elements in a tuple key. 1 for singleton keys.
    ///
    /// Necessary for deserializing nested tuple keys, where otherwise we can't
    /// tell where one element ends and the next starts.
    const KEY_ELEMS: u8;

    /// The type that raw keys deserialize into, which may be different from
    /// the key itself.
    ///
    /// E.g. when `&Denom` is used as the key, it deserializes into `Denom`.
    type Output;

    /// Convert the key into one or more raw keys.
    fn raw_keys(&self) -> Vec<RawKey>;

    /// Serialize the raw keys into bytes.
    ///
    /// Each raw key, other than the last one, is prefixed by its length as a
    /// 16-bit big endian number:
    ///
    /// ```plain
    /// len(A) | A | len(B) | B | C
    /// ```
    fn joined_key(&self) -> Vec<u8> {
        let mut raw_keys = self.raw_keys();
        let last_raw_key = raw_keys.pop();

        let mut out = Vec::new();
        for raw_key in raw_keys {
            out.extend_from_slice(&encode_length(&raw_key));
            out.extend_from_slice(&raw_key);
        }
        if let Some(raw_key) = last_raw_key {
            out.extend_from_slice(&raw_key);
        }
        out
    }

    /// Deserialize the raw bytes into the output.
    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output>;
}

impl PrimaryKey for Addr {
    type Output = Addr;

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        vec![Cow::Borrowed(self.as_str().as_bytes())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        String::from_utf8(bytes.to_vec())
            .map_err(|err| StdError::deserialize::<Self::Output, _>("key", err))
            .and_then(TryInto::try_into)
    }
}

impl PrimaryKey for Denom {
    type Output = Denom;

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        vec![Cow::Borrowed(self.as_str().as_bytes())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        String::from_utf8(bytes.to_vec())
            .map_err(|err| StdError::deserialize::<Self::Output, _>("key", err))
            .and_then(TryInto::try_into)
    }
}

// A decimal is keyed by its raw 256-bit value in big endian, which sorts
// bytewise the same way the numbers sort.
impl PrimaryKey for Udec256 {
    type Output = Udec256;

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        vec![Cow::Owned(self.to_be_bytes().to_vec())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        let Ok(bytes) = <[u8; 32]>::try_from(bytes) else {
            return Err(StdError::deserialize::<Self::Output, _>(
                "key",
                format!("wrong number of bytes: expecting 32, got {}", bytes.len()),
            ));
        };

        Ok(Udec256::from_be_bytes(bytes))
    }
}

impl<K> PrimaryKey for &K
where
    K: PrimaryKey,
{
    type Output = K::Output;

    const KEY_ELEMS: u8 = K::KEY_ELEMS;

    fn raw_keys(&self) -> Vec<RawKey> {
        (*self).raw_keys()
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        K::from_slice(bytes)
    }
}

impl<A, B> PrimaryKey for (A, B)
where
    A: PrimaryKey,
    B: PrimaryKey,
{
    type Output = (A::Output, B::Output);

    const KEY_ELEMS: u8 = A::KEY_ELEMS + B::KEY_ELEMS;

    fn raw_keys(&self) -> Vec<RawKey> {
        let mut keys = self.0.raw_keys();
        keys.extend(self.1.raw_keys());
        keys
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        let (a_raw, b_raw) = split_first_key(A::KEY_ELEMS, bytes)?;

        let a = A::from_slice(&a_raw)?;
        let b = B::from_slice(b_raw)?;

        Ok((a, b))
    }
}

// ----------------------------------- tests -----------------------------------
