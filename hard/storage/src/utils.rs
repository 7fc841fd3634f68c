use hard_types::{StdError, StdResult};

/// Encode a byte slice's length as a 16-bit big endian number.
///
/// Keys and namespaces are short. A length that doesn't fit in 16 bits is
/// a programming error and panics.
pub fn encode_length<B>(bytes: B) -> [u8; 2]
where
    B: AsRef<[u8]>,
{
    let len = bytes.as_ref().len();
    let Ok(len) = u16::try_from(len) else {
        panic!("can't encode length because byte slice is too long: {len} > {}", u16::MAX);
    };

    len.to_be_bytes()
}

/// Join a namespace, zero or more length-prefixed raw keys, and an optional
/// last raw key that isn't length-prefixed:
///
/// ```plain
/// len(namespace) | namespace | len(A) | A | len(B) | B | C
/// ```
pub fn nested_namespaces_with_key<K>(
    namespace: &[u8],
    prefixes: &[K],
    maybe_key: Option<&K>,
) -> Vec<u8>
where
    K: AsRef<[u8]>,
{
    let mut size = namespace.len() + 2;
    for prefix in prefixes {
        size += prefix.as_ref().len() + 2;
    }
    if let Some(key) = maybe_key {
        size += key.as_ref().len();
    }

    let mut out = Vec::with_capacity(size);
    out.extend_from_slice(&encode_length(namespace));
    out.extend_from_slice(namespace);
    for prefix in prefixes {
        out.extend_from_slice(&encode_length(prefix));
        out.extend_from_slice(prefix.as_ref());
    }
    if let Some(key) = maybe_key {
        out.extend_from_slice(key.as_ref());
    }
    out
}

/// Split the first `key_elems` length-prefixed raw keys off a joined key.
///
/// Elements of the first key other than its last one retain their length
/// prefixes, so the first key can itself be deserialized as a joined key.
pub fn split_first_key(key_elems: u8, bytes: &[u8]) -> StdResult<(Vec<u8>, &[u8])> {
    let mut index = 0;
    let mut first_key = Vec::new();

    for i in 0..key_elems {
        let len_slice = bytes
            .get(index..index + 2)
            .ok_or_else(|| truncated_key(bytes))?;
        index += 2;

        if i < key_elems - 1 {
            first_key.extend_from_slice(len_slice);
        }

        let elem_len = u16::from_be_bytes([len_slice[0], len_slice[1]]) as usize;
        let elem = bytes
            .get(index..index + elem_len)
            .ok_or_else(|| truncated_key(bytes))?;
        first_key.extend_from_slice(elem);
        index += elem_len;
    }

    Ok((first_key, &bytes[index..]))
}

fn truncated_key(bytes: &[u8]) -> StdError {
    StdError::deserialize::<Vec<u8>, _>("key", format!("truncated joined key: {bytes:?}"))
}

/// Return the smallest byte string that is greater than every byte string
/// prefixed by the input.
///
/// Doesn't work if the bytes are entirely 255. The input is always a
/// length-prefixed namespace made of ASCII characters, so that can't happen.
pub fn increment_last_byte(mut bytes: Vec<u8>) -> Vec<u8> {
    while let Some(last) = bytes.pop() {
        if last < u8::MAX {
            bytes.push(last + 1);
            break;
        }
    }
    bytes
}

/// Return the smallest byte string that is strictly greater than the input.
pub fn extend_one_byte(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.push(0);
    bytes
}

// ----------------------------------- tests -----------------------------------
