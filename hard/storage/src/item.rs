use {crate::Path, std::ops::Deref};

/// A single value stored under a fixed key.
pub struct Item<'a, T> {
    path: Path<'a, T>,
}

impl<'a, T> Item<'a, T> {
    pub const fn new(storage_key: &'a str) -> Self {
        Self {
            path: Path::from_raw(storage_key.as_bytes()),
        }
    }
}

// `Item` is effectively a wrapper over a `Path`, so instead of implementing
// methods (`load`, `save`, ...) manually, we implement `Deref<Target = Path>`.
impl<'a, T> Deref for Item<'a, T> {
    type Target = Path<'a, T>;

    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

// ----------------------------------- tests -----------------------------------
