use crate::{Int256, Udec256};

/// Describes a number that can take on the value of zero.
pub trait IsZero {
    fn is_zero(&self) -> bool;

    fn is_non_zero(&self) -> bool {
        !self.is_zero()
    }
}

impl IsZero for Int256 {
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl IsZero for Udec256 {
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
