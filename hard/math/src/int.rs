use {
    crate::{MathError, MathResult, Udec256},
    bnum::{
        cast::CastFrom,
        types::{I256, I512},
    },
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser},
    std::{
        fmt::{self, Display},
        ops::{Add, AddAssign, Neg, Sub, SubAssign},
        str::FromStr,
    },
};

/// A signed 256-bit integer, used to represent amounts of assets in their
/// smallest units.
///
/// 256 bits is the same bit length limit the Cosmos SDK imposes on its
/// arbitrary-precision `Int`, so any amount a bank module can hold fits here.
#[derive(
    BorshSerialize,
    BorshDeserialize,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub struct Int256(pub(crate) I256);

impl Int256 {
    pub const MAX: Self = Self(I256::MAX);
    pub const MIN: Self = Self(I256::MIN);
    pub const ONE: Self = Self(I256::ONE);
    pub const ZERO: Self = Self(I256::ZERO);

    pub fn new(value: i128) -> Self {
        Self(I256::from(value))
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn checked_add(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow_add(self, rhs))
    }

    pub fn checked_sub(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow_sub(self, rhs))
    }

    pub fn checked_mul(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_mul(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow_mul(self, rhs))
    }

    pub fn checked_div(self, rhs: Self) -> MathResult<Self> {
        if rhs.0 == I256::ZERO {
            return Err(MathError::division_by_zero(self));
        }

        // The only overflowing case is `MIN / -1`.
        self.0
            .checked_div(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow_conversion::<_, Int256>(self))
    }

    /// Compute `self * numerator / denominator` where the ratio is given as
    /// two decimals, rounding towards negative infinity.
    ///
    /// This is how an amount is scaled by the growth of an accumulator, e.g.
    /// `principal * current_factor / snapshot_factor`, without losing
    /// precision to an intermediate division.
    pub fn checked_mul_dec_ratio_floor(
        self,
        numerator: Udec256,
        denominator: Udec256,
    ) -> MathResult<Self> {
        if denominator.0 == Udec256::ZERO.0 {
            return Err(MathError::division_by_zero(self));
        }

        let product = I512::cast_from(self.0) * I512::cast_from(numerator.0);
        let quotient = floor_div(product, I512::cast_from(denominator.0));

        narrow(quotient).map(Self).ok_or_else(|| {
            MathError::overflow_mul(self, format!("{numerator} / {denominator}"))
        })
    }
}

/// Integer division rounding towards negative infinity. The divisor must be
/// non-zero.
fn floor_div(dividend: I512, divisor: I512) -> I512 {
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;

    if remainder != I512::ZERO && (remainder.is_negative() != divisor.is_negative()) {
        quotient - I512::ONE
    } else {
        quotient
    }
}

fn narrow(wide: I512) -> Option<I256> {
    if wide > I512::cast_from(I256::MAX) || wide < I512::cast_from(I256::MIN) {
        return None;
    }

    Some(I256::cast_from(wide))
}

impl From<i128> for Int256 {
    fn from(value: i128) -> Self {
        Self::new(value)
    }
}

impl FromStr for Int256 {
    type Err = MathError;

    fn from_str(s: &str) -> MathResult<Self> {
        I256::from_str(s)
            .map(Self)
            .map_err(|err| MathError::parse_number::<Self>(s, err))
    }
}

impl Display for Int256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Neg for Int256 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Add for Int256 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl Sub for Int256 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl AddAssign for Int256 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Int256 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl ser::Serialize for Int256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Int256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(Int256Visitor)
    }
}

struct Int256Visitor;

impl de::Visitor<'_> for Int256Visitor {
    type Value = Int256;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string-encoded signed 256-bit integer")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Int256::from_str(v).map_err(E::custom)
    }
}

// ----------------------------------- tests -----------------------------------
