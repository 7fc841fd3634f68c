use {
    crate::{Int256, MathError, MathResult},
    bnum::{
        cast::CastFrom,
        types::{U256, U512},
    },
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser},
    std::{
        fmt::{self, Display},
        str::FromStr,
    },
};

/// An unsigned fixed-point decimal number with 18 decimal places, backed by a
/// 256-bit unsigned integer.
///
/// Used for interest factors, prices, loan-to-value ratios, and account
/// values.
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
pub struct Udec256(pub(crate) U256);

impl Udec256 {
    pub const DECIMAL_PLACES: u32 = 18;
    pub const MAX: Self = Self(U256::MAX);
    pub const ONE: Self = Self(Self::PRECISION);
    pub const PRECISION: U256 = U256::from_digits([1_000_000_000_000_000_000, 0, 0, 0]);
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a decimal from a whole number.
    pub fn new(value: u128) -> Self {
        Self(U256::from(value) * Self::PRECISION)
    }

    /// Create a decimal from a percentage, e.g. `new_percent(80)` is 0.8.
    pub fn new_percent(value: u128) -> Self {
        Self(U256::from(value) * (Self::PRECISION / U256::from(100_u128)))
    }

    /// Create a decimal from its raw 18-decimal representation.
    pub const fn raw(value: U256) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> U256 {
        self.0
    }

    /// Big endian bytes of the raw value. Decimals compare the same way as
    /// their byte representations do.
    pub fn to_be_bytes(self) -> [u8; 32] {
        let digits = self.0.digits();
        let mut bytes = [0u8; 32];
        for (i, digit) in digits.iter().rev().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&digit.to_be_bytes());
        }
        bytes
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut digits = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            digits[3 - i] = u64::from_be_bytes(word);
        }
        Self(U256::from_digits(digits))
    }

    /// Compute `numerator / denominator` as a decimal, rounding down.
    ///
    /// Both inputs must be non-negative and the denominator must be non-zero.
    pub fn checked_from_ratio(numerator: Int256, denominator: Int256) -> MathResult<Self> {
        if numerator.is_negative() {
            return Err(MathError::negative_value::<Int256>(numerator));
        }

        if denominator.is_negative() {
            return Err(MathError::negative_value::<Int256>(denominator));
        }

        if denominator == Int256::ZERO {
            return Err(MathError::division_by_zero(numerator));
        }

        let product = U512::cast_from(numerator.0) * U512::cast_from(Self::PRECISION);
        let quotient = product / U512::cast_from(denominator.0);

        narrow(quotient)
            .map(Self)
            .ok_or_else(|| MathError::overflow_conversion::<_, Udec256>(quotient))
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

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Multiply two decimals, rounding down.
    pub fn checked_mul(self, rhs: Self) -> MathResult<Self> {
        let product = U512::cast_from(self.0) * U512::cast_from(rhs.0);
        let quotient = product / U512::cast_from(Self::PRECISION);

        narrow(quotient)
            .map(Self)
            .ok_or_else(|| MathError::overflow_mul(self, rhs))
    }

    /// Divide two decimals, rounding down.
    pub fn checked_div(self, rhs: Self) -> MathResult<Self> {
        if rhs.0 == U256::ZERO {
            return Err(MathError::division_by_zero(self));
        }

        let product = U512::cast_from(self.0) * U512::cast_from(Self::PRECISION);
        let quotient = product / U512::cast_from(rhs.0);

        narrow(quotient)
            .map(Self)
            .ok_or_else(|| MathError::overflow_mul(self, format!("1 / {rhs}")))
    }
}

fn narrow(wide: U512) -> Option<U256> {
    if wide > U512::cast_from(U256::MAX) {
        return None;
    }

    Some(U256::cast_from(wide))
}

impl FromStr for Udec256 {
    type Err = MathError;

    fn from_str(input: &str) -> MathResult<Self> {
        let mut parts = input.split('.');

        // `split` always yields at least one item.
        let whole_part = parts.next().unwrap_or_default();
        let fraction_part = parts.next().unwrap_or_default();

        if parts.next().is_some() {
            return Err(MathError::parse_number::<Self>(
                input,
                "unexpected number of dots",
            ));
        }

        if whole_part.is_empty() {
            return Err(MathError::parse_number::<Self>(input, "missing whole part"));
        }

        if fraction_part.len() > Self::DECIMAL_PLACES as usize {
            return Err(MathError::parse_number::<Self>(
                input,
                format!(
                    "too many decimal places: got {}, max {}",
                    fraction_part.len(),
                    Self::DECIMAL_PLACES
                ),
            ));
        }

        let whole = U256::from_str(whole_part)
            .map_err(|err| MathError::parse_number::<Self>(input, err))?;

        let fraction = if fraction_part.is_empty() {
            U256::ZERO
        } else {
            U256::from_str(&format!("{fraction_part:0<18}"))
                .map_err(|err| MathError::parse_number::<Self>(input, err))?
        };

        whole
            .checked_mul(Self::PRECISION)
            .and_then(|whole| whole.checked_add(fraction))
            .map(Self)
            .ok_or_else(|| MathError::parse_number::<Self>(input, "value too large"))
    }
}

impl Display for Udec256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let whole = self.0 / Self::PRECISION;
        let fraction = self.0 % Self::PRECISION;

        if fraction == U256::ZERO {
            return write!(f, "{whole}");
        }

        let fraction = format!("{:0>18}", fraction.to_string());

        write!(f, "{whole}.{}", fraction.trim_end_matches('0'))
    }
}

impl ser::Serialize for Udec256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Udec256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(Udec256Visitor)
    }
}

struct Udec256Visitor;

impl de::Visitor<'_> for Udec256Visitor {
    type Value = Udec256;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string-encoded 18-decimal fixed-point number")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Udec256::from_str(v).map_err(E::custom)
    }
}

// ----------------------------------- tests -----------------------------------
