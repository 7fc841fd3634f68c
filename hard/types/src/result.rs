use std::fmt::{Debug, Display};

/// Assertions on the outcome of a ledger call, for use in tests.
///
/// An error matches an expected message if its `Display` output contains the
/// message, so tests can pin down the relevant part without repeating every
/// amount in it.
pub trait ResultExt {
    type Success;
    type Error;

    fn should_succeed(self) -> Self::Success;

    fn should_succeed_and_equal<U>(self, expect: U) -> Self::Success
    where
        Self::Success: PartialEq<U>,
        U: Debug;

    fn should_fail(self) -> Self::Error;

    fn should_fail_and<F>(self, check: F) -> Self::Error
    where
        F: FnOnce(&Self::Error) -> bool;

    fn should_fail_with_error<U>(self, expect: U) -> Self::Error
    where
        U: Display;
}

impl<T, E> ResultExt for Result<T, E>
where
    T: Debug,
    E: Display,
{
    type Error = E;
    type Success = T;

    fn should_succeed(self) -> T {
        self.unwrap_or_else(|err| panic!("call failed: {err}"))
    }

    fn should_succeed_and_equal<U>(self, expect: U) -> T
    where
        Self::Success: PartialEq<U>,
        U: Debug,
    {
        let value = self.should_succeed();
        assert!(value == expect, "call returned {value:?}, expected {expect:?}");
        value
    }

    fn should_fail(self) -> E {
        match self {
            Ok(value) => panic!("call succeeded with {value:?}, expected an error"),
            Err(err) => err,
        }
    }

    fn should_fail_and<F>(self, check: F) -> E
    where
        F: FnOnce(&Self::Error) -> bool,
    {
        let err = self.should_fail();
        assert!(check(&err), "call failed with an unexpected error: {err}");
        err
    }

    fn should_fail_with_error<U>(self, expect: U) -> E
    where
        U: Display,
    {
        let err = self.should_fail();
        let expect = expect.to_string();
        assert!(
            err.to_string().contains(&expect),
            "call failed with `{err}`, expected `{expect}`"
        );
        err
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_matches_by_substring() {
        let result: Result<(), String> = Err("insufficient funds: 5bnb".to_string());
        result.should_fail_with_error("5bnb");
    }

    #[test]
    #[should_panic(expected = "call succeeded with 7, expected an error")]
    fn success_is_not_a_failure() {
        Ok::<_, String>(7).should_fail();
    }

    #[test]
    #[should_panic(expected = "call returned 7, expected 8")]
    fn success_value_is_compared() {
        Ok::<_, String>(7).should_succeed_and_equal(8);
    }
}
