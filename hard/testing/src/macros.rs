/// Builds a [`BTreeMap`](std::collections::BTreeMap) with the given key-value pairs.
#[macro_export]
macro_rules! btree_map {
    ($($key:expr => $value:expr),* $(,)?) => {{
        ::std::collections::BTreeMap::from([
            $(($key, $value),)*
        ])
    }};
}

/// Builds a [`Coins`](hard_types::Coins) from denom-amount pairs, e.g.
/// `coins! { "bnb" => 100, "ukava" => 5 }`. Panics on invalid input.
#[macro_export]
macro_rules! coins {
    ($($denom:expr => $amount:expr),* $(,)?) => {{
        ::hard_types::Coins::try_from(::std::vec![
            $(::hard_types::Coin::new($denom, $amount as i128).unwrap(),)*
        ])
        .unwrap()
    }};
}
