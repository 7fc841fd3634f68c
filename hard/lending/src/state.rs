use {
    crate::{Params, Position, Side},
    hard_math::Udec256,
    hard_storage::{Item, Map, Set},
    hard_types::{Addr, Coins, Denom},
};

pub const PARAMS: Item<Params> = Item::new("params");

/// Global supply-side interest accumulator of each denom.
pub const SUPPLY_INTEREST_FACTORS: Map<&Denom, Udec256> = Map::new("supply_factor");

/// Global borrow-side interest accumulator of each denom.
pub const BORROW_INTEREST_FACTORS: Map<&Denom, Udec256> = Map::new("borrow_factor");

pub const DEPOSITS: Map<&Addr, Position> = Map::new("deposit");

pub const BORROWS: Map<&Addr, Position> = Map::new("borrow");

/// Total amount of each denom owed to the pool, including synced interest.
pub const TOTAL_BORROWED: Item<Coins> = Item::new("total_borrowed");

/// Accounts holding both a deposit and a borrow, ordered by loan-to-value
/// ratio.
pub const LTV_INDEX: Set<(Udec256, &Addr)> = Set::new("ltv_index");

/// The ratio each account is currently filed under in `LTV_INDEX`.
pub const LTV_BY_ACCOUNT: Map<&Addr, Udec256> = Map::new("ltv_by_account");

/// The interest factors of the given side.
pub fn interest_factors(side: Side) -> Map<'static, &'static Denom, Udec256> {
    match side {
        Side::Supply => SUPPLY_INTEREST_FACTORS,
        Side::Borrow => BORROW_INTEREST_FACTORS,
    }
}

/// The position records of the given side.
pub fn positions(side: Side) -> Map<'static, &'static Addr, Position> {
    match side {
        Side::Supply => DEPOSITS,
        Side::Borrow => BORROWS,
    }
}
