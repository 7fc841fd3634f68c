mod address;
mod buffer;
mod coin;
mod coins;
mod denom;
mod error;
mod mock;
mod result;
mod storage;

pub use {
    address::*, buffer::*, coin::*, coins::*, denom::*, error::*, mock::*, result::*, storage::*,
};
