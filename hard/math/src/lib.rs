mod error;
mod int;
mod is_zero;
mod udec;

pub use {error::*, int::*, is_zero::*, udec::*};
