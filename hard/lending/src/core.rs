mod interest;
mod payment;
mod risk;
mod solvency;

pub use {interest::*, payment::*, risk::*, solvency::*};

#[cfg(test)]
pub(crate) mod testing;
