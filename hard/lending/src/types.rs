mod market;
mod params;
mod position;

pub use {market::*, params::*, position::*};
