mod bound;
mod codec;
mod item;
mod key;
mod map;
mod path;
mod set;
mod utils;

pub use {bound::*, codec::*, item::*, key::*, map::*, path::*, set::*, utils::*};
