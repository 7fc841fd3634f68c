mod balance_tracker;
mod bank;
mod macros;
mod oracle;
mod suite;
mod tracing;

pub use {balance_tracker::*, bank::*, oracle::*, suite::*, tracing::*};
