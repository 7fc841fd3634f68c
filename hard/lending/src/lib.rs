mod config;
pub mod core;
mod error;
mod execute;
mod ledger;
mod query;
mod state;
mod traits;
mod types;

pub use {
    config::*, error::*, execute::*, ledger::*, query::*, state::*, traits::*, types::*,
};
