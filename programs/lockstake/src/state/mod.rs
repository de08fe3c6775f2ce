//! State structures for the Lockstake program.
//!
//! This module defines all account structures used to store program state.

pub mod config;
pub mod pool;
pub mod stake_ledger;

pub use config::*;
pub use pool::*;
pub use stake_ledger::*;
