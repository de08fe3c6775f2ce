//! Instruction handlers for the Lockstake program.
//!
//! This module contains all instruction implementations.

pub mod admin;
pub mod claim_stake;
pub mod exit_early;
pub mod initialize;
pub mod open_stake;
pub mod views;

pub use admin::*;
pub use claim_stake::*;
pub use exit_early::*;
pub use initialize::*;
pub use open_stake::*;
pub use views::*;
