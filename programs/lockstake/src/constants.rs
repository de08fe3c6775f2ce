//! Program constants for the Lockstake program.
//!
//! This module defines all constant values used throughout the staking program,
//! including PDA seeds, time periods, and precision values.

/// Seed for deriving the global config PDA
pub const CONFIG_SEED: &[u8] = b"config";

/// Seed for deriving staking pool PDAs (suffixed with the pool id)
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for deriving per-holder stake ledger PDAs
pub const LEDGER_SEED: &[u8] = b"ledger";

/// Seed for deriving the custody vault PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Number of seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Basis points denominator (100% = 10000 basis points)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Maximum number of simultaneously active stakes per holder.
///
/// Ledger accounts are fixed-size, so the active set is capped. This also
/// bounds the linear scan used for removal by id.
pub const MAX_ACTIVE_STAKES: usize = 32;

/// First stake id handed out by the engine. Id 0 is never assigned.
pub const FIRST_STAKE_ID: u64 = 1;
