//! Error types for the Lockstake program.
//!
//! Two families, mirroring the engine's failure model: precondition
//! violations (surfaced immediately, no partial state change) and math
//! faults. Transfer failures are not listed here — they propagate unmodified
//! from the token program and abort the whole instruction.

use anchor_lang::prelude::*;

/// Custom error codes for the Lockstake program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Precondition Violations ==========

    /// The pool id is 0 or exceeds the highest assigned id.
    #[msg("Staking pool not found")]
    PoolNotFound,

    /// The caller has no active stake with this id.
    #[msg("No active stake with this id")]
    StakeNotFound,

    /// Principal is below the pool's minimum.
    #[msg("Amount is below the pool minimum")]
    BelowPoolMinimum,

    /// The holder's ledger is at capacity.
    #[msg("Active stake limit reached for this holder")]
    StakeLimitReached,

    /// Pool ids are assigned sequentially; the supplied id is not the next one.
    #[msg("Pool id must be the next sequential id")]
    PoolIdOutOfSequence,

    /// Caller is not the privileged admin.
    #[msg("Unauthorized: caller is not the admin")]
    Unauthorized,

    /// The zero address is not a valid admin.
    #[msg("New admin cannot be the zero address")]
    ZeroAddress,

    // ========== Time/Lock Errors ==========

    /// The stake's lock duration has not yet elapsed.
    #[msg("Lock period has not elapsed - cannot claim yet")]
    LockNotElapsed,

    /// The stake is at or past maturity; the correct call is claim.
    #[msg("Stake already matured - use claim instead of early exit")]
    AlreadyMatured,

    /// Time window ends before it starts.
    #[msg("Invalid time window")]
    InvalidTimestamp,

    // ========== Math/Overflow Errors ==========

    /// Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// Arithmetic underflow occurred during calculation.
    #[msg("Arithmetic underflow occurred during calculation")]
    MathUnderflow,

    /// Integer conversion failed (value out of range).
    #[msg("Integer conversion failed - value out of range")]
    ConversionOverflow,

    // ========== Account Validation Errors ==========

    /// The provided token account is for the wrong mint.
    #[msg("Token mint mismatch - wrong token for this engine")]
    MintMismatch,

    /// The provided vault does not match the config's custody vault.
    #[msg("Custody vault address mismatch")]
    VaultMismatch,

    /// The provided reward source does not match the configured address.
    #[msg("Reward source address mismatch")]
    RewardSourceMismatch,

    /// The provided fee collector does not match the configured address.
    #[msg("Fee collector address mismatch")]
    FeeCollectorMismatch,

    /// The provided pool does not match the stake's pool.
    #[msg("Pool does not match the stake's pool")]
    PoolMismatch,

    /// Ledger account does not belong to the caller.
    #[msg("Stake ledger does not belong to the caller")]
    InvalidLedgerOwner,
}
