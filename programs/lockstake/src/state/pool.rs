use anchor_lang::prelude::*;

/// One set of staking terms, created by the admin and never deleted.
///
/// Every field is admin-mutable after creation. Edits to `apr_bps` are not
/// retroactive — stakes snapshot it at open time — while edits to
/// `unstake_fee_bps` are: the fee is read live from the pool at exit time.
/// That asymmetry is a deliberate contract of the engine.
#[account]
pub struct Pool {
    /// Sequential id, assigned from 1.
    pub pool_id: u64,
    /// Smallest accepted principal.
    pub minimum_to_stake: u64,
    /// Annualized reward rate in basis points (10000 = 100%).
    pub apr_bps: u16,
    /// Seconds until maturity for stakes opened against this pool.
    pub lock_period: i64,
    /// Early-exit penalty in basis points, charged on principal.
    pub unstake_fee_bps: u16,
    /// Creation timestamp.
    pub created_at: i64,
    pub bump: u8,
}

impl Pool {
    pub const LEN: usize = 8
        + 8
        + 8
        + 2
        + 8
        + 2
        + 8
        + 1;
}
