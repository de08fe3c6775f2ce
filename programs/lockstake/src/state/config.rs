use anchor_lang::prelude::*;

/// Global engine configuration and counters.
///
/// The two counters are the only global mutable state: `total_pools` is the
/// highest pool id assigned so far (ids are dense from 1), and
/// `next_stake_id` is the globally monotonic stake nonce shared across all
/// holders. Both are incremented inside the instruction that consumes them.
#[account]
pub struct Config {
    /// The privileged identity for pool administration.
    pub admin: Pubkey,
    /// Mint of the staked token. Locked at initialization.
    pub staking_mint: Pubkey,
    /// Custody vault holding every active stake's principal plus its
    /// pre-funded escrow. PDA-owned, locked at initialization.
    pub vault: Pubkey,
    /// Token account escrow rewards are pulled from. Must have approved the
    /// config PDA as its delegate; admin-updatable.
    pub reward_source: Pubkey,
    /// Token account early-exit penalties are paid to; admin-updatable.
    pub fee_collector: Pubkey,

    /// Highest pool id assigned so far.
    pub total_pools: u64,
    /// Next stake id to hand out.
    pub next_stake_id: u64,

    pub bump: u8,
    pub vault_bump: u8,
}

impl Config {
    pub const LEN: usize = 8
        + (32 * 5)
        + (8 * 2)
        + 2;

    /// Existence test for pool ids: dense and increasing from 1. Id 0 is
    /// reserved and always fails.
    pub fn pool_exists(&self, pool_id: u64) -> bool {
        pool_id >= 1 && pool_id <= self.total_pools
    }
}
