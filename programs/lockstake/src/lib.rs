//! # Lockstake Program
//!
//! A pool-based, time-locked staking engine. The admin defines pools, each
//! fixing a minimum deposit, an annualized APR (basis points), a lock
//! duration, and an early-exit penalty. Every deposit becomes an independent
//! stake that accrues linearly at the APR snapshotted when it opened.
//!
//! ## Features
//! - Pre-funded reward escrow: the full lock-period reward is pulled from a
//!   reward source into custody when a stake opens, so the vault always
//!   covers principal plus promised reward for every active stake
//! - Maturity claim pays principal plus the full-period reward
//! - Early exit returns the escrow to the source, charges the pool's
//!   current fee on principal, and pays out the remainder
//! - Per-field pool administration; APR edits are not retroactive (open-time
//!   snapshot), fee edits are (live lookup at exit)
//! - Read-only queries with accrued-to-date rewards, capped at maturity

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod rewards;
pub mod state;

use instructions::*;

#[program]
pub mod lockstake {
    use super::*;

    /// Initializes the engine: config account, custody vault, reward source
    /// and fee collector addresses.
    ///
    /// # Errors
    /// Returns an error if either token account is for the wrong mint.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Creates a staking pool with the next sequential id (admin only).
    ///
    /// # Arguments
    /// * `pool_id` - Must equal `total_pools + 1` (the PDA is derived from it)
    /// * `minimum_to_stake` - Smallest accepted principal
    /// * `apr_bps` - Annualized rate in basis points (10000 = 100%)
    /// * `lock_period` - Seconds until maturity
    /// * `unstake_fee_bps` - Early-exit penalty in basis points
    pub fn create_pool(
        ctx: Context<CreatePool>,
        pool_id: u64,
        minimum_to_stake: u64,
        apr_bps: u16,
        lock_period: i64,
        unstake_fee_bps: u16,
    ) -> Result<()> {
        instructions::admin::create_pool_handler(
            ctx,
            pool_id,
            minimum_to_stake,
            apr_bps,
            lock_period,
            unstake_fee_bps,
        )
    }

    /// Updates a pool's minimum principal (admin only).
    pub fn set_pool_minimum(ctx: Context<UpdatePool>, pool_id: u64, value: u64) -> Result<()> {
        instructions::admin::set_pool_minimum_handler(ctx, pool_id, value)
    }

    /// Updates a pool's APR (admin only). Existing stakes keep the APR they
    /// snapshotted at open time.
    pub fn set_pool_apr(ctx: Context<UpdatePool>, pool_id: u64, value: u16) -> Result<()> {
        instructions::admin::set_pool_apr_handler(ctx, pool_id, value)
    }

    /// Updates a pool's lock period (admin only). Only affects stakes opened
    /// afterwards.
    pub fn set_pool_lock_period(ctx: Context<UpdatePool>, pool_id: u64, value: i64) -> Result<()> {
        instructions::admin::set_pool_lock_period_handler(ctx, pool_id, value)
    }

    /// Updates a pool's early-exit fee (admin only). Applies to every future
    /// early exit, including stakes already open.
    pub fn set_pool_unstake_fee(ctx: Context<UpdatePool>, pool_id: u64, value: u16) -> Result<()> {
        instructions::admin::set_pool_unstake_fee_handler(ctx, pool_id, value)
    }

    /// Updates the reward source address (admin only).
    pub fn set_reward_source(ctx: Context<UpdateTokenAccount>) -> Result<()> {
        instructions::admin::set_reward_source_handler(ctx)
    }

    /// Updates the fee collector address (admin only).
    pub fn set_fee_collector(ctx: Context<UpdateTokenAccount>) -> Result<()> {
        instructions::admin::set_fee_collector_handler(ctx)
    }

    /// Transfers the admin identity to a new address (admin only).
    pub fn set_admin(ctx: Context<AdminConfig>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::set_admin_handler(ctx, new_admin)
    }

    /// Opens a stake against a pool and returns the new stake id.
    ///
    /// Pulls `amount` from the caller and the full lock-period reward from
    /// the reward source into custody. Either transfer failing aborts the
    /// whole operation.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The pool does not exist
    /// - `amount` is below the pool minimum
    /// - The holder's ledger is at capacity
    /// - A transfer fails (insufficient balance or delegate approval)
    pub fn open_stake(ctx: Context<OpenStake>, pool_id: u64, amount: u64) -> Result<u64> {
        instructions::open_stake::handler(ctx, pool_id, amount)
    }

    /// Claims a matured stake: principal plus the full-period reward.
    /// `now == lock_time` counts as matured.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The caller has no active stake with this id
    /// - The lock has not elapsed
    pub fn claim_stake(ctx: Context<ClaimStake>, stake_id: u64) -> Result<()> {
        instructions::claim_stake::handler(ctx, stake_id)
    }

    /// Exits a stake before maturity: escrow back to the reward source, the
    /// pool's current fee to the collector, net principal to the caller.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The caller has no active stake with this id
    /// - The stake is at or past maturity (use `claim_stake`)
    pub fn exit_early(ctx: Context<ExitEarly>, stake_id: u64) -> Result<()> {
        instructions::exit_early::handler(ctx, stake_id)
    }

    /// Fetches a pool's current terms by id.
    pub fn get_pool(ctx: Context<ViewPool>, pool_id: u64) -> Result<PoolView> {
        instructions::views::get_pool_handler(ctx, pool_id)
    }

    /// Fetches a single stake record by id.
    pub fn get_stake(ctx: Context<ViewStakes>, stake_id: u64) -> Result<StakeView> {
        instructions::views::get_stake_handler(ctx, stake_id)
    }

    /// Fetches all of a holder's active stakes with live accrued rewards,
    /// capped at maturity.
    pub fn get_active_stakes(ctx: Context<ViewStakes>) -> Result<Vec<ActiveStakeView>> {
        instructions::views::get_active_stakes_handler(ctx)
    }
}
