//! Read-only query handlers.
//!
//! Return-data instructions so the capped accrued-reward computation lives
//! in the program, next to the arithmetic it must agree with.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{Pool, StakeLedger};

/// A single stake record, as returned to callers.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct StakeView {
    pub id: u64,
    pub pool_id: u64,
    pub amount: u64,
    pub start_time: i64,
    pub lock_time: i64,
    pub apr_bps: u16,
    /// Escrow held for this stake: the full-period reward.
    pub full_period_reward: u64,
}

/// An active stake with its live accrued-to-date reward.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ActiveStakeView {
    pub id: u64,
    pub pool_id: u64,
    pub amount: u64,
    pub start_time: i64,
    pub lock_time: i64,
    pub apr_bps: u16,
    /// Reward accrued up to now, capped at maturity.
    pub accrued_reward: u64,
    pub matured: bool,
}

/// A pool's current terms, as returned to callers.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct PoolView {
    pub pool_id: u64,
    pub minimum_to_stake: u64,
    pub apr_bps: u16,
    pub lock_period: i64,
    pub unstake_fee_bps: u16,
    pub created_at: i64,
}

/// Accounts for reading a pool.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct ViewPool<'info> {
    #[account(
        seeds = [POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

/// Accounts for reading a holder's ledger.
#[derive(Accounts)]
pub struct ViewStakes<'info> {
    /// The holder whose ledger is being read.
    /// CHECK: only used as the ledger PDA seed; no data is read from it.
    pub owner: UncheckedAccount<'info>,

    #[account(
        seeds = [LEDGER_SEED, owner.key().as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, StakeLedger>,
}

/// Fetch a pool's current terms by id.
pub fn get_pool_handler(ctx: Context<ViewPool>, _pool_id: u64) -> Result<PoolView> {
    let pool = &ctx.accounts.pool;
    Ok(PoolView {
        pool_id: pool.pool_id,
        minimum_to_stake: pool.minimum_to_stake,
        apr_bps: pool.apr_bps,
        lock_period: pool.lock_period,
        unstake_fee_bps: pool.unstake_fee_bps,
        created_at: pool.created_at,
    })
}

/// Fetch a single stake record by id.
pub fn get_stake_handler(ctx: Context<ViewStakes>, stake_id: u64) -> Result<StakeView> {
    let record = ctx
        .accounts
        .ledger
        .find(stake_id)
        .ok_or(StakingError::StakeNotFound)?;

    Ok(StakeView {
        id: record.id,
        pool_id: record.pool_id,
        amount: record.amount,
        start_time: record.start_time,
        lock_time: record.lock_time,
        apr_bps: record.apr_bps,
        full_period_reward: record.full_period_reward()?,
    })
}

/// Fetch all of a holder's active stakes with live accrued rewards.
pub fn get_active_stakes_handler(ctx: Context<ViewStakes>) -> Result<Vec<ActiveStakeView>> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    ctx.accounts
        .ledger
        .stakes
        .iter()
        .map(|record| {
            Ok(ActiveStakeView {
                id: record.id,
                pool_id: record.pool_id,
                amount: record.amount,
                start_time: record.start_time,
                lock_time: record.lock_time,
                apr_bps: record.apr_bps,
                accrued_reward: record.accrued_reward(now)?,
                matured: record.is_matured(now),
            })
        })
        .collect()
}
