/// Admin instruction handlers.
///
/// Pool creation, per-field pool edits, and config address updates.
///
/// ## Security Guarantees
/// - All admin functions require signer == config.admin
/// - Pool edits never touch existing stakes: APR changes only affect stakes
///   opened afterwards (open-time snapshot), fee changes take effect for
///   every future early exit (live lookup)

use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{
    AdminUpdated, FeeCollectorUpdated, PoolCreated, PoolField, PoolUpdated, RewardSourceUpdated,
};
use crate::state::{Config, Pool};

/// Accounts for config-only admin operations.
#[derive(Accounts)]
pub struct AdminConfig<'info> {
    /// SECURITY: Must be signer AND match config.admin.
    #[account(
        constraint = authority.key() == config.admin @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, Config>,
}

/// Accounts for updating the reward source or fee collector address.
#[derive(Accounts)]
pub struct UpdateTokenAccount<'info> {
    #[account(
        constraint = authority.key() == config.admin @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, Config>,

    /// The replacement token account.
    #[account(
        constraint = new_account.mint == config.staking_mint @ StakingError::MintMismatch
    )]
    pub new_account: Account<'info, TokenAccount>,
}

/// Accounts required for pool creation.
///
/// Pool ids are assigned sequentially, so the client derives the PDA for
/// `config.total_pools + 1` and passes the id explicitly; the handler
/// enforces the sequence.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct CreatePool<'info> {
    #[account(
        mut,
        constraint = authority.key() == config.admin @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = authority,
        space = Pool::LEN,
        seeds = [POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    pub system_program: Program<'info, System>,
}

/// Accounts for per-field pool edits.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct UpdatePool<'info> {
    #[account(
        constraint = authority.key() == config.admin @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

/// Create a new staking pool with the next sequential id.
///
/// No range validation on the terms: zero APR and zero fee are valid and
/// meaningful (a zero-APR pool escrows nothing, a zero-fee pool exits free).
pub fn create_pool_handler(
    ctx: Context<CreatePool>,
    pool_id: u64,
    minimum_to_stake: u64,
    apr_bps: u16,
    lock_period: i64,
    unstake_fee_bps: u16,
) -> Result<()> {
    let config = &mut ctx.accounts.config;

    let next_id = config
        .total_pools
        .checked_add(1)
        .ok_or(StakingError::MathOverflow)?;
    require!(pool_id == next_id, StakingError::PoolIdOutOfSequence);
    require!(lock_period >= 0, StakingError::InvalidTimestamp);

    let pool = &mut ctx.accounts.pool;
    let clock = Clock::get()?;

    pool.pool_id = pool_id;
    pool.minimum_to_stake = minimum_to_stake;
    pool.apr_bps = apr_bps;
    pool.lock_period = lock_period;
    pool.unstake_fee_bps = unstake_fee_bps;
    pool.created_at = clock.unix_timestamp;
    pool.bump = ctx.bumps.pool;

    config.total_pools = next_id;

    emit!(PoolCreated {
        pool_id,
        minimum_to_stake,
        apr_bps,
        lock_period,
        unstake_fee_bps,
    });

    msg!("Pool {} created", pool_id);
    msg!(
        "min={}, apr={}bp, lock={}s, fee={}bp",
        minimum_to_stake,
        apr_bps,
        lock_period,
        unstake_fee_bps
    );

    Ok(())
}

/// Update the pool's minimum principal.
pub fn set_pool_minimum_handler(ctx: Context<UpdatePool>, pool_id: u64, value: u64) -> Result<()> {
    require!(
        ctx.accounts.config.pool_exists(pool_id),
        StakingError::PoolNotFound
    );

    let pool = &mut ctx.accounts.pool;
    let old = pool.minimum_to_stake;
    pool.minimum_to_stake = value;

    emit!(PoolUpdated {
        pool_id,
        field: PoolField::MinimumToStake,
        old_value: old,
        new_value: value,
    });
    msg!("Pool {} minimum: {} -> {}", pool_id, old, value);

    Ok(())
}

/// Update the pool's APR.
///
/// Not retroactive: existing stakes carry the APR snapshotted when they
/// opened and keep accruing at it.
pub fn set_pool_apr_handler(ctx: Context<UpdatePool>, pool_id: u64, value: u16) -> Result<()> {
    require!(
        ctx.accounts.config.pool_exists(pool_id),
        StakingError::PoolNotFound
    );

    let pool = &mut ctx.accounts.pool;
    let old = pool.apr_bps;
    pool.apr_bps = value;

    emit!(PoolUpdated {
        pool_id,
        field: PoolField::AprBps,
        old_value: old as u64,
        new_value: value as u64,
    });
    msg!("Pool {} apr: {}bp -> {}bp", pool_id, old, value);

    Ok(())
}

/// Update the pool's lock period. Only affects stakes opened afterwards.
pub fn set_pool_lock_period_handler(
    ctx: Context<UpdatePool>,
    pool_id: u64,
    value: i64,
) -> Result<()> {
    require!(
        ctx.accounts.config.pool_exists(pool_id),
        StakingError::PoolNotFound
    );
    require!(value >= 0, StakingError::InvalidTimestamp);

    let pool = &mut ctx.accounts.pool;
    let old = pool.lock_period;
    pool.lock_period = value;

    emit!(PoolUpdated {
        pool_id,
        field: PoolField::LockPeriod,
        old_value: old as u64,
        new_value: value as u64,
    });
    msg!("Pool {} lock period: {}s -> {}s", pool_id, old, value);

    Ok(())
}

/// Update the pool's early-exit fee.
///
/// Retroactive: the fee is read live from the pool at exit time, so this
/// applies to every future early exit, including stakes already open.
pub fn set_pool_unstake_fee_handler(
    ctx: Context<UpdatePool>,
    pool_id: u64,
    value: u16,
) -> Result<()> {
    require!(
        ctx.accounts.config.pool_exists(pool_id),
        StakingError::PoolNotFound
    );

    let pool = &mut ctx.accounts.pool;
    let old = pool.unstake_fee_bps;
    pool.unstake_fee_bps = value;

    emit!(PoolUpdated {
        pool_id,
        field: PoolField::UnstakeFeeBps,
        old_value: old as u64,
        new_value: value as u64,
    });
    msg!("Pool {} unstake fee: {}bp -> {}bp", pool_id, old, value);

    Ok(())
}

/// Point the engine at a new reward source.
///
/// The new account's owner must approve the config PDA as delegate before
/// the next stake opens.
pub fn set_reward_source_handler(ctx: Context<UpdateTokenAccount>) -> Result<()> {
    let config = &mut ctx.accounts.config;

    let old = config.reward_source;
    config.reward_source = ctx.accounts.new_account.key();

    emit!(RewardSourceUpdated {
        old_reward_source: old,
        new_reward_source: config.reward_source,
    });
    msg!("Reward source: {} -> {}", old, config.reward_source);

    Ok(())
}

/// Point the engine at a new fee collector.
pub fn set_fee_collector_handler(ctx: Context<UpdateTokenAccount>) -> Result<()> {
    let config = &mut ctx.accounts.config;

    let old = config.fee_collector;
    config.fee_collector = ctx.accounts.new_account.key();

    emit!(FeeCollectorUpdated {
        old_fee_collector: old,
        new_fee_collector: config.fee_collector,
    });
    msg!("Fee collector: {} -> {}", old, config.fee_collector);

    Ok(())
}

/// Hand the privileged identity to a new address.
pub fn set_admin_handler(ctx: Context<AdminConfig>, new_admin: Pubkey) -> Result<()> {
    require!(new_admin != Pubkey::default(), StakingError::ZeroAddress);

    let config = &mut ctx.accounts.config;
    let old = config.admin;
    config.admin = new_admin;

    emit!(AdminUpdated {
        old_admin: old,
        new_admin,
    });
    msg!("Admin transferred: {} -> {}", old, new_admin);

    Ok(())
}
