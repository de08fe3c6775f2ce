//! Open stake instruction handler.
//!
//! Pulls the deposit and the full-period reward escrow into custody, then
//! records the new stake on the holder's ledger.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::StakeOpened;
use crate::rewards;
use crate::state::{Config, Pool, StakeLedger, StakeRecord};

/// Accounts required for opening a stake.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct OpenStake<'info> {
    /// The holder opening the stake.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The global config; holds the stake nonce.
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = vault @ StakingError::VaultMismatch,
        has_one = reward_source @ StakingError::RewardSourceMismatch
    )]
    pub config: Account<'info, Config>,

    /// The pool the stake is opened against.
    #[account(
        seeds = [POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// The holder's stake ledger (created on first stake).
    #[account(
        init_if_needed,
        payer = user,
        space = StakeLedger::LEN,
        seeds = [LEDGER_SEED, user.key().as_ref()],
        bump
    )]
    pub ledger: Account<'info, StakeLedger>,

    /// Holder's token account the principal is pulled from.
    #[account(
        mut,
        constraint = user_token_account.mint == config.staking_mint @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Engine custody vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Reward source the escrow is pulled from. The config PDA must be its
    /// approved delegate; the transfer fails otherwise and aborts the open.
    #[account(mut)]
    pub reward_source: Account<'info, TokenAccount>,

    /// System program.
    pub system_program: Program<'info, System>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar.
    pub rent: Sysvar<'info, Rent>,
}

/// Open a stake against a pool.
///
/// Pulls `amount` from the caller and the full lock-period reward from the
/// reward source into custody, then records the stake. Either pull failing
/// aborts the whole operation with no state change. Returns the new stake id.
pub fn handler(ctx: Context<OpenStake>, pool_id: u64, amount: u64) -> Result<u64> {
    let config = &ctx.accounts.config;
    let pool = &ctx.accounts.pool;

    require!(config.pool_exists(pool_id), StakingError::PoolNotFound);
    require!(
        amount >= pool.minimum_to_stake,
        StakingError::BelowPoolMinimum
    );
    require!(
        ctx.accounts.ledger.stakes.len() < MAX_ACTIVE_STAKES,
        StakingError::StakeLimitReached
    );

    let clock = Clock::get()?;
    let start_time = clock.unix_timestamp;
    let lock_time = start_time
        .checked_add(pool.lock_period)
        .ok_or(StakingError::MathOverflow)?;

    // Escrow the full lock-period reward up front, at the APR the stake
    // snapshots. Both exit paths settle exactly this amount.
    let escrow = rewards::full_period_reward(start_time, lock_time, pool.apr_bps, amount)?;

    // Pull the principal from the caller.
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        authority: ctx.accounts.user.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    // Pull the escrow from the reward source, signing as its delegate. A
    // zero-APR stake escrows nothing and skips the pull.
    if escrow > 0 {
        let seeds = &[CONFIG_SEED, &[config.bump]];
        let signer_seeds = &[&seeds[..]];
        let cpi_accounts = Transfer {
            from: ctx.accounts.reward_source.to_account_info(),
            to: ctx.accounts.vault.to_account_info(),
            authority: ctx.accounts.config.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );
        token::transfer(cpi_ctx, escrow)?;
    }

    // Assign the next global stake id.
    let config = &mut ctx.accounts.config;
    let stake_id = config.next_stake_id;
    config.next_stake_id = stake_id
        .checked_add(1)
        .ok_or(StakingError::MathOverflow)?;

    // Record the stake on the holder's ledger.
    let ledger = &mut ctx.accounts.ledger;
    if ledger.owner == Pubkey::default() {
        ledger.owner = ctx.accounts.user.key();
        ledger.bump = ctx.bumps.ledger;
    }
    ledger.push(StakeRecord {
        id: stake_id,
        pool_id,
        amount,
        start_time,
        lock_time,
        apr_bps: ctx.accounts.pool.apr_bps,
    })?;

    emit!(StakeOpened {
        owner: ctx.accounts.user.key(),
        stake_id,
        pool_id,
        amount,
        start_time,
        lock_time,
        apr_bps: ctx.accounts.pool.apr_bps,
        escrow,
    });

    msg!("Stake {} opened against pool {}", stake_id, pool_id);
    msg!("Principal: {}, escrow: {}", amount, escrow);

    Ok(stake_id)
}
