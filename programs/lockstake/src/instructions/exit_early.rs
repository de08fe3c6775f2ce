//! Early exit instruction handler.
//!
//! Terminates a stake before maturity: the holder forfeits the reward (the
//! escrow goes back to the reward source) and pays a penalty on principal.
//!
//! The fee is read *live* from the pool — a fee edit after open applies
//! here — while the escrow is computed at the snapshotted APR over the full
//! original lock window, matching what was pulled at open time.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::StakeExitedEarly;
use crate::rewards;
use crate::state::{Config, Pool, StakeLedger};

/// Accounts required for an early exit.
#[derive(Accounts)]
pub struct ExitEarly<'info> {
    /// The holder exiting.
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = vault @ StakingError::VaultMismatch,
        has_one = reward_source @ StakingError::RewardSourceMismatch,
        has_one = fee_collector @ StakingError::FeeCollectorMismatch
    )]
    pub config: Account<'info, Config>,

    /// The pool the stake was opened against; supplies the live fee.
    #[account(
        seeds = [POOL_SEED, pool.pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// The holder's stake ledger.
    #[account(
        mut,
        seeds = [LEDGER_SEED, user.key().as_ref()],
        bump = ledger.bump,
        constraint = ledger.owner == user.key() @ StakingError::InvalidLedgerOwner
    )]
    pub ledger: Account<'info, StakeLedger>,

    /// Holder's token account receiving the net principal.
    #[account(
        mut,
        constraint = user_token_account.mint == config.staking_mint @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Engine custody vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Reward source the forfeited escrow is returned to.
    #[account(mut)]
    pub reward_source: Account<'info, TokenAccount>,

    /// Fee collector receiving the penalty.
    #[account(mut)]
    pub fee_collector: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Exit a stake before maturity.
///
/// Fails with `AlreadyMatured` at or past `lock_time` — the correct call
/// there is `claim`. Settlement order after the ledger erase: escrow back to
/// the reward source, fee to the collector (skipped when zero), net
/// principal to the holder.
pub fn handler(ctx: Context<ExitEarly>, stake_id: u64) -> Result<()> {
    let ledger = &ctx.accounts.ledger;
    let pool = &ctx.accounts.pool;
    let clock = Clock::get()?;

    let record = *ledger
        .find(stake_id)
        .ok_or(StakingError::StakeNotFound)?;

    require!(
        !record.is_matured(clock.unix_timestamp),
        StakingError::AlreadyMatured
    );
    require!(pool.pool_id == record.pool_id, StakingError::PoolMismatch);

    // Live fee lookup; the open-time fee is irrelevant.
    let fee = rewards::exit_fee(record.amount, pool.unstake_fee_bps)?;
    let net = record
        .amount
        .checked_sub(fee)
        .ok_or(StakingError::MathUnderflow)?;
    // The full pre-funded escrow, regardless of elapsed time.
    let escrow = record.full_period_reward()?;

    // Erase before any value movement.
    let ledger = &mut ctx.accounts.ledger;
    ledger.remove(stake_id)?;

    emit!(StakeExitedEarly {
        owner: ctx.accounts.user.key(),
        stake_id,
        net_amount: net,
        fee,
        escrow_returned: escrow,
    });

    msg!("Stake {} exited early", stake_id);
    msg!("Net: {}, fee: {}, escrow returned: {}", net, fee, escrow);

    let config = &ctx.accounts.config;
    let seeds = &[CONFIG_SEED, &[config.bump]];
    let signer_seeds = &[&seeds[..]];
    let token_program = ctx.accounts.token_program.to_account_info();

    if escrow > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.vault.to_account_info(),
            to: ctx.accounts.reward_source.to_account_info(),
            authority: ctx.accounts.config.to_account_info(),
        };
        let cpi_ctx =
            CpiContext::new_with_signer(token_program.clone(), cpi_accounts, signer_seeds);
        token::transfer(cpi_ctx, escrow)?;
    }

    if fee > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.vault.to_account_info(),
            to: ctx.accounts.fee_collector.to_account_info(),
            authority: ctx.accounts.config.to_account_info(),
        };
        let cpi_ctx =
            CpiContext::new_with_signer(token_program.clone(), cpi_accounts, signer_seeds);
        token::transfer(cpi_ctx, fee)?;
    }

    let cpi_accounts = Transfer {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.config.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(token_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, net)?;

    Ok(())
}
