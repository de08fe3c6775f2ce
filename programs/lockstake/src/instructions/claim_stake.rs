//! Claim instruction handler.
//!
//! Settles a matured stake: principal plus the full-period reward.
//!
//! The ledger entry is erased and the event emitted *before* the outbound
//! transfer, so a reentrant call observes post-transition state and cannot
//! replay the stake. This mutate-then-notify-then-transfer ordering is a
//! correctness requirement across all exit paths.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::StakeClaimed;
use crate::state::{Config, StakeLedger};

/// Accounts required for claiming a matured stake.
#[derive(Accounts)]
pub struct ClaimStake<'info> {
    /// The holder claiming.
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = vault @ StakingError::VaultMismatch
    )]
    pub config: Account<'info, Config>,

    /// The holder's stake ledger.
    #[account(
        mut,
        seeds = [LEDGER_SEED, user.key().as_ref()],
        bump = ledger.bump,
        constraint = ledger.owner == user.key() @ StakingError::InvalidLedgerOwner
    )]
    pub ledger: Account<'info, StakeLedger>,

    /// Holder's token account receiving principal plus reward.
    #[account(
        mut,
        constraint = user_token_account.mint == config.staking_mint @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Engine custody vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Claim a matured stake.
///
/// `now == lock_time` counts as matured. The reward is computed over the
/// full lock window at the snapshotted APR — exactly the amount escrowed at
/// open time.
pub fn handler(ctx: Context<ClaimStake>, stake_id: u64) -> Result<()> {
    let ledger = &ctx.accounts.ledger;
    let clock = Clock::get()?;

    let record = *ledger
        .find(stake_id)
        .ok_or(StakingError::StakeNotFound)?;

    require!(
        record.is_matured(clock.unix_timestamp),
        StakingError::LockNotElapsed
    );

    let reward = record.full_period_reward()?;
    let payout = record
        .amount
        .checked_add(reward)
        .ok_or(StakingError::MathOverflow)?;

    // Erase before paying out.
    let ledger = &mut ctx.accounts.ledger;
    ledger.remove(stake_id)?;

    emit!(StakeClaimed {
        owner: ctx.accounts.user.key(),
        stake_id,
        amount: record.amount,
        reward,
    });

    msg!("Stake {} claimed", stake_id);
    msg!("Principal: {}, reward: {}", record.amount, reward);

    let config = &ctx.accounts.config;
    let seeds = &[CONFIG_SEED, &[config.bump]];
    let signer_seeds = &[&seeds[..]];
    let cpi_accounts = Transfer {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.config.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, payout)?;

    Ok(())
}
