/// Initialize instruction handler.
///
/// Creates the global config and the custody vault, and wires up the reward
/// source and fee collector addresses.
///
/// ## Security Guarantees
/// - The vault is a PDA token account with the config PDA as authority
/// - The mint is locked to config state permanently
/// - Reward source and fee collector are validated against the mint

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::state::Config;

/// Accounts required for engine initialization.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The admin authority that will control pool administration.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The global config account to be created.
    #[account(
        init,
        payer = authority,
        space = Config::LEN,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    /// The mint of the staked token.
    pub staking_mint: Account<'info, Mint>,

    /// The custody vault holding every active stake's principal plus its
    /// pre-funded escrow.
    /// SECURITY:
    /// - PDA derived from VAULT_SEED + config
    /// - Authority set to the config PDA (cannot be changed)
    #[account(
        init,
        payer = authority,
        seeds = [VAULT_SEED, config.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = config
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Token account escrow rewards will be pulled from. Its owner must
    /// approve the config PDA as delegate before the first stake opens; a
    /// missing or insufficient approval surfaces as a failed transfer.
    #[account(
        constraint = reward_source.mint == staking_mint.key() @ StakingError::MintMismatch
    )]
    pub reward_source: Account<'info, TokenAccount>,

    /// Token account early-exit penalties will be paid to.
    #[account(
        constraint = fee_collector.mint == staking_mint.key() @ StakingError::MintMismatch
    )]
    pub fee_collector: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for token account operations.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar for rent-exempt calculations.
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize the staking engine.
///
/// Pool and stake counters start empty; the first pool gets id 1 and the
/// first stake gets id 1. Id 0 is never assigned on either side.
pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let config = &mut ctx.accounts.config;

    config.admin = ctx.accounts.authority.key();
    config.staking_mint = ctx.accounts.staking_mint.key(); // LOCKED - never changes
    config.vault = ctx.accounts.vault.key(); // LOCKED - PDA reference
    config.reward_source = ctx.accounts.reward_source.key();
    config.fee_collector = ctx.accounts.fee_collector.key();
    config.total_pools = 0;
    config.next_stake_id = FIRST_STAKE_ID;
    config.bump = ctx.bumps.config;
    config.vault_bump = ctx.bumps.vault;

    msg!("Lockstake engine initialized");
    msg!("Admin: {}", config.admin);
    msg!("Mint: {}", config.staking_mint);
    msg!("Reward source: {}", config.reward_source);
    msg!("Fee collector: {}", config.fee_collector);

    Ok(())
}
