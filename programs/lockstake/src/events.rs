//! Observable events, one per state transition.
//!
//! Every lifecycle transition and every administrative change emits exactly
//! one event, after the ledger mutation it describes and before any outbound
//! transfer.

use anchor_lang::prelude::*;

/// Which pool field an admin edit touched.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolField {
    MinimumToStake,
    AprBps,
    LockPeriod,
    UnstakeFeeBps,
}

#[event]
pub struct StakeOpened {
    pub owner: Pubkey,
    pub stake_id: u64,
    pub pool_id: u64,
    pub amount: u64,
    pub start_time: i64,
    pub lock_time: i64,
    pub apr_bps: u16,
    /// Full-period reward pulled into custody up front.
    pub escrow: u64,
}

#[event]
pub struct StakeClaimed {
    pub owner: Pubkey,
    pub stake_id: u64,
    pub amount: u64,
    pub reward: u64,
}

#[event]
pub struct StakeExitedEarly {
    pub owner: Pubkey,
    pub stake_id: u64,
    /// Principal minus fee, paid to the holder.
    pub net_amount: u64,
    pub fee: u64,
    /// Escrow returned to the reward source.
    pub escrow_returned: u64,
}

#[event]
pub struct PoolCreated {
    pub pool_id: u64,
    pub minimum_to_stake: u64,
    pub apr_bps: u16,
    pub lock_period: i64,
    pub unstake_fee_bps: u16,
}

#[event]
pub struct PoolUpdated {
    pub pool_id: u64,
    pub field: PoolField,
    pub old_value: u64,
    pub new_value: u64,
}

#[event]
pub struct RewardSourceUpdated {
    pub old_reward_source: Pubkey,
    pub new_reward_source: Pubkey,
}

#[event]
pub struct FeeCollectorUpdated {
    pub old_fee_collector: Pubkey,
    pub new_fee_collector: Pubkey,
}

#[event]
pub struct AdminUpdated {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
