//! Lifecycle and accounting tests for the staking engine.
//!
//! Drives the pure state layer (ledger, pool terms, reward math) through
//! open/claim/exit sequences with simulated token balances, mirroring the
//! instruction handlers' logic and ordering. The engine's core guarantee is
//! checked throughout: custody always equals the sum over active stakes of
//! principal plus full-period reward.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_error::ProgramError;

use lockstake::rewards;
use lockstake::state::{Pool, StakeLedger, StakeRecord};

const THIRTY_DAYS: i64 = 2_592_000;

/// In-memory engine: one holder, simulated balances, handler-faithful logic.
struct Engine {
    pools: Vec<Pool>,
    ledger: StakeLedger,
    next_stake_id: u64,
    vault: u64,
    user: u64,
    reward_source: u64,
    fee_collector: u64,
}

impl Engine {
    fn new(user_balance: u64, reward_balance: u64) -> Self {
        Self {
            pools: vec![],
            ledger: StakeLedger {
                owner: Pubkey::new_unique(),
                bump: 255,
                stakes: vec![],
            },
            next_stake_id: 1,
            vault: 0,
            user: user_balance,
            reward_source: reward_balance,
            fee_collector: 0,
        }
    }

    fn create_pool(
        &mut self,
        minimum_to_stake: u64,
        apr_bps: u16,
        lock_period: i64,
        unstake_fee_bps: u16,
    ) -> u64 {
        let pool_id = self.pools.len() as u64 + 1;
        self.pools.push(Pool {
            pool_id,
            minimum_to_stake,
            apr_bps,
            lock_period,
            unstake_fee_bps,
            created_at: 0,
            bump: 254,
        });
        pool_id
    }

    fn pool(&self, pool_id: u64) -> Result<&Pool> {
        if pool_id < 1 || pool_id > self.pools.len() as u64 {
            return Err(lockstake::error::StakingError::PoolNotFound.into());
        }
        Ok(&self.pools[(pool_id - 1) as usize])
    }

    fn set_pool_apr(&mut self, pool_id: u64, value: u16) {
        self.pools[(pool_id - 1) as usize].apr_bps = value;
    }

    fn set_pool_unstake_fee(&mut self, pool_id: u64, value: u16) {
        self.pools[(pool_id - 1) as usize].unstake_fee_bps = value;
    }

    fn open(&mut self, pool_id: u64, amount: u64, now: i64) -> Result<u64> {
        let pool = self.pool(pool_id)?;
        require!(
            amount >= pool.minimum_to_stake,
            lockstake::error::StakingError::BelowPoolMinimum
        );

        let lock_time = now + pool.lock_period;
        let apr_bps = pool.apr_bps;
        let escrow = rewards::full_period_reward(now, lock_time, apr_bps, amount)?;

        // Both pulls must succeed or the open aborts with no state change.
        if self.user < amount {
            return Err(ProgramError::InsufficientFunds.into());
        }
        if self.reward_source < escrow {
            return Err(ProgramError::InsufficientFunds.into());
        }
        self.user -= amount;
        self.reward_source -= escrow;
        self.vault += amount + escrow;

        let stake_id = self.next_stake_id;
        self.next_stake_id += 1;
        self.ledger.push(StakeRecord {
            id: stake_id,
            pool_id,
            amount,
            start_time: now,
            lock_time,
            apr_bps,
        })?;
        Ok(stake_id)
    }

    fn claim(&mut self, stake_id: u64, now: i64) -> Result<u64> {
        let record = *self
            .ledger
            .find(stake_id)
            .ok_or(lockstake::error::StakingError::StakeNotFound)?;
        require!(
            record.is_matured(now),
            lockstake::error::StakingError::LockNotElapsed
        );

        let reward = record.full_period_reward()?;
        let payout = record.amount + reward;

        // Erase before paying out.
        self.ledger.remove(stake_id)?;
        self.vault -= payout;
        self.user += payout;
        Ok(payout)
    }

    fn exit_early(&mut self, stake_id: u64, now: i64) -> Result<(u64, u64)> {
        let record = *self
            .ledger
            .find(stake_id)
            .ok_or(lockstake::error::StakingError::StakeNotFound)?;
        require!(
            !record.is_matured(now),
            lockstake::error::StakingError::AlreadyMatured
        );

        // Fee is read live from the pool, not from any open-time snapshot.
        let fee_bps = self.pool(record.pool_id)?.unstake_fee_bps;
        let fee = rewards::exit_fee(record.amount, fee_bps)?;
        let net = record.amount - fee;
        let escrow = record.full_period_reward()?;

        self.ledger.remove(stake_id)?;
        self.vault -= escrow + fee + net;
        self.reward_source += escrow;
        self.fee_collector += fee;
        self.user += net;
        Ok((net, fee))
    }

    /// What custody must hold: principal plus full-period reward for every
    /// active stake.
    fn liability(&self) -> u64 {
        self.ledger
            .stakes
            .iter()
            .map(|s| s.amount + s.full_period_reward().unwrap())
            .sum()
    }

    fn assert_conserved(&self) {
        assert_eq!(self.vault, self.liability(), "custody != active liability");
    }
}

fn assert_err<T: std::fmt::Debug>(res: Result<T>, name: &str) {
    let err = res.expect_err("expected failure");
    let text = format!("{err:?}");
    assert!(text.contains(name), "expected {name}, got: {text}");
}

#[test]
fn conservation_holds_across_mixed_sequences() {
    let mut engine = Engine::new(100_000_000_000, 10_000_000_000);
    let fast = engine.create_pool(1_000, 2_000, THIRTY_DAYS, 500);
    let slow = engine.create_pool(1_000, 800, 6 * THIRTY_DAYS, 1_200);

    let a = engine.open(fast, 5_000_000_000, 1_000).unwrap();
    engine.assert_conserved();
    let b = engine.open(slow, 20_000_000_000, 2_000).unwrap();
    engine.assert_conserved();
    let c = engine.open(fast, 1_000_000_000, 3_000).unwrap();
    engine.assert_conserved();

    engine.exit_early(b, 50_000).unwrap();
    engine.assert_conserved();
    engine.claim(a, 1_000 + THIRTY_DAYS).unwrap();
    engine.assert_conserved();
    engine.claim(c, 3_000 + THIRTY_DAYS).unwrap();
    engine.assert_conserved();

    assert!(engine.ledger.stakes.is_empty());
    assert_eq!(engine.vault, 0);
}

#[test]
fn second_settlement_fails_with_not_found() {
    let mut engine = Engine::new(10_000_000_000, 1_000_000_000);
    let pool = engine.create_pool(0, 1_000, THIRTY_DAYS, 300);

    let id = engine.open(pool, 2_000_000_000, 0).unwrap();
    engine.claim(id, THIRTY_DAYS).unwrap();

    let vault_before = engine.vault;
    let user_before = engine.user;
    assert_err(engine.claim(id, THIRTY_DAYS), "StakeNotFound");
    assert_err(engine.exit_early(id, THIRTY_DAYS + 1), "StakeNotFound");
    assert_eq!(engine.vault, vault_before);
    assert_eq!(engine.user, user_before);
}

#[test]
fn apr_edits_do_not_reach_open_stakes() {
    let mut engine = Engine::new(10_000_000_000, 1_000_000_000);
    let pool = engine.create_pool(0, 500, THIRTY_DAYS, 0);

    let id = engine.open(pool, 1_000_000_000, 0).unwrap();
    let escrow_at_500 = rewards::full_period_reward(0, THIRTY_DAYS, 500, 1_000_000_000).unwrap();
    assert!(escrow_at_500 > 0);

    // A tenfold APR bump after open changes nothing for this stake.
    engine.set_pool_apr(pool, 5_000);
    let payout = engine.claim(id, THIRTY_DAYS).unwrap();
    assert_eq!(payout, 1_000_000_000 + escrow_at_500);
    engine.assert_conserved();
}

#[test]
fn fee_edits_reach_open_stakes() {
    let mut engine = Engine::new(10_000_000_000, 1_000_000_000);
    let pool = engine.create_pool(0, 500, THIRTY_DAYS, 1_200);

    // Fee dropped to zero after open: the exit charges nothing.
    let id = engine.open(pool, 1_000_000_000, 0).unwrap();
    engine.set_pool_unstake_fee(pool, 0);
    let (net, fee) = engine.exit_early(id, 100).unwrap();
    assert_eq!((net, fee), (1_000_000_000, 0));
    engine.assert_conserved();

    // Fee raised after open: the new rate is charged.
    let id = engine.open(pool, 1_000_000_000, 200).unwrap();
    engine.set_pool_unstake_fee(pool, 2_500);
    let (net, fee) = engine.exit_early(id, 300).unwrap();
    assert_eq!((net, fee), (750_000_000, 250_000_000));
    assert_eq!(engine.fee_collector, 250_000_000);
    engine.assert_conserved();
}

#[test]
fn zero_apr_stake_escrows_and_pays_nothing_extra() {
    let mut engine = Engine::new(1_000_000, 500_000);
    let pool = engine.create_pool(0, 0, THIRTY_DAYS, 0);

    let id = engine.open(pool, 250_000, 0).unwrap();
    assert_eq!(engine.reward_source, 500_000); // no escrow pulled
    engine.assert_conserved();

    let payout = engine.claim(id, THIRTY_DAYS).unwrap();
    assert_eq!(payout, 250_000); // exactly principal
    assert_eq!(engine.user, 1_000_000);
}

#[test]
fn thirty_day_scenario_small_principal() {
    // pool{min=5000, apr=500bp, lock=30d, fee=1200bp}, holder stakes 10_000.
    let mut engine = Engine::new(10_000, 1_000_000);
    let pool = engine.create_pool(5_000, 500, THIRTY_DAYS, 1_200);

    // 10_000 * 500 floors to a zero per-second rate, so the escrow pulled
    // at open is exactly zero.
    let id = engine.open(pool, 10_000, 0).unwrap();
    assert_eq!(engine.reward_source, 1_000_000);
    assert_eq!(engine.vault, 10_000);

    // Immediate early exit: fee = floor(10000 * 1200 / 10000) = 1200.
    let (net, fee) = engine.exit_early(id, 0).unwrap();
    assert_eq!((net, fee), (8_800, 1_200));
    assert_eq!(engine.reward_source, 1_000_000); // zero escrow returned
    engine.assert_conserved();

    // Same terms, held to maturity: claim pays principal plus the same
    // (zero) escrowed reward.
    let id = engine.open(pool, 8_800, 100).unwrap();
    let payout = engine.claim(id, 100 + THIRTY_DAYS).unwrap();
    assert_eq!(payout, 8_800);
    engine.assert_conserved();
}

#[test]
fn maturity_boundary_is_matured() {
    let mut engine = Engine::new(10_000_000_000, 1_000_000_000);
    let pool = engine.create_pool(0, 500, THIRTY_DAYS, 1_000);

    // One second early: claim refused, exit allowed.
    let id = engine.open(pool, 1_000_000_000, 0).unwrap();
    assert_err(engine.claim(id, THIRTY_DAYS - 1), "LockNotElapsed");
    engine.exit_early(id, THIRTY_DAYS - 1).unwrap();
    engine.assert_conserved();

    // Exactly at lock_time: matured. Early exit refused, claim succeeds.
    let id = engine.open(pool, 1_000_000_000, 0).unwrap();
    assert_err(engine.exit_early(id, THIRTY_DAYS), "AlreadyMatured");
    engine.claim(id, THIRTY_DAYS).unwrap();
    engine.assert_conserved();
}

#[test]
fn open_preconditions_are_enforced() {
    let mut engine = Engine::new(10_000_000_000, 1_000_000_000);
    let pool = engine.create_pool(5_000, 500, THIRTY_DAYS, 0);

    assert_err(engine.open(pool, 4_999, 0), "BelowPoolMinimum");
    assert_err(engine.open(0, 1_000_000, 0), "PoolNotFound");
    assert_err(engine.open(pool + 1, 1_000_000, 0), "PoolNotFound");
    assert!(engine.ledger.stakes.is_empty());
    assert_eq!(engine.vault, 0);
}

#[test]
fn reward_source_shortfall_aborts_open_without_state_change() {
    // Reward source cannot cover the escrow for this principal/APR.
    let mut engine = Engine::new(100_000_000_000, 10);
    let pool = engine.create_pool(0, 5_000, 12 * THIRTY_DAYS, 0);

    let res = engine.open(pool, 50_000_000_000, 0);
    assert!(res.is_err());
    assert!(engine.ledger.stakes.is_empty());
    assert_eq!(engine.user, 100_000_000_000);
    assert_eq!(engine.reward_source, 10);
    assert_eq!(engine.vault, 0);
    assert_eq!(engine.next_stake_id, 1);
}

#[test]
fn stake_ids_are_globally_monotonic_and_never_reused() {
    let mut engine = Engine::new(10_000_000_000, 1_000_000_000);
    let pool = engine.create_pool(0, 100, THIRTY_DAYS, 0);

    let a = engine.open(pool, 1_000_000, 0).unwrap();
    let b = engine.open(pool, 1_000_000, 0).unwrap();
    engine.exit_early(a, 1).unwrap();
    let c = engine.open(pool, 1_000_000, 2).unwrap();

    assert_eq!((a, b, c), (1, 2, 3));
    assert!(engine.ledger.find(a).is_none());
}

#[test]
fn surviving_stakes_settle_correctly_after_removals() {
    let mut engine = Engine::new(100_000_000_000, 10_000_000_000);
    let pool = engine.create_pool(0, 1_500, THIRTY_DAYS, 800);

    let ids: Vec<u64> = (0..5)
        .map(|i| engine.open(pool, 2_000_000_000, i).unwrap())
        .collect();

    // Remove the middle stake; every other one must still settle for its
    // own principal plus its own escrow.
    engine.exit_early(ids[2], 10).unwrap();
    engine.assert_conserved();

    for (i, &id) in ids.iter().enumerate() {
        if i == 2 {
            continue;
        }
        let record = *engine.ledger.find(id).unwrap();
        let payout = engine.claim(id, record.lock_time).unwrap();
        assert_eq!(payout, record.amount + record.full_period_reward().unwrap());
        engine.assert_conserved();
    }
    assert_eq!(engine.vault, 0);
}
