use anchor_lang::prelude::*;

use crate::constants::MAX_ACTIVE_STAKES;
use crate::error::StakingError;
use crate::rewards;

/// One active stake. Fields are immutable after creation; a stake is closed
/// by erasing the record, never by mutating it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeRecord {
    /// Globally monotonic id, shared across all holders, assigned from 1.
    pub id: u64,
    /// Pool this stake was opened against.
    pub pool_id: u64,
    /// Principal.
    pub amount: u64,
    /// Open timestamp.
    pub start_time: i64,
    /// Maturity timestamp: `start_time + pool.lock_period` at open time.
    pub lock_time: i64,
    /// APR snapshot taken from the pool at open time. Later pool edits do
    /// not reach this stake.
    pub apr_bps: u16,
}

impl StakeRecord {
    pub const LEN: usize = 8 + 8 + 8 + 8 + 8 + 2;

    pub fn is_matured(&self, now: i64) -> bool {
        now >= self.lock_time
    }

    /// The escrow pre-funded for this stake: reward over the full lock
    /// window at the snapshotted APR, regardless of elapsed time.
    pub fn full_period_reward(&self) -> Result<u64> {
        rewards::full_period_reward(self.start_time, self.lock_time, self.apr_bps, self.amount)
    }

    /// Reward accrued so far, capped at maturity.
    pub fn accrued_reward(&self, now: i64) -> Result<u64> {
        rewards::accrued_reward(self.start_time, self.lock_time, self.apr_bps, self.amount, now)
    }
}

/// Per-holder stake ledger.
///
/// Presence of a record in `stakes` *is* the Active state; closed stakes are
/// fully erased. The collection is unordered: removal swaps the last record
/// into the vacated slot and shrinks by one, so order may change on every
/// removal. No removed id may reappear and no surviving record may be lost,
/// but nothing else about the ordering is meaningful.
#[account]
pub struct StakeLedger {
    pub owner: Pubkey,
    pub bump: u8,
    pub stakes: Vec<StakeRecord>,
}

impl StakeLedger {
    pub const LEN: usize = 8
        + 32
        + 1
        + 4 + StakeRecord::LEN * MAX_ACTIVE_STAKES;

    pub fn find(&self, stake_id: u64) -> Option<&StakeRecord> {
        self.stakes.iter().find(|s| s.id == stake_id)
    }

    pub fn position(&self, stake_id: u64) -> Option<usize> {
        self.stakes.iter().position(|s| s.id == stake_id)
    }

    /// Append a newly opened stake. Fails when the holder is at capacity.
    pub fn push(&mut self, record: StakeRecord) -> Result<()> {
        require!(
            self.stakes.len() < MAX_ACTIVE_STAKES,
            StakingError::StakeLimitReached
        );
        self.stakes.push(record);
        Ok(())
    }

    /// Erase a stake by id: linear scan, then swap-remove. O(1) removal at
    /// the cost of not preserving insertion order.
    pub fn remove(&mut self, stake_id: u64) -> Result<StakeRecord> {
        let pos = self
            .position(stake_id)
            .ok_or(StakingError::StakeNotFound)?;
        Ok(self.stakes.swap_remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> StakeRecord {
        StakeRecord {
            id,
            pool_id: 1,
            amount: 10_000,
            start_time: 1_000,
            lock_time: 1_000 + 2_592_000,
            apr_bps: 500,
        }
    }

    fn ledger_with(ids: &[u64]) -> StakeLedger {
        let mut ledger = StakeLedger {
            owner: Pubkey::new_unique(),
            bump: 255,
            stakes: vec![],
        };
        for &id in ids {
            ledger.push(record(id)).unwrap();
        }
        ledger
    }

    #[test]
    fn removal_preserves_all_survivors() {
        // Remove the first, a middle, and the last entry; in every case
        // exactly the other four ids survive, none duplicated.
        for removed in [1u64, 3, 5] {
            let mut ledger = ledger_with(&[1, 2, 3, 4, 5]);
            let out = ledger.remove(removed).unwrap();
            assert_eq!(out.id, removed);
            assert_eq!(ledger.stakes.len(), 4);

            let mut survivors: Vec<u64> = ledger.stakes.iter().map(|s| s.id).collect();
            survivors.sort_unstable();
            let expected: Vec<u64> = (1..=5).filter(|&id| id != removed).collect();
            assert_eq!(survivors, expected);
        }
    }

    #[test]
    fn removing_sole_entry_leaves_empty_ledger() {
        let mut ledger = ledger_with(&[7]);
        ledger.remove(7).unwrap();
        assert!(ledger.stakes.is_empty());
    }

    #[test]
    fn removed_id_cannot_be_removed_again() {
        let mut ledger = ledger_with(&[1, 2, 3]);
        ledger.remove(2).unwrap();
        assert!(ledger.remove(2).is_err());
        assert!(ledger.find(2).is_none());
    }

    #[test]
    fn find_returns_the_matching_record() {
        let ledger = ledger_with(&[10, 20, 30]);
        assert_eq!(ledger.find(20).unwrap().id, 20);
        assert!(ledger.find(21).is_none());
    }

    #[test]
    fn push_is_rejected_at_capacity() {
        let ids: Vec<u64> = (1..=MAX_ACTIVE_STAKES as u64).collect();
        let mut ledger = ledger_with(&ids);
        assert!(ledger.push(record(999)).is_err());
    }

    #[test]
    fn serialized_record_fits_its_len() {
        let mut buf = vec![];
        record(1).serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), StakeRecord::LEN);
    }
}
