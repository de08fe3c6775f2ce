//! Reward and escrow arithmetic.
//!
//! Pure integer math shared by the open, claim, and early-exit paths. All
//! intermediates are `u128` with checked operations; divisions floor.
//!
//! The per-second rate floors *before* being multiplied by the elapsed
//! duration, so very small principal/APR combinations produce a rate of
//! exactly zero and therefore a reward of exactly zero. This dust loss is a
//! documented property of the engine, not a bug: a stake whose
//! `principal * apr` does not reach one token unit per year of seconds earns
//! nothing.

use anchor_lang::prelude::*;

use crate::constants::{BASIS_POINTS_DENOMINATOR, SECONDS_PER_YEAR};
use crate::error::StakingError;

/// Per-second reward rate for a principal at an annualized rate.
///
/// `floor(principal * apr_bps / SECONDS_PER_YEAR / 10000)` — two successive
/// floor divisions, matching the engine's accounting exactly.
pub fn reward_rate(principal: u64, apr_bps: u16) -> Result<u64> {
    let rate = (principal as u128)
        .checked_mul(apr_bps as u128)
        .ok_or(StakingError::MathOverflow)?
        / SECONDS_PER_YEAR as u128
        / BASIS_POINTS_DENOMINATOR as u128;
    u64::try_from(rate).map_err(|_| error!(StakingError::ConversionOverflow))
}

/// Linear reward accrued over `[start, end]` at the stake's snapshotted APR.
///
/// No compounding and no time-weighting: the floored per-second rate times
/// the window length.
pub fn reward_for_window(start: i64, end: i64, apr_bps: u16, principal: u64) -> Result<u64> {
    require!(end >= start, StakingError::InvalidTimestamp);
    let duration = (end - start) as u128;

    let rate = reward_rate(principal, apr_bps)? as u128;
    let reward = rate
        .checked_mul(duration)
        .ok_or(StakingError::MathOverflow)?;
    u64::try_from(reward).map_err(|_| error!(StakingError::ConversionOverflow))
}

/// Escrow pulled into custody at open time: the reward over the full lock
/// window. Both exit paths disburse or return exactly this amount.
pub fn full_period_reward(
    start_time: i64,
    lock_time: i64,
    apr_bps: u16,
    principal: u64,
) -> Result<u64> {
    reward_for_window(start_time, lock_time, apr_bps, principal)
}

/// Reward accrued up to `now`, capped at maturity. Used by the read-only
/// views; never exceeds the full-period escrow.
pub fn accrued_reward(
    start_time: i64,
    lock_time: i64,
    apr_bps: u16,
    principal: u64,
    now: i64,
) -> Result<u64> {
    let end = now.clamp(start_time, lock_time);
    reward_for_window(start_time, end, apr_bps, principal)
}

/// Early-exit penalty: `floor(principal * fee_bps / 10000)`.
pub fn exit_fee(principal: u64, fee_bps: u16) -> Result<u64> {
    let fee = (principal as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(StakingError::MathOverflow)?
        / BASIS_POINTS_DENOMINATOR as u128;
    u64::try_from(fee).map_err(|_| error!(StakingError::ConversionOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    #[test]
    fn rate_floors_to_zero_for_dust() {
        // 10_000 * 500 = 5_000_000 < SECONDS_PER_YEAR, so the per-second
        // rate floors to zero and the stake earns nothing.
        assert_eq!(reward_rate(10_000, 500).unwrap(), 0);
        assert_eq!(reward_for_window(0, 30 * DAY, 500, 10_000).unwrap(), 0);
    }

    #[test]
    fn rate_is_floored_before_duration_multiply() {
        // 1e9 * 500 / 31_536_000 = 15_854 (floored), / 10_000 = 1.
        assert_eq!(reward_rate(1_000_000_000, 500).unwrap(), 1);
        // One unit per second over 30 days.
        assert_eq!(
            reward_for_window(0, 30 * DAY, 500, 1_000_000_000).unwrap(),
            2_592_000
        );
    }

    #[test]
    fn zero_apr_earns_nothing() {
        assert_eq!(reward_rate(u32::MAX as u64, 0).unwrap(), 0);
        assert_eq!(reward_for_window(100, 100 + 365 * DAY, 0, 1_000_000).unwrap(), 0);
    }

    #[test]
    fn empty_window_earns_nothing() {
        assert_eq!(reward_for_window(500, 500, 1_000, 1_000_000_000).unwrap(), 0);
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert!(reward_for_window(10, 9, 1_000, 1_000).is_err());
    }

    #[test]
    fn accrued_is_capped_at_maturity() {
        let (start, lock) = (1_000, 1_000 + 30 * DAY);
        let full = full_period_reward(start, lock, 800, 5_000_000_000).unwrap();
        assert!(full > 0);
        // Well past maturity the accrued reward stays at the full amount.
        assert_eq!(
            accrued_reward(start, lock, 800, 5_000_000_000, lock + 90 * DAY).unwrap(),
            full
        );
        // Before the start it is zero.
        assert_eq!(accrued_reward(start, lock, 800, 5_000_000_000, 0).unwrap(), 0);
        // Midway it is half (the window length is even).
        assert_eq!(
            accrued_reward(start, lock, 800, 5_000_000_000, start + 15 * DAY).unwrap(),
            full / 2
        );
    }

    #[test]
    fn exit_fee_basis_points() {
        assert_eq!(exit_fee(10_000, 1_200).unwrap(), 1_200);
        assert_eq!(exit_fee(10_000, 0).unwrap(), 0);
        assert_eq!(exit_fee(3, 3_333).unwrap(), 0); // floors
        assert_eq!(exit_fee(10_000, 10_000).unwrap(), 10_000);
    }
}
