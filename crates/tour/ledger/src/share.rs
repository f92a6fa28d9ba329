//! Share arithmetic
//!
//! Every current participant contributes a 100-unit baseline to the pool and
//! the organizer weight shifts the pool once, independent of head count:
//!
//! ```text
//! pool  = participants * 100 + (100 - organizer_weight)
//! share = floor(total_cost * role_weight / pool)
//! ```

use tour_types::{DegeneratePoolPolicy, LedgerError, LedgerResult};

/// Units each registered participant contributes to the pool.
pub const BASELINE_UNITS: i64 = 100;

/// Pool denominator. Negative when the organizer weight exceeds the baseline
/// on an empty tour.
pub fn pool_units(current_participants: u32, organizer_weight: u32) -> i64 {
    i64::from(current_participants) * BASELINE_UNITS + (BASELINE_UNITS - i64::from(organizer_weight))
}

/// Truncating share of `total_cost` for a role of weight `role_weight`.
pub fn proportional_share(
    total_cost: u64,
    role_weight: u32,
    pool: i64,
    policy: DegeneratePoolPolicy,
) -> LedgerResult<u64> {
    let Ok(divisor) = u128::try_from(pool) else {
        return degenerate(policy);
    };
    if divisor == 0 {
        return degenerate(policy);
    }

    let numerator = u128::from(total_cost) * u128::from(role_weight);
    u64::try_from(numerator / divisor).map_err(|_| LedgerError::InvalidAmount)
}

fn degenerate(policy: DegeneratePoolPolicy) -> LedgerResult<u64> {
    match policy {
        DegeneratePoolPolicy::ZeroShare => Ok(0),
        DegeneratePoolPolicy::Reject => Err(LedgerError::InvalidWeight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pool_units() {
        assert_eq!(pool_units(5, 100), 500);
        assert_eq!(pool_units(0, 100), 0);
        assert_eq!(pool_units(0, 50), 50);
        assert_eq!(pool_units(0, 150), -50);
        assert_eq!(pool_units(2, 1000), -700);
    }

    #[test]
    fn test_even_split() {
        let share = proportional_share(1000, 100, 500, DegeneratePoolPolicy::ZeroShare).unwrap();
        assert_eq!(share, 200);
    }

    #[test]
    fn test_truncates() {
        // 1000 * 100 / 300 = 333.33..
        let share = proportional_share(1000, 100, 300, DegeneratePoolPolicy::ZeroShare).unwrap();
        assert_eq!(share, 333);
    }

    #[test]
    fn test_degenerate_pool_policies() {
        assert_eq!(
            proportional_share(1000, 100, 0, DegeneratePoolPolicy::ZeroShare),
            Ok(0)
        );
        assert_eq!(
            proportional_share(1000, 100, -50, DegeneratePoolPolicy::ZeroShare),
            Ok(0)
        );
        assert_eq!(
            proportional_share(1000, 100, 0, DegeneratePoolPolicy::Reject),
            Err(LedgerError::InvalidWeight)
        );
        assert_eq!(
            proportional_share(1000, 100, -1, DegeneratePoolPolicy::Reject),
            Err(LedgerError::InvalidWeight)
        );
    }

    #[test]
    fn test_overflowing_share_is_invalid_amount() {
        let result = proportional_share(u64::MAX, 1000, 1, DegeneratePoolPolicy::ZeroShare);
        assert_eq!(result, Err(LedgerError::InvalidAmount));
    }

    proptest! {
        #[test]
        fn property_share_never_exceeds_exact_quotient(
            total in 1u64..1_000_000_000,
            weight in 1u32..=1000,
            pool in 1i64..100_000,
        ) {
            let share = proportional_share(total, weight, pool, DegeneratePoolPolicy::Reject).unwrap();
            let exact = u128::from(total) * u128::from(weight);
            prop_assert!(u128::from(share) * pool as u128 <= exact);
            prop_assert!((u128::from(share) + 1) * pool as u128 > exact);
        }
    }
}
