//! Property-based tests for price normalization and ledger arithmetic.

use proptest::prelude::*;
use stakepool::points::{round_price, truncate_price};
use stakepool::{MemoryStore, PlayerEntry};
use std::sync::Arc;

proptest! {
    #[test]
    fn normalized_amounts_have_two_decimals(amount in -1000.0f32..1000.0) {
        let normalized = round_price(truncate_price(amount));
        let cents = f64::from(normalized) * 100.0;
        prop_assert!(
            (cents - cents.round()).abs() < 0.01,
            "{normalized} is not a two-decimal amount"
        );
    }

    #[test]
    fn normalization_stays_within_one_cent(amount in -1000.0f32..1000.0) {
        let normalized = round_price(truncate_price(amount));
        prop_assert!(
            (normalized - amount).abs() < 0.011,
            "{amount} normalized to {normalized}"
        );
    }

    #[test]
    fn round_price_is_idempotent(amount in -1000.0f32..1000.0) {
        let rounded = round_price(amount);
        prop_assert_eq!(round_price(rounded), rounded);
    }

    #[test]
    fn truncated_amounts_survive_rounding_unchanged(amount in -1000.0f32..1000.0) {
        let truncated = truncate_price(amount);
        prop_assert_eq!(round_price(truncated), truncated);
    }

    #[test]
    fn fund_then_take_restores_balance(amount in 0.01f32..10_000.0) {
        let store = Arc::new(MemoryStore::new());
        let player = PlayerEntry::create_or_find("p1", store).unwrap();
        player.fund(50_000.0).unwrap();

        player.fund(amount).unwrap();
        player.take(amount).unwrap();

        prop_assert_eq!(player.balance().unwrap(), 50_000.0);
    }

    #[test]
    fn take_beyond_balance_never_mutates(balance in 0.0f32..100.0, excess in 0.01f32..100.0) {
        let store = Arc::new(MemoryStore::new());
        let player = PlayerEntry::create_or_find("p1", store).unwrap();
        let balance = truncate_price(balance);
        if balance > 0.0 {
            player.fund(balance).unwrap();
        }

        let before = player.balance().unwrap();
        prop_assert!(player.take(before + excess).is_err());
        prop_assert_eq!(player.balance().unwrap(), before);
    }
}
