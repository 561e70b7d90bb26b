mod common;

use common::{item, nine_item_scale, scenario_rules, session};
use mensura_engine::config::MissingItemPolicy;
use mensura_engine::interpretation::resolve;
use mensura_engine::scoring::{resolve_item_score, score};
use proptest::prelude::*;

proptest! {
    /// Valid responses always land inside the declared range.
    #[test]
    fn total_stays_within_declared_range(
        answers in proptest::collection::vec(proptest::option::of(0u32..=3), 9),
        reversed in proptest::collection::vec(any::<bool>(), 9),
    ) {
        let mut scale = nine_item_scale();
        for (item, reverse) in scale.items.iter_mut().zip(&reversed) {
            item.reverse_scored = *reverse;
        }
        let session = session(&scale, &answers);

        for policy in [MissingItemPolicy::Exclude, MissingItemPolicy::ZeroFill] {
            let result = score(&scale, &session.responses, policy).unwrap();
            prop_assert!(result.total_score >= scale.score_range.min);
            prop_assert!(result.total_score <= scale.score_range.max);
            prop_assert!(result.completion_percentage <= 100);
            prop_assert_eq!(
                result.completion_percentage == 100,
                result.answered_items == result.total_items
            );
        }
    }

    /// Reverse scoring maps the option range onto itself in reverse.
    #[test]
    fn reverse_scoring_is_an_involution(value in 0u32..=3) {
        let mut reversed = item(1);
        reversed.reverse_scored = true;
        let forward = item(1);

        let once = resolve_item_score(&reversed, value).unwrap();
        prop_assert_eq!(once, 3.0 - resolve_item_score(&forward, value).unwrap());
        let twice = resolve_item_score(&reversed, once as u32).unwrap();
        prop_assert_eq!(twice, f64::from(value));
    }

    /// Adding responses never lowers completion.
    #[test]
    fn completion_is_monotonic(
        order in Just((1u32..=9).collect::<Vec<_>>()).prop_shuffle(),
        values in proptest::collection::vec(0u32..=3, 9),
    ) {
        let scale = nine_item_scale();
        let mut session = session(&scale, &[]);
        let mut previous = 0u8;

        for (number, value) in order.iter().zip(&values) {
            session
                .record_response(&scale, common::entry(*number, *value, None))
                .unwrap();
            let result = score(&scale, &session.responses, MissingItemPolicy::Exclude).unwrap();
            prop_assert!(result.completion_percentage >= previous);
            prop_assert!(result.completion_percentage <= 100);
            previous = result.completion_percentage;
        }
        prop_assert_eq!(previous, 100);
    }

    /// Same score and rules, same outcome.
    #[test]
    fn interpretation_is_deterministic(total in -5.0f64..35.0) {
        let rules = scenario_rules();
        prop_assert_eq!(resolve(total, &rules, None, &[]), resolve(total, &rules, None, &[]));
    }
}
