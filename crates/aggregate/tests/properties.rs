//! Property tests for the weighted composite.
//!
//! 1. Renormalized weights of present sub-scores sum to 1
//! 2. Coverage is present weight over intended weight
//! 3. The composite stays inside the range of its present scores

use approx::assert_relative_eq;
use proptest::prelude::*;
use sentiment_aggregate::WeightedCompositeAggregator;
use sentiment_core::NamedSubScore;

fn arb_items() -> impl Strategy<Value = Vec<NamedSubScore>> {
    prop::collection::vec((-1.0f64..=1.0, 0.01f64..10.0, any::<bool>()), 0..12).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (score, weight, present))| NamedSubScore {
                name: format!("signal_{i}"),
                score,
                weight,
                present,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn renormalized_weights_sum_to_one(items in arb_items()) {
        let result = WeightedCompositeAggregator::new().aggregate(&items).unwrap();
        let present = items.iter().filter(|i| i.present).count();
        prop_assert_eq!(result.contributions().len(), present);
        if present > 0 {
            let sum: f64 = result.contributions().iter().map(|c| c.normalized_weight).sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn coverage_is_present_over_intended(items in arb_items()) {
        let result = WeightedCompositeAggregator::new().aggregate(&items).unwrap();
        let total: f64 = items.iter().map(|i| i.weight).sum();
        let present: f64 = items.iter().filter(|i| i.present).map(|i| i.weight).sum();
        if present > 0.0 {
            assert_relative_eq!(result.contributing_weight_fraction(), present / total, epsilon = 1e-9);
        } else {
            prop_assert!(result.is_unknown());
            prop_assert_eq!(result.score(), 0.0);
        }
    }

    #[test]
    fn composite_is_within_present_scores(items in arb_items()) {
        let result = WeightedCompositeAggregator::new().aggregate(&items).unwrap();
        let scores: Vec<f64> = items.iter().filter(|i| i.present).map(|i| i.score).collect();
        prop_assert!((-1.0..=1.0).contains(&result.score()));
        if !scores.is_empty() {
            let lo = scores.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(result.score() >= lo - 1e-9 && result.score() <= hi + 1e-9);
        }
    }
}
