//! Property-based tests for the strategy contract.
//!
//! For deterministic entity actions, both strategies must produce exactly
//! one outcome per input entity, with success/failure membership determined
//! by the entities alone — the sequential strategy additionally preserving
//! input order, the concurrent one free to reorder.

use apibatch_engine::entity::mock::{Behavior, MockEntity};
use apibatch_engine::{
    share, ApiAction, ConcurrentStrategy, PushStrategy, SequentialStrategy, SharedEntity,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn make_entities(failures: &[bool]) -> Vec<SharedEntity> {
    failures
        .iter()
        .enumerate()
        .map(|(i, fail)| {
            let behavior = if *fail { Behavior::Fail } else { Behavior::Succeed };
            share(MockEntity::new(format!("entity-{i}")).on_post(behavior))
        })
        .collect()
}

fn failure_plan() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..12)
}

fn run<S: PushStrategy>(
    strategy: &S,
    entities: &[SharedEntity],
) -> Vec<(String, bool)> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("build runtime");
    rt.block_on(async {
        strategy
            .execute(ApiAction::Post, entities)
            .await
            .expect("preconditions hold")
            .into_iter()
            .map(|o| (o.label.clone(), o.is_success()))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Sequential outcomes match the input in length and order, with
    /// success exactly where the entity succeeds.
    #[test]
    fn sequential_preserves_length_and_order(failures in failure_plan()) {
        let entities = make_entities(&failures);
        let outcomes = run(&SequentialStrategy, &entities);

        prop_assert_eq!(outcomes.len(), failures.len());
        for (i, (label, ok)) in outcomes.iter().enumerate() {
            let expected = format!("entity-{i}");
            prop_assert_eq!(label.as_str(), expected.as_str());
            prop_assert_eq!(*ok, !failures[i]);
        }
    }

    /// Concurrent outcomes contain exactly one entry per entity — no
    /// duplicates, no omissions — regardless of individual failures.
    #[test]
    fn concurrent_membership_is_exact(failures in failure_plan()) {
        let entities = make_entities(&failures);
        let outcomes = run(&ConcurrentStrategy::new(), &entities);

        prop_assert_eq!(outcomes.len(), failures.len());
        let labels: HashSet<_> = outcomes.iter().map(|(l, _)| l.clone()).collect();
        prop_assert_eq!(labels.len(), failures.len());

        let expected_failures: HashSet<String> = failures
            .iter()
            .enumerate()
            .filter(|(_, fail)| **fail)
            .map(|(i, _)| format!("entity-{i}"))
            .collect();
        let actual_failures: HashSet<String> = outcomes
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(l, _)| l.clone())
            .collect();
        prop_assert_eq!(actual_failures, expected_failures);
    }

    /// Running the same deterministic inputs twice yields the same
    /// success/failure membership (ordering aside). Entities are rebuilt
    /// between runs so each run dispatches every action exactly once.
    #[test]
    fn repeated_runs_have_identical_membership(failures in failure_plan()) {
        let first = run(&ConcurrentStrategy::new(), &make_entities(&failures));
        let second = run(&ConcurrentStrategy::new(), &make_entities(&failures));

        let first: HashSet<_> = first.into_iter().collect();
        let second: HashSet<_> = second.into_iter().collect();
        prop_assert_eq!(first, second);
    }
}
