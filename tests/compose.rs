//! Composition laws of states, checked pointwise over a fixed range of points.

use state_sampler::estimator::{Estimator, EstimatorConfig};
use state_sampler::reference::StateRef;
use state_sampler::states::States;

const POINTS: std::ops::RangeInclusive<i32> = -50..=150;

fn leaves(states: &States) -> Vec<StateRef> {
    vec![
        states.mk_discrete(1),
        states.mk_discrete(-3),
        states.mk_segment(0, 10),
        states.mk_segment(40, 120),
        states.mk_empty_segment(),
        states.mk_set([1, 3, 5, 7, 23, 48, 57, 60, 90, 99]),
        states.mk_set([]),
    ]
}

fn same_members(states: &States, f: StateRef, g: StateRef) -> bool {
    POINTS.all(|x| states.contains(f, x) == states.contains(g, x))
}

#[test]
fn intersection_and_union_commute() {
    let states = States::new();
    let leaves = leaves(&states);
    for &a in &leaves {
        for &b in &leaves {
            let ab = states.eval(a & b).unwrap();
            let ba = states.eval(b & a).unwrap();
            assert!(same_members(&states, ab, ba));
            let ab = states.eval(a | b).unwrap();
            let ba = states.eval(b | a).unwrap();
            assert!(same_members(&states, ab, ba));
        }
    }
}

#[test]
fn difference_is_not_symmetric() {
    let states = States::new();
    let one = states.mk_discrete(1);
    let seg = states.mk_segment(0, 10);
    let seg_without_one = states.eval(seg - one).unwrap();
    let one_without_seg = states.eval(one - seg).unwrap();
    assert!(!same_members(&states, seg_without_one, one_without_seg));
    assert!(POINTS.all(|x| !states.contains(one_without_seg, x)));
}

#[test]
fn difference_partitions_union() {
    // (b \ a) ∪ (a ∩ b) ∪ (a \ b) == a ∪ b
    let states = States::new();
    let leaves = leaves(&states);
    for &a in &leaves {
        for &b in &leaves {
            let only_b = states.eval(b - a).unwrap();
            let both = states.eval(a & b).unwrap();
            let only_a = states.eval(a - b).unwrap();
            let left = states.eval(only_b | both).unwrap();
            let parts = states.eval(left | only_a).unwrap();
            let union = states.eval(a | b).unwrap();
            assert!(same_members(&states, parts, union));
        }
    }
}

#[test]
fn empty_segment_is_identity_for_union() {
    let states = States::new();
    let empty = states.mk_empty_segment();
    for a in leaves(&states) {
        let u = states.eval(a | empty).unwrap();
        assert!(same_members(&states, u, a));
        let i = states.eval(a & empty).unwrap();
        assert!(POINTS.all(|x| !states.contains(i, x)));
    }
}

#[test]
fn evaluation_is_total() {
    let states = States::new();
    let seg = states.mk_segment(0, 10);
    let set = states.mk_set([i32::MIN, i32::MAX]);
    let u = states.eval(seg | set).unwrap();
    assert!(states.contains(u, i32::MIN));
    assert!(states.contains(u, i32::MAX));
    assert!(!states.contains(u, i32::MIN + 1));
}

#[test]
fn deep_chain() {
    let states = States::new();
    let mut acc = states.mk_empty_segment();
    for i in 0..200 {
        let point = states.mk_discrete(i * 2);
        acc = states.apply_union(acc, point).unwrap();
    }
    assert!(states.contains(acc, 0));
    assert!(states.contains(acc, 398));
    assert!(!states.contains(acc, 399));
    assert_eq!(states.size(acc), 401);
}

#[test]
fn very_deep_chain() {
    let states = States::new();
    let mut acc = states.mk_empty_segment();
    for i in 0..100_000 {
        acc = states.apply_union(states.mk_discrete(i), acc).unwrap();
    }
    assert!(states.contains(acc, 0));
    assert!(states.contains(acc, 99_999));
    // Misses walk the whole chain.
    assert!(!states.contains(acc, -1));
    assert!(!states.contains(acc, 100_000));

    let estimator = Estimator::new(EstimatorConfig::default().with_range(-100, 100)).unwrap();
    let p = estimator.estimate(&states, acc, 10).unwrap();
    assert!((0.0..=1.0).contains(&p));
    assert_eq!(states.size(acc), 200_001);
}

#[test]
fn very_deep_difference_chain() {
    // Nested on the right operand, so no short-circuit applies to misses.
    let states = States::new();
    let mut acc = states.mk_segment(0, 1_000_000);
    for i in 0..100_000 {
        acc = states.apply_difference(states.mk_discrete(i), acc).unwrap();
    }
    assert!(!states.contains(acc, 0));
    assert!(!states.contains(acc, 99_999));
    assert!(states.contains(acc, 100_000));
    assert!(!states.contains(acc, -1));
}
