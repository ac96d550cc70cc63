//! Algebraic laws the zone contract promises to the search engine.

use proptest::prelude::*;

use loris_zone::proptest_generators::{arb_constraint, arb_federation};
use loris_zone::{Federation, Zone};

const DIM: usize = 4;
const MAX_BOUND: i32 = 6;

proptest! {
    #[test]
    fn includes_is_reflexive(f in arb_federation(DIM, MAX_BOUND)) {
        prop_assert!(f.includes(&f));
    }

    #[test]
    fn includes_is_transitive(
        a in arb_federation(DIM, MAX_BOUND),
        cs in proptest::collection::vec(arb_constraint(DIM, MAX_BOUND), 0..3),
    ) {
        // b ⊆ a by construction (a constrained further), so a ⊇ b and any
        // c ⊆ b must satisfy a ⊇ c.
        let mut b = a.clone();
        for c in &cs {
            b.constrain(c);
        }
        prop_assert!(a.includes(&b));
        let mut c = b.clone();
        c.constrain(&loris_zone::ClockConstraint::upper(1, 1, false));
        prop_assert!(a.includes(&c));
    }

    #[test]
    fn empty_is_included_in_everything(f in arb_federation(DIM, MAX_BOUND)) {
        let empty = Federation::empty(DIM);
        prop_assert!(f.includes(&empty));
        if !f.is_empty() {
            prop_assert!(!empty.includes(&f));
        }
    }

    #[test]
    fn constrain_shrinks(
        f in arb_federation(DIM, MAX_BOUND),
        c in arb_constraint(DIM, MAX_BOUND),
    ) {
        let mut g = f.clone();
        g.constrain(&c);
        prop_assert!(f.includes(&g));
    }

    #[test]
    fn up_grows(f in arb_federation(DIM, MAX_BOUND)) {
        let mut g = f.clone();
        g.up();
        prop_assert!(g.includes(&f));
    }

    #[test]
    fn extrapolation_grows(f in arb_federation(DIM, MAX_BOUND)) {
        let max = vec![0, 3, 3, 3];
        let mut g = f.clone();
        g.extrapolate_max_bounds(&max);
        prop_assert!(g.includes(&f));
    }

    #[test]
    fn extrapolation_is_idempotent(f in arb_federation(DIM, MAX_BOUND)) {
        let max = vec![0, 3, 3, 3];
        let mut once = f;
        once.extrapolate_max_bounds(&max);
        let mut twice = once.clone();
        twice.extrapolate_max_bounds(&max);
        prop_assert!(once.includes(&twice) && twice.includes(&once));
    }

    #[test]
    fn remove_included_in_self_empties(f in arb_federation(DIM, MAX_BOUND)) {
        let copy = f.clone();
        let mut g = f;
        g.remove_included_in(&copy);
        prop_assert!(g.is_empty());
    }

    #[test]
    fn union_covers_both_operands(
        a in arb_federation(DIM, MAX_BOUND),
        b in arb_federation(DIM, MAX_BOUND),
    ) {
        let mut u = a.clone();
        u.union(&b);
        prop_assert!(u.includes(&a));
        prop_assert!(u.includes(&b));
    }

    #[test]
    fn reduce_preserves_the_denoted_set(f in arb_federation(DIM, MAX_BOUND)) {
        let mut g = f.clone();
        g.reduce();
        prop_assert!(g.includes(&f) && f.includes(&g));
    }
}
