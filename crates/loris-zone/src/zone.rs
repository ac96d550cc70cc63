use crate::constraint::{ClockConstraint, ClockId};

/// The fixed zone interface the reachability engine is written against,
/// implemented once per zone representation.
///
/// All operations are total for well-formed zones and in-range clock
/// indices; an out-of-range clock id or a dimension mismatch is a contract
/// violation and panics.
pub trait Zone: Clone {
    /// The origin: every clock equal to 0.
    fn zero(dim: usize) -> Self;

    /// All non-negative clock valuations.
    fn unconstrained(dim: usize) -> Self;

    /// The empty set.
    fn empty(dim: usize) -> Self;

    fn dim(&self) -> usize;

    fn is_empty(&self) -> bool;

    /// Intersect with one constraint; false iff the result is empty.
    fn constrain(&mut self, c: &ClockConstraint) -> bool;

    /// Intersect with a conjunction; false iff the result is empty.
    fn constrain_all(&mut self, cs: &[ClockConstraint]) -> bool {
        let mut nonempty = !self.is_empty();
        for c in cs {
            if !nonempty {
                break;
            }
            nonempty = self.constrain(c);
        }
        nonempty
    }

    /// Reset clock `x` to a fixed non-negative value.
    fn assign(&mut self, x: ClockId, value: i32);

    /// Time elapse: close under non-negative delay.
    fn up(&mut self);

    /// Bounded over-approximation with per-clock maximum constants;
    /// guarantees a finite abstract state space.
    fn extrapolate_max_bounds(&mut self, max: &[i32]);

    /// Partial-order test `self ⊇ other`. May under-approximate on unions,
    /// but must never report inclusion that does not hold.
    fn includes(&self, other: &Self) -> bool;

    /// Remove the portion of `self` already included in `other`; may leave
    /// `self` empty.
    fn remove_included_in(&mut self, other: &Self);

    /// In-place union.
    fn union(&mut self, other: &Self);

    /// Drop redundant internal structure. Purely an optimization; the
    /// denoted set is unchanged.
    fn reduce(&mut self);

    /// Human-readable rendering over named clocks.
    fn formula(&self, clock_names: &[String]) -> String;
}
