use crate::constraint::{
    raw_add, raw_bound, raw_is_strict, raw_strict, ClockConstraint, RawBound, LE_ZERO, LS_INFINITY,
};

/// A difference-bound matrix over a fixed clock dimension.
///
/// Entry `(i, j)` encodes the constraint `x_i - x_j ≺ bound` in raw form.
/// Clock 0 is the reference clock, so row 0 carries (negated) lower bounds
/// and column 0 carries upper bounds. Every operation that can tighten
/// entries restores closed (canonical) form, which makes emptiness a
/// diagonal check and inclusion a pointwise comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dbm {
    dim: usize,
    rows: Vec<RawBound>,
}

impl Dbm {
    /// The unconstrained zone: all clocks non-negative, nothing else.
    pub fn unconstrained(dim: usize) -> Self {
        assert!(dim >= 1, "DBM dimension must include the reference clock");
        let mut dbm = Dbm {
            dim,
            rows: vec![LS_INFINITY; dim * dim],
        };
        for j in 0..dim {
            dbm.rows[j] = LE_ZERO; // 0 - x_j <= 0
        }
        for i in 0..dim {
            dbm.rows[i * dim + i] = LE_ZERO;
        }
        dbm
    }

    /// The origin: every clock equal to 0.
    pub fn zero(dim: usize) -> Self {
        assert!(dim >= 1, "DBM dimension must include the reference clock");
        Dbm {
            dim,
            rows: vec![LE_ZERO; dim * dim],
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn at(&self, i: usize, j: usize) -> RawBound {
        assert!(i < self.dim && j < self.dim, "clock index out of range");
        self.rows[i * self.dim + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, r: RawBound) {
        self.rows[i * self.dim + j] = r;
    }

    /// Full Floyd-Warshall closure. Returns false iff the zone is empty.
    pub fn close(&mut self) -> bool {
        for k in 0..self.dim {
            if !self.close_pivot(k) {
                return false;
            }
        }
        true
    }

    /// One closure pass through paths via `k`. Returns false iff a negative
    /// cycle (empty zone) appears.
    fn close_pivot(&mut self, k: usize) -> bool {
        for i in 0..self.dim {
            let dik = self.at(i, k);
            if dik == LS_INFINITY {
                continue;
            }
            for j in 0..self.dim {
                let via = raw_add(dik, self.at(k, j));
                if via < self.at(i, j) {
                    self.set(i, j, via);
                }
            }
            if self.at(i, i) < LE_ZERO {
                return false;
            }
        }
        true
    }

    /// Intersect with one constraint. Returns false iff the result is
    /// empty; the matrix is left closed when non-empty.
    pub fn constrain(&mut self, c: &ClockConstraint) -> bool {
        assert!(
            c.i < self.dim && c.j < self.dim,
            "constraint clock out of range for dimension {}",
            self.dim
        );
        assert!(c.i != c.j, "constraint relates a clock to itself");
        if c.raw >= self.at(c.i, c.j) {
            return true; // no tightening
        }
        if raw_add(self.at(c.j, c.i), c.raw) < LE_ZERO {
            return false; // negative cycle through the new edge
        }
        self.set(c.i, c.j, c.raw);
        // A single tightened edge only needs closure via its endpoints.
        let ok = self.close_pivot(c.i) && self.close_pivot(c.j);
        debug_assert!(ok, "tightening emptied a cycle the pre-check missed");
        ok
    }

    /// Time elapse: remove all upper bounds.
    pub fn up(&mut self) {
        for i in 1..self.dim {
            self.set(i, 0, LS_INFINITY);
        }
    }

    /// Reset clock `x` to the non-negative constant `value`.
    pub fn assign(&mut self, x: usize, value: i32) {
        assert!(x > 0 && x < self.dim, "cannot assign clock {x}");
        assert!(value >= 0, "clocks are non-negative");
        let pos = crate::constraint::raw_weak(value);
        let neg = crate::constraint::raw_weak(-value);
        for j in 0..self.dim {
            let d0j = self.at(0, j);
            self.set(x, j, raw_add(pos, d0j));
            let dj0 = self.at(j, 0);
            self.set(j, x, raw_add(dj0, neg));
        }
        self.set(x, x, LE_ZERO);
    }

    /// Max-bounds extrapolation: bounds above `max[i]` become infinity,
    /// lower bounds below `-max[j]` are relaxed to `< -max[j]`. The result
    /// over-approximates the zone and is re-closed.
    pub fn extrapolate_max_bounds(&mut self, max: &[i32]) {
        assert_eq!(max.len(), self.dim, "max-bounds table has wrong length");
        let mut changed = false;
        for i in 0..self.dim {
            for j in 0..self.dim {
                if i == j {
                    continue;
                }
                let r = self.at(i, j);
                if r == LS_INFINITY {
                    continue;
                }
                if i != 0 && raw_bound(r) > max[i] {
                    self.set(i, j, LS_INFINITY);
                    changed = true;
                } else if raw_bound(r) < -max[j] {
                    self.set(i, j, raw_strict(-max[j]));
                    changed = true;
                }
            }
        }
        if changed {
            // Widening cannot empty the zone, but it can break closure.
            let nonempty = self.close();
            debug_assert!(nonempty);
        }
    }

    /// `self ⊆ other`, exact on closed matrices.
    pub fn subset_of(&self, other: &Dbm) -> bool {
        assert_eq!(self.dim, other.dim, "DBM dimension mismatch");
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a <= b)
    }

    pub fn is_empty(&self) -> bool {
        (0..self.dim).any(|i| self.at(i, i) < LE_ZERO)
    }

    /// True iff the integer valuation satisfies every entry. `point[0]`
    /// must be 0.
    pub fn contains(&self, point: &[i32]) -> bool {
        assert_eq!(point.len(), self.dim, "valuation has wrong length");
        assert_eq!(point[0], 0, "reference clock must be 0");
        for i in 0..self.dim {
            for j in 0..self.dim {
                let r = self.at(i, j);
                if r == LS_INFINITY {
                    continue;
                }
                let diff = point[i] - point[j];
                let ok = if raw_is_strict(r) {
                    diff < raw_bound(r)
                } else {
                    diff <= raw_bound(r)
                };
                if !ok {
                    return false;
                }
            }
        }
        true
    }

    /// Render the non-trivial constraints as a conjunction over named
    /// clocks.
    pub fn render(&self, names: &[impl AsRef<str>]) -> String {
        assert_eq!(names.len(), self.dim, "clock-name table has wrong length");
        let mut atoms = Vec::new();
        for i in 0..self.dim {
            for j in 0..self.dim {
                if i == j {
                    continue;
                }
                let r = self.at(i, j);
                if r == LS_INFINITY || (i == 0 && r == LE_ZERO) {
                    continue;
                }
                let b = raw_bound(r);
                let op = if raw_is_strict(r) { "<" } else { "<=" };
                let atom = if j == 0 {
                    format!("{}{op}{b}", names[i].as_ref())
                } else if i == 0 {
                    let op = if raw_is_strict(r) { ">" } else { ">=" };
                    format!("{}{op}{}", names[j].as_ref(), -b)
                } else {
                    format!("{}-{}{op}{b}", names[i].as_ref(), names[j].as_ref())
                };
                atoms.push(atom);
            }
        }
        if atoms.is_empty() {
            "true".to_string()
        } else {
            atoms.join(" & ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::raw_weak;

    #[test]
    fn zero_is_the_origin() {
        let d = Dbm::zero(3);
        assert!(!d.is_empty());
        assert!(d.contains(&[0, 0, 0]));
        assert!(!d.contains(&[0, 1, 0]));
    }

    #[test]
    fn unconstrained_contains_everything_non_negative() {
        let d = Dbm::unconstrained(3);
        assert!(d.contains(&[0, 0, 0]));
        assert!(d.contains(&[0, 100, 3]));
    }

    #[test]
    fn constrain_tightens_and_detects_emptiness() {
        let mut d = Dbm::unconstrained(2);
        assert!(d.constrain(&ClockConstraint::upper(1, 5, false)));
        assert!(d.contains(&[0, 5]));
        assert!(!d.contains(&[0, 6]));
        assert!(d.constrain(&ClockConstraint::lower(1, 5, false)));
        assert!(d.contains(&[0, 5]));
        assert!(!d.contains(&[0, 4]));
        // x > 5 now contradicts x <= 5.
        assert!(!d.constrain(&ClockConstraint::lower(1, 5, true)));
    }

    #[test]
    fn constrain_propagates_through_differences() {
        // x - y <= 2 and y <= 3 must bound x by 5.
        let mut d = Dbm::unconstrained(3);
        assert!(d.constrain(&ClockConstraint::diff(1, 2, 2, false)));
        assert!(d.constrain(&ClockConstraint::upper(2, 3, false)));
        assert_eq!(d.at(1, 0), raw_weak(5));
    }

    #[test]
    fn up_removes_upper_bounds_only() {
        let mut d = Dbm::zero(3);
        d.up();
        assert!(d.contains(&[0, 7, 7]));
        // Delay is uniform: x - y stays 0.
        assert!(!d.contains(&[0, 7, 6]));
    }

    #[test]
    fn assign_pins_one_clock() {
        let mut d = Dbm::zero(3);
        d.up();
        d.assign(1, 0);
        assert!(d.contains(&[0, 0, 4]));
        assert!(!d.contains(&[0, 1, 4]));
        // x was reset while y kept its value: y - x is the elapsed time.
        assert!(!d.contains(&[0, 2, 1]));
    }

    #[test]
    fn extrapolation_widens_beyond_max() {
        let mut d = Dbm::unconstrained(2);
        assert!(d.constrain(&ClockConstraint::lower(1, 10, false)));
        assert!(d.constrain(&ClockConstraint::upper(1, 12, false)));
        d.extrapolate_max_bounds(&[0, 3]);
        // Everything above the max constant collapses to "x > 3".
        assert!(d.contains(&[0, 100]));
        assert!(!d.contains(&[0, 3]));
        assert!(d.contains(&[0, 4]));
    }

    #[test]
    fn extrapolation_keeps_small_bounds() {
        let mut d = Dbm::unconstrained(2);
        assert!(d.constrain(&ClockConstraint::upper(1, 2, false)));
        let before = d.clone();
        d.extrapolate_max_bounds(&[0, 3]);
        assert_eq!(before, d);
    }

    #[test]
    fn subset_is_reflexive_and_ordered() {
        let big = Dbm::unconstrained(2);
        let mut small = Dbm::unconstrained(2);
        assert!(small.constrain(&ClockConstraint::upper(1, 5, false)));
        assert!(small.subset_of(&small));
        assert!(small.subset_of(&big));
        assert!(!big.subset_of(&small));
    }

    #[test]
    fn render_names_constraints() {
        let mut d = Dbm::unconstrained(3);
        assert!(d.constrain(&ClockConstraint::upper(1, 5, false)));
        assert!(d.constrain(&ClockConstraint::lower(2, 1, true)));
        let s = d.render(&["0", "x", "y"]);
        assert!(s.contains("x<=5"), "{s}");
        assert!(s.contains("y>1"), "{s}");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_clock_is_a_contract_violation() {
        let mut d = Dbm::unconstrained(2);
        d.constrain(&ClockConstraint::upper(5, 1, false));
    }

    #[test]
    #[should_panic(expected = "cannot assign clock")]
    fn assigning_the_reference_clock_is_a_contract_violation() {
        let mut d = Dbm::unconstrained(2);
        d.assign(0, 1);
    }
}
