use serde::{Deserialize, Serialize};
use std::ops::{BitOrAssign, Index, IndexMut};

use crate::interval::Interval;

/// Axis-aligned hyper-rectangle bound: one [`Interval`] per axis, with the
/// Minkowski exponent `P` fixed at compile time (2 = Euclidean).
///
/// Distance results are in squared-Euclidean-equivalent units. At `P = 2`
/// they are literal squared Euclidean distances; other exponents produce the
/// analogous value under the same raise-to-`P`, then raise-to-`2/P`
/// normalization.
///
/// Axes that are still empty (never grown) contribute zero to every distance
/// sum, so queries against a fresh or cleared bound are total and return
/// zero. NaN coordinates propagate per IEEE-754 and signal a caller defect.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HRectBound<const P: i32> {
    bounds: Box<[Interval]>,
}

/// The `P = 2` instantiation used by Euclidean trees.
pub type EuclideanBound = HRectBound<2>;

/// Per-axis contribution raised to the metric exponent. The exponent is a
/// compile-time constant, so the common Euclidean case folds to a single
/// multiply.
#[inline]
fn pow_exponent<const P: i32>(v: f64) -> f64 {
    if P == 2 {
        v * v
    } else {
        v.powi(P)
    }
}

/// Take the P'th root of a sum of P'th powers, keeping the result squared.
#[inline]
fn root_squared<const P: i32>(sum: f64) -> f64 {
    if P == 2 {
        sum
    } else {
        sum.powf(2.0 / P as f64)
    }
}

impl<const P: i32> HRectBound<P> {
    /// A bound of `dim` axes, each initialized to the empty interval.
    pub fn new(dim: usize) -> Self {
        HRectBound {
            bounds: vec![Interval::EMPTY; dim].into_boxed_slice(),
        }
    }

    pub fn dim(&self) -> usize {
        self.bounds.len()
    }

    /// Reset every axis to the empty interval. The dimensionality is kept.
    pub fn clear(&mut self) {
        for b in self.bounds.iter_mut() {
            *b = Interval::EMPTY;
        }
    }

    /// Write the per-axis midpoints into `centroid`, resizing it to `dim`
    /// if its length differs.
    pub fn centroid(&self, centroid: &mut Vec<f64>) {
        centroid.resize(self.dim(), 0.0);
        for (c, b) in centroid.iter_mut().zip(self.bounds.iter()) {
            *c = b.mid();
        }
    }

    /// True iff every coordinate of `point` falls inside its axis interval.
    /// The point may cover a prefix of the axes, but must not exceed `dim`.
    pub fn contains(&self, point: &[f64]) -> bool {
        debug_assert!(point.len() <= self.dim());

        point
            .iter()
            .zip(self.bounds.iter())
            .all(|(&x, b)| b.contains(x))
    }

    /// Lower bound on the distance from this region to `point`. Zero when
    /// the point lies inside the box on every axis.
    pub fn min_distance(&self, point: &[f64]) -> f64 {
        debug_assert_eq!(point.len(), self.dim());

        let mut sum = 0.0;
        for (b, &x) in self.bounds.iter().zip(point.iter()) {
            if b.is_empty() {
                continue;
            }
            let lower = b.lo - x;
            let higher = x - b.hi;
            // At most one of the two is positive. x + |x| doubles the
            // positive side and zeroes the other without branching.
            sum += pow_exponent::<P>((lower + lower.abs()) + (higher + higher.abs()));
        }

        // The doubling comes back as a factor of 4 once the sum is brought
        // to squared units, so divide it out.
        root_squared::<P>(sum) / 4.0
    }

    /// [`min_distance`](Self::min_distance) restricted to the axes listed in
    /// `dims`. An empty list yields zero.
    pub fn min_distance_filtered(&self, point: &[f64], dims: &[usize]) -> f64 {
        debug_assert_eq!(point.len(), self.dim());

        let mut sum = 0.0;
        for &d in dims {
            let b = self.bounds[d];
            if b.is_empty() {
                continue;
            }
            let lower = b.lo - point[d];
            let higher = point[d] - b.hi;
            sum += pow_exponent::<P>((lower + lower.abs()) + (higher + higher.abs()));
        }

        root_squared::<P>(sum) / 4.0
    }

    /// Minimal possible distance between any point of `self` and any point
    /// of `other`. Zero when the regions overlap.
    pub fn min_bound_distance(&self, other: &Self) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());

        let mut sum = 0.0;
        for (a, b) in self.bounds.iter().zip(other.bounds.iter()) {
            if a.is_empty() || b.is_empty() {
                continue;
            }
            let lower = b.lo - a.hi;
            let higher = a.lo - b.hi;
            sum += pow_exponent::<P>((lower + lower.abs()) + (higher + higher.abs()));
        }

        root_squared::<P>(sum) / 4.0
    }

    /// [`min_bound_distance`](Self::min_bound_distance) restricted to the
    /// axes listed in `dims`.
    pub fn min_bound_distance_filtered(&self, other: &Self, dims: &[usize]) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());

        let mut sum = 0.0;
        for &d in dims {
            let (a, b) = (self.bounds[d], other.bounds[d]);
            if a.is_empty() || b.is_empty() {
                continue;
            }
            let lower = b.lo - a.hi;
            let higher = a.lo - b.hi;
            sum += pow_exponent::<P>((lower + lower.abs()) + (higher + higher.abs()));
        }

        root_squared::<P>(sum) / 4.0
    }

    /// Upper bound on the distance from this region to `point`.
    pub fn max_distance(&self, point: &[f64]) -> f64 {
        debug_assert_eq!(point.len(), self.dim());

        let mut sum = 0.0;
        for (b, &x) in self.bounds.iter().zip(point.iter()) {
            if b.is_empty() {
                continue;
            }
            let v = (x - b.lo).max(b.hi - x).abs();
            sum += pow_exponent::<P>(v);
        }

        root_squared::<P>(sum)
    }

    /// Upper bound on the distance from this region to `point`, restricted
    /// to the axes listed in `dims`.
    pub fn max_distance_filtered(&self, point: &[f64], dims: &[usize]) -> f64 {
        debug_assert_eq!(point.len(), self.dim());

        let mut sum = 0.0;
        for &d in dims {
            let b = self.bounds[d];
            if b.is_empty() {
                continue;
            }
            let lower = (point[d] - b.lo).abs();
            let higher = (point[d] - b.hi).abs();
            // |higher - lower| + higher + lower is twice the larger of the
            // two wall distances.
            sum += pow_exponent::<P>((higher - lower).abs() + higher + lower);
        }

        root_squared::<P>(sum) / 4.0
    }

    /// Maximal possible distance between any point of `self` and any point
    /// of `other`.
    pub fn max_bound_distance(&self, other: &Self) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());

        let mut sum = 0.0;
        for (a, b) in self.bounds.iter().zip(other.bounds.iter()) {
            if a.is_empty() || b.is_empty() {
                continue;
            }
            let v = (b.hi - a.lo).max(a.hi - b.lo).abs();
            sum += pow_exponent::<P>(v);
        }

        root_squared::<P>(sum)
    }

    /// [`max_bound_distance`](Self::max_bound_distance) restricted to the
    /// axes listed in `dims`.
    pub fn max_bound_distance_filtered(&self, other: &Self, dims: &[usize]) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());

        let mut sum = 0.0;
        for &d in dims {
            let (a, b) = (self.bounds[d], other.bounds[d]);
            if a.is_empty() || b.is_empty() {
                continue;
            }
            let lower = (b.hi - a.lo).abs();
            let higher = (b.lo - a.hi).abs();
            sum += pow_exponent::<P>((higher - lower).abs() + higher + lower);
        }

        root_squared::<P>(sum) / 4.0
    }

    /// Minimum and maximum distance to `point` in a single pass, returned as
    /// an interval. Agrees with [`min_distance`](Self::min_distance) and
    /// [`max_distance`](Self::max_distance) on the same inputs.
    pub fn range_distance(&self, point: &[f64]) -> Interval {
        debug_assert_eq!(point.len(), self.dim());

        let mut lo_sum = 0.0;
        let mut hi_sum = 0.0;
        for (b, &x) in self.bounds.iter().zip(point.iter()) {
            if b.is_empty() {
                continue;
            }
            let v1 = b.lo - x; // negative if x > lo
            let v2 = x - b.hi; // negative if x < hi
            let (v_lo, v_hi);
            if v1 >= 0.0 {
                // Point at or below the interval; the far wall is hi.
                v_hi = -v2;
                v_lo = v1;
            } else if v2 >= 0.0 {
                // Point at or above the interval; the far wall is lo.
                v_hi = -v1;
                v_lo = v2;
            } else {
                // Inside: nearest distance is zero, farthest wall wins.
                v_hi = -v1.min(v2);
                v_lo = 0.0;
            }
            lo_sum += pow_exponent::<P>(v_lo);
            hi_sum += pow_exponent::<P>(v_hi);
        }

        Interval::new(root_squared::<P>(lo_sum), root_squared::<P>(hi_sum))
    }

    /// Minimum and maximum distance between `self` and `other` in a single
    /// pass. Agrees with [`min_bound_distance`](Self::min_bound_distance)
    /// and [`max_bound_distance`](Self::max_bound_distance).
    pub fn range_bound_distance(&self, other: &Self) -> Interval {
        debug_assert_eq!(self.dim(), other.dim());

        let mut lo_sum = 0.0;
        let mut hi_sum = 0.0;
        for (a, b) in self.bounds.iter().zip(other.bounds.iter()) {
            if a.is_empty() || b.is_empty() {
                continue;
            }
            let v1 = b.lo - a.hi;
            let v2 = a.lo - b.hi;
            // At most one of v1, v2 is positive; ties pick v1 as the far
            // side.
            let (v_lo, v_hi);
            if v1 >= v2 {
                v_hi = -v2;
                v_lo = if v1 > 0.0 { v1 } else { 0.0 };
            } else {
                v_hi = -v1;
                v_lo = if v2 > 0.0 { v2 } else { 0.0 };
            }
            lo_sum += pow_exponent::<P>(v_lo);
            hi_sum += pow_exponent::<P>(v_hi);
        }

        Interval::new(root_squared::<P>(lo_sum), root_squared::<P>(hi_sum))
    }
}

impl<const P: i32> Index<usize> for HRectBound<P> {
    type Output = Interval;

    fn index(&self, axis: usize) -> &Interval {
        &self.bounds[axis]
    }
}

impl<const P: i32> IndexMut<usize> for HRectBound<P> {
    fn index_mut(&mut self, axis: usize) -> &mut Interval {
        &mut self.bounds[axis]
    }
}

impl<const P: i32> BitOrAssign<&[f64]> for HRectBound<P> {
    /// Expand each axis to include the corresponding coordinate of `point`.
    fn bitor_assign(&mut self, point: &[f64]) {
        debug_assert_eq!(point.len(), self.dim());

        for (b, &x) in self.bounds.iter_mut().zip(point.iter()) {
            *b |= x;
        }
    }
}

impl<const P: i32> BitOrAssign<&HRectBound<P>> for HRectBound<P> {
    /// Expand each axis to encompass the corresponding axis of `other`.
    fn bitor_assign(&mut self, other: &HRectBound<P>) {
        debug_assert_eq!(self.dim(), other.dim());

        for (b, &o) in self.bounds.iter_mut().zip(other.bounds.iter()) {
            *b |= o;
        }
    }
}
