use rayon::prelude::*;
use tracing::debug;

use crate::hrect::HRectBound;

/// Fold the points selected by `indices` into a fresh bound.
///
/// `data` is row-major with `dim` coordinates per point, so point `i`
/// occupies `data[i * dim..(i + 1) * dim]`.
pub fn joint_bound<const P: i32>(data: &[f64], dim: usize, indices: &[usize]) -> HRectBound<P> {
    debug_assert!(dim == 0 || data.len() % dim == 0);

    let mut bound = HRectBound::new(dim);
    for &i in indices {
        bound |= &data[i * dim..(i + 1) * dim];
    }
    bound
}

/// One bound per partition, computed in parallel.
///
/// Partitions belonging to disjoint nodes touch disjoint bounds, so each
/// maps onto its own rayon job with no shared mutable state.
pub fn joint_bounds_par<const P: i32>(
    data: &[f64],
    dim: usize,
    partitions: &[Vec<usize>],
) -> Vec<HRectBound<P>> {
    debug!("assembling bounds for {} nodes", partitions.len());

    partitions
        .par_iter()
        .map(|indices| joint_bound(data, dim, indices))
        .collect()
}
