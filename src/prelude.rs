pub use rayon::prelude::*;

pub use crate::assemble::{joint_bound, joint_bounds_par};
pub use crate::hrect::{EuclideanBound, HRectBound};
pub use crate::interval::Interval;
pub use crate::kernel::GaussianKernel;
pub use crate::squared_euclidean;
pub use crate::tree_traits::{can_defer_sibling, DisjointPartition, TreeTraits};
