use std::cmp::Ordering;

use crate::r#type::DistanceNum;

/// A trait for point types that can be indexed in a [`KdTree`].
///
/// The tree cycles its partitioning axis through `0..DIM` by depth, so the
/// three methods must agree on what each axis means. For the pruning test to
/// never skip a subtree holding the true nearest point, `axis_sq_dist` must
/// be a lower bound on `sq_dist` to any point on the far side of the
/// splitting plane at `axis`; this holds exactly for orthogonal Euclidean
/// axes. `DIM` must be at least 1.
///
/// [`KdTree`]: crate::kdtree::KdTree
pub trait KdPoint: Send + Sync {
    /// Scalar type carrying squared distances.
    type Dist: DistanceNum;

    /// Number of axes the partitioner cycles through.
    const DIM: usize;

    /// Ordering of `self` relative to `other` on one axis.
    fn axis_cmp(&self, other: &Self, axis: usize) -> Ordering;

    /// Full squared distance between `self` and `other`.
    fn sq_dist(&self, other: &Self) -> Self::Dist;

    /// Squared distance between `self` and `other` along `axis` only.
    fn axis_sq_dist(&self, other: &Self, axis: usize) -> Self::Dist;
}
