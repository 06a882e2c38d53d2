use std::cmp::Ordering;

use crate::error::{Result, RevGeoError};
use crate::kdtree::r#trait::KdPoint;
use crate::kdtree::KdTreeBuilder;

/// One arena slot. Node `i` owns `points[i]`, so only the child links are
/// stored here; `None` marks an absent child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KdNode {
    pub(crate) left: Option<u32>,
    pub(crate) right: Option<u32>,
}

/// An immutable k-d tree over points of type `P`.
///
/// Usually this will be created via [`KdTree::build`] or a
/// [`KdTreeBuilder`]. The tree is never mutated after construction, so any
/// number of concurrent callers may query it without locking.
#[derive(Debug, Clone)]
pub struct KdTree<P: KdPoint> {
    /// Backing point storage, permuted during construction so that each
    /// node's subtree occupies a contiguous range.
    pub(crate) points: Vec<P>,
    pub(crate) nodes: Vec<KdNode>,
    pub(crate) root: Option<u32>,
}

impl<P: KdPoint> KdTree<P> {
    /// Build a tree from an unordered point collection.
    ///
    /// Zero points yield a valid empty tree; duplicates are indexed as-is.
    pub fn build(points: impl IntoIterator<Item = P>) -> Self {
        let mut builder = KdTreeBuilder::new();
        for point in points {
            builder.add(point);
        }
        builder.finish()
    }

    /// The indexed points, in arena order.
    pub fn points(&self) -> &[P] {
        &self.points
    }

    /// The number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Find the indexed point with minimal squared distance to `query`.
    ///
    /// Fails with [`RevGeoError::EmptyIndex`] when the tree was built from
    /// zero points.
    pub fn find_nearest(&self, query: &P) -> Result<&P> {
        let root = self.root.ok_or(RevGeoError::EmptyIndex)?;
        let best = self.nearest(root, query, 0);
        Ok(&self.points[best as usize])
    }

    // Descend toward the query's side of each splitting plane first, then
    // back out, visiting the far side only when its axis distance could
    // still beat the best candidate. All comparisons are strict, so on an
    // exact tie the first-found (deeper) candidate survives.
    fn nearest(&self, node: u32, query: &P, depth: usize) -> u32 {
        let point = &self.points[node as usize];
        let links = self.nodes[node as usize];
        let axis = depth % P::DIM;

        let (near, far) = match query.axis_cmp(point, axis) {
            Ordering::Less => (links.left, links.right),
            _ => (links.right, links.left),
        };

        let mut best = match near {
            Some(child) => {
                let candidate = self.nearest(child, query, depth + 1);
                if point.sq_dist(query) < self.points[candidate as usize].sq_dist(query) {
                    node
                } else {
                    candidate
                }
            }
            None => node,
        };

        if let Some(child) = far {
            let best_dist = self.points[best as usize].sq_dist(query);
            if point.axis_sq_dist(query, axis) < best_dist {
                let candidate = self.nearest(child, query, depth + 1);
                if self.points[candidate as usize].sq_dist(query) < best_dist {
                    best = candidate;
                }
            }
        }

        best
    }
}
