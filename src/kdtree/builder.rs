use crate::kdtree::index::KdNode;
use crate::kdtree::r#trait::KdPoint;
use crate::kdtree::KdTree;

/// Subranges at least this large hand their two subtree constructions to
/// rayon; below it the join overhead outweighs the work.
#[cfg(feature = "rayon")]
const PARALLEL_CUTOFF: usize = 1024;

/// A builder to create a [`KdTree`].
pub struct KdTreeBuilder<P: KdPoint> {
    points: Vec<P>,
}

impl<P: KdPoint> KdTreeBuilder<P> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a new builder with capacity for `num_items` points.
    pub fn with_capacity(num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
        }
    }

    /// Add a point to the index. Returns its insertion index.
    pub fn add(&mut self, point: P) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Consume this builder, performing the k-d partitioning and producing a
    /// [`KdTree`] ready for queries.
    pub fn finish(self) -> KdTree<P> {
        let mut points = self.points;
        assert!(points.len() <= u32::MAX as usize);

        let mut nodes = vec![
            KdNode {
                left: None,
                right: None
            };
            points.len()
        ];
        let root = construct(&mut points, &mut nodes, 0, 0);

        KdTree {
            points,
            nodes,
            root,
        }
    }
}

impl<P: KdPoint> Default for KdTreeBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Median-split one subrange of the backing arena and wire up the resulting
/// node. `points` and `nodes` always cover the same index range, starting
/// `offset` slots into the arena, so a node and its payload share a slot
/// index. The median slot never moves again once chosen: recursion only
/// touches the ranges strictly left and right of it.
fn construct<P: KdPoint>(
    points: &mut [P],
    nodes: &mut [KdNode],
    offset: u32,
    depth: usize,
) -> Option<u32> {
    if points.is_empty() {
        return None;
    }

    let axis = depth % P::DIM;
    let median = points.len() / 2;

    // Linear-time selection rather than a full per-level sort: everything
    // left of the median compares <= on this axis and everything right
    // compares >=, which is the only ordering the tree invariant needs.
    points.select_nth_unstable_by(median, |a, b| a.axis_cmp(b, axis));

    let (left_points, rest) = points.split_at_mut(median);
    let (_, right_points) = rest.split_at_mut(1);
    let (left_nodes, rest) = nodes.split_at_mut(median);
    let (mid, right_nodes) = rest.split_at_mut(1);

    let (left, right) = construct_children(
        left_points,
        left_nodes,
        offset,
        right_points,
        right_nodes,
        offset + median as u32 + 1,
        depth + 1,
    );
    mid[0] = KdNode { left, right };

    Some(offset + median as u32)
}

#[cfg(feature = "rayon")]
fn construct_children<P: KdPoint>(
    left_points: &mut [P],
    left_nodes: &mut [KdNode],
    left_offset: u32,
    right_points: &mut [P],
    right_nodes: &mut [KdNode],
    right_offset: u32,
    depth: usize,
) -> (Option<u32>, Option<u32>) {
    if left_points.len().max(right_points.len()) >= PARALLEL_CUTOFF {
        rayon::join(
            || construct(left_points, left_nodes, left_offset, depth),
            || construct(right_points, right_nodes, right_offset, depth),
        )
    } else {
        (
            construct(left_points, left_nodes, left_offset, depth),
            construct(right_points, right_nodes, right_offset, depth),
        )
    }
}

#[cfg(not(feature = "rayon"))]
fn construct_children<P: KdPoint>(
    left_points: &mut [P],
    left_nodes: &mut [KdNode],
    left_offset: u32,
    right_points: &mut [P],
    right_nodes: &mut [KdNode],
    right_offset: u32,
    depth: usize,
) -> (Option<u32>, Option<u32>) {
    (
        construct(left_points, left_nodes, left_offset, depth),
        construct(right_points, right_nodes, right_offset, depth),
    )
}
