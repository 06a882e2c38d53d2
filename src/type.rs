use std::fmt::Debug;

use num_traits::{Num, NumCast};

/// A trait for scalar types that can carry squared distances.
///
/// Squared distances are accumulated from per-axis terms and then only ever
/// compared against each other, so the bounds stay loose: basic arithmetic
/// plus a partial order. `Send + Sync` is required so that one immutable tree
/// can serve queries from any number of threads.
pub trait DistanceNum: Num + NumCast + PartialOrd + Copy + Debug + Send + Sync {}

impl<T> DistanceNum for T where T: Num + NumCast + PartialOrd + Copy + Debug + Send + Sync {}
