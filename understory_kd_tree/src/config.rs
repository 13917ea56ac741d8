// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time settings for [`KdTree`](crate::KdTree).

use crate::types::Aabb2D;

/// How [`KdTree::nearest_neighbor`](crate::KdTree::nearest_neighbor) walks the tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NearestSearch {
    /// Branch and bound: skip subtrees whose cell cannot hold a closer point.
    #[default]
    Pruned,
    /// Visit every leaf. Same answers as `Pruned`, linear cost.
    Exhaustive,
}

/// Tree settings.
///
/// The extent seeds the search cell for nearest-neighbor queries. Points outside it
/// are still accepted; the working cell grows to cover them.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config<T> {
    /// Map extent.
    pub extent: Aabb2D<T>,
    /// Nearest-neighbor strategy.
    pub nearest: NearestSearch,
}

impl<T> Config<T> {
    /// Settings with the given extent and pruned nearest-neighbor search.
    pub const fn new(extent: Aabb2D<T>) -> Self {
        Self {
            extent,
            nearest: NearestSearch::Pruned,
        }
    }

    /// Replace the nearest-neighbor strategy.
    #[must_use]
    pub const fn with_nearest(mut self, nearest: NearestSearch) -> Self {
        self.nearest = nearest;
        self
    }
}
