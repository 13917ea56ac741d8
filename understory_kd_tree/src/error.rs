// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;

/// Failures reported by [`KdTree`](crate::KdTree) mutations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No point with the requested identity is stored at the given coordinates.
    #[error("point not found")]
    PointNotFound,

    /// A bounding rectangle did not contain the points it was computed from.
    ///
    /// This is an internal defect (or a NaN coordinate). Details are logged.
    #[error("bounding rectangle does not contain the points that produced it")]
    GeometryInvariantViolation,
}

/// Structural problems found by [`KdTree::check`](crate::KdTree::check).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    /// A branch's cached size disagrees with its children.
    #[error("size mismatch at branch split by {splitter}: cached {cached}, actual {actual}")]
    SizeMismatch {
        /// Name of the branch's splitter.
        splitter: String,
        /// Stored size.
        cached: usize,
        /// Size derived from the children.
        actual: usize,
    },

    /// A branch's cached height disagrees with its children.
    #[error("height mismatch at branch split by {splitter}: cached {cached}, actual {actual}")]
    HeightMismatch {
        /// Name of the branch's splitter.
        splitter: String,
        /// Stored height.
        cached: usize,
        /// Height derived from the children.
        actual: usize,
    },

    /// A point sits on the wrong side of an ancestor's splitter.
    #[error("point {point} is on the wrong side of splitter {splitter}")]
    Partition {
        /// Misplaced point.
        point: String,
        /// Splitter it violates.
        splitter: String,
    },

    /// The tree's item count disagrees with the number of leaves.
    #[error("item count {counted} does not match {leaves} leaves")]
    CountMismatch {
        /// Tracked item count.
        counted: usize,
        /// Leaves reachable from the root.
        leaves: usize,
    },

    /// The root is taller than the scapegoat bound allows.
    #[error("height {height} exceeds the bound {bound}")]
    Unbalanced {
        /// Root height.
        height: usize,
        /// `floor(log_1.5(max_items))`.
        bound: usize,
    },
}
