// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_kd_tree --heading-base-level=0

//! Understory KD Tree: a self-balancing 2D kd-tree of named points.
//!
//! Points live only in leaves; every internal node holds a copy of a stored point
//! (its splitter) and a cut dimension. A point goes left when it orders at or below
//! the splitter along the cut dimension and right otherwise.
//!
//! - Insert and delete points by identity (their name).
//! - Look up a stored point by name, descending by its coordinates.
//! - Find the stored point nearest to a query location.
//! - Walk the structure with a [`TreeVisitor`] or capture it as a [`NodeSnapshot`].
//!
//! Balance follows the scapegoat scheme with `α = 2/3`: an insertion that makes the
//! tree taller than `floor(log_{3/2}(max_items))` rebuilds the topmost subtree on the
//! new point's path in which one child holds more than two thirds of the points, and
//! a deletion that leaves fewer than half of `max_items` points rebuilds the whole
//! tree. Rebuilds cut along the wider side of the points' bounding box and split at
//! the median.
//!
//! The tree is generic over any [`NamedPoint`]; [`Site`] is a ready-made one.
//! Coordinates may be `f32`, `f64`, `i32` or `i64`; squared distances are computed
//! in a type wide enough for any coordinate span (see [`Scalar`]).
//!
//! # Example
//!
//! ```rust
//! use understory_kd_tree::{Aabb2D, KdTree, Site};
//!
//! let mut tree: KdTree<Site<i64>> = KdTree::new(Aabb2D::new(0, 0, 100, 100));
//! for (name, x, y) in [("A", 0, 0), ("B", 10, 0), ("C", 0, 10), ("D", 10, 10), ("E", 5, 5)] {
//!     tree.insert(Site::new(name, x, y)).unwrap();
//! }
//! assert_eq!(tree.len(), 5);
//! assert_eq!(tree.nearest_neighbor(4, 4).unwrap().name, "E");
//!
//! tree.delete(&Site::new("E", 5, 5)).unwrap();
//! assert_eq!(tree.nearest_neighbor(4, 4).unwrap().name, "A");
//! assert!(tree.find(&Site::new("E", 5, 5)).is_none());
//! ```
//!
//! ### Float semantics
//!
//! Insertion verifies that the minimal rectangle of the new point and each point on
//! its path contains both; NaN coordinates fail that check and are rejected with
//! [`Error::GeometryInvariantViolation`].

#![no_std]

extern crate alloc;

mod check;
pub mod config;
pub mod error;
mod nearest;
mod node;
pub mod point;
mod tree;
pub mod types;
pub mod visit;

pub use config::{Config, NearestSearch};
pub use error::{Error, IntegrityError};
pub use nearest::brute_force_nearest;
pub use point::{NamedPoint, Site, cmp_along};
pub use tree::KdTree;
pub use types::{Aabb2D, CutDim, Scalar, ScalarAcc, ScalarDist, distance_squared};
pub use visit::{NodeSnapshot, TreeVisitor};
