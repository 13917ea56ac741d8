// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point capability consumed by the tree, and the two partition orders.

use alloc::string::String;
use core::cmp::Ordering;

use crate::types::{CutDim, Scalar};

/// A 2D point with a unique name.
///
/// The name is the point's identity: lookups and deletions match on it, and it breaks
/// ties between points with identical coordinates.
pub trait NamedPoint {
    /// Coordinate type.
    type Scalar: Scalar;

    /// The x coordinate.
    fn x(&self) -> Self::Scalar;

    /// The y coordinate.
    fn y(&self) -> Self::Scalar;

    /// Unique identity.
    fn name(&self) -> &str;

    /// Coordinate along `dim`.
    #[inline]
    fn coord(&self, dim: CutDim) -> Self::Scalar {
        dim.select(self.x(), self.y())
    }
}

/// Compare two points in the order used by branches cut along `dim`.
///
/// `X` orders by `(x, y, name)`, `Y` by `(y, x, name)`.
pub fn cmp_along<P: NamedPoint>(dim: CutDim, a: &P, b: &P) -> Ordering {
    let (a0, a1, b0, b1) = match dim {
        CutDim::X => (a.x(), a.y(), b.x(), b.y()),
        CutDim::Y => (a.y(), a.x(), b.y(), b.x()),
    };
    partial(a0, b0)
        .then_with(|| partial(a1, b1))
        .then_with(|| a.name().cmp(b.name()))
}

/// Whether `pt` belongs to the left subtree of a branch with this splitter.
#[inline]
pub(crate) fn goes_left<P: NamedPoint>(dim: CutDim, pt: &P, splitter: &P) -> bool {
    cmp_along(dim, pt, splitter) != Ordering::Greater
}

/// Identity comparison used by lookup and deletion.
#[inline]
pub(crate) fn same_point<P: NamedPoint>(a: &P, b: &P) -> bool {
    a.name() == b.name()
}

fn partial<T: PartialOrd>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// A plain named point, for callers that do not bring their own record type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site<T> {
    /// Unique name.
    pub name: String,
    /// The x coordinate.
    pub x: T,
    /// The y coordinate.
    pub y: T,
}

impl<T> Site<T> {
    /// Create a named point.
    pub fn new(name: impl Into<String>, x: T, y: T) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

impl<T: Scalar> NamedPoint for Site<T> {
    type Scalar = T;

    #[inline]
    fn x(&self) -> T {
        self.x
    }

    #[inline]
    fn y(&self) -> T {
        self.y
    }

    #[inline]
    fn name(&self) -> &str {
        &self.name
    }
}
