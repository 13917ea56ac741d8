// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extended kd-tree nodes: points live in leaves, branches hold splitters.
//!
//! Every structural operation consumes a subtree and returns its replacement, so the
//! caller rewires its own child pointer and no node needs a parent link.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use tracing::{debug, trace, warn};

use crate::error::Error;
use crate::point::{NamedPoint, cmp_along, goes_left, same_point};
use crate::types::{Aabb2D, CutDim};

/// Numerator of the balance ratio (a child may hold at most 2/3 of its parent).
pub(crate) const BALANCE_NUM: usize = 2;
/// Denominator of the balance ratio.
pub(crate) const BALANCE_DENOM: usize = 3;

pub(crate) enum Node<P> {
    Leaf(P),
    Branch(Branch<P>),
}

pub(crate) struct Branch<P> {
    pub(crate) splitter: P,
    pub(crate) cut_dim: CutDim,
    pub(crate) left: Box<Node<P>>,
    pub(crate) right: Box<Node<P>>,
    pub(crate) size: usize,
    pub(crate) height: usize,
}

impl<P> Branch<P> {
    fn new(splitter: P, cut_dim: CutDim, left: Node<P>, right: Node<P>) -> Self {
        let size = left.size() + right.size();
        let height = 1 + left.height().max(right.height());
        Self {
            splitter,
            cut_dim,
            left: Box::new(left),
            right: Box::new(right),
            size,
            height,
        }
    }
}

impl<P> Node<P> {
    pub(crate) fn size(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(b) => b.size,
        }
    }

    pub(crate) fn height(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Branch(b) => b.height,
        }
    }

    /// Append references to every point in this subtree (left before right).
    pub(crate) fn collect<'a>(&'a self, out: &mut Vec<&'a P>) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Self::Leaf(p) => out.push(p),
                Self::Branch(b) => {
                    stack.push(&b.right);
                    stack.push(&b.left);
                }
            }
        }
    }

    fn into_points(self, out: &mut Vec<P>) {
        match self {
            Self::Leaf(p) => out.push(p),
            Self::Branch(b) => {
                b.left.into_points(out);
                b.right.into_points(out);
            }
        }
    }
}

impl<P: NamedPoint> Node<P> {
    /// Binary descent to the only leaf that could hold `pt`.
    pub(crate) fn find(&self, pt: &P) -> Option<&P> {
        let mut node = self;
        loop {
            match node {
                Self::Leaf(p) => return same_point(p, pt).then_some(p),
                Self::Branch(b) => {
                    node = if goes_left(b.cut_dim, pt, &b.splitter) {
                        &b.left
                    } else {
                        &b.right
                    };
                }
            }
        }
    }

    /// Validate the minimal rectangles an insertion of `pt` would compute, without
    /// touching the structure. Returns the depth of the leaf `pt` would split.
    pub(crate) fn check_insert_path(&self, pt: &P) -> Result<usize, Error> {
        let mut node = self;
        let mut depth = 0;
        loop {
            match node {
                Self::Leaf(p) => {
                    enclose(pt, p)?;
                    return Ok(depth);
                }
                Self::Branch(b) => {
                    enclose(pt, &b.splitter)?;
                    depth += 1;
                    node = if goes_left(b.cut_dim, pt, &b.splitter) {
                        &b.left
                    } else {
                        &b.right
                    };
                }
            }
        }
    }
}

impl<P: NamedPoint + Clone> Node<P> {
    /// Insert `pt` below this node. A leaf turns into a two-leaf branch.
    pub(crate) fn insert(self, pt: P) -> Self {
        match self {
            Self::Leaf(existing) => Self::pair(existing, pt),
            Self::Branch(Branch {
                splitter,
                cut_dim,
                left,
                right,
                ..
            }) => {
                let (left, right) = if goes_left(cut_dim, &pt, &splitter) {
                    (left.insert(pt), *right)
                } else {
                    (*left, right.insert(pt))
                };
                Self::Branch(Branch::new(splitter, cut_dim, left, right))
            }
        }
    }

    /// Remove the leaf holding `pt`. Returns `None` when this subtree disappears.
    ///
    /// A branch that loses a child collapses into the surviving sibling.
    pub(crate) fn remove(self, pt: &P) -> Option<Self> {
        match self {
            Self::Leaf(p) => {
                if same_point(&p, pt) {
                    None
                } else {
                    Some(Self::Leaf(p))
                }
            }
            Self::Branch(Branch {
                splitter,
                cut_dim,
                left,
                right,
                ..
            }) => {
                if goes_left(cut_dim, pt, &splitter) {
                    match left.remove(pt) {
                        None => Some(*right),
                        Some(left) => Some(Self::Branch(Branch::new(
                            splitter, cut_dim, left, *right,
                        ))),
                    }
                } else {
                    match right.remove(pt) {
                        None => Some(*left),
                        Some(right) => Some(Self::Branch(Branch::new(
                            splitter, cut_dim, *left, right,
                        ))),
                    }
                }
            }
        }
    }

    /// Walk the path of the just-inserted `pt` and rebuild the first branch whose
    /// child on that path holds more than 2/3 of its points.
    pub(crate) fn rebalance(self, pt: &P) -> Self {
        match self {
            leaf @ Self::Leaf(_) => {
                warn!(point = pt.name(), "no scapegoat found on insertion path");
                leaf
            }
            Self::Branch(b) => {
                let left_side = goes_left(b.cut_dim, pt, &b.splitter);
                let child_size = if left_side {
                    b.left.size()
                } else {
                    b.right.size()
                };
                if BALANCE_NUM * b.size < BALANCE_DENOM * child_size {
                    debug!(
                        size = b.size,
                        child_size,
                        splitter = b.splitter.name(),
                        "rebuilding scapegoat"
                    );
                    return Self::Branch(b).rebuild();
                }
                let Branch {
                    splitter,
                    cut_dim,
                    left,
                    right,
                    ..
                } = b;
                let (left, right) = if left_side {
                    (left.rebalance(pt), *right)
                } else {
                    (*left, right.rebalance(pt))
                };
                Self::Branch(Branch::new(splitter, cut_dim, left, right))
            }
        }
    }

    /// Replace this subtree with a perfectly balanced one over the same points.
    pub(crate) fn rebuild(self) -> Self {
        let mut points = Vec::with_capacity(self.size());
        self.into_points(&mut points);
        Self::build(points).expect("a subtree always holds at least one point")
    }

    /// Build a balanced subtree: cut along the wider side of the bounding box, put
    /// the `ceil(k/2)` smallest points on the left and split at the last of them.
    pub(crate) fn build(mut points: Vec<P>) -> Option<Self> {
        match points.len() {
            0 => None,
            1 => points.pop().map(Self::Leaf),
            k => {
                let bounds = Aabb2D::bounding(points.iter().map(|p| (p.x(), p.y())))?;
                let cut_dim = bounds.wider_dim();
                points.sort_by(|a, b| cmp_along(cut_dim, a, b));
                let right_points = points.split_off(k.div_ceil(2));
                let splitter = points.last()?.clone();
                trace!(k, ?cut_dim, splitter = splitter.name(), "building branch");
                let left = Self::build(points)?;
                let right = Self::build(right_points)?;
                Some(Self::Branch(Branch::new(splitter, cut_dim, left, right)))
            }
        }
    }

    /// Two-point subtree: the lesser point is the left leaf and the splitter, so
    /// the greater one compares strictly above it on the right.
    fn pair(a: P, b: P) -> Self {
        let cut_dim = Aabb2D::from_point(a.x(), a.y())
            .union_point(b.x(), b.y())
            .wider_dim();
        let (lo, hi) = match cmp_along(cut_dim, &a, &b) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        Self::Branch(Branch::new(
            lo.clone(),
            cut_dim,
            Self::Leaf(lo),
            Self::Leaf(hi),
        ))
    }
}

/// Minimal rectangle around two points, verified to contain both.
pub(crate) fn enclose<P: NamedPoint>(pt: &P, other: &P) -> Result<Aabb2D<P::Scalar>, Error> {
    let rect = Aabb2D::from_point(pt.x(), pt.y()).union_point(other.x(), other.y());
    if rect.contains_point(pt.x(), pt.y()) && rect.contains_point(other.x(), other.y()) {
        Ok(rect)
    } else {
        warn!(
            point = pt.name(),
            other = other.name(),
            rect = ?rect,
            "minimal rectangle does not contain its points"
        );
        Err(Error::GeometryInvariantViolation)
    }
}

impl<P: NamedPoint> Node<P> {
    /// In-order dump with one `| ` per level of depth.
    pub(crate) fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Self::Leaf(p) => {
                indent(f, depth)?;
                writeln!(f, "[{} ({:?}, {:?})]", p.name(), p.x(), p.y())
            }
            Self::Branch(b) => {
                b.left.write_tree(f, depth + 1)?;
                indent(f, depth)?;
                writeln!(
                    f,
                    "{}- ({} ({:?}, {:?}) ht:{} sz:{})",
                    b.cut_dim.index(),
                    b.splitter.name(),
                    b.splitter.x(),
                    b.splitter.y(),
                    b.height,
                    b.size
                )?;
                b.right.write_tree(f, depth + 1)
            }
        }
    }
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("| ")?;
    }
    Ok(())
}
