// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structure rendering hook.
//!
//! [`KdTree::visit`](crate::KdTree::visit) walks the tree in pre-order and reports
//! each node to a caller-supplied [`TreeVisitor`]; the caller owns the output format.
//! [`NodeSnapshot`] is a ready-made visitor target that captures the structure as an
//! owned value (serializable with the `serde` feature).

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::node::Node;
use crate::point::NamedPoint;
use crate::types::CutDim;

/// Receives the tree structure in pre-order.
pub trait TreeVisitor<P: NamedPoint> {
    /// An internal node; its left then right subtree follow, then [`Self::end_branch`].
    fn branch(&mut self, cut_dim: CutDim, splitter: &P);

    /// A leaf holding `point`.
    fn leaf(&mut self, point: &P);

    /// Both subtrees of the most recent open branch have been reported.
    fn end_branch(&mut self) {}
}

pub(crate) fn walk<P: NamedPoint, V: TreeVisitor<P> + ?Sized>(node: &Node<P>, visitor: &mut V) {
    match node {
        Node::Leaf(p) => visitor.leaf(p),
        Node::Branch(b) => {
            visitor.branch(b.cut_dim, &b.splitter);
            walk(&b.left, visitor);
            walk(&b.right, visitor);
            visitor.end_branch();
        }
    }
}

/// Owned copy of the tree structure.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum NodeSnapshot<T> {
    /// Internal node with its cut dimension and splitter coordinates.
    Internal {
        /// Cut dimension.
        split_dim: CutDim,
        /// Splitter x.
        x: T,
        /// Splitter y.
        y: T,
        /// Points ordered at or below the splitter.
        left: Box<Self>,
        /// Points ordered above the splitter.
        right: Box<Self>,
    },
    /// Leaf with its point's identity and coordinates.
    External {
        /// Point name.
        name: String,
        /// Point x.
        x: T,
        /// Point y.
        y: T,
    },
}

impl<T> NodeSnapshot<T> {
    /// Number of leaves.
    pub fn len(&self) -> usize {
        match self {
            Self::Internal { left, right, .. } => left.len() + right.len(),
            Self::External { .. } => 1,
        }
    }

    /// Always false: a snapshot holds at least one leaf.
    pub fn is_empty(&self) -> bool {
        false
    }
}

struct Frame<T> {
    split_dim: CutDim,
    x: T,
    y: T,
    left: Option<NodeSnapshot<T>>,
    right: Option<NodeSnapshot<T>>,
}

/// Visitor that assembles a [`NodeSnapshot`].
pub(crate) struct SnapshotBuilder<T> {
    open: Vec<Frame<T>>,
    done: Option<NodeSnapshot<T>>,
}

impl<T> SnapshotBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            open: Vec::new(),
            done: None,
        }
    }

    pub(crate) fn finish(self) -> Option<NodeSnapshot<T>> {
        self.done
    }

    fn attach(&mut self, node: NodeSnapshot<T>) {
        match self.open.last_mut() {
            Some(frame) if frame.left.is_none() => frame.left = Some(node),
            Some(frame) => frame.right = Some(node),
            None => self.done = Some(node),
        }
    }
}

impl<P: NamedPoint> TreeVisitor<P> for SnapshotBuilder<P::Scalar> {
    fn branch(&mut self, cut_dim: CutDim, splitter: &P) {
        self.open.push(Frame {
            split_dim: cut_dim,
            x: splitter.x(),
            y: splitter.y(),
            left: None,
            right: None,
        });
    }

    fn leaf(&mut self, point: &P) {
        self.attach(NodeSnapshot::External {
            name: point.name().to_string(),
            x: point.x(),
            y: point.y(),
        });
    }

    fn end_branch(&mut self) {
        if let Some(Frame {
            split_dim,
            x,
            y,
            left: Some(left),
            right: Some(right),
        }) = self.open.pop()
        {
            self.attach(NodeSnapshot::Internal {
                split_dim,
                x,
                y,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
    }
}
