// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `KdTree` API: mutations, balance triggers and queries.

use alloc::vec::Vec;
use core::fmt;

use tracing::{debug, trace};

use crate::check::{check_subtree, height_bound};
use crate::config::{Config, NearestSearch};
use crate::error::{Error, IntegrityError};
use crate::nearest::nearest;
use crate::node::{Node, enclose};
use crate::point::NamedPoint;
use crate::types::Aabb2D;
use crate::visit::{NodeSnapshot, SnapshotBuilder, TreeVisitor, walk};

/// Scapegoat kd-tree over uniquely named points.
///
/// Insertions that make the tree taller than `floor(log_{3/2}(max_items))` rebuild the
/// topmost unbalanced subtree on the new point's path. Deletions that leave fewer than
/// half of `max_items` points rebuild the whole tree.
pub struct KdTree<P: NamedPoint> {
    root: Option<Node<P>>,
    n_items: usize,
    // high-water mark since the last full rebuild
    max_items: usize,
    config: Config<P::Scalar>,
    bounds: Option<Aabb2D<P::Scalar>>,
}

impl<P: NamedPoint> KdTree<P> {
    /// Create an empty tree covering `extent`.
    pub fn new(extent: Aabb2D<P::Scalar>) -> Self {
        Self::with_config(Config::new(extent))
    }

    /// Create an empty tree with explicit settings.
    pub fn with_config(config: Config<P::Scalar>) -> Self {
        Self {
            root: None,
            n_items: 0,
            max_items: 0,
            config,
            bounds: Some(config.extent),
        }
    }

    /// Settings this tree was created with.
    pub fn config(&self) -> &Config<P::Scalar> {
        &self.config
    }

    /// Fixed map extent.
    pub fn extent(&self) -> Aabb2D<P::Scalar> {
        self.config.extent
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.n_items
    }

    /// True if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.n_items == 0
    }

    /// Height of the root (0 for a single leaf or an empty tree).
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, Node::height)
    }

    /// Point count high-water mark since the last full rebuild.
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Look up the stored point with the same name, descending by `pt`'s coordinates.
    pub fn find(&self, pt: &P) -> Option<&P> {
        self.root.as_ref()?.find(pt)
    }

    /// Snapshot of every stored point, in subtree order.
    pub fn entries(&self) -> impl Iterator<Item = &P> + '_ {
        let mut out = Vec::with_capacity(self.n_items);
        if let Some(root) = &self.root {
            root.collect(&mut out);
        }
        out.into_iter()
    }

    /// The stored point closest to `(x, y)`; `None` only when the tree is empty.
    ///
    /// Equidistant points resolve to the one reached first by the descent.
    pub fn nearest_neighbor(&self, x: P::Scalar, y: P::Scalar) -> Option<&P> {
        let root = self.root.as_ref()?;
        let cell = self.bounds.unwrap_or(self.config.extent);
        let prune = self.config.nearest == NearestSearch::Pruned;
        nearest(root, x, y, cell, prune)
    }

    /// Drop every point and the working bounds.
    pub fn clear(&mut self) {
        self.root = None;
        self.n_items = 0;
        self.max_items = 0;
        self.bounds = None;
    }

    /// Report the structure to `visitor` in pre-order.
    pub fn visit<V: TreeVisitor<P> + ?Sized>(&self, visitor: &mut V) {
        if let Some(root) = &self.root {
            walk(root, visitor);
        }
    }

    /// Owned copy of the structure; `None` when empty.
    pub fn snapshot(&self) -> Option<NodeSnapshot<P::Scalar>> {
        let mut builder = SnapshotBuilder::new();
        self.visit(&mut builder);
        builder.finish()
    }

    /// Verify cached sizes and heights, the partition invariant, the item count and
    /// the height bound. Linear in size times height; meant for tests.
    pub fn check(&self) -> Result<(), IntegrityError> {
        let leaves = match &self.root {
            Some(root) => check_subtree(root)?.len(),
            None => 0,
        };
        if leaves != self.n_items {
            return Err(IntegrityError::CountMismatch {
                counted: self.n_items,
                leaves,
            });
        }
        let bound = height_bound(self.max_items);
        if self.height() > bound {
            return Err(IntegrityError::Unbalanced {
                height: self.height(),
                bound,
            });
        }
        Ok(())
    }

    fn reseed_bounds(&self) -> Aabb2D<P::Scalar> {
        self.entries()
            .fold(self.config.extent, |acc, p| acc.union_point(p.x(), p.y()))
    }
}

impl<P: NamedPoint + Clone> KdTree<P> {
    /// Insert a point.
    ///
    /// Fails with [`Error::GeometryInvariantViolation`] (tree unchanged) if a minimal
    /// rectangle on the insertion path does not contain its points, which only
    /// happens for NaN coordinates.
    pub fn insert(&mut self, pt: P) -> Result<(), Error> {
        trace!(point = pt.name(), "insert");
        let depth = match &self.root {
            Some(root) => root.check_insert_path(&pt)?,
            None => {
                enclose(&pt, &pt)?;
                0
            }
        };

        self.bounds = Some(
            self.bounds
                .unwrap_or(self.config.extent)
                .union_point(pt.x(), pt.y()),
        );
        self.n_items += 1;
        self.max_items += 1;

        let bound = height_bound(self.max_items);
        let new_height = match &self.root {
            Some(root) => root.height().max(depth + 1),
            None => 0,
        };
        let path = (new_height > bound).then(|| pt.clone());
        let root = match self.root.take() {
            Some(root) => root.insert(pt),
            None => Node::Leaf(pt),
        };
        self.root = Some(match path {
            Some(path) => {
                debug!(
                    height = root.height(),
                    bound,
                    max_items = self.max_items,
                    "height bound exceeded"
                );
                root.rebalance(&path)
            }
            None => root,
        });
        Ok(())
    }

    /// Remove the point with `pt`'s name, located by `pt`'s coordinates.
    ///
    /// Fails with [`Error::PointNotFound`] (tree unchanged) if no such point exists.
    pub fn delete(&mut self, pt: &P) -> Result<(), Error> {
        trace!(point = pt.name(), "delete");
        if self.find(pt).is_none() {
            return Err(Error::PointNotFound);
        }
        self.root = self.root.take().and_then(|root| root.remove(pt));
        self.n_items -= 1;

        if 2 * self.n_items < self.max_items {
            debug!(
                n_items = self.n_items,
                max_items = self.max_items,
                "rebuilding whole tree"
            );
            self.root = self.root.take().map(Node::rebuild);
            self.max_items = self.n_items;
            self.bounds = Some(self.reseed_bounds());
        }
        Ok(())
    }
}

#[cfg(feature = "kurbo")]
impl<P: NamedPoint<Scalar = f64>> KdTree<P> {
    /// [`Self::nearest_neighbor`] for a Kurbo point.
    pub fn nearest_to(&self, q: kurbo::Point) -> Option<&P> {
        self.nearest_neighbor(q.x, q.y)
    }
}

impl<P: NamedPoint> fmt::Display for KdTree<P> {
    /// Indented in-order dump: left subtree, node, right subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => root.write_tree(f, 0),
            None => Ok(()),
        }
    }
}

impl<P: NamedPoint> fmt::Debug for KdTree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdTree")
            .field("len", &self.n_items)
            .field("max_items", &self.max_items)
            .field("height", &self.height())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
