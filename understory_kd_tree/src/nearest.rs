// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-neighbor search over the kd partition.
//!
//! The search threads a cell through the recursion: each branch splits its cell at
//! the splitter's cut coordinate and hands the halves to its children. With pruning
//! enabled, a subtree whose cell is no closer to the query than the best point found
//! so far is skipped.

use crate::node::Node;
use crate::point::NamedPoint;
use crate::types::{Aabb2D, ScalarDist, distance_squared, lt};

type Best<'a, P> = Option<(&'a P, ScalarDist<<P as NamedPoint>::Scalar>)>;

/// Closest point to `(x, y)` below `node`, whose points all lie inside `cell`.
///
/// Ties keep the point discovered first.
pub(crate) fn nearest<'a, P: NamedPoint>(
    node: &'a Node<P>,
    x: P::Scalar,
    y: P::Scalar,
    cell: Aabb2D<P::Scalar>,
    prune: bool,
) -> Option<&'a P> {
    let mut best = None;
    search(node, x, y, cell, prune, &mut best);
    best.map(|(p, _)| p)
}

fn search<'a, P: NamedPoint>(
    node: &'a Node<P>,
    x: P::Scalar,
    y: P::Scalar,
    cell: Aabb2D<P::Scalar>,
    prune: bool,
    best: &mut Best<'a, P>,
) {
    if prune
        && let Some((_, best_d)) = *best
        && !lt(cell.distance_squared_to_point(x, y), best_d)
    {
        return;
    }
    match node {
        Node::Leaf(p) => {
            let d = distance_squared(x, y, p.x(), p.y());
            if best.as_ref().is_none_or(|(_, best_d)| lt(d, *best_d)) {
                *best = Some((p, d));
            }
        }
        Node::Branch(b) => {
            let cut = b.splitter.coord(b.cut_dim);
            let left_cell = cell.left_part(b.cut_dim, cut);
            let right_cell = cell.right_part(b.cut_dim, cut);
            if lt(b.cut_dim.select(x, y), cut) {
                search(&b.left, x, y, left_cell, prune, best);
                search(&b.right, x, y, right_cell, prune, best);
            } else {
                search(&b.right, x, y, right_cell, prune, best);
                search(&b.left, x, y, left_cell, prune, best);
            }
        }
    }
}

/// Linear scan used to cross-check the tree search in tests and benches.
pub fn brute_force_nearest<'a, P, I>(points: I, x: P::Scalar, y: P::Scalar) -> Option<&'a P>
where
    P: NamedPoint + 'a,
    I: IntoIterator<Item = &'a P>,
{
    let mut best: Best<'a, P> = None;
    for p in points {
        let d = distance_squared::<P::Scalar>(x, y, p.x(), p.y());
        if best.as_ref().is_none_or(|(_, best_d)| lt(d, *best_d)) {
            best = Some((p, d));
        }
    }
    best.map(|(p, _)| p)
}
