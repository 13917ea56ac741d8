// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integrity checks used by tests and debugging.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::error::IntegrityError;
use crate::node::Node;
use crate::point::{NamedPoint, cmp_along};

/// Re-derive sizes and heights bottom-up and verify that every point lies on the
/// correct side of each ancestor's splitter. Returns the subtree's points.
pub(crate) fn check_subtree<P: NamedPoint>(node: &Node<P>) -> Result<Vec<&P>, IntegrityError> {
    let Node::Branch(b) = node else {
        let mut out = Vec::with_capacity(1);
        node.collect(&mut out);
        return Ok(out);
    };
    let mut left = check_subtree(&b.left)?;
    let right = check_subtree(&b.right)?;

    let size = b.left.size() + b.right.size();
    if b.size != size {
        return Err(IntegrityError::SizeMismatch {
            splitter: b.splitter.name().to_string(),
            cached: b.size,
            actual: size,
        });
    }
    let height = 1 + b.left.height().max(b.right.height());
    if b.height != height {
        return Err(IntegrityError::HeightMismatch {
            splitter: b.splitter.name().to_string(),
            cached: b.height,
            actual: height,
        });
    }

    let misplaced = left
        .iter()
        .find(|p| cmp_along(b.cut_dim, **p, &b.splitter) == Ordering::Greater)
        .or_else(|| {
            right
                .iter()
                .find(|p| cmp_along(b.cut_dim, **p, &b.splitter) != Ordering::Greater)
        });
    if let Some(p) = misplaced {
        return Err(IntegrityError::Partition {
            point: p.name().to_string(),
            splitter: b.splitter.name().to_string(),
        });
    }

    left.extend(right);
    Ok(left)
}

/// Largest height a tree that has held `max_items` points may reach:
/// `floor(log_{3/2}(max_items))`.
pub(crate) fn height_bound(max_items: usize) -> usize {
    use crate::node::{BALANCE_DENOM, BALANCE_NUM};

    let ratio = BALANCE_DENOM as f64 / BALANCE_NUM as f64;
    let limit = max_items as f64;
    let mut bound = 0;
    let mut reach = ratio;
    while reach <= limit {
        bound += 1;
        reach *= ratio;
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Site;
    use crate::types::CutDim;
    use alloc::boxed::Box;

    #[test]
    fn bound_matches_log_three_halves() {
        assert_eq!(height_bound(0), 0);
        assert_eq!(height_bound(1), 0);
        assert_eq!(height_bound(2), 1);
        // 1.5^2 = 2.25, 1.5^3 = 3.375
        assert_eq!(height_bound(3), 2);
        assert_eq!(height_bound(4), 3);
        assert_eq!(height_bound(5), 3);
        // 1.5^5 = 7.59
        assert_eq!(height_bound(7), 4);
        assert_eq!(height_bound(8), 5);
        assert_eq!(height_bound(100), 11);
    }

    #[test]
    fn balanced_builds_pass() {
        let pts = (0..20).map(|i| Site::new(alloc::format!("p{i}"), i % 7, i / 7)).collect();
        let n = Node::build(pts).unwrap();
        assert_eq!(check_subtree(&n).unwrap().len(), 20);
    }

    #[test]
    fn detects_misplaced_point() {
        let n = Node::Branch(crate::node::Branch {
            splitter: Site::new("s", 5, 5),
            cut_dim: CutDim::X,
            left: Box::new(Node::Leaf(Site::new("far", 9, 0))),
            right: Box::new(Node::Leaf(Site::new("r", 7, 0))),
            size: 2,
            height: 1,
        });
        assert_eq!(
            check_subtree(&n).unwrap_err(),
            IntegrityError::Partition {
                point: "far".into(),
                splitter: "s".into()
            }
        );
    }

    #[test]
    fn detects_stale_size() {
        let n = Node::Branch(crate::node::Branch {
            splitter: Site::new("a", 0, 0),
            cut_dim: CutDim::X,
            left: Box::new(Node::Leaf(Site::new("a", 0, 0))),
            right: Box::new(Node::Leaf(Site::new("b", 1, 0))),
            size: 3,
            height: 1,
        });
        assert!(matches!(
            check_subtree(&n),
            Err(IntegrityError::SizeMismatch { cached: 3, actual: 2, .. })
        ));
    }
}
