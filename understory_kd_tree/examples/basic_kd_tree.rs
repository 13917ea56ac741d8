// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory KD Tree: insert, find, nearest neighbor, delete and dump.
//!
//! Run with `RUST_LOG=debug` to see rebalancing decisions.

use tracing_subscriber::EnvFilter;
use understory_kd_tree::{Aabb2D, KdTree, NodeSnapshot, Site};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree: KdTree<Site<f64>> = KdTree::new(Aabb2D::new(0.0, 0.0, 100.0, 100.0));
    for (name, x, y) in [
        ("A", 0.0, 0.0),
        ("B", 10.0, 0.0),
        ("C", 0.0, 10.0),
        ("D", 10.0, 10.0),
        ("E", 5.0, 5.0),
    ] {
        tree.insert(Site::new(name, x, y)).expect("finite coordinates");
    }
    println!("{} points, height {}", tree.len(), tree.height());
    print!("{tree}");

    let near = tree.nearest_neighbor(4.0, 4.0).map(|s| s.name.as_str());
    println!("nearest to (4,4): {:?}", near);

    let found = tree.find(&Site::new("C", 0.0, 10.0)).is_some();
    println!("find C: {found}");

    if let Err(e) = tree.delete(&Site::new("Z", 3.0, 3.0)) {
        println!("delete Z: {e}");
    }
    if let Err(e) = tree.insert(Site::new("bad", f64::NAN, 1.0)) {
        println!("insert bad: {e}");
    }

    tree.delete(&Site::new("E", 5.0, 5.0)).expect("E is stored");
    let near = tree.nearest_neighbor(4.0, 4.0).map(|s| s.name.as_str());
    println!("after deleting E, nearest to (4,4): {:?}", near);

    if let Some(NodeSnapshot::Internal { split_dim, x, y, .. }) = tree.snapshot() {
        println!("root splits on {split_dim:?} at ({x}, {y})");
    }
}
