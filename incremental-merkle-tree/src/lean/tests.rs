use assert_matches::assert_matches;

use super::*;
use crate::{Blake3FieldHasher, FieldElement};

fn concat(inputs: &[String]) -> String {
    format!("({})", inputs.join(","))
}

fn string_tree(leaves: &[&str]) -> LeanImt<String, fn(&[String]) -> String> {
    let mut tree = LeanImt::new(concat as fn(&[String]) -> String);
    for leaf in leaves {
        tree.insert(leaf.to_string()).unwrap().expect("unique leaf");
    }
    tree
}

fn elements(range: std::ops::Range<u64>) -> Vec<FieldElement> {
    range.map(FieldElement::from).collect()
}

#[test]
fn test_ceil_log2() {
    assert_eq!(ceil_log2(0), 0);
    assert_eq!(ceil_log2(1), 0);
    assert_eq!(ceil_log2(2), 1);
    assert_eq!(ceil_log2(3), 2);
    assert_eq!(ceil_log2(4), 2);
    assert_eq!(ceil_log2(5), 3);
    assert_eq!(ceil_log2(1 << 20), 20);
    assert_eq!(ceil_log2((1 << 20) + 1), 21);
}

#[test]
fn test_empty_tree() {
    let tree: LeanImt<FieldElement, _> = LeanImt::new(Blake3FieldHasher);
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.root(), None);
    assert_matches!(
        tree.generate_proof(0),
        Err(ImtError::IndexOutOfRange {
            index: 0,
            leaf_count: 0
        })
    );
}

#[test]
fn test_depth_follows_leaf_count() {
    let mut tree = LeanImt::new(Blake3FieldHasher);
    let mut depths = Vec::new();
    for leaf in elements(1..6) {
        tree.insert(leaf).unwrap().expect("unique leaf");
        depths.push(tree.depth());
    }
    assert_eq!(depths, vec![0, 1, 2, 2, 3]);
}

#[test]
fn test_lone_nodes_are_promoted() {
    assert_eq!(string_tree(&["a"]).root().map(String::as_str), Some("a"));
    assert_eq!(string_tree(&["a", "b", "c"]).root().map(String::as_str), Some("((a,b),c)"));

    let tree = string_tree(&["a", "b", "c", "d", "e"]);
    assert_eq!(tree.root().map(String::as_str), Some("(((a,b),(c,d)),e)"));
    assert_eq!(tree.nodes(1), &["(a,b)", "(c,d)", "e"]);
    assert_eq!(tree.nodes(2), &["((a,b),(c,d))", "e"]);
    assert_eq!(tree.node(1, 2).map(String::as_str), Some("e"));
    assert_eq!(tree.node(1, 3), None);
}

#[test]
fn test_insert_cost_counts_only_real_hashes() {
    let mut tree = LeanImt::new(Blake3FieldHasher);
    let mut hashes = Vec::new();
    for leaf in elements(1..6) {
        hashes.push(tree.insert(leaf).cost.hash_node_calls);
    }
    assert_eq!(hashes, vec![0, 1, 1, 2, 1]);
}

#[test]
fn test_duplicate_insert_is_rejected() {
    let mut tree = string_tree(&["a", "b"]);
    let root = tree.root().cloned();

    let rejected = tree.insert("a".to_string());
    assert!(rejected.cost.is_nothing());
    assert_matches!(rejected.unwrap(), Err(ImtError::DuplicateLeaf { index: 0 }));
    assert_eq!(tree.size(), 2);
    assert_eq!(tree.root().cloned(), root);
}

#[test]
fn test_insert_many_matches_sequential_inserts() {
    for (existing, added) in [(0, 1), (0, 8), (1, 1), (3, 6), (4, 1), (5, 11), (16, 17)] {
        let initial = elements(1000..1000 + existing);
        let batch = elements(1..1 + added);

        let mut sequential = LeanImt::with_leaves(Blake3FieldHasher, initial.clone())
            .unwrap()
            .expect("unique leaves");
        for leaf in &batch {
            sequential.insert(*leaf).unwrap().expect("unique leaf");
        }

        let mut batched = LeanImt::with_leaves(Blake3FieldHasher, initial)
            .unwrap()
            .expect("unique leaves");
        batched.insert_many(batch).unwrap().expect("unique leaves");

        assert_eq!(batched.root(), sequential.root());
        assert_eq!(batched.depth(), sequential.depth());
        for level in 0..=batched.depth() {
            assert_eq!(batched.nodes(level), sequential.nodes(level));
        }
    }
}

#[test]
fn test_insert_many_rejects_duplicates_before_writing() {
    let mut tree = LeanImt::with_leaves(Blake3FieldHasher, elements(1..4))
        .unwrap()
        .expect("unique leaves");
    let root = tree.root().copied();

    let against_tree = tree.insert_many(vec![FieldElement::from(10), FieldElement::from(2)]);
    assert_eq!(against_tree.cost.hash_node_calls, 0);
    assert_matches!(against_tree.unwrap(), Err(ImtError::DuplicateLeaf { index: 1 }));

    let within_batch = tree.insert_many(vec![
        FieldElement::from(10),
        FieldElement::from(11),
        FieldElement::from(10),
    ]);
    assert_matches!(within_batch.unwrap(), Err(ImtError::DuplicateLeaf { index: 3 }));

    assert_eq!(tree.size(), 3);
    assert_eq!(tree.root().copied(), root);
    assert!(!tree.has(&FieldElement::from(10)));

    let empty = tree.insert_many(Vec::new());
    assert!(empty.cost.is_nothing());
    assert_eq!(empty.unwrap(), Ok(()));
}

#[test]
fn test_update() {
    let mut tree = string_tree(&["a", "b", "c", "d", "e"]);

    let cost = tree.update(4, "x".to_string()).cost;
    // e has no sibling at any level below the root.
    assert_eq!(cost.hash_node_calls, 1);
    assert_eq!(tree.root().map(String::as_str), Some("(((a,b),(c,d)),x)"));

    tree.update(2, "y".to_string()).unwrap().expect("unique leaf");
    assert_eq!(tree.root().map(String::as_str), Some("(((a,b),(y,d)),x)"));
    assert_eq!(tree.size(), 5);
    assert_eq!(tree.index_of(&"y".to_string()), Some(2));
    assert!(!tree.has(&"c".to_string()));

    // Rewriting a leaf with its own value is allowed.
    tree.update(0, "a".to_string()).unwrap().expect("same value in place");

    assert_matches!(
        tree.update(1, "d".to_string()).unwrap(),
        Err(ImtError::DuplicateLeaf { index: 3 })
    );
    assert_matches!(
        tree.update(5, "z".to_string()).unwrap(),
        Err(ImtError::IndexOutOfRange {
            index: 5,
            leaf_count: 5
        })
    );
}

#[test]
fn test_delete_by_zero_update() {
    let mut tree = LeanImt::with_leaves(Blake3FieldHasher, elements(1..6))
        .unwrap()
        .expect("unique leaves");

    tree.update(0, FieldElement::ZERO).unwrap().expect("zero not present yet");
    assert_eq!(tree.size(), 5);
    assert_eq!(tree.index_of(&FieldElement::ZERO), Some(0));

    // Only one leaf can hold the zero value at a time.
    assert_matches!(
        tree.update(1, FieldElement::ZERO).unwrap(),
        Err(ImtError::DuplicateLeaf { index: 0 })
    );
}

#[test]
fn test_proof_marks_promoted_levels() {
    let tree = string_tree(&["a", "b", "c", "d", "e"]);
    let proof = tree.generate_proof(4).expect("leaf exists");
    assert_eq!(proof.root, "(((a,b),(c,d)),e)");
    assert_eq!(
        proof.path,
        vec![
            LeanProofStep {
                sibling: None,
                side: NodeSide::Left
            },
            LeanProofStep {
                sibling: None,
                side: NodeSide::Left
            },
            LeanProofStep {
                sibling: Some("((a,b),(c,d))".to_string()),
                side: NodeSide::Right
            },
        ]
    );
    assert_eq!(tree.verify_proof(&proof).unwrap(), Ok(true));

    let proof = tree.generate_proof(1).expect("leaf exists");
    assert_eq!(proof.path[0].sibling.as_deref(), Some("a"));
    assert_eq!(proof.path[0].side, NodeSide::Right);
    assert_eq!(proof.path[2].sibling.as_deref(), Some("e"));
    assert_eq!(proof.path[2].side, NodeSide::Left);
}

#[test]
fn test_single_leaf_proof() {
    let tree = LeanImt::with_leaves(Blake3FieldHasher, elements(7..8))
        .unwrap()
        .expect("unique leaves");
    let proof = tree.generate_proof(0).expect("leaf exists");
    assert!(proof.path.is_empty());
    assert_eq!(proof.root, FieldElement::from(7));
    assert_eq!(tree.verify_proof(&proof).unwrap(), Ok(true));
}
