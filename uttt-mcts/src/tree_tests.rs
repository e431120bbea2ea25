use uttt_core::{engine, Action, GameState, X_VALUE};

use crate::tree::{Node, Tree};

#[test]
fn expand_creates_one_child_per_legal_action() {
    let mut node: Node<u32> = Node::new(GameState::new(), None);
    assert!(node.is_leaf());
    node.expand();
    let children = node.children().unwrap();
    assert_eq!(children.len(), 81);
    for child in children {
        let action = child.action.unwrap();
        assert_eq!(action.symbol, X_VALUE);
        assert_eq!(child.state.cells()[action.index as usize], X_VALUE);
    }
    // re-expanding is a no-op
    node.expand();
    assert_eq!(node.children().unwrap().len(), 81);
}

#[test]
fn fresh_tree_has_size_one_and_height_zero() {
    let tree: Tree<u32> = Tree::new(GameState::new());
    assert_eq!(tree.size(), 1);
    assert_eq!(tree.height(), 0);
}

#[test]
fn size_and_height_count_expanded_levels() {
    let mut tree: Tree<u32> = Tree::new(GameState::new());
    tree.root.expand();
    assert_eq!(tree.size(), 82);
    assert_eq!(tree.height(), 1);
    let first = &mut tree.root.children_mut().unwrap()[0];
    first.expand();
    let grandchildren = first.children().unwrap().len();
    assert!(grandchildren > 0);
    assert_eq!(tree.size(), 82 + grandchildren);
    assert_eq!(tree.height(), 2);
}

#[test]
fn synchronize_promotes_the_matching_child_with_its_statistics() {
    let mut tree: Tree<u32> = Tree::new(GameState::new());
    tree.root.expand();
    let action = Action::new(X_VALUE, 40).unwrap();
    let target = engine::play(&GameState::new(), action);
    for child in tree.root.children_mut().unwrap() {
        if child.state == target {
            child.stats = 7;
            child.expand();
        }
    }
    tree.synchronize(&target);
    assert_eq!(tree.root.state, target);
    assert_eq!(tree.root.stats, 7);
    assert_eq!(tree.root.action, Some(action));
    assert!(!tree.root.is_leaf());
}

#[test]
fn synchronize_without_a_match_resets_to_a_fresh_root() {
    let mut tree: Tree<u32> = Tree::new(GameState::new());
    tree.root.expand();
    // two plies ahead of the root, so no root child matches
    let a = engine::play(&GameState::new(), Action::new(X_VALUE, 40).unwrap());
    let b = engine::play(&a, engine::legal_actions(&a)[0]);
    tree.synchronize(&b);
    assert_eq!(tree.root.state, b);
    assert_eq!(tree.root.action, None);
    assert_eq!(tree.size(), 1);
}

#[test]
fn terminal_node_never_expands() {
    // X owns the top meta row once cell 20 lands; the resulting state is
    // terminal and must stay a leaf.
    let digits = format!(
        "{}{}{}{}{}{}{}",
        "111000000",
        "111000000",
        "111000000",
        "0".repeat(54),
        "111000000",
        "1",
        // constraint + result
        "91",
    );
    let state = uttt_core::parse_state(&digits).unwrap();
    assert!(state.is_terminal());
    let mut node: Node<u32> = Node::new(state, None);
    node.expand();
    assert!(node.is_leaf());
}
