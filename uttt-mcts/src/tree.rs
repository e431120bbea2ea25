//! Shared search-tree scaffolding.
//!
//! `Node<T>` owns one state snapshot, the action that produced it, and its
//! lazily created children; `T` carries the algorithm-specific statistics.
//! Nodes hold no parent links — reuse works by re-rooting, which is an
//! ownership move, never a copy.

use std::collections::VecDeque;

use uttt_core::{engine, Action, GameState};

pub struct Node<T> {
    pub state: GameState,
    /// Action that produced `state` from the parent; `None` at a fresh root.
    pub action: Option<Action>,
    pub stats: T,
    children: Option<Vec<Node<T>>>,
}

impl<T: Default> Node<T> {
    pub fn new(state: GameState, action: Option<Action>) -> Self {
        Self {
            state,
            action,
            stats: T::default(),
            children: None,
        }
    }

    /// Create one child per legal action. No-op on an already expanded or
    /// terminal node.
    pub fn expand(&mut self) {
        if self.children.is_some() || self.is_terminal() {
            return;
        }
        let children = engine::legal_actions(&self.state)
            .into_iter()
            .map(|action| Node::new(engine::play(&self.state, action), Some(action)))
            .collect();
        self.children = Some(children);
    }
}

impl<T> Node<T> {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn children(&self) -> Option<&[Node<T>]> {
        self.children.as_deref()
    }

    pub fn children_mut(&mut self) -> Option<&mut [Node<T>]> {
        self.children.as_deref_mut()
    }
}

impl<T> Drop for Node<T> {
    /// Iterative teardown: search trees get deep enough that the default
    /// recursive drop can overflow the call stack.
    fn drop(&mut self) {
        let mut stack = self.children.take().unwrap_or_default();
        while let Some(mut node) = stack.pop() {
            if let Some(children) = node.children.take() {
                stack.extend(children);
            }
        }
    }
}

pub struct Tree<T> {
    pub root: Node<T>,
}

impl<T: Default> Tree<T> {
    pub fn new(state: GameState) -> Self {
        Self {
            root: Node::new(state, None),
        }
    }

    /// Re-root onto the child whose state equals `target`.
    ///
    /// On a match the child subtree is promoted wholesale (statistics
    /// preserved) and every sibling subtree plus the old root shell is
    /// deallocated. With no match the whole tree is discarded and replaced
    /// by a single unexpanded node holding `target`.
    pub fn synchronize(&mut self, target: &GameState) {
        let matched = self
            .root
            .children
            .take()
            .map(|mut children| {
                match children.iter().position(|c| c.state == *target) {
                    Some(i) => Some(children.swap_remove(i)),
                    None => None,
                }
                // remaining siblings drop here
            })
            .unwrap_or(None);
        self.root = matched.unwrap_or_else(|| Node::new(*target, None));
    }
}

impl<T> Tree<T> {
    /// Node count, breadth-first.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut queue: VecDeque<&Node<T>> = VecDeque::from([&self.root]);
        while let Some(node) = queue.pop_front() {
            count += 1;
            if let Some(children) = node.children() {
                queue.extend(children.iter());
            }
        }
        count
    }

    /// Maximum depth below the root, depth-first without recursion.
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&Node<T>, usize)> = vec![(&self.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(children) = node.children() {
                stack.extend(children.iter().map(|c| (c, depth + 1)));
            }
        }
        max_depth
    }
}
