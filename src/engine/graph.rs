//! Transition graph storage.

use std::collections::VecDeque;

/// A node of the transition graph.
///
/// `Start` is the pseudo-start: the position before any line has been
/// consumed. It is never matchable and only appears as a transition source.
/// Defined states are addressed by their definition index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Start,
    State(usize),
}

/// Adjacency lists from each node to its ordered successors.
///
/// Successor lists keep insertion order and may contain duplicates. The
/// graph is append-only.
#[derive(Clone, Debug, Default)]
pub struct TransitionGraph {
    start: Vec<usize>,
    edges: Vec<Vec<usize>>,
}

impl TransitionGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a node for a newly defined state and return its index.
    pub(crate) fn add_node(&mut self) -> usize {
        self.edges.push(Vec::new());
        self.edges.len() - 1
    }

    pub(crate) fn add_edge(&mut self, from: Node, to: usize) {
        match from {
            Node::Start => self.start.push(to),
            Node::State(index) => self.edges[index].push(to),
        }
    }

    /// Successor indices of `node`, in insertion order.
    pub fn successors(&self, node: Node) -> &[usize] {
        match node {
            Node::Start => &self.start,
            Node::State(index) => self.edges.get(index).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Number of defined states (the pseudo-start excluded).
    pub fn state_count(&self) -> usize {
        self.edges.len()
    }

    /// Every node, pseudo-start first, then states in definition order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        std::iter::once(Node::Start).chain((0..self.edges.len()).map(Node::State))
    }

    /// Every edge as a `(source, destination)` pair.
    pub fn edges(&self) -> impl Iterator<Item = (Node, usize)> + '_ {
        self.nodes()
            .flat_map(move |node| self.successors(node).iter().map(move |&to| (node, to)))
    }

    /// Which states can be reached from the pseudo-start.
    pub fn reachable(&self) -> Vec<bool> {
        let mut seen = vec![false; self.edges.len()];
        let mut queue: VecDeque<usize> = self.start.iter().copied().collect();

        while let Some(index) = queue.pop_front() {
            if std::mem::replace(&mut seen[index], true) {
                continue;
            }
            queue.extend(self.edges[index].iter().copied().filter(|&next| !seen[next]));
        }

        seen
    }
}
