use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::vec2::Vec2;

/// A positioned, labeled, editable vertex in the diagram.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub key: String,
    pub label: String,
    /// Editable text attached to the node; defaults to the key.
    pub code: String,
    pub position: Vec2,
    pub is_input: bool,
    pub is_output: bool,
}

impl Node {
    pub fn new(key: impl Into<String>, position: Vec2) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            code: key.clone(),
            key,
            position,
            is_input: false,
            is_output: false,
        }
    }
}

/// A directed edge between two node keys. Duplicates are permitted and a
/// dangling endpoint is tolerated everywhere (the layout step and the
/// snapshot both skip such links).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub from: String,
    pub to: String,
}

/// The root aggregate. Nodes live in a `Vec` so iteration order is the
/// stable insertion order; `index_by_key` resolves gesture payloads and link
/// endpoints. Mutated only through `Pipeline::apply`.
#[derive(Clone, Debug, Default)]
pub struct GraphState {
    pub nodes: Vec<Node>,
    pub index_by_key: HashMap<String, usize>,
    pub links: Vec<Link>,
    pub dragging: Option<String>,
    pub adding_link_from: Option<String>,
    pub editing_node: Option<String>,
    next_key: u64,
}

impl GraphState {
    pub fn new(seed_nodes: Vec<Node>, seed_links: Vec<Link>) -> Self {
        let mut state = Self::default();
        for node in seed_nodes {
            state.insert_node(node);
        }
        state.links = seed_links;
        state
    }

    /// Appends a node, replacing any previous node with the same key.
    pub fn insert_node(&mut self, node: Node) {
        if let Some(&index) = self.index_by_key.get(&node.key) {
            self.nodes[index] = node;
        } else {
            self.index_by_key.insert(node.key.clone(), self.nodes.len());
            self.nodes.push(node);
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index_by_key.contains_key(key)
    }

    pub fn node(&self, key: &str) -> Option<&Node> {
        self.index_by_key.get(key).map(|&index| &self.nodes[index])
    }

    pub fn node_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.index_by_key
            .get(key)
            .map(|&index| &mut self.nodes[index])
    }

    /// Next auto-generated node key. The counter lives in the state, only
    /// ever increments, and skips over any seed keys of the same shape so a
    /// generated key never collides with one.
    pub fn generate_key(&mut self) -> String {
        loop {
            let key = format!("node-{}", self.next_key);
            self.next_key += 1;
            if !self.contains_key(&key) {
                return key;
            }
        }
    }

    /// A node is held while dragged or edited; held nodes keep their
    /// position through the force passes.
    pub fn is_held(&self, key: &str) -> bool {
        self.dragging.as_deref() == Some(key) || self.editing_node.as_deref() == Some(key)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
