use serde::Serialize;

use crate::graph::GraphState;
use crate::vec2::Vec2;

/// Read-only view of the graph handed to the rendering collaborator: nodes
/// in insertion order, links with both endpoint positions resolved, and the
/// transient interaction flags for highlighting.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub nodes: Vec<SnapshotNode>,
    pub links: Vec<SnapshotLink>,
    pub dragging: Option<String>,
    pub adding_link_from: Option<String>,
    pub editing_node: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SnapshotNode {
    pub key: String,
    pub label: String,
    pub code: String,
    pub position: Vec2,
    pub is_input: bool,
    pub is_output: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SnapshotLink {
    pub from: String,
    pub to: String,
    pub from_position: Vec2,
    pub to_position: Vec2,
}

impl Snapshot {
    pub fn of(state: &GraphState) -> Self {
        let nodes = state
            .nodes
            .iter()
            .map(|node| SnapshotNode {
                key: node.key.clone(),
                label: node.label.clone(),
                code: node.code.clone(),
                position: node.position,
                is_input: node.is_input,
                is_output: node.is_output,
            })
            .collect();

        // Links whose endpoints no longer resolve are dropped from the view
        // rather than rendered half-attached.
        let links = state
            .links
            .iter()
            .filter_map(|link| {
                let from = state.node(&link.from)?;
                let to = state.node(&link.to)?;
                Some(SnapshotLink {
                    from: link.from.clone(),
                    to: link.to.clone(),
                    from_position: from.position,
                    to_position: to.position,
                })
            })
            .collect();

        Self {
            nodes,
            links,
            dragging: state.dragging.clone(),
            adding_link_from: state.adding_link_from.clone(),
            editing_node: state.editing_node.clone(),
        }
    }

    /// Position of the pending link origin, if one is open; the renderer
    /// draws the in-progress link from here to the pointer.
    pub fn pending_link_origin(&self) -> Option<Vec2> {
        let origin = self.adding_link_from.as_deref()?;
        self.nodes
            .iter()
            .find(|node| node.key == origin)
            .map(|node| node.position)
    }
}
