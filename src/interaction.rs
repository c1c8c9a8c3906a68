use serde::{Deserialize, Serialize};

use crate::graph::{GraphState, Link, Node};
use crate::physics::{LayoutConfig, LayoutScratch, step_layout};
use crate::vec2::Vec2;

/// One disambiguated input event. Hit-testing and gesture recognition happen
/// upstream; by the time a command reaches the pipeline it already names the
/// node it targets (if any) and carries the minimal payload.
///
/// Every command is total: an unknown node key or a command with nothing
/// active degrades to a no-op, never an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    /// Press on a node. Completes a pending link first if one is open.
    StartDragging { key: String },
    /// Pointer release.
    StopDragging,
    /// Pointer moved while a drag is active; the node teleports to the
    /// pointer, no smoothing.
    Drag { position: Vec2 },
    /// Double-click on empty canvas.
    PlaceNode { position: Vec2 },
    /// Double-click on a node; records it as the pending link origin.
    StartAddingLink { key: String },
    /// Modified click on a node.
    StartEditing { key: String },
    /// Text commit for the node under edit.
    StopEditing { text: String },
    /// One simulation step, `delta` in 60 Hz frames.
    Tick { delta: f64 },
}

/// Applies one command to the state. The sole mutation path for
/// `GraphState`; callers feed commands through [`crate::Pipeline`] so they
/// land strictly one at a time in arrival order.
pub fn apply(
    state: &mut GraphState,
    config: &LayoutConfig,
    scratch: &mut LayoutScratch,
    command: Command,
) {
    match command {
        Command::StartDragging { key } => start_dragging(state, key),
        Command::StopDragging => state.dragging = None,
        Command::Drag { position } => drag(state, position),
        Command::PlaceNode { position } => place_node(state, position),
        Command::StartAddingLink { key } => {
            if state.contains_key(&key) {
                state.adding_link_from = Some(key);
            }
        }
        Command::StartEditing { key } => {
            if state.contains_key(&key) {
                state.editing_node = Some(key);
            }
        }
        Command::StopEditing { text } => stop_editing(state, text),
        Command::Tick { delta } => step_layout(state, config, scratch, delta),
    }
}

fn start_dragging(state: &mut GraphState, key: String) {
    if !state.contains_key(&key) {
        return;
    }

    // Any node press resolves a pending link: a press on a different node
    // completes it, a press on the origin itself cancels it.
    if let Some(origin) = state.adding_link_from.take()
        && origin != key
    {
        state.links.push(Link {
            from: origin,
            to: key.clone(),
        });
    }

    state.dragging = Some(key);
}

fn drag(state: &mut GraphState, position: Vec2) {
    if !position.is_finite() {
        return;
    }
    let Some(key) = state.dragging.clone() else {
        return;
    };
    if let Some(node) = state.node_mut(&key) {
        node.position = position;
    }
}

fn place_node(state: &mut GraphState, position: Vec2) {
    if !position.is_finite() {
        return;
    }
    let key = state.generate_key();
    state.insert_node(Node::new(key, position));
}

fn stop_editing(state: &mut GraphState, text: String) {
    let Some(key) = state.editing_node.take() else {
        return;
    };
    if let Some(node) = state.node_mut(&key) {
        node.code = text;
    }
}
